//! In-process notification events for the staff dashboard.
//!
//! The order service publishes onto a broadcast channel after its
//! transaction commits; `GET /orders/events` re-exposes the channel as SSE.
//! Emission is best-effort: an event with no subscribers is dropped.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::entity::sea_orm_active_enums::OrderStatus;

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum OrderEvent {
    #[serde(rename_all = "camelCase")]
    Created {
        order_id: String,
        order_number: String,
        customer_id: String,
        total: Decimal,
    },
    #[serde(rename_all = "camelCase")]
    StatusUpdated {
        order_id: String,
        order_number: String,
        from_status: OrderStatus,
        to_status: OrderStatus,
        updated_at: NaiveDateTime,
    },
}

impl OrderEvent {
    /// SSE event name
    pub fn name(&self) -> &'static str {
        match self {
            OrderEvent::Created { .. } => "order.created",
            OrderEvent::StatusUpdated { .. } => "order.status.updated",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_event_names() {
        let created = OrderEvent::Created {
            order_id: "o1".into(),
            order_number: "ORD-20260805-ABC123".into(),
            customer_id: "c1".into(),
            total: Decimal::new(10800, 2),
        };
        assert_eq!(created.name(), "order.created");
    }

    #[test]
    fn test_status_updated_payload_shape() {
        let updated = OrderEvent::StatusUpdated {
            order_id: "o1".into(),
            order_number: "ORD-20260805-ABC123".into(),
            from_status: OrderStatus::Pending,
            to_status: OrderStatus::Processing,
            updated_at: chrono::NaiveDate::from_ymd_opt(2026, 8, 5)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
        };
        let value = serde_json::to_value(&updated).unwrap();
        assert_eq!(value["fromStatus"], "pending");
        assert_eq!(value["toStatus"], "processing");
        assert_eq!(value["orderId"], "o1");
    }
}
