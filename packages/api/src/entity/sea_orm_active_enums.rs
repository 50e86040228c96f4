//! Active enums shared across the OrderHub entities.
//!
//! String values mirror the Postgres enum types created by the migration
//! crate; serde names mirror the wire format.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "order_status")]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "processing")]
    Processing,
    #[sea_orm(string_value = "shipped")]
    Shipped,
    #[sea_orm(string_value = "delivered")]
    Delivered,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
    #[sea_orm(string_value = "refunded")]
    Refunded,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Refunded => "refunded",
        }
    }

    /// Parse a query/path parameter. Case-insensitive, returns `None` for
    /// unknown values so callers can surface a field-level error.
    pub fn parse_param(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "pending" => Some(OrderStatus::Pending),
            "processing" => Some(OrderStatus::Processing),
            "shipped" => Some(OrderStatus::Shipped),
            "delivered" => Some(OrderStatus::Delivered),
            "cancelled" => Some(OrderStatus::Cancelled),
            "refunded" => Some(OrderStatus::Refunded),
            _ => None,
        }
    }

    /// Transition legality. The matrix is deliberately strict: cancelled and
    /// refunded are terminal, and a status never transitions to itself.
    pub fn can_transition_to(&self, target: &OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, target),
            (Pending, Processing)
                | (Pending, Cancelled)
                | (Processing, Shipped)
                | (Processing, Cancelled)
                | (Shipped, Delivered)
                | (Shipped, Cancelled)
                | (Delivered, Refunded)
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Cancelled | OrderStatus::Refunded)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "payment_status")]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "paid")]
    Paid,
    #[sea_orm(string_value = "failed")]
    Failed,
    #[sea_orm(string_value = "refunded")]
    Refunded,
}

impl PaymentStatus {
    pub fn parse_param(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "pending" => Some(PaymentStatus::Pending),
            "paid" => Some(PaymentStatus::Paid),
            "failed" => Some(PaymentStatus::Failed),
            "refunded" => Some(PaymentStatus::Refunded),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "payment_method")]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[sea_orm(string_value = "credit_card")]
    CreditCard,
    #[sea_orm(string_value = "debit_card")]
    DebitCard,
    #[sea_orm(string_value = "paypal")]
    Paypal,
    #[sea_orm(string_value = "bank_transfer")]
    BankTransfer,
    #[sea_orm(string_value = "cash_on_delivery")]
    CashOnDelivery,
}

impl PaymentMethod {
    pub fn parse_param(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "credit_card" => Some(PaymentMethod::CreditCard),
            "debit_card" => Some(PaymentMethod::DebitCard),
            "paypal" => Some(PaymentMethod::Paypal),
            "bank_transfer" => Some(PaymentMethod::BankTransfer),
            "cash_on_delivery" => Some(PaymentMethod::CashOnDelivery),
            _ => None,
        }
    }
}

/// Settlement state of an individual payment record. Distinct from
/// [`PaymentStatus`], which summarizes the order as a whole.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "payment_state")]
#[serde(rename_all = "snake_case")]
pub enum PaymentState {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "failed")]
    Failed,
    #[sea_orm(string_value = "refunded")]
    Refunded,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_roundtrip() {
        for (s, parsed) in [
            ("pending", OrderStatus::Pending),
            ("processing", OrderStatus::Processing),
            ("shipped", OrderStatus::Shipped),
            ("delivered", OrderStatus::Delivered),
            ("cancelled", OrderStatus::Cancelled),
            ("refunded", OrderStatus::Refunded),
        ] {
            assert_eq!(OrderStatus::parse_param(s), Some(parsed.clone()));
            assert_eq!(parsed.as_str(), s);
        }
        assert_eq!(OrderStatus::parse_param("SHIPPED"), Some(OrderStatus::Shipped));
        assert_eq!(OrderStatus::parse_param("unknown"), None);
    }

    #[test]
    fn test_transition_matrix_forward_path() {
        use OrderStatus::*;
        assert!(Pending.can_transition_to(&Processing));
        assert!(Processing.can_transition_to(&Shipped));
        assert!(Shipped.can_transition_to(&Delivered));
        assert!(Delivered.can_transition_to(&Refunded));
    }

    #[test]
    fn test_transition_matrix_cancellation() {
        use OrderStatus::*;
        assert!(Pending.can_transition_to(&Cancelled));
        assert!(Processing.can_transition_to(&Cancelled));
        assert!(Shipped.can_transition_to(&Cancelled));
        assert!(!Delivered.can_transition_to(&Cancelled));
    }

    #[test]
    fn test_terminal_states_have_no_exits() {
        use OrderStatus::*;
        for target in [Pending, Processing, Shipped, Delivered, Cancelled, Refunded] {
            assert!(!Cancelled.can_transition_to(&target));
            assert!(!Refunded.can_transition_to(&target));
        }
        assert!(Cancelled.is_terminal());
        assert!(Refunded.is_terminal());
        assert!(!Shipped.is_terminal());
    }

    #[test]
    fn test_no_self_transitions() {
        use OrderStatus::*;
        for status in [Pending, Processing, Shipped, Delivered, Cancelled, Refunded] {
            assert!(!status.can_transition_to(&status));
        }
    }

    #[test]
    fn test_no_skipping_ahead() {
        use OrderStatus::*;
        assert!(!Pending.can_transition_to(&Shipped));
        assert!(!Pending.can_transition_to(&Delivered));
        assert!(!Processing.can_transition_to(&Delivered));
        assert!(!Shipped.can_transition_to(&Processing));
    }

    #[test]
    fn test_serde_wire_format() {
        let json = serde_json::to_string(&OrderStatus::Processing).unwrap();
        assert_eq!(json, "\"processing\"");
        let method: PaymentMethod = serde_json::from_str("\"cash_on_delivery\"").unwrap();
        assert_eq!(method, PaymentMethod::CashOnDelivery);
        let state = serde_json::to_string(&PaymentState::Completed).unwrap();
        assert_eq!(state, "\"completed\"");
    }
}
