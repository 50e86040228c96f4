//! Order lifecycle service.
//!
//! All writes to orders, items, history, and payments funnel through this
//! module so the monetary invariants and the append-only history ledger
//! cannot be bypassed by individual handlers. Every operation runs inside a
//! single transaction and emits its notification event only after commit.

use chrono::{NaiveDateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, EntityTrait, TransactionTrait};

use orderhub_types::create_id;

use crate::{
    entity::{
        customer, order, order_item, order_status_history, payment,
        sea_orm_active_enums::{OrderStatus, PaymentMethod, PaymentState, PaymentStatus},
    },
    error::ApiError,
    events::OrderEvent,
    state::State,
};

/// Sales tax applied to the order subtotal.
fn tax_rate() -> Decimal {
    Decimal::new(8, 2) // 8%
}

#[derive(Debug, Clone)]
pub struct OrderItemInput {
    pub product_name: String,
    pub product_sku: Option<String>,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub notes: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreateOrderInput {
    pub customer_id: String,
    pub payment_method: Option<PaymentMethod>,
    pub shipping_address: Option<String>,
    pub billing_address: Option<String>,
    pub notes: Option<String>,
    pub estimated_delivery: Option<NaiveDateTime>,
    pub shipping_cost: Option<Decimal>,
    pub discount: Option<Decimal>,
    pub items: Vec<OrderItemInput>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateOrderInput {
    pub status: Option<OrderStatus>,
    pub status_notes: Option<String>,
    pub expected_status: Option<OrderStatus>,
    pub payment_method: Option<PaymentMethod>,
    pub payment_status: Option<PaymentStatus>,
    pub shipping_address: Option<String>,
    pub billing_address: Option<String>,
    pub notes: Option<String>,
    pub estimated_delivery: Option<NaiveDateTime>,
}

#[derive(Debug, Clone)]
pub struct RecordPaymentInput {
    pub amount: Decimal,
    pub method: PaymentMethod,
    pub status: Option<PaymentState>,
    pub transaction_id: Option<String>,
    pub gateway_response: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderTotals {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub shipping_cost: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
}

/// `total_price = quantity * unit_price`, rounded to cents.
pub fn line_total(quantity: i32, unit_price: Decimal) -> Decimal {
    (unit_price * Decimal::from(quantity)).round_dp(2)
}

/// Derive tax and total from the item subtotal.
/// `total = subtotal + tax + shipping_cost - discount`, tax = 8% of subtotal.
pub fn compute_totals(subtotal: Decimal, shipping_cost: Decimal, discount: Decimal) -> OrderTotals {
    let tax = (subtotal * tax_rate()).round_dp(2);
    OrderTotals {
        subtotal,
        tax,
        shipping_cost,
        discount,
        total: subtotal + tax + shipping_cost - discount,
    }
}

/// `ORD-YYYYMMDD-XXXXXX`, suffix taken from a fresh cuid.
pub fn generate_order_number(now: NaiveDateTime) -> String {
    let id = create_id();
    let suffix: String = id[id.len().saturating_sub(6)..].to_uppercase();
    format!("ORD-{}-{}", now.format("%Y%m%d"), suffix)
}

/// Field-by-field validation, rejected before any write.
pub fn validate_create(input: &CreateOrderInput) -> Result<(), ApiError> {
    let mut errors: Vec<String> = Vec::new();

    if input.items.is_empty() {
        errors.push("items: at least one item is required".to_string());
    }
    for (idx, item) in input.items.iter().enumerate() {
        if item.product_name.trim().is_empty() {
            errors.push(format!("items[{}].productName: must not be empty", idx));
        }
        if item.quantity < 1 {
            errors.push(format!("items[{}].quantity: must be at least 1", idx));
        }
        if item.unit_price < Decimal::ZERO {
            errors.push(format!("items[{}].unitPrice: must not be negative", idx));
        }
    }
    if input.shipping_cost.is_some_and(|v| v < Decimal::ZERO) {
        errors.push("shippingCost: must not be negative".to_string());
    }
    if input.discount.is_some_and(|v| v < Decimal::ZERO) {
        errors.push("discount: must not be negative".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::bad_request(errors.join("; ")))
    }
}

/// Create an order with its items, totals, and the initial history row as
/// one atomic unit. Rolls back in full on any failure.
pub async fn create_order(
    state: &State,
    input: CreateOrderInput,
    actor_id: Option<String>,
) -> Result<(order::Model, Vec<order_item::Model>), ApiError> {
    validate_create(&input)?;

    let now = Utc::now().naive_utc();
    let txn = state.db.begin().await?;

    customer::Entity::find_by_id(&input.customer_id)
        .one(&txn)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Customer {} not found", input.customer_id)))?;

    let subtotal: Decimal = input
        .items
        .iter()
        .map(|item| line_total(item.quantity, item.unit_price))
        .sum();
    let totals = compute_totals(
        subtotal,
        input.shipping_cost.unwrap_or(Decimal::ZERO),
        input.discount.unwrap_or(Decimal::ZERO),
    );

    let order_id = create_id();
    let active_order = order::ActiveModel {
        id: Set(order_id.clone()),
        order_number: Set(generate_order_number(now)),
        customer_id: Set(input.customer_id.clone()),
        status: Set(OrderStatus::Pending),
        subtotal: Set(totals.subtotal),
        tax: Set(totals.tax),
        shipping_cost: Set(totals.shipping_cost),
        discount: Set(totals.discount),
        total: Set(totals.total),
        payment_method: Set(input.payment_method),
        payment_status: Set(PaymentStatus::Pending),
        shipping_address: Set(input.shipping_address),
        billing_address: Set(input.billing_address),
        notes: Set(input.notes),
        estimated_delivery: Set(input.estimated_delivery),
        delivered_at: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    };
    let order = active_order.insert(&txn).await?;

    let mut items = Vec::with_capacity(input.items.len());
    for item in input.items {
        let active_item = order_item::ActiveModel {
            id: Set(create_id()),
            order_id: Set(order_id.clone()),
            product_name: Set(item.product_name),
            product_sku: Set(item.product_sku),
            quantity: Set(item.quantity),
            unit_price: Set(item.unit_price),
            total_price: Set(line_total(item.quantity, item.unit_price)),
            notes: Set(item.notes),
            created_at: Set(now),
            updated_at: Set(now),
        };
        items.push(active_item.insert(&txn).await?);
    }

    let creation_entry = order_status_history::ActiveModel {
        id: Set(create_id()),
        order_id: Set(order_id),
        actor_id: Set(actor_id),
        from_status: Set(None),
        to_status: Set(OrderStatus::Pending),
        notes: Set(Some("Order created".to_string())),
        created_at: Set(now),
    };
    creation_entry.insert(&txn).await?;

    txn.commit().await?;

    state.emit(OrderEvent::Created {
        order_id: order.id.clone(),
        order_number: order.order_number.clone(),
        customer_id: order.customer_id.clone(),
        total: order.total,
    });

    Ok((order, items))
}

/// Move an order to a new status, appending exactly one history row.
///
/// The transition matrix in [`OrderStatus::can_transition_to`] is enforced,
/// and callers may pass `expected_status` as a compare-and-swap guard
/// against concurrent updates; both checks run against the row re-read
/// inside the transaction.
pub async fn update_order_status(
    state: &State,
    order_id: &str,
    new_status: OrderStatus,
    actor_id: Option<String>,
    notes: Option<String>,
    expected_status: Option<OrderStatus>,
) -> Result<order::Model, ApiError> {
    let now = Utc::now().naive_utc();
    let txn = state.db.begin().await?;

    let order = order::Entity::find_by_id(order_id)
        .one(&txn)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Order {} not found", order_id)))?;
    let from_status = order.status.clone();

    if let Some(expected) = expected_status {
        if from_status != expected {
            return Err(ApiError::conflict(format!(
                "Order {} is {}, expected {}",
                order.order_number, from_status, expected
            )));
        }
    }

    if !from_status.can_transition_to(&new_status) {
        return Err(ApiError::unprocessable(format!(
            "Cannot transition order {} from {} to {}",
            order.order_number, from_status, new_status
        )));
    }

    let order_number = order.order_number.clone();
    let mut active: order::ActiveModel = order.into();
    active.status = Set(new_status.clone());
    if new_status == OrderStatus::Delivered {
        active.delivered_at = Set(Some(now));
    }
    active.updated_at = Set(now);
    let updated = active.update(&txn).await?;

    let entry = order_status_history::ActiveModel {
        id: Set(create_id()),
        order_id: Set(order_id.to_string()),
        actor_id: Set(actor_id),
        from_status: Set(Some(from_status.clone())),
        to_status: Set(new_status.clone()),
        notes: Set(Some(notes.unwrap_or_else(|| {
            synthesize_transition_note(&from_status, &new_status)
        }))),
        created_at: Set(now),
    };
    entry.insert(&txn).await?;

    txn.commit().await?;

    state.emit(OrderEvent::StatusUpdated {
        order_id: updated.id.clone(),
        order_number,
        from_status,
        to_status: new_status,
        updated_at: updated.updated_at,
    });

    Ok(updated)
}

/// Default history note when the caller does not supply one.
pub fn synthesize_transition_note(from: &OrderStatus, to: &OrderStatus) -> String {
    format!("Status changed from {} to {}", from, to)
}

/// Partial update of the order's mutable fields. A `status` field in the
/// payload routes through [`update_order_status`] first.
pub async fn update_order(
    state: &State,
    order_id: &str,
    input: UpdateOrderInput,
    actor_id: Option<String>,
) -> Result<order::Model, ApiError> {
    let current = order::Entity::find_by_id(order_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Order {} not found", order_id)))?;

    if let Some(new_status) = input.status {
        if new_status != current.status {
            update_order_status(
                state,
                order_id,
                new_status,
                actor_id,
                input.status_notes,
                input.expected_status,
            )
            .await?;
        }
    }

    let now = Utc::now().naive_utc();
    let txn = state.db.begin().await?;

    let order = order::Entity::find_by_id(order_id)
        .one(&txn)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Order {} not found", order_id)))?;
    let mut active: order::ActiveModel = order.into();

    if input.payment_method.is_some() {
        active.payment_method = Set(input.payment_method);
    }
    if let Some(payment_status) = input.payment_status {
        active.payment_status = Set(payment_status);
    }
    if input.shipping_address.is_some() {
        active.shipping_address = Set(input.shipping_address);
    }
    if input.billing_address.is_some() {
        active.billing_address = Set(input.billing_address);
    }
    if input.notes.is_some() {
        active.notes = Set(input.notes);
    }
    if input.estimated_delivery.is_some() {
        active.estimated_delivery = Set(input.estimated_delivery);
    }
    active.updated_at = Set(now);

    let updated = active.update(&txn).await?;
    txn.commit().await?;

    Ok(updated)
}

/// Record a payment against an order. A completed payment stamps `paid_at`
/// and marks the order paid in the same transaction.
pub async fn record_payment(
    state: &State,
    order_id: &str,
    input: RecordPaymentInput,
) -> Result<payment::Model, ApiError> {
    if input.amount <= Decimal::ZERO {
        return Err(ApiError::bad_request("amount: must be positive"));
    }

    let now = Utc::now().naive_utc();
    let txn = state.db.begin().await?;

    let order = order::Entity::find_by_id(order_id)
        .one(&txn)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Order {} not found", order_id)))?;

    let status = input.status.unwrap_or(PaymentState::Pending);
    let completed = status == PaymentState::Completed;

    let active_payment = payment::ActiveModel {
        id: Set(create_id()),
        order_id: Set(order_id.to_string()),
        transaction_id: Set(input.transaction_id),
        amount: Set(input.amount.round_dp(2)),
        method: Set(input.method),
        status: Set(status),
        gateway_response: Set(input.gateway_response),
        paid_at: Set(completed.then_some(now)),
        created_at: Set(now),
        updated_at: Set(now),
    };
    let payment = active_payment.insert(&txn).await?;

    if completed {
        let mut active_order: order::ActiveModel = order.into();
        active_order.payment_status = Set(PaymentStatus::Paid);
        active_order.updated_at = Set(now);
        active_order.update(&txn).await?;
    }

    txn.commit().await?;

    Ok(payment)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(quantity: i32, unit_price: Decimal) -> OrderItemInput {
        OrderItemInput {
            product_name: "Widget".to_string(),
            product_sku: None,
            quantity,
            unit_price,
            notes: None,
        }
    }

    fn base_input(items: Vec<OrderItemInput>) -> CreateOrderInput {
        CreateOrderInput {
            customer_id: "cust_1".to_string(),
            payment_method: None,
            shipping_address: None,
            billing_address: None,
            notes: None,
            estimated_delivery: None,
            shipping_cost: None,
            discount: None,
            items,
        }
    }

    #[test]
    fn test_line_total() {
        assert_eq!(line_total(3, Decimal::new(1999, 2)), Decimal::new(5997, 2));
        assert_eq!(line_total(1, Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_compute_totals_invariant() {
        // subtotal 100.00 -> tax 8.00
        let totals = compute_totals(
            Decimal::new(10000, 2),
            Decimal::new(500, 2),
            Decimal::new(1000, 2),
        );
        assert_eq!(totals.tax, Decimal::new(800, 2));
        assert_eq!(totals.total, Decimal::new(10300, 2));
        assert_eq!(
            totals.total,
            totals.subtotal + totals.tax + totals.shipping_cost - totals.discount
        );
    }

    #[test]
    fn test_compute_totals_rounds_tax_to_cents() {
        // subtotal 10.55 -> raw tax 0.844, rounds to 0.84
        let totals = compute_totals(Decimal::new(1055, 2), Decimal::ZERO, Decimal::ZERO);
        assert_eq!(totals.tax, Decimal::new(84, 2));
        assert_eq!(totals.total, Decimal::new(1139, 2));
    }

    #[test]
    fn test_compute_totals_zero_subtotal() {
        let totals = compute_totals(Decimal::ZERO, Decimal::ZERO, Decimal::ZERO);
        assert_eq!(totals.tax, Decimal::ZERO);
        assert_eq!(totals.total, Decimal::ZERO);
    }

    #[test]
    fn test_generate_order_number_format() {
        let now = chrono::NaiveDate::from_ymd_opt(2026, 8, 5)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        let number = generate_order_number(now);
        let parts: Vec<&str> = number.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "ORD");
        assert_eq!(parts[1], "20260805");
        assert_eq!(parts[2].len(), 6);
        assert!(parts[2].chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_validate_rejects_empty_items() {
        let err = validate_create(&base_input(vec![])).unwrap_err();
        assert!(err.to_string().contains("400"));
    }

    #[test]
    fn test_validate_rejects_zero_quantity() {
        assert!(validate_create(&base_input(vec![item(0, Decimal::ONE)])).is_err());
    }

    #[test]
    fn test_validate_rejects_negative_price() {
        assert!(validate_create(&base_input(vec![item(1, Decimal::new(-100, 2))])).is_err());
    }

    #[test]
    fn test_validate_rejects_negative_discount() {
        let mut input = base_input(vec![item(1, Decimal::ONE)]);
        input.discount = Some(Decimal::new(-1, 0));
        assert!(validate_create(&input).is_err());
    }

    #[test]
    fn test_validate_accepts_free_item() {
        assert!(validate_create(&base_input(vec![item(1, Decimal::ZERO)])).is_ok());
    }

    #[test]
    fn test_synthesized_note() {
        assert_eq!(
            synthesize_transition_note(&OrderStatus::Pending, &OrderStatus::Processing),
            "Status changed from pending to processing"
        );
    }
}
