use axum::{
    Json,
    extract::{Path, State},
};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::Serialize;

use crate::{
    entity::{
        customer, order, order_item, order_status_history, payment,
        sea_orm_active_enums::{OrderStatus, PaymentMethod, PaymentState, PaymentStatus},
    },
    error::ApiError,
    routes::ApiResponse,
    state::AppState,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSummary {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemData {
    pub id: String,
    pub product_name: String,
    pub product_sku: Option<String>,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub total_price: Decimal,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentData {
    pub id: String,
    pub transaction_id: Option<String>,
    pub amount: Decimal,
    pub method: PaymentMethod,
    pub status: PaymentState,
    pub paid_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusHistoryEntry {
    pub id: String,
    pub from_status: Option<OrderStatus>,
    pub to_status: OrderStatus,
    pub actor_id: Option<String>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
    pub id: String,
    pub order_number: String,
    pub status: OrderStatus,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub shipping_cost: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
    pub payment_method: Option<PaymentMethod>,
    pub payment_status: PaymentStatus,
    pub shipping_address: Option<String>,
    pub billing_address: Option<String>,
    pub notes: Option<String>,
    pub estimated_delivery: Option<NaiveDateTime>,
    pub delivered_at: Option<NaiveDateTime>,
    pub customer: Option<CustomerSummary>,
    pub items: Vec<OrderItemData>,
    pub payments: Vec<PaymentData>,
    pub status_history: Vec<StatusHistoryEntry>,
    pub items_count: usize,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<order_item::Model> for OrderItemData {
    fn from(item: order_item::Model) -> Self {
        Self {
            id: item.id,
            product_name: item.product_name,
            product_sku: item.product_sku,
            quantity: item.quantity,
            unit_price: item.unit_price,
            total_price: item.total_price,
            notes: item.notes,
        }
    }
}

impl From<payment::Model> for PaymentData {
    fn from(p: payment::Model) -> Self {
        Self {
            id: p.id,
            transaction_id: p.transaction_id,
            amount: p.amount,
            method: p.method,
            status: p.status,
            paid_at: p.paid_at,
            created_at: p.created_at,
        }
    }
}

impl From<order_status_history::Model> for StatusHistoryEntry {
    fn from(entry: order_status_history::Model) -> Self {
        Self {
            id: entry.id,
            from_status: entry.from_status,
            to_status: entry.to_status,
            actor_id: entry.actor_id,
            notes: entry.notes,
            created_at: entry.created_at,
        }
    }
}

/// Load an order with its customer, items, payments, and status history.
/// Shared by the show, create, and update handlers.
pub(crate) async fn load_order_detail<C: ConnectionTrait>(
    db: &C,
    order_id: &str,
) -> Result<OrderDetail, ApiError> {
    let order = order::Entity::find_by_id(order_id)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Order {} not found", order_id)))?;

    let customer = customer::Entity::find_by_id(&order.customer_id)
        .one(db)
        .await?;

    let items = order_item::Entity::find()
        .filter(order_item::Column::OrderId.eq(&order.id))
        .order_by_asc(order_item::Column::CreatedAt)
        .all(db)
        .await?;

    let payments = payment::Entity::find()
        .filter(payment::Column::OrderId.eq(&order.id))
        .order_by_desc(payment::Column::CreatedAt)
        .all(db)
        .await?;

    let history = order_status_history::Entity::find()
        .filter(order_status_history::Column::OrderId.eq(&order.id))
        .order_by_desc(order_status_history::Column::CreatedAt)
        .all(db)
        .await?;

    Ok(OrderDetail {
        id: order.id,
        order_number: order.order_number,
        status: order.status,
        subtotal: order.subtotal,
        tax: order.tax,
        shipping_cost: order.shipping_cost,
        discount: order.discount,
        total: order.total,
        payment_method: order.payment_method,
        payment_status: order.payment_status,
        shipping_address: order.shipping_address,
        billing_address: order.billing_address,
        notes: order.notes,
        estimated_delivery: order.estimated_delivery,
        delivered_at: order.delivered_at,
        customer: customer.map(|c| CustomerSummary {
            id: c.id,
            name: c.name,
            email: c.email,
        }),
        items_count: items.len(),
        items: items.into_iter().map(Into::into).collect(),
        payments: payments.into_iter().map(Into::into).collect(),
        status_history: history.into_iter().map(Into::into).collect(),
        created_at: order.created_at,
        updated_at: order.updated_at,
    })
}

#[tracing::instrument(name = "GET /orders/{order_id}", skip(state))]
pub async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<Json<ApiResponse<OrderDetail>>, ApiError> {
    let detail = load_order_detail(&state.db, &order_id).await?;
    Ok(Json(ApiResponse::ok(detail)))
}
