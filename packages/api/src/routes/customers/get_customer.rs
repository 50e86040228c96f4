use axum::{
    Json,
    extract::{Path, State},
};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::Serialize;

use crate::{
    entity::{
        customer, order,
        sea_orm_active_enums::{OrderStatus, PaymentStatus},
    },
    error::ApiError,
    routes::ApiResponse,
    state::AppState,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerData {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub postal_code: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<customer::Model> for CustomerData {
    fn from(c: customer::Model) -> Self {
        Self {
            id: c.id,
            name: c.name,
            email: c.email,
            phone: c.phone,
            address: c.address,
            city: c.city,
            country: c.country,
            postal_code: c.postal_code,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerOrderSummary {
    pub id: String,
    pub order_number: String,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub total: Decimal,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDetail {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub postal_code: Option<String>,
    pub order_count: u64,
    /// Sum of `total` over this customer's paid orders
    pub total_revenue: Decimal,
    pub orders: Vec<CustomerOrderSummary>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[tracing::instrument(name = "GET /customers/{customer_id}", skip(state))]
pub async fn get_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
) -> Result<Json<ApiResponse<CustomerDetail>>, ApiError> {
    let customer = customer::Entity::find_by_id(&customer_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Customer {} not found", customer_id)))?;

    let orders = order::Entity::find()
        .filter(order::Column::CustomerId.eq(&customer.id))
        .order_by_desc(order::Column::CreatedAt)
        .all(&state.db)
        .await?;

    let total_revenue: Decimal = orders
        .iter()
        .filter(|o| o.payment_status == PaymentStatus::Paid)
        .map(|o| o.total)
        .sum();

    let detail = CustomerDetail {
        id: customer.id,
        name: customer.name,
        email: customer.email,
        phone: customer.phone,
        address: customer.address,
        city: customer.city,
        country: customer.country,
        postal_code: customer.postal_code,
        order_count: orders.len() as u64,
        total_revenue,
        orders: orders
            .into_iter()
            .map(|o| CustomerOrderSummary {
                id: o.id,
                order_number: o.order_number,
                status: o.status,
                payment_status: o.payment_status,
                total: o.total,
                created_at: o.created_at,
            })
            .collect(),
        created_at: customer.created_at,
        updated_at: customer.updated_at,
    };

    Ok(Json(ApiResponse::ok(detail)))
}
