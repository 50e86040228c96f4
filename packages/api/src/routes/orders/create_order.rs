use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{
    entity::sea_orm_active_enums::PaymentMethod,
    error::ApiError,
    order_service::{self, CreateOrderInput, OrderItemInput},
    routes::ApiResponse,
    state::AppState,
};

use super::get_order::{OrderDetail, load_order_detail};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderItemRequest {
    pub product_name: String,
    pub product_sku: Option<String>,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub customer_id: String,
    pub payment_method: Option<PaymentMethod>,
    pub shipping_address: Option<String>,
    pub billing_address: Option<String>,
    pub notes: Option<String>,
    pub estimated_delivery: Option<NaiveDateTime>,
    pub shipping_cost: Option<Decimal>,
    pub discount: Option<Decimal>,
    /// Staff member placing the order on the customer's behalf, if any
    pub actor_id: Option<String>,
    pub items: Vec<CreateOrderItemRequest>,
}

#[tracing::instrument(name = "POST /orders", skip(state, req))]
pub async fn create_order(
    State(state): State<AppState>,
    Json(req): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<ApiResponse<OrderDetail>>), ApiError> {
    let input = CreateOrderInput {
        customer_id: req.customer_id,
        payment_method: req.payment_method,
        shipping_address: req.shipping_address,
        billing_address: req.billing_address,
        notes: req.notes,
        estimated_delivery: req.estimated_delivery,
        shipping_cost: req.shipping_cost,
        discount: req.discount,
        items: req
            .items
            .into_iter()
            .map(|item| OrderItemInput {
                product_name: item.product_name,
                product_sku: item.product_sku,
                quantity: item.quantity,
                unit_price: item.unit_price,
                notes: item.notes,
            })
            .collect(),
    };

    let (order, _items) = order_service::create_order(&state, input, req.actor_id).await?;
    let detail = load_order_detail(&state.db, &order.id).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("Order created successfully", detail)),
    ))
}
