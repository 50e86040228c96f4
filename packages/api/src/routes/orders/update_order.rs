use axum::{
    Json,
    extract::{Path, State},
};
use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::{
    entity::sea_orm_active_enums::{OrderStatus, PaymentMethod, PaymentStatus},
    error::ApiError,
    order_service::{self, UpdateOrderInput},
    routes::ApiResponse,
    state::AppState,
};

use super::get_order::{OrderDetail, load_order_detail};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderRequest {
    pub status: Option<OrderStatus>,
    pub status_notes: Option<String>,
    /// Compare-and-swap guard for the status change, if one is requested
    pub expected_status: Option<OrderStatus>,
    pub payment_method: Option<PaymentMethod>,
    pub payment_status: Option<PaymentStatus>,
    pub shipping_address: Option<String>,
    pub billing_address: Option<String>,
    pub notes: Option<String>,
    pub estimated_delivery: Option<NaiveDateTime>,
    pub actor_id: Option<String>,
}

#[tracing::instrument(name = "PUT /orders/{order_id}", skip(state, req))]
pub async fn update_order(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
    Json(req): Json<UpdateOrderRequest>,
) -> Result<Json<ApiResponse<OrderDetail>>, ApiError> {
    let input = UpdateOrderInput {
        status: req.status,
        status_notes: req.status_notes,
        expected_status: req.expected_status,
        payment_method: req.payment_method,
        payment_status: req.payment_status,
        shipping_address: req.shipping_address,
        billing_address: req.billing_address,
        notes: req.notes,
        estimated_delivery: req.estimated_delivery,
    };

    order_service::update_order(&state, &order_id, input, req.actor_id).await?;
    let detail = load_order_detail(&state.db, &order_id).await?;

    Ok(Json(ApiResponse::with_message(
        "Order updated successfully",
        detail,
    )))
}
