use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use crate::{
    entity::sea_orm_active_enums::OrderStatus,
    error::ApiError,
    order_service,
    routes::ApiResponse,
    state::AppState,
};

use super::get_order::{OrderDetail, load_order_detail};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    pub status: OrderStatus,
    pub notes: Option<String>,
    pub actor_id: Option<String>,
    /// When set, the transition only applies if the order is currently in
    /// this status; a mismatch is rejected with 409.
    pub expected_status: Option<OrderStatus>,
}

#[tracing::instrument(name = "PATCH /orders/{order_id}/status", skip(state, req))]
pub async fn update_status(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<ApiResponse<OrderDetail>>, ApiError> {
    order_service::update_order_status(
        &state,
        &order_id,
        req.status,
        req.actor_id,
        req.notes,
        req.expected_status,
    )
    .await?;

    let detail = load_order_detail(&state.db, &order_id).await?;

    Ok(Json(ApiResponse::with_message(
        "Order status updated successfully",
        detail,
    )))
}
