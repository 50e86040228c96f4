use axum::{
    Json,
    extract::{Path, State},
};
use sea_orm::{EntityTrait, ModelTrait};

use crate::{entity::order, error::ApiError, routes::ApiResponse, state::AppState};

/// Items, history, and payments go with the order via FK cascade.
#[tracing::instrument(name = "DELETE /orders/{order_id}", skip(state))]
pub async fn delete_order(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let order = order::Entity::find_by_id(&order_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Order {} not found", order_id)))?;

    order.delete(&state.db).await?;

    Ok(Json(ApiResponse::with_message(
        "Order deleted successfully",
        (),
    )))
}
