use axum::{Json, extract::State};
use chrono::Utc;
use sea_orm::EntityTrait;

use crate::{
    entity::order,
    error::ApiError,
    routes::ApiResponse,
    state::AppState,
    stats::{self, DashboardStats},
};

/// GET /orders/statistics - dashboard counters, recomputed per request
#[utoipa::path(
    get,
    path = "/orders/statistics",
    tag = "dashboard",
    responses(
        (status = 200, description = "Dashboard statistics", body = ApiResponse<DashboardStats>)
    )
)]
#[tracing::instrument(name = "GET /orders/statistics", skip(state))]
pub async fn statistics(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<DashboardStats>>, ApiError> {
    let orders = order::Entity::find().all(&state.db).await?;
    let stats = stats::dashboard_stats(&orders, Utc::now().naive_utc());
    Ok(Json(ApiResponse::ok(stats)))
}
