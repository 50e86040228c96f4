use axum::{
    Json,
    extract::{Query, State},
};
use chrono::Utc;
use sea_orm::EntityTrait;
use serde::Deserialize;

use crate::{
    entity::order,
    error::ApiError,
    routes::ApiResponse,
    state::AppState,
    stats::{self, SalesPeriod, SalesPoint},
};

#[derive(Debug, Deserialize)]
pub struct SalesDataQuery {
    /// "daily" (default), "weekly", or "monthly"
    pub period: Option<String>,
}

/// GET /orders/sales-data - revenue time series over paid orders
#[utoipa::path(
    get,
    path = "/orders/sales-data",
    tag = "dashboard",
    params(
        ("period" = Option<String>, Query, description = "Aggregation window: daily, weekly, or monthly")
    ),
    responses(
        (status = 200, description = "Revenue series for the chart", body = ApiResponse<Vec<SalesPoint>>),
        (status = 400, description = "Unknown period")
    )
)]
#[tracing::instrument(name = "GET /orders/sales-data", skip(state))]
pub async fn sales_data(
    State(state): State<AppState>,
    Query(query): Query<SalesDataQuery>,
) -> Result<Json<ApiResponse<Vec<SalesPoint>>>, ApiError> {
    let period = match query.period.as_deref() {
        None => SalesPeriod::Daily,
        Some(raw) => SalesPeriod::parse_param(raw).ok_or_else(|| {
            ApiError::bad_request("period: must be one of daily, weekly, monthly")
        })?,
    };

    let orders = order::Entity::find().all(&state.db).await?;
    let series = stats::sales_series(&orders, period, Utc::now().date_naive());
    Ok(Json(ApiResponse::ok(series)))
}
