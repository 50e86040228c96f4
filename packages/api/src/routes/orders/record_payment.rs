use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{
    entity::sea_orm_active_enums::{PaymentMethod, PaymentState},
    error::ApiError,
    order_service::{self, RecordPaymentInput},
    routes::ApiResponse,
    state::AppState,
};

use super::get_order::PaymentData;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPaymentRequest {
    pub amount: Decimal,
    pub method: PaymentMethod,
    /// Defaults to pending; a completed payment marks the order paid
    pub status: Option<PaymentState>,
    pub transaction_id: Option<String>,
    pub gateway_response: Option<String>,
}

#[tracing::instrument(name = "POST /orders/{order_id}/payments", skip(state, req))]
pub async fn record_payment(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
    Json(req): Json<RecordPaymentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PaymentData>>), ApiError> {
    let input = RecordPaymentInput {
        amount: req.amount,
        method: req.method,
        status: req.status,
        transaction_id: req.transaction_id,
        gateway_response: req.gateway_response,
    };

    let payment = order_service::record_payment(&state, &order_id, input).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "Payment recorded successfully",
            payment.into(),
        )),
    ))
}
