use axum::{
    Json,
    extract::{Path, State},
};
use sea_orm::{EntityTrait, ModelTrait};

use crate::{entity::customer, error::ApiError, routes::ApiResponse, state::AppState};

/// The customer's orders (and their items, history, and payments) go with
/// them via FK cascade.
#[tracing::instrument(name = "DELETE /customers/{customer_id}", skip(state))]
pub async fn delete_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let customer = customer::Entity::find_by_id(&customer_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Customer {} not found", customer_id)))?;

    customer.delete(&state.db).await?;

    Ok(Json(ApiResponse::with_message(
        "Customer deleted successfully",
        (),
    )))
}
