use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, QueryFilter};
use serde::Deserialize;

use crate::{entity::customer, error::ApiError, routes::ApiResponse, state::AppState};

use super::{create_customer::validate_contact, get_customer::CustomerData};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomerRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub postal_code: Option<String>,
}

#[tracing::instrument(name = "PUT /customers/{customer_id}", skip(state, req))]
pub async fn update_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
    Json(req): Json<UpdateCustomerRequest>,
) -> Result<Json<ApiResponse<CustomerData>>, ApiError> {
    let existing = customer::Entity::find_by_id(&customer_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Customer {} not found", customer_id)))?;

    let name = req.name.as_deref().unwrap_or(&existing.name);
    let email = req.email.as_deref().unwrap_or(&existing.email);
    validate_contact(name, email)?;

    if let Some(new_email) = &req.email {
        let taken = customer::Entity::find()
            .filter(customer::Column::Email.eq(new_email))
            .filter(customer::Column::Id.ne(&customer_id))
            .one(&state.db)
            .await?;
        if taken.is_some() {
            return Err(ApiError::conflict(format!(
                "Email {} is already in use",
                new_email
            )));
        }
    }

    let mut active: customer::ActiveModel = existing.into();
    if let Some(name) = req.name {
        active.name = Set(name);
    }
    if let Some(email) = req.email {
        active.email = Set(email);
    }
    if req.phone.is_some() {
        active.phone = Set(req.phone);
    }
    if req.address.is_some() {
        active.address = Set(req.address);
    }
    if req.city.is_some() {
        active.city = Set(req.city);
    }
    if req.country.is_some() {
        active.country = Set(req.country);
    }
    if req.postal_code.is_some() {
        active.postal_code = Set(req.postal_code);
    }
    active.updated_at = Set(Utc::now().naive_utc());

    let updated = active.update(&state.db).await?;

    Ok(Json(ApiResponse::with_message(
        "Customer updated successfully",
        updated.into(),
    )))
}
