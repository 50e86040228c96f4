use axum::{Json, extract::State, http::StatusCode};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, QueryFilter};
use serde::Deserialize;

use orderhub_types::create_id;

use crate::{entity::customer, error::ApiError, routes::ApiResponse, state::AppState};

use super::get_customer::CustomerData;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub postal_code: Option<String>,
}

pub(crate) fn validate_contact(name: &str, email: &str) -> Result<(), ApiError> {
    let mut errors: Vec<String> = Vec::new();
    if name.trim().is_empty() {
        errors.push("name: must not be empty".to_string());
    }
    if !email.contains('@') || email.trim().is_empty() {
        errors.push("email: must be a valid email address".to_string());
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::bad_request(errors.join("; ")))
    }
}

#[tracing::instrument(name = "POST /customers", skip(state, req))]
pub async fn create_customer(
    State(state): State<AppState>,
    Json(req): Json<CreateCustomerRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CustomerData>>), ApiError> {
    validate_contact(&req.name, &req.email)?;

    let existing = customer::Entity::find()
        .filter(customer::Column::Email.eq(&req.email))
        .one(&state.db)
        .await?;
    if existing.is_some() {
        return Err(ApiError::conflict(format!(
            "Email {} is already in use",
            req.email
        )));
    }

    let now = Utc::now().naive_utc();
    let active = customer::ActiveModel {
        id: Set(create_id()),
        name: Set(req.name),
        email: Set(req.email),
        phone: Set(req.phone),
        address: Set(req.address),
        city: Set(req.city),
        country: Set(req.country),
        postal_code: Set(req.postal_code),
        created_at: Set(now),
        updated_at: Set(now),
    };
    let created = active.insert(&state.db).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "Customer created successfully",
            created.into(),
        )),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_contact() {
        assert!(validate_contact("Ada Lovelace", "ada@example.com").is_ok());
        assert!(validate_contact("", "ada@example.com").is_err());
        assert!(validate_contact("Ada Lovelace", "not-an-email").is_err());
        assert!(validate_contact(" ", " ").is_err());
    }
}
