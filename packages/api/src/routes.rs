use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod customers;
pub mod health;
pub mod orders;

#[derive(Clone, Deserialize, Serialize, Debug)]
pub struct PaginationParams {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

pub const DEFAULT_PAGE_LIMIT: u64 = 50;
pub const MAX_PAGE_LIMIT: u64 = 100;

impl PaginationParams {
    pub fn limit(&self) -> u64 {
        self.limit.unwrap_or(DEFAULT_PAGE_LIMIT).min(MAX_PAGE_LIMIT)
    }

    pub fn offset(&self) -> u64 {
        self.offset.unwrap_or(0)
    }
}

/// Standard envelope for mutations and detail responses.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data,
        }
    }

    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_defaults_and_cap() {
        let params = PaginationParams {
            limit: None,
            offset: None,
        };
        assert_eq!(params.limit(), 50);
        assert_eq!(params.offset(), 0);

        let params = PaginationParams {
            limit: Some(500),
            offset: Some(20),
        };
        assert_eq!(params.limit(), 100);
        assert_eq!(params.offset(), 20);
    }

    #[test]
    fn test_envelope_shape() {
        let value = serde_json::to_value(ApiResponse::ok(42)).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["data"], 42);
        assert!(value.get("message").is_none());

        let value =
            serde_json::to_value(ApiResponse::with_message("Order created successfully", 1))
                .unwrap();
        assert_eq!(value["message"], "Order created successfully");
    }
}
