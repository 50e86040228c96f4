use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "OrderHub API",
        version = "1.0.0",
        description = "Order-management back office: orders, customers, payments, and dashboard statistics.",
        license(name = "MIT")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "dashboard", description = "Dashboard statistics and sales series")
    ),
    paths(
        crate::routes::health::health,
        crate::routes::health::db_health,
        crate::routes::orders::statistics::statistics,
        crate::routes::orders::sales_data::sales_data,
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_document_builds() {
        let doc = ApiDoc::openapi();
        let json = doc.to_json().unwrap();
        assert!(json.contains("/orders/statistics"));
        assert!(json.contains("/orders/sales-data"));
        assert!(json.contains("/health"));
    }
}
