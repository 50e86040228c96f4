use std::sync::Arc;

use axum::{Json, Router, routing::get};
use error::InternalError;
use orderhub_types::Value;
use state::{AppState, State};
use tower::ServiceBuilder;
use tower_http::{
    compression::{CompressionLayer, DefaultPredicate, Predicate, predicate::NotForContentType},
    cors::CorsLayer,
    decompression::RequestDecompressionLayer,
};

pub mod entity;
mod routes;

pub mod error;
pub mod events;
pub mod openapi;
pub mod order_service;
pub mod state;
pub mod stats;

pub use axum;
pub use sea_orm;

pub fn construct_router(state: Arc<State>) -> Router {
    let router = Router::new()
        .route("/", get(service_info))
        .nest("/health", routes::health::routes())
        .nest("/orders", routes::orders::routes())
        .nest("/customers", routes::customers::routes())
        .with_state(state)
        .route("/version", get(|| async { env!("CARGO_PKG_VERSION") }))
        .layer(CorsLayer::permissive())
        .layer(
            ServiceBuilder::new()
                .layer(RequestDecompressionLayer::new())
                .layer(CompressionLayer::new().compress_when(
                    DefaultPredicate::new().and(NotForContentType::new("text/event-stream")),
                )),
        );

    Router::new().nest("/api/v1", router)
}

#[tracing::instrument(name = "GET /")]
async fn service_info() -> Result<Json<Value>, InternalError> {
    Ok(Json(orderhub_types::json::json!({
        "name": "orderhub",
        "version": env!("CARGO_PKG_VERSION"),
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construct_router() {
        // Route registration panics on conflicting paths; building the full
        // router is the regression test.
        let state = Arc::new(State::mock());
        let _router = construct_router(state);
    }
}
