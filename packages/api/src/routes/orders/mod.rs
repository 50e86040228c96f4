use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::state::AppState;

pub mod create_order;
pub mod delete_order;
pub mod events;
pub mod get_order;
pub mod get_orders;
pub mod record_payment;
pub mod sales_data;
pub mod statistics;
pub mod update_order;
pub mod update_status;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(get_orders::get_orders).post(create_order::create_order),
        )
        // Dashboard read side
        .route("/statistics", get(statistics::statistics))
        .route("/sales-data", get(sales_data::sales_data))
        // Notification stream for the dashboard
        .route("/events", get(events::order_events))
        .route(
            "/{order_id}",
            get(get_order::get_order)
                .put(update_order::update_order)
                .delete(delete_order::delete_order),
        )
        .route("/{order_id}/status", patch(update_status::update_status))
        .route(
            "/{order_id}/payments",
            post(record_payment::record_payment),
        )
}
