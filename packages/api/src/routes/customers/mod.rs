use axum::{Router, routing::get};

use crate::state::AppState;

pub mod create_customer;
pub mod delete_customer;
pub mod get_customer;
pub mod get_customer_orders;
pub mod get_customers;
pub mod update_customer;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(get_customers::get_customers).post(create_customer::create_customer),
        )
        .route(
            "/{customer_id}",
            get(get_customer::get_customer)
                .put(update_customer::update_customer)
                .delete(delete_customer::delete_customer),
        )
        .route(
            "/{customer_id}/orders",
            get(get_customer_orders::get_customer_orders),
        )
}
