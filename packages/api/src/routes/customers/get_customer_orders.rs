use axum::{
    Json,
    extract::{Path, Query, State},
};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect};
use std::collections::HashMap;

use crate::{
    entity::{customer, order, order_item},
    error::ApiError,
    routes::PaginationParams,
    routes::orders::get_orders::{OrderListItem, OrdersResponse},
    state::AppState,
};

/// GET /customers/{customer_id}/orders - the customer's orders, newest first
#[tracing::instrument(name = "GET /customers/{customer_id}/orders", skip(state))]
pub async fn get_customer_orders(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<OrdersResponse>, ApiError> {
    let customer = customer::Entity::find_by_id(&customer_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Customer {} not found", customer_id)))?;

    let query_builder = order::Entity::find().filter(order::Column::CustomerId.eq(&customer.id));

    let total = query_builder.clone().count(&state.db).await?;

    let orders: Vec<order::Model> = query_builder
        .order_by_desc(order::Column::CreatedAt)
        .offset(pagination.offset())
        .limit(pagination.limit())
        .all(&state.db)
        .await?;

    let order_ids: Vec<String> = orders.iter().map(|o| o.id.clone()).collect();
    let items = if order_ids.is_empty() {
        vec![]
    } else {
        order_item::Entity::find()
            .filter(order_item::Column::OrderId.is_in(order_ids))
            .all(&state.db)
            .await?
    };
    let mut item_counts: HashMap<String, u64> = HashMap::new();
    for item in &items {
        *item_counts.entry(item.order_id.clone()).or_insert(0) += 1;
    }

    let order_items: Vec<OrderListItem> = orders
        .into_iter()
        .map(|o| OrderListItem {
            customer_name: Some(customer.name.clone()),
            items_count: item_counts.get(&o.id).copied().unwrap_or(0),
            id: o.id,
            order_number: o.order_number,
            customer_id: o.customer_id,
            status: o.status,
            payment_status: o.payment_status,
            payment_method: o.payment_method,
            total: o.total,
            created_at: o.created_at,
        })
        .collect();

    Ok(Json(OrdersResponse {
        orders: order_items,
        total,
        offset: pagination.offset(),
        limit: pagination.limit(),
    }))
}
