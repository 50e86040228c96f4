use axum::{
    Json,
    extract::{Query, State},
};
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, Condition, EntityTrait, JoinType, Order as SortOrder, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::{
    entity::{
        customer, order, order_item,
        sea_orm_active_enums::{OrderStatus, PaymentMethod, PaymentStatus},
    },
    error::ApiError,
    routes::{DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct OrdersQuery {
    /// Filter by order status
    pub status: Option<String>,
    /// Filter by payment status
    pub payment_status: Option<String>,
    /// Filter by customer
    pub customer_id: Option<String>,
    /// Filter by payment method
    pub payment_method: Option<String>,
    /// Inclusive date range over created_at (YYYY-MM-DD)
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    /// Free-text search over order number and customer name/email
    pub search: Option<String>,
    /// Sort field (created_at, order_number, total, status)
    pub sort: Option<String>,
    /// Sort direction: "asc" or "desc"
    pub direction: Option<String>,
    #[serde(default)]
    pub offset: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_limit() -> u64 {
    DEFAULT_PAGE_LIMIT
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderListItem {
    pub id: String,
    pub order_number: String,
    pub customer_id: String,
    pub customer_name: Option<String>,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub payment_method: Option<PaymentMethod>,
    pub total: Decimal,
    pub items_count: u64,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrdersResponse {
    pub orders: Vec<OrderListItem>,
    pub total: u64,
    pub offset: u64,
    pub limit: u64,
}

/// Whitelisted sort columns; everything else falls back to created_at.
pub(crate) fn sort_column(field: &str) -> Option<order::Column> {
    match field {
        "created_at" => Some(order::Column::CreatedAt),
        "order_number" => Some(order::Column::OrderNumber),
        "total" => Some(order::Column::Total),
        "status" => Some(order::Column::Status),
        _ => None,
    }
}

pub(crate) fn sort_direction(direction: Option<&str>) -> SortOrder {
    match direction {
        Some("asc") => SortOrder::Asc,
        _ => SortOrder::Desc,
    }
}

pub(crate) fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

#[tracing::instrument(name = "GET /orders", skip(state))]
pub async fn get_orders(
    State(state): State<AppState>,
    Query(query): Query<OrdersQuery>,
) -> Result<Json<OrdersResponse>, ApiError> {
    let limit = query.limit.min(MAX_PAGE_LIMIT);

    let mut query_builder = order::Entity::find();

    if let Some(status_str) = &query.status {
        let status = OrderStatus::parse_param(status_str)
            .ok_or_else(|| ApiError::bad_request(format!("status: unknown value {}", status_str)))?;
        query_builder = query_builder.filter(order::Column::Status.eq(status));
    }

    if let Some(payment_status_str) = &query.payment_status {
        let payment_status = PaymentStatus::parse_param(payment_status_str).ok_or_else(|| {
            ApiError::bad_request(format!("payment_status: unknown value {}", payment_status_str))
        })?;
        query_builder = query_builder.filter(order::Column::PaymentStatus.eq(payment_status));
    }

    if let Some(customer_id) = &query.customer_id {
        query_builder = query_builder.filter(order::Column::CustomerId.eq(customer_id));
    }

    if let Some(method_str) = &query.payment_method {
        let method = PaymentMethod::parse_param(method_str).ok_or_else(|| {
            ApiError::bad_request(format!("payment_method: unknown value {}", method_str))
        })?;
        query_builder = query_builder.filter(order::Column::PaymentMethod.eq(method));
    }

    if let (Some(start), Some(end)) = (&query.start_date, &query.end_date) {
        let start = parse_date(start)
            .ok_or_else(|| ApiError::bad_request("start_date: expected YYYY-MM-DD"))?;
        let end = parse_date(end)
            .ok_or_else(|| ApiError::bad_request("end_date: expected YYYY-MM-DD"))?;
        let start_at = start.and_hms_opt(0, 0, 0).unwrap();
        let end_at = end.and_hms_opt(23, 59, 59).unwrap();
        query_builder = query_builder
            .filter(order::Column::CreatedAt.gte(start_at))
            .filter(order::Column::CreatedAt.lte(end_at));
    }

    if let Some(search) = query.search.as_deref().filter(|s| !s.trim().is_empty()) {
        query_builder = query_builder
            .join(JoinType::InnerJoin, order::Relation::Customer.def())
            .filter(
                Condition::any()
                    .add(order::Column::OrderNumber.contains(search))
                    .add(customer::Column::Name.contains(search))
                    .add(customer::Column::Email.contains(search)),
            );
    }

    let total = query_builder.clone().count(&state.db).await?;

    let sort = sort_column(query.sort.as_deref().unwrap_or("created_at"))
        .unwrap_or(order::Column::CreatedAt);
    let orders: Vec<order::Model> = query_builder
        .order_by(sort, sort_direction(query.direction.as_deref()))
        .offset(query.offset)
        .limit(limit)
        .all(&state.db)
        .await?;

    // Resolve customer names and item counts for the page
    let order_ids: Vec<String> = orders.iter().map(|o| o.id.clone()).collect();
    let customer_ids: Vec<String> = orders.iter().map(|o| o.customer_id.clone()).collect();

    let customers = if customer_ids.is_empty() {
        vec![]
    } else {
        customer::Entity::find()
            .filter(customer::Column::Id.is_in(customer_ids))
            .all(&state.db)
            .await?
    };
    let customer_map: HashMap<_, _> = customers.into_iter().map(|c| (c.id.clone(), c)).collect();

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
            customer_name: customer_map.get(&o.customer_id).map(|c| c.name.clone()),
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
        offset: query.offset,
        limit,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_column_whitelist() {
        assert!(sort_column("created_at").is_some());
        assert!(sort_column("total").is_some());
        assert!(sort_column("order_number").is_some());
        assert!(sort_column("status").is_some());
        // Arbitrary columns cannot be injected into ORDER BY
        assert!(sort_column("customer_id; DROP TABLE orders").is_none());
        assert!(sort_column("subtotal").is_none());
    }

    #[test]
    fn test_sort_direction_defaults_to_desc() {
        assert!(matches!(sort_direction(Some("asc")), SortOrder::Asc));
        assert!(matches!(sort_direction(Some("desc")), SortOrder::Desc));
        assert!(matches!(sort_direction(Some("sideways")), SortOrder::Desc));
        assert!(matches!(sort_direction(None), SortOrder::Desc));
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2026-08-05"),
            NaiveDate::from_ymd_opt(2026, 8, 5)
        );
        assert_eq!(parse_date("08/05/2026"), None);
        assert_eq!(parse_date("not-a-date"), None);
    }
}
