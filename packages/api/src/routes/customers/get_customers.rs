use axum::{
    Json,
    extract::{Query, State},
};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, Condition, EntityTrait, Order as SortOrder, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::{
    entity::{customer, order, sea_orm_active_enums::PaymentStatus},
    error::ApiError,
    routes::{DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct CustomersQuery {
    /// Free-text search over name, email, and phone
    pub search: Option<String>,
    /// Sort field (created_at, name, email)
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
pub struct CustomerListItem {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub order_count: u64,
    pub total_revenue: Decimal,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomersResponse {
    pub customers: Vec<CustomerListItem>,
    pub total: u64,
    pub offset: u64,
    pub limit: u64,
}

pub(crate) fn sort_column(field: &str) -> Option<customer::Column> {
    match field {
        "created_at" => Some(customer::Column::CreatedAt),
        "name" => Some(customer::Column::Name),
        "email" => Some(customer::Column::Email),
        _ => None,
    }
}

#[tracing::instrument(name = "GET /customers", skip(state))]
pub async fn get_customers(
    State(state): State<AppState>,
    Query(query): Query<CustomersQuery>,
) -> Result<Json<CustomersResponse>, ApiError> {
    let limit = query.limit.min(MAX_PAGE_LIMIT);

    let mut query_builder = customer::Entity::find();

    if let Some(search) = query.search.as_deref().filter(|s| !s.trim().is_empty()) {
        query_builder = query_builder.filter(
            Condition::any()
                .add(customer::Column::Name.contains(search))
                .add(customer::Column::Email.contains(search))
                .add(customer::Column::Phone.contains(search)),
        );
    }

    let total = query_builder.clone().count(&state.db).await?;

    let sort = sort_column(query.sort.as_deref().unwrap_or("created_at"))
        .unwrap_or(customer::Column::CreatedAt);
    let direction = match query.direction.as_deref() {
        Some("asc") => SortOrder::Asc,
        _ => SortOrder::Desc,
    };

    let customers: Vec<customer::Model> = query_builder
        .order_by(sort, direction)
        .offset(query.offset)
        .limit(limit)
        .all(&state.db)
        .await?;

    // Aggregate order count and paid revenue for the page
    let customer_ids: Vec<String> = customers.iter().map(|c| c.id.clone()).collect();
    let orders = if customer_ids.is_empty() {
        vec![]
    } else {
        order::Entity::find()
            .filter(order::Column::CustomerId.is_in(customer_ids))
            .all(&state.db)
            .await?
    };

    let mut order_counts: HashMap<String, u64> = HashMap::new();
    let mut revenues: HashMap<String, Decimal> = HashMap::new();
    for o in &orders {
        *order_counts.entry(o.customer_id.clone()).or_insert(0) += 1;
        if o.payment_status == PaymentStatus::Paid {
            *revenues.entry(o.customer_id.clone()).or_insert(Decimal::ZERO) += o.total;
        }
    }

    let customer_items: Vec<CustomerListItem> = customers
        .into_iter()
        .map(|c| CustomerListItem {
            order_count: order_counts.get(&c.id).copied().unwrap_or(0),
            total_revenue: revenues.get(&c.id).copied().unwrap_or(Decimal::ZERO),
            id: c.id,
            name: c.name,
            email: c.email,
            phone: c.phone,
            city: c.city,
            country: c.country,
            created_at: c.created_at,
        })
        .collect();

    Ok(Json(CustomersResponse {
        customers: customer_items,
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
        assert!(sort_column("name").is_some());
        assert!(sort_column("email").is_some());
        assert!(sort_column("created_at").is_some());
        assert!(sort_column("phone").is_none());
        assert!(sort_column("id; DROP TABLE customers").is_none());
    }
}
