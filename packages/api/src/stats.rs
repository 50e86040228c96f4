//! Read-side aggregates for the staff dashboard.
//!
//! Recomputed from the full order table on each request; there is no
//! incremental maintenance. The aggregation itself is pure over a loaded
//! order set so it can be tested without a database.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

use crate::entity::{
    order,
    sea_orm_active_enums::{OrderStatus, PaymentStatus},
};

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub pending: u64,
    pub processing: u64,
    pub shipped: u64,
    pub delivered: u64,
    pub cancelled: u64,
    pub refunded: u64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_orders: u64,
    pub orders_today: u64,
    pub orders_this_month: u64,
    /// Sum of `total` over orders with payment_status = paid
    #[schema(value_type = String)]
    pub total_revenue: Decimal,
    #[schema(value_type = String)]
    pub revenue_today: Decimal,
    #[schema(value_type = String)]
    pub revenue_this_month: Decimal,
    pub status_counts: StatusCounts,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalesPoint {
    /// Bucket date, `YYYY-MM-DD`
    pub date: String,
    #[schema(value_type = String)]
    pub revenue: Decimal,
    pub count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SalesPeriod {
    Daily,
    Weekly,
    Monthly,
}

impl SalesPeriod {
    pub fn parse_param(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "daily" => Some(SalesPeriod::Daily),
            "weekly" => Some(SalesPeriod::Weekly),
            "monthly" => Some(SalesPeriod::Monthly),
            _ => None,
        }
    }

    /// Start of the reporting window relative to `today`.
    pub fn window_start(&self, today: NaiveDate) -> NaiveDate {
        match self {
            SalesPeriod::Daily => today - Duration::days(30),
            SalesPeriod::Weekly => today - Duration::weeks(12),
            SalesPeriod::Monthly => today - Duration::days(365),
        }
    }
}

fn is_paid(order: &order::Model) -> bool {
    order.payment_status == PaymentStatus::Paid
}

/// Aggregate the dashboard counters over the full order set.
pub fn dashboard_stats(orders: &[order::Model], now: NaiveDateTime) -> DashboardStats {
    let today = now.date();
    let month_start = today.with_day(1).unwrap_or(today).and_hms_opt(0, 0, 0).unwrap_or(now);

    let count_status = |status: OrderStatus| -> u64 {
        orders.iter().filter(|o| o.status == status).count() as u64
    };

    let total_revenue: Decimal = orders.iter().filter(|o| is_paid(o)).map(|o| o.total).sum();
    let revenue_today: Decimal = orders
        .iter()
        .filter(|o| is_paid(o) && o.created_at.date() == today)
        .map(|o| o.total)
        .sum();
    let revenue_this_month: Decimal = orders
        .iter()
        .filter(|o| is_paid(o) && o.created_at >= month_start)
        .map(|o| o.total)
        .sum();

    DashboardStats {
        total_orders: orders.len() as u64,
        orders_today: orders.iter().filter(|o| o.created_at.date() == today).count() as u64,
        orders_this_month: orders.iter().filter(|o| o.created_at >= month_start).count() as u64,
        total_revenue,
        revenue_today,
        revenue_this_month,
        status_counts: StatusCounts {
            pending: count_status(OrderStatus::Pending),
            processing: count_status(OrderStatus::Processing),
            shipped: count_status(OrderStatus::Shipped),
            delivered: count_status(OrderStatus::Delivered),
            cancelled: count_status(OrderStatus::Cancelled),
            refunded: count_status(OrderStatus::Refunded),
        },
    }
}

/// Daily revenue buckets over paid orders inside the period window,
/// ascending by date. Days without sales are omitted.
pub fn sales_series(
    orders: &[order::Model],
    period: SalesPeriod,
    today: NaiveDate,
) -> Vec<SalesPoint> {
    let start = period.window_start(today);

    let mut buckets: BTreeMap<NaiveDate, (Decimal, u64)> = BTreeMap::new();
    for order in orders.iter().filter(|o| is_paid(o)) {
        let date = order.created_at.date();
        if date < start {
            continue;
        }
        let bucket = buckets.entry(date).or_insert((Decimal::ZERO, 0));
        bucket.0 += order.total;
        bucket.1 += 1;
    }

    buckets
        .into_iter()
        .map(|(date, (revenue, count))| SalesPoint {
            date: date.format("%Y-%m-%d").to_string(),
            revenue,
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::sea_orm_active_enums::PaymentStatus;

    fn at(year: i32, month: u32, day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    fn fixture_order(
        id: &str,
        status: OrderStatus,
        payment_status: PaymentStatus,
        total: Decimal,
        created_at: NaiveDateTime,
    ) -> order::Model {
        order::Model {
            id: id.to_string(),
            order_number: format!("ORD-20260805-{}", id.to_uppercase()),
            customer_id: "cust_1".to_string(),
            status,
            subtotal: total,
            tax: Decimal::ZERO,
            shipping_cost: Decimal::ZERO,
            discount: Decimal::ZERO,
            total,
            payment_method: None,
            payment_status,
            shipping_address: None,
            billing_address: None,
            notes: None,
            estimated_delivery: None,
            delivered_at: None,
            created_at,
            updated_at: created_at,
        }
    }

    #[test]
    fn test_total_revenue_counts_only_paid_orders() {
        let now = at(2026, 8, 5);
        let orders = vec![
            fixture_order("a", OrderStatus::Pending, PaymentStatus::Paid, Decimal::new(10000, 2), at(2026, 8, 1)),
            fixture_order("b", OrderStatus::Pending, PaymentStatus::Pending, Decimal::new(5000, 2), at(2026, 8, 2)),
            fixture_order("c", OrderStatus::Shipped, PaymentStatus::Paid, Decimal::new(2500, 2), at(2026, 7, 1)),
            fixture_order("d", OrderStatus::Cancelled, PaymentStatus::Failed, Decimal::new(9900, 2), at(2026, 8, 3)),
        ];

        let stats = dashboard_stats(&orders, now);
        assert_eq!(stats.total_orders, 4);
        assert_eq!(stats.total_revenue, Decimal::new(12500, 2));
    }

    #[test]
    fn test_daily_and_monthly_windows() {
        let now = at(2026, 8, 5);
        let orders = vec![
            fixture_order("a", OrderStatus::Pending, PaymentStatus::Paid, Decimal::new(1000, 2), at(2026, 8, 5)),
            fixture_order("b", OrderStatus::Pending, PaymentStatus::Paid, Decimal::new(2000, 2), at(2026, 8, 1)),
            fixture_order("c", OrderStatus::Pending, PaymentStatus::Paid, Decimal::new(4000, 2), at(2026, 7, 20)),
        ];

        let stats = dashboard_stats(&orders, now);
        assert_eq!(stats.orders_today, 1);
        assert_eq!(stats.orders_this_month, 2);
        assert_eq!(stats.revenue_today, Decimal::new(1000, 2));
        assert_eq!(stats.revenue_this_month, Decimal::new(3000, 2));
        assert_eq!(stats.total_revenue, Decimal::new(7000, 2));
    }

    #[test]
    fn test_status_counts_cover_all_statuses() {
        let now = at(2026, 8, 5);
        let orders = vec![
            fixture_order("a", OrderStatus::Pending, PaymentStatus::Pending, Decimal::ZERO, now),
            fixture_order("b", OrderStatus::Pending, PaymentStatus::Pending, Decimal::ZERO, now),
            fixture_order("c", OrderStatus::Processing, PaymentStatus::Pending, Decimal::ZERO, now),
            fixture_order("d", OrderStatus::Delivered, PaymentStatus::Paid, Decimal::ZERO, now),
            fixture_order("e", OrderStatus::Refunded, PaymentStatus::Refunded, Decimal::ZERO, now),
        ];

        let counts = dashboard_stats(&orders, now).status_counts;
        assert_eq!(counts.pending, 2);
        assert_eq!(counts.processing, 1);
        assert_eq!(counts.shipped, 0);
        assert_eq!(counts.delivered, 1);
        assert_eq!(counts.cancelled, 0);
        assert_eq!(counts.refunded, 1);
    }

    #[test]
    fn test_sales_series_groups_by_day_ascending() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 5).unwrap();
        let orders = vec![
            fixture_order("a", OrderStatus::Delivered, PaymentStatus::Paid, Decimal::new(1000, 2), at(2026, 8, 2)),
            fixture_order("b", OrderStatus::Delivered, PaymentStatus::Paid, Decimal::new(2000, 2), at(2026, 8, 2)),
            fixture_order("c", OrderStatus::Delivered, PaymentStatus::Paid, Decimal::new(500, 2), at(2026, 8, 1)),
            fixture_order("d", OrderStatus::Pending, PaymentStatus::Pending, Decimal::new(9999, 2), at(2026, 8, 2)),
        ];

        let series = sales_series(&orders, SalesPeriod::Daily, today);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].date, "2026-08-01");
        assert_eq!(series[0].revenue, Decimal::new(500, 2));
        assert_eq!(series[0].count, 1);
        assert_eq!(series[1].date, "2026-08-02");
        assert_eq!(series[1].revenue, Decimal::new(3000, 2));
        assert_eq!(series[1].count, 2);
    }

    #[test]
    fn test_sales_series_window_excludes_old_orders() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 5).unwrap();
        let orders = vec![
            fixture_order("a", OrderStatus::Delivered, PaymentStatus::Paid, Decimal::new(1000, 2), at(2026, 6, 1)),
            fixture_order("b", OrderStatus::Delivered, PaymentStatus::Paid, Decimal::new(2000, 2), at(2026, 8, 1)),
        ];

        let daily = sales_series(&orders, SalesPeriod::Daily, today);
        assert_eq!(daily.len(), 1);
        assert_eq!(daily[0].date, "2026-08-01");

        // weekly window reaches back 12 weeks, covering both
        let weekly = sales_series(&orders, SalesPeriod::Weekly, today);
        assert_eq!(weekly.len(), 2);
    }

    #[test]
    fn test_sales_period_parse() {
        assert_eq!(SalesPeriod::parse_param("daily"), Some(SalesPeriod::Daily));
        assert_eq!(SalesPeriod::parse_param("WEEKLY"), Some(SalesPeriod::Weekly));
        assert_eq!(SalesPeriod::parse_param("monthly"), Some(SalesPeriod::Monthly));
        assert_eq!(SalesPeriod::parse_param("hourly"), None);
    }
}
