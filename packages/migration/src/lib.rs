//! Schema migrations for the OrderHub database.
//!
//! Run automatically at server startup via [`Migrator::up`].

pub use sea_orm_migration::prelude::*;
pub use sea_orm_migration::MigratorTrait;

mod m20260805_000001_create_customers_table;
mod m20260805_000002_create_orders_table;
mod m20260805_000003_create_order_items_table;
mod m20260805_000004_create_order_status_history_table;
mod m20260805_000005_create_payments_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260805_000001_create_customers_table::Migration),
            Box::new(m20260805_000002_create_orders_table::Migration),
            Box::new(m20260805_000003_create_order_items_table::Migration),
            Box::new(m20260805_000004_create_order_status_history_table::Migration),
            Box::new(m20260805_000005_create_payments_table::Migration),
        ]
    }
}
