pub mod prelude;

pub mod customer;
pub mod order;
pub mod order_item;
pub mod order_status_history;
pub mod payment;
pub mod sea_orm_active_enums;
