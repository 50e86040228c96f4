pub use super::customer::Entity as Customer;
pub use super::order::Entity as Order;
pub use super::order_item::Entity as OrderItem;
pub use super::order_status_history::Entity as OrderStatusHistory;
pub use super::payment::Entity as Payment;
