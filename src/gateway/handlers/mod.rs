//! HTTP handlers, one per route

pub mod health;
pub mod orders;
pub mod user_orders;

pub use health::{HealthResponse, health_check};
pub use orders::{
    create_order, delete_order, get_order, list_orders, update_order, update_order_status,
};
pub use user_orders::{get_user_order, list_user_orders};
