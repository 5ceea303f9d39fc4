//! Entity accessors for users and orders.
//!
//! Handlers only see the [`UserRepository`] and [`OrderRepository`] traits.
//! Two backends implement them:
//!
//! - [`postgres`]: sqlx over a [`crate::db::Database`] pool
//! - [`memory`]: tables behind a `tokio::sync::RwLock`, for development
//!   without a database and for tests

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{NewOrder, NewUser, Order, OrderChanges, OrderId, OrderStatus, User, UserId};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The addressed row does not exist.
    #[error("Not found")]
    NotFound,
    /// A unique constraint rejected the write.
    #[error("Conflict: {0}")]
    Conflict(String),
    /// A row holds a value the domain model cannot represent.
    #[error("Corrupt row: {0}")]
    CorruptRow(String),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// User entity accessor
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn get_by_id(&self, user_id: UserId) -> StoreResult<Option<User>>;

    async fn get_by_username(&self, username: &str) -> StoreResult<Option<User>>;

    async fn get_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    /// Insert a user. Duplicate username or email yields [`StoreError::Conflict`].
    async fn create(&self, user: NewUser) -> StoreResult<User>;
}

/// Order entity accessor
///
/// Lookups by id return `Ok(None)` for missing rows; writes addressed at a
/// missing row return [`StoreError::NotFound`].
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// All orders, ascending id
    async fn list(&self) -> StoreResult<Vec<Order>>;

    /// Insert with status PENDING
    async fn create(&self, order: NewOrder) -> StoreResult<Order>;

    async fn get(&self, order_id: OrderId) -> StoreResult<Option<Order>>;

    /// Overwrite size, quantity and flavour
    async fn update(&self, order_id: OrderId, changes: OrderChanges) -> StoreResult<Order>;

    /// Hard delete; returns the removed row
    async fn delete(&self, order_id: OrderId) -> StoreResult<Order>;

    async fn set_status(&self, order_id: OrderId, status: OrderStatus) -> StoreResult<Order>;

    /// The order with this id if it belongs to `user_id`
    async fn get_for_user(&self, user_id: UserId, order_id: OrderId)
    -> StoreResult<Option<Order>>;

    /// All orders owned by `user_id`, ascending id
    async fn list_for_user(&self, user_id: UserId) -> StoreResult<Vec<Order>>;

    /// Liveness probe for the health endpoint
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
