//! In-memory store.
//!
//! Both tables live behind one `RwLock` so that order creation can check the
//! owning user and insert in a single critical section.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{OrderRepository, StoreError, StoreResult, UserRepository};
use crate::models::{
    NewOrder, NewUser, Order, OrderChanges, OrderId, OrderStatus, User, UserId,
};

#[derive(Default)]
struct Tables {
    users: BTreeMap<UserId, User>,
    orders: BTreeMap<OrderId, Order>,
    next_user_id: UserId,
    next_order_id: OrderId,
}

/// Memory-backed implementation of both repositories.
///
/// Clones share the same tables.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn get_by_id(&self, user_id: UserId) -> StoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.get(&user_id).cloned())
    }

    async fn get_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn get_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn create(&self, user: NewUser) -> StoreResult<User> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.username == user.username) {
            return Err(StoreError::Conflict(format!(
                "username {} already exists",
                user.username
            )));
        }
        if tables.users.values().any(|u| u.email == user.email) {
            return Err(StoreError::Conflict(format!(
                "email {} already exists",
                user.email
            )));
        }

        tables.next_user_id += 1;
        let record = User {
            id: tables.next_user_id,
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            is_staff: false,
            is_active: true,
            created_at: Utc::now(),
        };
        tables.users.insert(record.id, record.clone());
        Ok(record)
    }
}

#[async_trait]
impl OrderRepository for MemoryStore {
    async fn list(&self) -> StoreResult<Vec<Order>> {
        let tables = self.tables.read().await;
        Ok(tables.orders.values().cloned().collect())
    }

    async fn create(&self, order: NewOrder) -> StoreResult<Order> {
        let mut tables = self.tables.write().await;
        // Mirrors the foreign key of the SQL schema
        if !tables.users.contains_key(&order.user_id) {
            return Err(StoreError::NotFound);
        }

        tables.next_order_id += 1;
        let record = Order {
            id: tables.next_order_id,
            size: order.size,
            quantity: order.quantity,
            flavour: order.flavour,
            order_status: OrderStatus::Pending,
            user_id: order.user_id,
            date_created: Utc::now(),
        };
        tables.orders.insert(record.id, record.clone());
        Ok(record)
    }

    async fn get(&self, order_id: OrderId) -> StoreResult<Option<Order>> {
        let tables = self.tables.read().await;
        Ok(tables.orders.get(&order_id).cloned())
    }

    async fn update(&self, order_id: OrderId, changes: OrderChanges) -> StoreResult<Order> {
        let mut tables = self.tables.write().await;
        let order = tables
            .orders
            .get_mut(&order_id)
            .ok_or(StoreError::NotFound)?;
        order.apply(changes);
        Ok(order.clone())
    }

    async fn delete(&self, order_id: OrderId) -> StoreResult<Order> {
        let mut tables = self.tables.write().await;
        tables.orders.remove(&order_id).ok_or(StoreError::NotFound)
    }

    async fn set_status(&self, order_id: OrderId, status: OrderStatus) -> StoreResult<Order> {
        let mut tables = self.tables.write().await;
        let order = tables
            .orders
            .get_mut(&order_id)
            .ok_or(StoreError::NotFound)?;
        order.order_status = status;
        Ok(order.clone())
    }

    async fn get_for_user(
        &self,
        user_id: UserId,
        order_id: OrderId,
    ) -> StoreResult<Option<Order>> {
        let tables = self.tables.read().await;
        Ok(tables
            .orders
            .get(&order_id)
            .filter(|o| o.user_id == user_id)
            .cloned())
    }

    async fn list_for_user(&self, user_id: UserId) -> StoreResult<Vec<Order>> {
        let tables = self.tables.read().await;
        Ok(tables
            .orders
            .values()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect())
    }
}
