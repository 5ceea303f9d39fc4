//! PostgreSQL store

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use super::{OrderRepository, StoreError, StoreResult, UserRepository};
use crate::db::Database;
use crate::models::{
    NewOrder, NewUser, Order, OrderChanges, OrderId, OrderSize, OrderStatus, User, UserId,
};

const USER_COLUMNS: &str = "id, username, email, password_hash, is_staff, is_active, created_at";
const ORDER_COLUMNS: &str = "id, size, quantity, flavour, order_status, user_id, date_created";

/// sqlx-backed implementation of both repositories
#[derive(Clone)]
pub struct PgStore {
    db: Database,
}

impl PgStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn pool(&self) -> &PgPool {
        self.db.pool()
    }
}

fn user_from_row(r: &PgRow) -> StoreResult<User> {
    Ok(User {
        id: r.try_get("id")?,
        username: r.try_get("username")?,
        email: r.try_get("email")?,
        password_hash: r.try_get("password_hash")?,
        is_staff: r.try_get("is_staff")?,
        is_active: r.try_get("is_active")?,
        created_at: r.try_get("created_at")?,
    })
}

fn order_from_row(r: &PgRow) -> StoreResult<Order> {
    let size: String = r.try_get("size")?;
    let status: String = r.try_get("order_status")?;
    Ok(Order {
        id: r.try_get("id")?,
        size: size
            .parse::<OrderSize>()
            .map_err(|e| StoreError::CorruptRow(e.to_string()))?,
        quantity: r.try_get("quantity")?,
        flavour: r.try_get("flavour")?,
        order_status: status
            .parse::<OrderStatus>()
            .map_err(|e| StoreError::CorruptRow(e.to_string()))?,
        user_id: r.try_get("user_id")?,
        date_created: r.try_get("date_created")?,
    })
}

fn orders_from_rows(rows: &[PgRow]) -> StoreResult<Vec<Order>> {
    rows.iter().map(order_from_row).collect()
}

/// Unique and foreign-key violations become domain errors
fn map_write_error(e: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(ref db_err) = e {
        if db_err.is_unique_violation() {
            return StoreError::Conflict(db_err.message().to_string());
        }
        if db_err.is_foreign_key_violation() {
            return StoreError::NotFound;
        }
    }
    StoreError::Database(e)
}

#[async_trait]
impl UserRepository for PgStore {
    async fn get_by_id(&self, user_id: UserId) -> StoreResult<Option<User>> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(user_id)
            .fetch_optional(self.pool())
            .await?;
        row.as_ref().map(user_from_row).transpose()
    }

    async fn get_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let row = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(self.pool())
        .await?;
        row.as_ref().map(user_from_row).transpose()
    }

    async fn get_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1"))
            .bind(email)
            .fetch_optional(self.pool())
            .await?;
        row.as_ref().map(user_from_row).transpose()
    }

    async fn create(&self, user: NewUser) -> StoreResult<User> {
        let row = sqlx::query(&format!(
            "INSERT INTO users (username, email, password_hash) VALUES ($1, $2, $3) \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_one(self.pool())
        .await
        .map_err(map_write_error)?;
        user_from_row(&row)
    }
}

#[async_trait]
impl OrderRepository for PgStore {
    async fn list(&self) -> StoreResult<Vec<Order>> {
        let rows = sqlx::query(&format!("SELECT {ORDER_COLUMNS} FROM orders ORDER BY id"))
            .fetch_all(self.pool())
            .await?;
        orders_from_rows(&rows)
    }

    async fn create(&self, order: NewOrder) -> StoreResult<Order> {
        let row = sqlx::query(&format!(
            "INSERT INTO orders (size, quantity, flavour, order_status, user_id) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {ORDER_COLUMNS}"
        ))
        .bind(order.size.as_str())
        .bind(order.quantity)
        .bind(&order.flavour)
        .bind(OrderStatus::Pending.as_str())
        .bind(order.user_id)
        .fetch_one(self.pool())
        .await
        .map_err(map_write_error)?;
        order_from_row(&row)
    }

    async fn get(&self, order_id: OrderId) -> StoreResult<Option<Order>> {
        let row = sqlx::query(&format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"))
            .bind(order_id)
            .fetch_optional(self.pool())
            .await?;
        row.as_ref().map(order_from_row).transpose()
    }

    async fn update(&self, order_id: OrderId, changes: OrderChanges) -> StoreResult<Order> {
        let row = sqlx::query(&format!(
            "UPDATE orders SET size = $2, quantity = $3, flavour = $4 WHERE id = $1 \
             RETURNING {ORDER_COLUMNS}"
        ))
        .bind(order_id)
        .bind(changes.size.as_str())
        .bind(changes.quantity)
        .bind(&changes.flavour)
        .fetch_optional(self.pool())
        .await
        .map_err(map_write_error)?
        .ok_or(StoreError::NotFound)?;
        order_from_row(&row)
    }

    async fn delete(&self, order_id: OrderId) -> StoreResult<Order> {
        let row = sqlx::query(&format!(
            "DELETE FROM orders WHERE id = $1 RETURNING {ORDER_COLUMNS}"
        ))
        .bind(order_id)
        .fetch_optional(self.pool())
        .await?
        .ok_or(StoreError::NotFound)?;
        order_from_row(&row)
    }

    async fn set_status(&self, order_id: OrderId, status: OrderStatus) -> StoreResult<Order> {
        let row = sqlx::query(&format!(
            "UPDATE orders SET order_status = $2 WHERE id = $1 RETURNING {ORDER_COLUMNS}"
        ))
        .bind(order_id)
        .bind(status.as_str())
        .fetch_optional(self.pool())
        .await?
        .ok_or(StoreError::NotFound)?;
        order_from_row(&row)
    }

    async fn get_for_user(
        &self,
        user_id: UserId,
        order_id: OrderId,
    ) -> StoreResult<Option<Order>> {
        let row = sqlx::query(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1 AND user_id = $2 LIMIT 1"
        ))
        .bind(order_id)
        .bind(user_id)
        .fetch_optional(self.pool())
        .await?;
        row.as_ref().map(order_from_row).transpose()
    }

    async fn list_for_user(&self, user_id: UserId) -> StoreResult<Vec<Order>> {
        let rows = sqlx::query(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE user_id = $1 ORDER BY id"
        ))
        .bind(user_id)
        .fetch_all(self.pool())
        .await?;
        orders_from_rows(&rows)
    }

    async fn ping(&self) -> StoreResult<()> {
        self.db.health_check().await?;
        Ok(())
    }
}
