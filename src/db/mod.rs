//! Database connection management

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

const SCHEMA: &[&str] = &[
    r#"CREATE TABLE IF NOT EXISTS users (
        id            BIGSERIAL PRIMARY KEY,
        username      VARCHAR(45) NOT NULL UNIQUE,
        email         VARCHAR(80) NOT NULL UNIQUE,
        password_hash TEXT NOT NULL,
        is_staff      BOOLEAN NOT NULL DEFAULT FALSE,
        is_active     BOOLEAN NOT NULL DEFAULT TRUE,
        created_at    TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )"#,
    r#"CREATE TABLE IF NOT EXISTS orders (
        id           BIGSERIAL PRIMARY KEY,
        size         VARCHAR(20) NOT NULL DEFAULT 'SMALL',
        order_status VARCHAR(20) NOT NULL DEFAULT 'PENDING',
        flavour      TEXT NOT NULL,
        quantity     INTEGER NOT NULL,
        date_created TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        user_id      BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE
    )"#,
    // Tables created with the earlier VARCHAR(80) flavour column
    r#"ALTER TABLE orders ALTER COLUMN flavour TYPE TEXT"#,
    r#"CREATE INDEX IF NOT EXISTS idx_orders_user_id ON orders (user_id)"#,
];

/// PostgreSQL database connection pool
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new database connection pool
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(20)
            .acquire_timeout(Duration::from_secs(5))
            .connect(database_url)
            .await?;

        tracing::info!("PostgreSQL connection pool established");
        Ok(Self { pool })
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create tables if they do not exist yet
    pub async fn init_schema(&self) -> Result<(), sqlx::Error> {
        for stmt in SCHEMA {
            sqlx::query(stmt).execute(&self.pool).await?;
        }
        tracing::info!("Database schema ready");
        Ok(())
    }

    /// Check database health
    pub async fn health_check(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
