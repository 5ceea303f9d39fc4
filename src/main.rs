//! Order Service entry point
//!
//! ```text
//! order_service [--env dev] [--port 8080]
//! ```
//!
//! Reads `config/<env>.yaml`, connects PostgreSQL when `postgres_url` (or
//! `DATABASE_URL`) is set, otherwise serves from the in-memory store.

use std::sync::Arc;

use anyhow::Context;

use order_service::config::{AppConfig, JWT_SECRET_ENV};
use order_service::db::Database;
use order_service::gateway::{self, state::AppState};
use order_service::store::{MemoryStore, OrderRepository, PgStore, UserRepository};
use order_service::user_auth::UserAuthService;

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

/// Get port override from command line (--port argument)
fn get_port_override() -> Option<u16> {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--port" && i + 1 < args.len() {
            return args[i + 1].parse().ok();
        }
    }
    None
}

async fn build_state(config: &AppConfig) -> anyhow::Result<AppState> {
    anyhow::ensure!(
        !config.auth.jwt_secret.is_empty(),
        "auth.jwt_secret is empty, set {}",
        JWT_SECRET_ENV
    );

    let users: Arc<dyn UserRepository>;
    let orders: Arc<dyn OrderRepository>;
    match config.postgres_url.as_deref() {
        Some(url) => {
            let db = Database::connect(url)
                .await
                .context("Failed to connect to PostgreSQL")?;
            db.init_schema()
                .await
                .context("Failed to initialize schema")?;
            let store = PgStore::new(db);
            users = Arc::new(store.clone());
            orders = Arc::new(store);
        }
        None => {
            tracing::warn!("No postgres_url configured, using in-memory store");
            let store = MemoryStore::new();
            users = Arc::new(store.clone());
            orders = Arc::new(store);
        }
    }

    let user_auth = Arc::new(UserAuthService::new(
        users.clone(),
        config.auth.jwt_secret.clone(),
        config.auth.token_ttl_hours,
    ));

    Ok(AppState::new(users, orders, user_auth).with_owner_scope(config.auth.enforce_owner_scope))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = get_env();
    let app_config = AppConfig::load(&env)?;
    let _log_guard = order_service::logging::init_logging(&app_config);

    tracing::info!("Starting order service in {} mode", env);
    if app_config.auth.enforce_owner_scope {
        tracing::info!("Per-user order endpoints restricted to the caller");
    }

    let port = get_port_override().unwrap_or(app_config.gateway.port);
    let state = Arc::new(build_state(&app_config).await?);

    gateway::run_server(&app_config.gateway.host, port, state).await
}
