//! Order Service - food order REST API
//!
//! # Modules
//!
//! - [`config`] - YAML configuration per environment
//! - [`logging`] - tracing subscriber setup
//! - [`models`] - User and Order records, enumerated fields
//! - [`db`] - PostgreSQL pool and schema
//! - [`store`] - User and order accessors (PostgreSQL / in-memory)
//! - [`user_auth`] - Signup, login, JWT middleware
//! - [`gateway`] - Router, handlers, DTOs, OpenAPI

pub mod config;
pub mod db;
pub mod gateway;
pub mod logging;
pub mod models;
pub mod store;
pub mod user_auth;

// Convenient re-exports at crate root
pub use gateway::{build_router, state::AppState};
pub use models::{Order, OrderId, OrderSize, OrderStatus, User, UserId};
pub use store::{MemoryStore, OrderRepository, PgStore, StoreError, UserRepository};
pub use user_auth::UserAuthService;
