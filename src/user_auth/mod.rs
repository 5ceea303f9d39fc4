//! User accounts and bearer-token authentication
//!
//! - `service`: signup/login, JWT issue and verification
//! - `middleware`: per-request token check injecting [`Caller`]
//! - `handlers`: `/auth/*` endpoints

pub mod handlers;
pub mod middleware;
pub mod service;

pub use middleware::jwt_auth_middleware;
pub use service::{AuthError, Caller, Claims, UserAuthService};
