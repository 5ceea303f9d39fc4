use std::sync::Arc;

use crate::store::{OrderRepository, UserRepository};
use crate::user_auth::UserAuthService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// User accessor
    pub users: Arc<dyn UserRepository>,
    /// Order accessor
    pub orders: Arc<dyn OrderRepository>,
    /// Signup/login and token verification
    pub user_auth: Arc<UserAuthService>,
    /// Per-user endpoints only serve the caller's own `user_id`
    pub enforce_owner_scope: bool,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserRepository>,
        orders: Arc<dyn OrderRepository>,
        user_auth: Arc<UserAuthService>,
    ) -> Self {
        Self {
            users,
            orders,
            user_auth,
            enforce_owner_scope: false,
        }
    }

    pub fn with_owner_scope(mut self, enforce: bool) -> Self {
        self.enforce_owner_scope = enforce;
        self
    }
}
