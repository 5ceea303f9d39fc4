use axum::{Json, extract::State, http::StatusCode};
use std::sync::Arc;
use validator::Validate;

use super::service::{AuthError, AuthResponse, LoginRequest, SignupRequest, UserView};
use crate::gateway::state::AppState;
use crate::gateway::types::{ApiError, ApiResult, ValidatedJson, error_codes};
use crate::store::StoreError;

/// Register a new user
///
/// POST /auth/signup
#[utoipa::path(
    post,
    path = "/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "User registered successfully", body = UserView),
        (status = 409, description = "Username or email already exists"),
        (status = 422, description = "Invalid input")
    ),
    tag = "Auth"
)]
pub async fn signup(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<SignupRequest>,
) -> ApiResult<(StatusCode, Json<UserView>)> {
    req.validate()
        .map_err(|e| ApiError::unprocessable(e.to_string()))?;

    match state.user_auth.signup(req).await {
        Ok(user) => Ok((StatusCode::CREATED, Json(UserView::from(user)))),
        Err(AuthError::Store(StoreError::Conflict(msg))) => {
            tracing::warn!("Signup attempt for existing user: {}", msg);
            ApiError::new(
                StatusCode::CONFLICT,
                error_codes::CONFLICT,
                "Username or email already exists",
            )
            .into_err()
        }
        Err(e) => {
            tracing::error!("Signup failed: {}", e);
            ApiError::internal().into_err()
        }
    }
}

/// Login user
///
/// POST /auth/login
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    match state.user_auth.login(req).await {
        Ok(resp) => Ok(Json(resp)),
        Err(e @ (AuthError::InvalidCredentials | AuthError::InactiveUser)) => {
            tracing::warn!("Login failed: {}", e);
            ApiError::unauthorized(error_codes::AUTH_FAILED, e.to_string()).into_err()
        }
        Err(e) => {
            tracing::error!("Login failed: {}", e);
            ApiError::internal().into_err()
        }
    }
}
