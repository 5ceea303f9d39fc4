use axum::{
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use super::service::Caller;
use crate::gateway::{
    state::AppState,
    types::{ApiError, error_codes},
};

/// Decode the bearer token once and inject [`Caller`] for the handlers.
pub async fn jwt_auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    // 1. Extract Authorization header
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(|| {
            ApiError::unauthorized(error_codes::MISSING_AUTH, "Missing Authorization header")
        })?
        .to_str()
        .map_err(|_| ApiError::unauthorized(error_codes::AUTH_FAILED, "Invalid token format"))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::unauthorized(error_codes::AUTH_FAILED, "Invalid token format"))?;

    // 2. Verify token
    match state.user_auth.verify_token(token.trim()) {
        Ok(claims) => {
            // 3. Inject caller identity
            request.extensions_mut().insert(Caller {
                username: claims.sub,
            });
            Ok(next.run(request).await)
        }
        Err(e) => {
            tracing::debug!("Token rejected: {}", e);
            Err(ApiError::unauthorized(
                error_codes::AUTH_FAILED,
                "Invalid or expired token",
            ))
        }
    }
}
