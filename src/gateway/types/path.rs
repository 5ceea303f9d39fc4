//! Path extractor with envelope-shaped rejections

use axum::extract::rejection::PathRejection;
use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use axum::http::StatusCode;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::response::error_codes;

/// `axum::extract::Path` whose failures (non-integer or overflowing ids)
/// render as 400 with `INVALID_PARAMETER`.
#[derive(Debug)]
pub struct ValidatedPath<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(ValidatedPath(value)),
            Err(rejection) => Err(rejection_to_error(rejection)),
        }
    }
}

fn rejection_to_error(rejection: PathRejection) -> ApiError {
    let status = rejection.status();
    let msg = rejection.body_text();
    tracing::debug!("Rejected path ({}): {}", status, msg);
    match status {
        StatusCode::BAD_REQUEST => ApiError::bad_request(msg),
        // Route/extractor mismatch, not a client error
        StatusCode::INTERNAL_SERVER_ERROR => ApiError::internal(),
        other => ApiError::new(other, error_codes::INVALID_PARAMETER, msg),
    }
}
