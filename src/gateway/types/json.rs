//! JSON body extractor with envelope-shaped rejections
//!
//! Wraps `axum::Json` so that malformed bodies and values outside an
//! enumerated set are rejected before the handler runs, in the same error
//! format as every other failure.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::response::error_codes;

#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ValidatedJson(value)),
            Err(rejection) => Err(rejection_to_error(rejection)),
        }
    }
}

fn rejection_to_error(rejection: JsonRejection) -> ApiError {
    let status = rejection.status();
    let msg = rejection.body_text();
    tracing::debug!("Rejected request body ({}): {}", status, msg);
    match status {
        // Syntactically valid JSON that does not fit the schema
        StatusCode::UNPROCESSABLE_ENTITY => ApiError::unprocessable(msg),
        StatusCode::BAD_REQUEST => ApiError::bad_request(msg),
        other => ApiError::new(other, error_codes::INVALID_PARAMETER, msg),
    }
}
