//! Handler error type
//!
//! Every handler returns [`ApiResult`]. Failures render as the unified
//! envelope with the HTTP status carrying the error class.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use super::response::{ApiResponse, error_codes};
use crate::store::StoreError;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Clone)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: i32,
    pub msg: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: i32, msg: impl Into<String>) -> Self {
        Self {
            status,
            code,
            msg: msg.into(),
        }
    }

    pub fn into_err<T>(self) -> ApiResult<T> {
        Err(self)
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error_codes::INVALID_PARAMETER, msg)
    }

    pub fn unprocessable(msg: impl Into<String>) -> Self {
        Self::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            error_codes::INVALID_PARAMETER,
            msg,
        )
    }

    pub fn unauthorized(code: i32, msg: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, code, msg)
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, error_codes::FORBIDDEN, msg)
    }

    pub fn order_not_found() -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            error_codes::ORDER_NOT_FOUND,
            "Order not found",
        )
    }

    pub fn user_not_found() -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            error_codes::USER_NOT_FOUND,
            "User not found",
        )
    }

    pub fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            error_codes::INTERNAL_ERROR,
            "Internal server error",
        )
    }
}

/// `NotFound` maps to the order flavour of 404; handlers that look up users
/// check for `None` themselves and return [`ApiError::user_not_found`].
impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound => ApiError::order_not_found(),
            StoreError::Conflict(msg) => {
                ApiError::new(StatusCode::CONFLICT, error_codes::CONFLICT, msg)
            }
            other => {
                tracing::error!("Store failure: {}", other);
                ApiError::internal()
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ApiResponse::<()>::error(self.code, self.msg));
        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_mapping() {
        let e: ApiError = StoreError::NotFound.into();
        assert_eq!(e.status, StatusCode::NOT_FOUND);
        assert_eq!(e.code, error_codes::ORDER_NOT_FOUND);

        let e: ApiError = StoreError::Conflict("username taken".into()).into();
        assert_eq!(e.status, StatusCode::CONFLICT);
        assert_eq!(e.msg, "username taken");

        let e: ApiError = StoreError::CorruptRow("size".into()).into();
        assert_eq!(e.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(e.msg, "Internal server error");
    }

    #[test]
    fn test_into_response_status() {
        let resp = ApiError::forbidden("nope").into_response();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }
}
