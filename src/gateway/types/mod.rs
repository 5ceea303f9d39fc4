//! Gateway types module
//!
//! ## Input Types
//! - [`OrderPayload`], [`OrderStatusPayload`]: request bodies
//! - [`ValidatedJson`]: body extractor rejecting schema mismatches up front
//! - [`ValidatedPath`]: path extractor rejecting non-integer ids
//!
//! ## Output Types
//! - [`OrderView`]: order representation
//! - [`ApiResponse<T>`]: unified envelope
//! - [`ApiError`]: handler error rendered through the envelope

pub mod error;
pub mod json;
pub mod order;
pub mod path;
pub mod response;

pub use error::{ApiError, ApiResult};
pub use json::ValidatedJson;
pub use order::{OrderPayload, OrderStatusPayload, OrderView};
pub use path::ValidatedPath;
pub use response::{ApiResponse, error_codes};
