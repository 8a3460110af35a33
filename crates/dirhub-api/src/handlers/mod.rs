//! Request handlers grouped by resource.

pub mod authority;
pub mod directory;
pub mod health;

use crate::error::ApiError;

/// Result type returned by every handler.
pub type ApiResult<T> = Result<T, ApiError>;
