//! Convenience result type alias for DirHub.

use crate::error::AppError;

/// A specialized `Result` type for DirHub operations.
pub type AppResult<T> = Result<T, AppError>;
