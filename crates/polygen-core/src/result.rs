//! Convenience result type alias for Polygen.

use crate::error::AppError;

/// A specialized `Result` type for Polygen operations.
pub type AppResult<T> = Result<T, AppError>;
