//! Convenience result type alias for TrackTogether.

use crate::error::AppError;

/// A specialized `Result` type for TrackTogether operations.
pub type AppResult<T> = Result<T, AppError>;
