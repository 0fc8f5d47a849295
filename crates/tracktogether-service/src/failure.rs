//! Context for store failures surfaced to callers.

use tracktogether_core::error::{AppError, ErrorKind};

/// Wrap a transient store failure with what was being attempted.
/// Other kinds pass through unchanged.
pub(crate) fn store_failure(action: &'static str) -> impl FnOnce(AppError) -> AppError {
    move |e| match e.kind {
        ErrorKind::Transient => {
            AppError::with_source(ErrorKind::Transient, format!("Failed to {action}"), e)
        }
        _ => e,
    }
}
