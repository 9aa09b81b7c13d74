//! Convenience result type alias for Spellbook.

use crate::error::AppError;

/// A specialized `Result` type for Spellbook operations.
pub type AppResult<T> = Result<T, AppError>;
