//! Error handling types and utilities.

/// A specialized Result type for pantry operations.
///
/// This is an alias for `anyhow::Result` with context added via `.context()`
/// and `.with_context()` methods throughout the codebase.
pub type Result<T> = anyhow::Result<T>;

/// Error returned by a recipe repository.
///
/// Distinguishes "no such recipe" from "storage unavailable" so callers never
/// have to infer the difference from a null-like sentinel.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// The backing store could not be reached at all.
    #[error("recipe storage unavailable: {reason}")]
    Unavailable { reason: String },

    /// The store responded, but the requested recipe does not exist.
    #[error("no recipe with id {id}")]
    NotFound { id: i64 },

    /// The store returned a row that does not map onto the recipe model.
    #[error("malformed recipe data: {detail}")]
    Malformed { detail: String },
}
