//! Error types for the movie catalog.

use crate::types::{Field, Violation};
use thiserror::Error;

/// Main error type for catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Movie not found: {0}")]
    NotFound(String),

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Invalid number for {field}: {value:?}")]
    InvalidNumber { field: Field, value: String },

    #[error("Invalid value: {0}")]
    Invalid(#[from] Violation),
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
