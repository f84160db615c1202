//! Error types for contactd.

use thiserror::Error;

use crate::models::TagRef;

/// Result type alias using contactd's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for directory operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Malformed or missing required input
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// A contact with the same email already exists
    #[error("duplicate email: {0}")]
    Conflict(String),

    /// Contact not found
    #[error("contact not found: {0}")]
    ContactNotFound(u64),

    /// Tag not present in the catalog
    #[error("tag not found: {0}")]
    TagNotFound(TagRef),
}

/// The distinct input shapes a caller can be rejected for.
///
/// Kept separate from [`Error`] so callers can branch on the exact failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("email parameter is missing")]
    EmailMissing,

    #[error("fields must be a list")]
    FieldsNotSequence,

    #[error("each field must be a dictionary (field {index})")]
    FieldNotObject { index: usize },

    #[error("each field must have 'slug' and 'value' keys (field {index})")]
    FieldMissingKeys { index: usize },

    #[error("field slug must be a string (field {index})")]
    FieldSlugNotString { index: usize },

    #[error("tagId parameter is missing")]
    TagIdMissing,
}
