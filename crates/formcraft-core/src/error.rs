//! Error types for form schema operations.

use thiserror::Error;

/// A caller-fixable problem with a submitted form definition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The title is empty after trimming.
    #[error("title is required")]
    MissingTitle,

    /// The definition has no fields.
    #[error("at least one field is required")]
    MissingFields,

    /// A field names an unknown type.
    #[error("field {index} has unknown type '{value}'")]
    InvalidFieldType { index: usize, value: String },

    /// The title contains nothing a slug can be built from.
    #[error("title does not produce a usable slug")]
    UnslugifiableTitle,

    /// An explicitly supplied slug is not URL-safe.
    #[error("slug '{0}' must be lowercase alphanumerics separated by single dashes")]
    InvalidSlug(String),
}

impl ValidationError {
    /// Returns a stable, kebab-case reason code.
    pub fn reason_code(&self) -> &'static str {
        match self {
            Self::MissingTitle => "missing-title",
            Self::MissingFields => "missing-fields",
            Self::InvalidFieldType { .. } => "invalid-field-type",
            Self::UnslugifiableTitle => "unslugifiable-title",
            Self::InvalidSlug(_) => "invalid-slug",
        }
    }
}

/// Failure reported by a storage backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The slug is already taken by another definition.
    #[error("unique constraint violated for slug '{0}'")]
    UniqueViolation(String),

    /// Any other backend failure.
    #[error("{0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    /// Wraps a backend error.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Box::new(err))
    }
}

/// Errors returned by [`FormSchemaManager`](crate::FormSchemaManager).
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The submitted definition is invalid.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Another definition already uses this slug.
    #[error("slug already taken: {0}")]
    SlugTaken(String),

    /// No definition has this slug.
    #[error("form not found: {0}")]
    NotFound(String),

    /// Unexpected storage failure. The source is kept for logging only.
    #[error("storage failure")]
    Storage(#[source] StoreError),
}

impl SchemaError {
    /// Returns a stable, kebab-case reason code.
    pub fn reason_code(&self) -> &'static str {
        match self {
            Self::Validation(err) => err.reason_code(),
            Self::SlugTaken(_) => "slug-conflict",
            Self::NotFound(_) => "not-found",
            Self::Storage(_) => "storage-error",
        }
    }

    /// Returns whether the caller can fix this by changing the input.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Storage(_))
    }
}

/// Result type alias for schema operations.
pub type Result<T> = std::result::Result<T, SchemaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_codes() {
        assert_eq!(
            SchemaError::from(ValidationError::MissingFields).reason_code(),
            "missing-fields"
        );
        assert_eq!(
            SchemaError::SlugTaken("a".to_string()).reason_code(),
            "slug-conflict"
        );
        assert_eq!(
            SchemaError::NotFound("a".to_string()).reason_code(),
            "not-found"
        );
    }

    #[test]
    fn test_storage_error_hides_detail() {
        let inner = std::io::Error::other("disk on fire at /var/db");
        let err = SchemaError::Storage(StoreError::backend(inner));
        assert_eq!(err.to_string(), "storage failure");
        assert!(!err.is_client_error());
        assert_eq!(err.reason_code(), "storage-error");
    }
}
