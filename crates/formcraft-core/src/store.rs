//! Storage contract consumed by the schema manager.

use std::future::Future;
use std::pin::Pin;

use crate::error::StoreError;
use crate::model::FormDefinition;

/// A boxed future for async storage operations.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Result type alias for storage operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Persistence for form definitions.
///
/// Implementations must enforce slug uniqueness themselves and report a
/// duplicate with [`StoreError::UniqueViolation`]; the manager's lookup
/// before create is only a fast path.
pub trait FormStore: Send + Sync {
    /// Finds a definition by slug.
    fn find_by_slug<'a>(&'a self, slug: &'a str)
        -> BoxFuture<'a, StoreResult<Option<FormDefinition>>>;

    /// Persists a definition and all of its fields atomically.
    ///
    /// Returns the stored definition with identifiers and `created_at`
    /// assigned.
    fn create_with_fields<'a>(
        &'a self,
        definition: &'a FormDefinition,
    ) -> BoxFuture<'a, StoreResult<FormDefinition>>;

    /// Returns all definitions, newest first, with response counts.
    fn list_all(&self) -> BoxFuture<'_, StoreResult<Vec<FormDefinition>>>;
}

impl<S: FormStore + ?Sized> FormStore for std::sync::Arc<S> {
    fn find_by_slug<'a>(
        &'a self,
        slug: &'a str,
    ) -> BoxFuture<'a, StoreResult<Option<FormDefinition>>> {
        (**self).find_by_slug(slug)
    }

    fn create_with_fields<'a>(
        &'a self,
        definition: &'a FormDefinition,
    ) -> BoxFuture<'a, StoreResult<FormDefinition>> {
        (**self).create_with_fields(definition)
    }

    fn list_all(&self) -> BoxFuture<'_, StoreResult<Vec<FormDefinition>>> {
        (**self).list_all()
    }
}
