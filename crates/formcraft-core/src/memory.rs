//! In-process form store.

use std::sync::RwLock;

use chrono::Utc;

use crate::error::StoreError;
use crate::model::FormDefinition;
use crate::store::{BoxFuture, FormStore, StoreResult};

#[derive(Debug, Default)]
struct MemoryState {
    forms: Vec<FormDefinition>,
    next_form_id: i64,
    next_field_id: i64,
}

/// A [`FormStore`] that keeps definitions in memory.
///
/// Slug uniqueness is enforced under the write lock, so concurrent creates
/// of the same slug see exactly one success.
#[derive(Debug, Default)]
pub struct MemoryFormStore {
    state: RwLock<MemoryState>,
}

impl MemoryFormStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored definitions.
    pub fn len(&self) -> usize {
        self.state.read().map(|s| s.forms.len()).unwrap_or(0)
    }

    /// Returns whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Records `count` responses against the form with this slug.
    ///
    /// Returns `false` when no such form exists.
    pub fn record_responses(&self, slug: &str, count: i64) -> bool {
        let Ok(mut state) = self.state.write() else {
            return false;
        };
        match state.forms.iter_mut().find(|f| f.slug == slug) {
            Some(form) => {
                form.response_count += count;
                true
            }
            None => false,
        }
    }
}

fn poisoned() -> StoreError {
    StoreError::backend(std::io::Error::other("memory store lock poisoned"))
}

impl FormStore for MemoryFormStore {
    fn find_by_slug<'a>(
        &'a self,
        slug: &'a str,
    ) -> BoxFuture<'a, StoreResult<Option<FormDefinition>>> {
        Box::pin(async move {
            let state = self.state.read().map_err(|_| poisoned())?;
            Ok(state.forms.iter().find(|f| f.slug == slug).cloned())
        })
    }

    fn create_with_fields<'a>(
        &'a self,
        definition: &'a FormDefinition,
    ) -> BoxFuture<'a, StoreResult<FormDefinition>> {
        Box::pin(async move {
            let mut state = self.state.write().map_err(|_| poisoned())?;
            if state.forms.iter().any(|f| f.slug == definition.slug) {
                return Err(StoreError::UniqueViolation(definition.slug.clone()));
            }

            let mut stored = definition.clone();
            state.next_form_id += 1;
            stored.id = state.next_form_id;
            stored.created_at = Utc::now();
            stored.response_count = 0;
            for field in &mut stored.fields {
                state.next_field_id += 1;
                field.id = state.next_field_id;
            }

            state.forms.push(stored.clone());
            Ok(stored)
        })
    }

    fn list_all(&self) -> BoxFuture<'_, StoreResult<Vec<FormDefinition>>> {
        Box::pin(async move {
            let state = self.state.read().map_err(|_| poisoned())?;
            Ok(state.forms.iter().rev().cloned().collect())
        })
    }
}
