//! Validation, normalization and storage orchestration for form definitions.

use chrono::Utc;
use tracing::{debug, error, info, warn};

use crate::error::{Result, SchemaError, StoreError, ValidationError};
use crate::model::{FieldDefinition, FieldType, FormDefinition, NewForm};
use crate::slug;
use crate::store::FormStore;

/// Validates and normalizes a submitted form without touching storage.
///
/// Checks run in a fixed order and the first violation is returned:
/// title, field count, field types, slug. On success the returned
/// definition is unsaved (`id == 0`), its title is trimmed, its slug is
/// set, and every field's `order` equals its position in `input.fields`.
pub fn normalize(input: &NewForm) -> std::result::Result<FormDefinition, ValidationError> {
    let title = input.title.trim();
    if title.is_empty() {
        return Err(ValidationError::MissingTitle);
    }

    if input.fields.is_empty() {
        return Err(ValidationError::MissingFields);
    }

    let mut fields = Vec::with_capacity(input.fields.len());
    for (index, spec) in input.fields.iter().enumerate() {
        let field_type =
            FieldType::parse(&spec.field_type).ok_or_else(|| ValidationError::InvalidFieldType {
                index,
                value: spec.field_type.clone(),
            })?;

        let options = field_type
            .has_options()
            .then(|| spec.options.clone().unwrap_or_default());

        fields.push(FieldDefinition {
            id: 0,
            label: spec.label.clone(),
            field_type,
            required: spec.required,
            order: u32::try_from(index).unwrap_or(u32::MAX),
            options,
        });
    }

    let slug = match input.slug.as_deref() {
        Some(explicit) => {
            if !slug::is_valid(explicit) {
                return Err(ValidationError::InvalidSlug(explicit.to_string()));
            }
            explicit.to_string()
        }
        None => {
            let derived = slug::generate(title);
            if derived.is_empty() {
                return Err(ValidationError::UnslugifiableTitle);
            }
            derived
        }
    };

    Ok(FormDefinition {
        id: 0,
        title: title.to_string(),
        slug,
        fields,
        created_at: Utc::now(),
        response_count: 0,
    })
}

/// Validates form definitions and hands them to a [`FormStore`].
///
/// # Example
///
/// ```
/// use formcraft_core::{FieldSpec, FormSchemaManager, MemoryFormStore, NewForm};
///
/// # async fn run() -> formcraft_core::Result<()> {
/// let manager = FormSchemaManager::new(MemoryFormStore::new());
/// let form = manager
///     .create_definition(
///         NewForm::new("Customer Feedback!!!")
///             .field(FieldSpec::new("Name", "TEXT").required()),
///     )
///     .await?;
/// assert_eq!(form.slug, "customer-feedback");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct FormSchemaManager<S> {
    store: S,
}

impl<S: FormStore> FormSchemaManager<S> {
    /// Creates a manager over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Validates, normalizes and persists a new form definition.
    ///
    /// Validation errors are returned before any storage call. A slug
    /// already present, whether found by the lookup or rejected by the
    /// store's uniqueness constraint, yields [`SchemaError::SlugTaken`].
    pub async fn create_definition(&self, input: NewForm) -> Result<FormDefinition> {
        let draft = normalize(&input)?;
        debug!(slug = %draft.slug, fields = draft.fields.len(), "Normalized form definition");

        let existing = self
            .store
            .find_by_slug(&draft.slug)
            .await
            .map_err(storage_failure)?;
        if existing.is_some() {
            warn!(slug = %draft.slug, "Slug already taken");
            return Err(SchemaError::SlugTaken(draft.slug));
        }

        let mut stored = match self.store.create_with_fields(&draft).await {
            Ok(stored) => stored,
            Err(StoreError::UniqueViolation(slug)) => {
                warn!(slug = %slug, "Slug taken by a concurrent create");
                return Err(SchemaError::SlugTaken(slug));
            }
            Err(err) => return Err(storage_failure(err)),
        };
        stored.sort_fields();

        info!(
            form_id = stored.id,
            slug = %stored.slug,
            fields = stored.fields.len(),
            "Form definition created"
        );
        Ok(stored)
    }

    /// Returns all definitions, newest first, with fields in order.
    pub async fn list_definitions(&self) -> Result<Vec<FormDefinition>> {
        let mut forms = self.store.list_all().await.map_err(storage_failure)?;
        for form in &mut forms {
            form.sort_fields();
        }
        Ok(forms)
    }

    /// Returns the definition with this slug, with fields in order.
    pub async fn get_definition_by_slug(&self, slug: &str) -> Result<FormDefinition> {
        let mut form = self
            .store
            .find_by_slug(slug)
            .await
            .map_err(storage_failure)?
            .ok_or_else(|| SchemaError::NotFound(slug.to_string()))?;
        form.sort_fields();
        Ok(form)
    }
}

fn storage_failure(err: StoreError) -> SchemaError {
    error!(error = %err, "Form storage failure");
    SchemaError::Storage(err)
}
