//! # formcraft-core
//!
//! Form definition model and schema rules.
//!
//! This crate provides:
//! - Slug generation from form titles
//! - `FormDefinition` / `FieldDefinition` types
//! - `FormSchemaManager` for validating, normalizing and persisting definitions
//! - The `FormStore` storage contract and an in-memory implementation
//! - `FormBuilder`, an edit buffer for composing forms field by field
//!
//! ## Quick Start
//!
//! ```
//! use formcraft_core::{FieldSpec, FormSchemaManager, MemoryFormStore, NewForm};
//!
//! # async fn run() -> formcraft_core::Result<()> {
//! let manager = FormSchemaManager::new(MemoryFormStore::new());
//!
//! let form = manager
//!     .create_definition(
//!         NewForm::new("Customer Feedback!!!")
//!             .field(FieldSpec::new("Name", "TEXT").required())
//!             .field(FieldSpec::new("Rating", "RADIO").options(["Good", "Bad"])),
//!     )
//!     .await?;
//! assert_eq!(form.slug, "customer-feedback");
//!
//! let same = manager.get_definition_by_slug("customer-feedback").await?;
//! assert_eq!(same.fields[1].order, 1);
//! # Ok(())
//! # }
//! ```
//!
//! ## Errors
//!
//! Invalid input is rejected with [`SchemaError::Validation`] before any
//! storage call. A slug collision, whether seen by the lookup or by the
//! store's uniqueness constraint, is [`SchemaError::SlugTaken`].

mod builder;
mod error;
mod manager;
mod memory;
mod model;
pub mod slug;
mod store;

pub use builder::FormBuilder;
pub use error::{Result, SchemaError, StoreError, ValidationError};
pub use manager::{normalize, FormSchemaManager};
pub use memory::MemoryFormStore;
pub use model::{FieldDefinition, FieldSpec, FieldType, FormDefinition, NewForm};
pub use store::{BoxFuture, FormStore, StoreResult};
