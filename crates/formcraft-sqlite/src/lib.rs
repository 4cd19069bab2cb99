//! # formcraft-sqlite
//!
//! SQLite storage for form definitions, built on sqlx.
//!
//! ```ignore
//! use formcraft_core::{FieldSpec, FormSchemaManager, NewForm};
//! use formcraft_sqlite::SqliteFormStore;
//!
//! let store = SqliteFormStore::connect("sqlite:forms.sqlite3", 5).await?;
//! let manager = FormSchemaManager::new(store);
//!
//! let form = manager
//!     .create_definition(NewForm::new("Signup").field(FieldSpec::new("Email", "EMAIL")))
//!     .await?;
//! ```
//!
//! Tables are created by [`create_tables`] (also run by
//! [`SqliteFormStore::connect`]):
//!
//! - `form_definitions`: one row per form, `slug` is `UNIQUE`
//! - `form_fields`: one row per field, options as a JSON array
//! - `form_responses`: submitted responses, only counted by this crate

mod error;
mod schema;
mod store;

pub use error::{Result, SqliteStoreError};
pub use schema::{
    create_tables, CREATE_DEFINITIONS_TABLE_SQL, CREATE_FIELDS_TABLE_SQL,
    CREATE_RESPONSES_INDEX_SQL, CREATE_RESPONSES_TABLE_SQL,
};
pub use store::SqliteFormStore;
