//! Table definitions for form storage.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::Result;

/// SQL to create the form_definitions table.
pub const CREATE_DEFINITIONS_TABLE_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS form_definitions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    slug VARCHAR(255) NOT NULL UNIQUE,
    created_at TIMESTAMP NOT NULL
)
"#;

/// SQL to create the form_fields table.
///
/// `options` holds a JSON array for RADIO and CHECKBOX fields and is NULL
/// for every other type.
pub const CREATE_FIELDS_TABLE_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS form_fields (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    form_id INTEGER NOT NULL REFERENCES form_definitions(id) ON DELETE CASCADE,
    label TEXT NOT NULL,
    field_type VARCHAR(16) NOT NULL,
    required BOOLEAN NOT NULL DEFAULT FALSE,
    sort_order INTEGER NOT NULL CHECK (sort_order >= 0),
    options TEXT,
    UNIQUE(form_id, sort_order)
)
"#;

/// SQL to create the form_responses table.
///
/// Responses are only counted here; their payload is opaque.
pub const CREATE_RESPONSES_TABLE_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS form_responses (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    form_id INTEGER NOT NULL REFERENCES form_definitions(id) ON DELETE CASCADE,
    payload TEXT NOT NULL DEFAULT '{}',
    submitted_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
)
"#;

/// SQL to index responses by form.
pub const CREATE_RESPONSES_INDEX_SQL: &str =
    "CREATE INDEX IF NOT EXISTS idx_form_responses_form_id ON form_responses (form_id)";

/// Creates all form tables if they don't exist.
pub async fn create_tables(pool: &SqlitePool) -> Result<()> {
    for sql in [
        CREATE_DEFINITIONS_TABLE_SQL,
        CREATE_FIELDS_TABLE_SQL,
        CREATE_RESPONSES_TABLE_SQL,
        CREATE_RESPONSES_INDEX_SQL,
    ] {
        debug!(sql = %sql.trim(), "Executing SQL");
        sqlx::query(sql).execute(pool).await?;
    }
    Ok(())
}
