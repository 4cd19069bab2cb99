//! sqlx-backed implementation of [`FormStore`].

use std::collections::HashMap;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use formcraft_core::{
    BoxFuture, FieldDefinition, FieldType, FormDefinition, FormStore, StoreResult,
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::debug;

use crate::error::{Result, SqliteStoreError};
use crate::schema::create_tables;

/// Row shape of a form definition joined with its response count.
type FormRow = (i64, String, String, DateTime<Utc>, i64);

/// Row shape of a form field.
type FieldRow = (i64, i64, String, String, bool, i64, Option<String>);

const SELECT_FORMS_SQL: &str = r#"
SELECT f.id, f.title, f.slug, f.created_at,
    (SELECT COUNT(*) FROM form_responses r WHERE r.form_id = f.id) AS response_count
FROM form_definitions f
"#;

const SELECT_FIELDS_SQL: &str =
    "SELECT id, form_id, label, field_type, required, sort_order, options FROM form_fields";

/// Form definitions stored in SQLite.
///
/// Slug uniqueness is enforced by the `UNIQUE` constraint on
/// `form_definitions.slug`; a definition and its fields are written in a
/// single transaction.
#[derive(Debug, Clone)]
pub struct SqliteFormStore {
    pool: SqlitePool,
}

impl SqliteFormStore {
    /// Creates a store over an existing pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connects to `url`, creating the database file if missing, and
    /// ensures the tables exist.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;
        let store = Self::new(pool);
        store.init().await?;
        Ok(store)
    }

    /// Ensures the form tables exist.
    pub async fn init(&self) -> Result<()> {
        create_tables(&self.pool).await
    }

    /// Returns the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Finds a definition by slug, including its fields.
    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<FormDefinition>> {
        let sql = format!("{SELECT_FORMS_SQL} WHERE f.slug = ?");
        let row: Option<FormRow> = sqlx::query_as(&sql)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let field_rows: Vec<FieldRow> =
            sqlx::query_as(&format!("{SELECT_FIELDS_SQL} WHERE form_id = ? ORDER BY sort_order"))
                .bind(row.0)
                .fetch_all(&self.pool)
                .await?;
        let fields = field_rows
            .into_iter()
            .map(field_from_row)
            .collect::<Result<Vec<_>>>()?;

        Ok(Some(form_from_row(row, fields)))
    }

    /// Inserts a definition and its fields in one transaction.
    pub async fn insert(&self, definition: &FormDefinition) -> Result<FormDefinition> {
        let created_at = Utc::now();
        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query(
            "INSERT INTO form_definitions (title, slug, created_at) VALUES (?, ?, ?)",
        )
        .bind(&definition.title)
        .bind(&definition.slug)
        .bind(created_at)
        .execute(&mut *tx)
        .await;

        let form_id = match inserted {
            Ok(result) => result.last_insert_rowid(),
            Err(err) if is_unique_violation(&err) => {
                return Err(SqliteStoreError::SlugExists(definition.slug.clone()));
            }
            Err(err) => return Err(err.into()),
        };
        debug!(form_id, slug = %definition.slug, "Inserted form definition row");

        let mut fields = Vec::with_capacity(definition.fields.len());
        for field in &definition.fields {
            let options = field
                .options
                .as_ref()
                .map(serde_json::to_string)
                .transpose()?;

            let result = sqlx::query(
                r#"
                INSERT INTO form_fields (form_id, label, field_type, required, sort_order, options)
                VALUES (?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(form_id)
            .bind(&field.label)
            .bind(field.field_type.as_str())
            .bind(field.required)
            .bind(i64::from(field.order))
            .bind(options)
            .execute(&mut *tx)
            .await?;

            fields.push(FieldDefinition {
                id: result.last_insert_rowid(),
                ..field.clone()
            });
        }

        tx.commit().await?;

        fields.sort_by_key(|f| f.order);
        Ok(FormDefinition {
            id: form_id,
            title: definition.title.clone(),
            slug: definition.slug.clone(),
            fields,
            created_at,
            response_count: 0,
        })
    }

    /// Returns all definitions, newest first.
    pub async fn all(&self) -> Result<Vec<FormDefinition>> {
        let sql = format!("{SELECT_FORMS_SQL} ORDER BY f.created_at DESC, f.id DESC");
        let rows: Vec<FormRow> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;

        let field_rows: Vec<FieldRow> =
            sqlx::query_as(&format!("{SELECT_FIELDS_SQL} ORDER BY form_id, sort_order"))
                .fetch_all(&self.pool)
                .await?;

        let mut fields_by_form: HashMap<i64, Vec<FieldDefinition>> = HashMap::new();
        for row in field_rows {
            let form_id = row.1;
            fields_by_form
                .entry(form_id)
                .or_default()
                .push(field_from_row(row)?);
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let fields = fields_by_form.remove(&row.0).unwrap_or_default();
                form_from_row(row, fields)
            })
            .collect())
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation())
}

fn form_from_row(row: FormRow, fields: Vec<FieldDefinition>) -> FormDefinition {
    let (id, title, slug, created_at, response_count) = row;
    FormDefinition {
        id,
        title,
        slug,
        fields,
        created_at,
        response_count,
    }
}

fn field_from_row(row: FieldRow) -> Result<FieldDefinition> {
    let (id, _form_id, label, field_type, required, sort_order, options) = row;
    let field_type = FieldType::parse(&field_type)
        .ok_or(SqliteStoreError::UnknownFieldType(field_type))?;
    let order = u32::try_from(sort_order).map_err(|_| SqliteStoreError::InvalidOrder(sort_order))?;
    let options = options
        .as_deref()
        .map(serde_json::from_str::<Vec<String>>)
        .transpose()?;

    Ok(FieldDefinition {
        id,
        label,
        field_type,
        required,
        order,
        options,
    })
}

impl FormStore for SqliteFormStore {
    fn find_by_slug<'a>(
        &'a self,
        slug: &'a str,
    ) -> BoxFuture<'a, StoreResult<Option<FormDefinition>>> {
        Box::pin(async move { Ok(self.get_by_slug(slug).await?) })
    }

    fn create_with_fields<'a>(
        &'a self,
        definition: &'a FormDefinition,
    ) -> BoxFuture<'a, StoreResult<FormDefinition>> {
        Box::pin(async move { Ok(self.insert(definition).await?) })
    }

    fn list_all(&self) -> BoxFuture<'_, StoreResult<Vec<FormDefinition>>> {
        Box::pin(async move { Ok(self.all().await?) })
    }
}
