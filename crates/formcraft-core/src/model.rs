//! Form definition types.
//!
//! [`NewForm`] and [`FieldSpec`] are what a client submits; they are raw and
//! unvalidated. [`FormDefinition`] and [`FieldDefinition`] are the canonical
//! shapes handed to and returned from storage.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// The kind of input a field renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldType {
    /// Single-line text.
    Text,
    /// Multi-line text.
    Textarea,
    /// Numeric input.
    Number,
    /// Email address.
    Email,
    /// Exactly one of a list of options.
    Radio,
    /// Any number of a list of options.
    Checkbox,
}

impl FieldType {
    /// All recognized field types.
    pub const ALL: [Self; 6] = [
        Self::Text,
        Self::Textarea,
        Self::Number,
        Self::Email,
        Self::Radio,
        Self::Checkbox,
    ];

    /// Parses a field type from its wire name (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "TEXT" => Some(Self::Text),
            "TEXTAREA" => Some(Self::Textarea),
            "NUMBER" => Some(Self::Number),
            "EMAIL" => Some(Self::Email),
            "RADIO" => Some(Self::Radio),
            "CHECKBOX" => Some(Self::Checkbox),
            _ => None,
        }
    }

    /// Returns the wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "TEXT",
            Self::Textarea => "TEXTAREA",
            Self::Number => "NUMBER",
            Self::Email => "EMAIL",
            Self::Radio => "RADIO",
            Self::Checkbox => "CHECKBOX",
        }
    }

    /// Returns whether fields of this type carry an options list.
    pub fn has_options(&self) -> bool {
        matches!(self, Self::Radio | Self::Checkbox)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| s.to_string())
    }
}

/// A field as submitted by a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Field label.
    #[serde(default)]
    pub label: String,
    /// Raw type name, validated against [`FieldType`].
    #[serde(rename = "type", default, deserialize_with = "lenient_type")]
    pub field_type: String,
    /// Whether the field is required.
    #[serde(default)]
    pub required: bool,
    /// Client bookkeeping; replaced by the field's position on create.
    #[serde(default, deserialize_with = "lenient_order")]
    pub order: i64,
    /// Choice list for RADIO and CHECKBOX fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

/// Keeps strings as-is and renders any other value as JSON text, so an
/// unusable type surfaces as a validation error rather than a parse error.
fn lenient_type<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// Accepts any JSON value; anything but an in-range integer becomes 0.
fn lenient_order<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)?.as_i64().unwrap_or(0))
}

impl FieldSpec {
    /// Creates a field spec of the given type with no options.
    pub fn new(label: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            field_type: field_type.into(),
            required: false,
            order: 0,
            options: None,
        }
    }

    /// Marks the field as required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets the client-supplied order value.
    #[must_use]
    pub fn order(mut self, order: i64) -> Self {
        self.order = order;
        self
    }

    /// Sets the options list.
    #[must_use]
    pub fn options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = Some(options.into_iter().map(Into::into).collect());
        self
    }
}

/// A form definition as submitted by a client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewForm {
    /// Form title.
    #[serde(default)]
    pub title: String,
    /// Explicit slug; derived from the title when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    /// Fields in display order.
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
}

impl NewForm {
    /// Creates an input with a title and no fields.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            slug: None,
            fields: Vec::new(),
        }
    }

    /// Sets an explicit slug.
    #[must_use]
    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    /// Appends a field.
    #[must_use]
    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }
}

/// A validated field belonging to one form definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Storage identifier; `0` until persisted.
    pub id: i64,
    /// Field label.
    pub label: String,
    /// Field type.
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Whether the field is required.
    pub required: bool,
    /// Position within the form, starting at 0.
    pub order: u32,
    /// Choice list; `Some` exactly when the type has options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

/// A form schema: title, slug and ordered fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormDefinition {
    /// Storage identifier; `0` until persisted.
    pub id: i64,
    /// Trimmed, non-empty title.
    pub title: String,
    /// Globally unique URL-safe identifier.
    pub slug: String,
    /// Fields ordered by `order`.
    pub fields: Vec<FieldDefinition>,
    /// Creation time, set by storage.
    pub created_at: DateTime<Utc>,
    /// Number of responses stored against this form.
    #[serde(default)]
    pub response_count: i64,
}

impl FormDefinition {
    /// Returns whether this definition has been persisted.
    pub fn is_saved(&self) -> bool {
        self.id != 0
    }

    /// Sorts fields by `order` ascending.
    pub fn sort_fields(&mut self) {
        self.fields.sort_by_key(|f| f.order);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_type_parsing() {
        assert_eq!(FieldType::parse("TEXT"), Some(FieldType::Text));
        assert_eq!(FieldType::parse("checkbox"), Some(FieldType::Checkbox));
        assert_eq!(FieldType::parse(" Radio "), Some(FieldType::Radio));
        assert_eq!(FieldType::parse("DATE"), None);
        assert_eq!("EMAIL".parse::<FieldType>(), Ok(FieldType::Email));
        assert_eq!("SELECT".parse::<FieldType>(), Err("SELECT".to_string()));
    }

    #[test]
    fn test_field_spec_tolerates_odd_values() {
        let fields: Vec<FieldSpec> = serde_json::from_str(
            r#"[
                {"label": "A", "type": "TEXT", "order": 1.5},
                {"label": "B", "type": "TEXT", "order": null},
                {"label": "C", "type": "TEXT", "order": "3"},
                {"label": "D", "type": "TEXT", "order": 1e30},
                {"label": "E"},
                {"label": "F", "type": 5},
                {"label": "G", "type": null}
            ]"#,
        )
        .unwrap();

        let orders: Vec<i64> = fields.iter().map(|f| f.order).collect();
        assert_eq!(orders, [0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(fields[4].field_type, "");
        assert_eq!(fields[5].field_type, "5");
        assert_eq!(fields[6].field_type, "");
        assert_eq!(FieldType::parse(&fields[5].field_type), None);
    }

    #[test]
    fn test_field_type_round_trips_names() {
        for ty in FieldType::ALL {
            assert_eq!(FieldType::parse(ty.as_str()), Some(ty));
        }
        assert!(FieldType::Radio.has_options());
        assert!(FieldType::Checkbox.has_options());
        assert!(!FieldType::Textarea.has_options());
    }

    #[test]
    fn test_new_form_from_json() {
        let json = r#"{
            "title": "Survey",
            "fields": [
                {"label": "Name", "type": "TEXT", "required": true, "order": 7},
                {"label": "Color", "type": "RADIO", "options": ["Red", ""]}
            ]
        }"#;
        let form: NewForm = serde_json::from_str(json).unwrap();
        assert_eq!(form.title, "Survey");
        assert_eq!(form.slug, None);
        assert_eq!(form.fields.len(), 2);
        assert_eq!(form.fields[0].order, 7);
        assert!(form.fields[0].required);
        assert_eq!(
            form.fields[1].options,
            Some(vec!["Red".to_string(), String::new()])
        );
    }

    #[test]
    fn test_field_definition_serializes_type_name() {
        let field = FieldDefinition {
            id: 3,
            label: "Email".to_string(),
            field_type: FieldType::Email,
            required: false,
            order: 0,
            options: None,
        };
        let value = serde_json::to_value(&field).unwrap();
        assert_eq!(value["type"], "EMAIL");
        assert!(value.get("options").is_none());
    }
}
