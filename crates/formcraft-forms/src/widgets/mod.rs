//! Input widgets, one per field type.

mod bootstrap;

pub use bootstrap::{BootstrapCheckboxGroup, BootstrapInput, BootstrapRadioGroup, BootstrapTextarea};

use std::collections::BTreeMap;

use formcraft_core::FieldType;

/// Extra HTML attributes applied to a widget, rendered in key order.
#[derive(Debug, Clone, Default)]
pub struct WidgetAttrs {
    /// HTML attributes.
    pub attrs: BTreeMap<String, String>,
}

impl WidgetAttrs {
    /// Creates new empty widget attributes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an attribute.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attrs.insert(key.into(), value.into());
    }

    /// Gets an attribute.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    /// Builder method to set an attribute.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Renders the attributes except those in `skip`, each with a leading space.
    pub fn to_html_except(&self, skip: &[&str]) -> String {
        self.attrs
            .iter()
            .filter(|(k, _)| !skip.contains(&k.as_str()))
            .map(|(k, v)| format!(r#" {}="{}""#, html_escape(k), html_escape(v)))
            .collect()
    }
}

/// Renders the input markup for one field.
pub trait Widget: Send + Sync {
    /// Renders the widget; `name` becomes the `name` attribute.
    fn render(&self, name: &str, attrs: &WidgetAttrs) -> String;

    /// Returns the HTML input type.
    fn input_type(&self) -> &str;
}

/// Picks the widget for a field type. Choice types render one input per option.
pub fn widget_for(field_type: FieldType, options: &[String]) -> Box<dyn Widget> {
    match field_type {
        FieldType::Text => Box::new(BootstrapInput::new("text")),
        FieldType::Email => Box::new(BootstrapInput::new("email")),
        FieldType::Number => Box::new(BootstrapInput::new("number")),
        FieldType::Textarea => Box::new(BootstrapTextarea::default()),
        FieldType::Radio => Box::new(BootstrapRadioGroup::new(options.to_vec())),
        FieldType::Checkbox => Box::new(BootstrapCheckboxGroup::new(options.to_vec())),
    }
}

/// Escapes HTML special characters.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
