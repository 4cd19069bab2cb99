//! Mutable edit buffer for composing a form before submission.

use crate::model::{FieldSpec, FieldType, NewForm};

/// An editable, ordered list of fields that becomes a [`NewForm`] on submit.
///
/// Every field's `order` tracks its position; removing a field re-indexes
/// the ones after it. Index arguments that are out of range are ignored and
/// reported through the return value.
///
/// # Example
///
/// ```
/// use formcraft_core::{FieldType, FormBuilder};
///
/// let mut builder = FormBuilder::new("Event signup");
/// let name = builder.add_field(FieldType::Text);
/// builder.set_label(name, "Name");
/// builder.set_required(name, true);
///
/// let meal = builder.add_field(FieldType::Radio);
/// builder.set_label(meal, "Meal");
/// builder.add_option(meal, "Vegetarian");
/// builder.add_option(meal, "Vegan");
///
/// let form = builder.build();
/// assert_eq!(form.fields.len(), 2);
/// assert_eq!(form.fields[1].options.as_deref().map(<[String]>::len), Some(2));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormBuilder {
    title: String,
    slug: Option<String>,
    fields: Vec<FieldSpec>,
}

impl FormBuilder {
    /// Creates an empty buffer with a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            slug: None,
            fields: Vec::new(),
        }
    }

    /// Returns the current title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Replaces the title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Sets or clears an explicit slug.
    pub fn set_slug(&mut self, slug: Option<String>) {
        self.slug = slug;
    }

    /// Returns the fields in order.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Appends an unlabeled field and returns its index.
    ///
    /// Choice types start with an empty options list.
    pub fn add_field(&mut self, field_type: FieldType) -> usize {
        let index = self.fields.len();
        let mut spec = FieldSpec::new("", field_type.as_str()).order(position(index));
        if field_type.has_options() {
            spec.options = Some(Vec::new());
        }
        self.fields.push(spec);
        index
    }

    /// Sets a field's label.
    pub fn set_label(&mut self, index: usize, label: impl Into<String>) -> bool {
        match self.fields.get_mut(index) {
            Some(field) => {
                field.label = label.into();
                true
            }
            None => false,
        }
    }

    /// Sets a field's required flag.
    pub fn set_required(&mut self, index: usize, required: bool) -> bool {
        match self.fields.get_mut(index) {
            Some(field) => {
                field.required = required;
                true
            }
            None => false,
        }
    }

    /// Changes a field's type.
    ///
    /// Switching to a choice type keeps any existing options (or starts an
    /// empty list); switching away drops them.
    pub fn set_type(&mut self, index: usize, field_type: FieldType) -> bool {
        let Some(field) = self.fields.get_mut(index) else {
            return false;
        };
        field.field_type = field_type.as_str().to_string();
        if field_type.has_options() {
            field.options.get_or_insert_with(Vec::new);
        } else {
            field.options = None;
        }
        true
    }

    /// Removes a field and re-indexes the remaining ones.
    pub fn remove_field(&mut self, index: usize) -> Option<FieldSpec> {
        if index >= self.fields.len() {
            return None;
        }
        let removed = self.fields.remove(index);
        for (i, field) in self.fields.iter_mut().enumerate().skip(index) {
            field.order = position(i);
        }
        Some(removed)
    }

    /// Appends an option to a choice field and returns its index.
    ///
    /// Returns `None` if the field does not exist or carries no options.
    pub fn add_option(&mut self, index: usize, value: impl Into<String>) -> Option<usize> {
        let options = self.fields.get_mut(index)?.options.as_mut()?;
        options.push(value.into());
        Some(options.len() - 1)
    }

    /// Replaces an option's text.
    pub fn update_option(&mut self, index: usize, option: usize, value: impl Into<String>) -> bool {
        let slot = self
            .fields
            .get_mut(index)
            .and_then(|f| f.options.as_mut())
            .and_then(|opts| opts.get_mut(option));
        match slot {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    /// Removes an option from a choice field.
    pub fn remove_option(&mut self, index: usize, option: usize) -> Option<String> {
        let options = self.fields.get_mut(index)?.options.as_mut()?;
        (option < options.len()).then(|| options.remove(option))
    }

    /// Materializes the buffer into a submission.
    pub fn build(self) -> NewForm {
        NewForm {
            title: self.title,
            slug: self.slug,
            fields: self.fields,
        }
    }
}

fn position(index: usize) -> i64 {
    i64::try_from(index).unwrap_or(i64::MAX)
}
