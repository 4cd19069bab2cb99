//! Bootstrap 5 widgets.

use super::{html_escape, Widget, WidgetAttrs};

fn element_id(name: &str, attrs: &WidgetAttrs) -> String {
    attrs
        .get("id")
        .map(str::to_string)
        .unwrap_or_else(|| format!("id_{name}"))
}

fn class_with(base: &str, attrs: &WidgetAttrs) -> String {
    match attrs.get("class") {
        Some(extra) => format!("{base} {}", html_escape(extra)),
        None => base.to_string(),
    }
}

/// A single-line `<input>` of type text, email or number.
#[derive(Debug, Clone)]
pub struct BootstrapInput {
    /// The HTML input type.
    pub input_type: String,
}

impl BootstrapInput {
    /// Creates an input of the given HTML type.
    pub fn new(input_type: impl Into<String>) -> Self {
        Self {
            input_type: input_type.into(),
        }
    }
}

impl Widget for BootstrapInput {
    fn render(&self, name: &str, attrs: &WidgetAttrs) -> String {
        let id = element_id(name, attrs);
        let class = class_with("form-control", attrs);
        let extra_attrs = attrs.to_html_except(&["class", "id"]);

        format!(
            r#"<input type="{}" class="{}" id="{}" name="{}"{extra_attrs}>"#,
            self.input_type,
            class,
            html_escape(&id),
            html_escape(name)
        )
    }

    fn input_type(&self) -> &str {
        &self.input_type
    }
}

/// A multi-line `<textarea>`.
#[derive(Debug, Clone)]
pub struct BootstrapTextarea {
    /// Number of rows.
    pub rows: usize,
}

impl Default for BootstrapTextarea {
    fn default() -> Self {
        Self { rows: 4 }
    }
}

impl Widget for BootstrapTextarea {
    fn render(&self, name: &str, attrs: &WidgetAttrs) -> String {
        let id = element_id(name, attrs);
        let class = class_with("form-control", attrs);
        let extra_attrs = attrs.to_html_except(&["class", "id"]);

        format!(
            r#"<textarea class="{}" id="{}" name="{}" rows="{}"{extra_attrs}></textarea>"#,
            class,
            html_escape(&id),
            html_escape(name),
            self.rows
        )
    }

    fn input_type(&self) -> &str {
        "textarea"
    }
}

/// Renders one `form-check` block per option for radio and checkbox groups.
fn render_choices(
    input_type: &str,
    name: &str,
    options: &[String],
    attrs: &WidgetAttrs,
    required_on_first: bool,
) -> String {
    let base_id = element_id(name, attrs);
    let mut html = String::new();

    for (i, option) in options.iter().enumerate() {
        let id = html_escape(&format!("{base_id}_{i}"));
        let required_attr = if required_on_first && i == 0 {
            " required"
        } else {
            ""
        };
        let value = html_escape(option);

        html.push_str(&format!(
            r#"<div class="form-check">
  <input class="form-check-input" type="{input_type}" id="{id}" name="{}" value="{value}"{required_attr}>
  <label class="form-check-label" for="{id}">{value}</label>
</div>
"#,
            html_escape(name)
        ));
    }

    html
}

/// A radio group, one input per option.
///
/// When the field is required only the first option carries `required`;
/// browsers apply it to the whole same-named group.
#[derive(Debug, Clone, Default)]
pub struct BootstrapRadioGroup {
    /// Option labels, also used as values.
    pub options: Vec<String>,
}

impl BootstrapRadioGroup {
    /// Creates a radio group over the given options.
    pub fn new(options: Vec<String>) -> Self {
        Self { options }
    }
}

impl Widget for BootstrapRadioGroup {
    fn render(&self, name: &str, attrs: &WidgetAttrs) -> String {
        let required = attrs.get("required").is_some();
        render_choices("radio", name, &self.options, attrs, required)
    }

    fn input_type(&self) -> &str {
        "radio"
    }
}

/// A checkbox group, one input per option.
///
/// No checkbox carries `required`: HTML cannot express "at least one of".
#[derive(Debug, Clone, Default)]
pub struct BootstrapCheckboxGroup {
    /// Option labels, also used as values.
    pub options: Vec<String>,
}

impl BootstrapCheckboxGroup {
    /// Creates a checkbox group over the given options.
    pub fn new(options: Vec<String>) -> Self {
        Self { options }
    }
}

impl Widget for BootstrapCheckboxGroup {
    fn render(&self, name: &str, attrs: &WidgetAttrs) -> String {
        render_choices("checkbox", name, &self.options, attrs, false)
    }

    fn input_type(&self) -> &str {
        "checkbox"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn required() -> WidgetAttrs {
        WidgetAttrs::new().with("required", "required")
    }

    #[test]
    fn test_input_render() {
        let html = BootstrapInput::new("email").render("field_3", &required());
        assert!(html.contains(r#"type="email""#));
        assert!(html.contains(r#"class="form-control""#));
        assert!(html.contains(r#"id="id_field_3""#));
        assert!(html.contains(r#"name="field_3""#));
        assert!(html.contains(r#"required="required""#));
    }

    #[test]
    fn test_input_extra_class() {
        let attrs = WidgetAttrs::new().with("class", "is-invalid");
        let html = BootstrapInput::new("text").render("field_1", &attrs);
        assert!(html.contains(r#"class="form-control is-invalid""#));
    }

    #[test]
    fn test_textarea_render() {
        let html = BootstrapTextarea::default().render("field_2", &WidgetAttrs::new());
        assert!(html.starts_with("<textarea"));
        assert!(html.contains(r#"rows="4""#));
        assert!(html.ends_with("></textarea>"));
        assert!(!html.contains("required"));
    }

    #[test]
    fn test_radio_required_only_on_first_option() {
        let widget = BootstrapRadioGroup::new(vec!["Yes".into(), "No".into(), "Maybe".into()]);
        let html = widget.render("field_5", &required());

        assert_eq!(html.matches(r#"type="radio""#).count(), 3);
        assert_eq!(html.matches(" required").count(), 1);
        let first = html.find(r#"value="Yes" required"#);
        assert!(first.is_some());
        assert!(html.contains(r#"id="id_field_5_2""#));
    }

    #[test]
    fn test_radio_not_required() {
        let widget = BootstrapRadioGroup::new(vec!["Yes".into(), "No".into()]);
        let html = widget.render("field_5", &WidgetAttrs::new());
        assert!(!html.contains("required"));
    }

    #[test]
    fn test_checkbox_never_required() {
        let widget = BootstrapCheckboxGroup::new(vec!["Red".into(), "Blue".into()]);
        let html = widget.render("field_6", &required());
        assert_eq!(html.matches(r#"type="checkbox""#).count(), 2);
        assert!(!html.contains("required"));
    }

    #[test]
    fn test_choice_values_escaped() {
        let widget = BootstrapRadioGroup::new(vec!["<b>bold</b>".into()]);
        let html = widget.render("field_7", &WidgetAttrs::new());
        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt;"));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn test_empty_choice_group() {
        let widget = BootstrapCheckboxGroup::new(Vec::new());
        assert_eq!(widget.render("field_8", &WidgetAttrs::new()), "");
    }
}
