//! Rendering of stored form definitions as Bootstrap 5 HTML.

use formcraft_core::{FieldDefinition, FormDefinition};
use ironhtml::html;
use ironhtml::typed::Document;
use ironhtml_elements::{Body, Div, Head, Html, Link, Meta, Title, H1};

use crate::widgets::{widget_for, WidgetAttrs};

const BOOTSTRAP_CSS: &str = "https://cdn.jsdelivr.net/npm/bootstrap@5.3.2/dist/css/bootstrap.min.css";

/// Returns the `name` attribute of a field's input(s): `field_{id}`.
pub fn input_name(field: &FieldDefinition) -> String {
    format!("field_{}", field.id)
}

/// Renders one field: its label and widget inside a `mb-3` block.
pub fn render_field(field: &FieldDefinition) -> String {
    let name = input_name(field);
    let mut attrs = WidgetAttrs::new().with("id", format!("id_{name}"));
    if field.required {
        attrs.set("required", "required");
    }

    let options = field.options.as_deref().unwrap_or_default();
    let widget = widget_for(field.field_type, options);
    let widget_html = widget.render(&name, &attrs);

    // Choice groups point the label at their first input.
    let id = if field.field_type.has_options() {
        format!("id_{name}_0")
    } else {
        format!("id_{name}")
    };
    let required_marker = if field.required { " *" } else { "" };
    let label_text = format!("{}{}", field.label, required_marker);

    let label_el = html! {
        label.for_(#id).class("form-label") { #label_text }
    };

    html! { div.class("mb-3") }
        .raw(label_el.render())
        .raw(&widget_html)
        .render()
}

/// Renders a definition as a `<form>` posting to `action`.
///
/// Fields appear in ascending `order` regardless of the order of
/// `definition.fields`.
pub fn render_definition(definition: &FormDefinition, action: &str) -> String {
    let method = "post";
    let title = &definition.title;

    let mut fields: Vec<&FieldDefinition> = definition.fields.iter().collect();
    fields.sort_by_key(|f| f.order);

    let mut form = html! {
        form.action(#action).method(#method)
    };

    form = form.child::<H1, _>(|h| h.class("h3 mb-4").text(title));

    for field in fields {
        let field_html = render_field(field);
        form = form.child::<Div, _>(|d| d.raw(&field_html));
    }

    form = form.child::<Div, _>(|d| {
        let btn = html! {
            button.type_("submit").class("btn btn-primary") {
                "Submit"
            }
        };
        d.raw(btn.render())
    });

    form.render()
}

/// Renders a complete HTML document containing the form.
pub fn render_page(definition: &FormDefinition, action: &str) -> String {
    let form_html = render_definition(definition, action);
    let title = &definition.title;

    Document::new()
        .doctype()
        .root::<Html, _>(|html_el| {
            html_el
                .attr("lang", "en")
                .child::<Head, _>(|head| {
                    head.child::<Meta, _>(|m| m.attr("charset", "UTF-8"))
                        .child::<Meta, _>(|m| {
                            m.attr("name", "viewport")
                                .attr("content", "width=device-width, initial-scale=1.0")
                        })
                        .child::<Title, _>(|t| t.text(title))
                        .child::<Link, _>(|l| l.attr("href", BOOTSTRAP_CSS).attr("rel", "stylesheet"))
                })
                .child::<Body, _>(|body| {
                    body.child::<Div, _>(|d| d.class("container py-4").raw(&form_html))
                })
        })
        .build()
}
