//! # formcraft-forms
//!
//! Bootstrap 5 HTML rendering for stored form definitions.
//!
//! Every field renders as a label plus one widget. Inputs are named
//! `field_{id}` after the field's stored id, so submissions can be mapped
//! back to the definition. Required fields get a ` *` label marker and the
//! `required` attribute; for radio groups only the first option carries it,
//! and checkbox groups never do.
//!
//! ```ignore
//! use formcraft_forms::render_page;
//!
//! let definition = manager.get_definition_by_slug("customer-feedback").await?;
//! let html = render_page(&definition, "/forms/customer-feedback");
//! ```

mod form;
pub mod widgets;

pub use form::{input_name, render_definition, render_field, render_page};
pub use widgets::{html_escape, widget_for, Widget, WidgetAttrs};
