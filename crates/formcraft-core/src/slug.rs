//! URL-safe identifiers derived from form titles.

use std::sync::LazyLock;

use regex::Regex;

static NON_ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("static slug pattern"));

/// Derives a slug from a title.
///
/// The title is lower-cased, every run of characters outside `[a-z0-9]`
/// becomes a single `-`, and a leading or trailing `-` is stripped.
/// Uniqueness is not checked here.
///
/// A title without any ASCII alphanumeric character yields an empty string.
///
/// # Example
///
/// ```
/// use formcraft_core::slug;
///
/// assert_eq!(slug::generate("Customer Feedback!!!"), "customer-feedback");
/// assert_eq!(slug::generate("数字"), "");
/// ```
pub fn generate(title: &str) -> String {
    let lowered = title.to_lowercase();
    let replaced = NON_ALPHANUMERIC.replace_all(&lowered, "-");
    replaced.trim_matches('-').to_string()
}

/// Returns whether `slug` is non-empty and already in generated form.
pub fn is_valid(slug: &str) -> bool {
    !slug.is_empty() && generate(slug) == slug
}
