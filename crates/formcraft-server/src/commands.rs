//! Helpers for the command-line tool.

use std::fmt::Write;

use formcraft_core::{FormDefinition, NewForm};

/// Parses a `NewForm` JSON document.
pub fn parse_new_form(json: &str) -> serde_json::Result<NewForm> {
    serde_json::from_str(json)
}

/// Formats definitions as a plain-text table, one row per form.
pub fn format_listing(definitions: &[FormDefinition]) -> String {
    if definitions.is_empty() {
        return "No forms defined.\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<28} {:<32} {:>6} {:>9}  {}",
        "SLUG", "TITLE", "FIELDS", "RESPONSES", "CREATED"
    );
    let _ = writeln!(out, "{:-<100}", "");
    for definition in definitions {
        let _ = writeln!(
            out,
            "{:<28} {:<32} {:>6} {:>9}  {}",
            definition.slug,
            definition.title,
            definition.fields.len(),
            definition.response_count,
            definition.created_at.format("%Y-%m-%d %H:%M")
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use formcraft_core::{normalize, FieldSpec};

    use super::*;

    #[test]
    fn test_parse_new_form() {
        let input = parse_new_form(
            r#"{"title": "Signup", "fields": [{"label": "Email", "type": "EMAIL", "required": true}]}"#,
        )
        .unwrap();
        assert_eq!(input.title, "Signup");
        assert_eq!(input.slug, None);
        assert_eq!(input.fields[0], FieldSpec::new("Email", "EMAIL").required());

        assert!(parse_new_form("[]").is_err());
    }

    #[test]
    fn test_format_listing() {
        let mut definition =
            normalize(&NewForm::new("Signup").field(FieldSpec::new("Email", "EMAIL"))).unwrap();
        definition.response_count = 4;

        let out = format_listing(&[definition]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("SLUG"));
        assert!(lines[2].starts_with("signup"));
        assert!(lines[2].contains("Signup"));
        assert!(lines[2].contains(" 1 "));
        assert!(lines[2].contains(" 4 "));
    }

    #[test]
    fn test_format_empty_listing() {
        assert_eq!(format_listing(&[]), "No forms defined.\n");
    }
}
