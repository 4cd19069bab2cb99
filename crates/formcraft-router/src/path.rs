//! Path pattern matching.

use regex::Regex;

use crate::request::PathParams;

/// A compiled path pattern such as `/api/forms/{slug}`.
#[derive(Debug, Clone)]
pub struct PathPattern {
    regex: Regex,
    param_names: Vec<String>,
}

impl PathPattern {
    /// Parses a path pattern.
    ///
    /// Segments wrapped in braces capture one path segment under that name;
    /// everything else matches literally. A trailing slash is tolerated.
    ///
    /// ```
    /// use formcraft_router::PathPattern;
    ///
    /// let pattern = PathPattern::new("/forms/{slug}");
    /// let params = pattern.match_path("/forms/customer-feedback").unwrap();
    /// assert_eq!(params.get("slug"), Some("customer-feedback"));
    /// ```
    ///
    /// # Panics
    ///
    /// Never in practice: literal segments are escaped and parameters
    /// compile to a fixed group, so the generated regex is always valid.
    pub fn new(pattern: &str) -> Self {
        let mut param_names = Vec::new();
        let mut regex_str = String::from("^");

        for part in pattern.split('/').filter(|s| !s.is_empty()) {
            regex_str.push('/');
            match part.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                Some(name) => {
                    param_names.push(name.to_string());
                    regex_str.push_str("([^/]+)");
                }
                None => regex_str.push_str(&regex::escape(part)),
            }
        }

        regex_str.push_str("/?$");

        let regex = Regex::new(&regex_str).expect("escaped path pattern compiles");

        Self {
            regex,
            param_names,
        }
    }

    /// Matches a path, returning the captured parameters.
    pub fn match_path(&self, path: &str) -> Option<PathParams> {
        let caps = self.regex.captures(path)?;
        let mut params = PathParams::new();
        for (i, name) in self.param_names.iter().enumerate() {
            if let Some(value) = caps.get(i + 1) {
                params.insert(name.clone(), value.as_str());
            }
        }
        Some(params)
    }

    /// Returns the parameter names in order.
    pub fn param_names(&self) -> &[String] {
        &self.param_names
    }
}
