//! HTTP response type.

use std::collections::HashMap;

use serde::Serialize;

const CONTENT_TYPE: &str = "Content-Type";

/// An HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: HashMap<String, String>,
    /// Response body.
    pub body: Vec<u8>,
}

/// JSON body of an error response.
#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: &'a str,
}

impl Response {
    /// Creates a new response with the given status.
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: Vec::new(),
        }
    }

    /// Creates a 200 OK response.
    pub fn ok() -> Self {
        Self::new(200)
    }

    /// Creates a response with HTML content.
    pub fn html(body: impl Into<String>) -> Self {
        Self::ok()
            .header(CONTENT_TYPE, "text/html; charset=utf-8")
            .body(body.into())
    }

    /// Creates a response with plain text content.
    pub fn text(body: impl Into<String>) -> Self {
        Self::ok()
            .header(CONTENT_TYPE, "text/plain; charset=utf-8")
            .body(body.into())
    }

    /// Creates a 200 response with JSON content.
    pub fn json<T: Serialize>(data: &T) -> Self {
        Self::json_with_status(200, data)
    }

    /// Creates a 201 Created response with JSON content.
    pub fn created<T: Serialize>(data: &T) -> Self {
        Self::json_with_status(201, data)
    }

    /// Creates a JSON response with the given status.
    pub fn json_with_status<T: Serialize>(status: u16, data: &T) -> Self {
        match serde_json::to_vec(data) {
            Ok(body) => Self::new(status)
                .header(CONTENT_TYPE, "application/json")
                .body(body),
            Err(_) => Self::internal_server_error(),
        }
    }

    /// Creates a JSON error response `{"error": reason, "message": message}`.
    pub fn error(status: u16, reason: &str, message: &str) -> Self {
        Self::json_with_status(
            status,
            &ErrorBody {
                error: reason,
                message,
            },
        )
    }

    /// Creates a 404 Not Found response.
    pub fn not_found() -> Self {
        Self::new(404).body("Not Found")
    }

    /// Creates a 405 Method Not Allowed response.
    pub fn method_not_allowed() -> Self {
        Self::new(405).body("Method Not Allowed")
    }

    /// Creates a 413 Payload Too Large response.
    pub fn payload_too_large() -> Self {
        Self::error(413, "body-too-large", "request body exceeds the configured limit")
    }

    /// Creates a 500 Internal Server Error response.
    pub fn internal_server_error() -> Self {
        Self::new(500).body("Internal Server Error")
    }

    /// Sets a header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Sets the body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Returns the Content-Type header, if set.
    pub fn content_type(&self) -> Option<&str> {
        self.headers.get(CONTENT_TYPE).map(String::as_str)
    }

    /// Returns the body as a string.
    pub fn body_string(&self) -> Option<String> {
        String::from_utf8(self.body.clone()).ok()
    }

    /// Parses the body as JSON.
    pub fn body_json(&self) -> Option<serde_json::Value> {
        serde_json::from_slice(&self.body).ok()
    }

    /// Returns whether the status is 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

impl Default for Response {
    fn default() -> Self {
        Self::ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_html() {
        let res = Response::html("<h1>Hello</h1>");
        assert_eq!(res.status, 200);
        assert_eq!(res.content_type(), Some("text/html; charset=utf-8"));
        assert_eq!(res.body_string(), Some("<h1>Hello</h1>".to_string()));
    }

    #[test]
    fn test_response_created() {
        let res = Response::created(&serde_json::json!({"slug": "signup"}));
        assert_eq!(res.status, 201);
        assert!(res.is_success());
        assert_eq!(res.content_type(), Some("application/json"));
        assert_eq!(res.body_json().unwrap()["slug"], "signup");
    }

    #[test]
    fn test_response_error_body() {
        let res = Response::error(409, "slug-conflict", "slug already taken: signup");
        assert_eq!(res.status, 409);
        assert!(!res.is_success());
        let body = res.body_json().unwrap();
        assert_eq!(body["error"], "slug-conflict");
        assert_eq!(body["message"], "slug already taken: signup");
    }

    #[test]
    fn test_response_payload_too_large() {
        let res = Response::payload_too_large();
        assert_eq!(res.status, 413);
        assert_eq!(res.body_json().unwrap()["error"], "body-too-large");
    }

    #[test]
    fn test_response_builder() {
        let res = Response::ok().header("X-Custom", "value").body("Hello");

        assert_eq!(res.status, 200);
        assert_eq!(res.headers.get("X-Custom"), Some(&"value".to_string()));
        assert_eq!(res.body_string(), Some("Hello".to_string()));
    }
}
