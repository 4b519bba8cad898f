//! HTTP response handling.
//!
//! [`Response`] is the transport-level view of one HTTP exchange: status,
//! status text, headers, and the raw body bytes. Header lookup is
//! case-insensitive since HTTP header names are.

use std::collections::HashMap;

use bytes::Bytes;

/// HTTP response with status, status text, headers, and body.
#[derive(Debug, Clone)]
pub struct Response {
    status: u16,
    status_text: String,
    headers: HashMap<String, String>,
    body: Bytes,
}

impl Response {
    /// Creates a new response.
    #[must_use]
    pub fn new(
        status: u16,
        status_text: impl Into<String>,
        headers: HashMap<String, String>,
        body: Bytes,
    ) -> Self {
        Self {
            status,
            status_text: status_text.into(),
            headers,
            body,
        }
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// HTTP status text (e.g. "Not Found").
    #[must_use]
    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    /// Response headers.
    #[must_use]
    pub const fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Single header value by name, matched case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Response body.
    #[must_use]
    pub const fn body(&self) -> &Bytes {
        &self.body
    }

    /// Consume into body.
    #[must_use]
    pub fn into_body(self) -> Bytes {
        self.body
    }

    /// Status is 2xx.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Status is 4xx.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.status >= 400 && self.status < 500
    }

    /// Status is 5xx.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        self.status >= 500 && self.status < 600
    }

    /// Deserialize the response body as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> crate::Result<T> {
        crate::from_json(&self.body)
    }

    /// Get the response body as text.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not valid UTF-8.
    pub fn text(&self) -> Result<String, std::string::FromUtf8Error> {
        String::from_utf8(self.body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(entries: &[(&str, &str)]) -> HashMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn response_basic() {
        let response = Response::new(
            200,
            "OK",
            headers(&[("content-type", "application/hal+json")]),
            Bytes::from(r#"{"id":1}"#),
        );

        assert_eq!(response.status(), 200);
        assert_eq!(response.status_text(), "OK");
        assert!(response.is_success());
        assert!(!response.is_client_error());
        assert!(!response.is_server_error());
    }

    #[test]
    fn response_header_lookup_ignores_case() {
        let response = Response::new(
            200,
            "OK",
            headers(&[("content-type", "application/hal+json")]),
            Bytes::new(),
        );

        assert_eq!(
            response.header("Content-Type"),
            Some("application/hal+json")
        );
        assert_eq!(
            response.header("CONTENT-TYPE"),
            Some("application/hal+json")
        );
        assert_eq!(response.header("x-missing"), None);
    }

    #[test]
    fn response_status_checks() {
        let response = Response::new(404, "Not Found", HashMap::new(), Bytes::new());
        assert!(response.is_client_error());

        let response = Response::new(500, "Internal Server Error", HashMap::new(), Bytes::new());
        assert!(response.is_server_error());
    }

    #[test]
    fn response_json() {
        #[derive(Debug, PartialEq, serde::Deserialize)]
        struct Order {
            id: u64,
        }

        let response = Response::new(200, "OK", HashMap::new(), Bytes::from(r#"{"id":7}"#));
        let order: Order = response.json().expect("deserialize");
        assert_eq!(order, Order { id: 7 });
    }

    #[test]
    fn response_text() {
        let response = Response::new(200, "OK", HashMap::new(), Bytes::from("Hello, World!"));
        assert_eq!(response.text().expect("text"), "Hello, World!");
    }
}
