//! HTTP request building.
//!
//! Use [`Request::builder`] to construct requests with headers and bodies.
//! The URL is an opaque href as advertised by the server; a transport may
//! resolve relative hrefs against its base URL. The method is likewise kept
//! as a plain string so extension methods pass through untouched.
//!
//! # Example
//!
//! ```
//! use wayfarer_core::Request;
//!
//! let request = Request::builder("GET", "/orders")
//!     .header("Accept", "application/hal+json")
//!     .build();
//! ```

use std::collections::HashMap;

use bytes::Bytes;

use crate::multipart::Form;

/// An HTTP request with method, URL, headers, and optional body.
#[derive(Debug, Clone)]
pub struct Request {
    method: String,
    url: String,
    headers: HashMap<String, String>,
    body: Option<Bytes>,
}

impl Request {
    /// Creates a new [`RequestBuilder`].
    #[must_use]
    pub fn builder(method: impl Into<String>, url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(method, url)
    }

    /// HTTP method.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Request URL (absolute, or an href relative to the transport base).
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Request headers.
    #[must_use]
    pub const fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Single header value by name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Request body.
    #[must_use]
    pub const fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Consume into (method, url, headers, body).
    #[must_use]
    pub fn into_parts(self) -> (String, String, HashMap<String, String>, Option<Bytes>) {
        (self.method, self.url, self.headers, self.body)
    }
}

/// Builder for constructing [`Request`] instances.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    method: String,
    url: String,
    headers: HashMap<String, String>,
    body: Option<Bytes>,
}

impl RequestBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Sets a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Sets the request body.
    #[must_use]
    pub fn body(mut self, body: Bytes) -> Self {
        self.body = Some(body);
        self
    }

    /// Set a JSON body with a `Content-Type: application/json` header.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn json<T: serde::Serialize + ?Sized>(self, value: &T) -> crate::Result<Self> {
        let body = crate::to_json(value)?;
        Ok(self.header("Content-Type", "application/json").body(body))
    }

    /// Set a multipart form body.
    ///
    /// The content type (including the form's boundary) is taken from the
    /// form itself.
    #[must_use]
    pub fn multipart(self, form: Form) -> Self {
        let (content_type, body) = form.into_body();
        self.header("Content-Type", content_type).body(body)
    }

    /// Builds the [`Request`].
    #[must_use]
    pub fn build(self) -> Request {
        Request {
            method: self.method,
            url: self.url,
            headers: self.headers,
            body: self.body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_builder_basic() {
        let request = Request::builder("GET", "/orders")
            .header("Accept", "application/hal+json")
            .build();

        assert_eq!(request.method(), "GET");
        assert_eq!(request.url(), "/orders");
        assert_eq!(request.header("Accept"), Some("application/hal+json"));
        assert!(request.body().is_none());
    }

    #[test]
    fn request_builder_json() {
        #[derive(serde::Serialize)]
        struct Order {
            reference: String,
        }

        let request = Request::builder("POST", "/orders")
            .json(&Order {
                reference: "A-42".to_string(),
            })
            .expect("json")
            .build();

        assert_eq!(request.header("Content-Type"), Some("application/json"));
        assert_eq!(
            request.body().expect("body").as_ref(),
            br#"{"reference":"A-42"}"#
        );
    }

    #[test]
    fn request_builder_multipart() {
        let form = Form::with_boundary("b42").text("field", "value");
        let request = Request::builder("POST", "/upload").multipart(form).build();

        assert_eq!(
            request.header("Content-Type"),
            Some("multipart/form-data; boundary=b42")
        );
        assert!(request.body().is_some());
    }

    #[test]
    fn request_method_is_opaque() {
        let request = Request::builder("purge", "/cache").build();
        assert_eq!(request.method(), "purge");
    }
}
