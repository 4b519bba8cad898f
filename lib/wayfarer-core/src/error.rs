//! Error types for wayfarer.

use std::collections::HashMap;

use derive_more::{Display, Error, From};

// ============================================================================
// Structured Server Error
// ============================================================================

/// A structured error reported by the server.
///
/// Servers signal recoverable failures with a JSON body shaped as
/// `{ "message": "...", "errors": { "<field>": "<reason>", ... } }`.
/// The presence of `message` is what distinguishes a structured error from a
/// plain failed response; the `errors` map is optional and carries per-field
/// validation messages keyed by exact field path.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("HTTP error {status}: {message}")]
pub struct ServerError {
    status: u16,
    message: String,
    errors: Option<HashMap<String, String>>,
}

impl ServerError {
    /// Create a structured server error.
    #[must_use]
    pub fn new(
        status: u16,
        message: impl Into<String>,
        errors: Option<HashMap<String, String>>,
    ) -> Self {
        Self {
            status,
            message: message.into(),
            errors,
        }
    }

    /// HTTP status code of the failed response.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Server-supplied error message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Validation message for a single field, if the server reported one.
    ///
    /// Returns `None` when the response carried no field errors at all, or
    /// when the given field is not present in the map. Never panics.
    #[must_use]
    pub fn validation_error(&self, field: &str) -> Option<&str> {
        self.errors
            .as_ref()
            .and_then(|errors| errors.get(field))
            .map(String::as_str)
    }

    /// Returns `true` if the server reported a validation message for `field`.
    #[must_use]
    pub fn has_validation_error(&self, field: &str) -> bool {
        self.validation_error(field).is_some()
    }

    /// All field-level validation messages, if any were reported.
    #[must_use]
    pub const fn validation_errors(&self) -> Option<&HashMap<String, String>> {
        self.errors.as_ref()
    }
}

// ============================================================================
// Error Type
// ============================================================================

/// Main error type for wayfarer operations.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// Structured server error (failed response with a recognizable body).
    #[display("{_0}")]
    #[from]
    Server(#[error(not(source))] ServerError),

    /// Any other non-success response: status code and status text only.
    #[display("HTTP error {status}: {status_text}")]
    #[from(skip)]
    Http {
        /// HTTP status code.
        status: u16,
        /// HTTP status text (e.g. "Not Found").
        status_text: String,
    },

    /// The requested link relation is not advertised by the resource.
    #[display("unknown link relation: {rel}")]
    #[from(skip)]
    UnknownRelation {
        /// The relation name that was looked up.
        rel: String,
    },

    /// A successful response carried a content type this client cannot parse.
    #[display("unsupported response content type: {content_type}")]
    #[from(skip)]
    UnsupportedContentType {
        /// The offending `Content-Type` header value.
        content_type: String,
    },

    /// JSON serialization error.
    #[display("JSON error: {_0}")]
    #[from]
    Json(serde_json::Error),

    /// JSON deserialization error with path context.
    #[display("JSON deserialization error at '{path}': {message}")]
    #[from(skip)]
    JsonDeserialization {
        /// JSON path to the error (e.g., "user.address.city").
        path: String,
        /// Error message.
        message: String,
    },

    /// Query string serialization error.
    #[display("query serialization error: {_0}")]
    #[from]
    QuerySerialization(serde_html_form::ser::Error),

    /// URL parsing error.
    #[display("invalid URL: {_0}")]
    #[from]
    InvalidUrl(url::ParseError),

    /// Invalid request configuration.
    #[display("invalid request: {_0}")]
    #[from(skip)]
    InvalidRequest(#[error(not(source))] String),

    /// Network/connection errors.
    #[display("connection error: {_0}")]
    #[from(skip)]
    Connection(#[error(not(source))] String),

    /// TLS/SSL errors.
    #[display("TLS error: {_0}")]
    #[from(skip)]
    Tls(#[error(not(source))] String),

    /// Request timeout.
    #[display("request timeout")]
    #[from(skip)]
    Timeout,
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a generic HTTP error from status code and status text.
    #[must_use]
    pub fn http(status: u16, status_text: impl Into<String>) -> Self {
        Self::Http {
            status,
            status_text: status_text.into(),
        }
    }

    /// Create an unknown-relation error.
    #[must_use]
    pub fn unknown_relation(rel: impl Into<String>) -> Self {
        Self::UnknownRelation { rel: rel.into() }
    }

    /// Create an unsupported-content-type error.
    #[must_use]
    pub fn unsupported_content_type(content_type: impl Into<String>) -> Self {
        Self::UnsupportedContentType {
            content_type: content_type.into(),
        }
    }

    /// Create a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create a TLS error.
    #[must_use]
    pub fn tls(message: impl Into<String>) -> Self {
        Self::Tls(message.into())
    }

    /// Create an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create a JSON deserialization error with path context.
    #[must_use]
    pub fn json_deserialization(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::JsonDeserialization {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Returns the HTTP status code if this error stems from a failed response.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Server(server) => Some(server.status()),
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the structured server error, if this is one.
    #[must_use]
    pub const fn as_server(&self) -> Option<&ServerError> {
        match self {
            Self::Server(server) => Some(server),
            _ => None,
        }
    }

    /// Returns `true` if this is a client error (4xx).
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.status().is_some_and(|s| (400..500).contains(&s))
    }

    /// Returns `true` if this is a server error (5xx).
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status().is_some_and(|s| (500..600).contains(&s))
    }

    /// Returns `true` if this is a 404 Not Found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Returns `true` if this is a timeout error.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }

    /// Returns `true` if this is a connection error.
    #[must_use]
    pub const fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}
