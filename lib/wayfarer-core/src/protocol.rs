//! Response classification.
//!
//! Turns a raw transport [`Response`] into either a parsed hypermedia
//! document or a typed failure. The rules:
//!
//! - A successful response must carry the HAL media type; its body is then
//!   parsed as JSON. Any other content type on a success is fatal.
//! - A successful response with no `Content-Type` header at all yields an
//!   empty document (no links, no embeds) instead of failing, so bodies
//!   without hypermedia metadata can still be consumed.
//! - A failed response is classified: if its body parses as JSON (HAL or
//!   generic JSON media type) and contains a `message` field, it becomes a
//!   structured [`ServerError`]; everything else becomes a generic
//!   [`Error::Http`] carrying only status code and status text.
//!
//! Media types are matched by case-sensitive prefix on the header value, so
//! parameters like `; charset=utf-8` are tolerated.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use crate::{Error, Response, Result, ServerError};

/// Media type of hypermedia documents. Required on successful responses.
pub const HAL_MEDIA_TYPE: &str = "application/hal+json";

/// Generic JSON media type. Accepted for error bodies only.
pub const JSON_MEDIA_TYPE: &str = "application/json";

const CONTENT_TYPE: &str = "Content-Type";

/// Wire shape of a structured server error body.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
    #[serde(default)]
    errors: Option<HashMap<String, String>>,
}

/// Parse a response into a hypermedia document.
///
/// On success returns the parsed JSON document ([`Value::Null`] for an empty
/// body or a body without a content type). A failed response is classified
/// with [`classify_error`] and returned as `Err`.
///
/// # Errors
///
/// Returns [`Error::UnsupportedContentType`] when a successful response does
/// not carry the HAL media type, a JSON error when the body is malformed,
/// or the classified failure for a non-success status.
pub fn parse_document(response: &Response) -> Result<Value> {
    if !response.is_success() {
        return Err(classify_error(response));
    }
    match response.header(CONTENT_TYPE) {
        // No content type means no hypermedia metadata; synthesize an empty
        // document rather than failing.
        None => Ok(Value::Null),
        Some(content_type) if content_type.starts_with(HAL_MEDIA_TYPE) => {
            parse_json_body(response.body())
        }
        Some(content_type) => Err(Error::unsupported_content_type(content_type)),
    }
}

/// Classify a failed response.
///
/// Emits a structured [`ServerError`] when the body parses as JSON and
/// carries a `message` field, and a generic [`Error::Http`] otherwise.
/// An unparseable or unsupported failure body never surfaces a parse error;
/// the failure itself takes precedence.
#[must_use]
pub fn classify_error(response: &Response) -> Error {
    let status = response.status();

    let parseable = response
        .header(CONTENT_TYPE)
        .is_some_and(|ct| ct.starts_with(HAL_MEDIA_TYPE) || ct.starts_with(JSON_MEDIA_TYPE));

    if parseable {
        if let Ok(document) = parse_json_body(response.body()) {
            if let Ok(body) = serde_json::from_value::<ErrorBody>(document) {
                return ServerError::new(status, body.message, body.errors).into();
            }
        }
    }

    Error::http(status, response.status_text())
}

/// Parse body bytes as JSON. An empty body parses to [`Value::Null`].
fn parse_json_body(body: &[u8]) -> Result<Value> {
    if body.is_empty() {
        return Ok(Value::Null);
    }
    crate::from_json(body)
}
