//! Query-string composition for templated link invocations.

use crate::Result;

/// Rewrite an href's query string from the given arguments.
///
/// The composed query string **replaces** any query already present on the
/// href; keys are never merged. An empty argument set yields the href
/// without a query string at all. Key ordering in the result follows the
/// serializer and is otherwise unspecified.
///
/// # Errors
///
/// Returns an error if the arguments cannot be serialized as a query string
/// (e.g. nested structures).
///
/// # Example
///
/// ```
/// use wayfarer_core::query::compose;
/// use serde_json::json;
///
/// let href = compose("/orders?page=1", &json!({"state": "open"})).expect("compose");
/// assert_eq!(href, "/orders?state=open");
/// ```
pub fn compose<Q: serde::Serialize + ?Sized>(href: &str, query: &Q) -> Result<String> {
    let composed = crate::to_query_string(query)?;
    let base = href.split_once('?').map_or(href, |(path, _)| path);
    if composed.is_empty() {
        Ok(base.to_owned())
    } else {
        Ok(format!("{base}?{composed}"))
    }
}
