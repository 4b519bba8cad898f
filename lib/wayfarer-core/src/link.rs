//! Link relations resolved from a hypermedia document.

use serde::{Deserialize, Serialize};

/// Suffix appended to a relation name to locate its documentation link.
///
/// A resource advertising `orders` may also advertise `orders-doc` pointing
/// at a human-readable description of the relation.
pub const DOC_SUFFIX: &str = "-doc";

/// Documentation relation name for `rel`.
#[must_use]
pub fn doc_rel(rel: &str) -> String {
    format!("{rel}{DOC_SUFFIX}")
}

fn default_method() -> String {
    "GET".to_owned()
}

/// One invocable transition from a resource: an href plus an HTTP method.
///
/// Both fields are opaque strings taken verbatim from the wire document;
/// this layer neither validates nor normalizes them. A missing `method`
/// defaults to `GET`. Links are immutable once resolved and each resource
/// owns its own copies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    href: String,
    #[serde(default = "default_method")]
    method: String,
}

impl Link {
    /// Create a link with an explicit method.
    #[must_use]
    pub fn new(href: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            method: method.into(),
        }
    }

    /// Create a GET link.
    #[must_use]
    pub fn get(href: impl Into<String>) -> Self {
        Self::new(href, "GET")
    }

    /// Target href, as advertised by the server.
    #[must_use]
    pub fn href(&self) -> &str {
        &self.href
    }

    /// HTTP method to invoke the link with.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }
}

/// A [`Link`] together with its relation name.
///
/// Produced only when enumerating all of a resource's links; never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkInfo {
    rel: String,
    href: String,
    method: String,
}

impl LinkInfo {
    /// Create a link projection for the given relation.
    #[must_use]
    pub fn new(rel: impl Into<String>, link: &Link) -> Self {
        Self {
            rel: rel.into(),
            href: link.href.clone(),
            method: link.method.clone(),
        }
    }

    /// Relation name.
    #[must_use]
    pub fn rel(&self) -> &str {
        &self.rel
    }

    /// Target href.
    #[must_use]
    pub fn href(&self) -> &str {
        &self.href
    }

    /// HTTP method.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }
}
