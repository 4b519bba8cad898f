//! Embedded resource collections.

use serde_json::Value;

use crate::{Resource, Result, Transport};

/// Lazily-materializing view over the embedded documents of one relation.
///
/// The wrapper itself is always constructible, even for a relation the
/// resource does not embed (the collection is then empty). Resources are
/// materialized only by [`Embedded::resources`], one fresh instance per raw
/// document on every call; nothing is memoized.
#[derive(Debug, Clone)]
pub struct Embedded<T> {
    rel: String,
    documents: Vec<Value>,
    transport: T,
}

impl<T: Transport> Embedded<T> {
    pub(crate) fn new(rel: impl Into<String>, documents: Vec<Value>, transport: T) -> Self {
        Self {
            rel: rel.into(),
            documents,
            transport,
        }
    }

    /// Relation name this collection was resolved under.
    #[must_use]
    pub fn rel(&self) -> &str {
        &self.rel
    }

    /// Number of embedded documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Returns `true` if the relation embeds no documents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// The raw embedded documents, in source order.
    #[must_use]
    pub fn documents(&self) -> &[Value] {
        &self.documents
    }

    /// Materialize one [`Resource`] per embedded document, in source order.
    ///
    /// Each call produces brand-new instances; callers holding resources
    /// from a previous call are unaffected.
    ///
    /// # Errors
    ///
    /// Returns an error if any document's envelope is malformed.
    pub fn resources(&self) -> Result<Vec<Resource<T>>> {
        self.documents
            .iter()
            .cloned()
            .map(|document| Resource::from_document(document, self.transport.clone()))
            .collect()
    }
}
