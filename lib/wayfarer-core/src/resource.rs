//! Hypermedia resources and link traversal.
//!
//! A [`Resource`] is the client-side view of one successfully parsed
//! hypermedia document: the domain payload with the envelope stripped, the
//! table of navigable links, and the embedded documents. Navigation
//! operations issue a new request through the injected [`Transport`] and
//! yield a brand-new resource; nothing is cached or shared across requests.
//!
//! # Example
//!
//! ```ignore
//! let root = Resource::load(transport, "/api").await?;
//! let orders = root.follow("orders").await?;
//! for order in orders.embed("items").resources()? {
//!     println!("{}", order.data());
//! }
//! ```

use std::collections::HashMap;

use serde_json::Value;

use crate::link::doc_rel;
use crate::protocol::{self, HAL_MEDIA_TYPE};
use crate::request::RequestBuilder;
use crate::{Embedded, Error, Link, LinkInfo, Request, Response, Result, Transport, multipart, query};

const ACCEPT: &str = "Accept";
const LINKS_KEY: &str = "_links";
const EMBEDDED_KEY: &str = "_embedded";

/// One hypermedia resource and its navigable surroundings.
///
/// Resources are transient and request-scoped: every navigation builds a new
/// instance from a new response, and two navigations to the same href yield
/// two independent instances. The link table and embedded map are fixed at
/// construction, so concurrent navigations from the same resource are safe.
#[derive(Debug, Clone)]
pub struct Resource<T> {
    data: Value,
    links: Option<HashMap<String, Link>>,
    embedded: Option<HashMap<String, Vec<Value>>>,
    transport: T,
}

impl<T: Transport> Resource<T> {
    // ========================================================================
    // Construction & entry points
    // ========================================================================

    /// Build a resource from a parsed hypermedia document.
    ///
    /// The `_links` and `_embedded` keys are split off into the link table
    /// and embedded map; the remaining fields form the domain payload. The
    /// document is consumed, so no caller can observe the envelope keys
    /// afterwards. A non-object document (including `null`) yields a
    /// resource with no links and no embeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the envelope entries are malformed.
    pub fn from_document(document: Value, transport: T) -> Result<Self> {
        let (data, links, embedded) = split_envelope(document)?;
        Ok(Self {
            data,
            links,
            embedded,
            transport,
        })
    }

    /// Fetch `href` and parse the response into a resource.
    ///
    /// This is the entry point for the API root; everything else is reached
    /// by following links.
    ///
    /// # Errors
    ///
    /// Returns the classified failure for a non-success response, or a parse
    /// failure for an unsupported or malformed success body.
    pub async fn load(transport: T, href: impl Into<String>) -> Result<Self> {
        let request = entry_request(href.into()).build();
        Self::traverse(transport, request).await
    }

    /// Fetch `href` and return the unparsed response.
    ///
    /// No classification happens: the response is handed back as-is, whatever
    /// its status or content type.
    ///
    /// # Errors
    ///
    /// Returns an error only if the exchange fails at the transport level.
    pub async fn load_raw(transport: T, href: impl Into<String>) -> Result<Response> {
        let request = entry_request(href.into()).build();
        transport.execute(request).await
    }

    async fn traverse(transport: T, request: Request) -> Result<Self> {
        let response = transport.execute(request).await?;
        let document = protocol::parse_document(&response)?;
        Self::from_document(document, transport)
    }

    // ========================================================================
    // Domain payload
    // ========================================================================

    /// The domain payload, envelope stripped.
    ///
    /// No defensive copy is made; repeated calls return the same value.
    #[must_use]
    pub const fn data(&self) -> &Value {
        &self.data
    }

    /// Consume the resource and return its domain payload.
    #[must_use]
    pub fn into_data(self) -> Value {
        self.data
    }

    /// Deserialize the domain payload into a typed value.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails.
    pub fn data_as<D: serde::de::DeserializeOwned>(&self) -> Result<D> {
        serde_json::from_value(self.data.clone()).map_err(Into::into)
    }

    // ========================================================================
    // Link table
    // ========================================================================

    /// Look up a link by relation name (exact string match).
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownRelation`] if the resource does not advertise
    /// the relation.
    pub fn link(&self, rel: &str) -> Result<&Link> {
        self.links
            .as_ref()
            .and_then(|links| links.get(rel))
            .ok_or_else(|| Error::unknown_relation(rel))
    }

    /// Returns `true` if the resource advertises the relation. Never fails.
    #[must_use]
    pub fn has_link(&self, rel: &str) -> bool {
        self.links
            .as_ref()
            .is_some_and(|links| links.contains_key(rel))
    }

    /// Returns `true` if the resource advertises a documentation link for
    /// the relation.
    #[must_use]
    pub fn has_doc(&self, rel: &str) -> bool {
        self.has_link(&doc_rel(rel))
    }

    /// Snapshot of every link the resource advertises, with its relation
    /// name. Eagerly materialized; order unspecified.
    #[must_use]
    pub fn links(&self) -> Vec<LinkInfo> {
        self.links
            .as_ref()
            .map(|links| {
                links
                    .iter()
                    .map(|(rel, link)| LinkInfo::new(rel, link))
                    .collect()
            })
            .unwrap_or_default()
    }

    // ========================================================================
    // Embedded resources
    // ========================================================================

    /// The embedded collection for a relation.
    ///
    /// Always returns a wrapper: a relation absent from the embedded map
    /// yields an empty collection, never a failure.
    #[must_use]
    pub fn embed(&self, rel: &str) -> Embedded<T> {
        let documents = self
            .embedded
            .as_ref()
            .and_then(|embedded| embedded.get(rel))
            .cloned()
            .unwrap_or_default();
        Embedded::new(rel, documents, self.transport.clone())
    }

    /// Returns `true` if the resource embeds documents under the relation.
    #[must_use]
    pub fn has_embed(&self, rel: &str) -> bool {
        self.embedded
            .as_ref()
            .is_some_and(|embedded| embedded.contains_key(rel))
    }

    /// One embedded collection per relation present in the embedded map.
    /// Order unspecified.
    #[must_use]
    pub fn embeds(&self) -> Vec<Embedded<T>> {
        self.embedded
            .as_ref()
            .map(|embedded| embedded.keys().map(|rel| self.embed(rel)).collect())
            .unwrap_or_default()
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Follow a link relation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownRelation`] for an unadvertised relation, or
    /// the classified failure of the resulting exchange.
    pub async fn follow(&self, rel: &str) -> Result<Self> {
        let request = self.link_request(rel)?.build();
        Self::traverse(self.transport.clone(), request).await
    }

    /// Follow a link relation, rewriting its query string from `query`.
    ///
    /// The composed query **replaces** any query already on the link's href.
    ///
    /// # Errors
    ///
    /// As [`Resource::follow`], plus query serialization failures.
    pub async fn follow_with_query<Q>(&self, rel: &str, query: &Q) -> Result<Self>
    where
        Q: serde::Serialize + ?Sized,
    {
        let request = self.link_request_with_query(rel, query)?.build();
        Self::traverse(self.transport.clone(), request).await
    }

    /// Follow a link relation with a JSON request body.
    ///
    /// # Errors
    ///
    /// As [`Resource::follow`], plus body serialization failures.
    pub async fn follow_with_body<B>(&self, rel: &str, body: &B) -> Result<Self>
    where
        B: serde::Serialize + ?Sized,
    {
        let request = self.link_request(rel)?.json(body)?.build();
        Self::traverse(self.transport.clone(), request).await
    }

    /// Follow a link relation with both a query rewrite and a JSON body.
    ///
    /// # Errors
    ///
    /// As [`Resource::follow_with_query`] and [`Resource::follow_with_body`].
    pub async fn follow_with_query_and_body<Q, B>(
        &self,
        rel: &str,
        query: &Q,
        body: &B,
    ) -> Result<Self>
    where
        Q: serde::Serialize + ?Sized,
        B: serde::Serialize + ?Sized,
    {
        let request = self.link_request_with_query(rel, query)?.json(body)?.build();
        Self::traverse(self.transport.clone(), request).await
    }

    /// Follow a link relation with a multipart form body.
    ///
    /// `payload` is flattened with [`multipart::flatten`]: nested objects
    /// become dot-separated field names, arrays stay single opaque fields.
    ///
    /// # Errors
    ///
    /// As [`Resource::follow`].
    pub async fn follow_with_form(&self, rel: &str, payload: &Value) -> Result<Self> {
        let request = self
            .link_request(rel)?
            .multipart(multipart::flatten(payload))
            .build();
        Self::traverse(self.transport.clone(), request).await
    }

    /// Follow a link relation with a query rewrite and a multipart form body.
    ///
    /// # Errors
    ///
    /// As [`Resource::follow_with_query`] and [`Resource::follow_with_form`].
    pub async fn follow_with_query_and_form<Q>(
        &self,
        rel: &str,
        query: &Q,
        payload: &Value,
    ) -> Result<Self>
    where
        Q: serde::Serialize + ?Sized,
    {
        let request = self
            .link_request_with_query(rel, query)?
            .multipart(multipart::flatten(payload))
            .build();
        Self::traverse(self.transport.clone(), request).await
    }

    /// Follow the documentation link of a relation.
    ///
    /// Appends the fixed documentation suffix to `rel` and follows the
    /// resulting relation.
    ///
    /// # Errors
    ///
    /// As [`Resource::follow`].
    pub async fn follow_doc(&self, rel: &str) -> Result<Self> {
        self.follow(&doc_rel(rel)).await
    }

    // ========================================================================
    // Raw navigation
    // ========================================================================
    //
    // Raw variants skip classification and envelope parsing entirely and
    // hand back the transport response as-is, e.g. for binary downloads.

    /// Follow a link relation and return the unparsed response.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownRelation`] for an unadvertised relation, or a
    /// transport-level failure.
    pub async fn follow_raw(&self, rel: &str) -> Result<Response> {
        let request = self.link_request(rel)?.build();
        self.transport.execute(request).await
    }

    /// Raw variant of [`Resource::follow_with_query`].
    ///
    /// # Errors
    ///
    /// As [`Resource::follow_raw`], plus query serialization failures.
    pub async fn follow_raw_with_query<Q>(&self, rel: &str, query: &Q) -> Result<Response>
    where
        Q: serde::Serialize + ?Sized,
    {
        let request = self.link_request_with_query(rel, query)?.build();
        self.transport.execute(request).await
    }

    /// Raw variant of [`Resource::follow_with_body`].
    ///
    /// # Errors
    ///
    /// As [`Resource::follow_raw`], plus body serialization failures.
    pub async fn follow_raw_with_body<B>(&self, rel: &str, body: &B) -> Result<Response>
    where
        B: serde::Serialize + ?Sized,
    {
        let request = self.link_request(rel)?.json(body)?.build();
        self.transport.execute(request).await
    }

    /// Raw variant of [`Resource::follow_with_query_and_body`].
    ///
    /// # Errors
    ///
    /// As [`Resource::follow_raw_with_query`] and
    /// [`Resource::follow_raw_with_body`].
    pub async fn follow_raw_with_query_and_body<Q, B>(
        &self,
        rel: &str,
        query: &Q,
        body: &B,
    ) -> Result<Response>
    where
        Q: serde::Serialize + ?Sized,
        B: serde::Serialize + ?Sized,
    {
        let request = self.link_request_with_query(rel, query)?.json(body)?.build();
        self.transport.execute(request).await
    }

    /// Raw variant of [`Resource::follow_with_form`].
    ///
    /// # Errors
    ///
    /// As [`Resource::follow_raw`].
    pub async fn follow_raw_with_form(&self, rel: &str, payload: &Value) -> Result<Response> {
        let request = self
            .link_request(rel)?
            .multipart(multipart::flatten(payload))
            .build();
        self.transport.execute(request).await
    }

    /// Raw variant of [`Resource::follow_with_query_and_form`].
    ///
    /// # Errors
    ///
    /// As [`Resource::follow_raw_with_query`].
    pub async fn follow_raw_with_query_and_form<Q>(
        &self,
        rel: &str,
        query: &Q,
        payload: &Value,
    ) -> Result<Response>
    where
        Q: serde::Serialize + ?Sized,
    {
        let request = self
            .link_request_with_query(rel, query)?
            .multipart(multipart::flatten(payload))
            .build();
        self.transport.execute(request).await
    }

    // ========================================================================
    // Request building
    // ========================================================================

    fn link_request(&self, rel: &str) -> Result<RequestBuilder> {
        let link = self.link(rel)?;
        Ok(Request::builder(link.method(), link.href()).header(ACCEPT, HAL_MEDIA_TYPE))
    }

    fn link_request_with_query<Q>(&self, rel: &str, query_args: &Q) -> Result<RequestBuilder>
    where
        Q: serde::Serialize + ?Sized,
    {
        let link = self.link(rel)?;
        let href = query::compose(link.href(), query_args)?;
        Ok(Request::builder(link.method(), href).header(ACCEPT, HAL_MEDIA_TYPE))
    }
}

fn entry_request(href: String) -> RequestBuilder {
    Request::builder("GET", href).header(ACCEPT, HAL_MEDIA_TYPE)
}

type Envelope = (
    Value,
    Option<HashMap<String, Link>>,
    Option<HashMap<String, Vec<Value>>>,
);

/// Split a parsed document into domain payload, link table, and embedded map.
fn split_envelope(document: Value) -> Result<Envelope> {
    let mut fields = match document {
        Value::Object(fields) => fields,
        other => return Ok((other, None, None)),
    };

    let links = match fields.remove(LINKS_KEY) {
        None | Some(Value::Null) => None,
        Some(value) => Some(serde_json::from_value(value)?),
    };
    let embedded = match fields.remove(EMBEDDED_KEY) {
        None | Some(Value::Null) => None,
        Some(value) => Some(split_embedded(value)?),
    };

    Ok((Value::Object(fields), links, embedded))
}

fn split_embedded(value: Value) -> Result<HashMap<String, Vec<Value>>> {
    let entries: HashMap<String, Value> = serde_json::from_value(value)?;
    Ok(entries
        .into_iter()
        .map(|(rel, documents)| match documents {
            Value::Array(documents) => (rel, documents),
            // A single embedded object is a one-element sequence.
            single => (rel, vec![single]),
        })
        .collect())
}
