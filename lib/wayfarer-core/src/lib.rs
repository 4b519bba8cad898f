//! Core types and traversal logic for the wayfarer HAL hypermedia client.
//!
//! This crate provides the transport-agnostic half of wayfarer:
//! - [`Resource`] - one parsed hypermedia document and its navigable links
//! - [`Embedded`] - lazily-materialized embedded resource collections
//! - [`Link`], [`LinkInfo`] - resolved link relations
//! - [`Request`] and [`RequestBuilder`] - HTTP request types
//! - [`Response`] - HTTP response type
//! - [`Error`] and [`Result`] - Error handling
//! - [`Transport`] - the port an HTTP stack plugs into
//! - [`protocol`] - response classification and media types
//! - [`query`] - query-string composition for templated links
//! - [`multipart`] - multipart form encoding and payload flattening
//!
//! Servers describe their resources with `_links` (invocable transitions)
//! and `_embedded` (inlined related documents); this crate strips that
//! envelope, exposes the remaining domain payload, and turns each link into
//! a navigation that yields the next resource.

mod body;
mod embedded;
mod error;
mod link;
pub mod multipart;
pub mod prelude;
pub mod protocol;
pub mod query;
mod request;
mod resource;
mod response;
mod transport;

pub use body::{from_json, to_json, to_query_string};
pub use embedded::Embedded;
pub use error::{Error, Result, ServerError};
pub use link::{DOC_SUFFIX, Link, LinkInfo, doc_rel};
pub use multipart::{Form, Part};
pub use request::{Request, RequestBuilder};
pub use resource::Resource;
pub use response::Response;
pub use transport::Transport;
