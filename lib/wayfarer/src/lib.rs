//! Client-side navigator for HAL hypermedia APIs.
//!
//! Servers expose resources as JSON documents carrying a `_links` map of
//! invocable transitions and `_embedded` related documents. wayfarer fetches
//! a resource, strips that envelope, and hands back a [`Resource`]: the
//! domain payload plus typed, navigable links and embeds.
//!
//! # Example
//!
//! ```ignore
//! use wayfarer::prelude::*;
//!
//! let api = HyperTransport::new("https://api.example.com/")?;
//!
//! let root = api.root().await?;
//! let orders = root.follow("orders").await?;
//! let open = orders
//!     .follow_with_query("search", &serde_json::json!({"state": "open"}))
//!     .await?;
//!
//! for order in open.embed("items").resources()? {
//!     println!("{}", order.data());
//! }
//! ```
//!
//! The traversal logic lives in [`wayfarer_core`] and is transport-agnostic;
//! this crate adds [`HyperTransport`], a hyper-util + rustls implementation
//! of the [`Transport`] port with base-URL resolution for relative link
//! hrefs.

mod client;
mod config;
pub mod prelude;

pub use client::{HyperTransport, HyperTransportBuilder};
pub use config::{ClientConfig, ClientConfigBuilder};

// Re-export core types
pub use wayfarer_core::{
    DOC_SUFFIX, Embedded, Error, Form, Link, LinkInfo, Part, Request, RequestBuilder, Resource,
    Response, Result, ServerError, Transport, doc_rel, from_json, to_json, to_query_string,
};

// Re-export core modules
pub use wayfarer_core::{multipart, protocol, query};

// Re-export url for base URL handling
pub use url;
