//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and functions
//! for easy glob importing:
//!
//! ```ignore
//! use wayfarer::prelude::*;
//! ```

pub use crate::{
    ClientConfig, Embedded, Error, Form, HyperTransport, Link, LinkInfo, Part, Request,
    RequestBuilder, Resource, Response, Result, ServerError, Transport, from_json, to_json,
    to_query_string,
};
pub use serde::{Deserialize, Serialize};
