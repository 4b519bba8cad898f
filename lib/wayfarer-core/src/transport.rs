//! Transport port.
//!
//! The traversal layer performs no I/O of its own: every navigation hands a
//! [`Request`] to a [`Transport`] and consumes the [`Response`] it returns.
//! Implement this trait to plug in an HTTP stack, inject authentication, or
//! substitute a stub in tests.

use std::future::Future;

use crate::{Request, Response, Result};

/// One HTTP exchange: request in, response out.
///
/// Implementations are expected to be cheap to clone (a handle over a shared
/// connection pool); every resource and embed collection holds its own clone.
/// Relative link hrefs are resolved by the transport, so implementations
/// backed by a real network stack typically carry a base URL.
///
/// # Example
///
/// ```ignore
/// #[derive(Clone)]
/// struct RecordingTransport {
///     inner: HyperTransport,
///     log: Arc<Mutex<Vec<String>>>,
/// }
///
/// impl Transport for RecordingTransport {
///     async fn execute(&self, request: Request) -> Result<Response> {
///         self.log.lock().unwrap().push(request.url().to_string());
///         self.inner.execute(request).await
///     }
/// }
/// ```
pub trait Transport: Clone + Send + Sync {
    /// Execute an HTTP request and return the response.
    ///
    /// # Errors
    ///
    /// Returns an error if the exchange fails at the transport level:
    /// network errors, TLS errors, timeouts, or an unresolvable URL.
    /// Non-success HTTP statuses are **not** transport errors; they are
    /// returned as ordinary responses and classified by the caller.
    fn execute(&self, request: Request) -> impl Future<Output = Result<Response>> + Send;
}
