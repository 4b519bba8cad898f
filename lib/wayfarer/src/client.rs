//! HTTP transport implementation using hyper-util.

use std::collections::HashMap;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::{
    client::legacy::{Client, connect::HttpConnector},
    rt::TokioExecutor,
};
use tracing::debug;
use url::Url;

use crate::{
    Error, Request, Resource, Response, Result, Transport,
    config::{ClientConfig, ClientConfigBuilder},
};

/// Create an HTTPS connector with rustls.
///
/// Supports both HTTP/1.1 and HTTP/2, with TLS enabled using the Mozilla
/// root certificates. The connect timeout comes from the client config.
fn https_connector(config: &ClientConfig) -> HttpsConnector<HttpConnector> {
    let root_store: rustls::RootCertStore =
        webpki_roots::TLS_SERVER_ROOTS.iter().cloned().collect();

    let tls_config = rustls::ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth();

    let mut http = HttpConnector::new();
    http.set_connect_timeout(Some(config.connect_timeout));
    http.enforce_http(false);

    HttpsConnectorBuilder::new()
        .with_tls_config(tls_config)
        .https_or_http()
        .enable_http1()
        .enable_http2()
        .wrap_connector(http)
}

/// Hypermedia transport backed by hyper-util, with connection pooling and
/// rustls TLS.
///
/// The transport owns the API base URL; link hrefs are resolved against it,
/// so servers can advertise relative links. Cloning is cheap and shares the
/// underlying connection pool.
///
/// # Example
///
/// ```ignore
/// use wayfarer::HyperTransport;
/// use std::time::Duration;
///
/// let api = HyperTransport::builder("https://api.example.com/")
///     .timeout(Duration::from_secs(10))
///     .build()?;
///
/// let root = api.root().await?;
/// let orders = root.follow("orders").await?;
/// ```
#[derive(Clone)]
pub struct HyperTransport {
    inner: Client<HttpsConnector<HttpConnector>, Full<Bytes>>,
    base_url: Url,
    config: ClientConfig,
}

impl std::fmt::Debug for HyperTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HyperTransport")
            .field("base_url", &self.base_url.as_str())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl HyperTransport {
    /// Create a transport with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL cannot be parsed.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        Self::with_config(base_url, ClientConfig::default())
    }

    /// Create a transport with custom configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL cannot be parsed.
    pub fn with_config(base_url: impl AsRef<str>, config: ClientConfig) -> Result<Self> {
        let base_url = Url::parse(base_url.as_ref())?;
        let inner = Client::builder(TokioExecutor::new())
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_idle_per_host)
            .build(https_connector(&config));

        Ok(Self {
            inner,
            base_url,
            config,
        })
    }

    /// Create a new transport builder.
    #[must_use]
    pub fn builder(base_url: impl Into<String>) -> HyperTransportBuilder {
        HyperTransportBuilder::new(base_url)
    }

    /// The API base URL link hrefs are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The transport configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetch the API root resource.
    ///
    /// # Errors
    ///
    /// Returns the classified failure of the exchange.
    pub async fn root(&self) -> Result<Resource<Self>> {
        Resource::load(self.clone(), "").await
    }

    /// Fetch the resource at `href` (absolute, or relative to the base URL).
    ///
    /// # Errors
    ///
    /// Returns the classified failure of the exchange.
    pub async fn resource(&self, href: impl Into<String>) -> Result<Resource<Self>> {
        Resource::load(self.clone(), href).await
    }

    /// Resolve an href against the base URL. An empty href names the base
    /// itself.
    fn resolve(&self, href: &str) -> Result<Url> {
        if href.is_empty() {
            return Ok(self.base_url.clone());
        }
        self.base_url.join(href).map_err(Error::from)
    }

    /// Build a hyper request from a wayfarer request.
    fn build_hyper_request(&self, request: Request) -> Result<http::Request<Full<Bytes>>> {
        let (method, href, headers, body) = request.into_parts();

        let method = http::Method::from_bytes(method.as_bytes())
            .map_err(|_| Error::invalid_request(format!("invalid HTTP method: {method}")))?;
        let url = self.resolve(&href)?;

        let mut builder = http::Request::builder().method(method).uri(url.as_str());

        for (name, value) in &headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let body = body.map_or_else(Full::default, Full::new);
        builder
            .body(body)
            .map_err(|e| Error::invalid_request(e.to_string()))
    }

    /// Extract response headers as a `HashMap`.
    fn extract_headers(headers: &http::HeaderMap) -> HashMap<String, String> {
        headers
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.to_string(), v.to_string()))
            })
            .collect()
    }

    #[allow(clippy::needless_pass_by_value)]
    fn map_hyper_error(err: hyper_util::client::legacy::Error) -> Error {
        let msg = err.to_string();

        if err.is_connect() {
            return Error::connection(msg);
        }

        if msg.contains("ssl") || msg.contains("tls") || msg.contains("certificate") {
            return Error::tls(msg);
        }

        Error::connection(msg)
    }
}

impl Transport for HyperTransport {
    async fn execute(&self, request: Request) -> Result<Response> {
        let hyper_request = self.build_hyper_request(request)?;
        let method = hyper_request.method().clone();
        let url = hyper_request.uri().clone();

        debug!(%method, %url, "sending request");

        let response = tokio::time::timeout(self.config.timeout, self.inner.request(hyper_request))
            .await
            .map_err(|_| Error::Timeout)?
            .map_err(Self::map_hyper_error)?;

        let status = response.status();
        let response_headers = Self::extract_headers(response.headers());

        let body = response
            .into_body()
            .collect()
            .await
            .map_err(|e| Error::connection(e.to_string()))?
            .to_bytes();

        debug!(%method, %url, status = status.as_u16(), "received response");

        Ok(Response::new(
            status.as_u16(),
            status.canonical_reason().unwrap_or_default(),
            response_headers,
            body,
        ))
    }
}

/// Builder for [`HyperTransport`].
#[derive(Debug, Clone)]
pub struct HyperTransportBuilder {
    base_url: String,
    config: ClientConfigBuilder,
}

impl HyperTransportBuilder {
    fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            config: ClientConfigBuilder::default(),
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: std::time::Duration) -> Self {
        self.config = self.config.timeout(timeout);
        self
    }

    /// Set the connection timeout.
    #[must_use]
    pub fn connect_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.config = self.config.connect_timeout(timeout);
        self
    }

    /// Set the maximum idle connections per host.
    #[must_use]
    pub fn pool_idle_per_host(mut self, count: usize) -> Self {
        self.config = self.config.pool_idle_per_host(count);
        self
    }

    /// Set the idle connection timeout.
    #[must_use]
    pub fn pool_idle_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.config = self.config.pool_idle_timeout(timeout);
        self
    }

    /// Build the transport.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL cannot be parsed.
    pub fn build(self) -> Result<HyperTransport> {
        HyperTransport::with_config(&self.base_url, self.config.build())
    }
}
