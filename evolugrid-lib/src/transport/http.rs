//! HTTP transport over `reqwest`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::ACCEPT;
use reqwest::header::HeaderValue;
use url::Url;

use super::Transport;
use crate::error::TransportError;
use crate::filter::FilterEntry;
use crate::query::append_query;
use crate::query::encode_query;
use crate::response::ResponsePayload;

/// [`Transport`] issuing HTTP GET requests.
///
/// Relative endpoint URLs (`/api/items`) are resolved against the base URL,
/// which plays the role of the page origin.
///
/// # Example
///
/// ```ignore
/// let transport = HttpTransport::builder()
///     .base_url("https://shop.example.com")?
///     .timeout(Duration::from_secs(30))
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http_client: Client,
    base_url: Option<Url>,
    timeout: Option<Duration>,
}

impl HttpTransport {
    /// Creates a transport with default settings and no base URL.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Creates a new builder.
    pub fn builder() -> HttpTransportBuilder {
        HttpTransportBuilder::default()
    }

    /// Returns the base URL relative endpoints are resolved against.
    pub fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    /// Resolves the full request URL for an endpoint and its parameters.
    pub fn request_url(&self, endpoint_url: &str, params: &[FilterEntry]) -> Result<Url, TransportError> {
        let target = append_query(endpoint_url, &encode_query(params));
        match Url::parse(&target) {
            Ok(url) => Ok(url),
            Err(url::ParseError::RelativeUrlWithoutBase) => match &self.base_url {
                Some(base) => base
                    .join(&target)
                    .map_err(|e| TransportError::InvalidUrl(format!("{target}: {e}"))),
                None => Err(TransportError::InvalidUrl(format!(
                    "{target}: relative URL and no base URL configured"
                ))),
            },
            Err(e) => Err(TransportError::InvalidUrl(format!("{target}: {e}"))),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch(&self, endpoint_url: &str, params: &[FilterEntry]) -> Result<ResponsePayload, TransportError> {
        let url = self.request_url(endpoint_url, params)?;
        log::debug!("GET {url}");

        let mut request = self
            .http_client
            .get(url)
            .header(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|e| self.map_error(e))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| self.map_error(e))?;

        if !status.is_success() {
            return Err(TransportError::http(status.as_u16(), body));
        }

        serde_json::from_str(&body).map_err(|e| TransportError::parse_with_body(e.to_string(), body))
    }
}

impl HttpTransport {
    fn map_error(&self, error: reqwest::Error) -> TransportError {
        match self.timeout {
            Some(timeout) if error.is_timeout() => TransportError::Timeout(timeout),
            _ => TransportError::Network(error),
        }
    }
}

/// Builder for [`HttpTransport`].
#[derive(Debug, Default)]
pub struct HttpTransportBuilder {
    http_client: Option<Client>,
    base_url: Option<Url>,
    timeout: Option<Duration>,
}

impl HttpTransportBuilder {
    /// Sets the base URL relative endpoints are resolved against.
    pub fn base_url(mut self, base_url: &str) -> Result<Self, TransportError> {
        let url = Url::parse(base_url).map_err(|e| TransportError::InvalidUrl(format!("{base_url}: {e}")))?;
        self.base_url = Some(url);
        Ok(self)
    }

    /// Sets a per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Uses a preconfigured `reqwest` client.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Builds the transport.
    pub fn build(self) -> HttpTransport {
        HttpTransport {
            http_client: self.http_client.unwrap_or_default(),
            base_url: self.base_url,
            timeout: self.timeout,
        }
    }
}
