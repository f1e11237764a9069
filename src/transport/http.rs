//! reqwest-backed transport.

// ============================================================================
// Imports
// ============================================================================

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, trace};
use url::Url;

use crate::error::{Error, Result};
use crate::protocol::{Method, RawResponse, Request};

use super::Transport;

/// Default time limit of a single HTTP exchange.
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Transport speaking HTTP to a driver at a base URL.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base: Url,
}

impl HttpTransport {
    /// Creates a transport for the driver at `base`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the HTTP client cannot be built.
    pub fn new(base: Url) -> Result<Self> {
        Self::with_timeout(base, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Creates a transport with a custom per-request time limit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the HTTP client cannot be built.
    pub fn with_timeout(base: Url, request_timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(request_timeout).build()?;
        Ok(Self { client, base })
    }

    /// Returns the driver base URL.
    #[inline]
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Resolves a protocol path against the base URL, keeping any path
    /// prefix the base carries (e.g. `/wd/hub`).
    fn endpoint(&self, path: &str) -> Result<Url> {
        let base = self.base.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}{path}"))?)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &Request) -> Result<RawResponse> {
        let url = self.endpoint(&request.path)?;
        trace!(method = %request.method, %url, command = request.name, "Sending request");

        let builder = match request.method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
            Method::Delete => self.client.delete(url),
        };
        let builder = match &request.body {
            Some(body) => builder.json(body),
            None => builder,
        };

        let response = builder.send().await.map_err(|e| {
            debug!(command = request.name, error = %e, "Request failed");
            Error::Http(e)
        })?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        debug!(command = request.name, status, bytes = body.len(), "Response received");
        Ok(RawResponse::new(status, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_keeps_base_path() {
        let transport =
            HttpTransport::new(Url::parse("http://127.0.0.1:4444/wd/hub/").unwrap()).unwrap();
        assert_eq!(
            transport.endpoint("/session/abc/url").unwrap().as_str(),
            "http://127.0.0.1:4444/wd/hub/session/abc/url"
        );
    }

    #[test]
    fn test_endpoint_without_base_path() {
        let transport = HttpTransport::new(Url::parse("http://localhost:4444").unwrap()).unwrap();
        assert_eq!(
            transport.endpoint("/status").unwrap().as_str(),
            "http://localhost:4444/status"
        );
    }
}
