use std::time::Duration;

use qbis_domain::constants::DEFAULT_REQUEST_TIMEOUT_SECS;
use qbis_domain::QbisError;
use reqwest::blocking::{Client as ReqwestClient, RequestBuilder, Response};
use reqwest::Method;
use tracing::debug;

use crate::errors::InfraError;

/// Blocking HTTP client with a cookie store and a per-request timeout.
///
/// Requests are sent exactly once. Failed calls surface as
/// `QbisError::Transport` and are left to the caller to re-issue.
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: ReqwestClient,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Convenience constructor with default configuration.
    ///
    /// # Errors
    /// Returns `QbisError::Transport` if the TLS backend cannot be initialised.
    pub fn new() -> Result<Self, QbisError> {
        Self::builder().build()
    }

    /// Create a request builder using the underlying reqwest client.
    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Execute the provided request builder.
    ///
    /// # Errors
    /// Returns `QbisError::Transport` if the request cannot be built or
    /// sent. Non-success statuses are returned as responses.
    pub fn send(&self, builder: RequestBuilder) -> Result<Response, QbisError> {
        let request = builder.build().map_err(|err| QbisError::from(InfraError::from(err)))?;

        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, url = %redact_query(&url), "sending HTTP request");

        match self.client.execute(request) {
            Ok(response) => {
                let status = response.status();
                debug!(%method, url = %redact_query(&url), %status, "received HTTP response");
                Ok(response)
            }
            Err(err) => {
                debug!(%method, url = %redact_query(&url), error = %err, "HTTP request failed");
                Err(InfraError::from(err).into())
            }
        }
    }
}

/// Path only; query strings carry employee ids.
fn redact_query(url: &reqwest::Url) -> String {
    format!("{}{}", url.origin().ascii_serialization(), url.path())
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    user_agent: Option<String>,
    cookie_store: bool,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            user_agent: None,
            cookie_store: true,
        }
    }
}

impl HttpClientBuilder {
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Keep cookies between requests. On by default; the session cookie
    /// is the only credential the service hands out.
    #[must_use]
    pub fn cookie_store(mut self, enabled: bool) -> Self {
        self.cookie_store = enabled;
        self
    }

    /// # Errors
    /// Returns `QbisError::Transport` if the TLS backend cannot be initialised.
    pub fn build(self) -> Result<HttpClient, QbisError> {
        let mut builder = ReqwestClient::builder()
            .timeout(self.timeout)
            .cookie_store(self.cookie_store)
            .no_proxy();

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        let client = builder.build().map_err(|err| QbisError::from(InfraError::from(err)))?;

        Ok(HttpClient { client })
    }
}
