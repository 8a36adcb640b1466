use std::time::Duration;

use qbis_domain::constants::{endpoints, login_form};
use qbis_domain::{EmployeeId, QbisError, Result};
use reqwest::blocking::Response;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};
use url::Url;

use super::scraper::{IdentityResolver, ScriptBlockResolver};
use crate::errors::InfraError;
use crate::http::HttpClient;

/// Cookie-holding connection to one Qbis web application.
///
/// All paths are resolved against a slash-terminated base URL. The cookie
/// store is the only state and is shared by every request of the session.
pub struct Session {
    base_url: Url,
    http: HttpClient,
    resolver: Box<dyn IdentityResolver>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").field("base_url", &self.base_url.as_str()).finish_non_exhaustive()
    }
}

impl Session {
    /// Normalise `base_url`, start a cookie store and fetch the login page
    /// once to receive the initial session cookies.
    ///
    /// # Errors
    /// - `QbisError::Config` if `base_url` is not a valid URL
    /// - `QbisError::Transport` if the warm-up request fails
    pub fn open(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(timeout)
            .user_agent(concat!("qbis-client/", env!("CARGO_PKG_VERSION")))
            .cookie_store(true)
            .build()?;
        Self::with_client(base_url, http)
    }

    /// Like [`Session::open`], over a caller-built client.
    ///
    /// # Errors
    /// See [`Session::open`].
    pub fn with_client(base_url: &str, http: HttpClient) -> Result<Self> {
        let base_url = normalize_base_url(base_url)?;
        let session = Self { base_url, http, resolver: Box::new(ScriptBlockResolver) };

        session.get(endpoints::LOGIN, &[])?;
        debug!(base_url = %session.base_url, "session opened");

        Ok(session)
    }

    /// Replace the identity scraper.
    #[must_use]
    pub fn with_resolver(mut self, resolver: impl IdentityResolver + 'static) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Submit the login form.
    ///
    /// The service answers 2xx even for bad credentials, so success here
    /// does not prove authentication. [`Session::resolve_user_identity`]
    /// fails afterwards if the login did not take.
    ///
    /// # Errors
    /// Returns `QbisError::Transport` on network failure or a non-2xx status.
    pub fn login(&self, company: &str, username: &str, password: &str) -> Result<()> {
        let fields = [
            ("Authenticate", login_form::AUTHENTICATE),
            ("Company", company),
            ("CurrentLanguage", login_form::LANGUAGE),
            ("Password", password),
            ("RememberMe", login_form::REMEMBER_ME),
            ("Username", username),
        ];

        let response = self.post_form(endpoints::AUTHENTICATE, &fields)?;
        let status = response.status();
        if !status.is_success() {
            warn!(%status, company, username, "login rejected");
            return Err(QbisError::Transport(format!("login failed with HTTP {}", status.as_u16())));
        }

        info!(company, username, "login form accepted");
        Ok(())
    }

    /// Scrape the logged-in employee's id from the time overview page.
    ///
    /// # Errors
    /// - `QbisError::Transport` on network failure or a non-2xx status
    /// - `QbisError::NotFound` if the page carries no identity, which
    ///   usually means the login failed
    /// - `QbisError::Format` if the scraped value is not numeric
    pub fn resolve_user_identity(&self) -> Result<EmployeeId> {
        let response = ensure_success(self.get(endpoints::TIME_OVERVIEW, &[])?)?;
        let html = response.text().map_err(|e| QbisError::from(InfraError::from(e)))?;

        let Some(user) = self.resolver.resolve(&html) else {
            warn!("no currentLogin block on the time overview page");
            return Err(QbisError::NotFound(
                "employee id not found on the time overview page; check the credentials".into(),
            ));
        };

        let employee = EmployeeId::parse(user)?;
        info!(employee_id = %employee, "resolved employee identity");
        Ok(employee)
    }

    /// GET `resource` with `query`.
    ///
    /// # Errors
    /// Returns `QbisError::Transport` on network failure. Statuses are not checked.
    pub fn get(&self, resource: &str, query: &[(&str, String)]) -> Result<Response> {
        let url = self.resolve(resource)?;
        self.http.send(self.http.request(Method::GET, url).query(query))
    }

    /// POST `fields` as `application/x-www-form-urlencoded`.
    ///
    /// # Errors
    /// Returns `QbisError::Transport` on network failure. Statuses are not checked.
    pub fn post_form(&self, resource: &str, fields: &[(&str, &str)]) -> Result<Response> {
        let url = self.resolve(resource)?;
        self.http.send(self.http.request(Method::POST, url).form(fields))
    }

    /// POST `payload` as JSON.
    ///
    /// # Errors
    /// Returns `QbisError::Transport` on network failure. Statuses are not checked.
    pub fn post_json<T: Serialize + ?Sized>(&self, resource: &str, payload: &T) -> Result<Response> {
        let url = self.resolve(resource)?;
        self.http.send(self.http.request(Method::POST, url).json(payload))
    }

    /// GET and decode a JSON body.
    ///
    /// # Errors
    /// - `QbisError::Transport` on network failure or a non-2xx status
    /// - `QbisError::Format` if the body does not decode into `R`
    pub fn get_json<R: DeserializeOwned>(&self, resource: &str, query: &[(&str, String)]) -> Result<R> {
        decode_json(self.get(resource, query)?)
    }

    /// POST JSON and decode the JSON answer.
    ///
    /// # Errors
    /// - `QbisError::Transport` on network failure or a non-2xx status
    /// - `QbisError::Format` if the body does not decode into `R`
    pub fn exchange_json<T, R>(&self, resource: &str, payload: &T) -> Result<R>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        decode_json(self.post_json(resource, payload)?)
    }

    fn resolve(&self, resource: &str) -> Result<Url> {
        self.base_url
            .join(resource.trim_start_matches('/'))
            .map_err(|e| InfraError::from(e).into())
    }
}

fn normalize_base_url(base_url: &str) -> Result<Url> {
    let mut normalized = base_url.trim().to_string();
    if !normalized.ends_with('/') {
        normalized.push('/');
    }
    Url::parse(&normalized).map_err(|e| InfraError::from(e).into())
}

fn ensure_success(response: Response) -> Result<Response> {
    response.error_for_status().map_err(|e| InfraError::from(e).into())
}

fn decode_json<R: DeserializeOwned>(response: Response) -> Result<R> {
    let response = ensure_success(response)?;
    let body = response.text().map_err(|e| QbisError::from(InfraError::from(e)))?;
    serde_json::from_str(&body).map_err(|e| InfraError::from(e).into())
}
