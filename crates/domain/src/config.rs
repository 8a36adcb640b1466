//! Client configuration

use std::fmt;
use std::time::Duration;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_BASE_URL, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_TIMEZONE};
use crate::errors::{QbisError, Result};

/// Connection settings for one Qbis account.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QbisConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    pub company: String,
    pub username: String,
    pub password: String,
    /// IANA timezone name the employee's calendar days are defined in.
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl QbisConfig {
    pub fn new(
        company: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            base_url: default_base_url(),
            company: company.into(),
            username: username.into(),
            password: password.into(),
            timezone: default_timezone(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = timezone.into();
        self
    }

    /// Parsed timezone.
    ///
    /// # Errors
    /// Returns `QbisError::Config` if `timezone` is not a known IANA name.
    pub fn tz(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|e| QbisError::Config(format!("Invalid timezone '{}': {e}", self.timezone)))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Check that every required field is usable.
    ///
    /// # Errors
    /// Returns `QbisError::Config` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("base_url", &self.base_url),
            ("company", &self.company),
            ("username", &self.username),
            ("password", &self.password),
        ] {
            if value.trim().is_empty() {
                return Err(QbisError::Config(format!("{name} must not be empty")));
            }
        }
        if self.request_timeout_secs == 0 {
            return Err(QbisError::Config("request_timeout_secs must be positive".into()));
        }
        self.tz().map(|_| ())
    }
}

impl fmt::Debug for QbisConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QbisConfig")
            .field("base_url", &self.base_url)
            .field("company", &self.company)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("timezone", &self.timezone)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}
