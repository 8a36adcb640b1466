//! Conversions from external infrastructure errors into domain errors.

use qbis_domain::QbisError;
use reqwest::Error as HttpError;
use serde_json::Error as JsonError;
use url::ParseError as UrlError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub QbisError);

impl From<InfraError> for QbisError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<QbisError> for InfraError {
    fn from(value: QbisError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoQbisError {
    fn into_qbis(self) -> QbisError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → QbisError */
/* -------------------------------------------------------------------------- */

impl IntoQbisError for HttpError {
    fn into_qbis(self) -> QbisError {
        if self.is_timeout() {
            return QbisError::Transport("HTTP request timed out".into());
        }

        if self.is_connect() {
            return QbisError::Transport(format!("HTTP connection failure: {self}"));
        }

        if self.is_decode() {
            return QbisError::Format(format!("undecodable HTTP response body: {self}"));
        }

        if let Some(status) = self.status() {
            return QbisError::Transport(format!(
                "HTTP {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("unknown status")
            ));
        }

        QbisError::Transport(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_qbis())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → QbisError */
/* -------------------------------------------------------------------------- */

impl IntoQbisError for JsonError {
    fn into_qbis(self) -> QbisError {
        QbisError::Format(format!(
            "unexpected JSON at line {} column {}: {self}",
            self.line(),
            self.column()
        ))
    }
}

impl From<JsonError> for InfraError {
    fn from(value: JsonError) -> Self {
        InfraError(value.into_qbis())
    }
}

/* -------------------------------------------------------------------------- */
/* url::ParseError → QbisError */
/* -------------------------------------------------------------------------- */

impl IntoQbisError for UrlError {
    fn into_qbis(self) -> QbisError {
        QbisError::Config(format!("invalid service URL: {self}"))
    }
}

impl From<UrlError> for InfraError {
    fn from(value: UrlError) -> Self {
        InfraError(value.into_qbis())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
