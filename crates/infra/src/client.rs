//! Entry point tying a session, the API adapter and the employee together

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;
use qbis_core::{TimesheetApi, Week, WeekSpan};
use qbis_domain::{EmployeeId, QbisConfig, Result};
use tracing::info;

use crate::api::QbisApi;
use crate::session::Session;

/// Logged-in Qbis account.
///
/// Weeks fetched through one client share its session and cookie store.
/// Each [`Week`] is single-writer; the client itself holds no mutable state.
#[derive(Debug, Clone)]
pub struct QbisClient {
    session: Arc<Session>,
    api: Arc<QbisApi>,
    employee: EmployeeId,
    tz: Tz,
}

impl QbisClient {
    /// Open a session, log in and resolve the employee id.
    ///
    /// # Errors
    /// - `QbisError::Config` if `config` does not validate
    /// - `QbisError::Transport` if any of the requests fails
    /// - `QbisError::NotFound` if no identity is found after login, which
    ///   is how bad credentials surface
    pub fn connect(config: &QbisConfig) -> Result<Self> {
        config.validate()?;
        let tz = config.tz()?;

        let session = Session::open(&config.base_url, config.request_timeout())?;
        session.login(&config.company, &config.username, &config.password)?;

        let client = Self::from_session(Arc::new(session), tz)?;
        info!(employee_id = %client.employee, base_url = %config.base_url, "connected to Qbis");
        Ok(client)
    }

    /// Wrap an already authenticated session.
    ///
    /// # Errors
    /// See [`Session::resolve_user_identity`].
    pub fn from_session(session: Arc<Session>, tz: Tz) -> Result<Self> {
        let employee = session.resolve_user_identity()?;
        let api = Arc::new(QbisApi::new(Arc::clone(&session)));
        Ok(Self { session, api, employee, tz })
    }

    /// Fetch the Monday to Sunday week around `instant`.
    ///
    /// # Errors
    /// Propagates the errors of [`WeekSpan::containing`] and [`Week::fetch`].
    pub fn week<Z: TimeZone>(&self, instant: &DateTime<Z>) -> Result<Week> {
        let span = WeekSpan::containing(instant, self.tz)?;
        let api: Arc<dyn TimesheetApi> = self.api.clone();
        Week::fetch(api, self.employee.clone(), span)
    }

    /// Fetch the current week.
    ///
    /// # Errors
    /// See [`QbisClient::week`].
    pub fn week_now(&self) -> Result<Week> {
        self.week(&Utc::now())
    }

    pub fn employee(&self) -> &EmployeeId {
        &self.employee
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub fn api(&self) -> &Arc<QbisApi> {
        &self.api
    }
}
