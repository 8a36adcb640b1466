//! Salary activities

use qbis_domain::{ActivityId, ActivityOverview, QbisError, Result, SalaryTime};

use crate::week::Week;

/// A salary activity the employee can log time on.
#[derive(Debug, Clone)]
pub struct SalaryActivity<'w> {
    week: &'w Week,
    id: ActivityId,
    name: String,
    is_default: bool,
}

impl<'w> SalaryActivity<'w> {
    fn from_record(week: &'w Week, record: &SalaryTime) -> Self {
        Self {
            week,
            id: record.activity_id,
            name: record.activity_name.clone(),
            is_default: record.is_default,
        }
    }

    pub fn id(&self) -> ActivityId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The implicit komp-time activity.
    pub fn is_default(&self) -> bool {
        self.is_default
    }

    /// True if the week's snapshot holds a row for this activity.
    pub fn in_week(&self) -> bool {
        self.record().is_some()
    }

    /// The snapshot row, if the activity is part of the week.
    pub fn record(&self) -> Option<&'w SalaryTime> {
        self.week.snapshot().list_of_salary_time.iter().find(|r| r.activity_id == self.id)
    }

    /// Budget and balance overlay of the activity.
    ///
    /// # Errors
    /// Propagates errors of the overview fetch.
    pub fn overview(&self) -> Result<ActivityOverview> {
        self.week.salary_activity_overview(self.id)
    }
}

/// Rows of the snapshot, default first, then the rest in server order.
///
/// # Errors
/// Returns `Invariant` if more than one row is flagged default.
pub fn in_week(week: &Week) -> Result<Vec<SalaryActivity<'_>>> {
    let rows = &week.snapshot().list_of_salary_time;
    let mut defaults = rows.iter().filter(|r| r.is_default);
    let default = defaults.next();
    if defaults.next().is_some() {
        return Err(QbisError::Invariant(
            "more than one salary activity is flagged default".into(),
        ));
    }

    Ok(default
        .into_iter()
        .chain(rows.iter().filter(|r| !r.is_default))
        .map(|r| SalaryActivity::from_record(week, r))
        .collect())
}

/// Everything the employee may log: the default activity, then the
/// catalog. Catalog entries already in the week keep their snapshot name.
///
/// # Errors
/// Returns `Invariant` if more than one row is flagged default.
pub fn available(week: &Week) -> Result<Vec<SalaryActivity<'_>>> {
    let mut activities: Vec<_> = in_week(week)?.into_iter().filter(SalaryActivity::is_default).collect();

    for option in &week.snapshot().list_of_salary_activities {
        if activities.iter().any(|a| a.id == option.key) {
            continue;
        }
        activities.push(SalaryActivity {
            week,
            id: option.key,
            name: option.value.clone(),
            is_default: false,
        });
    }
    Ok(activities)
}

/// Rows with time on day `index`, plus the default row, in snapshot order.
pub fn logged_on(week: &Week, index: usize) -> Vec<SalaryActivity<'_>> {
    week.snapshot()
        .list_of_salary_time
        .iter()
        .filter(|r| r.is_default || r.days.get(index).is_some_and(|d| d.is_logged()))
        .map(|r| SalaryActivity::from_record(week, r))
        .collect()
}
