//! Save transaction
//!
//! A save replaces the server's copy of the week in three calls, issued
//! in [`SaveStep::ORDER`]. The first refused or failed call ends the
//! transaction; earlier steps stay committed and the week stays dirty,
//! so the caller can re-issue the whole save.

use qbis_domain::dates::wire_date_to_iso;
use qbis_domain::{
    EmployeeProjectTime, EmployeeSalaryTime, EmployeeWorkingTime, ProjectTime, QbisError, Result,
    SalaryTime, SaveOutcome, SaveProjectTimeResponse, SaveRejection, SaveSalaryTimeResponse,
    SaveStep, SaveWorkingTimeResponse, WorkingTime,
};
use tracing::{debug, info, warn};

use super::Week;
use crate::ports::TimesheetApi;

/// Where a week stands with respect to the remote copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveState {
    /// No save attempted since the last fetch.
    Clean,
    Saving,
    /// All steps accepted and the snapshot re-fetched.
    Saved,
    /// The given step failed; later steps were not issued.
    Failed(SaveStep),
}

/// Remote answers of a successful save, in step order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SaveReport {
    /// Answer to the salary time step.
    pub salary: SaveSalaryTimeResponse,
    /// Answer to the working time step.
    pub working: SaveWorkingTimeResponse,
    /// Answer to the project time step.
    pub project: SaveProjectTimeResponse,
}

impl SaveReport {
    /// Non-fatal remarks of all three steps.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = self.salary.warnings();
        warnings.extend(self.working.warnings());
        warnings.extend(self.project.warnings());
        warnings
    }
}

/// Payloads of one save, built up front from copies of the snapshot.
struct SaveBatch {
    salary: EmployeeSalaryTime,
    working: EmployeeWorkingTime,
    project: EmployeeProjectTime,
}

impl SaveBatch {
    fn from_week(week: &Week) -> Result<Self> {
        let employee_id = week.employee().clone();
        let from_date = week.span().from_iso();
        let to_date = week.span().to_iso();

        let working_rows = working_rows(&week.sheet.working_time_days)?;

        Ok(Self {
            salary: EmployeeSalaryTime {
                employee_id: employee_id.clone(),
                from_date: from_date.clone(),
                to_date: to_date.clone(),
                salary_time: salary_rows(&week.sheet.list_of_salary_time)?,
                working_time: working_rows.clone(),
                working_time_breaks: None,
            },
            working: EmployeeWorkingTime {
                days: working_rows,
                employee_id: employee_id.clone(),
                from_date: from_date.clone(),
                to_date: to_date.clone(),
            },
            project: EmployeeProjectTime {
                employee_id,
                from_date,
                list: project_rows(&week.sheet.list_of_project_time)?,
                to_date,
            },
        })
    }

    /// Issue the steps in order, stopping at the first failure.
    fn commit(&self, api: &dyn TimesheetApi) -> std::result::Result<SaveReport, (SaveStep, QbisError)> {
        let mut report = SaveReport::default();
        for step in SaveStep::ORDER {
            let outcome = match step {
                SaveStep::SalaryTime => api
                    .save_salary_time(&self.salary)
                    .and_then(|r| check_outcome(step, r))
                    .map(|r| report.salary = r),
                SaveStep::WorkingTime => api
                    .save_working_time(&self.working)
                    .and_then(|r| check_outcome(step, r))
                    .map(|r| report.working = r),
                SaveStep::ProjectTime => api
                    .save_project_time(&self.project)
                    .and_then(|r| check_outcome(step, r))
                    .map(|r| report.project = r),
            };
            outcome.map_err(|e| (step, e))?;
        }
        Ok(report)
    }
}

fn check_outcome<R: SaveOutcome>(step: SaveStep, response: R) -> Result<R> {
    if !response.accepted() {
        let messages = response.messages();
        warn!(step = %step, messages = ?messages, "Save step rejected");
        return Err(QbisError::SaveRejected(SaveRejection::new(step, messages)));
    }
    let warnings = response.warnings();
    if !warnings.is_empty() {
        debug!(step = %step, warnings = ?warnings, "Save step accepted with warnings");
    }
    Ok(response)
}

fn salary_rows(rows: &[SalaryTime]) -> Result<Vec<SalaryTime>> {
    rows.iter()
        .map(|row| {
            let mut row = row.clone();
            for day in &mut row.days {
                day.day_date = wire_date_to_iso(&day.day_date)?;
            }
            Ok(row)
        })
        .collect()
}

fn working_rows(rows: &[WorkingTime]) -> Result<Vec<WorkingTime>> {
    rows.iter()
        .map(|row| {
            let mut row = row.clone();
            row.day_date = wire_date_to_iso(&row.day_date)?;
            for pause in &mut row.breaks {
                pause.break_date = wire_date_to_iso(&pause.break_date)?;
            }
            Ok(row)
        })
        .collect()
}

fn project_rows(rows: &[ProjectTime]) -> Result<Vec<ProjectTime>> {
    rows.iter()
        .map(|row| {
            let mut row = row.clone();
            for day in &mut row.days {
                day.day_date = wire_date_to_iso(&day.day_date)?;
            }
            Ok(row)
        })
        .collect()
}

impl Week {
    /// Write the snapshot back and re-fetch it.
    ///
    /// # Errors
    /// - `NoChanges` if the week carries no local edits.
    /// - `Format` if a day date of the snapshot cannot be re-encoded.
    /// - `SaveRejected` or `Transport` for the first step that fails. The
    ///   week stays dirty and the snapshot is left as edited.
    /// - Errors of the re-fetch after all steps were accepted. The data
    ///   is saved in that case; the week stays dirty until `update`
    ///   succeeds.
    pub fn save(&mut self) -> Result<SaveReport> {
        if !self.dirty {
            return Err(QbisError::NoChanges);
        }

        let batch = SaveBatch::from_week(self)?;
        self.last_save = SaveState::Saving;
        debug!(employee_id = %self.employee, from = %batch.salary.from_date, "Saving week");

        match batch.commit(self.api()) {
            Ok(report) => {
                self.last_save = SaveState::Saved;
                info!(employee_id = %self.employee, from = %batch.salary.from_date, "Saved week");
                self.replace_snapshot()?;
                Ok(report)
            }
            Err((step, err)) => {
                self.last_save = SaveState::Failed(step);
                warn!(employee_id = %self.employee, step = %step, error = %err, "Save aborted");
                Err(err)
            }
        }
    }
}
