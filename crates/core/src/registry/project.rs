//! Project activities and the company, project and activity catalog

use qbis_domain::{ActivityId, ActivityOverview, Project, ProjectCompany, ProjectTime, Result};
use tracing::debug;

use crate::week::Week;

/// A project activity, either from the snapshot or from the catalog.
#[derive(Debug, Clone)]
pub struct ProjectActivity<'w> {
    week: &'w Week,
    id: ActivityId,
    name: String,
    project_name: String,
    customer_name: String,
    read_only: bool,
}

impl<'w> ProjectActivity<'w> {
    fn from_record(week: &'w Week, record: &ProjectTime) -> Self {
        Self {
            week,
            id: record.activity_id,
            name: record.activity_name.clone(),
            project_name: record.project_name.clone(),
            customer_name: record.customer_name.clone(),
            read_only: false,
        }
    }

    pub fn id(&self) -> ActivityId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    /// Closed for new time by the project owner.
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// True if the snapshot holds minutes for this activity on any day.
    pub fn in_week(&self) -> bool {
        self.record().is_some_and(ProjectTime::has_minutes)
    }

    pub fn record(&self) -> Option<&'w ProjectTime> {
        self.week.snapshot().list_of_project_time.iter().find(|r| r.activity_id == self.id)
    }

    /// # Errors
    /// Propagates errors of the overview fetch.
    pub fn overview(&self) -> Result<ActivityOverview> {
        self.week.project_activity_overview(self.id)
    }
}

/// Snapshot rows with minutes on at least one day, in server order.
pub fn in_week(week: &Week) -> Vec<ProjectActivity<'_>> {
    week.snapshot()
        .list_of_project_time
        .iter()
        .filter(|r| r.has_minutes())
        .map(|r| ProjectActivity::from_record(week, r))
        .collect()
}

/// Snapshot rows with minutes on day `index`.
pub fn logged_on(week: &Week, index: usize) -> Vec<ProjectActivity<'_>> {
    week.snapshot()
        .list_of_project_time
        .iter()
        .filter(|r| r.days.get(index).is_some_and(|d| d.day_minutes != 0))
        .map(|r| ProjectActivity::from_record(week, r))
        .collect()
}

/// Companies and projects the employee may book on. Activities are
/// fetched per project when asked for.
#[derive(Debug)]
pub struct ProjectCatalog<'w> {
    week: &'w Week,
    companies: Vec<ProjectCompany>,
}

impl<'w> ProjectCatalog<'w> {
    /// # Errors
    /// Propagates errors of the company listing.
    pub fn load(week: &'w Week) -> Result<Self> {
        let companies = week.api().fetch_project_companies(week.employee(), week.span())?;
        debug!(employee_id = %week.employee(), companies = companies.len(), "Loaded project catalog");
        Ok(Self { week, companies })
    }

    pub fn companies(&self) -> Vec<Company<'_, 'w>> {
        self.companies.iter().map(|company| Company { catalog: self, company }).collect()
    }

    /// Every project of every company.
    pub fn projects(&self) -> Vec<CatalogProject<'_, 'w>> {
        self.companies().into_iter().flat_map(|c| c.projects()).collect()
    }

    /// Activities of every project, company by company.
    ///
    /// # Errors
    /// The first failing activity listing. Later projects are not fetched.
    pub fn activities(&self) -> Result<Vec<ProjectActivity<'w>>> {
        let mut all = Vec::new();
        for project in self.projects() {
            all.extend(project.activities()?);
        }
        Ok(all)
    }

    /// Catalog activities without minutes in the week.
    ///
    /// # Errors
    /// See [`ProjectCatalog::activities`].
    pub fn available(&self) -> Result<Vec<ProjectActivity<'w>>> {
        Ok(self.activities()?.into_iter().filter(|a| !a.in_week()).collect())
    }
}

/// One customer company of a [`ProjectCatalog`].
#[derive(Debug, Clone, Copy)]
pub struct Company<'c, 'w> {
    catalog: &'c ProjectCatalog<'w>,
    company: &'c ProjectCompany,
}

impl<'c, 'w> Company<'c, 'w> {
    pub fn id(&self) -> i64 {
        self.company.company_id
    }

    pub fn name(&self) -> &'c str {
        &self.company.company_name
    }

    pub fn projects(&self) -> Vec<CatalogProject<'c, 'w>> {
        let catalog = self.catalog;
        let company = self.company;
        company.projects.iter().map(|project| CatalogProject { catalog, company, project }).collect()
    }
}

/// One project of a [`Company`].
#[derive(Debug, Clone, Copy)]
pub struct CatalogProject<'c, 'w> {
    catalog: &'c ProjectCatalog<'w>,
    company: &'c ProjectCompany,
    project: &'c Project,
}

impl<'c, 'w> CatalogProject<'c, 'w> {
    pub fn id(&self) -> i64 {
        self.project.id
    }

    pub fn name(&self) -> &'c str {
        &self.project.name
    }

    /// Project code, empty when the company does not use codes.
    pub fn code(&self) -> &'c str {
        &self.project.code
    }

    pub fn company_name(&self) -> &'c str {
        &self.company.company_name
    }

    /// # Errors
    /// Propagates errors of the activity listing.
    pub fn activities(&self) -> Result<Vec<ProjectActivity<'w>>> {
        let week = self.catalog.week;
        let items = week.api().fetch_project_activities(week.employee(), week.span(), self.project.id)?;
        Ok(items
            .into_iter()
            .map(|item| ProjectActivity {
                week,
                id: item.id,
                name: item.name,
                project_name: self.project.name.clone(),
                customer_name: self.company.company_name.clone(),
                read_only: item.read_only,
            })
            .collect())
    }
}
