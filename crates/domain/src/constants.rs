//! Constants of the Qbis web application
//!
//! Endpoint paths are relative to the base URL and carry no leading slash.

pub const DEFAULT_BASE_URL: &str = "https://login.qbis.se";
pub const DEFAULT_TIMEZONE: &str = "Europe/Stockholm";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

pub mod endpoints {
    pub const LOGIN: &str = "Login/Login";
    pub const AUTHENTICATE: &str = "Login/Login/Authenticate";
    pub const TIME_OVERVIEW: &str = "Time/TimeOverview";

    pub const TIMESHEET_DATA: &str = "Time/Timesheet/GetTimeSheetData";

    pub const SALARY_ACTIVITY_INFORMATION: &str = "Time/TimesheetSalaryTime/GetActivityInformation";
    pub const SALARY_ACTIVITY_OVERVIEW: &str = "Time/TimesheetSalaryTime/GetActivityOverview";
    pub const SAVE_SALARY_TIME: &str = "Time/TimesheetSalaryTime/SaveSalaryTime";

    pub const SAVE_WORKING_TIME: &str = "Time/TimesheetWorkingTime/SaveWorkingTime";

    pub const PROJECT_COMPANIES: &str = "Time/TimesheetProjectTime/GetCustomerProjectDropDown";
    pub const PROJECT_ACTIVITIES: &str = "Time/TimesheetProjectTime/GetActivityDropDown";
    pub const PROJECT_ACTIVITY_INFORMATION: &str = "Time/TimesheetProjectTime/GetActivityInformation";
    pub const PROJECT_ACTIVITY_OVERVIEW: &str = "Time/TimesheetProjectTime/GetActivityOverview";
    pub const SAVE_PROJECT_TIME: &str = "Time/TimesheetProjectTime/SaveProjectTime";
}

/// Fixed values of the login form.
pub mod login_form {
    pub const AUTHENTICATE: &str = "Log in";
    pub const LANGUAGE: &str = "lang_english";
    pub const REMEMBER_ME: &str = "true";
}

/// Property identifiers of the activity overview.
pub mod overview {
    pub const TOTAL_HOURS: &str = "activityHours";
    pub const ALLOCATED_HOURS: &str = "allocatedHours";
    pub const REGISTERED_HOURS: &str = "registeredHours";
    pub const UNIT_HOURS: &str = "unitHours";
}
