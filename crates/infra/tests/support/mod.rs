//! Scripted Qbis web application on a `wiremock` server.

#![allow(dead_code)]

use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Monday 2024-01-15 00:00 Europe/Stockholm.
pub const MONDAY: i64 = 1_705_273_200;

pub const EMPLOYEE: &str = "4711";

pub fn wire_day(index: i64) -> String {
    format!("/Date({}000)/", MONDAY + index * 86_400)
}

/// A week with an 8h schedule on weekdays and one default salary activity.
pub fn timesheet(worked_hours: f64) -> Value {
    let days: Vec<i64> = (0..7).collect();
    json!({
        "daySettings": days.iter().map(|&i| json!({
            "DayDate": wire_day(i),
            "IsHoliday": false,
            "HasSchedule": i < 5,
            "MySchedule": { "TotalMinutes": if i < 5 { 480 } else { 0 } },
        })).collect::<Vec<_>>(),
        "workingTimeDays": days.iter().map(|&i| json!({
            "DayDate": wire_day(i),
            "Arrive": 0,
            "Leave": 0,
            "Lunch": 0,
            "Total": 0,
            "ID": 900 + i,
        })).collect::<Vec<_>>(),
        "listOfSalaryTime": [{
            "ActivityId": 1,
            "ActivityName": "Komp",
            "AllowNegative": true,
            "AllowPositive": true,
            "IsDefault": true,
            "Days": days.iter().map(|&i| json!({ "DayDate": wire_day(i), "DayMinutes": 0, "DayDays": 0 })).collect::<Vec<_>>(),
        }],
        "listOfSalaryActivities": [{ "Key": 10, "Value": "Overtime" }],
        "listOfProjectTime": [],
        "summaryData": {
            "HasSchedule": true,
            "ScheduledHours": 40.0,
            "WorkedHours": worked_hours,
            "WeekStatus": 0,
        },
        "weekComment": "kept verbatim",
    })
}

pub fn overview_page(employee: &str) -> String {
    format!(
        "<html><head><script src=\"/app.js\"></script></head><body>\
         <script>var currentLogin = {{\n    currentUser: '{employee}',\n    isAdmin: false\n}};</script>\
         </body></html>"
    )
}

/// Login page, login form and an overview page naming [`EMPLOYEE`].
pub async fn mount_login(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/Login/Login"))
        .respond_with(ResponseTemplate::new(200).insert_header("set-cookie", "ASP.NET_SessionId=s1; Path=/"))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/Login/Login/Authenticate"))
        .respond_with(ResponseTemplate::new(200))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/Time/TimeOverview"))
        .respond_with(ResponseTemplate::new(200).set_body_string(overview_page(EMPLOYEE)))
        .mount(server)
        .await;
}

/// Paths of every request the server saw, in order.
pub async fn request_paths(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|r| r.url.path().to_string())
        .collect()
}
