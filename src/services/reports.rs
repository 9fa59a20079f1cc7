//! Read-side reporting aggregations.
//!
//! Everything here is derived from stored summaries and records; nothing is
//! recomputed from raw punches. Hour totals keep the same 2-decimal
//! re-rounding discipline as the aggregator, minute totals sum exactly.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};
use serde::Serialize;

use crate::db::{
    AttendanceQuery, AttendanceRepository, FullRepository, SummaryRepository, UserRepository,
};
use crate::models::time::round2;
use crate::models::{summary_id, AttendanceRecord, DailySummary, User};

use super::error::{ServiceError, ServiceResult};

/// Display fields attached to admin reports.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDisplay {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
}

impl From<&User> for EmployeeDisplay {
    fn from(user: &User) -> Self {
        Self {
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            department: user.department.clone(),
            position: user.position.clone(),
        }
    }
}

/// Aggregated totals across a set of daily summaries.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryTotals {
    pub regular_hours: f64,
    pub overtime_hours: f64,
    pub night_diff_hours: f64,
    pub total_worked_hours: f64,
    pub late_minutes: i64,
    pub undertime_minutes: i64,
}

impl SummaryTotals {
    fn add(&mut self, day: &DailySummary) {
        self.regular_hours = round2(self.regular_hours + day.regular_hours);
        self.overtime_hours = round2(self.overtime_hours + day.overtime_hours);
        self.night_diff_hours = round2(self.night_diff_hours + day.night_diff_hours);
        self.total_worked_hours = round2(self.total_worked_hours + day.total_worked_hours);
        self.late_minutes += day.late_minutes;
        self.undertime_minutes += day.undertime_minutes;
    }
}

/// One user's week: totals plus the contributing days in ascending order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklySummary {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub totals: SummaryTotals,
    pub days: Vec<DailySummary>,
}

/// One employee's row in the all-employee daily report.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyReportRow {
    #[serde(flatten)]
    pub employee: EmployeeDisplay,
    #[serde(flatten)]
    pub summary: DailySummary,
}

/// One employee's row in the all-employee weekly report.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyReportRow {
    pub uid: String,
    #[serde(flatten)]
    pub employee: EmployeeDisplay,
    pub totals: SummaryTotals,
    pub days: Vec<DailySummary>,
}

/// Enclosing Monday-to-Sunday week of `today`.
pub fn default_week(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = today - Duration::days(today.weekday().num_days_from_monday() as i64);
    (start, start + Duration::days(6))
}

/// UTC range covering `[start 00:00:00.000Z, end 23:59:59.999Z]`.
fn utc_day_range(start: NaiveDate, end: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let from = start.and_time(NaiveTime::MIN).and_utc();
    let to = end.and_time(NaiveTime::MIN).and_utc() + Duration::days(1) - Duration::milliseconds(1);
    (from, to)
}

/// A user's punch records with punch-in inside the date range, newest first.
pub async fn employee_punches(
    repo: &dyn FullRepository,
    uid: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> ServiceResult<Vec<AttendanceRecord>> {
    let (from, to) = utc_day_range(start, end);
    let mut records = repo
        .query_attendance(&AttendanceQuery {
            uid: Some(uid.to_string()),
            punch_in_range: Some((from, to)),
            ..Default::default()
        })
        .await?;
    records.sort_by_key(|r| std::cmp::Reverse(r.punch_in));
    Ok(records)
}

/// Point read of one user's rollup for one work date.
pub async fn daily_summary(
    repo: &dyn FullRepository,
    uid: &str,
    work_date: NaiveDate,
) -> ServiceResult<DailySummary> {
    repo.get_summary(&summary_id(uid, work_date))
        .await?
        .ok_or_else(|| ServiceError::NotFound("No summary for this date".to_string()))
}

/// One user's summaries in `[start, end]` with accumulated totals.
pub async fn weekly_summary(
    repo: &dyn FullRepository,
    uid: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> ServiceResult<WeeklySummary> {
    let days = repo.summaries_by_uid_in_range(uid, start, end).await?;
    let mut totals = SummaryTotals::default();
    for day in &days {
        totals.add(day);
    }
    Ok(WeeklySummary {
        start_date: start,
        end_date: end,
        totals,
        days,
    })
}

/// Display fields for each unique uid in the input, missing users skipped.
async fn employee_displays(
    repo: &dyn FullRepository,
    uids: impl Iterator<Item = String>,
) -> ServiceResult<HashMap<String, EmployeeDisplay>> {
    let mut displays = HashMap::new();
    for uid in uids {
        if displays.contains_key(&uid) {
            continue;
        }
        match repo.get_user(&uid).await {
            Ok(user) => {
                displays.insert(uid, EmployeeDisplay::from(&user));
            }
            Err(e) if e.is_not_found() => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(displays)
}

/// Every employee's rollup for one work date, enriched with display fields.
pub async fn all_daily_reports(
    repo: &dyn FullRepository,
    work_date: NaiveDate,
) -> ServiceResult<Vec<DailyReportRow>> {
    let summaries = repo.summaries_by_work_date(work_date).await?;
    let displays = employee_displays(repo, summaries.iter().map(|s| s.uid.clone())).await?;
    Ok(summaries
        .into_iter()
        .map(|summary| DailyReportRow {
            employee: displays.get(&summary.uid).cloned().unwrap_or_default(),
            summary,
        })
        .collect())
}

/// Every employee's weekly totals over `[start, end]`, grouped per user with
/// days ascending.
pub async fn all_weekly_reports(
    repo: &dyn FullRepository,
    start: NaiveDate,
    end: NaiveDate,
) -> ServiceResult<Vec<WeeklyReportRow>> {
    let users = repo.list_users().await?;
    let mut rows = Vec::new();
    for user in &users {
        let days = repo
            .summaries_by_uid_in_range(&user.uid, start, end)
            .await?;
        if days.is_empty() {
            continue;
        }
        let mut totals = SummaryTotals::default();
        for day in &days {
            totals.add(day);
        }
        rows.push(WeeklyReportRow {
            uid: user.uid.clone(),
            employee: EmployeeDisplay::from(user),
            totals,
            days,
        });
    }
    rows.sort_by(|a, b| a.uid.cmp(&b.uid));
    Ok(rows)
}

#[cfg(test)]
#[path = "reports_tests.rs"]
mod reports_tests;
