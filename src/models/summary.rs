//! Per-day attendance rollups.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One punch pair as listed inside a daily summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PunchEntry {
    pub attendance_id: String,
    pub punch_in: DateTime<Utc>,
    pub punch_out: DateTime<Utc>,
}

/// Rollup of all completed, non-voided punches for one `(uid, work_date)`.
///
/// Exists only while the day has at least one completed record. Hour totals
/// are sums over the day's records; `late_minutes` comes from the earliest
/// punch-in and `undertime_minutes` from the latest punch-out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    pub uid: String,
    pub work_date: NaiveDate,
    pub regular_hours: f64,
    pub overtime_hours: f64,
    pub night_diff_hours: f64,
    pub total_worked_hours: f64,
    pub late_minutes: i64,
    pub undertime_minutes: i64,
    /// Punch pairs in ascending punch-in order.
    pub punches: Vec<PunchEntry>,
    pub updated_at: DateTime<Utc>,
}

/// Deterministic summary document id: `uid_YYYY-MM-DD`.
pub fn summary_id(uid: &str, work_date: NaiveDate) -> String {
    format!("{}_{}", uid, work_date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_id_format() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(summary_id("user-42", date), "user-42_2024-01-05");
    }
}
