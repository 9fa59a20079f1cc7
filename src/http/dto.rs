//! Data Transfer Objects for the HTTP API.
//!
//! Domain types serialize with a tagged punch-out union; the wire keeps the
//! legacy flat shape instead: `punchOut` is `null` while open, the string
//! `"VOIDED"` for a cancelled punch, or the close instant, with `metrics`
//! and void fields as siblings. Conversions live here so the domain stays
//! free of wire concerns.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{AttendanceRecord, Metrics, PunchOut};
use crate::services::punch::PunchStatus;

/// Sentinel value for a voided punch-out on the wire.
const VOIDED_SENTINEL: &str = "VOIDED";

/// Wire value of the `punchOut` field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PunchOutField {
    Instant(DateTime<Utc>),
    Sentinel(String),
}

/// Attendance record in its wire shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecordDto {
    pub id: String,
    pub uid: String,
    pub punch_in: DateTime<Utc>,
    pub punch_out: Option<PunchOutField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Metrics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voided: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voided_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub void_reason: Option<String>,
    pub admin_edited: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<AttendanceRecord> for AttendanceRecordDto {
    fn from(record: AttendanceRecord) -> Self {
        let (punch_out, metrics, voided, voided_at, void_reason) = match record.punch_out {
            PunchOut::Open => (None, None, None, None, None),
            PunchOut::Voided { at, reason } => (
                Some(PunchOutField::Sentinel(VOIDED_SENTINEL.to_string())),
                None,
                Some(true),
                Some(at),
                Some(reason),
            ),
            PunchOut::Closed { at, metrics } => (
                Some(PunchOutField::Instant(at)),
                Some(metrics),
                None,
                None,
                None,
            ),
        };
        Self {
            id: record.id,
            uid: record.uid,
            punch_in: record.punch_in,
            punch_out,
            metrics,
            voided,
            voided_at,
            void_reason,
            admin_edited: record.admin_edited,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// Response for the status endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub punched_in: bool,
    pub open_punch: Option<AttendanceRecordDto>,
    pub today_summary: Option<crate::models::DailySummary>,
}

impl From<PunchStatus> for StatusResponse {
    fn from(status: PunchStatus) -> Self {
        Self {
            punched_in: status.punched_in,
            open_punch: status.open_punch.map(Into::into),
            today_summary: status.today_summary,
        }
    }
}

/// Response for a successful punch-in.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PunchInResponse {
    pub id: String,
    pub punch_in: DateTime<Utc>,
}

/// Response for a successful punch-out.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PunchOutResponse {
    pub id: String,
    pub punch_out: DateTime<Utc>,
    pub metrics: Metrics,
}

/// Response for a voided punch.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelResponse {
    pub id: String,
    pub voided: bool,
}

/// Response for an admin hard-delete.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    pub id: String,
    pub deleted: bool,
}

/// Query parameters for date-range endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRangeQuery {
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

/// Query parameter for single-date endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DateQuery {
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// All-employee daily report envelope.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyReportResponse {
    pub date: NaiveDate,
    pub count: usize,
    pub data: Vec<crate::services::reports::DailyReportRow>,
}

/// All-employee weekly report envelope.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyReportResponse {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub count: usize,
    pub data: Vec<crate::services::reports::WeeklyReportRow>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Store connection status
    pub database: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(punch_out: PunchOut) -> AttendanceRecord {
        let t = Utc.with_ymd_and_hms(2024, 1, 15, 1, 0, 0).unwrap();
        AttendanceRecord {
            id: "a1".to_string(),
            uid: "u1".to_string(),
            punch_in: t,
            punch_out,
            admin_edited: false,
            created_at: t,
            updated_at: t,
        }
    }

    #[test]
    fn test_open_record_serializes_null_punch_out() {
        let dto = AttendanceRecordDto::from(record(PunchOut::Open));
        let json = serde_json::to_value(&dto).unwrap();
        assert!(json["punchOut"].is_null());
        assert!(json.get("metrics").is_none());
        assert!(json.get("voided").is_none());
    }

    #[test]
    fn test_voided_record_serializes_sentinel() {
        let at = Utc.with_ymd_and_hms(2024, 1, 15, 2, 0, 0).unwrap();
        let dto = AttendanceRecordDto::from(record(PunchOut::Voided {
            at,
            reason: "Cancelled by user".to_string(),
        }));
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["punchOut"], "VOIDED");
        assert_eq!(json["voided"], true);
        assert_eq!(json["voidReason"], "Cancelled by user");
    }

    #[test]
    fn test_closed_record_serializes_instant_and_metrics() {
        let at = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
        let metrics = Metrics {
            work_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            regular_hours: 9.0,
            overtime_hours: 0.0,
            night_diff_hours: 0.0,
            total_worked_hours: 9.0,
            late_minutes: 0,
            undertime_minutes: 0,
        };
        let dto = AttendanceRecordDto::from(record(PunchOut::Closed { at, metrics }));
        let json = serde_json::to_value(&dto).unwrap();
        assert!(json["punchOut"].is_string());
        assert_eq!(json["metrics"]["workDate"], "2024-01-15");
        assert_eq!(json["metrics"]["regularHours"], 9.0);
        assert!(json.get("voided").is_none());
    }
}
