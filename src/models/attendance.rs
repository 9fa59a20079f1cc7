//! Attendance records: one punch pair per record.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::time::work_date_of;

/// Per-pair labor metrics produced by the metrics engine.
///
/// Hours are rounded to 2 decimals, minute fields to whole minutes.
/// `total_worked_hours` is the regular + overtime category sum; early
/// arrival before schedule start is excluded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    /// Local calendar date of the punch-in.
    pub work_date: NaiveDate,
    pub regular_hours: f64,
    pub overtime_hours: f64,
    pub night_diff_hours: f64,
    pub total_worked_hours: f64,
    pub late_minutes: i64,
    pub undertime_minutes: i64,
}

/// Completion state of a punch pair.
///
/// A record is created `Open`, moves to `Closed` exactly once on punch-out
/// (or any number of times under admin edits), or to `Voided` when the
/// employee cancels an open punch. Metrics exist if and only if the pair is
/// closed, so the variant carries them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum PunchOut {
    Open,
    Voided {
        at: DateTime<Utc>,
        reason: String,
    },
    Closed {
        at: DateTime<Utc>,
        metrics: Metrics,
    },
}

impl PunchOut {
    pub fn is_open(&self) -> bool {
        matches!(self, PunchOut::Open)
    }

    pub fn is_voided(&self) -> bool {
        matches!(self, PunchOut::Voided { .. })
    }

    /// Punch-out instant for a completed pair.
    pub fn closed_at(&self) -> Option<DateTime<Utc>> {
        match self {
            PunchOut::Closed { at, .. } => Some(*at),
            _ => None,
        }
    }

    /// Metrics for a completed pair.
    pub fn metrics(&self) -> Option<&Metrics> {
        match self {
            PunchOut::Closed { metrics, .. } => Some(metrics),
            _ => None,
        }
    }
}

/// One punch pair owned by a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    /// Store-assigned unique identifier.
    pub id: String,
    /// Owning user.
    pub uid: String,
    pub punch_in: DateTime<Utc>,
    pub punch_out: PunchOut,
    /// Set when an administrator has mutated the record.
    #[serde(default)]
    pub admin_edited: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AttendanceRecord {
    /// The local day this record belongs to: the metrics work date when the
    /// pair is complete, otherwise the local date of the punch-in.
    pub fn work_date(&self) -> NaiveDate {
        self.punch_out
            .metrics()
            .map(|m| m.work_date)
            .unwrap_or_else(|| work_date_of(self.punch_in))
    }

    /// Completed and not voided, so it participates in aggregation.
    pub fn counts_for_aggregation(&self) -> bool {
        matches!(self.punch_out, PunchOut::Closed { .. })
    }
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

    fn metrics(date: NaiveDate) -> Metrics {
        Metrics {
            work_date: date,
            regular_hours: 9.0,
            overtime_hours: 0.0,
            night_diff_hours: 0.0,
            total_worked_hours: 9.0,
            late_minutes: 0,
            undertime_minutes: 0,
        }
    }

    #[test]
    fn test_open_record_state() {
        let rec = record(PunchOut::Open);
        assert!(rec.punch_out.is_open());
        assert!(!rec.counts_for_aggregation());
        assert!(rec.punch_out.metrics().is_none());
        // Falls back to the local date of the punch-in
        assert_eq!(rec.work_date(), NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    }

    #[test]
    fn test_closed_record_state() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let at = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
        let rec = record(PunchOut::Closed {
            at,
            metrics: metrics(date),
        });
        assert!(rec.counts_for_aggregation());
        assert_eq!(rec.punch_out.closed_at(), Some(at));
        assert_eq!(rec.work_date(), date);
    }

    #[test]
    fn test_voided_record_excluded() {
        let at = Utc.with_ymd_and_hms(2024, 1, 15, 2, 0, 0).unwrap();
        let rec = record(PunchOut::Voided {
            at,
            reason: "Cancelled by user".to_string(),
        });
        assert!(rec.punch_out.is_voided());
        assert!(!rec.punch_out.is_open());
        assert!(!rec.counts_for_aggregation());
    }
}
