//! Employee profile and work schedule types.

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use super::time::parse_hhmm;

/// Daily work schedule as local wall-clock `HH:MM` bounds.
///
/// Both times sit on the same calendar day with `start < end` on the clock
/// face. The strings are stored as-is; parsing happens on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkSchedule {
    pub start: String,
    pub end: String,
}

impl WorkSchedule {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Schedule start as a wall-clock time, if well-formed.
    pub fn start_time(&self) -> Option<NaiveTime> {
        parse_hhmm(&self.start)
    }

    /// Schedule end as a wall-clock time, if well-formed.
    pub fn end_time(&self) -> Option<NaiveTime> {
        parse_hhmm(&self.end)
    }

    /// Validate both bounds parse and `start < end`.
    pub fn is_valid(&self) -> bool {
        match (self.start_time(), self.end_time()) {
            (Some(s), Some(e)) => s < e,
            _ => false,
        }
    }
}

/// Employee profile.
///
/// `timezone` is carried for forward compatibility but the metrics engine
/// interprets every schedule in the fixed local zone.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub uid: String,
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub schedule: Option<WorkSchedule>,
    #[serde(default)]
    pub timezone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Patch for profile display fields. Schedule and timezone changes go
/// through the admin schedule assignment instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.department.is_none()
            && self.position.is_none()
    }
}
