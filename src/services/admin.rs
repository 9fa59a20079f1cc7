//! Administrative mutations of attendance history.
//!
//! Unlike the real-time close path, every mutation here invalidates the
//! order assumption behind summary upserts, so the affected day is rebuilt
//! from scratch.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::db::{AttendanceRepository, FullRepository, UserRepository};
use crate::models::{AttendanceRecord, PunchOut, User, WorkSchedule};

use super::clock::Clock;
use super::error::{ServiceError, ServiceResult};
use super::metrics::{self, ScheduleWindow};
use super::summary;

/// Partial punch-pair override; omitted fields fall back to stored values.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PunchEdit {
    #[serde(default)]
    pub punch_in: Option<DateTime<Utc>>,
    #[serde(default)]
    pub punch_out: Option<DateTime<Utc>>,
}

/// Schedule or timezone assignment for a user.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleAssignment {
    #[serde(default)]
    pub schedule: Option<WorkSchedule>,
    #[serde(default)]
    pub timezone: Option<String>,
}

/// Rewrite a punch pair.
///
/// When the resulting pair is complete the metrics are recomputed against
/// the owner's current schedule and the day's summary is rebuilt. A pair
/// left open keeps its metrics untouched and triggers no rebuild.
pub async fn edit_punch(
    repo: &dyn FullRepository,
    clock: &dyn Clock,
    punch_id: &str,
    edit: PunchEdit,
) -> ServiceResult<AttendanceRecord> {
    if edit.punch_in.is_none() && edit.punch_out.is_none() {
        return Err(ServiceError::BadRequest(
            "Provide punchIn or punchOut".to_string(),
        ));
    }

    let mut record = repo.get_attendance(punch_id).await.map_err(|e| {
        if e.is_not_found() {
            ServiceError::NotFound("Attendance record not found".to_string())
        } else {
            ServiceError::from(e)
        }
    })?;

    let new_punch_in = edit.punch_in.unwrap_or(record.punch_in);
    let new_punch_out = edit.punch_out.or_else(|| record.punch_out.closed_at());

    record.punch_in = new_punch_in;
    record.admin_edited = true;
    record.updated_at = clock.now();

    match new_punch_out {
        Some(po) => {
            let user = repo.get_user(&record.uid).await.map_err(|e| {
                if e.is_not_found() {
                    ServiceError::NotFound("User profile not found".to_string())
                } else {
                    ServiceError::from(e)
                }
            })?;
            let window = user
                .schedule
                .as_ref()
                .and_then(ScheduleWindow::from_schedule)
                .ok_or_else(|| {
                    ServiceError::PreconditionFailed(
                        "No work schedule configured for user".to_string(),
                    )
                })?;

            let computed = metrics::compute(new_punch_in, po, window);
            let work_date = computed.work_date;
            record.punch_out = PunchOut::Closed {
                at: po,
                metrics: computed,
            };
            repo.update_attendance(&record).await?;
            summary::rebuild(repo, clock, &record.uid, work_date).await?;
        }
        None => {
            // Still open: only the punch-in moved.
            repo.update_attendance(&record).await?;
        }
    }

    tracing::info!(punch_id, uid = %record.uid, "punch edited by admin");
    Ok(record)
}

/// Hard-delete a punch pair and rebuild the day it belonged to.
pub async fn delete_punch(
    repo: &dyn FullRepository,
    clock: &dyn Clock,
    punch_id: &str,
) -> ServiceResult<AttendanceRecord> {
    let record = repo.get_attendance(punch_id).await.map_err(|e| {
        if e.is_not_found() {
            ServiceError::NotFound("Attendance record not found".to_string())
        } else {
            ServiceError::from(e)
        }
    })?;

    let work_date = record.work_date();
    repo.delete_attendance(punch_id).await?;
    summary::rebuild(repo, clock, &record.uid, work_date).await?;

    tracing::info!(punch_id, uid = %record.uid, "punch deleted by admin");
    Ok(record)
}

/// Assign a schedule and/or timezone to a user.
///
/// Past records keep the schedule their metrics were computed against;
/// nothing is recomputed retroactively.
pub async fn assign_schedule(
    repo: &dyn FullRepository,
    clock: &dyn Clock,
    uid: &str,
    assignment: ScheduleAssignment,
) -> ServiceResult<User> {
    if assignment.schedule.is_none() && assignment.timezone.is_none() {
        return Err(ServiceError::BadRequest(
            "Provide a schedule or timezone".to_string(),
        ));
    }
    if let Some(schedule) = &assignment.schedule {
        if !schedule.is_valid() {
            return Err(ServiceError::BadRequest(
                "Schedule must be HH:MM bounds with start before end".to_string(),
            ));
        }
    }

    let mut user = repo.get_user(uid).await.map_err(|e| {
        if e.is_not_found() {
            ServiceError::NotFound("User profile not found".to_string())
        } else {
            ServiceError::from(e)
        }
    })?;

    if let Some(schedule) = assignment.schedule {
        user.schedule = Some(schedule);
    }
    if let Some(timezone) = assignment.timezone {
        user.timezone = Some(timezone);
    }
    user.updated_at = clock.now();
    repo.update_user(&user).await?;

    tracing::info!(uid, "schedule assignment updated");
    Ok(user)
}

#[cfg(test)]
#[path = "admin_tests.rs"]
mod admin_tests;
