//! Punch lifecycle: open, close, and void attendance records.

use serde::Serialize;

use crate::db::{
    AttendanceQuery, AttendanceRepository, FullRepository, SummaryRepository, UserRepository,
};
use crate::models::{summary_id, AttendanceRecord, DailySummary, PunchOut};

use super::clock::Clock;
use super::error::{ServiceError, ServiceResult};
use super::metrics::{self, ScheduleWindow};
use super::summary;

/// Current punch state for one user.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PunchStatus {
    pub punched_in: bool,
    pub open_punch: Option<AttendanceRecord>,
    pub today_summary: Option<DailySummary>,
}

/// Look up a user's open punch, if any.
async fn find_open_punch(
    repo: &dyn FullRepository,
    uid: &str,
) -> ServiceResult<Option<AttendanceRecord>> {
    let mut open = repo
        .query_attendance(&AttendanceQuery::open_for(uid))
        .await?;
    Ok(open.pop())
}

/// Punch state plus today's rollup.
///
/// The rollup is keyed by today's UTC date, while summaries are written
/// under the punch's local work date; near local midnight the two disagree
/// and `today_summary` can be absent even though the local day has one.
pub async fn status(
    repo: &dyn FullRepository,
    clock: &dyn Clock,
    uid: &str,
) -> ServiceResult<PunchStatus> {
    let open_punch = find_open_punch(repo, uid).await?;
    let today_utc = clock.now().date_naive();
    let today_summary = repo.get_summary(&summary_id(uid, today_utc)).await?;
    Ok(PunchStatus {
        punched_in: open_punch.is_some(),
        open_punch,
        today_summary,
    })
}

/// Open a new punch pair.
///
/// The single-open-punch invariant is enforced by read-then-write without a
/// transaction; concurrent punch-ins from one user can race past it.
pub async fn punch_in(
    repo: &dyn FullRepository,
    clock: &dyn Clock,
    uid: &str,
) -> ServiceResult<AttendanceRecord> {
    if find_open_punch(repo, uid).await?.is_some() {
        return Err(ServiceError::Conflict(
            "You already have an open punch".to_string(),
        ));
    }

    let now = clock.now();
    let mut record = AttendanceRecord {
        id: String::new(),
        uid: uid.to_string(),
        punch_in: now,
        punch_out: PunchOut::Open,
        admin_edited: false,
        created_at: now,
        updated_at: now,
    };
    record.id = repo.create_attendance(&record).await?;

    tracing::info!(uid, attendance_id = %record.id, "punch-in recorded");
    Ok(record)
}

/// Close the user's open punch pair and fold it into the daily summary.
pub async fn punch_out(
    repo: &dyn FullRepository,
    clock: &dyn Clock,
    uid: &str,
) -> ServiceResult<AttendanceRecord> {
    let mut record = find_open_punch(repo, uid)
        .await?
        .ok_or_else(|| ServiceError::NotFound("No open punch found".to_string()))?;

    let user = repo.get_user(uid).await.map_err(|e| {
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

    let now = clock.now();
    let computed = metrics::compute(record.punch_in, now, window);
    record.punch_out = PunchOut::Closed {
        at: now,
        metrics: computed,
    };
    record.updated_at = now;
    repo.update_attendance(&record).await?;

    summary::upsert_for_close(repo, clock, &record).await?;

    tracing::info!(uid, attendance_id = %record.id, "punch-out recorded");
    Ok(record)
}

/// Void an open punch. The voided record stays in the store but is excluded
/// from every aggregation, and no longer satisfies open-punch lookups.
pub async fn cancel_open_punch(
    repo: &dyn FullRepository,
    clock: &dyn Clock,
    uid: &str,
    attendance_id: &str,
) -> ServiceResult<AttendanceRecord> {
    let mut record = repo.get_attendance(attendance_id).await.map_err(|e| {
        if e.is_not_found() {
            ServiceError::NotFound("Attendance record not found".to_string())
        } else {
            ServiceError::from(e)
        }
    })?;

    if record.uid != uid {
        return Err(ServiceError::Forbidden(
            "This punch record does not belong to you".to_string(),
        ));
    }
    if !record.punch_out.is_open() {
        return Err(ServiceError::Conflict(
            "Punch already completed".to_string(),
        ));
    }

    let now = clock.now();
    record.punch_out = PunchOut::Voided {
        at: now,
        reason: "Cancelled by user".to_string(),
    };
    record.updated_at = now;
    repo.update_attendance(&record).await?;

    tracing::info!(uid, attendance_id, "open punch voided");
    Ok(record)
}

#[cfg(test)]
#[path = "punch_tests.rs"]
mod punch_tests;
