//! Daily summary aggregation.
//!
//! Two modes keep the per-(user, work date) rollup current. *Upsert* folds a
//! single freshly closed record into the existing document and assumes that
//! record is the day's latest punch, which holds on the real-time close
//! path. *Rebuild* recomputes the document from the full record set and is
//! the authoritative form; admin mutations always go through it.

use chrono::NaiveDate;

use crate::db::{AttendanceQuery, AttendanceRepository, FullRepository, SummaryRepository};
use crate::models::time::round2;
use crate::models::{summary_id, AttendanceRecord, DailySummary, PunchEntry};

use super::clock::Clock;
use super::error::{ServiceError, ServiceResult};

/// Fold a newly completed record into its day's summary, creating the
/// document if this is the day's first completed punch.
///
/// Hour totals re-round after the addition. `late_minutes` is retained from
/// the existing document: the day's first punch set it and break punch-ins
/// never overwrite it. `undertime_minutes` is replaced: only the last
/// punch-out of the day determines undertime, so an employee returning from
/// lunch naturally resets it.
pub async fn upsert_for_close(
    repo: &dyn FullRepository,
    clock: &dyn Clock,
    record: &AttendanceRecord,
) -> ServiceResult<DailySummary> {
    let (closed_at, metrics) = match (&record.punch_out.closed_at(), record.punch_out.metrics()) {
        (Some(at), Some(metrics)) => (*at, metrics),
        _ => {
            return Err(ServiceError::Internal(
                "summary upsert requires a completed record".to_string(),
            ))
        }
    };

    let id = summary_id(&record.uid, metrics.work_date);
    let entry = PunchEntry {
        attendance_id: record.id.clone(),
        punch_in: record.punch_in,
        punch_out: closed_at,
    };

    let summary = match repo.get_summary(&id).await? {
        None => DailySummary {
            uid: record.uid.clone(),
            work_date: metrics.work_date,
            regular_hours: metrics.regular_hours,
            overtime_hours: metrics.overtime_hours,
            night_diff_hours: metrics.night_diff_hours,
            total_worked_hours: metrics.total_worked_hours,
            late_minutes: metrics.late_minutes,
            undertime_minutes: metrics.undertime_minutes,
            punches: vec![entry],
            updated_at: clock.now(),
        },
        Some(mut existing) => {
            existing.regular_hours = round2(existing.regular_hours + metrics.regular_hours);
            existing.overtime_hours = round2(existing.overtime_hours + metrics.overtime_hours);
            existing.night_diff_hours = round2(existing.night_diff_hours + metrics.night_diff_hours);
            existing.total_worked_hours =
                round2(existing.total_worked_hours + metrics.total_worked_hours);
            existing.undertime_minutes = metrics.undertime_minutes;
            existing.punches.push(entry);
            existing.updated_at = clock.now();
            existing
        }
    };

    repo.set_summary(&id, &summary).await?;
    Ok(summary)
}

/// Recompute the summary for `(uid, work_date)` from the current record set.
///
/// Voided and still-open records are excluded. When no completed record
/// remains, the summary document is deleted: a day with no punches has no
/// rollup. Rebuild is idempotent and defines the summary at rest.
pub async fn rebuild(
    repo: &dyn FullRepository,
    clock: &dyn Clock,
    uid: &str,
    work_date: NaiveDate,
) -> ServiceResult<Option<DailySummary>> {
    let id = summary_id(uid, work_date);

    // Fetch everything for the user and filter in memory; punching the work
    // date through the store would demand a composite index.
    let records = repo
        .query_attendance(&AttendanceQuery::all_for(uid))
        .await?;
    let mut day: Vec<&AttendanceRecord> = records
        .iter()
        .filter(|r| r.counts_for_aggregation())
        .filter(|r| r.punch_out.metrics().map(|m| m.work_date) == Some(work_date))
        .collect();

    if day.is_empty() {
        repo.delete_summary(&id).await?;
        return Ok(None);
    }

    day.sort_by_key(|r| r.punch_in);

    let mut regular = 0.0;
    let mut overtime = 0.0;
    let mut night_diff = 0.0;
    let mut total = 0.0;
    let mut punches = Vec::with_capacity(day.len());

    for record in &day {
        // Both present on every record in `day` per the filter above.
        let metrics = match record.punch_out.metrics() {
            Some(m) => m,
            None => continue,
        };
        let closed_at = match record.punch_out.closed_at() {
            Some(at) => at,
            None => continue,
        };
        regular = round2(regular + metrics.regular_hours);
        overtime = round2(overtime + metrics.overtime_hours);
        night_diff = round2(night_diff + metrics.night_diff_hours);
        total = round2(total + metrics.total_worked_hours);
        punches.push(PunchEntry {
            attendance_id: record.id.clone(),
            punch_in: record.punch_in,
            punch_out: closed_at,
        });
    }

    let first = day.first().and_then(|r| r.punch_out.metrics());
    let last = day.last().and_then(|r| r.punch_out.metrics());

    let summary = DailySummary {
        uid: uid.to_string(),
        work_date,
        regular_hours: regular,
        overtime_hours: overtime,
        night_diff_hours: night_diff,
        total_worked_hours: total,
        late_minutes: first.map(|m| m.late_minutes).unwrap_or(0),
        undertime_minutes: last.map(|m| m.undertime_minutes).unwrap_or(0),
        punches,
        updated_at: clock.now(),
    };

    repo.set_summary(&id, &summary).await?;
    Ok(Some(summary))
}

#[cfg(test)]
#[path = "summary_tests.rs"]
mod summary_tests;
