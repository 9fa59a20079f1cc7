//! Attendance metrics engine.
//!
//! Pure interval arithmetic: a punch pair is partitioned against the user's
//! schedule window into regular, overtime, night-differential, late, and
//! undertime categories. All five derive from the same overlap primitive,
//! computed on integer milliseconds in the fixed local zone.
//!
//! The engine is total: any `punch_out >= punch_in` yields finite
//! non-negative values, and degenerate inputs collapse to zeros.

use chrono::{DateTime, NaiveTime, Utc};

use crate::models::time::{
    end_of_work_day_ms, local_to_utc_ms, round_hours, round_minutes, to_ms, work_date_of,
    MS_PER_DAY, MS_PER_HOUR,
};
use crate::models::{Metrics, WorkSchedule};

/// Length of the 22:00-06:00 night window.
const NIGHT_WINDOW_MS: i64 = 8 * MS_PER_HOUR;

/// Local wall-clock start of the night-differential window.
fn night_start() -> NaiveTime {
    NaiveTime::from_hms_opt(22, 0, 0).expect("valid time")
}

/// Parsed schedule bounds on the clock face.
#[derive(Debug, Clone, Copy)]
pub struct ScheduleWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl ScheduleWindow {
    /// Parse a stored schedule. `None` when either bound is missing or
    /// malformed; the punch service turns that into a precondition failure.
    pub fn from_schedule(schedule: &WorkSchedule) -> Option<Self> {
        Some(Self {
            start: schedule.start_time()?,
            end: schedule.end_time()?,
        })
    }
}

/// Overlap in milliseconds between `[a_start, a_end]` and `[b_start, b_end]`.
/// Empty or inverted intervals overlap nothing.
fn overlap_ms(a_start: i64, a_end: i64, b_start: i64, b_end: i64) -> i64 {
    (a_end.min(b_end) - a_start.max(b_start)).max(0)
}

/// Total overlap of `[pi, po]` with every local 22:00-06:00 window that
/// intersects the punch. Scanning starts at the window anchored the evening
/// before the work date, which captures graveyard shifts punching in before
/// 06:00, and advances a day at a time until the window opens at or after
/// the punch-out.
fn night_diff_ms(pi: i64, po: i64, work_date: chrono::NaiveDate) -> i64 {
    let mut total = 0;
    let mut window_start = local_to_utc_ms(work_date, night_start()) - MS_PER_DAY;
    while window_start < po {
        total += overlap_ms(pi, po, window_start, window_start + NIGHT_WINDOW_MS);
        window_start += MS_PER_DAY;
    }
    total
}

/// Compute per-pair labor metrics.
///
/// The work date is the local calendar date of `punch_in`; the schedule
/// window is projected onto that date. The effective punch-out is capped at
/// one millisecond before the next local midnight, so a punch crossing
/// midnight is truncated rather than attributed to the next day.
pub fn compute(
    punch_in: DateTime<Utc>,
    punch_out: DateTime<Utc>,
    window: ScheduleWindow,
) -> Metrics {
    let work_date = work_date_of(punch_in);
    let sched_start = local_to_utc_ms(work_date, window.start);
    let sched_end = local_to_utc_ms(work_date, window.end);

    let pi = to_ms(punch_in);
    let po = to_ms(punch_out).min(end_of_work_day_ms(work_date));

    let regular_ms = overlap_ms(pi, po, sched_start, sched_end);

    // Early arrival is never credited: late clamps at zero and the worked
    // categories start no earlier than the schedule window or the punch-in.
    let late_ms = (pi - sched_start).max(0);

    let undertime_ms = if po < sched_end {
        (sched_end - po.max(sched_start)).max(0)
    } else {
        0
    };

    // Overtime begins at the punch-in when the pair starts after the
    // schedule end, not at the schedule end itself.
    let overtime_ms = (po - pi.max(sched_end)).max(0);

    let night_ms = night_diff_ms(pi, po, work_date);

    Metrics {
        work_date,
        regular_hours: round_hours(regular_ms),
        overtime_hours: round_hours(overtime_ms),
        night_diff_hours: round_hours(night_ms),
        // Category sum, not po - pi: early minutes stay excluded.
        total_worked_hours: round_hours(regular_ms + overtime_ms),
        late_minutes: round_minutes(late_ms),
        undertime_minutes: round_minutes(undertime_ms),
    }
}

#[cfg(test)]
#[path = "metrics_tests.rs"]
mod metrics_tests;
