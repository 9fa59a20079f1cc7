use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

use super::{compute, ScheduleWindow};
use crate::models::WorkSchedule;

fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
}

fn nine_to_six() -> ScheduleWindow {
    ScheduleWindow::from_schedule(&WorkSchedule::new("09:00", "18:00")).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// =========================================================
// End-to-end scenarios (schedule 09:00-18:00, local UTC+8)
// =========================================================

#[test]
fn test_exact_scheduled_day() {
    // 09:00 to 18:00 local exactly
    let m = compute(utc(2024, 1, 15, 1, 0), utc(2024, 1, 15, 10, 0), nine_to_six());
    assert_eq!(m.work_date, date(2024, 1, 15));
    assert_eq!(m.regular_hours, 9.0);
    assert_eq!(m.overtime_hours, 0.0);
    assert_eq!(m.night_diff_hours, 0.0);
    assert_eq!(m.total_worked_hours, 9.0);
    assert_eq!(m.late_minutes, 0);
    assert_eq!(m.undertime_minutes, 0);
}

#[test]
fn test_thirty_minutes_late() {
    let m = compute(utc(2024, 1, 15, 1, 30), utc(2024, 1, 15, 10, 0), nine_to_six());
    assert_eq!(m.regular_hours, 8.5);
    assert_eq!(m.late_minutes, 30);
    assert_eq!(m.total_worked_hours, 8.5);
    assert_eq!(m.undertime_minutes, 0);
}

#[test]
fn test_early_arrival_with_overtime() {
    // 08:47 local in, 20:00 local out: 13 early minutes are excluded
    let m = compute(utc(2024, 1, 15, 0, 47), utc(2024, 1, 15, 12, 0), nine_to_six());
    assert_eq!(m.regular_hours, 9.0);
    assert_eq!(m.overtime_hours, 2.0);
    assert_eq!(m.total_worked_hours, 11.0);
    assert_eq!(m.late_minutes, 0);
}

#[test]
fn test_graveyard_shift_night_diff() {
    // 02:00-06:00 local on the 15th, entirely inside the night window
    let m = compute(utc(2024, 1, 14, 18, 0), utc(2024, 1, 14, 22, 0), nine_to_six());
    assert_eq!(m.work_date, date(2024, 1, 15));
    assert_eq!(m.night_diff_hours, 4.0);
    assert_eq!(m.regular_hours, 0.0);
    assert_eq!(m.late_minutes, 0);
}

#[test]
fn test_multi_day_punch_capped_at_local_midnight() {
    // In 07:00 local on the 15th, out two days later: capped at
    // 23:59:59.999 local on the 15th
    let m = compute(utc(2024, 1, 14, 23, 0), utc(2024, 1, 17, 17, 0), nine_to_six());
    assert_eq!(m.work_date, date(2024, 1, 15));
    assert_eq!(m.regular_hours, 9.0);
    assert_eq!(m.overtime_hours, 6.0);
    assert_eq!(m.night_diff_hours, 2.0);
    assert_eq!(m.total_worked_hours, 15.0);
    assert_eq!(m.late_minutes, 0);
    assert_eq!(m.undertime_minutes, 0);
}

#[test]
fn test_break_day_first_punch() {
    // Morning segment 09:00-13:00 local leaves the rest of the schedule
    // as undertime until a later punch clears it
    let m = compute(utc(2024, 1, 15, 1, 0), utc(2024, 1, 15, 5, 0), nine_to_six());
    assert_eq!(m.regular_hours, 4.0);
    assert_eq!(m.late_minutes, 0);
    assert_eq!(m.undertime_minutes, 300);
}

#[test]
fn test_break_day_second_punch() {
    // Afternoon segment 14:00-18:00 local: ends exactly at schedule end
    let m = compute(utc(2024, 1, 15, 6, 0), utc(2024, 1, 15, 10, 0), nine_to_six());
    assert_eq!(m.regular_hours, 4.0);
    assert_eq!(m.undertime_minutes, 0);
}

// =========================================================
// Engine laws
// =========================================================

#[test]
fn test_totality_on_degenerate_pair() {
    // Zero-length punch at 11:00 local
    let t = utc(2024, 1, 15, 3, 0);
    let m = compute(t, t, nine_to_six());
    assert_eq!(m.regular_hours, 0.0);
    assert_eq!(m.overtime_hours, 0.0);
    assert_eq!(m.night_diff_hours, 0.0);
    assert_eq!(m.total_worked_hours, 0.0);
    assert_eq!(m.late_minutes, 120);
    assert_eq!(m.undertime_minutes, 420);
}

#[test]
fn test_sum_identity_holds_across_shapes() {
    let cases = [
        (utc(2024, 1, 15, 1, 0), utc(2024, 1, 15, 10, 0)),
        (utc(2024, 1, 15, 0, 47), utc(2024, 1, 15, 12, 0)),
        (utc(2024, 1, 14, 23, 0), utc(2024, 1, 17, 17, 0)),
        (utc(2024, 1, 14, 18, 0), utc(2024, 1, 14, 22, 0)),
        (utc(2024, 1, 15, 1, 17), utc(2024, 1, 15, 9, 43)),
    ];
    for (pi, po) in cases {
        let m = compute(pi, po, nine_to_six());
        assert_eq!(
            m.total_worked_hours,
            crate::models::time::round2(m.regular_hours + m.overtime_hours),
            "sum identity failed for {} -> {}",
            pi,
            po
        );
    }
}

#[test]
fn test_earlier_arrival_changes_nothing() {
    // Moving the punch-in earlier, while already before schedule start,
    // must not change any worked category
    let po = utc(2024, 1, 15, 10, 0);
    let base = compute(utc(2024, 1, 15, 0, 50), po, nine_to_six());
    let earlier = compute(utc(2024, 1, 15, 0, 10), po, nine_to_six());
    assert_eq!(base.regular_hours, earlier.regular_hours);
    assert_eq!(base.overtime_hours, earlier.overtime_hours);
    assert_eq!(base.total_worked_hours, earlier.total_worked_hours);
    assert_eq!(earlier.late_minutes, 0);
}

#[test]
fn test_regular_bounded_by_schedule_length() {
    // Even a punch spanning the whole day cannot exceed the window
    let m = compute(utc(2024, 1, 14, 16, 0), utc(2024, 1, 15, 15, 59), nine_to_six());
    assert!(m.regular_hours <= 9.0);
}

#[test]
fn test_day_cap_is_idempotent() {
    // Any punch-out at or past next local midnight behaves like the cap
    let pi = utc(2024, 1, 15, 1, 0);
    let cap = utc(2024, 1, 15, 15, 59) + Duration::milliseconds(59_999);
    let at_cap = compute(pi, cap, nine_to_six());
    let far_past = compute(pi, utc(2024, 3, 1, 0, 0), nine_to_six());
    assert_eq!(at_cap, far_past);
}

#[test]
fn test_work_date_is_local_date_of_punch_in() {
    // 16:01Z on the 14th is already 00:01 local on the 15th
    let m = compute(utc(2024, 1, 14, 16, 1), utc(2024, 1, 14, 20, 0), nine_to_six());
    assert_eq!(m.work_date, date(2024, 1, 15));
    // 15:59Z on the 14th is still 23:59 local on the 14th
    let m = compute(utc(2024, 1, 14, 15, 59), utc(2024, 1, 14, 20, 0), nine_to_six());
    assert_eq!(m.work_date, date(2024, 1, 14));
}

// =========================================================
// Category edge cases
// =========================================================

#[test]
fn test_leave_before_schedule_start_full_day_undertime() {
    // Punch 05:00-08:00 local, gone before the window opens
    let m = compute(utc(2024, 1, 14, 21, 0), utc(2024, 1, 15, 0, 0), nine_to_six());
    assert_eq!(m.regular_hours, 0.0);
    assert_eq!(m.undertime_minutes, 540);
    assert_eq!(m.late_minutes, 0);
}

#[test]
fn test_punch_out_at_schedule_start_full_day_undertime() {
    let m = compute(utc(2024, 1, 14, 22, 0), utc(2024, 1, 15, 1, 0), nine_to_six());
    assert_eq!(m.undertime_minutes, 540);
    assert_eq!(m.regular_hours, 0.0);
}

#[test]
fn test_no_phantom_overtime_for_late_start() {
    // First punch of the day begins after schedule end: OT runs from the
    // punch-in, not from 18:00
    let m = compute(utc(2024, 1, 15, 11, 0), utc(2024, 1, 15, 13, 0), nine_to_six());
    assert_eq!(m.overtime_hours, 2.0);
    assert_eq!(m.regular_hours, 0.0);
    assert_eq!(m.total_worked_hours, 2.0);
}

#[test]
fn test_night_diff_spans_evening_window() {
    // 20:00 local to 23:30 local overlaps the 22:00 window by 1.5h
    let m = compute(utc(2024, 1, 15, 12, 0), utc(2024, 1, 15, 15, 30), nine_to_six());
    assert_eq!(m.night_diff_hours, 1.5);
}

#[test]
fn test_night_diff_both_windows_of_capped_day() {
    // 05:00 local to cap: catches 05:00-06:00 of the overnight window and
    // 22:00-24:00 of the evening window
    let m = compute(utc(2024, 1, 14, 21, 0), utc(2024, 1, 16, 0, 0), nine_to_six());
    assert_eq!(m.night_diff_hours, 3.0);
}

#[test]
fn test_late_rounds_to_nearest_minute() {
    // 90 seconds late rounds to 2 minutes
    let pi = utc(2024, 1, 15, 1, 1) + Duration::seconds(30);
    let m = compute(pi, utc(2024, 1, 15, 10, 0), nine_to_six());
    assert_eq!(m.late_minutes, 2);
}

#[test]
fn test_window_rejects_malformed_schedule() {
    assert!(ScheduleWindow::from_schedule(&WorkSchedule::new("", "18:00")).is_none());
    assert!(ScheduleWindow::from_schedule(&WorkSchedule::new("09:00", "late")).is_none());
    assert!(ScheduleWindow::from_schedule(&WorkSchedule::new("09:00", "18:00")).is_some());
}
