//! End-to-end punch lifecycle scenarios against the in-memory repository.
//!
//! Fixed local zone UTC+8, schedule 09:00-18:00 throughout.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use hcm_rust::db::{LocalRepository, SummaryRepository};
use hcm_rust::models::summary_id;
use hcm_rust::services::admin::{self, PunchEdit, ScheduleAssignment};
use hcm_rust::services::users::{self, NewUser};
use hcm_rust::services::{punch, reports, FixedClock};

fn utc(d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, d, h, mi, 0).unwrap()
}

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
}

async fn register(repo: &LocalRepository, clock: &FixedClock, uid: &str) {
    users::register(
        repo,
        clock,
        NewUser {
            uid: uid.to_string(),
            email: format!("{}@example.com", uid),
            first_name: Some("Mika".to_string()),
            last_name: Some("Santos".to_string()),
            department: Some("Operations".to_string()),
            position: Some("Analyst".to_string()),
            schedule: Some(hcm_rust::models::WorkSchedule::new("09:00", "18:00")),
            timezone: Some("Asia/Manila".to_string()),
        },
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn test_exact_day_flow() {
    let repo = LocalRepository::new();
    let clock = FixedClock::new(utc(15, 1, 0)); // 09:00 local
    register(&repo, &clock, "u1").await;

    punch::punch_in(&repo, &clock, "u1").await.unwrap();
    clock.set(utc(15, 10, 0)); // 18:00 local
    let record = punch::punch_out(&repo, &clock, "u1").await.unwrap();

    let metrics = record.punch_out.metrics().unwrap();
    assert_eq!(metrics.work_date, date(15));
    assert_eq!(metrics.regular_hours, 9.0);
    assert_eq!(metrics.overtime_hours, 0.0);
    assert_eq!(metrics.night_diff_hours, 0.0);
    assert_eq!(metrics.total_worked_hours, 9.0);
    assert_eq!(metrics.late_minutes, 0);
    assert_eq!(metrics.undertime_minutes, 0);

    let summary = reports::daily_summary(&repo, "u1", date(15)).await.unwrap();
    assert_eq!(summary.total_worked_hours, 9.0);
    assert_eq!(summary.punches.len(), 1);
}

#[tokio::test]
async fn test_break_day_upsert_flow() {
    let repo = LocalRepository::new();
    let clock = FixedClock::new(utc(15, 1, 0));
    register(&repo, &clock, "u1").await;

    // Morning segment 09:00-13:00 local
    punch::punch_in(&repo, &clock, "u1").await.unwrap();
    clock.set(utc(15, 5, 0));
    let first = punch::punch_out(&repo, &clock, "u1").await.unwrap();
    let m1 = first.punch_out.metrics().unwrap();
    assert_eq!(m1.regular_hours, 4.0);
    assert_eq!(m1.late_minutes, 0);
    assert_eq!(m1.undertime_minutes, 300);

    // Afternoon segment 14:00-18:00 local
    clock.set(utc(15, 6, 0));
    punch::punch_in(&repo, &clock, "u1").await.unwrap();
    clock.set(utc(15, 10, 0));
    let second = punch::punch_out(&repo, &clock, "u1").await.unwrap();
    assert_eq!(second.punch_out.metrics().unwrap().undertime_minutes, 0);

    // Upsert folded both: hours added, late kept from the first pair,
    // undertime replaced by the second
    let summary = reports::daily_summary(&repo, "u1", date(15)).await.unwrap();
    assert_eq!(summary.regular_hours, 8.0);
    assert_eq!(summary.total_worked_hours, 8.0);
    assert_eq!(summary.late_minutes, 0);
    assert_eq!(summary.undertime_minutes, 0);
    assert_eq!(summary.punches.len(), 2);
}

#[tokio::test]
async fn test_graveyard_shift_lands_on_local_work_date() {
    let repo = LocalRepository::new();
    let clock = FixedClock::new(utc(14, 18, 0)); // 02:00 local on the 15th
    register(&repo, &clock, "u1").await;

    punch::punch_in(&repo, &clock, "u1").await.unwrap();
    clock.set(utc(14, 22, 0)); // 06:00 local on the 15th
    let record = punch::punch_out(&repo, &clock, "u1").await.unwrap();

    let metrics = record.punch_out.metrics().unwrap();
    assert_eq!(metrics.work_date, date(15));
    assert_eq!(metrics.night_diff_hours, 4.0);

    // The rollup is filed under the local work date, not the UTC date
    assert!(reports::daily_summary(&repo, "u1", date(14)).await.is_err());
    let summary = reports::daily_summary(&repo, "u1", date(15)).await.unwrap();
    assert_eq!(summary.night_diff_hours, 4.0);
}

#[tokio::test]
async fn test_status_today_key_is_utc_not_local() {
    let repo = LocalRepository::new();
    let clock = FixedClock::new(utc(14, 18, 0)); // UTC Jan 14, local Jan 15
    register(&repo, &clock, "u1").await;

    punch::punch_in(&repo, &clock, "u1").await.unwrap();
    clock.set(utc(14, 22, 0));
    punch::punch_out(&repo, &clock, "u1").await.unwrap();

    // The summary exists for the local work date, but status looks up
    // today's UTC date and misses it
    let status = punch::status(&repo, &clock, "u1").await.unwrap();
    assert!(!status.punched_in);
    assert!(status.today_summary.is_none());
    assert!(repo
        .get_summary(&summary_id("u1", date(15)))
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn test_admin_edit_rebuild_flow() {
    let repo = LocalRepository::new();
    let clock = FixedClock::new(utc(15, 1, 0));
    register(&repo, &clock, "u1").await;

    punch::punch_in(&repo, &clock, "u1").await.unwrap();
    clock.set(utc(15, 10, 0));
    let record = punch::punch_out(&repo, &clock, "u1").await.unwrap();

    // Admin extends the punch-out to 20:00 local
    let edited = admin::edit_punch(
        &repo,
        &clock,
        &record.id,
        PunchEdit {
            punch_in: None,
            punch_out: Some(utc(15, 12, 0)),
        },
    )
    .await
    .unwrap();

    let metrics = edited.punch_out.metrics().unwrap();
    assert_eq!(metrics.regular_hours, 9.0);
    assert_eq!(metrics.overtime_hours, 2.0);
    assert_eq!(metrics.total_worked_hours, 11.0);
    assert!(edited.admin_edited);

    let summary = reports::daily_summary(&repo, "u1", date(15)).await.unwrap();
    assert_eq!(summary.overtime_hours, 2.0);
    assert_eq!(summary.total_worked_hours, 11.0);
}

#[tokio::test]
async fn test_admin_delete_clears_last_summary() {
    let repo = LocalRepository::new();
    let clock = FixedClock::new(utc(15, 1, 0));
    register(&repo, &clock, "u1").await;

    punch::punch_in(&repo, &clock, "u1").await.unwrap();
    clock.set(utc(15, 10, 0));
    let record = punch::punch_out(&repo, &clock, "u1").await.unwrap();
    assert!(reports::daily_summary(&repo, "u1", date(15)).await.is_ok());

    admin::delete_punch(&repo, &clock, &record.id).await.unwrap();
    assert!(reports::daily_summary(&repo, "u1", date(15)).await.is_err());
}

#[tokio::test]
async fn test_void_then_fresh_day() {
    let repo = LocalRepository::new();
    let clock = FixedClock::new(utc(15, 1, 0));
    register(&repo, &clock, "u1").await;

    let record = punch::punch_in(&repo, &clock, "u1").await.unwrap();
    punch::cancel_open_punch(&repo, &clock, "u1", &record.id)
        .await
        .unwrap();

    // Voided pair never reaches the rollup
    assert!(reports::daily_summary(&repo, "u1", date(15)).await.is_err());

    // And the slot is free for a real day
    clock.set(utc(15, 1, 30));
    punch::punch_in(&repo, &clock, "u1").await.unwrap();
    clock.set(utc(15, 10, 0));
    punch::punch_out(&repo, &clock, "u1").await.unwrap();

    let summary = reports::daily_summary(&repo, "u1", date(15)).await.unwrap();
    assert_eq!(summary.late_minutes, 30);
    assert_eq!(summary.punches.len(), 1);
}

#[tokio::test]
async fn test_weekly_rollup_across_days() {
    let repo = LocalRepository::new();
    let clock = FixedClock::new(utc(15, 1, 0));
    register(&repo, &clock, "u1").await;

    for d in 15..=17 {
        clock.set(utc(d, 1, 0));
        punch::punch_in(&repo, &clock, "u1").await.unwrap();
        clock.set(utc(d, 10, 0));
        punch::punch_out(&repo, &clock, "u1").await.unwrap();
    }

    let week = reports::weekly_summary(&repo, "u1", date(15), date(21))
        .await
        .unwrap();
    assert_eq!(week.days.len(), 3);
    assert_eq!(week.totals.total_worked_hours, 27.0);
    assert_eq!(week.totals.late_minutes, 0);

    let all = reports::all_weekly_reports(&repo, date(15), date(21))
        .await
        .unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].employee.first_name.as_deref(), Some("Mika"));
    assert_eq!(all[0].totals.total_worked_hours, 27.0);
}

#[tokio::test]
async fn test_schedule_reassignment_only_affects_future_days() {
    let repo = LocalRepository::new();
    let clock = FixedClock::new(utc(15, 1, 0));
    register(&repo, &clock, "u1").await;

    punch::punch_in(&repo, &clock, "u1").await.unwrap();
    clock.set(utc(15, 10, 0));
    punch::punch_out(&repo, &clock, "u1").await.unwrap();

    admin::assign_schedule(
        &repo,
        &clock,
        "u1",
        ScheduleAssignment {
            schedule: Some(hcm_rust::models::WorkSchedule::new("10:00", "19:00")),
            timezone: None,
        },
    )
    .await
    .unwrap();

    // The 15th keeps its 09:00-18:00 numbers
    let old_day = reports::daily_summary(&repo, "u1", date(15)).await.unwrap();
    assert_eq!(old_day.late_minutes, 0);

    // The next day is measured against the new 10:00 window: an 11:00
    // local arrival is an hour late
    clock.set(utc(16, 3, 0)); // 11:00 local
    punch::punch_in(&repo, &clock, "u1").await.unwrap();
    clock.set(utc(16, 11, 0)); // 19:00 local
    let record = punch::punch_out(&repo, &clock, "u1").await.unwrap();
    assert_eq!(record.punch_out.metrics().unwrap().late_minutes, 60);
}
