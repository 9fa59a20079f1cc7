//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for business logic.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;

use super::auth::CallerUid;
use super::dto::{
    AttendanceRecordDto, CancelResponse, DailyReportResponse, DateQuery, DateRangeQuery,
    DeleteResponse, HealthResponse, PunchInResponse, PunchOutResponse, StatusResponse,
    WeeklyReportResponse,
};
use super::error::AppError;
use super::state::AppState;
use crate::db::FullRepository;
use crate::models::{User, UserPatch};
use crate::services::admin::{PunchEdit, ScheduleAssignment};
use crate::services::users::NewUser;
use crate::services::{admin, punch, reports, users, Clock, ServiceError};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// Resolve an explicit range or fall back to the current Monday-Sunday week
/// of today's UTC date.
fn range_or_default_week(query: &DateRangeQuery, today: NaiveDate) -> (NaiveDate, NaiveDate) {
    match (query.start_date, query.end_date) {
        (Some(start), Some(end)) => (start, end),
        (Some(start), None) => (start, start + chrono::Duration::days(6)),
        _ => reports::default_week(today),
    }
}

/// Require both bounds of a date range.
fn require_range(query: &DateRangeQuery) -> Result<(NaiveDate, NaiveDate), AppError> {
    match (query.start_date, query.end_date) {
        (Some(start), Some(end)) => Ok((start, end)),
        _ => Err(ServiceError::BadRequest(
            "startDate and endDate are required".to_string(),
        )
        .into()),
    }
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the store is
/// reachable.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let database = match state.repository.health_check().await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        database,
    }))
}

// =============================================================================
// Attendance
// =============================================================================

/// GET /attendance/status
pub async fn attendance_status(
    State(state): State<AppState>,
    CallerUid(uid): CallerUid,
) -> HandlerResult<StatusResponse> {
    let status = punch::status(state.repository.as_ref(), state.clock.as_ref(), &uid).await?;
    Ok(Json(status.into()))
}

/// POST /attendance/punch-in
pub async fn punch_in(
    State(state): State<AppState>,
    CallerUid(uid): CallerUid,
) -> Result<(StatusCode, Json<PunchInResponse>), AppError> {
    let record = punch::punch_in(state.repository.as_ref(), state.clock.as_ref(), &uid).await?;
    Ok((
        StatusCode::CREATED,
        Json(PunchInResponse {
            id: record.id,
            punch_in: record.punch_in,
        }),
    ))
}

/// POST /attendance/punch-out
pub async fn punch_out(
    State(state): State<AppState>,
    CallerUid(uid): CallerUid,
) -> HandlerResult<PunchOutResponse> {
    let record = punch::punch_out(state.repository.as_ref(), state.clock.as_ref(), &uid).await?;
    let (punch_out, metrics) = match (&record.punch_out.closed_at(), record.punch_out.metrics()) {
        (Some(at), Some(metrics)) => (*at, metrics.clone()),
        _ => {
            return Err(ServiceError::Internal(
                "punch-out returned an incomplete record".to_string(),
            )
            .into())
        }
    };
    Ok(Json(PunchOutResponse {
        id: record.id,
        punch_out,
        metrics,
    }))
}

/// DELETE /attendance/cancel-punch/{attendance_id}
pub async fn cancel_punch(
    State(state): State<AppState>,
    CallerUid(uid): CallerUid,
    Path(attendance_id): Path<String>,
) -> HandlerResult<CancelResponse> {
    let record = punch::cancel_open_punch(
        state.repository.as_ref(),
        state.clock.as_ref(),
        &uid,
        &attendance_id,
    )
    .await?;
    Ok(Json(CancelResponse {
        id: record.id,
        voided: true,
    }))
}

/// GET /attendance/history?startDate&endDate
pub async fn attendance_history(
    State(state): State<AppState>,
    CallerUid(uid): CallerUid,
    Query(query): Query<DateRangeQuery>,
) -> HandlerResult<Vec<AttendanceRecordDto>> {
    let (start, end) = require_range(&query)?;
    let records = reports::employee_punches(state.repository.as_ref(), &uid, start, end).await?;
    Ok(Json(records.into_iter().map(Into::into).collect()))
}

/// GET /attendance/summary/daily?date
///
/// Defaults to today's UTC date.
pub async fn my_daily_summary(
    State(state): State<AppState>,
    CallerUid(uid): CallerUid,
    Query(query): Query<DateQuery>,
) -> HandlerResult<crate::models::DailySummary> {
    let date = query.date.unwrap_or_else(|| state.clock.now().date_naive());
    let summary = reports::daily_summary(state.repository.as_ref(), &uid, date).await?;
    Ok(Json(summary))
}

/// GET /attendance/summary/weekly?startDate&endDate
///
/// Defaults to the current Monday-Sunday week in UTC.
pub async fn my_weekly_summary(
    State(state): State<AppState>,
    CallerUid(uid): CallerUid,
    Query(query): Query<DateRangeQuery>,
) -> HandlerResult<reports::WeeklySummary> {
    let (start, end) = range_or_default_week(&query, state.clock.now().date_naive());
    let summary = reports::weekly_summary(state.repository.as_ref(), &uid, start, end).await?;
    Ok(Json(summary))
}

// =============================================================================
// Admin: punch management
// =============================================================================

/// GET /admin/punches/{uid}?startDate&endDate
pub async fn admin_employee_punches(
    State(state): State<AppState>,
    Path(uid): Path<String>,
    Query(query): Query<DateRangeQuery>,
) -> HandlerResult<Vec<AttendanceRecordDto>> {
    let (start, end) = require_range(&query)?;
    let records = reports::employee_punches(state.repository.as_ref(), &uid, start, end).await?;
    Ok(Json(records.into_iter().map(Into::into).collect()))
}

/// PUT /admin/punches/{punch_id}
pub async fn admin_edit_punch(
    State(state): State<AppState>,
    Path(punch_id): Path<String>,
    Json(edit): Json<PunchEdit>,
) -> HandlerResult<AttendanceRecordDto> {
    let record = admin::edit_punch(
        state.repository.as_ref(),
        state.clock.as_ref(),
        &punch_id,
        edit,
    )
    .await?;
    Ok(Json(record.into()))
}

/// DELETE /admin/punches/{punch_id}
pub async fn admin_delete_punch(
    State(state): State<AppState>,
    Path(punch_id): Path<String>,
) -> HandlerResult<DeleteResponse> {
    let record =
        admin::delete_punch(state.repository.as_ref(), state.clock.as_ref(), &punch_id).await?;
    Ok(Json(DeleteResponse {
        id: record.id,
        deleted: true,
    }))
}

/// PUT /admin/schedule/{uid}
pub async fn admin_assign_schedule(
    State(state): State<AppState>,
    Path(uid): Path<String>,
    Json(assignment): Json<ScheduleAssignment>,
) -> HandlerResult<User> {
    let user = admin::assign_schedule(
        state.repository.as_ref(),
        state.clock.as_ref(),
        &uid,
        assignment,
    )
    .await?;
    Ok(Json(user))
}

// =============================================================================
// Admin: reports
// =============================================================================

/// GET /admin/reports/daily?date
pub async fn admin_daily_report(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> HandlerResult<DailyReportResponse> {
    let date = query.date.unwrap_or_else(|| state.clock.now().date_naive());
    let data = reports::all_daily_reports(state.repository.as_ref(), date).await?;
    Ok(Json(DailyReportResponse {
        date,
        count: data.len(),
        data,
    }))
}

/// GET /admin/reports/weekly?startDate&endDate
pub async fn admin_weekly_report(
    State(state): State<AppState>,
    Query(query): Query<DateRangeQuery>,
) -> HandlerResult<WeeklyReportResponse> {
    let (start, end) = range_or_default_week(&query, state.clock.now().date_naive());
    let data = reports::all_weekly_reports(state.repository.as_ref(), start, end).await?;
    Ok(Json(WeeklyReportResponse {
        start_date: start,
        end_date: end,
        count: data.len(),
        data,
    }))
}

// =============================================================================
// Users
// =============================================================================

/// POST /users
pub async fn register_user(
    State(state): State<AppState>,
    Json(new_user): Json<NewUser>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let user = users::register(state.repository.as_ref(), state.clock.as_ref(), new_user).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /users/me
pub async fn my_profile(
    State(state): State<AppState>,
    CallerUid(uid): CallerUid,
) -> HandlerResult<User> {
    let user = users::profile(state.repository.as_ref(), &uid).await?;
    Ok(Json(user))
}

/// PUT /users/me
pub async fn update_my_profile(
    State(state): State<AppState>,
    CallerUid(uid): CallerUid,
    Json(patch): Json<UserPatch>,
) -> HandlerResult<User> {
    let user = users::update_profile(
        state.repository.as_ref(),
        state.clock.as_ref(),
        &uid,
        patch,
    )
    .await?;
    Ok(Json(user))
}
