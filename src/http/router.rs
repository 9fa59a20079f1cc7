//! Router configuration for the HTTP API.
//!
//! This module sets up all routes and middleware (CORS, tracing), and
//! creates the axum router ready for serving.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let attendance = Router::new()
        .route("/status", get(handlers::attendance_status))
        .route("/punch-in", post(handlers::punch_in))
        .route("/punch-out", post(handlers::punch_out))
        .route("/cancel-punch/{attendance_id}", delete(handlers::cancel_punch))
        .route("/history", get(handlers::attendance_history))
        .route("/summary/daily", get(handlers::my_daily_summary))
        .route("/summary/weekly", get(handlers::my_weekly_summary));

    // Role checks for this subtree are upstream middleware.
    let admin = Router::new()
        .route(
            "/punches/{id}",
            get(handlers::admin_employee_punches)
                .put(handlers::admin_edit_punch)
                .delete(handlers::admin_delete_punch),
        )
        .route("/schedule/{uid}", put(handlers::admin_assign_schedule))
        .route("/reports/daily", get(handlers::admin_daily_report))
        .route("/reports/weekly", get(handlers::admin_weekly_report));

    let users = Router::new()
        .route("/", post(handlers::register_user))
        .route("/me", get(handlers::my_profile).put(handlers::update_my_profile));

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/attendance", attendance)
        .nest("/admin", admin)
        .nest("/users", users)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::LocalRepository;
    use crate::services::SystemClock;
    use std::sync::Arc;

    #[test]
    fn test_router_creation() {
        let repo = Arc::new(LocalRepository::new())
            as Arc<dyn crate::db::repository::FullRepository>;
        let state = AppState::new(repo, Arc::new(SystemClock));
        let _router = create_router(state);
        // If we got here, router was created successfully
    }
}
