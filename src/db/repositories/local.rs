//! In-memory repository for unit testing and local development.
//!
//! Three `RwLock<HashMap>` collections mirror the logical layout of the
//! persistence port. Each method takes a single lock, giving the
//! document-level atomicity the service layer relies on; no cross-collection
//! transactions exist, matching the port contract.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::db::repository::{
    AttendanceQuery, AttendanceRepository, ErrorContext, FullRepository, RepositoryError,
    RepositoryResult, SummaryRepository, UserRepository,
};
use crate::models::{AttendanceRecord, DailySummary, User};

/// In-memory implementation of the full persistence port.
#[derive(Default)]
pub struct LocalRepository {
    users: RwLock<HashMap<String, User>>,
    attendance: RwLock<HashMap<String, AttendanceRecord>>,
    summaries: RwLock<HashMap<String, DailySummary>>,
}

impl LocalRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for LocalRepository {
    async fn get_user(&self, uid: &str) -> RepositoryResult<User> {
        self.users.read().get(uid).cloned().ok_or_else(|| {
            RepositoryError::not_found_with_context(
                format!("User {} not found", uid),
                ErrorContext::new("get_user").with_entity("user").with_entity_id(uid),
            )
        })
    }

    async fn create_user(&self, user: &User) -> RepositoryResult<()> {
        let mut users = self.users.write();
        if users.contains_key(&user.uid) {
            return Err(RepositoryError::conflict_with_context(
                format!("User {} already exists", user.uid),
                ErrorContext::new("create_user")
                    .with_entity("user")
                    .with_entity_id(&user.uid),
            ));
        }
        if users.values().any(|u| u.email == user.email) {
            return Err(RepositoryError::conflict_with_context(
                "Email already registered",
                ErrorContext::new("create_user")
                    .with_entity("user")
                    .with_details(format!("email={}", user.email)),
            ));
        }
        users.insert(user.uid.clone(), user.clone());
        Ok(())
    }

    async fn update_user(&self, user: &User) -> RepositoryResult<()> {
        let mut users = self.users.write();
        if !users.contains_key(&user.uid) {
            return Err(RepositoryError::not_found_with_context(
                format!("User {} not found", user.uid),
                ErrorContext::new("update_user")
                    .with_entity("user")
                    .with_entity_id(&user.uid),
            ));
        }
        users.insert(user.uid.clone(), user.clone());
        Ok(())
    }

    async fn list_users(&self) -> RepositoryResult<Vec<User>> {
        Ok(self.users.read().values().cloned().collect())
    }
}

#[async_trait]
impl AttendanceRepository for LocalRepository {
    async fn create_attendance(&self, record: &AttendanceRecord) -> RepositoryResult<String> {
        let mut stored = record.clone();
        if stored.id.is_empty() {
            stored.id = Uuid::new_v4().to_string();
        }
        let id = stored.id.clone();
        self.attendance.write().insert(id.clone(), stored);
        Ok(id)
    }

    async fn get_attendance(&self, id: &str) -> RepositoryResult<AttendanceRecord> {
        self.attendance.read().get(id).cloned().ok_or_else(|| {
            RepositoryError::not_found_with_context(
                format!("Attendance record {} not found", id),
                ErrorContext::new("get_attendance")
                    .with_entity("attendance")
                    .with_entity_id(id),
            )
        })
    }

    async fn update_attendance(&self, record: &AttendanceRecord) -> RepositoryResult<()> {
        let mut attendance = self.attendance.write();
        if !attendance.contains_key(&record.id) {
            return Err(RepositoryError::not_found_with_context(
                format!("Attendance record {} not found", record.id),
                ErrorContext::new("update_attendance")
                    .with_entity("attendance")
                    .with_entity_id(&record.id),
            ));
        }
        attendance.insert(record.id.clone(), record.clone());
        Ok(())
    }

    async fn delete_attendance(&self, id: &str) -> RepositoryResult<()> {
        self.attendance.write().remove(id).map(|_| ()).ok_or_else(|| {
            RepositoryError::not_found_with_context(
                format!("Attendance record {} not found", id),
                ErrorContext::new("delete_attendance")
                    .with_entity("attendance")
                    .with_entity_id(id),
            )
        })
    }

    async fn query_attendance(
        &self,
        query: &AttendanceQuery,
    ) -> RepositoryResult<Vec<AttendanceRecord>> {
        let attendance = self.attendance.read();
        let mut matches: Vec<AttendanceRecord> = attendance
            .values()
            .filter(|r| query.uid.as_deref().map_or(true, |uid| r.uid == uid))
            .filter(|r| !query.open_only || r.punch_out.is_open())
            .filter(|r| {
                query
                    .punch_in_range
                    .map_or(true, |(start, end)| r.punch_in >= start && r.punch_in <= end)
            })
            .cloned()
            .collect();
        // HashMap iteration order is arbitrary; sort for deterministic limits.
        matches.sort_by_key(|r| r.punch_in);
        if let Some(limit) = query.limit {
            matches.truncate(limit);
        }
        Ok(matches)
    }
}

#[async_trait]
impl SummaryRepository for LocalRepository {
    async fn get_summary(&self, summary_id: &str) -> RepositoryResult<Option<DailySummary>> {
        Ok(self.summaries.read().get(summary_id).cloned())
    }

    async fn set_summary(&self, summary_id: &str, summary: &DailySummary) -> RepositoryResult<()> {
        self.summaries
            .write()
            .insert(summary_id.to_string(), summary.clone());
        Ok(())
    }

    async fn delete_summary(&self, summary_id: &str) -> RepositoryResult<()> {
        self.summaries.write().remove(summary_id);
        Ok(())
    }

    async fn summaries_by_work_date(&self, date: NaiveDate) -> RepositoryResult<Vec<DailySummary>> {
        let mut matches: Vec<DailySummary> = self
            .summaries
            .read()
            .values()
            .filter(|s| s.work_date == date)
            .cloned()
            .collect();
        matches.sort_by(|a, b| a.uid.cmp(&b.uid));
        Ok(matches)
    }

    async fn summaries_by_uid_in_range(
        &self,
        uid: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> RepositoryResult<Vec<DailySummary>> {
        let mut matches: Vec<DailySummary> = self
            .summaries
            .read()
            .values()
            .filter(|s| s.uid == uid && s.work_date >= start && s.work_date <= end)
            .cloned()
            .collect();
        matches.sort_by_key(|s| s.work_date);
        Ok(matches)
    }
}

#[async_trait]
impl FullRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(true)
    }
}
