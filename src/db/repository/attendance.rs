//! Attendance repository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::error::RepositoryResult;
use crate::models::AttendanceRecord;

/// Filter for attendance queries. All fields are conjunctive; `None` means
/// "any". Range bounds are inclusive.
#[derive(Debug, Clone, Default)]
pub struct AttendanceQuery {
    /// Restrict to one user's records.
    pub uid: Option<String>,
    /// Restrict to records whose pair is still open.
    pub open_only: bool,
    /// Restrict to records whose punch-in falls inside the range.
    pub punch_in_range: Option<(DateTime<Utc>, DateTime<Utc>)>,
    /// Maximum number of records to return.
    pub limit: Option<usize>,
}

impl AttendanceQuery {
    /// Query for a user's open punch, if any.
    pub fn open_for(uid: impl Into<String>) -> Self {
        Self {
            uid: Some(uid.into()),
            open_only: true,
            limit: Some(1),
            ..Default::default()
        }
    }

    /// Query for all of a user's records.
    pub fn all_for(uid: impl Into<String>) -> Self {
        Self {
            uid: Some(uid.into()),
            ..Default::default()
        }
    }
}

/// Repository trait for punch-pair records.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    /// Store a new record and return its store-assigned id.
    async fn create_attendance(&self, record: &AttendanceRecord) -> RepositoryResult<String>;

    /// Fetch a record by id.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - If no such record exists
    async fn get_attendance(&self, id: &str) -> RepositoryResult<AttendanceRecord>;

    /// Replace a record. The caller performs read-modify-write.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - If no such record exists
    async fn update_attendance(&self, record: &AttendanceRecord) -> RepositoryResult<()>;

    /// Hard-delete a record.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - If no such record exists
    async fn delete_attendance(&self, id: &str) -> RepositoryResult<()>;

    /// Query records matching the filter, in unspecified order.
    async fn query_attendance(
        &self,
        query: &AttendanceQuery,
    ) -> RepositoryResult<Vec<AttendanceRecord>>;
}
