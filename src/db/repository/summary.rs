//! Daily summary repository trait.

use async_trait::async_trait;
use chrono::NaiveDate;

use super::error::RepositoryResult;
use crate::models::DailySummary;

/// Repository trait for per-day rollup documents, keyed `uid_YYYY-MM-DD`.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait SummaryRepository: Send + Sync {
    /// Fetch a summary by its deterministic id. Absence is not an error:
    /// a day with no completed punches has no summary.
    async fn get_summary(&self, summary_id: &str) -> RepositoryResult<Option<DailySummary>>;

    /// Create or fully replace a summary document.
    async fn set_summary(&self, summary_id: &str, summary: &DailySummary) -> RepositoryResult<()>;

    /// Delete a summary document. Deleting a missing summary is a no-op.
    async fn delete_summary(&self, summary_id: &str) -> RepositoryResult<()>;

    /// All summaries for one work date, across every user.
    async fn summaries_by_work_date(&self, date: NaiveDate) -> RepositoryResult<Vec<DailySummary>>;

    /// One user's summaries with work date in `[start, end]`, inclusive.
    async fn summaries_by_uid_in_range(
        &self,
        uid: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> RepositoryResult<Vec<DailySummary>>;
}
