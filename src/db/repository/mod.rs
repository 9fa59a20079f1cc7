//! Abstract persistence port.
//!
//! Three logical collections (users, attendance, daily summaries) behind
//! narrow traits. Implementations guarantee single-document atomicity only;
//! cross-document consistency is the service layer's read-modify-write
//! responsibility.

pub mod attendance;
pub mod error;
pub mod summary;
pub mod users;

use async_trait::async_trait;

pub use attendance::{AttendanceQuery, AttendanceRepository};
pub use error::{ErrorContext, RepositoryError, RepositoryResult};
pub use summary::SummaryRepository;
pub use users::UserRepository;

/// Combined repository capability required by the application.
#[async_trait]
pub trait FullRepository:
    UserRepository + AttendanceRepository + SummaryRepository + Send + Sync
{
    /// Verify the backing store is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;
}
