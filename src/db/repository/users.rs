//! User repository trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::User;

/// Repository trait for employee profiles.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by uid.
    ///
    /// # Returns
    /// * `Ok(User)` - The profile
    /// * `Err(RepositoryError::NotFound)` - If no such uid exists
    async fn get_user(&self, uid: &str) -> RepositoryResult<User>;

    /// Create a user profile.
    ///
    /// # Returns
    /// * `Ok(())` - Profile stored
    /// * `Err(RepositoryError::Conflict)` - If the uid or email is taken
    async fn create_user(&self, user: &User) -> RepositoryResult<()>;

    /// Replace a user profile. The caller performs read-modify-write.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - If no such uid exists
    async fn update_user(&self, user: &User) -> RepositoryResult<()>;

    /// List every user profile.
    async fn list_users(&self) -> RepositoryResult<Vec<User>>;
}
