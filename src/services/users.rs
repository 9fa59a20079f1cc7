//! Registration and profile maintenance.
//!
//! Thin persistence wrappers: no metric computation happens here. Schedule
//! and timezone changes are administrative and live in [`super::admin`].

use serde::Deserialize;

use crate::db::{FullRepository, UserRepository};
use crate::models::{User, UserPatch, WorkSchedule};

use super::clock::Clock;
use super::error::{ServiceError, ServiceResult};

/// Registration payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub uid: String,
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub schedule: Option<WorkSchedule>,
    #[serde(default)]
    pub timezone: Option<String>,
}

/// Create a profile. Uid and email must be unique.
pub async fn register(
    repo: &dyn FullRepository,
    clock: &dyn Clock,
    new_user: NewUser,
) -> ServiceResult<User> {
    if new_user.uid.trim().is_empty() || new_user.email.trim().is_empty() {
        return Err(ServiceError::BadRequest(
            "uid and email are required".to_string(),
        ));
    }
    if let Some(schedule) = &new_user.schedule {
        if !schedule.is_valid() {
            return Err(ServiceError::BadRequest(
                "Schedule must be HH:MM bounds with start before end".to_string(),
            ));
        }
    }

    let now = clock.now();
    let user = User {
        uid: new_user.uid,
        email: new_user.email,
        first_name: new_user.first_name,
        last_name: new_user.last_name,
        department: new_user.department,
        position: new_user.position,
        schedule: new_user.schedule,
        timezone: new_user.timezone,
        created_at: now,
        updated_at: now,
    };
    repo.create_user(&user).await?;

    tracing::info!(uid = %user.uid, "user registered");
    Ok(user)
}

/// Fetch the caller's profile.
pub async fn profile(repo: &dyn FullRepository, uid: &str) -> ServiceResult<User> {
    repo.get_user(uid).await.map_err(|e| {
        if e.is_not_found() {
            ServiceError::NotFound("User profile not found".to_string())
        } else {
            ServiceError::from(e)
        }
    })
}

/// Patch the caller's display fields.
pub async fn update_profile(
    repo: &dyn FullRepository,
    clock: &dyn Clock,
    uid: &str,
    patch: UserPatch,
) -> ServiceResult<User> {
    if patch.is_empty() {
        return Err(ServiceError::BadRequest("Nothing to update".to_string()));
    }

    let mut user = profile(repo, uid).await?;
    if let Some(first_name) = patch.first_name {
        user.first_name = Some(first_name);
    }
    if let Some(last_name) = patch.last_name {
        user.last_name = Some(last_name);
    }
    if let Some(department) = patch.department {
        user.department = Some(department);
    }
    if let Some(position) = patch.position {
        user.position = Some(position);
    }
    user.updated_at = clock.now();
    repo.update_user(&user).await?;
    Ok(user)
}
