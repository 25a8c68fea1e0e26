pub mod admin;
pub mod events;
pub mod organization;
pub mod scout;
pub mod seasons;
pub mod system;
pub mod teams;

use sqlx::PgPool;
use storage::{
    error::StorageError, models::UserOrganization,
    repository::organization::OrganizationRepository,
};

use crate::error::{WebError, WebResult};

/// Event the membership is scouting: the organization's active event, or the
/// event a guest was invited to
pub async fn active_event(pool: &PgPool, membership: &UserOrganization) -> WebResult<String> {
    OrganizationRepository::new(pool)
        .resolve_active_event(membership)
        .await
        .map_err(|e| match e {
            StorageError::NotFound => {
                WebError::NotFound("Organization has no active event".to_string())
            }
            other => other.into(),
        })
}
