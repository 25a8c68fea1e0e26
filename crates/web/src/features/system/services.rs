use sqlx::PgPool;
use storage::{dto::user::UserProfile, error::Result, repository::user::UserRepository};

use crate::middleware::auth::CurrentUser;

pub async fn profile(pool: &PgPool, current: CurrentUser) -> Result<UserProfile> {
    let memberships = UserRepository::new(pool)
        .memberships(current.user.id)
        .await?;

    Ok(UserProfile {
        user: current.user,
        memberships,
        current_membership: current.membership.map(|m| m.id),
    })
}
