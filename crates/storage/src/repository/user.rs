use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{User, UserOrganization};

/// Identity asserted by the authentication gateway for one request
#[derive(Debug, Clone)]
pub struct UserIdentity {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub auth_provider: String,
}

pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find(&self, id: Uuid) -> Result<User> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, auth_provider, display_name, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    /// Returns the stored user, creating the row the first time an identity
    /// is seen. Existing rows are never overwritten.
    pub async fn ensure(&self, identity: &UserIdentity) -> Result<User> {
        sqlx::query(
            r#"
            INSERT INTO users (id, email, auth_provider, display_name)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(identity.id)
        .bind(&identity.email)
        .bind(&identity.auth_provider)
        .bind(&identity.display_name)
        .execute(self.pool)
        .await?;

        self.find(identity.id).await
    }

    pub async fn membership(&self, membership_id: i32) -> Result<UserOrganization> {
        sqlx::query_as::<_, UserOrganization>(
            r#"
            SELECT id, user_id, organization_id, role, joined, event_key
            FROM user_organizations
            WHERE id = $1
            "#,
        )
        .bind(membership_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    pub async fn memberships(&self, user_id: Uuid) -> Result<Vec<UserOrganization>> {
        let memberships = sqlx::query_as::<_, UserOrganization>(
            r#"
            SELECT id, user_id, organization_id, role, joined, event_key
            FROM user_organizations
            WHERE user_id = $1
            ORDER BY joined
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(memberships)
    }
}
