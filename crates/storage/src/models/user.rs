use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub auth_provider: String,
    pub display_name: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "user_role", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Admin,
    Lead,
    Member,
    Guest,
    Pending,
}

impl UserRole {
    /// Roles allowed to manage the organization (applications, event settings)
    pub fn is_manager(&self) -> bool {
        matches!(self, Self::Admin | Self::Lead)
    }

    /// Roles allowed to submit scouting data. Applicants are not.
    pub fn can_scout(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// Membership of a user in an organization.
///
/// `event_key` is only meaningful for guests, who are scoped to a single event.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct UserOrganization {
    pub id: i32,
    pub user_id: Uuid,
    pub organization_id: i32,
    pub role: UserRole,
    pub joined: NaiveDateTime,
    pub event_key: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_members_cannot_scout() {
        assert!(!UserRole::Pending.can_scout());
        assert!(UserRole::Guest.can_scout());
        assert!(UserRole::Member.can_scout());
    }

    #[test]
    fn test_only_admins_and_leads_manage() {
        assert!(UserRole::Admin.is_manager());
        assert!(UserRole::Lead.is_manager());
        assert!(!UserRole::Member.is_manager());
        assert!(!UserRole::Guest.is_manager());
    }

    #[test]
    fn test_role_serializes_in_upper_case() {
        let json = serde_json::to_string(&UserRole::Lead).unwrap();
        assert_eq!(json, "\"LEAD\"");
    }
}
