use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{User, UserOrganization};

/// The caller's user row and every organization they belong to
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserProfile {
    pub user: User,
    pub memberships: Vec<UserOrganization>,
    /// Membership selected for this request, if any
    pub current_membership: Option<i32>,
}
