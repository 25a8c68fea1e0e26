use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::models::UserRole;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateOrganizationRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Name must be between 1 and 255 characters"
    ))]
    pub name: String,

    #[validate(range(min = 1))]
    pub team_number: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateOrganizationEventRequest {
    pub organization_id: i32,

    #[validate(length(min = 1, max = 15))]
    pub event_key: String,
}

/// An organization's event joined with the event's details
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct OrganizationEventDetail {
    pub event_key: String,
    pub short_name: Option<String>,
    pub event_name: String,
    pub week: i32,
    pub is_public: bool,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateOrganizationEventRequest {
    pub event_key: String,
    pub is_public: bool,
    pub is_active: bool,
}

/// A user waiting for approval to join an organization
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct OrganizationApplication {
    pub display_name: String,
    pub email: String,
    pub role: UserRole,
    pub joined: NaiveDateTime,
}
