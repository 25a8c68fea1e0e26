use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Organization {
    pub id: i32,
    pub name: String,
    pub team_number: Option<i32>,
}

/// An organization's participation in an event.
///
/// At most one of an organization's events is `active`; scouting data can only
/// be submitted against the active one.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct OrganizationEvent {
    pub id: Uuid,
    pub organization_id: i32,
    pub event_key: String,
    pub public_data: bool,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct OrganizationFeatureSettings {
    pub id: Uuid,
    pub organization_id: i32,
    pub data_validation: bool,
    pub match_video: bool,
    pub robot_pictures: bool,
    pub scout_schedule: bool,
    pub picklist: bool,
}
