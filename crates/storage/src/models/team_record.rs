use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct TeamRecord {
    pub team_number: i32,
    pub team_name: String,
    pub location: Option<String>,
    pub rookie_year: Option<i32>,
}

/// Registration of a team at an event
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct TeamEvent {
    pub event_key: String,
    pub team_number: i32,
}
