use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct FrcEvent {
    pub event_key: String,
    pub event_name: String,
    pub short_name: Option<String>,
    pub year: i32,
    pub week: i32,
}
