use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::{Alliance, Endgame2025};

/// Cached TBA breakdown for one alliance of one 2025 match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct TbaMatchData2025 {
    pub event_key: String,
    pub match_level: String,
    pub match_number: i32,
    pub alliance: Alliance,
    pub al4c: i32,
    pub al3c: i32,
    pub al2c: i32,
    pub al1c: i32,
    pub tl4c: i32,
    pub tl3c: i32,
    pub tl2c: i32,
    pub tl1c: i32,
    pub net: i32,
    pub processor: i32,
    pub endgame_robot1: Endgame2025,
    pub endgame_robot2: Endgame2025,
    pub endgame_robot3: Endgame2025,
    pub fetched_at: Option<NaiveDateTime>,
}
