use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Endgame state of a single robot in the 2025 game (REEFSCAPE)
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "endgame_2025", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Endgame2025 {
    #[default]
    None,
    Park,
    Shallow,
    Deep,
}

impl Endgame2025 {
    /// Higher value wins when several terminal states are reported for one robot
    pub fn priority(&self) -> u8 {
        match self {
            Self::None => 0,
            Self::Park => 1,
            Self::Shallow => 2,
            Self::Deep => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Park => "PARK",
            Self::Shallow => "SHALLOW",
            Self::Deep => "DEEP",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "NONE" => Some(Self::None),
            "PARK" => Some(Self::Park),
            "SHALLOW" => Some(Self::Shallow),
            "DEEP" => Some(Self::Deep),
            _ => None,
        }
    }
}

/// One scout's observation of one team in one 2025 match
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MatchData2025 {
    pub event_key: String,
    pub match_level: String,
    pub match_number: i32,
    pub team_number: i32,
    pub user_id: Uuid,
    pub organization_id: i32,
    pub season: i32,
    pub timestamp: NaiveDateTime,
    pub notes: String,
    pub al4c: i32,
    pub al3c: i32,
    pub al2c: i32,
    pub al1c: i32,
    pub tl4c: i32,
    pub tl3c: i32,
    pub tl2c: i32,
    pub tl1c: i32,
    pub a_net: i32,
    pub t_net: i32,
    pub a_processor: i32,
    pub t_processor: i32,
    pub endgame: Endgame2025,
}
