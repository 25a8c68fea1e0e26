use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;

/// Lifecycle of a validation record.
///
/// `Pending` is the only state reconciliation reads, so records resolved
/// either way are never revisited automatically.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "validation_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationStatus {
    #[default]
    Pending,
    NeedsReview,
    Valid,
}

impl fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "PENDING"),
            Self::NeedsReview => write!(f, "NEEDS_REVIEW"),
            Self::Valid => write!(f, "VALID"),
        }
    }
}

/// Identity tuple shared by a submission and its validation record
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
pub struct SubmissionKey {
    pub event_key: String,
    pub match_level: String,
    pub match_number: i32,
    pub team_number: i32,
    pub user_id: Uuid,
    pub organization_id: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct DataValidation {
    pub event_key: String,
    pub match_level: String,
    pub match_number: i32,
    pub team_number: i32,
    pub user_id: Uuid,
    pub organization_id: i32,
    pub timestamp: NaiveDateTime,
    pub validation_status: ValidationStatus,
    pub notes: String,
}

impl DataValidation {
    pub fn key(&self) -> SubmissionKey {
        SubmissionKey {
            event_key: self.event_key.clone(),
            match_level: self.match_level.clone(),
            match_number: self.match_number,
            team_number: self.team_number,
            user_id: self.user_id,
            organization_id: self.organization_id,
        }
    }
}
