use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::{Endgame2025, SubmissionKey, ValidationStatus};

pub const MATCH_LEVELS: [&str; 3] = ["qm", "sf", "f"];

/// Scouted performance of one team in one 2025 match.
///
/// The submitting user and organization come from the caller's identity.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct MatchSubmission2025 {
    #[validate(length(min = 1, max = 15, message = "Event key must be between 1 and 15 characters"))]
    pub event_key: String,

    #[validate(custom(function = "validate_match_level"))]
    pub match_level: String,

    #[validate(range(min = 1))]
    pub match_number: i32,

    #[validate(range(min = 1))]
    pub team_number: i32,

    #[validate(length(max = 2048))]
    #[serde(default)]
    pub notes: String,

    #[validate(range(min = 0, max = 1000))]
    #[serde(default)]
    pub al4c: i32,
    #[validate(range(min = 0, max = 1000))]
    #[serde(default)]
    pub al3c: i32,
    #[validate(range(min = 0, max = 1000))]
    #[serde(default)]
    pub al2c: i32,
    #[validate(range(min = 0, max = 1000))]
    #[serde(default)]
    pub al1c: i32,

    #[validate(range(min = 0, max = 1000))]
    #[serde(default)]
    pub tl4c: i32,
    #[validate(range(min = 0, max = 1000))]
    #[serde(default)]
    pub tl3c: i32,
    #[validate(range(min = 0, max = 1000))]
    #[serde(default)]
    pub tl2c: i32,
    #[validate(range(min = 0, max = 1000))]
    #[serde(default)]
    pub tl1c: i32,

    #[validate(range(min = 0, max = 1000))]
    #[serde(default, alias = "aNet")]
    pub a_net: i32,
    #[validate(range(min = 0, max = 1000))]
    #[serde(default, alias = "tNet")]
    pub t_net: i32,
    #[validate(range(min = 0, max = 1000))]
    #[serde(default, alias = "aProcessor")]
    pub a_processor: i32,
    #[validate(range(min = 0, max = 1000))]
    #[serde(default, alias = "tProcessor")]
    pub t_processor: i32,

    #[serde(default)]
    pub endgame: Endgame2025,
}

impl MatchSubmission2025 {
    pub fn key(&self, user_id: Uuid, organization_id: i32) -> SubmissionKey {
        SubmissionKey {
            event_key: self.event_key.clone(),
            match_level: self.match_level.clone(),
            match_number: self.match_number,
            team_number: self.team_number,
            user_id,
            organization_id,
        }
    }
}

/// Reviewer correction of another scout's submission. The scored fields
/// replace the submission's; `notes` is stored on the validation record.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct DataValidationCorrection {
    pub user_id: Uuid,

    #[serde(flatten)]
    #[validate(nested)]
    pub submission: MatchSubmission2025,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct DataValidationFilter {
    pub match_number: Option<i32>,
    pub match_level: Option<String>,
    pub team_number: Option<i32>,
}

/// Human review decision for one validation record
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct DataValidationUpdate {
    #[validate(length(min = 1, max = 15))]
    pub event_key: String,

    #[validate(custom(function = "validate_match_level"))]
    pub match_level: String,

    pub match_number: i32,

    pub team_number: i32,

    pub user_id: Uuid,

    pub validation_status: ValidationStatus,

    /// Leaves the existing notes untouched when absent
    #[validate(length(max = 512))]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct ScoutedMatchFilter {
    pub match_level: Option<String>,
    pub match_number: Option<i32>,
    pub team_number: Option<i32>,
}

fn validate_match_level(level: &str) -> Result<(), ValidationError> {
    if MATCH_LEVELS.contains(&level) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_match_level"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body() -> serde_json::Value {
        json!({
            "event_key": "2025test",
            "match_level": "qm",
            "match_number": 3,
            "team_number": 1111,
            "al4c": 2,
            "aNet": 1,
            "tProcessor": 2,
            "endgame": "DEEP"
        })
    }

    #[test]
    fn test_submission_defaults_and_aliases() {
        let submission: MatchSubmission2025 = serde_json::from_value(body()).unwrap();
        assert_eq!(submission.al4c, 2);
        assert_eq!(submission.a_net, 1);
        assert_eq!(submission.t_processor, 2);
        assert_eq!(submission.tl1c, 0);
        assert_eq!(submission.endgame, Endgame2025::Deep);
        assert!(submission.notes.is_empty());
        assert!(submission.validate().is_ok());
    }

    #[test]
    fn test_negative_counts_rejected() {
        let mut value = body();
        value["tl2c"] = json!(-1);
        let submission: MatchSubmission2025 = serde_json::from_value(value).unwrap();
        let errors = submission.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("tl2c"));
    }

    #[test]
    fn test_oversized_counts_rejected() {
        let mut value = body();
        value["aNet"] = json!(i32::MAX);
        value["tNet"] = json!(1);
        let submission: MatchSubmission2025 = serde_json::from_value(value).unwrap();
        let errors = submission.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("a_net"));
        assert!(!errors.field_errors().contains_key("t_net"));
    }

    #[test]
    fn test_unknown_match_level_rejected() {
        let mut value = body();
        value["match_level"] = json!("qf");
        let submission: MatchSubmission2025 = serde_json::from_value(value).unwrap();
        assert!(submission.validate().is_err());
    }

    #[test]
    fn test_correction_flattens_submission() {
        let mut value = body();
        value["user_id"] = json!(Uuid::nil());
        value["notes"] = json!("Corrected notes");
        let correction: DataValidationCorrection = serde_json::from_value(value).unwrap();
        assert_eq!(correction.user_id, Uuid::nil());
        assert_eq!(correction.submission.notes, "Corrected notes");
        assert!(correction.validate().is_ok());
    }
}
