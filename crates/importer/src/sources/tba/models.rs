use serde::{Deserialize, Serialize};
use serde_json::Value;
use storage::models::{FrcEvent, MatchSchedule, TeamRecord};

use crate::error::{ImporterError, Result};

/// Championship division and final event types
const CHAMPIONSHIP_EVENT_TYPES: [i32; 2] = [3, 4];
/// Offseason and preseason event types, never imported
pub const SKIPPED_EVENT_TYPES: [i32; 2] = [99, 100];

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TbaTeam {
    pub key: String,
    pub team_number: i32,
    pub nickname: Option<String>,
    pub city: Option<String>,
    pub state_prov: Option<String>,
    pub country: Option<String>,
    pub rookie_year: Option<i32>,
}

impl TbaTeam {
    pub fn name(&self) -> String {
        self.nickname
            .clone()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| format!("Team {}", self.team_number))
    }

    /// "City, State, Country" with missing parts left out
    pub fn location(&self) -> Option<String> {
        let parts: Vec<&str> = [&self.city, &self.state_prov, &self.country]
            .into_iter()
            .filter_map(|part| part.as_deref())
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }

    pub fn to_record(&self) -> TeamRecord {
        TeamRecord {
            team_number: self.team_number,
            team_name: self.name(),
            location: self.location(),
            rookie_year: self.rookie_year,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TbaEvent {
    pub key: String,
    pub name: String,
    pub short_name: Option<String>,
    pub event_type: i32,
    pub week: Option<i32>,
    pub year: i32,
}

impl TbaEvent {
    pub fn is_skipped(&self) -> bool {
        SKIPPED_EVENT_TYPES.contains(&self.event_type)
    }

    pub fn to_event(&self) -> FrcEvent {
        FrcEvent {
            event_key: self.key.clone(),
            event_name: self.name.clone(),
            short_name: self.short_name.clone().filter(|name| !name.is_empty()),
            year: self.year,
            week: event_week(self.year, self.event_type, self.week),
        }
    }
}

/// Competition week shown to users. TBA weeks are zero based; championship
/// events get the week after the last regular one.
pub fn event_week(year: i32, event_type: i32, week: Option<i32>) -> i32 {
    if CHAMPIONSHIP_EVENT_TYPES.contains(&event_type) {
        if year < 2026 { 8 } else { 9 }
    } else {
        week.unwrap_or(0) + 1
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TbaAlliance {
    pub team_keys: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TbaAlliances {
    pub red: TbaAlliance,
    pub blue: TbaAlliance,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TbaMatchSimple {
    pub key: String,
    pub comp_level: String,
    pub set_number: i32,
    pub match_number: i32,
    pub alliances: TbaAlliances,
}

impl TbaMatchSimple {
    /// Semifinals are stored by set number, every other level by match number
    pub fn stored_match_number(&self) -> i32 {
        if self.comp_level == "sf" {
            self.set_number
        } else {
            self.match_number
        }
    }

    pub fn to_schedule(&self, event_key: &str) -> Result<MatchSchedule> {
        let [red1, red2, red3] = alliance_numbers(&self.key, &self.alliances.red)?;
        let [blue1, blue2, blue3] = alliance_numbers(&self.key, &self.alliances.blue)?;

        Ok(MatchSchedule {
            event_key: event_key.to_string(),
            match_level: self.comp_level.clone(),
            match_number: self.stored_match_number(),
            red1,
            red2,
            red3,
            blue1,
            blue2,
            blue3,
        })
    }
}

/// Full match record; only the breakdown is used
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TbaMatch {
    pub key: String,
    #[serde(default)]
    pub score_breakdown: Option<Value>,
}

/// `"frc1234"` -> `1234`
pub fn parse_team_key(team_key: &str) -> Result<i32> {
    team_key
        .strip_prefix("frc")
        .and_then(|number| number.parse().ok())
        .ok_or_else(|| ImporterError::TransformationError(format!("Invalid team key '{}'", team_key)))
}

fn alliance_numbers(match_key: &str, alliance: &TbaAlliance) -> Result<[i32; 3]> {
    let numbers = alliance
        .team_keys
        .iter()
        .map(|key| parse_team_key(key))
        .collect::<Result<Vec<i32>>>()?;

    numbers.try_into().map_err(|numbers: Vec<i32>| {
        ImporterError::TransformationError(format!(
            "Match {} has {} teams on one alliance",
            match_key,
            numbers.len()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn simple_match(comp_level: &str, set_number: i32, match_number: i32) -> TbaMatchSimple {
        serde_json::from_value(json!({
            "key": format!("2025test_{}{}m{}", comp_level, set_number, match_number),
            "comp_level": comp_level,
            "set_number": set_number,
            "match_number": match_number,
            "alliances": {
                "red": {"team_keys": ["frc1111", "frc2222", "frc3333"], "score": 10},
                "blue": {"team_keys": ["frc4444", "frc5555", "frc6666"], "score": 12}
            },
            "winning_alliance": "blue"
        }))
        .unwrap()
    }

    #[test]
    fn test_week_rule() {
        assert_eq!(event_week(2025, 0, Some(0)), 1);
        assert_eq!(event_week(2025, 1, Some(5)), 6);
        assert_eq!(event_week(2025, 3, Some(6)), 8);
        assert_eq!(event_week(2025, 4, None), 8);
        assert_eq!(event_week(2026, 3, None), 9);
        assert_eq!(event_week(2026, 0, Some(2)), 3);
    }

    #[test]
    fn test_offseason_events_skipped() {
        let event = TbaEvent {
            key: "2025off".to_string(),
            name: "Offseason".to_string(),
            short_name: None,
            event_type: 99,
            week: None,
            year: 2025,
        };
        assert!(event.is_skipped());
    }

    #[test]
    fn test_semifinal_stored_by_set_number() {
        let schedule = simple_match("sf", 4, 1).to_schedule("2025test").unwrap();
        assert_eq!(schedule.match_level, "sf");
        assert_eq!(schedule.match_number, 4);
        assert_eq!(schedule.red1, 1111);
        assert_eq!(schedule.blue3, 6666);

        let final_match = simple_match("f", 1, 2).to_schedule("2025test").unwrap();
        assert_eq!(final_match.match_number, 2);
        assert_eq!(final_match.identity().tba_key(), "2025test_f1m2");
    }

    #[test]
    fn test_short_alliance_rejected() {
        let mut tba_match = simple_match("qm", 1, 7);
        tba_match.alliances.red.team_keys.pop();
        assert!(matches!(
            tba_match.to_schedule("2025test"),
            Err(ImporterError::TransformationError(_))
        ));
    }

    #[test]
    fn test_team_key_parsing() {
        assert_eq!(parse_team_key("frc254").unwrap(), 254);
        assert!(parse_team_key("254").is_err());
        assert!(parse_team_key("frcabc").is_err());
    }

    #[test]
    fn test_team_location_skips_missing_parts() {
        let team = TbaTeam {
            key: "frc1111".to_string(),
            team_number: 1111,
            nickname: None,
            city: Some("Springfield".to_string()),
            state_prov: None,
            country: Some("USA".to_string()),
            rookie_year: Some(2003),
        };
        assert_eq!(team.location().as_deref(), Some("Springfield, USA"));
        assert_eq!(team.name(), "Team 1111");
    }

    #[test]
    fn test_unplayed_match_has_no_breakdown() {
        let tba_match: TbaMatch =
            serde_json::from_value(json!({"key": "2025test_qm1", "score_breakdown": null})).unwrap();
        assert!(tba_match.score_breakdown.is_none());
        let tba_match: TbaMatch = serde_json::from_value(json!({"key": "2025test_qm1"})).unwrap();
        assert!(tba_match.score_breakdown.is_none());
    }
}
