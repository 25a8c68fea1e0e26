use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "alliance_color", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Alliance {
    Red,
    Blue,
}

impl Alliance {
    pub const ALL: [Alliance; 2] = [Alliance::Red, Alliance::Blue];

    /// Key used for this alliance inside a TBA `score_breakdown`
    pub fn breakdown_key(&self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Blue => "blue",
        }
    }
}

impl fmt::Display for Alliance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Red => write!(f, "RED"),
            Self::Blue => write!(f, "BLUE"),
        }
    }
}

/// Identity of one match at an event
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
pub struct MatchIdentity {
    pub event_key: String,
    pub match_level: String,
    pub match_number: i32,
}

impl MatchIdentity {
    pub fn new(event_key: impl Into<String>, match_level: impl Into<String>, match_number: i32) -> Self {
        Self {
            event_key: event_key.into(),
            match_level: match_level.into(),
            match_number,
        }
    }

    /// The Blue Alliance match key.
    ///
    /// Semifinals are stored by set number and finals by match number within
    /// the single finals set, mirroring how the schedule sync stores them.
    pub fn tba_key(&self) -> String {
        match self.match_level.as_str() {
            "sf" => format!("{}_sf{}m1", self.event_key, self.match_number),
            "f" => format!("{}_f1m{}", self.event_key, self.match_number),
            level => format!("{}_{}{}", self.event_key, level, self.match_number),
        }
    }
}

impl fmt::Display for MatchIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}{}", self.event_key, self.match_level, self.match_number)
    }
}

/// Match roster: three teams per alliance, in station order.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MatchSchedule {
    pub event_key: String,
    pub match_level: String,
    pub match_number: i32,
    pub red1: i32,
    pub red2: i32,
    pub red3: i32,
    pub blue1: i32,
    pub blue2: i32,
    pub blue3: i32,
}

impl MatchSchedule {
    pub fn identity(&self) -> MatchIdentity {
        MatchIdentity::new(&self.event_key, &self.match_level, self.match_number)
    }

    pub fn alliance_teams(&self, alliance: Alliance) -> [i32; 3] {
        match alliance {
            Alliance::Red => [self.red1, self.red2, self.red3],
            Alliance::Blue => [self.blue1, self.blue2, self.blue3],
        }
    }

    /// True when no team appears twice in the roster
    pub fn is_disjoint(&self) -> bool {
        let red = self.alliance_teams(Alliance::Red);
        let blue = self.alliance_teams(Alliance::Blue);
        let all = [red, blue].concat();
        all.iter()
            .enumerate()
            .all(|(i, team)| !all[i + 1..].contains(team))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule() -> MatchSchedule {
        MatchSchedule {
            event_key: "2025test".to_string(),
            match_level: "qm".to_string(),
            match_number: 4,
            red1: 1111,
            red2: 2222,
            red3: 3333,
            blue1: 4444,
            blue2: 5555,
            blue3: 6666,
        }
    }

    #[test]
    fn test_tba_key_per_level() {
        assert_eq!(MatchIdentity::new("2025test", "qm", 12).tba_key(), "2025test_qm12");
        assert_eq!(MatchIdentity::new("2025test", "sf", 3).tba_key(), "2025test_sf3m1");
        assert_eq!(MatchIdentity::new("2025test", "f", 2).tba_key(), "2025test_f1m2");
    }

    #[test]
    fn test_alliance_teams_in_station_order() {
        let schedule = schedule();
        assert_eq!(schedule.alliance_teams(Alliance::Red), [1111, 2222, 3333]);
        assert_eq!(schedule.alliance_teams(Alliance::Blue), [4444, 5555, 6666]);
    }

    #[test]
    fn test_disjoint_roster() {
        let mut schedule = schedule();
        assert!(schedule.is_disjoint());
        schedule.blue2 = 1111;
        assert!(!schedule.is_disjoint());
    }
}
