//! REEFSCAPE (2025) reconciliation rules.
//!
//! TBA reports the reef per alliance as two nested objects, `autoReef` and
//! `teleopReef`. The teleop object is cumulative over the whole match, so the
//! auto contribution is subtracted to get teleop-only counts. Net and
//! processor algae are only reported as match totals and are compared
//! against the sum of the auto and teleop scouting fields.

use serde_json::Value;

use super::fields::{FieldMap, FieldValue};
use super::season::{
    AllianceRecord, BreakdownError, SeasonHandler, SeasonSubmission, SeasonTables,
};
use crate::models::{Alliance, Endgame2025, MatchData2025, MatchIdentity, TbaMatchData2025};

pub const AL4C: &str = "al4c";
pub const AL3C: &str = "al3c";
pub const AL2C: &str = "al2c";
pub const AL1C: &str = "al1c";
pub const TL4C: &str = "tl4c";
pub const TL3C: &str = "tl3c";
pub const TL2C: &str = "tl2c";
pub const TL1C: &str = "tl1c";
pub const NET: &str = "net";
pub const PROCESSOR: &str = "processor";
pub const ENDGAME_ROBOTS: [&str; 3] = ["endgame_robot1", "endgame_robot2", "endgame_robot3"];

/// Branch rows: (aggregate count key, nested node object key, auto field, teleop field)
const BRANCH_ROWS: [(&str, &str, &str, &str); 3] = [
    ("tba_topRowCount", "topRow", AL4C, TL4C),
    ("tba_midRowCount", "midRow", AL3C, TL3C),
    ("tba_botRowCount", "botRow", AL2C, TL2C),
];

pub struct Season2025Handler;

impl SeasonHandler for Season2025Handler {
    fn year(&self) -> i32 {
        2025
    }

    fn name(&self) -> &'static str {
        "REEFSCAPE"
    }

    fn tables(&self) -> SeasonTables {
        SeasonTables::Reefscape2025
    }

    fn parse_breakdown(&self, alliance: &Value, teams: &[i32]) -> Result<FieldMap, BreakdownError> {
        if !alliance.is_object() {
            return Err(BreakdownError::Malformed);
        }

        let auto_reef = alliance.get("autoReef");
        let teleop_reef = alliance.get("teleopReef");
        let mut fields = FieldMap::new();

        for (aggregate, nested, auto_field, teleop_field) in BRANCH_ROWS {
            let auto = reef_row_count(auto_reef, aggregate, nested);
            let cumulative = reef_row_count(teleop_reef, aggregate, nested);
            fields.insert(auto_field.to_string(), FieldValue::count(auto));
            fields.insert(
                teleop_field.to_string(),
                FieldValue::count(teleop_only(cumulative, auto)),
            );
        }

        let auto_trough = trough_count(auto_reef);
        let cumulative_trough = trough_count(teleop_reef);
        fields.insert(AL1C.to_string(), FieldValue::count(auto_trough));
        fields.insert(
            TL1C.to_string(),
            FieldValue::count(teleop_only(cumulative_trough, auto_trough)),
        );

        fields.insert(
            NET.to_string(),
            FieldValue::count(count_at(alliance, "netAlgaeCount")),
        );
        fields.insert(
            PROCESSOR.to_string(),
            FieldValue::count(count_at(alliance, "wallAlgaeCount")),
        );

        for (station, field) in ENDGAME_ROBOTS.iter().enumerate().take(teams.len()) {
            let signal = alliance.get(format!("endGameRobot{}", station + 1));
            fields.insert(
                field.to_string(),
                FieldValue::category(classify_endgame(signal).as_str()),
            );
        }

        Ok(fields)
    }

    fn combine(&self, teams: &[i32; 3], submissions: &[SeasonSubmission]) -> Option<FieldMap> {
        if submissions.len() != teams.len() {
            return None;
        }

        let mut stations: [Option<&MatchData2025>; 3] = [None; 3];
        for submission in submissions {
            let data = submission.as_reefscape()?;
            let station = teams.iter().position(|team| *team == data.team_number)?;
            if stations[station].is_some() {
                return None;
            }
            stations[station] = Some(data);
        }
        let stations: Vec<&MatchData2025> = stations.into_iter().collect::<Option<_>>()?;

        let sum = |pick: fn(&MatchData2025) -> i64| -> FieldValue {
            FieldValue::count(stations.iter().map(|d| pick(d)).sum())
        };

        let mut fields = FieldMap::new();
        fields.insert(AL4C.to_string(), sum(|d| i64::from(d.al4c)));
        fields.insert(AL3C.to_string(), sum(|d| i64::from(d.al3c)));
        fields.insert(AL2C.to_string(), sum(|d| i64::from(d.al2c)));
        fields.insert(AL1C.to_string(), sum(|d| i64::from(d.al1c)));
        fields.insert(TL4C.to_string(), sum(|d| i64::from(d.tl4c)));
        fields.insert(TL3C.to_string(), sum(|d| i64::from(d.tl3c)));
        fields.insert(TL2C.to_string(), sum(|d| i64::from(d.tl2c)));
        fields.insert(TL1C.to_string(), sum(|d| i64::from(d.tl1c)));
        fields.insert(NET.to_string(), sum(|d| i64::from(d.a_net) + i64::from(d.t_net)));
        fields.insert(PROCESSOR.to_string(), sum(|d| i64::from(d.a_processor) + i64::from(d.t_processor)));

        for (field, data) in ENDGAME_ROBOTS.iter().zip(&stations) {
            fields.insert(field.to_string(), FieldValue::category(data.endgame.as_str()));
        }

        Some(fields)
    }

    fn alliance_record(
        &self,
        identity: &MatchIdentity,
        alliance: Alliance,
        fields: &FieldMap,
    ) -> AllianceRecord {
        let count = |field: &str| -> i32 {
            fields
                .get(field)
                .and_then(FieldValue::truncated)
                .and_then(|n| i32::try_from(n).ok())
                .unwrap_or(0)
        };
        let endgame = |field: &str| -> Endgame2025 {
            fields
                .get(field)
                .and_then(FieldValue::as_category)
                .and_then(Endgame2025::from_label)
                .unwrap_or_default()
        };

        AllianceRecord::Reefscape(TbaMatchData2025 {
            event_key: identity.event_key.clone(),
            match_level: identity.match_level.clone(),
            match_number: identity.match_number,
            alliance,
            al4c: count(AL4C),
            al3c: count(AL3C),
            al2c: count(AL2C),
            al1c: count(AL1C),
            tl4c: count(TL4C),
            tl3c: count(TL3C),
            tl2c: count(TL2C),
            tl1c: count(TL1C),
            net: count(NET),
            processor: count(PROCESSOR),
            endgame_robot1: endgame(ENDGAME_ROBOTS[0]),
            endgame_robot2: endgame(ENDGAME_ROBOTS[1]),
            endgame_robot3: endgame(ENDGAME_ROBOTS[2]),
            fetched_at: None,
        })
    }
}

/// Teleop-only delta of a cumulative count; never negative
fn teleop_only(cumulative: i64, auto: i64) -> i64 {
    (cumulative - auto).max(0)
}

fn count_at(object: &Value, key: &str) -> i64 {
    object.get(key).and_then(as_count).unwrap_or(0)
}

fn as_count(value: &Value) -> Option<i64> {
    value.as_f64().map(|n| n.trunc() as i64)
}

/// Prefers the aggregate row count; falls back to counting scored nodes
fn reef_row_count(reef: Option<&Value>, aggregate: &str, nested: &str) -> i64 {
    let Some(reef) = reef else {
        return 0;
    };

    if let Some(count) = reef.get(aggregate).and_then(as_count) {
        return count;
    }

    match reef.get(nested) {
        Some(Value::Object(nodes)) => nodes.values().filter(|node| is_scored(node)).count() as i64,
        _ => 0,
    }
}

fn trough_count(reef: Option<&Value>) -> i64 {
    reef.map(|reef| count_at(reef, "trough")).unwrap_or(0)
}

fn is_scored(node: &Value) -> bool {
    match node {
        Value::Bool(scored) => *scored,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        _ => false,
    }
}

/// Resolves an endgame signal to the most valuable state it mentions.
///
/// Accepts a single TBA label (`DeepCage`, `ShallowCage`, `Parked`, `None`),
/// a label list joined by separators, or an array of labels.
pub fn classify_endgame(signal: Option<&Value>) -> Endgame2025 {
    let labels: Vec<&str> = match signal {
        Some(Value::String(label)) => vec![label.as_str()],
        Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
        _ => Vec::new(),
    };

    labels
        .into_iter()
        .flat_map(|label| label.split(|c: char| !c.is_ascii_alphanumeric()))
        .map(classify_label)
        .max_by_key(Endgame2025::priority)
        .unwrap_or_default()
}

fn classify_label(label: &str) -> Endgame2025 {
    let label = label.to_ascii_lowercase();
    if label.contains("deep") {
        Endgame2025::Deep
    } else if label.contains("shallow") {
        Endgame2025::Shallow
    } else if label.contains("park") {
        Endgame2025::Park
    } else {
        Endgame2025::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::reconciliation::compare::compare;
    use chrono::NaiveDateTime;
    use serde_json::json;
    use uuid::Uuid;

    const TEAMS: [i32; 3] = [1111, 2222, 3333];

    fn number(fields: &FieldMap, field: &str) -> i64 {
        fields.get(field).and_then(FieldValue::truncated).unwrap()
    }

    fn category<'a>(fields: &'a FieldMap, field: &str) -> &'a str {
        fields.get(field).and_then(FieldValue::as_category).unwrap()
    }

    fn submission(team_number: i32) -> MatchData2025 {
        MatchData2025 {
            event_key: "E1".to_string(),
            match_level: "qm".to_string(),
            match_number: 1,
            team_number,
            user_id: Uuid::nil(),
            organization_id: 1,
            season: 1,
            timestamp: NaiveDateTime::default(),
            notes: String::new(),
            al4c: 0,
            al3c: 0,
            al2c: 0,
            al1c: 0,
            tl4c: 0,
            tl3c: 0,
            tl2c: 0,
            tl1c: 0,
            a_net: 0,
            t_net: 0,
            a_processor: 0,
            t_processor: 0,
            endgame: Endgame2025::None,
        }
    }

    fn scenario_breakdown() -> Value {
        json!({
            "autoReef": {
                "tba_topRowCount": 1,
                "tba_midRowCount": 1,
                "tba_botRowCount": 1,
                "trough": 0
            },
            "teleopReef": {
                "tba_topRowCount": 2,
                "tba_midRowCount": 2,
                "tba_botRowCount": 2,
                "trough": 0
            },
            "netAlgaeCount": 0,
            "wallAlgaeCount": 0,
            "endGameRobot1": "DeepCage",
            "endGameRobot2": "Parked",
            "endGameRobot3": "None"
        })
    }

    fn scenario_submissions(teleop: i32) -> Vec<SeasonSubmission> {
        scenario_rows(teleop)
            .into_iter()
            .map(SeasonSubmission::Reefscape)
            .collect()
    }

    fn scenario_rows(teleop: i32) -> [MatchData2025; 3] {
        let mut t1 = submission(1111);
        t1.al4c = 1;
        t1.tl4c = teleop;
        t1.endgame = Endgame2025::Deep;
        let mut t2 = submission(2222);
        t2.al3c = 1;
        t2.tl3c = teleop;
        t2.endgame = Endgame2025::Park;
        let mut t3 = submission(3333);
        t3.al2c = 1;
        t3.tl2c = teleop;
        t3.endgame = Endgame2025::None;

        [t1, t2, t3]
    }

    #[test]
    fn test_zero_breakdown_parses_to_zero_and_none() {
        let breakdown = json!({
            "autoReef": {"tba_topRowCount": 0, "tba_midRowCount": 0, "tba_botRowCount": 0, "trough": 0},
            "teleopReef": {"tba_topRowCount": 0, "tba_midRowCount": 0, "tba_botRowCount": 0, "trough": 0},
            "netAlgaeCount": 0,
            "wallAlgaeCount": 0,
            "endGameRobot1": "None",
            "endGameRobot2": "None",
            "endGameRobot3": "None"
        });

        let fields = Season2025Handler.parse_breakdown(&breakdown, &TEAMS).unwrap();

        for field in [AL4C, AL3C, AL2C, AL1C, TL4C, TL3C, TL2C, TL1C, NET, PROCESSOR] {
            assert_eq!(number(&fields, field), 0, "{field}");
        }
        for field in ENDGAME_ROBOTS {
            assert_eq!(category(&fields, field), "NONE");
        }
    }

    #[test]
    fn test_empty_alliance_object_defaults_everything() {
        let fields = Season2025Handler.parse_breakdown(&json!({}), &TEAMS).unwrap();
        assert_eq!(fields.len(), 13);
        assert_eq!(number(&fields, TL1C), 0);
        assert_eq!(category(&fields, "endgame_robot3"), "NONE");
    }

    #[test]
    fn test_non_object_alliance_is_malformed() {
        let result = Season2025Handler.parse_breakdown(&json!(null), &TEAMS);
        assert_eq!(result, Err(BreakdownError::Malformed));
    }

    #[test]
    fn test_teleop_is_cumulative_minus_auto() {
        let fields = Season2025Handler
            .parse_breakdown(&scenario_breakdown(), &TEAMS)
            .unwrap();

        assert_eq!(number(&fields, AL4C), 1);
        assert_eq!(number(&fields, AL3C), 1);
        assert_eq!(number(&fields, AL2C), 1);
        assert_eq!(number(&fields, TL4C), 1);
        assert_eq!(number(&fields, TL3C), 1);
        assert_eq!(number(&fields, TL2C), 1);
    }

    #[test]
    fn test_teleop_never_negative() {
        let breakdown = json!({
            "autoReef": {"tba_topRowCount": 3, "trough": 2},
            "teleopReef": {"tba_topRowCount": 1, "trough": 0}
        });

        let fields = Season2025Handler.parse_breakdown(&breakdown, &TEAMS).unwrap();

        assert_eq!(number(&fields, AL4C), 3);
        assert_eq!(number(&fields, TL4C), 0);
        assert_eq!(number(&fields, AL1C), 2);
        assert_eq!(number(&fields, TL1C), 0);
    }

    #[test]
    fn test_aggregate_preferred_over_nested_nodes() {
        let breakdown = json!({
            "autoReef": {
                "tba_topRowCount": 2,
                "topRow": {"nodeA": true, "nodeB": true, "nodeC": true}
            }
        });

        let fields = Season2025Handler.parse_breakdown(&breakdown, &TEAMS).unwrap();
        assert_eq!(number(&fields, AL4C), 2);
    }

    #[test]
    fn test_nested_nodes_counted_without_aggregate() {
        let breakdown = json!({
            "autoReef": {
                "topRow": {"nodeA": true, "nodeB": false},
                "botRow": {"nodeA": true, "nodeK": true, "nodeL": false}
            },
            "teleopReef": {
                "topRow": {"nodeA": true, "nodeB": true, "nodeC": true},
                "botRow": {"nodeA": true, "nodeK": true, "nodeL": true}
            }
        });

        let fields = Season2025Handler.parse_breakdown(&breakdown, &TEAMS).unwrap();

        assert_eq!(number(&fields, AL4C), 1);
        assert_eq!(number(&fields, TL4C), 2);
        assert_eq!(number(&fields, AL2C), 2);
        assert_eq!(number(&fields, TL2C), 1);
        assert_eq!(number(&fields, AL3C), 0);
    }

    #[test]
    fn test_fractional_counts_truncated() {
        let breakdown = json!({"netAlgaeCount": 4.9, "wallAlgaeCount": 1.2});
        let fields = Season2025Handler.parse_breakdown(&breakdown, &TEAMS).unwrap();
        assert_eq!(number(&fields, NET), 4);
        assert_eq!(number(&fields, PROCESSOR), 1);
    }

    #[test]
    fn test_endgame_priority_prefers_deep_over_park() {
        assert_eq!(classify_endgame(Some(&json!("Parked,DeepCage"))), Endgame2025::Deep);
        assert_eq!(classify_endgame(Some(&json!("DeepCage Parked"))), Endgame2025::Deep);
        assert_eq!(classify_endgame(Some(&json!(["Parked", "DeepCage"]))), Endgame2025::Deep);
        assert_eq!(classify_endgame(Some(&json!(["DeepCage", "Parked"]))), Endgame2025::Deep);
        assert_eq!(classify_endgame(Some(&json!(["Parked", "ShallowCage"]))), Endgame2025::Shallow);
    }

    #[test]
    fn test_endgame_unknown_or_absent_is_none() {
        assert_eq!(classify_endgame(None), Endgame2025::None);
        assert_eq!(classify_endgame(Some(&json!(null))), Endgame2025::None);
        assert_eq!(classify_endgame(Some(&json!("Hovering"))), Endgame2025::None);
        assert_eq!(classify_endgame(Some(&json!(7))), Endgame2025::None);
        assert_eq!(classify_endgame(Some(&json!("ShallowCage"))), Endgame2025::Shallow);
    }

    #[test]
    fn test_combine_sums_and_keeps_stations() {
        let [mut t1, mut t2, t3] = scenario_rows(2);
        t1.a_net = 1;
        t1.t_processor = 1;
        t2.t_net = 1;
        t2.a_processor = 1;
        let submissions: Vec<SeasonSubmission> = [t3, t2, t1]
            .into_iter()
            .map(SeasonSubmission::Reefscape)
            .collect();

        let fields = Season2025Handler.combine(&TEAMS, &submissions).unwrap();

        assert_eq!(number(&fields, AL4C), 1);
        assert_eq!(number(&fields, AL3C), 1);
        assert_eq!(number(&fields, AL2C), 1);
        assert_eq!(number(&fields, TL4C), 2);
        assert_eq!(number(&fields, TL3C), 2);
        assert_eq!(number(&fields, TL2C), 2);
        assert_eq!(number(&fields, NET), 2);
        assert_eq!(number(&fields, PROCESSOR), 2);
        assert_eq!(category(&fields, "endgame_robot1"), "DEEP");
        assert_eq!(category(&fields, "endgame_robot2"), "PARK");
        assert_eq!(category(&fields, "endgame_robot3"), "NONE");
    }

    #[test]
    fn test_combine_widens_before_adding() {
        let [mut t1, t2, t3] = scenario_rows(0);
        t1.a_net = i32::MAX;
        t1.t_net = 1;
        t1.t_processor = i32::MAX;
        let submissions: Vec<SeasonSubmission> = [t1, t2, t3]
            .into_iter()
            .map(SeasonSubmission::Reefscape)
            .collect();

        let fields = Season2025Handler.combine(&TEAMS, &submissions).unwrap();

        assert_eq!(number(&fields, NET), i64::from(i32::MAX) + 1);
        assert_eq!(number(&fields, PROCESSOR), i64::from(i32::MAX));
    }

    #[test]
    fn test_combine_is_idempotent() {
        let submissions = scenario_submissions(1);
        let first = Season2025Handler.combine(&TEAMS, &submissions);
        let second = Season2025Handler.combine(&TEAMS, &submissions);
        assert!(first.is_some());
        assert_eq!(first, second);
    }

    #[test]
    fn test_combine_rejects_ambiguous_stations() {
        let submissions = vec![
            SeasonSubmission::Reefscape(submission(1111)),
            SeasonSubmission::Reefscape(submission(1111)),
            SeasonSubmission::Reefscape(submission(3333)),
        ];
        assert!(Season2025Handler.combine(&TEAMS, &submissions).is_none());
    }

    #[test]
    fn test_combine_rejects_foreign_team_and_short_input() {
        let foreign = vec![
            SeasonSubmission::Reefscape(submission(1111)),
            SeasonSubmission::Reefscape(submission(2222)),
            SeasonSubmission::Reefscape(submission(9999)),
        ];
        assert!(Season2025Handler.combine(&TEAMS, &foreign).is_none());

        let short = vec![
            SeasonSubmission::Reefscape(submission(1111)),
            SeasonSubmission::Reefscape(submission(2222)),
        ];
        assert!(Season2025Handler.combine(&TEAMS, &short).is_none());
    }

    #[test]
    fn test_scenario_cumulative_teleop_scouted_as_total_does_not_reconcile() {
        // External teleop is 2 - 1 = 1 per row; scouts reporting 2 disagree.
        let external = Season2025Handler
            .parse_breakdown(&scenario_breakdown(), &TEAMS)
            .unwrap();
        let internal = Season2025Handler
            .combine(&TEAMS, &scenario_submissions(2))
            .unwrap();

        let comparison = compare(&external, &internal);
        let fields: Vec<&str> = comparison
            .mismatches
            .iter()
            .map(|m| m.field.as_str())
            .collect();
        assert_eq!(fields, vec![TL2C, TL3C, TL4C]);
    }

    #[test]
    fn test_scenario_teleop_only_scouting_reconciles() {
        let external = Season2025Handler
            .parse_breakdown(&scenario_breakdown(), &TEAMS)
            .unwrap();
        let internal = Season2025Handler
            .combine(&TEAMS, &scenario_submissions(1))
            .unwrap();

        assert!(compare(&external, &internal).is_reconciled());
    }

    #[test]
    fn test_alliance_record_mirrors_fields() {
        let fields = Season2025Handler
            .parse_breakdown(&scenario_breakdown(), &TEAMS)
            .unwrap();
        let identity = MatchIdentity::new("E1", "qm", 1);

        let AllianceRecord::Reefscape(row) =
            Season2025Handler.alliance_record(&identity, Alliance::Red, &fields);

        assert_eq!(row.event_key, "E1");
        assert_eq!(row.alliance, Alliance::Red);
        assert_eq!(row.al4c, 1);
        assert_eq!(row.tl4c, 1);
        assert_eq!(row.endgame_robot1, Endgame2025::Deep);
        assert_eq!(row.endgame_robot2, Endgame2025::Park);
        assert_eq!(row.endgame_robot3, Endgame2025::None);
    }
}
