use std::collections::HashMap;
use tracing::debug;

use crate::models::{Alliance, DataValidation, MatchIdentity, MatchSchedule, ValidationStatus};

/// PENDING records covering all three teams of one alliance in one match.
///
/// `records` is in roster station order, so `records[i]` belongs to `teams[i]`.
#[derive(Debug, Clone)]
pub struct AllianceGroup {
    pub identity: MatchIdentity,
    pub alliance: Alliance,
    pub teams: [i32; 3],
    pub records: Vec<DataValidation>,
}

/// Groups PENDING validation records into complete alliance sets.
///
/// An alliance is only returned when each of its three stations has exactly
/// one PENDING record; partial or duplicated coverage is skipped and left for
/// a later run. Records for teams outside the roster are ignored.
pub fn group_pending(rosters: &[MatchSchedule], pending: &[DataValidation]) -> Vec<AllianceGroup> {
    let mut by_match: HashMap<MatchIdentity, Vec<&DataValidation>> = HashMap::new();
    for record in pending
        .iter()
        .filter(|r| r.validation_status == ValidationStatus::Pending)
    {
        by_match
            .entry(MatchIdentity::new(
                &record.event_key,
                &record.match_level,
                record.match_number,
            ))
            .or_default()
            .push(record);
    }

    let mut groups = Vec::new();

    for roster in rosters {
        let identity = roster.identity();
        let Some(records) = by_match.get(&identity) else {
            continue;
        };

        for alliance in Alliance::ALL {
            let teams = roster.alliance_teams(alliance);
            let mut stations: [Vec<&DataValidation>; 3] = Default::default();

            for record in records {
                if let Some(station) = teams.iter().position(|team| *team == record.team_number) {
                    stations[station].push(record);
                }
            }

            if stations.iter().all(|s| s.len() == 1) {
                groups.push(AllianceGroup {
                    identity: identity.clone(),
                    alliance,
                    teams,
                    records: stations.iter().map(|s| s[0].clone()).collect(),
                });
            } else if stations.iter().any(|s| !s.is_empty()) {
                debug!(
                    "Skipping {} {} alliance: station coverage {:?}",
                    identity,
                    alliance,
                    stations.iter().map(Vec::len).collect::<Vec<_>>()
                );
            }
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use uuid::Uuid;

    fn roster(match_number: i32) -> MatchSchedule {
        MatchSchedule {
            event_key: "2025test".to_string(),
            match_level: "qm".to_string(),
            match_number,
            red1: 1111,
            red2: 2222,
            red3: 3333,
            blue1: 4444,
            blue2: 5555,
            blue3: 6666,
        }
    }

    fn pending(match_number: i32, team_number: i32, user_id: Uuid) -> DataValidation {
        DataValidation {
            event_key: "2025test".to_string(),
            match_level: "qm".to_string(),
            match_number,
            team_number,
            user_id,
            organization_id: 1,
            timestamp: NaiveDateTime::default(),
            validation_status: ValidationStatus::Pending,
            notes: String::new(),
        }
    }

    #[test]
    fn test_complete_alliance_is_grouped_in_station_order() {
        let user = Uuid::new_v4();
        let records = vec![
            pending(1, 3333, user),
            pending(1, 1111, user),
            pending(1, 2222, user),
        ];

        let groups = group_pending(&[roster(1)], &records);

        assert_eq!(groups.len(), 1);
        let group = &groups[0];
        assert_eq!(group.alliance, Alliance::Red);
        assert_eq!(group.teams, [1111, 2222, 3333]);
        let ordered: Vec<i32> = group.records.iter().map(|r| r.team_number).collect();
        assert_eq!(ordered, vec![1111, 2222, 3333]);
    }

    #[test]
    fn test_two_of_three_is_skipped() {
        let user = Uuid::new_v4();
        let records = vec![pending(1, 1111, user), pending(1, 2222, user)];

        assert!(group_pending(&[roster(1)], &records).is_empty());
    }

    #[test]
    fn test_duplicate_station_is_skipped() {
        let records = vec![
            pending(1, 4444, Uuid::new_v4()),
            pending(1, 4444, Uuid::new_v4()),
            pending(1, 5555, Uuid::new_v4()),
            pending(1, 6666, Uuid::new_v4()),
        ];

        assert!(group_pending(&[roster(1)], &records).is_empty());
    }

    #[test]
    fn test_resolved_records_are_not_candidates() {
        let user = Uuid::new_v4();
        let mut resolved = pending(1, 3333, user);
        resolved.validation_status = ValidationStatus::Valid;
        let records = vec![pending(1, 1111, user), pending(1, 2222, user), resolved];

        assert!(group_pending(&[roster(1)], &records).is_empty());
    }

    #[test]
    fn test_both_alliances_and_matches_grouped_independently() {
        let user = Uuid::new_v4();
        let mut records: Vec<DataValidation> = [1111, 2222, 3333, 4444, 5555, 6666]
            .into_iter()
            .map(|team| pending(1, team, user))
            .collect();
        records.extend([4444, 5555, 6666].into_iter().map(|team| pending(2, team, user)));
        records.push(pending(3, 1111, user));

        let groups = group_pending(&[roster(1), roster(2), roster(3)], &records);

        let summary: Vec<(i32, Alliance)> = groups
            .iter()
            .map(|g| (g.identity.match_number, g.alliance))
            .collect();
        assert_eq!(
            summary,
            vec![(1, Alliance::Red), (1, Alliance::Blue), (2, Alliance::Blue)]
        );
    }

    #[test]
    fn test_records_without_roster_are_ignored() {
        let user = Uuid::new_v4();
        let records = vec![
            pending(9, 1111, user),
            pending(9, 2222, user),
            pending(9, 3333, user),
        ];

        assert!(group_pending(&[roster(1)], &records).is_empty());
    }
}
