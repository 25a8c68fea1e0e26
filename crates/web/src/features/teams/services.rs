use sqlx::PgPool;
use storage::{
    dto::scout::ScoutedMatchFilter,
    models::{MatchData2025, TeamRecord, UserOrganization},
    repository::{match_data::MatchDataRepository, team::TeamRepository},
};

use crate::error::WebResult;
use crate::features::active_event;

pub async fn team_info(pool: &PgPool, team_number: i32) -> WebResult<TeamRecord> {
    Ok(TeamRepository::new(pool).find(team_number).await?)
}

/// Everything the caller's organization scouted for the team at its active
/// event
pub async fn team_match_data(
    pool: &PgPool,
    membership: &UserOrganization,
    team_number: i32,
) -> WebResult<Vec<MatchData2025>> {
    let event_key = active_event(pool, membership).await?;
    let filter = ScoutedMatchFilter {
        team_number: Some(team_number),
        ..Default::default()
    };

    Ok(MatchDataRepository::new(pool)
        .list_2025(&event_key, membership.organization_id, &filter)
        .await?)
}
