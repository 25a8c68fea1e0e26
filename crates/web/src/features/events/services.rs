use sqlx::PgPool;
use storage::{
    models::{FrcEvent, MatchIdentity, MatchSchedule, Organization, TbaMatchData2025, TeamRecord},
    repository::{
        event::EventRepository, schedule::ScheduleRepository,
        tba_match_data::TbaMatchDataRepository, team::TeamRepository,
    },
};

use crate::error::{WebError, WebResult};

pub async fn list_events(pool: &PgPool, year: i32) -> WebResult<Vec<FrcEvent>> {
    Ok(EventRepository::new(pool).list_by_year(year).await?)
}

pub async fn list_matches(pool: &PgPool, event_key: &str) -> WebResult<Vec<MatchSchedule>> {
    Ok(ScheduleRepository::new(pool).list_for_event(event_key).await?)
}

pub async fn get_match(pool: &PgPool, identity: &MatchIdentity) -> WebResult<MatchSchedule> {
    Ok(ScheduleRepository::new(pool)
        .find_match(&identity.event_key, &identity.match_level, identity.match_number)
        .await?)
}

pub async fn list_teams(pool: &PgPool, event_key: &str) -> WebResult<Vec<TeamRecord>> {
    Ok(TeamRepository::new(pool).list_for_event(event_key).await?)
}

pub async fn public_organizations(pool: &PgPool, event_key: &str) -> WebResult<Vec<Organization>> {
    Ok(EventRepository::new(pool)
        .public_organizations(event_key)
        .await?)
}

/// Official alliance results cached by reconciliation. Only the 2025 result
/// table exists.
pub async fn match_results(
    pool: &PgPool,
    identity: &MatchIdentity,
) -> WebResult<Vec<TbaMatchData2025>> {
    let event = EventRepository::new(pool)
        .find_by_key(&identity.event_key)
        .await?;

    match event.year {
        2025 => Ok(TbaMatchDataRepository::new(pool).find_2025(identity).await?),
        year => Err(WebError::Unprocessable(format!(
            "No match results are kept for the {} season",
            year
        ))),
    }
}
