use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::scout::MATCH_LEVELS,
    models::{FrcEvent, MatchIdentity, MatchSchedule, Organization, TbaMatchData2025, TeamRecord},
};

use crate::error::WebError;

use super::services;

fn match_identity(event_key: String, level: String, number: i32) -> Result<MatchIdentity, WebError> {
    if !MATCH_LEVELS.contains(&level.as_str()) {
        return Err(WebError::BadRequest(format!("Unknown match level '{}'", level)));
    }
    Ok(MatchIdentity::new(event_key, level, number))
}

#[utoipa::path(
    get,
    path = "/events/{year}",
    params(
        ("year" = i32, Path, description = "Season year")
    ),
    responses(
        (status = 200, description = "Events of the season", body = Vec<FrcEvent>)
    ),
    tag = "events"
)]
pub async fn list_events(
    State(db): State<Database>,
    Path(year): Path<i32>,
) -> Result<Response, WebError> {
    let events = services::list_events(db.pool(), year).await?;

    Ok(Json(events).into_response())
}

#[utoipa::path(
    get,
    path = "/event/{event_key}/matches",
    params(
        ("event_key" = String, Path, description = "TBA event key")
    ),
    responses(
        (status = 200, description = "Match schedule of the event", body = Vec<MatchSchedule>)
    ),
    tag = "events"
)]
pub async fn list_matches(
    State(db): State<Database>,
    Path(event_key): Path<String>,
) -> Result<Response, WebError> {
    let matches = services::list_matches(db.pool(), &event_key).await?;

    Ok(Json(matches).into_response())
}

#[utoipa::path(
    get,
    path = "/event/{event_key}/match/{level}/{number}",
    params(
        ("event_key" = String, Path, description = "TBA event key"),
        ("level" = String, Path, description = "Match level: qm, sf or f"),
        ("number" = i32, Path, description = "Match number within the level")
    ),
    responses(
        (status = 200, description = "Match roster", body = MatchSchedule),
        (status = 400, description = "Unknown match level"),
        (status = 404, description = "Match not found")
    ),
    tag = "events"
)]
pub async fn get_match(
    State(db): State<Database>,
    Path((event_key, level, number)): Path<(String, String, i32)>,
) -> Result<Response, WebError> {
    let identity = match_identity(event_key, level, number)?;
    let schedule = services::get_match(db.pool(), &identity).await?;

    Ok(Json(schedule).into_response())
}

#[utoipa::path(
    get,
    path = "/event/{event_key}/match/{level}/{number}/results",
    params(
        ("event_key" = String, Path, description = "TBA event key"),
        ("level" = String, Path, description = "Match level: qm, sf or f"),
        ("number" = i32, Path, description = "Match number within the level")
    ),
    responses(
        (status = 200, description = "Official alliance results, red first", body = Vec<TbaMatchData2025>),
        (status = 404, description = "Event not found"),
        (status = 422, description = "Season without stored results")
    ),
    tag = "events"
)]
pub async fn get_match_results(
    State(db): State<Database>,
    Path((event_key, level, number)): Path<(String, String, i32)>,
) -> Result<Response, WebError> {
    let identity = match_identity(event_key, level, number)?;
    let results = services::match_results(db.pool(), &identity).await?;

    Ok(Json(results).into_response())
}

#[utoipa::path(
    get,
    path = "/event/{event_key}/teams",
    params(
        ("event_key" = String, Path, description = "TBA event key")
    ),
    responses(
        (status = 200, description = "Teams registered at the event", body = Vec<TeamRecord>)
    ),
    tag = "events"
)]
pub async fn list_teams(
    State(db): State<Database>,
    Path(event_key): Path<String>,
) -> Result<Response, WebError> {
    let teams = services::list_teams(db.pool(), &event_key).await?;

    Ok(Json(teams).into_response())
}

#[utoipa::path(
    get,
    path = "/event/{event_key}/organizations",
    params(
        ("event_key" = String, Path, description = "TBA event key")
    ),
    responses(
        (status = 200, description = "Organizations sharing their data for the event", body = Vec<Organization>)
    ),
    tag = "events"
)]
pub async fn list_public_organizations(
    State(db): State<Database>,
    Path(event_key): Path<String>,
) -> Result<Response, WebError> {
    let organizations = services::public_organizations(db.pool(), &event_key).await?;

    Ok(Json(organizations).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_identity_rejects_unknown_level() {
        assert!(matches!(
            match_identity("2025test".to_string(), "ef".to_string(), 1),
            Err(WebError::BadRequest(_))
        ));
        let identity = match_identity("2025test".to_string(), "sf".to_string(), 2).unwrap();
        assert_eq!(identity.tba_key(), "2025test_sf2m1");
    }
}
