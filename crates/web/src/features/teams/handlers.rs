use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    models::{MatchData2025, TeamRecord},
};

use crate::error::WebError;
use crate::middleware::auth::CurrentUser;

use super::services;

#[utoipa::path(
    get,
    path = "/teams/{team_number}/info",
    params(
        ("team_number" = i32, Path, description = "FRC team number")
    ),
    responses(
        (status = 200, description = "Team found", body = TeamRecord),
        (status = 404, description = "Team not found")
    ),
    tag = "teams"
)]
pub async fn get_team_info(
    State(db): State<Database>,
    Path(team_number): Path<i32>,
) -> Result<Response, WebError> {
    let team = services::team_info(db.pool(), team_number).await?;

    Ok(Json(team).into_response())
}

#[utoipa::path(
    get,
    path = "/teams/{team_number}/matchData",
    params(
        ("team_number" = i32, Path, description = "FRC team number")
    ),
    responses(
        (status = 200, description = "Scouted matches of the team at the active event", body = Vec<MatchData2025>),
        (status = 401, description = "Missing API key or identity"),
        (status = 404, description = "No organization or active event")
    ),
    security(("bearer_auth" = [])),
    tag = "teams"
)]
pub async fn get_team_match_data(
    State(db): State<Database>,
    current: CurrentUser,
    Path(team_number): Path<i32>,
) -> Result<Response, WebError> {
    let membership = current.membership()?;
    let data = services::team_match_data(db.pool(), membership, team_number).await?;

    Ok(Json(data).into_response())
}
