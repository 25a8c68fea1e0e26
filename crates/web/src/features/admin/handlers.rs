use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    dto::{
        import::{EventImportSummary, TeamImportSummary},
        organization::CreateOrganizationRequest,
    },
    models::Organization,
};
use validator::Validate;

use crate::AppState;
use crate::error::WebError;

use super::services;

#[utoipa::path(
    post,
    path = "/admin/organizations/create",
    request_body = CreateOrganizationRequest,
    responses(
        (status = 201, description = "Organization created with default feature settings", body = Organization),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "admin"
)]
pub async fn create_organization(
    State(state): State<AppState>,
    Json(request): Json<CreateOrganizationRequest>,
) -> Result<Response, WebError> {
    request.validate()?;

    let organization = services::create_organization(state.db.pool(), &request).await?;

    Ok((StatusCode::CREATED, Json(organization)).into_response())
}

#[utoipa::path(
    post,
    path = "/admin/teams/update",
    responses(
        (status = 200, description = "Team list refreshed from TBA", body = TeamImportSummary),
        (status = 401, description = "Unauthorized"),
        (status = 502, description = "The Blue Alliance request failed"),
        (status = 503, description = "TBA API key not configured")
    ),
    security(("bearer_auth" = [])),
    tag = "admin"
)]
pub async fn update_teams(State(state): State<AppState>) -> Result<Response, WebError> {
    let summary = services::update_teams(state.db.pool(), &state.tba).await?;

    Ok(Json(summary).into_response())
}

#[utoipa::path(
    post,
    path = "/admin/events/registration/{year}",
    params(
        ("year" = i32, Path, description = "Season year")
    ),
    responses(
        (status = 200, description = "Events and registrations imported", body = EventImportSummary),
        (status = 401, description = "Unauthorized"),
        (status = 502, description = "The Blue Alliance request failed"),
        (status = 503, description = "TBA API key not configured")
    ),
    security(("bearer_auth" = [])),
    tag = "admin"
)]
pub async fn import_events(
    State(state): State<AppState>,
    Path(year): Path<i32>,
) -> Result<Response, WebError> {
    let summary = services::import_events(state.db.pool(), &state.tba, year).await?;

    Ok(Json(summary).into_response())
}
