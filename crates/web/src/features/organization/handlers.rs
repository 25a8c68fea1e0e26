use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::{
        export::MatchExportRequest,
        import::ScheduleSyncSummary,
        organization::{
            CreateOrganizationEventRequest, OrganizationApplication, OrganizationEventDetail,
            UpdateOrganizationEventRequest,
        },
    },
    models::OrganizationEvent,
};
use validator::Validate;

use crate::AppState;
use crate::error::WebError;
use crate::middleware::auth::CurrentUser;

use super::{export, services};

#[utoipa::path(
    get,
    path = "/organization/applications",
    responses(
        (status = 200, description = "Users waiting to join the organization", body = Vec<OrganizationApplication>),
        (status = 403, description = "Caller is not an admin or lead")
    ),
    security(("bearer_auth" = [])),
    tag = "organization"
)]
pub async fn list_applications(
    State(db): State<Database>,
    current: CurrentUser,
) -> Result<Response, WebError> {
    let membership = current.manager_membership()?;
    let applications = services::applications(db.pool(), membership).await?;

    Ok(Json(applications).into_response())
}

#[utoipa::path(
    post,
    path = "/organization/createEvent",
    request_body = CreateOrganizationEventRequest,
    responses(
        (status = 201, description = "Organization now attends the event", body = OrganizationEvent),
        (status = 403, description = "Caller does not manage the organization"),
        (status = 404, description = "Event not found"),
        (status = 409, description = "Organization already attends the event")
    ),
    security(("bearer_auth" = [])),
    tag = "organization"
)]
pub async fn create_event(
    State(db): State<Database>,
    current: CurrentUser,
    Json(request): Json<CreateOrganizationEventRequest>,
) -> Result<Response, WebError> {
    request.validate()?;
    let membership = current.manager_membership()?;

    let event = services::create_event(db.pool(), membership, &request).await?;

    Ok((StatusCode::CREATED, Json(event)).into_response())
}

#[utoipa::path(
    post,
    path = "/organization/event/{event_key}/matches/sync",
    params(
        ("event_key" = String, Path, description = "TBA event key")
    ),
    responses(
        (status = 200, description = "Schedule replaced", body = ScheduleSyncSummary),
        (status = 404, description = "Organization does not attend the event"),
        (status = 502, description = "The Blue Alliance request failed"),
        (status = 503, description = "TBA API key not configured")
    ),
    security(("bearer_auth" = [])),
    tag = "organization"
)]
pub async fn sync_matches(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(event_key): Path<String>,
) -> Result<Response, WebError> {
    let membership = current.manager_membership()?;

    let summary =
        services::sync_matches(state.db.pool(), &state.tba, membership, &event_key).await?;

    Ok(Json(summary).into_response())
}

#[utoipa::path(
    get,
    path = "/organization/{organization_id}/events",
    params(
        ("organization_id" = i32, Path, description = "Organization id")
    ),
    responses(
        (status = 200, description = "Events the organization attends", body = Vec<OrganizationEventDetail>),
        (status = 403, description = "Caller is not a member of the organization")
    ),
    security(("bearer_auth" = [])),
    tag = "organization"
)]
pub async fn list_events(
    State(db): State<Database>,
    current: CurrentUser,
    Path(organization_id): Path<i32>,
) -> Result<Response, WebError> {
    let membership = current.membership()?;
    let events = services::events(db.pool(), membership, organization_id).await?;

    Ok(Json(events).into_response())
}

#[utoipa::path(
    patch,
    path = "/organization/events",
    request_body = Vec<UpdateOrganizationEventRequest>,
    responses(
        (status = 200, description = "Event settings applied", body = Vec<OrganizationEventDetail>),
        (status = 400, description = "Updates must cover every event once with exactly one active"),
        (status = 403, description = "Caller is not an admin or lead")
    ),
    security(("bearer_auth" = [])),
    tag = "organization"
)]
pub async fn update_events(
    State(db): State<Database>,
    current: CurrentUser,
    Json(updates): Json<Vec<UpdateOrganizationEventRequest>>,
) -> Result<Response, WebError> {
    let membership = current.manager_membership()?;

    let events = services::update_events(db.pool(), membership, &updates).await?;

    Ok(Json(events).into_response())
}

#[utoipa::path(
    post,
    path = "/organization/downloadData",
    request_body = MatchExportRequest,
    responses(
        (status = 200, description = "Submissions of the active event as a file"),
        (status = 404, description = "No active event"),
        (status = 422, description = "Unknown file type")
    ),
    security(("bearer_auth" = [])),
    tag = "organization"
)]
pub async fn download_data(
    State(db): State<Database>,
    current: CurrentUser,
    Json(request): Json<MatchExportRequest>,
) -> Result<Response, WebError> {
    let membership = current.membership()?;
    let (event_key, rows) = services::export_rows(db.pool(), membership).await?;

    let body = export::render(request.file_type, &rows)?;
    let disposition = format!(
        "attachment; filename=\"{}\"",
        request.file_type.file_name(&event_key)
    );
    let disposition = HeaderValue::from_str(&disposition)
        .map_err(|_| WebError::BadRequest(format!("Invalid event key '{}'", event_key)))?;

    Ok((
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static(request.file_type.content_type()),
            ),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}
