use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::scout::{
        DataValidationCorrection, DataValidationFilter, DataValidationUpdate, MatchSubmission2025,
        ScoutedMatchFilter,
    },
    models::{DataValidation, MatchData2025},
    services::reconciliation::{ReconciliationSummary, SeasonRegistry},
};
use validator::Validate;

use crate::AppState;
use crate::error::WebError;
use crate::middleware::auth::CurrentUser;

use super::services;

fn validate_all<T: Validate>(items: &[T]) -> Result<(), WebError> {
    if items.is_empty() {
        return Err(WebError::BadRequest("Request contains no entries".to_string()));
    }
    for item in items {
        item.validate()?;
    }
    Ok(())
}

#[utoipa::path(
    post,
    path = "/scout/submit",
    request_body = MatchSubmission2025,
    responses(
        (status = 201, description = "Submission stored with a PENDING validation record", body = MatchData2025),
        (status = 400, description = "Invalid submission"),
        (status = 401, description = "Missing API key or identity"),
        (status = 403, description = "Not the active event or membership pending"),
        (status = 409, description = "Submission already exists"),
        (status = 422, description = "Season does not accept submissions")
    ),
    security(("bearer_auth" = [])),
    tag = "scout"
)]
pub async fn submit(
    State(db): State<Database>,
    State(registry): State<SeasonRegistry>,
    current: CurrentUser,
    Json(submission): Json<MatchSubmission2025>,
) -> Result<Response, WebError> {
    submission.validate()?;
    let membership = current.scout_membership()?;

    let stored = services::submit(db.pool(), &registry, current.user.id, membership, &submission).await?;

    Ok((StatusCode::CREATED, Json(stored)).into_response())
}

#[utoipa::path(
    post,
    path = "/scout/submit/batch",
    request_body = Vec<MatchSubmission2025>,
    responses(
        (status = 201, description = "All submissions stored", body = Vec<MatchData2025>),
        (status = 400, description = "Invalid submission"),
        (status = 409, description = "A submission already exists; nothing stored")
    ),
    security(("bearer_auth" = [])),
    tag = "scout"
)]
pub async fn submit_batch(
    State(db): State<Database>,
    State(registry): State<SeasonRegistry>,
    current: CurrentUser,
    Json(submissions): Json<Vec<MatchSubmission2025>>,
) -> Result<Response, WebError> {
    validate_all(&submissions)?;
    let membership = current.scout_membership()?;

    let stored =
        services::submit_batch(db.pool(), &registry, current.user.id, membership, &submissions).await?;

    Ok((StatusCode::CREATED, Json(stored)).into_response())
}

#[utoipa::path(
    put,
    path = "/scout/edit",
    request_body = MatchSubmission2025,
    responses(
        (status = 200, description = "Submission fields replaced", body = MatchData2025),
        (status = 404, description = "Submission not found")
    ),
    security(("bearer_auth" = [])),
    tag = "scout"
)]
pub async fn edit(
    State(db): State<Database>,
    current: CurrentUser,
    Json(submission): Json<MatchSubmission2025>,
) -> Result<Response, WebError> {
    submission.validate()?;
    let membership = current.scout_membership()?;

    let updated = services::edit(db.pool(), current.user.id, membership, &submission).await?;

    Ok(Json(updated).into_response())
}

#[utoipa::path(
    put,
    path = "/scout/edit/batch",
    request_body = Vec<MatchSubmission2025>,
    responses(
        (status = 200, description = "All submissions updated", body = Vec<MatchData2025>),
        (status = 404, description = "A submission was not found; nothing updated")
    ),
    security(("bearer_auth" = [])),
    tag = "scout"
)]
pub async fn edit_batch(
    State(db): State<Database>,
    current: CurrentUser,
    Json(submissions): Json<Vec<MatchSubmission2025>>,
) -> Result<Response, WebError> {
    validate_all(&submissions)?;
    let membership = current.scout_membership()?;

    let updated =
        services::edit_batch(db.pool(), current.user.id, membership, &submissions).await?;

    Ok(Json(updated).into_response())
}

#[utoipa::path(
    get,
    path = "/scout/matches",
    params(ScoutedMatchFilter),
    responses(
        (status = 200, description = "Submissions of the organization at its active event", body = Vec<MatchData2025>)
    ),
    security(("bearer_auth" = [])),
    tag = "scout"
)]
pub async fn scouted_matches(
    State(db): State<Database>,
    current: CurrentUser,
    Query(filter): Query<ScoutedMatchFilter>,
) -> Result<Response, WebError> {
    let membership = current.membership()?;
    let matches = services::scouted_matches(db.pool(), membership, &filter).await?;

    Ok(Json(matches).into_response())
}

#[utoipa::path(
    get,
    path = "/scout/dataValidation",
    params(DataValidationFilter),
    responses(
        (status = 200, description = "Validation records at the active event", body = Vec<DataValidation>)
    ),
    security(("bearer_auth" = [])),
    tag = "scout"
)]
pub async fn list_validations(
    State(db): State<Database>,
    current: CurrentUser,
    Query(filter): Query<DataValidationFilter>,
) -> Result<Response, WebError> {
    let membership = current.membership()?;
    let records = services::validations(db.pool(), membership, &filter).await?;

    Ok(Json(records).into_response())
}

#[utoipa::path(
    patch,
    path = "/scout/dataValidation",
    request_body = Vec<DataValidationUpdate>,
    responses(
        (status = 200, description = "Validation records updated", body = Vec<DataValidation>),
        (status = 403, description = "Caller is not an admin or lead"),
        (status = 404, description = "A record was not found; nothing updated")
    ),
    security(("bearer_auth" = [])),
    tag = "scout"
)]
pub async fn review_validations(
    State(db): State<Database>,
    current: CurrentUser,
    Json(updates): Json<Vec<DataValidationUpdate>>,
) -> Result<Response, WebError> {
    validate_all(&updates)?;
    let membership = current.manager_membership()?;

    let records = services::review_validations(db.pool(), membership, &updates).await?;

    Ok(Json(records).into_response())
}

#[utoipa::path(
    put,
    path = "/scout/dataValidation",
    request_body = DataValidationCorrection,
    responses(
        (status = 200, description = "Submission corrected and marked VALID", body = DataValidation),
        (status = 403, description = "Caller is not an admin or lead"),
        (status = 404, description = "Submission not found")
    ),
    security(("bearer_auth" = [])),
    tag = "scout"
)]
pub async fn correct_submission(
    State(db): State<Database>,
    current: CurrentUser,
    Json(correction): Json<DataValidationCorrection>,
) -> Result<Response, WebError> {
    correction.validate()?;
    let membership = current.manager_membership()?;

    let record = services::correct_submission(db.pool(), membership, &correction).await?;

    Ok(Json(record).into_response())
}

#[utoipa::path(
    post,
    path = "/scout/data/tbaUpdate",
    responses(
        (status = 200, description = "Reconciliation summary", body = ReconciliationSummary),
        (status = 404, description = "No active event"),
        (status = 422, description = "Season has no reconciliation rules"),
        (status = 502, description = "The Blue Alliance request failed; nothing committed"),
        (status = 503, description = "TBA API key not configured")
    ),
    security(("bearer_auth" = [])),
    tag = "scout"
)]
pub async fn tba_update(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Response, WebError> {
    let membership = current.scout_membership()?;

    let summary = services::reconcile(&state, membership).await?;

    Ok(Json(summary).into_response())
}
