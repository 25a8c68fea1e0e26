use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use storage::{Database, dto::user::UserProfile};
use utoipa::ToSchema;

use crate::error::WebError;
use crate::middleware::auth::CurrentUser;

use super::services;

#[derive(Debug, Serialize, ToSchema)]
pub struct PingResponse {
    pub message: String,
}

#[utoipa::path(
    get,
    path = "/ping",
    responses(
        (status = 200, description = "Service is up", body = PingResponse)
    ),
    tag = "system"
)]
pub async fn ping() -> Json<PingResponse> {
    Json(PingResponse {
        message: "pong".to_string(),
    })
}

#[utoipa::path(
    get,
    path = "/me",
    responses(
        (status = 200, description = "Profile of the calling user", body = UserProfile),
        (status = 401, description = "Missing API key or identity")
    ),
    security(("bearer_auth" = [])),
    tag = "system"
)]
pub async fn me(State(db): State<Database>, current: CurrentUser) -> Result<Response, WebError> {
    let profile = services::profile(db.pool(), current).await?;

    Ok(Json(profile).into_response())
}
