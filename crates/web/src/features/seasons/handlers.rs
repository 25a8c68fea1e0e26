use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use storage::{Database, models::Season};

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/seasons",
    responses(
        (status = 200, description = "All seasons ordered by year", body = Vec<Season>)
    ),
    tag = "seasons"
)]
pub async fn list_seasons(State(db): State<Database>) -> Result<Response, WebError> {
    let seasons = services::list_seasons(db.pool()).await?;

    Ok(Json(seasons).into_response())
}
