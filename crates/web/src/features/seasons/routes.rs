use axum::{Router, routing::get};

use super::handlers::list_seasons;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/seasons", get(list_seasons))
}
