use axum::{Router, routing::get};

use super::handlers::{
    get_match, get_match_results, list_events, list_matches, list_public_organizations,
    list_teams,
};
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/events/:year", get(list_events))
        .route("/event/:event_key/matches", get(list_matches))
        .route("/event/:event_key/match/:level/:number", get(get_match))
        .route(
            "/event/:event_key/match/:level/:number/results",
            get(get_match_results),
        )
        .route("/event/:event_key/teams", get(list_teams))
        .route("/event/:event_key/organizations", get(list_public_organizations))
}
