use axum::{Router, middleware, routing::post};

use super::handlers::{create_organization, import_events, update_teams};
use crate::AppState;
use crate::middleware::auth::{ApiKeys, require_auth};

pub fn routes(api_keys: ApiKeys) -> Router<AppState> {
    Router::new()
        .route("/organizations/create", post(create_organization))
        .route("/teams/update", post(update_teams))
        .route("/events/registration/:year", post(import_events))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth))
}
