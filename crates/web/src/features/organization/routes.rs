use axum::{
    Router, middleware,
    routing::{get, patch, post},
};

use super::handlers::{
    create_event, download_data, list_applications, list_events, sync_matches, update_events,
};
use crate::AppState;
use crate::middleware::auth::{ApiKeys, require_auth};

pub fn routes(api_keys: ApiKeys) -> Router<AppState> {
    Router::new()
        .route("/applications", get(list_applications))
        .route("/createEvent", post(create_event))
        .route("/event/:event_key/matches/sync", post(sync_matches))
        .route("/:organization_id/events", get(list_events))
        .route("/events", patch(update_events))
        .route("/downloadData", post(download_data))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth))
}
