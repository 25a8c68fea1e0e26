use axum::{Router, middleware, routing::get};

use super::handlers::{get_team_info, get_team_match_data};
use crate::AppState;
use crate::middleware::auth::{ApiKeys, require_auth};

pub fn routes(api_keys: ApiKeys) -> Router<AppState> {
    let protected = Router::new()
        .route("/:team_number/matchData", get(get_team_match_data))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/:team_number/info", get(get_team_info))
        .merge(protected)
}
