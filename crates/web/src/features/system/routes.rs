use axum::{Router, middleware, routing::get};

use super::handlers::{me, ping};
use crate::AppState;
use crate::middleware::auth::{ApiKeys, require_auth};

pub fn routes(api_keys: ApiKeys) -> Router<AppState> {
    let protected = Router::new()
        .route("/me", get(me))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new().route("/ping", get(ping)).merge(protected)
}
