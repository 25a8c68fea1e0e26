use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use super::handlers::{
    correct_submission, edit, edit_batch, list_validations, review_validations, scouted_matches,
    submit, submit_batch, tba_update,
};
use crate::AppState;
use crate::middleware::auth::{ApiKeys, require_auth};

pub fn routes(api_keys: ApiKeys) -> Router<AppState> {
    Router::new()
        .route("/submit", post(submit))
        .route("/submit/batch", post(submit_batch))
        .route("/edit", put(edit))
        .route("/edit/batch", put(edit_batch))
        .route("/matches", get(scouted_matches))
        .route(
            "/dataValidation",
            get(list_validations)
                .patch(review_validations)
                .put(correct_submission),
        )
        .route("/data/tbaUpdate", post(tba_update))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth))
}
