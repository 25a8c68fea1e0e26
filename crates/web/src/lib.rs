pub mod config;
pub mod error;
pub mod features;
pub mod middleware;
pub mod openapi;

use axum::{Router, extract::FromRef};
use importer::TbaSettings;
use storage::{Database, services::reconciliation::SeasonRegistry};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use middleware::auth::ApiKeys;
use openapi::ApiDoc;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub api_keys: ApiKeys,
    pub tba: TbaSettings,
    pub registry: SeasonRegistry,
}

impl FromRef<AppState> for Database {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}

impl FromRef<AppState> for SeasonRegistry {
    fn from_ref(state: &AppState) -> Self {
        state.registry.clone()
    }
}

impl FromRef<AppState> for ApiKeys {
    fn from_ref(state: &AppState) -> Self {
        state.api_keys.clone()
    }
}

pub fn build_router(state: AppState) -> Router {
    let api_keys = state.api_keys.clone();

    Router::new()
        .merge(features::system::routes::routes(api_keys.clone()))
        .merge(features::seasons::routes::routes())
        .merge(features::events::routes::routes())
        .nest("/teams", features::teams::routes::routes(api_keys.clone()))
        .nest("/scout", features::scout::routes::routes(api_keys.clone()))
        .nest(
            "/organization",
            features::organization::routes::routes(api_keys.clone()),
        )
        .nest("/admin", features::admin::routes::routes(api_keys))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
