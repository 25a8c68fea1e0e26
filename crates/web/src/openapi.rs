use utoipa::OpenApi;

use crate::features::{admin, events, organization, scout, seasons, system, teams};

#[derive(OpenApi)]
#[openapi(
    paths(
        system::handlers::ping,
        system::handlers::me,
        seasons::handlers::list_seasons,
        events::handlers::list_events,
        events::handlers::list_matches,
        events::handlers::get_match,
        events::handlers::get_match_results,
        events::handlers::list_teams,
        events::handlers::list_public_organizations,
        teams::handlers::get_team_info,
        teams::handlers::get_team_match_data,
        scout::handlers::submit,
        scout::handlers::submit_batch,
        scout::handlers::edit,
        scout::handlers::edit_batch,
        scout::handlers::scouted_matches,
        scout::handlers::list_validations,
        scout::handlers::review_validations,
        scout::handlers::correct_submission,
        scout::handlers::tba_update,
        organization::handlers::list_applications,
        organization::handlers::create_event,
        organization::handlers::sync_matches,
        organization::handlers::list_events,
        organization::handlers::update_events,
        organization::handlers::download_data,
        admin::handlers::create_organization,
        admin::handlers::update_teams,
        admin::handlers::import_events,
    ),
    components(
        schemas(
            system::handlers::PingResponse,
            storage::dto::user::UserProfile,
            storage::dto::scout::MatchSubmission2025,
            storage::dto::scout::DataValidationCorrection,
            storage::dto::scout::DataValidationUpdate,
            storage::dto::organization::CreateOrganizationRequest,
            storage::dto::organization::CreateOrganizationEventRequest,
            storage::dto::organization::OrganizationEventDetail,
            storage::dto::organization::UpdateOrganizationEventRequest,
            storage::dto::organization::OrganizationApplication,
            storage::dto::export::MatchExportType,
            storage::dto::export::MatchExportRequest,
            storage::dto::import::TeamImportSummary,
            storage::dto::import::EventImportSummary,
            storage::dto::import::ScheduleSyncSummary,
            storage::services::reconciliation::ReconciliationSummary,
            storage::models::Season,
            storage::models::FrcEvent,
            storage::models::TeamRecord,
            storage::models::MatchSchedule,
            storage::models::Organization,
            storage::models::OrganizationEvent,
            storage::models::User,
            storage::models::UserOrganization,
            storage::models::UserRole,
            storage::models::MatchData2025,
            storage::models::Endgame2025,
            storage::models::DataValidation,
            storage::models::ValidationStatus,
            storage::models::TbaMatchData2025,
            storage::models::Alliance,
        )
    ),
    tags(
        (name = "system", description = "Health check and caller profile"),
        (name = "seasons", description = "Public season endpoints"),
        (name = "events", description = "Public event, schedule and result endpoints"),
        (name = "teams", description = "Team endpoints"),
        (name = "scout", description = "Scouting submissions, validation and reconciliation"),
        (name = "organization", description = "Organization management"),
        (name = "admin", description = "API-key protected administration"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("API Key")
                        .build(),
                ),
            )
        }
    }
}
