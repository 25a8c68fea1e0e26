use importer::{ImporterError, TbaClient};
use sqlx::PgPool;
use storage::{
    dto::scout::{
        DataValidationCorrection, DataValidationFilter, DataValidationUpdate, MatchSubmission2025,
        ScoutedMatchFilter,
    },
    models::{DataValidation, MatchData2025, UserOrganization},
    repository::{
        event::EventRepository, match_data::MatchDataRepository, season::SeasonRepository,
        validation::ValidationRepository,
    },
    services::reconciliation::{
        PgReconciliationStore, ReconcileError, ReconciliationSummary, SeasonRegistry,
        SeasonTables, reconcile_event,
    },
};
use tracing::info;
use uuid::Uuid;

use crate::AppState;
use crate::error::{WebError, WebResult};
use crate::features::active_event;

/// Rejects submissions outside the active event or for a season without
/// 2025-shaped tables, and returns the season id they are stored under
async fn submission_season(
    pool: &PgPool,
    registry: &SeasonRegistry,
    membership: &UserOrganization,
    submissions: &[MatchSubmission2025],
) -> WebResult<i32> {
    let event_key = active_event(pool, membership).await?;
    ensure_active_event(&event_key, submissions)?;

    let event = EventRepository::new(pool).find_by_key(&event_key).await?;
    ensure_reefscape_season(registry, event.year)?;

    let season = SeasonRepository::new(pool).find_by_year(event.year).await?;
    Ok(season.id)
}

pub fn ensure_reefscape_season(registry: &SeasonRegistry, year: i32) -> WebResult<()> {
    match registry.handler(year).map(|handler| handler.tables()) {
        Some(SeasonTables::Reefscape2025) => Ok(()),
        None => Err(WebError::Unprocessable(format!(
            "Scouting data for the {} season is not accepted",
            year
        ))),
    }
}

pub fn ensure_active_event(event_key: &str, submissions: &[MatchSubmission2025]) -> WebResult<()> {
    match submissions.iter().find(|s| s.event_key != event_key) {
        Some(other) => Err(WebError::Forbidden(format!(
            "Submissions are only accepted for the active event {}, not {}",
            event_key, other.event_key
        ))),
        None => Ok(()),
    }
}

pub async fn submit(
    pool: &PgPool,
    registry: &SeasonRegistry,
    user_id: Uuid,
    membership: &UserOrganization,
    submission: &MatchSubmission2025,
) -> WebResult<MatchData2025> {
    let season_id = submission_season(pool, registry, membership, std::slice::from_ref(submission)).await?;

    Ok(MatchDataRepository::new(pool)
        .submit_2025(user_id, membership.organization_id, season_id, submission)
        .await?)
}

pub async fn submit_batch(
    pool: &PgPool,
    registry: &SeasonRegistry,
    user_id: Uuid,
    membership: &UserOrganization,
    submissions: &[MatchSubmission2025],
) -> WebResult<Vec<MatchData2025>> {
    let season_id = submission_season(pool, registry, membership, submissions).await?;

    let stored = MatchDataRepository::new(pool)
        .submit_batch_2025(user_id, membership.organization_id, season_id, submissions)
        .await?;
    info!("Stored {} submissions from {}", stored.len(), user_id);
    Ok(stored)
}

pub async fn edit(
    pool: &PgPool,
    user_id: Uuid,
    membership: &UserOrganization,
    submission: &MatchSubmission2025,
) -> WebResult<MatchData2025> {
    let event_key = active_event(pool, membership).await?;
    ensure_active_event(&event_key, std::slice::from_ref(submission))?;

    Ok(MatchDataRepository::new(pool)
        .update_2025(user_id, membership.organization_id, submission)
        .await?)
}

pub async fn edit_batch(
    pool: &PgPool,
    user_id: Uuid,
    membership: &UserOrganization,
    submissions: &[MatchSubmission2025],
) -> WebResult<Vec<MatchData2025>> {
    let event_key = active_event(pool, membership).await?;
    ensure_active_event(&event_key, submissions)?;

    Ok(MatchDataRepository::new(pool)
        .update_batch_2025(user_id, membership.organization_id, submissions)
        .await?)
}

pub async fn scouted_matches(
    pool: &PgPool,
    membership: &UserOrganization,
    filter: &ScoutedMatchFilter,
) -> WebResult<Vec<MatchData2025>> {
    let event_key = active_event(pool, membership).await?;

    Ok(MatchDataRepository::new(pool)
        .list_2025(&event_key, membership.organization_id, filter)
        .await?)
}

pub async fn validations(
    pool: &PgPool,
    membership: &UserOrganization,
    filter: &DataValidationFilter,
) -> WebResult<Vec<DataValidation>> {
    let event_key = active_event(pool, membership).await?;

    Ok(ValidationRepository::new(pool)
        .list(&event_key, membership.organization_id, filter)
        .await?)
}

pub async fn review_validations(
    pool: &PgPool,
    membership: &UserOrganization,
    updates: &[DataValidationUpdate],
) -> WebResult<Vec<DataValidation>> {
    Ok(ValidationRepository::new(pool)
        .update_batch(membership.organization_id, updates)
        .await?)
}

pub async fn correct_submission(
    pool: &PgPool,
    membership: &UserOrganization,
    correction: &DataValidationCorrection,
) -> WebResult<DataValidation> {
    Ok(ValidationRepository::new(pool)
        .apply_correction_2025(membership.organization_id, correction)
        .await?)
}

/// Reconciles the organization's pending records at its active event
/// against TBA
pub async fn reconcile(
    state: &AppState,
    membership: &UserOrganization,
) -> WebResult<ReconciliationSummary> {
    let pool = state.db.pool();
    let event_key = active_event(pool, membership).await?;

    let client = TbaClient::new(&state.tba).map_err(|e| match e {
        ImporterError::ConfigurationError(msg) => WebError::from(ReconcileError::Configuration(msg)),
        other => WebError::from(other),
    })?;
    let store = PgReconciliationStore::new(pool);

    let summary = reconcile_event(
        &store,
        &client,
        &state.registry,
        &event_key,
        membership.organization_id,
    )
    .await?;

    info!(
        "Reconciliation of {} for organization {}: {} matches, {} validations updated",
        event_key, membership.organization_id, summary.matches_processed, summary.validations_updated
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::models::Endgame2025;

    fn submission(event_key: &str) -> MatchSubmission2025 {
        MatchSubmission2025 {
            event_key: event_key.to_string(),
            match_level: "qm".to_string(),
            match_number: 1,
            team_number: 254,
            notes: String::new(),
            al4c: 0,
            al3c: 0,
            al2c: 0,
            al1c: 0,
            tl4c: 0,
            tl3c: 0,
            tl2c: 0,
            tl1c: 0,
            a_net: 0,
            t_net: 0,
            a_processor: 0,
            t_processor: 0,
            endgame: Endgame2025::None,
        }
    }

    #[test]
    fn test_submissions_for_active_event_pass() {
        let submissions = vec![submission("2025test"), submission("2025test")];
        assert!(ensure_active_event("2025test", &submissions).is_ok());
    }

    #[test]
    fn test_only_registered_seasons_accept_submissions() {
        let registry = SeasonRegistry::default();
        assert!(ensure_reefscape_season(&registry, 2025).is_ok());
        assert!(matches!(
            ensure_reefscape_season(&registry, 2026),
            Err(WebError::Unprocessable(_))
        ));
        assert!(matches!(
            ensure_reefscape_season(&SeasonRegistry::empty(), 2025),
            Err(WebError::Unprocessable(_))
        ));
    }

    #[test]
    fn test_submission_for_other_event_is_forbidden() {
        let submissions = vec![submission("2025test"), submission("2025other")];
        assert!(matches!(
            ensure_active_event("2025test", &submissions),
            Err(WebError::Forbidden(_))
        ));
    }
}
