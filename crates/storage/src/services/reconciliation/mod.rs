//! Reconciles scouting submissions against official match results.
//!
//! A run walks every complete alliance of PENDING submissions for one
//! organization at one event, fetches the official breakdown of each match
//! once, and resolves each alliance to VALID or NEEDS_REVIEW. All writes are
//! collected first and applied in a single commit at the end of the run.

pub mod compare;
pub mod error;
pub mod fields;
pub mod grouping;
pub mod season;
pub mod season_2025;
pub mod store;

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};
use utoipa::ToSchema;

pub use compare::{Comparison, FieldMismatch, compare};
pub use error::{FetchError, ReconcileError};
pub use fields::{FieldMap, FieldValue};
pub use grouping::{AllianceGroup, group_pending};
pub use season::{
    AllianceRecord, BreakdownError, SeasonHandler, SeasonRegistry, SeasonSubmission, SeasonTables,
};
pub use season_2025::Season2025Handler;
pub use store::{
    MatchBreakdown, MatchResultSource, PgReconciliationStore, ReconciliationOutcome,
    ReconciliationStore,
};

use crate::models::{MatchIdentity, ValidationStatus};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct ReconciliationSummary {
    /// Matches whose official result was available and evaluated
    pub matches_processed: u32,
    pub alliance_results_upserted: u32,
    pub validations_updated: u64,
}

pub async fn reconcile_event<S, F>(
    store: &S,
    source: &F,
    registry: &SeasonRegistry,
    event_key: &str,
    organization_id: i32,
) -> Result<ReconciliationSummary, ReconcileError>
where
    S: ReconciliationStore + ?Sized,
    F: MatchResultSource + ?Sized,
{
    let event = store.find_event(event_key).await?;
    let handler = registry
        .handler(event.year)
        .ok_or(ReconcileError::UnsupportedSeason(event.year))?;

    let rosters = store.match_rosters(event_key).await?;
    let pending = store.pending_validations(event_key, organization_id).await?;
    let groups = group_pending(&rosters, &pending);

    info!(
        "Reconciling {} ({}): {} pending records, {} complete alliances",
        event_key,
        handler.name(),
        pending.len(),
        groups.len()
    );

    let mut by_match: BTreeMap<MatchIdentity, Vec<AllianceGroup>> = BTreeMap::new();
    for group in groups {
        by_match.entry(group.identity.clone()).or_default().push(group);
    }

    let mut outcome = ReconciliationOutcome::default();
    let mut summary = ReconciliationSummary::default();

    for (identity, groups) in by_match {
        let match_key = identity.tba_key();
        let result = source.fetch_match(&match_key).await?;

        let Some(breakdown) = result.score_breakdown.filter(|b| !b.is_null()) else {
            debug!("{} has no score breakdown yet, leaving it pending", match_key);
            continue;
        };
        summary.matches_processed += 1;

        for group in groups {
            let status = evaluate_group(
                store,
                handler.as_ref(),
                &group,
                &breakdown,
                &mut outcome,
            )
            .await?;

            outcome
                .status_updates
                .extend(group.records.iter().map(|record| (record.key(), status)));
        }
    }

    summary.alliance_results_upserted = outcome.alliance_records.len() as u32;
    if !outcome.is_empty() {
        summary.validations_updated = store.commit(&outcome).await?;
    }

    info!(
        "Reconciled {}: {} matches, {} alliance results, {} validations updated",
        event_key,
        summary.matches_processed,
        summary.alliance_results_upserted,
        summary.validations_updated
    );

    Ok(summary)
}

/// Decides the status of one alliance group and queues its external record
async fn evaluate_group<S>(
    store: &S,
    handler: &dyn SeasonHandler,
    group: &AllianceGroup,
    breakdown: &Value,
    outcome: &mut ReconciliationOutcome,
) -> Result<ValidationStatus, ReconcileError>
where
    S: ReconciliationStore + ?Sized,
{
    let label = format!("{} {}", group.identity, group.alliance);

    let parsed = breakdown
        .get(group.alliance.breakdown_key())
        .ok_or(BreakdownError::MissingAlliance(group.alliance.breakdown_key()))
        .and_then(|alliance| handler.parse_breakdown(alliance, &group.teams));

    let external = match parsed {
        Ok(fields) => fields,
        Err(e) => {
            warn!("Cannot parse breakdown for {}: {}", label, e);
            return Ok(ValidationStatus::NeedsReview);
        }
    };

    outcome.alliance_records.push(handler.alliance_record(
        &group.identity,
        group.alliance,
        &external,
    ));

    let mut submissions = Vec::with_capacity(group.records.len());
    for record in &group.records {
        match store.load_submission(handler.tables(), &record.key()).await? {
            Some(submission) => submissions.push(submission),
            None => {
                warn!(
                    "Validation record for team {} in {} has no submission",
                    record.team_number, label
                );
                return Ok(ValidationStatus::NeedsReview);
            }
        }
    }

    let Some(internal) = handler.combine(&group.teams, &submissions) else {
        warn!("Submissions for {} do not map onto three stations", label);
        return Ok(ValidationStatus::NeedsReview);
    };

    let comparison = compare(&external, &internal);
    if comparison.is_reconciled() {
        debug!("{} reconciled", label);
        Ok(ValidationStatus::Valid)
    } else {
        debug!("{} mismatched on {:?}", label, comparison.mismatches);
        Ok(ValidationStatus::NeedsReview)
    }
}
