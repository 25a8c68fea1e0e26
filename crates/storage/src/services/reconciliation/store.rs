use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;

use super::error::FetchError;
use super::season::{AllianceRecord, SeasonSubmission, SeasonTables};
use crate::error::Result;
use crate::models::{DataValidation, FrcEvent, MatchSchedule, SubmissionKey, ValidationStatus};
use crate::repository::event::EventRepository;
use crate::repository::match_data::MatchDataRepository;
use crate::repository::schedule::ScheduleRepository;
use crate::repository::tba_match_data::TbaMatchDataRepository;
use crate::repository::validation::ValidationRepository;

/// One match as returned by the results provider
#[derive(Debug, Clone, PartialEq)]
pub struct MatchBreakdown {
    pub key: String,
    /// `None` until the match has been played and scored
    pub score_breakdown: Option<Value>,
}

/// Authoritative match results, looked up by match key
#[async_trait]
pub trait MatchResultSource: Send + Sync {
    async fn fetch_match(&self, match_key: &str) -> std::result::Result<MatchBreakdown, FetchError>;
}

/// Everything a reconciliation run has decided, applied in one commit
#[derive(Debug, Clone, Default)]
pub struct ReconciliationOutcome {
    pub alliance_records: Vec<AllianceRecord>,
    pub status_updates: Vec<(SubmissionKey, ValidationStatus)>,
}

impl ReconciliationOutcome {
    pub fn is_empty(&self) -> bool {
        self.alliance_records.is_empty() && self.status_updates.is_empty()
    }
}

/// Data access needed by the reconciliation engine
#[async_trait]
pub trait ReconciliationStore: Send + Sync {
    async fn find_event(&self, event_key: &str) -> Result<FrcEvent>;

    async fn match_rosters(&self, event_key: &str) -> Result<Vec<MatchSchedule>>;

    async fn pending_validations(
        &self,
        event_key: &str,
        organization_id: i32,
    ) -> Result<Vec<DataValidation>>;

    async fn load_submission(
        &self,
        tables: SeasonTables,
        key: &SubmissionKey,
    ) -> Result<Option<SeasonSubmission>>;

    /// Applies the outcome atomically and returns how many validation
    /// records changed state. Only records still PENDING are updated.
    async fn commit(&self, outcome: &ReconciliationOutcome) -> Result<u64>;
}

pub struct PgReconciliationStore<'a> {
    pool: &'a PgPool,
}

impl<'a> PgReconciliationStore<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReconciliationStore for PgReconciliationStore<'_> {
    async fn find_event(&self, event_key: &str) -> Result<FrcEvent> {
        EventRepository::new(self.pool).find_by_key(event_key).await
    }

    async fn match_rosters(&self, event_key: &str) -> Result<Vec<MatchSchedule>> {
        ScheduleRepository::new(self.pool).list_for_event(event_key).await
    }

    async fn pending_validations(
        &self,
        event_key: &str,
        organization_id: i32,
    ) -> Result<Vec<DataValidation>> {
        ValidationRepository::new(self.pool)
            .list_pending(event_key, organization_id)
            .await
    }

    async fn load_submission(
        &self,
        tables: SeasonTables,
        key: &SubmissionKey,
    ) -> Result<Option<SeasonSubmission>> {
        let repo = MatchDataRepository::new(self.pool);
        match tables {
            SeasonTables::Reefscape2025 => {
                Ok(repo.find_2025(key).await?.map(SeasonSubmission::Reefscape))
            }
        }
    }

    async fn commit(&self, outcome: &ReconciliationOutcome) -> Result<u64> {
        let mut tx = self.pool.begin().await?;

        for record in &outcome.alliance_records {
            match record {
                AllianceRecord::Reefscape(row) => {
                    TbaMatchDataRepository::upsert_2025(&mut tx, row).await?;
                }
            }
        }

        let mut updated = 0u64;
        for (key, status) in &outcome.status_updates {
            updated += ValidationRepository::resolve_pending(&mut tx, key, *status).await?;
        }

        tx.commit().await?;
        Ok(updated)
    }
}
