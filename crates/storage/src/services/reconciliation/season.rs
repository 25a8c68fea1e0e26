use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

use super::fields::FieldMap;
use super::season_2025::Season2025Handler;
use crate::models::{Alliance, MatchData2025, MatchIdentity, TbaMatchData2025};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BreakdownError {
    #[error("alliance '{0}' is missing from the score breakdown")]
    MissingAlliance(&'static str),

    #[error("alliance breakdown is not a JSON object")]
    Malformed,
}

/// A scouting submission loaded from its season-specific table
#[derive(Debug, Clone)]
pub enum SeasonSubmission {
    Reefscape(MatchData2025),
}

impl SeasonSubmission {
    pub fn as_reefscape(&self) -> Option<&MatchData2025> {
        match self {
            Self::Reefscape(data) => Some(data),
        }
    }
}

/// Parsed external result, ready to be written to its season-specific table
#[derive(Debug, Clone, PartialEq)]
pub enum AllianceRecord {
    Reefscape(TbaMatchData2025),
}

/// Season-specific tables holding submissions and external results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeasonTables {
    /// `match_data_2025` and `tba_match_data_2025`
    Reefscape2025,
}

/// Season-specific reconciliation rules.
///
/// A handler owns the field vocabulary of its season: how the external
/// breakdown maps onto it, and how three teammates' submissions combine into
/// the same vocabulary.
pub trait SeasonHandler: Send + Sync {
    fn year(&self) -> i32;

    fn name(&self) -> &'static str;

    /// Where this season's submissions and alliance results are stored
    fn tables(&self) -> SeasonTables;

    /// Flattens one alliance of the external breakdown. `teams` is the
    /// alliance in station order; per-robot fields are read positionally.
    fn parse_breakdown(&self, alliance: &Value, teams: &[i32]) -> Result<FieldMap, BreakdownError>;

    /// Combines one submission per station. Returns `None` when the
    /// submissions do not map onto three distinct stations.
    fn combine(&self, teams: &[i32; 3], submissions: &[SeasonSubmission]) -> Option<FieldMap>;

    fn alliance_record(
        &self,
        identity: &MatchIdentity,
        alliance: Alliance,
        fields: &FieldMap,
    ) -> AllianceRecord;
}

/// Season year -> handler lookup
#[derive(Clone)]
pub struct SeasonRegistry {
    handlers: HashMap<i32, Arc<dyn SeasonHandler>>,
}

impl SeasonRegistry {
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(Arc::new(Season2025Handler));
        registry
    }

    pub fn register(&mut self, handler: Arc<dyn SeasonHandler>) {
        self.handlers.insert(handler.year(), handler);
    }

    pub fn handler(&self, year: i32) -> Option<Arc<dyn SeasonHandler>> {
        self.handlers.get(&year).cloned()
    }

    pub fn supported_years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.handlers.keys().copied().collect();
        years.sort_unstable();
        years
    }
}

impl Default for SeasonRegistry {
    fn default() -> Self {
        Self::new()
    }
}
