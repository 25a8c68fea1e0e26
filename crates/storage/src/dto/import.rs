use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct TeamImportSummary {
    pub added: u32,
    pub updated: u32,
    pub total_processed: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct EventImportSummary {
    pub year: i32,
    pub events_processed: u32,
    pub events_skipped: u32,
    pub registrations_added: u32,
    pub registrations_removed: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ScheduleSyncSummary {
    pub event: String,
    pub matches_inserted: u32,
}
