use futures::stream::{self, StreamExt};
use sqlx::PgPool;
use std::collections::{HashMap, HashSet};
use storage::dto::import::{EventImportSummary, ScheduleSyncSummary, TeamImportSummary};
use storage::repository::event::EventRepository;
use storage::repository::schedule::ScheduleRepository;
use storage::repository::team::TeamRepository;
use tracing::{info, warn};

use crate::error::Result;
use crate::sources::tba::{TbaClient, TbaEvent};

/// Concurrent event team-list requests during an event import
const EVENT_TEAM_FETCHES: usize = 10;
const STORED_MATCH_LEVELS: [&str; 3] = ["qm", "sf", "f"];

/// Copies TBA metadata (teams, events, registrations, schedules) into the
/// database
pub struct TbaSync<'a> {
    pool: &'a PgPool,
    client: &'a TbaClient,
}

impl<'a> TbaSync<'a> {
    pub fn new(pool: &'a PgPool, client: &'a TbaClient) -> Self {
        Self { pool, client }
    }

    /// Imports the full team list. New teams are inserted; existing teams
    /// only have their name refreshed.
    pub async fn update_teams(&self) -> Result<TeamImportSummary> {
        let mut fetched = Vec::new();
        let mut page = 0;
        loop {
            let teams = self.client.fetch_team_page(page).await?;
            if teams.is_empty() {
                break;
            }
            info!("Fetched team page {} ({} teams)", page, teams.len());
            fetched.extend(teams);
            page += 1;
        }

        let existing: HashMap<i32, String> = TeamRepository::new(self.pool)
            .list_all()
            .await?
            .into_iter()
            .map(|team| (team.team_number, team.team_name))
            .collect();

        let mut summary = TeamImportSummary {
            total_processed: fetched.len() as u32,
            ..Default::default()
        };

        let mut tx = self.pool.begin().await?;
        for team in &fetched {
            let record = team.to_record();
            match existing.get(&record.team_number) {
                Some(name) if *name == record.team_name => {}
                Some(_) => {
                    TeamRepository::update_name(&mut tx, record.team_number, &record.team_name)
                        .await?;
                    summary.updated += 1;
                }
                None => {
                    TeamRepository::insert(&mut tx, &record).await?;
                    summary.added += 1;
                }
            }
        }
        tx.commit().await?;

        info!(
            "Team import complete: {} added, {} updated, {} processed",
            summary.added, summary.updated, summary.total_processed
        );
        Ok(summary)
    }

    /// Imports a season's events and reconciles each event's registered
    /// teams with TBA's list.
    pub async fn import_events(&self, year: i32) -> Result<EventImportSummary> {
        let events = self.client.fetch_events(year).await?;
        let (skipped, events): (Vec<TbaEvent>, Vec<TbaEvent>) =
            events.into_iter().partition(TbaEvent::is_skipped);

        info!(
            "Importing {} events for {} ({} offseason events skipped)",
            events.len(),
            year,
            skipped.len()
        );

        let fetches: Vec<_> = events
            .iter()
            .map(|event| async move {
                let teams = self
                    .client
                    .fetch_event_teams(&event.key)
                    .await
                    .map(|teams| teams.into_iter().map(|team| team.team_number).collect());
                (event.key.clone(), teams)
            })
            .collect();
        let rosters: Vec<(String, Result<Vec<i32>>)> = stream::iter(fetches)
            .buffer_unordered(EVENT_TEAM_FETCHES)
            .collect()
            .await;

        let mut summary = EventImportSummary {
            year,
            events_processed: events.len() as u32,
            events_skipped: skipped.len() as u32,
            ..Default::default()
        };

        let mut tx = self.pool.begin().await?;
        for event in &events {
            EventRepository::upsert(&mut tx, &event.to_event()).await?;
        }

        for (event_key, teams) in rosters {
            let current: HashSet<i32> = teams?.into_iter().collect();
            let registered: HashSet<i32> = TeamRepository::registered_teams(&mut tx, &event_key)
                .await?
                .into_iter()
                .collect();

            for team_number in current.difference(&registered) {
                TeamRepository::ensure_exists(&mut tx, *team_number).await?;
                TeamRepository::register(&mut tx, &event_key, *team_number).await?;
                summary.registrations_added += 1;
            }

            for team_number in registered.difference(&current) {
                TeamRepository::unregister(&mut tx, &event_key, *team_number).await?;
                summary.registrations_removed += 1;
            }
        }
        tx.commit().await?;

        info!(
            "Event import for {} complete: {} events, {} registrations added, {} removed",
            year, summary.events_processed, summary.registrations_added, summary.registrations_removed
        );
        Ok(summary)
    }

    /// Replaces the stored schedule of an event with TBA's current one
    pub async fn sync_schedule(&self, event_key: &str) -> Result<ScheduleSyncSummary> {
        EventRepository::new(self.pool).find_by_key(event_key).await?;

        let matches = self.client.fetch_event_matches(event_key).await?;
        let mut schedule = Vec::with_capacity(matches.len());
        for tba_match in &matches {
            if !STORED_MATCH_LEVELS.contains(&tba_match.comp_level.as_str()) {
                warn!("Skipping {}: unsupported level '{}'", tba_match.key, tba_match.comp_level);
                continue;
            }
            schedule.push(tba_match.to_schedule(event_key)?);
        }

        let inserted = ScheduleRepository::new(self.pool)
            .replace_for_event(event_key, &schedule)
            .await?;

        info!("Synced schedule for {}: {} matches", event_key, inserted);
        Ok(ScheduleSyncSummary {
            event: event_key.to_string(),
            matches_inserted: inserted as u32,
        })
    }
}
