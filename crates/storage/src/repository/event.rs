use sqlx::{PgPool, Postgres, Transaction};

use crate::error::{Result, StorageError};
use crate::models::{FrcEvent, Organization};

pub struct EventRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> EventRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_key(&self, event_key: &str) -> Result<FrcEvent> {
        sqlx::query_as::<_, FrcEvent>(
            r#"
            SELECT event_key, event_name, short_name, year, week
            FROM frc_events
            WHERE event_key = $1
            "#,
        )
        .bind(event_key)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    pub async fn list_by_year(&self, year: i32) -> Result<Vec<FrcEvent>> {
        let events = sqlx::query_as::<_, FrcEvent>(
            r#"
            SELECT event_key, event_name, short_name, year, week
            FROM frc_events
            WHERE year = $1
            ORDER BY week, event_key
            "#,
        )
        .bind(year)
        .fetch_all(self.pool)
        .await?;

        Ok(events)
    }

    /// Organizations that share their scouting data for the event
    pub async fn public_organizations(&self, event_key: &str) -> Result<Vec<Organization>> {
        let organizations = sqlx::query_as::<_, Organization>(
            r#"
            SELECT DISTINCT o.id, o.name, o.team_number
            FROM organizations o
            INNER JOIN organization_events oe ON oe.organization_id = o.id
            WHERE oe.event_key = $1 AND oe.public_data
            ORDER BY o.id
            "#,
        )
        .bind(event_key)
        .fetch_all(self.pool)
        .await?;

        Ok(organizations)
    }

    /// Inserts the event or refreshes its name, short name, year and week
    pub async fn upsert(tx: &mut Transaction<'_, Postgres>, event: &FrcEvent) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO frc_events (event_key, event_name, short_name, year, week)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (event_key) DO UPDATE
            SET event_name = EXCLUDED.event_name,
                short_name = EXCLUDED.short_name,
                year = EXCLUDED.year,
                week = EXCLUDED.week
            "#,
        )
        .bind(&event.event_key)
        .bind(&event.event_name)
        .bind(&event.short_name)
        .bind(event.year)
        .bind(event.week)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }
}
