use sqlx::PgPool;

use super::team::TeamRepository;
use crate::error::{Result, StorageError};
use crate::models::MatchSchedule;

pub struct ScheduleRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ScheduleRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_for_event(&self, event_key: &str) -> Result<Vec<MatchSchedule>> {
        let matches = sqlx::query_as::<_, MatchSchedule>(
            r#"
            SELECT event_key, match_level, match_number,
                   red1, red2, red3, blue1, blue2, blue3
            FROM match_schedule
            WHERE event_key = $1
            ORDER BY match_level, match_number
            "#,
        )
        .bind(event_key)
        .fetch_all(self.pool)
        .await?;

        Ok(matches)
    }

    pub async fn find_match(
        &self,
        event_key: &str,
        match_level: &str,
        match_number: i32,
    ) -> Result<MatchSchedule> {
        sqlx::query_as::<_, MatchSchedule>(
            r#"
            SELECT event_key, match_level, match_number,
                   red1, red2, red3, blue1, blue2, blue3
            FROM match_schedule
            WHERE event_key = $1 AND match_level = $2 AND match_number = $3
            "#,
        )
        .bind(event_key)
        .bind(match_level)
        .bind(match_number)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    /// Replaces the whole schedule of an event in one transaction.
    ///
    /// Every roster is checked before anything is deleted, so a bad roster
    /// leaves the stored schedule untouched.
    pub async fn replace_for_event(&self, event_key: &str, matches: &[MatchSchedule]) -> Result<u64> {
        if let Some(bad) = matches
            .iter()
            .find(|m| m.event_key != event_key || !m.is_disjoint())
        {
            return Err(StorageError::InvalidData(format!(
                "Invalid roster for {}",
                bad.identity()
            )));
        }

        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM match_schedule WHERE event_key = $1")
            .bind(event_key)
            .execute(&mut *tx)
            .await?;

        let mut inserted = 0;
        for schedule in matches {
            for alliance in crate::models::Alliance::ALL {
                for team in schedule.alliance_teams(alliance) {
                    TeamRepository::ensure_exists(&mut tx, team).await?;
                }
            }

            inserted += sqlx::query(
                r#"
                INSERT INTO match_schedule (
                    event_key, match_level, match_number,
                    red1, red2, red3, blue1, blue2, blue3
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                "#,
            )
            .bind(&schedule.event_key)
            .bind(&schedule.match_level)
            .bind(schedule.match_number)
            .bind(schedule.red1)
            .bind(schedule.red2)
            .bind(schedule.red3)
            .bind(schedule.blue1)
            .bind(schedule.blue2)
            .bind(schedule.blue3)
            .execute(&mut *tx)
            .await
            .map_err(|e| StorageError::from(e).into_constraint("Match"))?
            .rows_affected();
        }

        tx.commit().await?;
        Ok(inserted)
    }
}
