use sqlx::{PgPool, Postgres, Transaction};

use crate::error::{Result, StorageError};
use crate::models::TeamRecord;

pub struct TeamRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> TeamRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find(&self, team_number: i32) -> Result<TeamRecord> {
        sqlx::query_as::<_, TeamRecord>(
            r#"
            SELECT team_number, team_name, location, rookie_year
            FROM team_records
            WHERE team_number = $1
            "#,
        )
        .bind(team_number)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    /// Teams registered for the event, by team number
    pub async fn list_for_event(&self, event_key: &str) -> Result<Vec<TeamRecord>> {
        let teams = sqlx::query_as::<_, TeamRecord>(
            r#"
            SELECT t.team_number, t.team_name, t.location, t.rookie_year
            FROM team_records t
            INNER JOIN team_events te ON te.team_number = t.team_number
            WHERE te.event_key = $1
            ORDER BY t.team_number
            "#,
        )
        .bind(event_key)
        .fetch_all(self.pool)
        .await?;

        Ok(teams)
    }

    pub async fn list_all(&self) -> Result<Vec<TeamRecord>> {
        let teams = sqlx::query_as::<_, TeamRecord>(
            "SELECT team_number, team_name, location, rookie_year FROM team_records",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(teams)
    }

    pub async fn insert(tx: &mut Transaction<'_, Postgres>, team: &TeamRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO team_records (team_number, team_name, location, rookie_year)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(team.team_number)
        .bind(&team.team_name)
        .bind(&team.location)
        .bind(team.rookie_year)
        .execute(&mut **tx)
        .await
        .map_err(|e| StorageError::from(e).into_constraint("Team"))?;

        Ok(())
    }

    pub async fn update_name(
        tx: &mut Transaction<'_, Postgres>,
        team_number: i32,
        team_name: &str,
    ) -> Result<()> {
        sqlx::query("UPDATE team_records SET team_name = $2 WHERE team_number = $1")
            .bind(team_number)
            .bind(team_name)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    /// Makes sure a team row exists so rosters and registrations can
    /// reference teams the team list import has not seen yet
    pub async fn ensure_exists(tx: &mut Transaction<'_, Postgres>, team_number: i32) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO team_records (team_number, team_name)
            VALUES ($1, 'Team ' || $1::TEXT)
            ON CONFLICT (team_number) DO NOTHING
            "#,
        )
        .bind(team_number)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }

    pub async fn registered_teams(
        tx: &mut Transaction<'_, Postgres>,
        event_key: &str,
    ) -> Result<Vec<i32>> {
        let teams = sqlx::query_scalar::<_, i32>(
            "SELECT team_number FROM team_events WHERE event_key = $1",
        )
        .bind(event_key)
        .fetch_all(&mut **tx)
        .await?;

        Ok(teams)
    }

    pub async fn register(
        tx: &mut Transaction<'_, Postgres>,
        event_key: &str,
        team_number: i32,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO team_events (event_key, team_number)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(event_key)
        .bind(team_number)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }

    pub async fn unregister(
        tx: &mut Transaction<'_, Postgres>,
        event_key: &str,
        team_number: i32,
    ) -> Result<()> {
        sqlx::query("DELETE FROM team_events WHERE event_key = $1 AND team_number = $2")
            .bind(event_key)
            .bind(team_number)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }
}
