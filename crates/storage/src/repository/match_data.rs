use sqlx::{PgPool, Postgres, QueryBuilder, Transaction};
use uuid::Uuid;

use crate::dto::scout::{MatchSubmission2025, ScoutedMatchFilter};
use crate::error::{Result, StorageError};
use crate::models::{MatchData2025, SubmissionKey};

const MATCH_DATA_2025_COLUMNS: &str = r#"
    event_key, match_level, match_number, team_number, user_id, organization_id,
    season, timestamp, notes,
    al4c, al3c, al2c, al1c, tl4c, tl3c, tl2c, tl1c,
    a_net, t_net, a_processor, t_processor, endgame
"#;

pub struct MatchDataRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> MatchDataRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Stores one submission and opens its PENDING validation record
    pub async fn submit_2025(
        &self,
        user_id: Uuid,
        organization_id: i32,
        season_id: i32,
        submission: &MatchSubmission2025,
    ) -> Result<MatchData2025> {
        let mut tx = self.pool.begin().await?;
        let stored =
            Self::insert_2025(&mut tx, user_id, organization_id, season_id, submission).await?;
        tx.commit().await?;

        Ok(stored)
    }

    /// Stores all submissions or none of them
    pub async fn submit_batch_2025(
        &self,
        user_id: Uuid,
        organization_id: i32,
        season_id: i32,
        submissions: &[MatchSubmission2025],
    ) -> Result<Vec<MatchData2025>> {
        let mut tx = self.pool.begin().await?;
        let mut stored = Vec::with_capacity(submissions.len());
        for submission in submissions {
            stored.push(
                Self::insert_2025(&mut tx, user_id, organization_id, season_id, submission).await?,
            );
        }
        tx.commit().await?;

        Ok(stored)
    }

    async fn insert_2025(
        tx: &mut Transaction<'_, Postgres>,
        user_id: Uuid,
        organization_id: i32,
        season_id: i32,
        submission: &MatchSubmission2025,
    ) -> Result<MatchData2025> {
        let query = format!(
            r#"
            INSERT INTO match_data_2025 (
                event_key, match_level, match_number, team_number, user_id, organization_id,
                season, notes,
                al4c, al3c, al2c, al1c, tl4c, tl3c, tl2c, tl1c,
                a_net, t_net, a_processor, t_processor, endgame
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16,
                    $17, $18, $19, $20, $21)
            RETURNING {MATCH_DATA_2025_COLUMNS}
            "#
        );

        let stored = sqlx::query_as::<_, MatchData2025>(&query)
            .bind(&submission.event_key)
            .bind(&submission.match_level)
            .bind(submission.match_number)
            .bind(submission.team_number)
            .bind(user_id)
            .bind(organization_id)
            .bind(season_id)
            .bind(&submission.notes)
            .bind(submission.al4c)
            .bind(submission.al3c)
            .bind(submission.al2c)
            .bind(submission.al1c)
            .bind(submission.tl4c)
            .bind(submission.tl3c)
            .bind(submission.tl2c)
            .bind(submission.tl1c)
            .bind(submission.a_net)
            .bind(submission.t_net)
            .bind(submission.a_processor)
            .bind(submission.t_processor)
            .bind(submission.endgame)
            .fetch_one(&mut **tx)
            .await
            .map_err(|e| StorageError::from(e).into_constraint("Match submission"))?;

        sqlx::query(
            r#"
            INSERT INTO data_validation (
                event_key, match_level, match_number, team_number, user_id,
                organization_id, timestamp, validation_status, notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, 'PENDING', '')
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(&stored.event_key)
        .bind(&stored.match_level)
        .bind(stored.match_number)
        .bind(stored.team_number)
        .bind(stored.user_id)
        .bind(stored.organization_id)
        .bind(stored.timestamp)
        .execute(&mut **tx)
        .await?;

        Ok(stored)
    }

    /// Replaces the scored fields and notes of the caller's own submission.
    /// The submission timestamp is never changed.
    pub async fn update_2025(
        &self,
        user_id: Uuid,
        organization_id: i32,
        submission: &MatchSubmission2025,
    ) -> Result<MatchData2025> {
        let mut tx = self.pool.begin().await?;
        let stored = Self::update_fields_2025(
            &mut tx,
            &submission.key(user_id, organization_id),
            submission,
            Some(submission.notes.as_str()),
        )
        .await?;
        tx.commit().await?;

        Ok(stored)
    }

    pub async fn update_batch_2025(
        &self,
        user_id: Uuid,
        organization_id: i32,
        submissions: &[MatchSubmission2025],
    ) -> Result<Vec<MatchData2025>> {
        let mut tx = self.pool.begin().await?;
        let mut stored = Vec::with_capacity(submissions.len());
        for submission in submissions {
            stored.push(
                Self::update_fields_2025(
                    &mut tx,
                    &submission.key(user_id, organization_id),
                    submission,
                    Some(submission.notes.as_str()),
                )
                .await?,
            );
        }
        tx.commit().await?;

        Ok(stored)
    }

    /// Overwrites the scored fields of the submission identified by `key`.
    /// `notes` of `None` keeps the stored notes.
    pub(crate) async fn update_fields_2025(
        tx: &mut Transaction<'_, Postgres>,
        key: &SubmissionKey,
        fields: &MatchSubmission2025,
        notes: Option<&str>,
    ) -> Result<MatchData2025> {
        let query = format!(
            r#"
            UPDATE match_data_2025
            SET al4c = $7, al3c = $8, al2c = $9, al1c = $10,
                tl4c = $11, tl3c = $12, tl2c = $13, tl1c = $14,
                a_net = $15, t_net = $16, a_processor = $17, t_processor = $18,
                endgame = $19,
                notes = COALESCE($20, notes)
            WHERE event_key = $1 AND match_level = $2 AND match_number = $3
              AND team_number = $4 AND user_id = $5 AND organization_id = $6
            RETURNING {MATCH_DATA_2025_COLUMNS}
            "#
        );

        sqlx::query_as::<_, MatchData2025>(&query)
            .bind(&key.event_key)
            .bind(&key.match_level)
            .bind(key.match_number)
            .bind(key.team_number)
            .bind(key.user_id)
            .bind(key.organization_id)
            .bind(fields.al4c)
            .bind(fields.al3c)
            .bind(fields.al2c)
            .bind(fields.al1c)
            .bind(fields.tl4c)
            .bind(fields.tl3c)
            .bind(fields.tl2c)
            .bind(fields.tl1c)
            .bind(fields.a_net)
            .bind(fields.t_net)
            .bind(fields.a_processor)
            .bind(fields.t_processor)
            .bind(fields.endgame)
            .bind(notes)
            .fetch_optional(&mut **tx)
            .await?
            .ok_or(StorageError::NotFound)
    }

    pub async fn find_2025(&self, key: &SubmissionKey) -> Result<Option<MatchData2025>> {
        let query = format!(
            r#"
            SELECT {MATCH_DATA_2025_COLUMNS}
            FROM match_data_2025
            WHERE event_key = $1 AND match_level = $2 AND match_number = $3
              AND team_number = $4 AND user_id = $5 AND organization_id = $6
            "#
        );

        let data = sqlx::query_as::<_, MatchData2025>(&query)
            .bind(&key.event_key)
            .bind(&key.match_level)
            .bind(key.match_number)
            .bind(key.team_number)
            .bind(key.user_id)
            .bind(key.organization_id)
            .fetch_optional(self.pool)
            .await?;

        Ok(data)
    }

    /// Submissions of one organization at one event, in match order
    pub async fn list_2025(
        &self,
        event_key: &str,
        organization_id: i32,
        filter: &ScoutedMatchFilter,
    ) -> Result<Vec<MatchData2025>> {
        let mut query = QueryBuilder::new(format!(
            "SELECT {MATCH_DATA_2025_COLUMNS} FROM match_data_2025 WHERE event_key = "
        ));
        query.push_bind(event_key);
        query.push(" AND organization_id = ");
        query.push_bind(organization_id);

        if let Some(ref match_level) = filter.match_level {
            query.push(" AND match_level = ");
            query.push_bind(match_level);
        }

        if let Some(match_number) = filter.match_number {
            query.push(" AND match_number = ");
            query.push_bind(match_number);
        }

        if let Some(team_number) = filter.team_number {
            query.push(" AND team_number = ");
            query.push_bind(team_number);
        }

        query.push(" ORDER BY match_level, match_number, team_number, timestamp");

        let data = query
            .build_query_as::<MatchData2025>()
            .fetch_all(self.pool)
            .await?;

        Ok(data)
    }
}
