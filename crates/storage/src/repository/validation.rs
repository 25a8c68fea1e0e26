use sqlx::{PgPool, Postgres, QueryBuilder, Transaction};

use super::match_data::MatchDataRepository;
use crate::dto::scout::{DataValidationCorrection, DataValidationFilter, DataValidationUpdate};
use crate::error::{Result, StorageError};
use crate::models::{DataValidation, SubmissionKey, ValidationStatus};

const DATA_VALIDATION_COLUMNS: &str = r#"
    event_key, match_level, match_number, team_number, user_id, organization_id,
    timestamp, validation_status, notes
"#;

pub struct ValidationRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ValidationRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(
        &self,
        event_key: &str,
        organization_id: i32,
        filter: &DataValidationFilter,
    ) -> Result<Vec<DataValidation>> {
        let mut query = QueryBuilder::new(format!(
            "SELECT {DATA_VALIDATION_COLUMNS} FROM data_validation WHERE event_key = "
        ));
        query.push_bind(event_key);
        query.push(" AND organization_id = ");
        query.push_bind(organization_id);

        if let Some(match_number) = filter.match_number {
            query.push(" AND match_number = ");
            query.push_bind(match_number);
        }

        if let Some(ref match_level) = filter.match_level {
            query.push(" AND match_level = ");
            query.push_bind(match_level);
        }

        if let Some(team_number) = filter.team_number {
            query.push(" AND team_number = ");
            query.push_bind(team_number);
        }

        query.push(" ORDER BY match_level, match_number, team_number");

        let records = query
            .build_query_as::<DataValidation>()
            .fetch_all(self.pool)
            .await?;

        Ok(records)
    }

    pub async fn list_pending(&self, event_key: &str, organization_id: i32) -> Result<Vec<DataValidation>> {
        let query = format!(
            r#"
            SELECT {DATA_VALIDATION_COLUMNS}
            FROM data_validation
            WHERE event_key = $1 AND organization_id = $2 AND validation_status = 'PENDING'
            "#
        );

        let records = sqlx::query_as::<_, DataValidation>(&query)
            .bind(event_key)
            .bind(organization_id)
            .fetch_all(self.pool)
            .await?;

        Ok(records)
    }

    /// Applies reviewer decisions for one organization. Either every record
    /// is updated or, if one is missing, none are.
    pub async fn update_batch(
        &self,
        organization_id: i32,
        updates: &[DataValidationUpdate],
    ) -> Result<Vec<DataValidation>> {
        let query = format!(
            r#"
            UPDATE data_validation
            SET validation_status = $7, notes = COALESCE($8, notes)
            WHERE event_key = $1 AND match_level = $2 AND match_number = $3
              AND team_number = $4 AND user_id = $5 AND organization_id = $6
            RETURNING {DATA_VALIDATION_COLUMNS}
            "#
        );

        let mut tx = self.pool.begin().await?;
        let mut updated = Vec::with_capacity(updates.len());
        for update in updates {
            let record = sqlx::query_as::<_, DataValidation>(&query)
                .bind(&update.event_key)
                .bind(&update.match_level)
                .bind(update.match_number)
                .bind(update.team_number)
                .bind(update.user_id)
                .bind(organization_id)
                .bind(update.validation_status)
                .bind(&update.notes)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or(StorageError::NotFound)?;
            updated.push(record);
        }
        tx.commit().await?;

        Ok(updated)
    }

    /// Reviewer correction: rewrites the submission's scored fields, keeps
    /// its notes, and marks the validation record VALID with the reviewer's
    /// notes.
    pub async fn apply_correction_2025(
        &self,
        organization_id: i32,
        correction: &DataValidationCorrection,
    ) -> Result<DataValidation> {
        let key = correction
            .submission
            .key(correction.user_id, organization_id);

        let mut tx = self.pool.begin().await?;
        MatchDataRepository::update_fields_2025(&mut tx, &key, &correction.submission, None).await?;

        let query = format!(
            r#"
            UPDATE data_validation
            SET validation_status = 'VALID', notes = $7
            WHERE event_key = $1 AND match_level = $2 AND match_number = $3
              AND team_number = $4 AND user_id = $5 AND organization_id = $6
            RETURNING {DATA_VALIDATION_COLUMNS}
            "#
        );
        let record = sqlx::query_as::<_, DataValidation>(&query)
            .bind(&key.event_key)
            .bind(&key.match_level)
            .bind(key.match_number)
            .bind(key.team_number)
            .bind(key.user_id)
            .bind(key.organization_id)
            .bind(&correction.submission.notes)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(StorageError::NotFound)?;

        tx.commit().await?;
        Ok(record)
    }

    /// Moves a PENDING record to `status`. Records already resolved are left
    /// alone; the number of rows changed is returned.
    pub async fn resolve_pending(
        tx: &mut Transaction<'_, Postgres>,
        key: &SubmissionKey,
        status: ValidationStatus,
    ) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE data_validation
            SET validation_status = $7
            WHERE event_key = $1 AND match_level = $2 AND match_number = $3
              AND team_number = $4 AND user_id = $5 AND organization_id = $6
              AND validation_status = 'PENDING'
            "#,
        )
        .bind(&key.event_key)
        .bind(&key.match_level)
        .bind(key.match_number)
        .bind(key.team_number)
        .bind(key.user_id)
        .bind(key.organization_id)
        .bind(status)
        .execute(&mut **tx)
        .await?;

        Ok(result.rows_affected())
    }
}
