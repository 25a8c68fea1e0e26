use sqlx::PgPool;

use crate::error::{Result, StorageError};
use crate::models::Season;

pub struct SeasonRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SeasonRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Season>> {
        let seasons = sqlx::query_as::<_, Season>("SELECT id, year, name FROM seasons ORDER BY year")
            .fetch_all(self.pool)
            .await?;

        Ok(seasons)
    }

    pub async fn find_by_year(&self, year: i32) -> Result<Season> {
        sqlx::query_as::<_, Season>("SELECT id, year, name FROM seasons WHERE year = $1")
            .bind(year)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)
    }
}
