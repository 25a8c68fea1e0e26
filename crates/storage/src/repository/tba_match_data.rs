use sqlx::{PgPool, Postgres, Transaction};

use crate::error::Result;
use crate::models::{MatchIdentity, TbaMatchData2025};

pub struct TbaMatchDataRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> TbaMatchDataRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Official alliance results stored for one match, red first
    pub async fn find_2025(&self, identity: &MatchIdentity) -> Result<Vec<TbaMatchData2025>> {
        let rows = sqlx::query_as::<_, TbaMatchData2025>(
            r#"
            SELECT event_key, match_level, match_number, alliance,
                   al4c, al3c, al2c, al1c, tl4c, tl3c, tl2c, tl1c,
                   net, processor, endgame_robot1, endgame_robot2, endgame_robot3,
                   fetched_at
            FROM tba_match_data_2025
            WHERE event_key = $1 AND match_level = $2 AND match_number = $3
            ORDER BY alliance
            "#,
        )
        .bind(&identity.event_key)
        .bind(&identity.match_level)
        .bind(identity.match_number)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Inserts or refreshes one alliance's official result and stamps the
    /// fetch time
    pub async fn upsert_2025(tx: &mut Transaction<'_, Postgres>, row: &TbaMatchData2025) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO tba_match_data_2025 (
                event_key, match_level, match_number, alliance,
                al4c, al3c, al2c, al1c, tl4c, tl3c, tl2c, tl1c,
                net, processor, endgame_robot1, endgame_robot2, endgame_robot3,
                fetched_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17,
                    CURRENT_TIMESTAMP)
            ON CONFLICT (event_key, match_level, match_number, alliance) DO UPDATE
            SET al4c = EXCLUDED.al4c, al3c = EXCLUDED.al3c,
                al2c = EXCLUDED.al2c, al1c = EXCLUDED.al1c,
                tl4c = EXCLUDED.tl4c, tl3c = EXCLUDED.tl3c,
                tl2c = EXCLUDED.tl2c, tl1c = EXCLUDED.tl1c,
                net = EXCLUDED.net, processor = EXCLUDED.processor,
                endgame_robot1 = EXCLUDED.endgame_robot1,
                endgame_robot2 = EXCLUDED.endgame_robot2,
                endgame_robot3 = EXCLUDED.endgame_robot3,
                fetched_at = EXCLUDED.fetched_at
            "#,
        )
        .bind(&row.event_key)
        .bind(&row.match_level)
        .bind(row.match_number)
        .bind(row.alliance)
        .bind(row.al4c)
        .bind(row.al3c)
        .bind(row.al2c)
        .bind(row.al1c)
        .bind(row.tl4c)
        .bind(row.tl3c)
        .bind(row.tl2c)
        .bind(row.tl1c)
        .bind(row.net)
        .bind(row.processor)
        .bind(row.endgame_robot1)
        .bind(row.endgame_robot2)
        .bind(row.endgame_robot3)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }
}
