use sqlx::PgPool;
use storage::{error::Result, models::Season, repository::season::SeasonRepository};

pub async fn list_seasons(pool: &PgPool) -> Result<Vec<Season>> {
    SeasonRepository::new(pool).list().await
}
