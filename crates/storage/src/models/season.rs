use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A game season; the year decides which submission and result schemas apply.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Season {
    pub id: i32,
    pub year: i32,
    pub name: String,
}
