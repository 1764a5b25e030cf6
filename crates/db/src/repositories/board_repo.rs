//! Repository for the `boards` table.

use corkboard_core::types::DbId;
use sqlx::PgPool;

use crate::models::board::Board;

const COLUMNS: &str = "id, owner_id, name, created_at, updated_at";

pub struct BoardRepo;

impl BoardRepo {
    pub async fn create(pool: &PgPool, owner_id: DbId, name: &str) -> Result<Board, sqlx::Error> {
        let query = format!(
            "INSERT INTO boards (owner_id, name)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Board>(&query)
            .bind(owner_id)
            .bind(name)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Board>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM boards WHERE id = $1");
        sqlx::query_as::<_, Board>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
