//! Repository for the `notes` table.
//!
//! Content writes do not live here -- they happen inside
//! [`ChangeRepo::commit`](crate::repositories::ChangeRepo::commit) so the
//! content swap and the history append share one transaction.

use corkboard_core::types::DbId;
use sqlx::PgPool;

use crate::models::note::Note;

const COLUMNS: &str = "id, board_id, title, content, created_at, updated_at";

pub struct NoteRepo;

impl NoteRepo {
    pub async fn create(pool: &PgPool, board_id: DbId, title: &str) -> Result<Note, sqlx::Error> {
        let query = format!(
            "INSERT INTO notes (board_id, title)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(board_id)
            .bind(title)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Note>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notes WHERE id = $1");
        sqlx::query_as::<_, Note>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Server-verified ownership check: does `user_id` own the board that
    /// owns this note? Caller-asserted ownership flags are never trusted.
    pub async fn is_note_owner(
        pool: &PgPool,
        note_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let row: (bool,) = sqlx::query_as(
            "SELECT EXISTS (
                SELECT 1 FROM notes n
                JOIN boards b ON n.board_id = b.id
                WHERE n.id = $1 AND b.owner_id = $2
             )",
        )
        .bind(note_id)
        .bind(user_id)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }
}
