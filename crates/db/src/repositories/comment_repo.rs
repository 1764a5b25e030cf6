//! Repository for the `change_comments` table.

use corkboard_core::types::DbId;
use sqlx::PgPool;

use crate::models::comment::{ChangeComment, CommentOwnership};

const COLUMNS: &str = "id, change_id, user_id, content, created_at";

pub struct CommentRepo;

impl CommentRepo {
    pub async fn create(
        pool: &PgPool,
        change_id: DbId,
        user_id: DbId,
        content: &str,
    ) -> Result<ChangeComment, sqlx::Error> {
        let query = format!(
            "INSERT INTO change_comments (change_id, user_id, content)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ChangeComment>(&query)
            .bind(change_id)
            .bind(user_id)
            .bind(content)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ChangeComment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM change_comments WHERE id = $1");
        sqlx::query_as::<_, ChangeComment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Resolves who wrote a comment and which note it belongs to, so the
    /// handler can allow deletion by the author or the note's owner.
    pub async fn find_ownership(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<CommentOwnership>, sqlx::Error> {
        sqlx::query_as::<_, CommentOwnership>(
            "SELECT m.id, m.user_id, c.note_id
             FROM change_comments m
             JOIN note_changes c ON m.change_id = c.id
             WHERE m.id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let deleted = sqlx::query("DELETE FROM change_comments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(deleted.rows_affected() > 0)
    }
}
