//! Repository for the `note_changes` table: the append-only change log.

use std::collections::HashMap;

use corkboard_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::change::{ChangeLogEntry, ChangeWithComments, NoteChange};
use crate::models::comment::CommentEntry;

const COLUMNS: &str = "id, note_id, user_id, diff_patch, previous_content, created_at";

pub struct ChangeRepo;

impl ChangeRepo {
    /// Commits new content to a note and appends a change recording the
    /// transition, in one transaction.
    ///
    /// The note row is only updated when its `updated_at` still matches
    /// `expected_updated_at`; on a mismatch nothing is written and `Ok(None)`
    /// is returned so the caller can surface a conflict.
    pub async fn commit(
        pool: &PgPool,
        note_id: DbId,
        user_id: DbId,
        new_content: &str,
        expected_updated_at: Timestamp,
        diff_patch: &str,
        previous_content: &str,
    ) -> Result<Option<NoteChange>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let updated = sqlx::query(
            "UPDATE notes SET content = $2, updated_at = NOW()
             WHERE id = $1 AND updated_at = $3",
        )
        .bind(note_id)
        .bind(new_content)
        .bind(expected_updated_at)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        let query = format!(
            "INSERT INTO note_changes (note_id, user_id, diff_patch, previous_content)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let change = sqlx::query_as::<_, NoteChange>(&query)
            .bind(note_id)
            .bind(user_id)
            .bind(diff_patch)
            .bind(previous_content)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(
            note_id = note_id,
            user_id = user_id,
            change_id = change.id,
            "committed note change"
        );

        Ok(Some(change))
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<NoteChange>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM note_changes WHERE id = $1");
        sqlx::query_as::<_, NoteChange>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The next-younger change on the same note, if any. Change ids are
    /// monotonic, so ordering by id is ordering by commit time.
    pub async fn find_successor(
        pool: &PgPool,
        note_id: DbId,
        change_id: DbId,
    ) -> Result<Option<NoteChange>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM note_changes
             WHERE note_id = $1 AND id > $2
             ORDER BY id ASC LIMIT 1"
        );
        sqlx::query_as::<_, NoteChange>(&query)
            .bind(note_id)
            .bind(change_id)
            .fetch_optional(pool)
            .await
    }

    /// Full history of a note, newest change first, each change carrying its
    /// comments oldest first. Two queries, stitched together in memory.
    pub async fn list_with_comments(
        pool: &PgPool,
        note_id: DbId,
    ) -> Result<Vec<ChangeWithComments>, sqlx::Error> {
        let changes = sqlx::query_as::<_, ChangeLogEntry>(
            "SELECT c.id, c.note_id, c.user_id, c.diff_patch, c.previous_content,
                    c.created_at, u.name AS author_name, u.email AS author_email
             FROM note_changes c
             JOIN users u ON c.user_id = u.id
             WHERE c.note_id = $1
             ORDER BY c.id DESC",
        )
        .bind(note_id)
        .fetch_all(pool)
        .await?;

        let comments = sqlx::query_as::<_, CommentEntry>(
            "SELECT m.id, m.change_id, m.user_id, m.content, m.created_at,
                    u.name AS author_name, u.email AS author_email
             FROM change_comments m
             JOIN users u ON m.user_id = u.id
             JOIN note_changes c ON m.change_id = c.id
             WHERE c.note_id = $1
             ORDER BY m.id ASC",
        )
        .bind(note_id)
        .fetch_all(pool)
        .await?;

        let mut by_change: HashMap<DbId, Vec<CommentEntry>> = HashMap::new();
        for comment in comments {
            by_change.entry(comment.change_id).or_default().push(comment);
        }

        Ok(changes
            .into_iter()
            .map(|change| {
                let comments = by_change.remove(&change.id).unwrap_or_default();
                ChangeWithComments { change, comments }
            })
            .collect())
    }

    /// Deletes one change and its comments. Returns `false` when the change
    /// does not exist.
    pub async fn delete(pool: &PgPool, change_id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM change_comments WHERE change_id = $1")
            .bind(change_id)
            .execute(&mut *tx)
            .await?;

        let deleted = sqlx::query("DELETE FROM note_changes WHERE id = $1")
            .bind(change_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(deleted.rows_affected() > 0)
    }

    /// Deletes every change on a note together with their comments. Other
    /// notes' histories are untouched. Returns the number of changes removed.
    pub async fn clear_for_note(pool: &PgPool, note_id: DbId) -> Result<u64, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query(
            "DELETE FROM change_comments
             WHERE change_id IN (SELECT id FROM note_changes WHERE note_id = $1)",
        )
        .bind(note_id)
        .execute(&mut *tx)
        .await?;

        let deleted = sqlx::query("DELETE FROM note_changes WHERE note_id = $1")
            .bind(note_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(
            note_id = note_id,
            deleted = deleted.rows_affected(),
            "cleared note history"
        );

        Ok(deleted.rows_affected())
    }
}
