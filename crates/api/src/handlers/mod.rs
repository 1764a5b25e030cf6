//! HTTP handlers, grouped by resource.

pub mod comments;
pub mod history;
pub mod notes;

use corkboard_core::error::CoreError;
use corkboard_core::types::DbId;
use corkboard_db::models::note::Note;
use corkboard_db::repositories::NoteRepo;
use sqlx::PgPool;

use crate::error::{AppError, AppResult};

/// Fetch a note by id or return 404.
pub(crate) async fn ensure_note(pool: &PgPool, note_id: DbId) -> AppResult<Note> {
    NoteRepo::find_by_id(pool, note_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Note",
                id: note_id,
            })
        })
}

/// Reject with 403 unless `user_id` owns the board the note lives on.
pub(crate) async fn require_note_owner(
    pool: &PgPool,
    note_id: DbId,
    user_id: DbId,
) -> AppResult<()> {
    if NoteRepo::is_note_owner(pool, note_id, user_id).await? {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Forbidden(
            "Only the note's owner may do this".into(),
        )))
    }
}
