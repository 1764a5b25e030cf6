//! Handlers for the note change log: listing, restore, and deletion.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use corkboard_core::diff::{compute_diff, diff_preview, diff_summary, DiffSummary};
use corkboard_core::error::CoreError;
use corkboard_core::types::DbId;
use corkboard_db::models::change::{ChangeWithComments, NoteChange};
use corkboard_db::repositories::ChangeRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::{ensure_note, require_note_owner};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Response payload for a restore request. Failures (missing change, stale
/// state, forbidden) surface as error responses instead, so `success` is
/// always `true` here.
#[derive(Debug, Serialize)]
pub struct RestoreOutcome {
    pub success: bool,
    /// `false` when the target state already matched the current content.
    pub restored: bool,
    /// The change appended by the restore, when one was.
    pub change: Option<NoteChange>,
}

/// Response payload for clearing a note's history.
#[derive(Debug, Serialize)]
pub struct HistoryCleared {
    pub deleted: u64,
}

/// One history listing entry: the change with its comments, plus the
/// derived display data the sidebar renders.
#[derive(Debug, Serialize)]
pub struct HistoryEntry {
    #[serde(flatten)]
    pub entry: ChangeWithComments,
    pub summary: DiffSummary,
    pub preview: String,
}

/// Fetch a change by id, requiring it to belong to `note_id`.
async fn ensure_change_on_note(
    pool: &sqlx::PgPool,
    note_id: DbId,
    change_id: DbId,
) -> AppResult<NoteChange> {
    let change = ChangeRepo::find_by_id(pool, change_id).await?;
    match change {
        Some(change) if change.note_id == note_id => Ok(change),
        _ => Err(AppError::Core(CoreError::NotFound {
            entity: "Change",
            id: change_id,
        })),
    }
}

/// GET /notes/{id}/changes
///
/// Full change history of a note, newest first, with comments and author info.
pub async fn list_history(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(note_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_note(&state.pool, note_id).await?;
    let history: Vec<HistoryEntry> = ChangeRepo::list_with_comments(&state.pool, note_id)
        .await?
        .into_iter()
        .map(|entry| {
            let summary = diff_summary(&entry.change.diff_patch);
            let preview = diff_preview(&entry.change.diff_patch);
            HistoryEntry {
                entry,
                summary,
                preview,
            }
        })
        .collect();
    Ok(Json(DataResponse { data: history }))
}

/// DELETE /notes/{id}/changes
///
/// Clear a note's entire history. Owner only. Content is untouched.
pub async fn clear_history(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(note_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_note(&state.pool, note_id).await?;
    require_note_owner(&state.pool, note_id, auth.user_id).await?;

    let deleted = ChangeRepo::clear_for_note(&state.pool, note_id).await?;

    tracing::info!(user_id = auth.user_id, note_id = note_id, "History cleared");

    Ok(Json(DataResponse {
        data: HistoryCleared { deleted },
    }))
}

/// POST /notes/{id}/changes/{change_id}/restore
///
/// Restore the note to the state it had right after `change_id` was applied.
/// Owner only. The restore itself is committed as a new change, so it can be
/// restored away from in turn; history is never rewritten.
pub async fn restore_change(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((note_id, change_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let note = ensure_note(&state.pool, note_id).await?;
    require_note_owner(&state.pool, note_id, auth.user_id).await?;
    ensure_change_on_note(&state.pool, note_id, change_id).await?;

    // The state after a change is the snapshot its successor recorded as its
    // base. The newest change has no successor; the state after it is the
    // note's current content.
    let snapshot = match ChangeRepo::find_successor(&state.pool, note_id, change_id).await? {
        Some(successor) => successor.previous_content,
        None => note.content.clone(),
    };

    if snapshot == note.content {
        return Ok(Json(DataResponse {
            data: RestoreOutcome {
                success: true,
                restored: false,
                change: None,
            },
        }));
    }

    let patch = compute_diff(&note.content, &snapshot)
        .ok_or_else(|| AppError::InternalError("empty diff for differing contents".into()))?;

    let change = ChangeRepo::commit(
        &state.pool,
        note.id,
        auth.user_id,
        &snapshot,
        note.updated_at,
        &patch,
        &note.content,
    )
    .await?
    .ok_or_else(|| {
        AppError::Core(CoreError::Conflict(
            "Note was modified concurrently; reload and retry".into(),
        ))
    })?;

    tracing::info!(
        user_id = auth.user_id,
        note_id = note_id,
        restored_change_id = change_id,
        new_change_id = change.id,
        "Note restored"
    );

    Ok(Json(DataResponse {
        data: RestoreOutcome {
            success: true,
            restored: true,
            change: Some(change),
        },
    }))
}

/// DELETE /changes/{id}
///
/// Delete one change and its comments. Owner of the note only.
pub async fn delete_change(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(change_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let change = ChangeRepo::find_by_id(&state.pool, change_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Change",
                id: change_id,
            })
        })?;

    require_note_owner(&state.pool, change.note_id, auth.user_id).await?;

    ChangeRepo::delete(&state.pool, change_id).await?;

    tracing::info!(
        user_id = auth.user_id,
        note_id = change.note_id,
        change_id = change_id,
        "Change deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}
