//! Handlers for notes and content commits.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use corkboard_core::diff::compute_diff;
use corkboard_core::error::CoreError;
use corkboard_core::note::validate_content;
use corkboard_core::types::DbId;
use corkboard_db::models::change::CommitOutcome;
use corkboard_db::models::note::CommitContent;
use corkboard_db::repositories::ChangeRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::ensure_note;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /notes/{id}
///
/// Fetch a note with its current content and concurrency token.
pub async fn get_note(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(note_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let note = ensure_note(&state.pool, note_id).await?;
    Ok(Json(DataResponse { data: note }))
}

/// PUT /notes/{id}/content
///
/// Commit new content, appending a change to the note's history.
///
/// Committing content identical to the current state is a no-op: nothing is
/// written and the response says so, so retries and idle autosaves never
/// pollute the log.
pub async fn commit_content(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(note_id): Path<DbId>,
    Json(input): Json<CommitContent>,
) -> AppResult<impl IntoResponse> {
    validate_content(&input.content).map_err(AppError::Core)?;

    let note = ensure_note(&state.pool, note_id).await?;

    if note.content == input.content {
        return Ok(Json(DataResponse {
            data: CommitOutcome {
                no_change: true,
                change: None,
            },
        }));
    }

    let patch = compute_diff(&note.content, &input.content)
        .ok_or_else(|| AppError::InternalError("empty diff for differing contents".into()))?;

    // Commit against the client's base token when it sent one, otherwise
    // against the state just read.
    let expected = input.base_updated_at.unwrap_or(note.updated_at);

    let change = ChangeRepo::commit(
        &state.pool,
        note.id,
        auth.user_id,
        &input.content,
        expected,
        &patch,
        &note.content,
    )
    .await?
    .ok_or_else(|| {
        AppError::Core(CoreError::Conflict(
            "Note was modified concurrently; reload and retry".into(),
        ))
    })?;

    Ok(Json(DataResponse {
        data: CommitOutcome {
            no_change: false,
            change: Some(change),
        },
    }))
}
