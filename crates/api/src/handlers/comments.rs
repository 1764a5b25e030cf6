//! Handlers for comments attached to changes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use corkboard_core::error::CoreError;
use corkboard_core::note::validate_comment;
use corkboard_core::types::DbId;
use corkboard_db::models::comment::CreateComment;
use corkboard_db::repositories::{ChangeRepo, CommentRepo, NoteRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /changes/{id}/comments
///
/// Attach a comment to a change. Any authenticated user may comment.
pub async fn add_comment(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(change_id): Path<DbId>,
    Json(input): Json<CreateComment>,
) -> AppResult<impl IntoResponse> {
    let content = validate_comment(&input.content).map_err(AppError::Core)?;

    ChangeRepo::find_by_id(&state.pool, change_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Change",
                id: change_id,
            })
        })?;

    let comment = CommentRepo::create(&state.pool, change_id, auth.user_id, content).await?;

    tracing::info!(
        user_id = auth.user_id,
        change_id = change_id,
        comment_id = comment.id,
        "Comment added"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: comment })))
}

/// DELETE /comments/{id}
///
/// Delete a comment. Allowed for its author and for the owner of the note
/// the comment's change belongs to.
pub async fn delete_comment(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(comment_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let ownership = CommentRepo::find_ownership(&state.pool, comment_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Comment",
                id: comment_id,
            })
        })?;

    let allowed = ownership.user_id == auth.user_id
        || NoteRepo::is_note_owner(&state.pool, ownership.note_id, auth.user_id).await?;
    if !allowed {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the comment's author or the note's owner may delete it".into(),
        )));
    }

    CommentRepo::delete(&state.pool, comment_id).await?;

    tracing::info!(
        user_id = auth.user_id,
        comment_id = comment_id,
        "Comment deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}
