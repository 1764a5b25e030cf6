//! Route definitions for notes and their change history.
//!
//! Registered under `/notes`.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{history, notes};
use crate::state::AppState;

/// Note routes, registered as `/notes`.
///
/// ```text
/// GET    /{id}                               get_note
/// PUT    /{id}/content                       commit_content
/// GET    /{id}/changes                       list_history
/// DELETE /{id}/changes                       clear_history
/// POST   /{id}/changes/{change_id}/restore   restore_change
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(notes::get_note))
        .route("/{id}/content", put(notes::commit_content))
        .route(
            "/{id}/changes",
            get(history::list_history).delete(history::clear_history),
        )
        .route(
            "/{id}/changes/{change_id}/restore",
            post(history::restore_change),
        )
}
