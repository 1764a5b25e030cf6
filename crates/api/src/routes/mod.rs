pub mod changes;
pub mod comments;
pub mod health;
pub mod notes;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /notes/{id}                                get note
/// /notes/{id}/content                        commit content (PUT)
/// /notes/{id}/changes                        list history, clear history
/// /notes/{id}/changes/{change_id}/restore    restore (POST)
///
/// /changes/{id}                              delete change
/// /changes/{id}/comments                     add comment (POST)
///
/// /comments/{id}                             delete comment
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/notes", notes::router())
        .nest("/changes", changes::router())
        .nest("/comments", comments::router())
}
