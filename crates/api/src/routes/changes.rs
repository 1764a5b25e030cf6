//! Route definitions for individual changes.
//!
//! Registered under `/changes`.

use axum::routing::{delete, post};
use axum::Router;

use crate::handlers::{comments, history};
use crate::state::AppState;

/// Change routes, registered as `/changes`.
///
/// ```text
/// DELETE /{id}            delete_change
/// POST   /{id}/comments   add_comment
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}", delete(history::delete_change))
        .route("/{id}/comments", post(comments::add_comment))
}
