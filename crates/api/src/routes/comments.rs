//! Route definitions for comments.
//!
//! Registered under `/comments`.

use axum::routing::delete;
use axum::Router;

use crate::handlers::comments;
use crate::state::AppState;

/// Comment routes, registered as `/comments`.
///
/// ```text
/// DELETE /{id}    delete_comment
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}", delete(comments::delete_comment))
}
