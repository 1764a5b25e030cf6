//! Note change models.
//!
//! Changes are immutable: created on every content commit (including
//! restores), never updated in place, removed only by delete-one or
//! clear-history.

use corkboard_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::comment::CommentEntry;

/// A row from the `note_changes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NoteChange {
    pub id: DbId,
    pub note_id: DbId,
    pub user_id: DbId,
    /// Unified line patch from `previous_content` to the content the note
    /// held once this change was applied.
    pub diff_patch: String,
    /// Full snapshot of the note immediately before this edit.
    pub previous_content: String,
    pub created_at: Timestamp,
}

/// A change row joined with its author's display info, as rendered by the
/// history sidebar.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ChangeLogEntry {
    pub id: DbId,
    pub note_id: DbId,
    pub user_id: DbId,
    pub diff_patch: String,
    pub previous_content: String,
    pub created_at: Timestamp,
    pub author_name: Option<String>,
    pub author_email: String,
}

/// A history entry with its nested comment thread.
#[derive(Debug, Clone, Serialize)]
pub struct ChangeWithComments {
    #[serde(flatten)]
    pub change: ChangeLogEntry,
    pub comments: Vec<CommentEntry>,
}

/// Outcome of a commit attempt against current note content.
#[derive(Debug, Clone, Serialize)]
pub struct CommitOutcome {
    /// `true` when the submitted content matched the current content and
    /// no change was recorded.
    pub no_change: bool,
    pub change: Option<NoteChange>,
}
