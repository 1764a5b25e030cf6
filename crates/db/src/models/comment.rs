//! Change comment models.

use corkboard_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `change_comments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ChangeComment {
    pub id: DbId,
    pub change_id: DbId,
    pub user_id: DbId,
    pub content: String,
    pub created_at: Timestamp,
}

/// A comment joined with its author's display info.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CommentEntry {
    pub id: DbId,
    pub change_id: DbId,
    pub user_id: DbId,
    pub content: String,
    pub created_at: Timestamp,
    pub author_name: Option<String>,
    pub author_email: String,
}

/// Authorization context for a comment: its author plus the note it hangs
/// off, resolved through the owning change.
#[derive(Debug, Clone, FromRow)]
pub struct CommentOwnership {
    pub id: DbId,
    pub user_id: DbId,
    pub note_id: DbId,
}

/// Request body for adding a comment.
#[derive(Debug, Deserialize)]
pub struct CreateComment {
    pub content: String,
}
