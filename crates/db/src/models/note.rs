//! Note model.

use corkboard_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `notes` table.
///
/// `updated_at` is the optimistic-concurrency token for content commits:
/// the editor reads it together with `content`, and the commit transaction
/// only applies while it is unchanged.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Note {
    pub id: DbId,
    pub board_id: DbId,
    pub title: String,
    pub content: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for a content commit.
///
/// `base_updated_at` is the `updated_at` the client last read. When set, a
/// commit on top of any newer state is refused with a conflict; when absent
/// the commit applies over whatever is current.
#[derive(Debug, Deserialize)]
pub struct CommitContent {
    pub content: String,
    pub base_updated_at: Option<Timestamp>,
}
