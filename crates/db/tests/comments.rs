//! Integration tests for change comments.
//!
//! Exercises the `CommentRepo` against a real database:
//! - Create and fetch comments
//! - `find_ownership` resolves the author and the owning note
//! - Delete returns whether a row was removed
//! - Deleting a note cascades through changes to comments

use corkboard_core::diff::compute_diff;
use corkboard_db::repositories::{BoardRepo, ChangeRepo, CommentRepo, NoteRepo, UserRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Create a user, board, note, and one committed change on the note.
/// Returns (user_id, note_id, change_id).
async fn setup_change(pool: &PgPool, suffix: &str) -> (i64, i64, i64) {
    let user = UserRepo::create(
        pool,
        &format!("commenter_{suffix}@example.com"),
        None,
        "hash",
    )
    .await
    .unwrap();
    let board = BoardRepo::create(pool, user.id, &format!("Board {suffix}"))
        .await
        .unwrap();
    let note = NoteRepo::create(pool, board.id, &format!("Note {suffix}"))
        .await
        .unwrap();
    let patch = compute_diff(&note.content, "draft").unwrap();
    let change = ChangeRepo::commit(
        pool,
        note.id,
        user.id,
        "draft",
        note.updated_at,
        &patch,
        &note.content,
    )
    .await
    .unwrap()
    .unwrap();
    (user.id, note.id, change.id)
}

// ---------------------------------------------------------------------------
// Test: create and fetch
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_create_and_find(pool: PgPool) {
    let (user_id, _note_id, change_id) = setup_change(&pool, "create").await;

    let comment = CommentRepo::create(&pool, change_id, user_id, "looks right")
        .await
        .unwrap();
    assert!(comment.id > 0);
    assert_eq!(comment.change_id, change_id);
    assert_eq!(comment.user_id, user_id);
    assert_eq!(comment.content, "looks right");

    let found = CommentRepo::find_by_id(&pool, comment.id)
        .await
        .unwrap()
        .expect("comment should exist");
    assert_eq!(found.content, "looks right");
}

// ---------------------------------------------------------------------------
// Test: ownership resolution
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_find_ownership(pool: PgPool) {
    let (author_id, note_id, change_id) = setup_change(&pool, "ownership").await;

    let comment = CommentRepo::create(&pool, change_id, author_id, "mine")
        .await
        .unwrap();

    let ownership = CommentRepo::find_ownership(&pool, comment.id)
        .await
        .unwrap()
        .expect("ownership should resolve");
    assert_eq!(ownership.user_id, author_id);
    assert_eq!(ownership.note_id, note_id);

    let missing = CommentRepo::find_ownership(&pool, 999_999).await.unwrap();
    assert!(missing.is_none());
}

// ---------------------------------------------------------------------------
// Test: delete reports whether anything was removed
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_delete(pool: PgPool) {
    let (user_id, _note_id, change_id) = setup_change(&pool, "delete").await;

    let comment = CommentRepo::create(&pool, change_id, user_id, "fleeting")
        .await
        .unwrap();

    assert!(CommentRepo::delete(&pool, comment.id).await.unwrap());
    assert!(!CommentRepo::delete(&pool, comment.id).await.unwrap());
    assert!(CommentRepo::find_by_id(&pool, comment.id).await.unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Test: note deletion cascades to changes and comments
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_note_delete_cascades(pool: PgPool) {
    let (user_id, note_id, change_id) = setup_change(&pool, "cascade").await;
    let comment = CommentRepo::create(&pool, change_id, user_id, "soon gone")
        .await
        .unwrap();

    sqlx::query("DELETE FROM notes WHERE id = $1")
        .bind(note_id)
        .execute(&pool)
        .await
        .unwrap();

    assert!(ChangeRepo::find_by_id(&pool, change_id).await.unwrap().is_none());
    assert!(CommentRepo::find_by_id(&pool, comment.id).await.unwrap().is_none());
}
