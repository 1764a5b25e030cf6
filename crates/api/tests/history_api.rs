//! Integration tests for note content commits, change history, and restore.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_json, put_json};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Test: commit, list, restore -- the full editing scenario
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn commit_list_restore_scenario(pool: PgPool) {
    let owner = common::seed_user(&pool, "alice@example.com", Some("Alice")).await;
    let note = common::seed_note(&pool, owner.id, "Plan").await;
    let token = common::token_for(owner.id);
    let app = common::build_test_app(pool);

    let uri = format!("/api/v1/notes/{}/content", note.id);

    // First commit: empty -> "Foo".
    let response = put_json(&app, &uri, Some(&token), json!({ "content": "Foo" })).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["no_change"], false);
    assert!(json["data"]["change"]["diff_patch"].is_string());

    // Second commit: "Foo" -> "Foo\nBar\n".
    let response = put_json(&app, &uri, Some(&token), json!({ "content": "Foo\nBar\n" })).await;
    assert_eq!(response.status(), StatusCode::OK);

    // History lists both changes, newest first, with author info.
    let changes_uri = format!("/api/v1/notes/{}/changes", note.id);
    let response = get(&app, &changes_uri, Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let history = json["data"].as_array().expect("data should be an array");
    assert_eq!(history.len(), 2);
    assert_eq!(history[0]["previous_content"], "Foo");
    assert_eq!(history[1]["previous_content"], "");
    assert_eq!(history[0]["author_email"], "alice@example.com");
    assert_eq!(history[0]["author_name"], "Alice");
    // Derived display data for the first change ("" -> "Foo").
    assert_eq!(history[1]["summary"]["additions"], 1);
    assert_eq!(history[1]["summary"]["deletions"], 1);
    assert_eq!(history[1]["preview"], "Foo");
    let first_change_id = history[1]["id"].as_i64().expect("id should be a number");

    // Restore to the state after the first change: content becomes "Foo".
    let restore_uri = format!(
        "/api/v1/notes/{}/changes/{}/restore",
        note.id, first_change_id
    );
    let response = post_json(&app, &restore_uri, Some(&token), json!({})).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["success"], true);
    assert_eq!(json["data"]["restored"], true);

    let response = get(&app, &format!("/api/v1/notes/{}", note.id), Some(&token)).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["content"], "Foo");

    // The restore itself was appended to the log.
    let response = get(&app, &changes_uri, Some(&token)).await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 3);
}

// ---------------------------------------------------------------------------
// Test: committing identical content is a no-op
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn identical_commit_is_noop(pool: PgPool) {
    let owner = common::seed_user(&pool, "bob@example.com", None).await;
    let note = common::seed_note(&pool, owner.id, "Scratch").await;
    let token = common::token_for(owner.id);
    let app = common::build_test_app(pool);

    let uri = format!("/api/v1/notes/{}/content", note.id);

    let response = put_json(&app, &uri, Some(&token), json!({ "content": "same" })).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = put_json(&app, &uri, Some(&token), json!({ "content": "same" })).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["no_change"], true);
    assert!(json["data"]["change"].is_null());

    let response = get(
        &app,
        &format!("/api/v1/notes/{}/changes", note.id),
        Some(&token),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(
        json["data"].as_array().unwrap().len(),
        1,
        "the no-op must not append to the log"
    );
}

// ---------------------------------------------------------------------------
// Test: a stale base token is refused with 409
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn stale_base_returns_conflict(pool: PgPool) {
    let owner = common::seed_user(&pool, "carol@example.com", None).await;
    let note = common::seed_note(&pool, owner.id, "Contested").await;
    let token = common::token_for(owner.id);
    let app = common::build_test_app(pool);

    let uri = format!("/api/v1/notes/{}/content", note.id);

    // Someone commits first.
    let response = put_json(&app, &uri, Some(&token), json!({ "content": "one" })).await;
    assert_eq!(response.status(), StatusCode::OK);

    // A commit based on the pre-commit state must be refused.
    let response = put_json(
        &app,
        &uri,
        Some(&token),
        json!({ "content": "two", "base_updated_at": note.updated_at }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");

    // Nothing was written by the refused commit.
    let response = get(&app, &format!("/api/v1/notes/{}", note.id), Some(&token)).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["content"], "one");
}

// ---------------------------------------------------------------------------
// Test: oversized content is rejected with 400
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn oversized_content_returns_400(pool: PgPool) {
    let owner = common::seed_user(&pool, "dave@example.com", None).await;
    let note = common::seed_note(&pool, owner.id, "Big").await;
    let token = common::token_for(owner.id);
    let app = common::build_test_app(pool);

    let huge = "x".repeat(100_001);
    let response = put_json(
        &app,
        &format!("/api/v1/notes/{}/content", note.id),
        Some(&token),
        json!({ "content": huge }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Test: restoring the newest change is a no-op
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn restore_newest_is_noop(pool: PgPool) {
    let owner = common::seed_user(&pool, "erin@example.com", None).await;
    let note = common::seed_note(&pool, owner.id, "Stable").await;
    let token = common::token_for(owner.id);
    let app = common::build_test_app(pool);

    let response = put_json(
        &app,
        &format!("/api/v1/notes/{}/content", note.id),
        Some(&token),
        json!({ "content": "final" }),
    )
    .await;
    let json = body_json(response).await;
    let change_id = json["data"]["change"]["id"].as_i64().unwrap();

    let response = post_json(
        &app,
        &format!("/api/v1/notes/{}/changes/{}/restore", note.id, change_id),
        Some(&token),
        json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["success"], true);
    assert_eq!(json["data"]["restored"], false);
    assert!(json["data"]["change"].is_null());
}

// ---------------------------------------------------------------------------
// Test: restore rejects a change belonging to another note
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn restore_rejects_foreign_change(pool: PgPool) {
    let owner = common::seed_user(&pool, "frank@example.com", None).await;
    let note_a = common::seed_note(&pool, owner.id, "A").await;
    let note_b = common::seed_note(&pool, owner.id, "B").await;
    let token = common::token_for(owner.id);
    let app = common::build_test_app(pool);

    let response = put_json(
        &app,
        &format!("/api/v1/notes/{}/content", note_a.id),
        Some(&token),
        json!({ "content": "on a" }),
    )
    .await;
    let json = body_json(response).await;
    let change_id = json["data"]["change"]["id"].as_i64().unwrap();

    let response = post_json(
        &app,
        &format!("/api/v1/notes/{}/changes/{}/restore", note_b.id, change_id),
        Some(&token),
        json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: restore and history clearing are owner-only
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn owner_only_operations_return_403(pool: PgPool) {
    let owner = common::seed_user(&pool, "grace@example.com", None).await;
    let stranger = common::seed_user(&pool, "mallory@example.com", None).await;
    let note = common::seed_note(&pool, owner.id, "Guarded").await;
    let owner_token = common::token_for(owner.id);
    let stranger_token = common::token_for(stranger.id);
    let app = common::build_test_app(pool);

    let response = put_json(
        &app,
        &format!("/api/v1/notes/{}/content", note.id),
        Some(&owner_token),
        json!({ "content": "mine" }),
    )
    .await;
    let json = body_json(response).await;
    let change_id = json["data"]["change"]["id"].as_i64().unwrap();

    let response = post_json(
        &app,
        &format!("/api/v1/notes/{}/changes/{}/restore", note.id, change_id),
        Some(&stranger_token),
        json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = delete(
        &app,
        &format!("/api/v1/notes/{}/changes", note.id),
        Some(&stranger_token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = delete(
        &app,
        &format!("/api/v1/changes/{change_id}"),
        Some(&stranger_token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Test: clearing history empties the log but keeps the content
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn clear_history_keeps_content(pool: PgPool) {
    let owner = common::seed_user(&pool, "heidi@example.com", None).await;
    let note = common::seed_note(&pool, owner.id, "Wiped").await;
    let token = common::token_for(owner.id);
    let app = common::build_test_app(pool);

    let uri = format!("/api/v1/notes/{}/content", note.id);
    put_json(&app, &uri, Some(&token), json!({ "content": "v1" })).await;
    put_json(&app, &uri, Some(&token), json!({ "content": "v2" })).await;

    let response = delete(
        &app,
        &format!("/api/v1/notes/{}/changes", note.id),
        Some(&token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["deleted"], 2);

    let response = get(
        &app,
        &format!("/api/v1/notes/{}/changes", note.id),
        Some(&token),
    )
    .await;
    let json = body_json(response).await;
    assert!(json["data"].as_array().unwrap().is_empty());

    let response = get(&app, &format!("/api/v1/notes/{}", note.id), Some(&token)).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["content"], "v2");
}

// ---------------------------------------------------------------------------
// Test: deleting one change removes it from the listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_change_removes_entry(pool: PgPool) {
    let owner = common::seed_user(&pool, "ivan@example.com", None).await;
    let note = common::seed_note(&pool, owner.id, "Pruned").await;
    let token = common::token_for(owner.id);
    let app = common::build_test_app(pool);

    let uri = format!("/api/v1/notes/{}/content", note.id);
    let response = put_json(&app, &uri, Some(&token), json!({ "content": "keep" })).await;
    let json = body_json(response).await;
    let keep_id = json["data"]["change"]["id"].as_i64().unwrap();
    let response = put_json(&app, &uri, Some(&token), json!({ "content": "drop" })).await;
    let json = body_json(response).await;
    let drop_id = json["data"]["change"]["id"].as_i64().unwrap();

    let response = delete(&app, &format!("/api/v1/changes/{drop_id}"), Some(&token)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(
        &app,
        &format!("/api/v1/notes/{}/changes", note.id),
        Some(&token),
    )
    .await;
    let json = body_json(response).await;
    let history = json["data"].as_array().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["id"].as_i64().unwrap(), keep_id);

    // Deleting again is a 404.
    let response = delete(&app, &format!("/api/v1/changes/{drop_id}"), Some(&token)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: unknown note id returns 404
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_note_returns_404(pool: PgPool) {
    let user = common::seed_user(&pool, "judy@example.com", None).await;
    let token = common::token_for(user.id);
    let app = common::build_test_app(pool);

    let response = get(&app, "/api/v1/notes/999999", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}
