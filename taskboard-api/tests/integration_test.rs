/// Integration tests for the Taskboard API
///
/// These tests require a running PostgreSQL database. The URL is taken
/// from DATABASE_URL, defaulting to a local taskboard_test database.
///
/// They verify the externally observable behavior end to end:
/// - create/read round-trips for tasks and projects
/// - not-found failures for dangling references
/// - the fixed status-rank listing order
/// - validation failures before persistence
/// - kanban grouping, search filters, comments, tags, and membership

mod common;

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use common::{send, unique, TestContext};
use serde_json::json;

/// Test that the health endpoint reports a connected database
#[tokio::test]
async fn test_health_check() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = send(&ctx.app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "connected");

    ctx.cleanup().await.unwrap();
}

/// Test that a created task round-trips through the detail endpoint
#[tokio::test]
async fn test_create_and_get_task_roundtrip() {
    let ctx = TestContext::new().await.unwrap();

    let (status, task) = send(
        &ctx.app,
        "POST",
        "/v1/tasks",
        Some(json!({
            "project_id": ctx.project.id,
            "title": "Write the release notes",
            "description": "Cover the search endpoint",
            "status": "TODO",
            "priority": "HIGH",
            "assignee_id": ctx.user.id,
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(task["id"].as_i64().unwrap() > 0);
    assert_eq!(task["status"], "TODO");
    assert_eq!(task["priority"], "HIGH");

    let (status, fetched) =
        send(&ctx.app, "GET", &format!("/v1/tasks/{}", task["id"]), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["title"], "Write the release notes");
    assert_eq!(fetched["description"], "Cover the search endpoint");
    assert_eq!(fetched["project_id"].as_i64(), task["project_id"].as_i64());
    // Join-only fields are populated on the detail path
    assert_eq!(fetched["project_name"].as_str(), Some(ctx.project.name.as_str()));
    assert_eq!(fetched["assignee_name"].as_str(), Some(ctx.user.username.as_str()));

    ctx.cleanup().await.unwrap();
}

/// Test that creating a task under a missing project fails with 404
#[tokio::test]
async fn test_create_task_unknown_project_is_not_found() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = send(
        &ctx.app,
        "POST",
        "/v1/tasks",
        Some(json!({
            "project_id": 999_999_999,
            "title": "Orphan task",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");

    ctx.cleanup().await.unwrap();
}

/// Test that an unrecognized status symbol fails validation, not storage
#[tokio::test]
async fn test_create_task_unknown_status_fails_validation() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = send(
        &ctx.app,
        "POST",
        "/v1/tasks",
        Some(json!({
            "project_id": ctx.project.id,
            "title": "Task with bad status",
            "status": "STARTED",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "validation_error");
    assert_eq!(body["details"][0]["field"], "status");

    ctx.cleanup().await.unwrap();
}

/// Test that a blank title is rejected before anything is persisted
#[tokio::test]
async fn test_create_task_blank_title_fails_validation() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = send(
        &ctx.app,
        "POST",
        "/v1/tasks",
        Some(json!({
            "project_id": ctx.project.id,
            "title": "",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["details"][0]["field"], "title");

    let (_, tasks) = send(
        &ctx.app,
        "GET",
        &format!("/v1/tasks?project_id={}", ctx.project.id),
        None,
    )
    .await;
    assert_eq!(tasks.as_array().unwrap().len(), 0);

    ctx.cleanup().await.unwrap();
}

/// Test the fixed listing order: status rank first, then newest first
/// within each status group, and that a status change moves the row
/// between groups
#[tokio::test]
async fn test_listing_orders_by_status_rank_then_recency() {
    let ctx = TestContext::new().await.unwrap();

    let create = |title: &str, status: &str| {
        json!({
            "project_id": ctx.project.id,
            "title": title,
            "status": status,
            "priority": "HIGH",
        })
    };

    let (_, t1) = send(&ctx.app, "POST", "/v1/tasks", Some(create("T1", "TODO"))).await;
    tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    let (_, t2) = send(&ctx.app, "POST", "/v1/tasks", Some(create("T2", "DONE"))).await;
    tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    let (_, t3) = send(&ctx.app, "POST", "/v1/tasks", Some(create("T3", "TODO"))).await;

    let list_uri = format!("/v1/tasks?project_id={}", ctx.project.id);

    // TODO group first (newest first inside it), DONE last
    let (_, tasks) = send(&ctx.app, "GET", &list_uri, None).await;
    let ids: Vec<i64> = tasks
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_i64().unwrap())
        .collect();
    assert_eq!(
        ids,
        vec![
            t3["id"].as_i64().unwrap(),
            t1["id"].as_i64().unwrap(),
            t2["id"].as_i64().unwrap(),
        ]
    );

    // Moving T1 to IN_PROGRESS keeps it ahead of DONE but behind TODO
    let (status, body) = send(
        &ctx.app,
        "POST",
        &format!("/v1/tasks/{}/status", t1["id"]),
        Some(json!({ "status": "IN_PROGRESS" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (_, tasks) = send(&ctx.app, "GET", &list_uri, None).await;
    let rows = tasks.as_array().unwrap();
    assert_eq!(rows[0]["id"].as_i64(), t3["id"].as_i64());
    assert_eq!(rows[1]["id"].as_i64(), t1["id"].as_i64());
    assert_eq!(rows[1]["status"], "IN_PROGRESS");
    assert_eq!(rows[2]["id"].as_i64(), t2["id"].as_i64());

    ctx.cleanup().await.unwrap();
}

/// Test that a status update refreshes updated_at
#[tokio::test]
async fn test_update_status_refreshes_updated_at() {
    let ctx = TestContext::new().await.unwrap();

    let (_, task) = send(
        &ctx.app,
        "POST",
        "/v1/tasks",
        Some(json!({
            "project_id": ctx.project.id,
            "title": "Track my timestamps",
        })),
    )
    .await;
    let before: DateTime<Utc> = task["updated_at"].as_str().unwrap().parse().unwrap();

    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    send(
        &ctx.app,
        "POST",
        &format!("/v1/tasks/{}/status", task["id"]),
        Some(json!({ "status": "DONE" })),
    )
    .await;

    let (_, fetched) =
        send(&ctx.app, "GET", &format!("/v1/tasks/{}", task["id"]), None).await;
    let after: DateTime<Utc> = fetched["updated_at"].as_str().unwrap().parse().unwrap();

    assert_eq!(fetched["status"], "DONE");
    assert!(after > before);

    ctx.cleanup().await.unwrap();
}

/// Test that a full update overwrites the mutable fields
#[tokio::test]
async fn test_update_task_overwrites_fields() {
    let ctx = TestContext::new().await.unwrap();

    let (_, task) = send(
        &ctx.app,
        "POST",
        "/v1/tasks",
        Some(json!({
            "project_id": ctx.project.id,
            "title": "Old title",
            "priority": "LOW",
        })),
    )
    .await;

    let (status, updated) = send(
        &ctx.app,
        "PUT",
        &format!("/v1/tasks/{}", task["id"]),
        Some(json!({
            "title": "New title",
            "description": "Now with a description",
            "status": "IN_PROGRESS",
            "priority": "HIGH",
            "assignee_id": ctx.user.id,
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "New title");
    assert_eq!(updated["status"], "IN_PROGRESS");
    assert_eq!(updated["priority"], "HIGH");
    assert_eq!(updated["assignee_id"].as_i64(), Some(ctx.user.id));

    ctx.cleanup().await.unwrap();
}

/// Test that deleting a task makes it unreachable, and that deleting an
/// absent id fails instead of silently succeeding
#[tokio::test]
async fn test_delete_task_then_get_is_not_found() {
    let ctx = TestContext::new().await.unwrap();

    let (_, task) = send(
        &ctx.app,
        "POST",
        "/v1/tasks",
        Some(json!({
            "project_id": ctx.project.id,
            "title": "Short-lived task",
        })),
    )
    .await;
    let uri = format!("/v1/tasks/{}", task["id"]);

    let (status, _) = send(&ctx.app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&ctx.app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&ctx.app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    ctx.cleanup().await.unwrap();
}

/// Test that project creation fails for an unknown acting user
#[tokio::test]
async fn test_create_project_unknown_user_is_not_found() {
    let ctx = TestContext::new().await.unwrap();
    let ghost = unique("ghost");

    let (status, _) = send(
        &ctx.app,
        "POST",
        "/v1/projects",
        Some(json!({
            "name": "Nobody's project",
            "username": ghost,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &ctx.app,
        "GET",
        &format!("/v1/projects?username={}", ghost),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    ctx.cleanup().await.unwrap();
}

/// Test that the project listing covers owned and joined projects,
/// deduplicated by project id
#[tokio::test]
async fn test_project_listing_includes_membership_once() {
    let ctx = TestContext::new().await.unwrap();
    let member = ctx.create_user("member").await.unwrap();

    let (status, _) = send(
        &ctx.app,
        "POST",
        &format!("/v1/projects/{}/members", ctx.project.id),
        Some(json!({ "user_id": member.id, "role": "MEMBER" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    // The member sees the project exactly once
    let (_, projects) = send(
        &ctx.app,
        "GET",
        &format!("/v1/projects?username={}", member.username),
        None,
    )
    .await;
    let rows = projects.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"].as_i64(), Some(ctx.project.id));
    assert_eq!(rows[0]["owner_name"].as_str(), Some(ctx.user.username.as_str()));

    // So does the owner, despite also matching the membership join
    let (_, projects) = send(
        &ctx.app,
        "GET",
        &format!("/v1/projects?username={}", ctx.user.username),
        None,
    )
    .await;
    let owned: Vec<_> = projects
        .as_array()
        .unwrap()
        .iter()
        .filter(|p| p["id"].as_i64() == Some(ctx.project.id))
        .collect();
    assert_eq!(owned.len(), 1);

    // Membership removal: once, then 404
    let member_uri = format!("/v1/projects/{}/members/{}", ctx.project.id, member.id);
    let (status, _) = send(&ctx.app, "DELETE", &member_uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&ctx.app, "DELETE", &member_uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(member.id)
        .execute(&ctx.db)
        .await
        .unwrap();
    ctx.cleanup().await.unwrap();
}

/// Test the kanban grouping of a project's tasks
#[tokio::test]
async fn test_kanban_board_groups_by_status() {
    let ctx = TestContext::new().await.unwrap();

    let (_, todo) = send(
        &ctx.app,
        "POST",
        "/v1/tasks",
        Some(json!({ "project_id": ctx.project.id, "title": "Open item" })),
    )
    .await;
    let (_, done) = send(
        &ctx.app,
        "POST",
        "/v1/tasks",
        Some(json!({ "project_id": ctx.project.id, "title": "Closed item", "status": "DONE" })),
    )
    .await;

    let (status, board) = send(
        &ctx.app,
        "GET",
        &format!("/v1/tasks/kanban?project_id={}", ctx.project.id),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(board["project"]["id"].as_i64(), Some(ctx.project.id));
    assert_eq!(board["todo"][0]["id"].as_i64(), todo["id"].as_i64());
    assert_eq!(board["in_progress"].as_array().unwrap().len(), 0);
    assert_eq!(board["done"][0]["id"].as_i64(), done["id"].as_i64());

    ctx.cleanup().await.unwrap();
}

/// Test that search filters are AND-combined and each one narrows
#[tokio::test]
async fn test_search_filters_narrow_results() {
    let ctx = TestContext::new().await.unwrap();

    send(
        &ctx.app,
        "POST",
        "/v1/tasks",
        Some(json!({
            "project_id": ctx.project.id,
            "title": "Fix login redirect",
            "priority": "HIGH",
        })),
    )
    .await;
    send(
        &ctx.app,
        "POST",
        "/v1/tasks",
        Some(json!({
            "project_id": ctx.project.id,
            "title": "Write newsletter",
            "status": "DONE",
            "priority": "LOW",
        })),
    )
    .await;

    let base = format!("/v1/tasks?project_id={}", ctx.project.id);

    let (_, all) = send(&ctx.app, "GET", &base, None).await;
    assert_eq!(all.as_array().unwrap().len(), 2);

    let (_, by_keyword) = send(&ctx.app, "GET", &format!("{}&keyword=login", base), None).await;
    assert_eq!(by_keyword.as_array().unwrap().len(), 1);
    assert_eq!(by_keyword[0]["title"], "Fix login redirect");

    let (_, by_status) = send(&ctx.app, "GET", &format!("{}&status=DONE", base), None).await;
    assert_eq!(by_status.as_array().unwrap().len(), 1);
    assert_eq!(by_status[0]["title"], "Write newsletter");

    let (_, by_priority) = send(&ctx.app, "GET", &format!("{}&priority=HIGH", base), None).await;
    assert_eq!(by_priority.as_array().unwrap().len(), 1);

    let (_, combined) = send(
        &ctx.app,
        "GET",
        &format!("{}&priority=HIGH&status=DONE", base),
        None,
    )
    .await;
    assert_eq!(combined.as_array().unwrap().len(), 0);

    let (status, _) = send(&ctx.app, "GET", &format!("{}&status=STARTED", base), None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    ctx.cleanup().await.unwrap();
}

/// Test the overdue listing: past due, not DONE, assigned to the user
#[tokio::test]
async fn test_overdue_tasks_listing() {
    let ctx = TestContext::new().await.unwrap();
    let yesterday = Utc::now().date_naive().pred_opt().unwrap();

    let (_, overdue) = send(
        &ctx.app,
        "POST",
        "/v1/tasks",
        Some(json!({
            "project_id": ctx.project.id,
            "title": "Missed deadline",
            "assignee_id": ctx.user.id,
            "due_date": yesterday,
        })),
    )
    .await;
    // Finished work is not overdue, no matter the date
    send(
        &ctx.app,
        "POST",
        "/v1/tasks",
        Some(json!({
            "project_id": ctx.project.id,
            "title": "Finished late",
            "status": "DONE",
            "assignee_id": ctx.user.id,
            "due_date": yesterday,
        })),
    )
    .await;

    let (status, tasks) = send(
        &ctx.app,
        "GET",
        &format!("/v1/tasks/overdue?user_id={}", ctx.user.id),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let rows = tasks.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"].as_i64(), overdue["id"].as_i64());

    ctx.cleanup().await.unwrap();
}

/// Test the comment flow: add, list newest first, edit, delete
#[tokio::test]
async fn test_comments_flow() {
    let ctx = TestContext::new().await.unwrap();

    let (_, task) = send(
        &ctx.app,
        "POST",
        "/v1/tasks",
        Some(json!({ "project_id": ctx.project.id, "title": "Discussed task" })),
    )
    .await;
    let comments_uri = format!("/v1/tasks/{}/comments", task["id"]);

    let (status, first) = send(
        &ctx.app,
        "POST",
        &comments_uri,
        Some(json!({ "user_id": ctx.user.id, "content": "First comment" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    send(
        &ctx.app,
        "POST",
        &comments_uri,
        Some(json!({ "user_id": ctx.user.id, "content": "Second comment" })),
    )
    .await;

    let (_, listed) = send(&ctx.app, "GET", &comments_uri, None).await;
    let rows = listed.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["content"], "Second comment");
    assert_eq!(rows[0]["author_username"].as_str(), Some(ctx.user.username.as_str()));

    let (status, edited) = send(
        &ctx.app,
        "PUT",
        &format!("/v1/comments/{}", first["id"]),
        Some(json!({ "content": "First comment, edited" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(edited["content"], "First comment, edited");

    let (status, _) = send(
        &ctx.app,
        "DELETE",
        &format!("/v1/comments/{}", first["id"]),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // Commenting on a missing task is a 404
    let (status, _) = send(
        &ctx.app,
        "POST",
        "/v1/tasks/999999999/comments",
        Some(json!({ "user_id": ctx.user.id, "content": "Lost comment" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    ctx.cleanup().await.unwrap();
}

/// Test the tag flow: create, duplicate conflict, attach, detach
#[tokio::test]
async fn test_tags_flow() {
    let ctx = TestContext::new().await.unwrap();
    let tag_name = unique("tag");

    let (status, tag) = send(
        &ctx.app,
        "POST",
        "/v1/tags",
        Some(json!({ "name": tag_name, "color": "#dc3545" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        &ctx.app,
        "POST",
        "/v1/tags",
        Some(json!({ "name": tag_name, "color": "#ffc107" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, task) = send(
        &ctx.app,
        "POST",
        "/v1/tasks",
        Some(json!({ "project_id": ctx.project.id, "title": "Tagged task" })),
    )
    .await;
    let task_tags_uri = format!("/v1/tasks/{}/tags", task["id"]);

    let (status, _) = send(
        &ctx.app,
        "POST",
        &task_tags_uri,
        Some(json!({ "tag_id": tag["id"] })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, tags) = send(&ctx.app, "GET", &task_tags_uri, None).await;
    assert_eq!(tags.as_array().unwrap().len(), 1);
    assert_eq!(tags[0]["name"].as_str(), Some(tag_name.as_str()));

    let detach_uri = format!("{}/{}", task_tags_uri, tag["id"]);
    let (status, _) = send(&ctx.app, "DELETE", &detach_uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&ctx.app, "DELETE", &detach_uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&ctx.app, "DELETE", &format!("/v1/tags/{}", tag["id"]), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    ctx.cleanup().await.unwrap();
}

/// Test that registering a taken username is a conflict from the store
#[tokio::test]
async fn test_register_duplicate_username_is_conflict() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = send(
        &ctx.app,
        "POST",
        "/v1/users",
        Some(json!({
            "username": ctx.user.username,
            "email": format!("{}@elsewhere.example.com", unique("dup")),
            "password": "Password123!",
            "name": "Impostor",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "conflict");

    ctx.cleanup().await.unwrap();
}

/// Test that responses never leak the stored password hash
#[tokio::test]
async fn test_user_responses_omit_password() {
    let ctx = TestContext::new().await.unwrap();

    let (status, user) = send(
        &ctx.app,
        "GET",
        &format!("/v1/users/{}", ctx.user.id),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(user["username"].as_str(), Some(ctx.user.username.as_str()));
    assert!(user.get("password").is_none());

    ctx.cleanup().await.unwrap();
}

/// Test the password change flow, including a wrong current password
#[tokio::test]
async fn test_change_password_flow() {
    let ctx = TestContext::new().await.unwrap();
    let password_uri = format!("/v1/users/{}/password", ctx.user.id);

    let (status, _) = send(
        &ctx.app,
        "POST",
        &password_uri,
        Some(json!({
            "current_password": "WrongPassword!",
            "new_password": "NewPassword456!",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(
        &ctx.app,
        "POST",
        &password_uri,
        Some(json!({
            "current_password": "Password123!",
            "new_password": "NewPassword456!",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    ctx.cleanup().await.unwrap();
}
