//! Integration tests for directory endpoints.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();
    let response = app.request("GET", "/api/health", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["status"], "ok");
    assert_eq!(response.data()["backend"], "memory");
    assert_eq!(response.data()["database"], "up");
}

#[tokio::test]
async fn test_create_child_then_list_children() {
    let app = TestApp::new();
    let root = app.create_root("P").await;

    let response = app
        .request(
            "POST",
            &format!("/api/directories/{root}/children"),
            Some(json!({ "name": "Reports" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.data(), "SUCCESS");

    let children = app
        .request("GET", &format!("/api/directories/{root}/children"), None)
        .await;
    assert_eq!(children.status, StatusCode::OK);
    assert_eq!(children.names(), vec!["Reports".to_string()]);
}

#[tokio::test]
async fn test_create_child_under_missing_parent_is_not_found() {
    let app = TestApp::new();
    let response = app
        .request(
            "POST",
            "/api/directories/404/children",
            Some(json!({ "name": "Orphan" })),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "NOT_FOUND");
    assert_eq!(app.store.directory_count().await, 0);
}

#[tokio::test]
async fn test_empty_name_is_rejected() {
    let app = TestApp::new();
    let response = app
        .request("POST", "/api/directories", Some(json!({ "name": "" })))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_get_unknown_directory_is_not_found() {
    let app = TestApp::new();
    let response = app.request("GET", "/api/directories/77", None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_rename_then_get() {
    let app = TestApp::new();
    let root = app.create_root("Old").await;

    let response = app
        .request(
            "PUT",
            &format!("/api/directories/{root}"),
            Some(json!({ "name": "New" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data(), "SUCCESS");

    let fetched = app
        .request("GET", &format!("/api/directories/{root}"), None)
        .await;
    assert_eq!(fetched.data()["name"], "New");
    assert_eq!(fetched.data()["deleted"], false);
}

#[tokio::test]
async fn test_remove_hides_subtree() {
    let app = TestApp::new();
    let root = app.create_root("Root").await;
    app.seed(&[], &[1], &[]).await;
    let project = app.create_project_dir(1, root, "Project").await;
    app.request(
        "POST",
        &format!("/api/directories/{project}/children"),
        Some(json!({ "name": "Nested" })),
    )
    .await;

    let response = app
        .request("DELETE", &format!("/api/directories/{project}"), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data(), "SUCCESS");

    let all = app.request("GET", "/api/directories", None).await;
    assert_eq!(all.names(), vec!["Root".to_string()]);

    let children = app
        .request("GET", &format!("/api/directories/{root}/children"), None)
        .await;
    assert!(children.names().is_empty());

    let raw = app.store.raw_directory(project).await.expect("row kept");
    assert!(raw.deleted);

    let again = app
        .request("DELETE", &format!("/api/directories/{project}"), None)
        .await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_tree_nests_children() {
    let app = TestApp::new();
    let root = app.create_root("Root").await;
    for name in ["A", "B"] {
        app.request(
            "POST",
            &format!("/api/directories/{root}/children"),
            Some(json!({ "name": name })),
        )
        .await;
    }

    let response = app
        .request("GET", &format!("/api/directories/{root}/tree"), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["name"], "Root");
    assert_eq!(response.data()["child_count"], 2);
    assert_eq!(response.data()["children"][0]["name"], "A");
}

#[tokio::test]
async fn test_project_directory_requires_known_project() {
    let app = TestApp::new();
    let root = app.create_root("Root").await;

    let response = app
        .request(
            "POST",
            "/api/projects/9/directories",
            Some(json!({ "name": "Ghost", "parent_id": root })),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(app.store.directory_count().await, 1);
}

#[tokio::test]
async fn test_second_project_directory_conflicts() {
    let app = TestApp::new();
    app.seed(&[], &[3], &[]).await;
    let root = app.create_root("Root").await;
    app.create_project_dir(3, root, "First").await;

    let response = app
        .request(
            "POST",
            "/api/projects/3/directories",
            Some(json!({ "name": "Second", "parent_id": root })),
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_task_directory_lands_under_project_directory() {
    let app = TestApp::new();
    app.seed(&[], &[9], &[5]).await;
    let root = app.create_root("Root").await;
    let project = app.create_project_dir(9, root, "Project").await;

    let response = app
        .request(
            "POST",
            "/api/projects/9/tasks/5/directories",
            Some(json!({ "name": "TaskDocs" })),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["parent_id"], project.get());
    assert_eq!(response.data()["task_id"], 5);
    assert!(response.data()["project_id"].is_null());
}

#[tokio::test]
async fn test_task_directory_without_project_directory_is_not_found() {
    let app = TestApp::new();
    app.seed(&[], &[9], &[5]).await;

    let response = app
        .request(
            "POST",
            "/api/projects/9/tasks/5/directories",
            Some(json!({ "name": "TaskDocs" })),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(app.store.directory_count().await, 0);
}

#[tokio::test]
async fn test_non_numeric_id_answers_error_body() {
    let app = TestApp::new();
    let response = app.request("GET", "/api/directories/abc", None).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
    assert!(response.body["message"].is_string());
}

#[tokio::test]
async fn test_body_missing_name_answers_error_body() {
    let app = TestApp::new();
    let response = app
        .request("POST", "/api/directories", Some(json!({ "title": "Root" })))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_missing_parent_reported_before_project_conflict() {
    let app = TestApp::new();
    app.seed(&[], &[9], &[]).await;
    let root = app.create_root("Root").await;
    app.create_project_dir(9, root, "Project").await;

    let response = app
        .request(
            "POST",
            "/api/projects/9/directories",
            Some(json!({ "name": "Again", "parent_id": 999 })),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
