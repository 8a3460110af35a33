//! Integration tests for directory authority endpoints.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_assign_and_list_for_user() {
    let app = TestApp::new();
    app.seed(&[1, 2], &[], &[]).await;
    let root = app.create_root("Shared").await;

    let response = app
        .request(
            "POST",
            &format!("/api/directories/{root}/authorities"),
            Some(json!([{ "user_id": 1 }, { "user_id": 2 }])),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data(), "SUCCESS");

    let all = app.request("GET", "/api/directories/authorities", None).await;
    assert_eq!(all.status, StatusCode::OK);
    assert_eq!(all.data().as_array().map(Vec::len), Some(2));

    let mine = app.request("GET", "/api/users/2/directories", None).await;
    assert_eq!(mine.status, StatusCode::OK);
    let grants = mine.data().as_array().cloned().unwrap_or_default();
    assert_eq!(grants.len(), 1);
    assert_eq!(grants[0]["user_id"], 2);
    assert_eq!(grants[0]["directory"]["name"], "Shared");
}

#[tokio::test]
async fn test_assign_with_unknown_user_persists_nothing() {
    let app = TestApp::new();
    app.seed(&[1], &[], &[]).await;
    let root = app.create_root("Shared").await;

    let response = app
        .request(
            "POST",
            &format!("/api/directories/{root}/authorities"),
            Some(json!([{ "user_id": 1 }, { "user_id": 99 }])),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(app.store.grant_count().await, 0);
}

#[tokio::test]
async fn test_assign_to_missing_directory_is_not_found() {
    let app = TestApp::new();
    app.seed(&[1], &[], &[]).await;

    let response = app
        .request(
            "POST",
            "/api/directories/12/authorities",
            Some(json!([{ "user_id": 1 }])),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_removed_directory_drops_grants() {
    let app = TestApp::new();
    app.seed(&[4], &[], &[]).await;
    let root = app.create_root("Temp").await;
    app.request(
        "POST",
        &format!("/api/directories/{root}/authorities"),
        Some(json!([{ "user_id": 4 }])),
    )
    .await;

    app.request("DELETE", &format!("/api/directories/{root}"), None)
        .await;

    let mine = app.request("GET", "/api/users/4/directories", None).await;
    assert_eq!(mine.status, StatusCode::OK);
    assert_eq!(mine.data().as_array().map(Vec::len), Some(0));
}
