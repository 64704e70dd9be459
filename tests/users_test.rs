//! Profile endpoint tests

mod common;

use axum::http::StatusCode;
use common::*;
use pretty_assertions::assert_eq;
use serde_json::json;

#[tokio::test]
async fn test_get_user() {
    let app = TestApp::new().await;
    let alice = app.signup("alice", "Alice", "Liddell").await;
    let bob = app.signup("bob", "Bob", "Builder").await;

    let (status, body) = read_json(app.get(&format!("/api/v1/users/{}", bob.id), Some(&alice.token)).await).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["login"], "bob");
    assert_eq!(body["lastName"], "Builder");

    assert_error(app.get("/api/v1/users/999", Some(&alice.token)).await, StatusCode::NOT_FOUND).await;
    assert_error(app.get("/api/v1/users/abc", Some(&alice.token)).await, StatusCode::BAD_REQUEST).await;
}

#[tokio::test]
async fn test_update_own_profile() {
    let app = TestApp::new().await;
    let alice = app.signup("alice", "Alice", "Liddell").await;

    let update = json!({
        "id": alice.id,
        "login": "alice",
        "firstName": "Alice",
        "lastName": "Kingsleigh",
        "birthDay": "1991-02-03",
        "interests": "croquet",
        "city": "London",
    });
    let (status, body) = read_json(app.put("/api/v1/users", Some(&alice.token), update).await).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["lastName"], "Kingsleigh");

    let (_, me) = read_json(app.get("/api/v1/current-user", Some(&alice.token)).await).await;
    assert_eq!(me["lastName"], "Kingsleigh");
    assert_eq!(me["birthDay"], "1991-02-03");
    assert_eq!(me["interests"], "croquet");
    assert_eq!(me["city"], "London");
}

#[tokio::test]
async fn test_update_other_profile_forbidden() {
    let app = TestApp::new().await;
    let alice = app.signup("alice", "Alice", "Liddell").await;
    let bob = app.signup("bob", "Bob", "Builder").await;

    let update = json!({
        "id": bob.id,
        "login": "bob",
        "firstName": "Robert",
        "lastName": "Builder",
        "birthDay": "1990-01-01",
    });
    let response = app.put("/api/v1/users", Some(&alice.token), update).await;
    let body = assert_error(response, StatusCode::FORBIDDEN).await;
    assert_eq!(body["error"], "forbidden request");

    let (_, stored) = read_json(app.get(&format!("/api/v1/users/{}", bob.id), Some(&bob.token)).await).await;
    assert_eq!(stored["firstName"], "Bob");
}

#[tokio::test]
async fn test_update_cannot_change_login() {
    let app = TestApp::new().await;
    let alice = app.signup("alice", "Alice", "Liddell").await;

    let update = json!({
        "id": alice.id,
        "login": "queen",
        "firstName": "Alice",
        "lastName": "Liddell",
        "birthDay": "1990-01-01",
    });
    assert_error(
        app.put("/api/v1/users", Some(&alice.token), update).await,
        StatusCode::BAD_REQUEST,
    )
    .await;
}

#[tokio::test]
async fn test_delete_other_user_forbidden() {
    let app = TestApp::new().await;
    let alice = app.signup("alice", "Alice", "Liddell").await;
    let bob = app.signup("bob", "Bob", "Builder").await;

    let response = app
        .delete(&format!("/api/v1/users/{}", bob.id), Some(&alice.token), None)
        .await;
    assert_error(response, StatusCode::FORBIDDEN).await;

    let (status, _) = read_json(app.get(&format!("/api/v1/users/{}", bob.id), Some(&bob.token)).await).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_delete_own_account() {
    let app = TestApp::new().await;
    let alice = app.signup("alice", "Alice", "Liddell").await;
    let bob = app.signup("bob", "Bob", "Builder").await;

    let (status, body) = read_json(
        app.delete(&format!("/api/v1/users/{}", alice.id), Some(&alice.token), None)
            .await,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, serde_json::Value::Null);

    assert_error(
        app.get(&format!("/api/v1/users/{}", alice.id), Some(&bob.token)).await,
        StatusCode::NOT_FOUND,
    )
    .await;
    let (_, exists) = read_json(app.get("/signup/alice", None).await).await;
    assert_eq!(exists["exists"], false);
}

#[tokio::test]
async fn test_search_users() {
    let app = TestApp::new().await;
    let alice = app.signup("alice", "Alice", "Liddell").await;
    app.signup("bob", "Bob", "Builder").await;
    app.signup("carol", "Carol", "Bishop").await;

    let (status, body) = read_json(app.get("/api/v1/users?search=b", Some(&alice.token)).await).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![2, 3]);
    assert_eq!(body[0]["isNew"], true);
    assert!(body[0].get("login").is_none());

    let (_, all) = read_json(app.get("/api/v1/users", Some(&alice.token)).await).await;
    assert_eq!(ids(&all), vec![1, 2, 3]);

    let (_, literal) = read_json(app.get("/api/v1/users?search=%25", Some(&alice.token)).await).await;
    assert_eq!(ids(&literal), Vec::<i64>::new());
}
