//! End-to-end tests for the JSON API, driven through the router against an
//! in-memory store.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use community_api::{AppStateInner, router};
use community_db::Database;

fn app() -> Router {
    let state = Arc::new(AppStateInner {
        db: Database::open_in_memory().unwrap(),
        static_root: PathBuf::from("."),
    });
    router(state)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, String) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn create(app: &Router, uri: &str, body: Value) -> Value {
    let (status, text) = send(app, Method::POST, uri, Some(&body.to_string())).await;
    assert_eq!(status, StatusCode::CREATED, "body: {text}");
    serde_json::from_str(&text).unwrap()
}

async fn list(app: &Router, uri: &str) -> Vec<Value> {
    let (status, text) = send(app, Method::GET, uri, None).await;
    assert_eq!(status, StatusCode::OK);
    serde_json::from_str(&text).unwrap()
}

#[tokio::test]
async fn empty_collections_list_as_empty_arrays() {
    let app = app();
    for uri in ["/api/posts", "/api/projects", "/api/roles"] {
        assert!(list(&app, uri).await.is_empty(), "{uri}");
    }
}

#[tokio::test]
async fn created_post_is_listed_first() {
    let app = app();
    create(
        &app,
        "/api/posts",
        json!({ "title": "Older", "category": "General", "body": "x", "createdAt": "2020-01-01T00:00:00+00:00" }),
    )
    .await;

    let post = create(&app, "/api/posts", json!({ "title": "Hello", "category": "General", "body": "World" })).await;
    assert_eq!(post["title"], "Hello");
    assert_eq!(post["category"], "General");
    assert_eq!(post["body"], "World");
    assert_eq!(post["votes"], 0);
    assert!(!post["id"].as_str().unwrap().is_empty());

    let posts = list(&app, "/api/posts").await;
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0], post);
    assert_eq!(posts[1]["title"], "Older");
}

#[tokio::test]
async fn server_assigned_created_at_is_not_before_the_request() {
    let app = app();
    let before = chrono::Utc::now().timestamp();

    let post = create(&app, "/api/posts", json!({ "title": "t", "category": "c", "body": "b" })).await;
    let created = chrono::DateTime::parse_from_rfc3339(post["createdAt"].as_str().unwrap()).unwrap();
    assert!(created.timestamp() >= before);
}

#[tokio::test]
async fn client_created_at_is_stored_verbatim() {
    let app = app();
    let project = create(
        &app,
        "/api/projects",
        json!({ "title": "Atlas", "description": "Maps", "createdAt": "sometime in spring" }),
    )
    .await;
    assert_eq!(project["createdAt"], "sometime in spring");
}

#[tokio::test]
async fn ids_are_distinct_per_resource() {
    let app = app();
    let mut ids = HashSet::new();
    for i in 0..20 {
        let role = create(
            &app,
            "/api/roles",
            json!({ "role": format!("Role {i}"), "project": "Atlas", "contact": "dev@example.com" }),
        )
        .await;
        assert!(ids.insert(role["id"].as_str().unwrap().to_string()));
    }
}

#[tokio::test]
async fn client_id_and_votes_are_ignored() {
    let app = app();
    let post = create(
        &app,
        "/api/posts",
        json!({ "id": "mine", "votes": 100, "title": "t", "category": "c", "body": "b" }),
    )
    .await;
    assert_ne!(post["id"], "mine");
    assert_eq!(post["votes"], 0);
}

#[tokio::test]
async fn missing_title_is_rejected_without_a_row() {
    let app = app();

    let (status, text) = send(&app, Method::POST, "/api/posts", Some(r#"{"title": "  ", "category": "c", "body": "b"}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(text, "title is required");

    let (status, text) = send(&app, Method::POST, "/api/posts", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(text, "title is required");

    assert!(list(&app, "/api/posts").await.is_empty());
}

#[tokio::test]
async fn validation_reports_fields_in_order() {
    let app = app();

    let (status, text) = send(&app, Method::POST, "/api/projects", Some(r#"{"tech": "Rust"}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(text, "title is required");

    let (_, text) = send(&app, Method::POST, "/api/roles", Some(r#"{"role": "Dev", "contact": "x"}"#)).await;
    assert_eq!(text, "project is required");
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let app = app();
    for uri in ["/api/posts", "/api/projects", "/api/roles"] {
        let (status, text) = send(&app, Method::POST, uri, Some("{not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(text, "Invalid JSON body");
    }

    let (status, _) = send(&app, Method::POST, "/api/posts", Some("[]")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn sequential_upvotes_accumulate() {
    let app = app();
    let post = create(&app, "/api/posts", json!({ "title": "t", "category": "c", "body": "b" })).await;
    let uri = format!("/api/posts/{}/upvote", post["id"].as_str().unwrap());

    let (status, text) = send(&app, Method::POST, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_str::<Value>(&text).unwrap()["votes"], 1);

    let (_, text) = send(&app, Method::POST, &uri, None).await;
    let updated: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(updated["votes"], 2);
    assert_eq!(updated["id"], post["id"]);
    assert_eq!(updated["createdAt"], post["createdAt"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_upvotes_are_not_lost() {
    let app = app();
    let post = create(&app, "/api/posts", json!({ "title": "t", "category": "c", "body": "b" })).await;
    let uri = format!("/api/posts/{}/upvote", post["id"].as_str().unwrap());

    let (a, b) = tokio::join!(
        send(&app, Method::POST, &uri, None),
        send(&app, Method::POST, &uri, None)
    );
    assert_eq!(a.0, StatusCode::OK);
    assert_eq!(b.0, StatusCode::OK);

    let mut seen: Vec<i64> = [a.1, b.1]
        .iter()
        .map(|t| serde_json::from_str::<Value>(t).unwrap()["votes"].as_i64().unwrap())
        .collect();
    seen.sort();
    assert_eq!(seen, vec![1, 2]);

    let posts = list(&app, "/api/posts").await;
    assert_eq!(posts[0]["votes"], 2);
}

#[tokio::test]
async fn upvote_of_unknown_post_is_not_found() {
    let app = app();
    let (status, text) = send(&app, Method::POST, "/api/posts/nope/upvote", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(text, "Not found");
}

#[tokio::test]
async fn delete_then_delete_again() {
    let app = app();
    let project = create(&app, "/api/projects", json!({ "title": "Atlas", "description": "Maps" })).await;
    let uri = format!("/api/projects/{}", project["id"].as_str().unwrap());

    let (status, text) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(text.is_empty());

    assert!(list(&app, "/api/projects").await.is_empty());

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_unknown_ids_is_not_found() {
    let app = app();
    for uri in ["/api/posts/ghost", "/api/projects/ghost", "/api/roles/ghost"] {
        let (status, _) = send(&app, Method::DELETE, uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
    }
}

#[tokio::test]
async fn role_project_is_free_text() {
    let app = app();
    let role = create(
        &app,
        "/api/roles",
        json!({ "role": "Designer", "project": "Does Not Exist", "contact": "@me", "skills": "Figma" }),
    )
    .await;
    assert_eq!(role["project"], "Does Not Exist");
    assert_eq!(role["duration"], "");
    assert_eq!(role["notes"], "");

    let uri = format!("/api/roles/{}", role["id"].as_str().unwrap());
    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(list(&app, "/api/roles").await.is_empty());
}

#[tokio::test]
async fn trailing_slashes_are_tolerated() {
    let app = app();
    create(&app, "/api/roles/", json!({ "role": "Dev", "project": "Atlas", "contact": "x" })).await;
    assert_eq!(list(&app, "/api/roles/").await.len(), 1);

    let post = create(&app, "/api/posts/", json!({ "title": "t", "category": "c", "body": "b" })).await;
    let id = post["id"].as_str().unwrap();

    let (status, _) = send(&app, Method::POST, &format!("/api/posts/{id}/upvote/"), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, Method::DELETE, &format!("/api/posts/{id}/"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn ids_are_percent_decoded() {
    let app = app();
    let (status, _) = send(&app, Method::DELETE, "/api/posts/a%20b", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let post = create(&app, "/api/posts", json!({ "title": "t", "category": "c", "body": "b" })).await;
    let encoded = post["id"].as_str().unwrap().replace('-', "%2D");
    let (status, _) = send(&app, Method::DELETE, &format!("/api/posts/{encoded}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn unmatched_api_routes_are_not_found() {
    let app = app();
    let cases = [
        (Method::GET, "/api/unknown"),
        (Method::GET, "/api/posts/some-id"),
        (Method::POST, "/api/unknown"),
        (Method::POST, "/api/posts/some-id"),
        (Method::DELETE, "/api/posts"),
        (Method::DELETE, "/api/posts/some-id/upvote"),
        (Method::PUT, "/api/roles"),
        (Method::POST, "/community.html"),
    ];

    for (method, uri) in cases {
        let (status, text) = send(&app, method.clone(), uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{method} {uri}");
        assert_eq!(text, "Not found");
    }
}
