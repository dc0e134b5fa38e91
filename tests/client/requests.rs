use axum::body::Bytes;
use axum::extract::Path;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use blogkv::client::MERGE_PATCH_CONTENT_TYPE;
use blogkv::{ApiClient, NewPost, PostPatch};
use serde_json::{json, Value};

use crate::support::{start_stub, Captured};

fn capturing_stub(captured: Captured) -> Router {
    let on_get = captured.clone();
    let on_post = captured.clone();
    let on_patch = captured;

    Router::new()
        .route(
            "/api/posts",
            get(move |headers: HeaderMap| {
                let captured = on_get.clone();
                async move {
                    captured.record(&headers, String::new());
                    Json(json!({ "items": [
                        { "id": "p1", "title": "A", "body": "x", "publishdAt": null, "tags": ["go"] },
                        { "id": "p2", "title": "B", "body": "y", "publishdAt": "2025-01-01T00:00:00Z" }
                    ] }))
                }
            })
            .post(move |headers: HeaderMap, body: Bytes| {
                let captured = on_post.clone();
                async move {
                    captured.record(&headers, String::from_utf8_lossy(&body).into_owned());
                    let mut post: Value = serde_json::from_slice(&body).unwrap();
                    post["id"] = json!("new-1");
                    (StatusCode::CREATED, Json(post))
                }
            }),
        )
        .route(
            "/api/posts/:id",
            axum::routing::patch(move |Path(id): Path<String>, headers: HeaderMap, body: Bytes| {
                let captured = on_patch.clone();
                async move {
                    captured.record(&headers, String::from_utf8_lossy(&body).into_owned());
                    Json(json!({ "id": id, "title": "Patched", "body": "x", "publishdAt": null }))
                }
            })
            .delete(|| async { StatusCode::NO_CONTENT }),
        )
        .route(
            "/api/posts/:id/analyze",
            post(|Path(id): Path<String>| async move {
                Json(json!({ "id": id, "analysis": format!("Analysis for post {id}") }))
            }),
        )
}

#[tokio::test]
async fn list_decodes_items() {
    let captured = Captured::default();
    let origin = start_stub(capturing_stub(captured.clone())).await;

    let list = ApiClient::browser(&origin).unwrap().list_posts().await.unwrap();
    assert_eq!(list.items.len(), 2);
    assert_eq!(list.items[0].tags(), ["go"]);
    assert!(list.items[0].is_draft());
    assert_eq!(
        list.items[1].published_at.as_deref(),
        Some("2025-01-01T00:00:00Z")
    );
    assert_eq!(captured.header("cache-control"), None);
}

#[tokio::test]
async fn server_profile_disables_caching() {
    let captured = Captured::default();
    let origin = start_stub(capturing_stub(captured.clone())).await;

    ApiClient::server(&origin).unwrap().list_posts().await.unwrap();
    assert_eq!(captured.header("cache-control").as_deref(), Some("no-store"));
}

#[tokio::test]
async fn create_sends_trimmed_post() {
    let captured = Captured::default();
    let origin = start_stub(capturing_stub(captured.clone())).await;

    let created = ApiClient::browser(&origin)
        .unwrap()
        .create_post(NewPost::new("  Hello  ", "\nWorld\n"))
        .await
        .unwrap();
    assert_eq!(created.id, "new-1");
    assert_eq!(created.title, "Hello");

    let sent: Value = serde_json::from_str(&captured.body().unwrap()).unwrap();
    assert_eq!(sent["title"], "Hello");
    assert_eq!(sent["body"], "World");
    assert!(sent.get("id").is_none());
}

#[tokio::test]
async fn update_uses_merge_patch() {
    let captured = Captured::default();
    let origin = start_stub(capturing_stub(captured.clone())).await;

    let patch = PostPatch::new().title("Patched").unpublish();
    let updated = ApiClient::browser(&origin)
        .unwrap()
        .update_post("p1", &patch)
        .await
        .unwrap();
    assert_eq!(updated.title, "Patched");

    assert_eq!(
        captured.header("content-type").as_deref(),
        Some(MERGE_PATCH_CONTENT_TYPE)
    );
    let sent: Value = serde_json::from_str(&captured.body().unwrap()).unwrap();
    assert_eq!(sent, json!({ "title": "Patched", "publishdAt": null }));
}

#[tokio::test]
async fn delete_and_analyze() {
    let origin = start_stub(capturing_stub(Captured::default())).await;
    let client = ApiClient::server(&origin).unwrap();

    client.delete_post("p1").await.unwrap();

    let result = client.analyze_post("p1").await.unwrap();
    assert_eq!(result.id, "p1");
    assert_eq!(result.analysis, "Analysis for post p1");
}
