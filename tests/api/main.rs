//! Round trips through the axum server with the REST client.

#![cfg(all(feature = "http", feature = "client"))]

use std::sync::Arc;

use blogkv::server;
use blogkv::view::detail_page_from_api;
use blogkv::{ApiClient, ApiError, InMemoryKvStore, NewPost, Post, PostPatch, PostQuery};

async fn start_server(query: Arc<PostQuery<InMemoryKvStore>>) -> String {
    let app = server::router(query);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn seeded_query() -> Arc<PostQuery<InMemoryKvStore>> {
    let query = PostQuery::new(InMemoryKvStore::new());
    query
        .put_post(&Post::new("p1", "A", "# Hello\n\nworld").with_tags(["go", "rust"]))
        .unwrap();
    query
        .put_post(&Post::new("p2", "B", "y").with_tags(["go"]))
        .unwrap();
    Arc::new(query)
}

#[tokio::test]
async fn health_check() {
    let base = start_server(seeded_query()).await;
    let resp = reqwest::get(format!("{base}/health")).await.unwrap();
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["ok"], true);
}

#[tokio::test]
async fn list_and_get() {
    let base = start_server(seeded_query()).await;
    let client = ApiClient::server(&base).unwrap();

    let ids: Vec<String> = client
        .list_posts()
        .await
        .unwrap()
        .items
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(ids, vec!["p1", "p2"]);

    let post = client.get_post("p1").await.unwrap();
    assert_eq!(post.tags(), ["go", "rust"]);
    assert!(client.get_post("p404").await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn create_update_delete() {
    let query = seeded_query();
    let base = start_server(Arc::clone(&query)).await;
    let client = ApiClient::browser(&base).unwrap();

    let created = client
        .create_post(NewPost::new(" New post ", "Body"))
        .await
        .unwrap();
    assert_eq!(created.title, "New post");
    assert!(!created.id.is_empty());
    assert_eq!(query.get_post(&created.id).unwrap(), Some(created.clone()));

    let published = client
        .update_post(&created.id, &PostPatch::new().publish_at("2025-06-01T00:00:00Z"))
        .await
        .unwrap();
    assert_eq!(published.title, "New post");
    assert!(!published.is_draft());

    let drafted = client
        .update_post(&created.id, &PostPatch::new().unpublish())
        .await
        .unwrap();
    assert!(drafted.is_draft());

    client.delete_post(&created.id).await.unwrap();
    assert_eq!(query.get_post(&created.id).unwrap(), None);

    // Browser profile: 404 is a generic status error.
    let err = client.delete_post(&created.id).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.to_string(), "API Error: post not found");
}

#[tokio::test]
async fn server_rejects_invalid_posts() {
    let base = start_server(seeded_query()).await;
    let long_title = "x".repeat(101);

    let resp = reqwest::Client::new()
        .post(format!("{base}/api/posts"))
        .json(&serde_json::json!({ "title": long_title, "body": "b" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["code"], 400);
    assert!(body["message"].as_str().unwrap().starts_with("title:"));

    let resp = reqwest::Client::new()
        .post(format!("{base}/api/posts"))
        .body("not json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn server_trims_created_posts() {
    let query = seeded_query();
    let base = start_server(Arc::clone(&query)).await;

    let resp = reqwest::Client::new()
        .post(format!("{base}/api/posts"))
        .json(&serde_json::json!({ "title": "  Spaced  ", "body": "\n body \n" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let created: Post = resp.json().await.unwrap();
    assert_eq!(created.title, "Spaced");
    assert_eq!(created.body, "body");

    let stored = query.get_post(&created.id).unwrap().unwrap();
    assert_eq!(stored.title, "Spaced");
    assert_eq!(stored.body, "body");
}

#[tokio::test]
async fn patch_can_clear_tags() {
    let base = start_server(seeded_query()).await;
    let client = ApiClient::server(&base).unwrap();

    let updated = client
        .update_post("p1", &PostPatch::new().clear_tags())
        .await
        .unwrap();
    assert!(updated.tags.is_none());
    assert_eq!(updated.title, "A");
}

#[tokio::test]
async fn analyze() {
    let base = start_server(seeded_query()).await;
    let client = ApiClient::server(&base).unwrap();

    let result = client.analyze_post("p2").await.unwrap();
    assert_eq!(result.id, "p2");
    assert_eq!(result.analysis, "Analysis for post p2: This is a sample analysis.");

    assert!(matches!(
        client.analyze_post("p404").await,
        Err(ApiError::NotFound(_))
    ));
}

#[tokio::test]
async fn detail_page_over_api() {
    let base = start_server(seeded_query()).await;
    let client = ApiClient::server(&base).unwrap();

    let detail = detail_page_from_api(&client, "p1").await.unwrap();
    assert_eq!(detail.body_html, "<h1>Hello</h1>\n<p>world</p>\n");
    assert_eq!(detail.publication, "Draft");

    assert!(detail_page_from_api(&client, "p404")
        .await
        .unwrap_err()
        .is_not_found());
}

#[tokio::test]
async fn serve_stops_on_shutdown() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let (stop, stopped) = tokio::sync::oneshot::channel::<()>();

    let handle = tokio::spawn(server::serve(seeded_query(), listener, async move {
        let _ = stopped.await;
    }));

    let client = ApiClient::server(&base).unwrap();
    assert_eq!(client.list_posts().await.unwrap().items.len(), 2);
    drop(client);

    stop.send(()).unwrap();
    handle.await.unwrap().unwrap();
}
