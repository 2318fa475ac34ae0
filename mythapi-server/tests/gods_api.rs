//! End-to-end HTTP tests: router + seeded in-memory store

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use mythapi_server::models::{God, Mythology};
use mythapi_server::{build_router, AppState, ServerConfig, Store};

async fn app() -> Router {
    let store = Store::open_in_memory().await.expect("open store");
    store.seed().await.expect("seed store");
    build_router(AppState::new(&store), &ServerConfig::default())
}

async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            request = request.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

async fn gods(app: &Router) -> Vec<God> {
    let (status, body) = call(app, "GET", "/api/v1/gods", None).await;
    assert_eq!(status, StatusCode::OK);
    serde_json::from_slice(&body).unwrap()
}

async fn mythology_id(app: &Router, name: &str) -> i64 {
    let (_, body) = call(app, "GET", "/api/v1/mythologies", None).await;
    let mythologies: Vec<Mythology> = serde_json::from_slice(&body).unwrap();
    mythologies
        .into_iter()
        .find(|m| m.name == name)
        .map(|m| m.id)
        .unwrap()
}

#[tokio::test]
async fn health_endpoint() {
    let app = app().await;
    let (status, body) = call(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["mythologies"], 3);
}

#[tokio::test]
async fn list_gods_uses_camel_case() {
    let app = app().await;
    let (status, body) = call(&app, "GET", "/api/v1/gods", None).await;

    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_slice(&body).unwrap();
    let first = &body[0];
    assert_eq!(first["name"], "Odin");
    assert!(first["mythologyId"].is_i64());
    assert_eq!(first["aliases"][0]["godId"], first["id"]);
}

#[tokio::test]
async fn get_god_by_id() {
    let app = app().await;

    let (status, body) = call(&app, "GET", "/api/v1/gods/1", None).await;
    assert_eq!(status, StatusCode::OK);
    let god: God = serde_json::from_slice(&body).unwrap();
    assert_eq!(god.name, "Odin");

    let (status, _) = call(&app, "GET", "/api/v1/gods/0", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = call(&app, "GET", "/api/v1/gods/404", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn search_by_alias() {
    let app = app().await;

    let (status, body) = call(
        &app,
        "GET",
        "/api/v1/gods/search/Woden?includeAliases=true",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let found: Vec<God> = serde_json::from_slice(&body).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Odin");

    let (status, body) = call(&app, "GET", "/api/v1/gods/search/Woden", None).await;
    assert_eq!(status, StatusCode::OK);
    let found: Vec<God> = serde_json::from_slice(&body).unwrap();
    assert!(found.is_empty());

    let (status, _) = call(&app, "GET", "/api/v1/gods/search/%20", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn post_creates_god() {
    let app = app().await;
    let greek = mythology_id(&app, "Greek").await;

    let (status, body) = call(
        &app,
        "POST",
        "/api/v1/gods",
        Some(serde_json::json!([
            {"name": "Hercules", "description": "Divine hero", "mythologyId": greek}
        ])),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let created: Vec<God> = serde_json::from_slice(&body).unwrap();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].name, "Hercules");
    assert_eq!(created[0].mythology_id, greek);

    let all = gods(&app).await;
    assert!(all.iter().any(|g| g.id == created[0].id && g.name == "Hercules"));
}

#[tokio::test]
async fn post_rejects_bad_batches() {
    let app = app().await;

    let (status, _) = call(&app, "POST", "/api/v1/gods", Some(serde_json::json!([]))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = call(
        &app,
        "POST",
        "/api/v1/gods",
        Some(serde_json::json!([
            {"name": "Ra", "description": "Sun god", "mythologyId": 77}
        ])),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["error"], "validation_error");

    let (status, _) = call(
        &app,
        "POST",
        "/api/v1/gods",
        Some(serde_json::json!([{"name": "  ", "mythologyId": 1}])),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(gods(&app).await.len(), 20);
}

#[tokio::test]
async fn post_updates_existing_god_by_id() {
    let app = app().await;

    let (status, body) = call(
        &app,
        "POST",
        "/api/v1/gods",
        Some(serde_json::json!([
            {"id": 4, "name": "Frigg", "description": "Queen of Asgard", "mythologyId": 1}
        ])),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let updated: Vec<God> = serde_json::from_slice(&body).unwrap();
    assert_eq!(updated[0].id, 4);
    assert_eq!(updated[0].description, "Queen of Asgard");

    assert_eq!(gods(&app).await.len(), 20);
}

#[tokio::test]
async fn delete_by_id_then_not_found() {
    let app = app().await;

    let (status, body) = call(&app, "DELETE", "/api/v1/gods/5", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());

    let (status, _) = call(&app, "DELETE", "/api/v1/gods/5", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call(&app, "DELETE", "/api/v1/gods/0", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(gods(&app).await.len(), 19);
}

#[tokio::test]
async fn delete_all_leaves_mythologies() {
    let app = app().await;

    let (status, _) = call(&app, "DELETE", "/api/v1/gods", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(gods(&app).await.is_empty());

    let (status, body) = call(&app, "GET", "/api/v1/mythologies", None).await;
    assert_eq!(status, StatusCode::OK);
    let mythologies: Vec<Mythology> = serde_json::from_slice(&body).unwrap();
    assert_eq!(mythologies.len(), 3);

    let (status, _) = call(&app, "DELETE", "/api/v1/gods", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn mythology_by_id() {
    let app = app().await;
    let norse = mythology_id(&app, "Norse").await;

    let (status, body) = call(&app, "GET", &format!("/api/v1/mythologies/{}", norse), None).await;
    assert_eq!(status, StatusCode::OK);
    let mythology: Mythology = serde_json::from_slice(&body).unwrap();
    assert_eq!(mythology.name, "Norse");
    assert_eq!(mythology.gods.len(), 6);

    let (status, _) = call(&app, "GET", "/api/v1/mythologies/99", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn upsert_missing_mythology_field_is_json_400() {
    let app = app().await;
    let before = gods(&app).await.len();

    let (status, body) = call(
        &app,
        "POST",
        "/api/v1/gods",
        Some(serde_json::json!([{ "name": "Hercules", "description": "Hero" }])),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["error"], "validation_error");
    assert!(body["message"].as_str().unwrap().contains("mythologyId"));
    assert_eq!(gods(&app).await.len(), before);
}

#[tokio::test]
async fn search_with_unparseable_flag_is_json_400() {
    let app = app().await;
    let (status, body) = call(
        &app,
        "GET",
        "/api/v1/gods/search/Woden?includeAliases=yes",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["error"], "validation_error");
}
