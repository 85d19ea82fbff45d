//! Database-backed API tests.
//!
//! Run against a scratch MySQL database:
//! DB_HOST=... DB_USER=... DB_PASSWORD=... DB_NAME=... cargo test -p usersvc-server -- --ignored

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tokio::sync::{Mutex, MutexGuard};
use tower::ServiceExt;
use usersvc_server::db::{create_pool, migrations};
use usersvc_server::{build_router, AppState, DbConfig, ServerConfig};

static COUNTER: AtomicU32 = AtomicU32::new(0);

/// Tests hold this for their whole run so before/after snapshots of the
/// table are not disturbed by a neighbouring test
static TABLE: Mutex<()> = Mutex::const_new(());

async fn exclusive() -> MutexGuard<'static, ()> {
    TABLE.lock().await
}

/// Unique email so concurrently running tests don't see each other's rows
fn unique_email(tag: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .subsec_nanos();
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{}-{}-{}@test.local", tag, nanos, n)
}

async fn app() -> Router {
    let config = DbConfig::from_env().expect("DB_* variables required");
    let pool = create_pool(&config).await.expect("pool creation failed");
    migrations::run(&pool).await.expect("migrations failed");

    build_router(
        AppState::new(pool, config.connect_options()),
        &ServerConfig::default(),
    )
}

async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(b) => builder
            .header("content-type", "application/json")
            .body(Body::from(b.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

async fn list(app: &Router) -> Vec<Value> {
    let (status, body) = call(app, "GET", "/api/users", None).await;
    assert_eq!(status, StatusCode::OK);
    body.as_array().cloned().expect("list should be an array")
}

fn find_by_email<'a>(users: &'a [Value], email: &str) -> Option<&'a Value> {
    users.iter().find(|u| u["email"] == email)
}

fn ids(users: &[Value]) -> Vec<i64> {
    users.iter().map(|u| u["id"].as_i64().unwrap()).collect()
}

/// Create a user and return its id as seen through the list endpoint
async fn create(app: &Router, name: &str, email: &str) -> i64 {
    let (status, body) = call(
        app,
        "POST",
        "/api/users",
        Some(json!({ "name": name, "email": email })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "result": "created" }));

    let users = list(app).await;
    find_by_email(&users, email).expect("created user missing")["id"]
        .as_i64()
        .unwrap()
}

/// An id that is certainly not in the table
async fn absent_id(app: &Router) -> i64 {
    ids(&list(app).await).into_iter().max().unwrap_or(0) + 1_000_000
}

#[tokio::test]
#[ignore = "requires database"]
async fn health_ok() {
    let _table = exclusive().await;
    let app = app().await;
    let (status, body) = call(&app, "GET", "/api/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
#[ignore = "requires database"]
async fn create_then_list_shows_alice() {
    let _table = exclusive().await;
    let app = app().await;
    let before = ids(&list(&app).await);
    let email = unique_email("alice");

    let id = create(&app, "Alice", &email).await;

    let users = list(&app).await;
    let alice = find_by_email(&users, &email).unwrap();
    assert_eq!(alice["name"], "Alice");
    assert!(alice["created_at"].is_string());
    assert!(!before.contains(&id));
    assert!(before.iter().all(|&old| old < id));
}

#[tokio::test]
#[ignore = "requires database"]
async fn list_is_ordered_by_id_desc() {
    let _table = exclusive().await;
    let app = app().await;
    create(&app, "First", &unique_email("order")).await;
    create(&app, "Second", &unique_email("order")).await;

    let ids = ids(&list(&app).await);
    assert!(ids.windows(2).all(|w| w[0] > w[1]), "not descending: {:?}", ids);
}

#[tokio::test]
#[ignore = "requires database"]
async fn update_changes_name_and_email() {
    let _table = exclusive().await;
    let app = app().await;
    let id = create(&app, "Before", &unique_email("upd")).await;
    let new_email = unique_email("upd-new");

    let (status, body) = call(
        &app,
        "PUT",
        &format!("/api/users/{}", id),
        Some(json!({ "name": "After", "email": new_email })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "result": "updated" }));

    let users = list(&app).await;
    let user = find_by_email(&users, &new_email).unwrap();
    assert_eq!(user["id"], id);
    assert_eq!(user["name"], "After");
}

#[tokio::test]
#[ignore = "requires database"]
async fn update_with_same_values_is_ok() {
    let _table = exclusive().await;
    let app = app().await;
    let email = unique_email("same");
    let id = create(&app, "Same", &email).await;

    let (status, _) = call(
        &app,
        "PUT",
        &format!("/api/users/{}", id),
        Some(json!({ "name": "Same", "email": email })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
#[ignore = "requires database"]
async fn update_keeps_created_at() {
    let _table = exclusive().await;
    let app = app().await;
    let email = unique_email("ts");
    let id = create(&app, "Stamp", &email).await;
    let created_at = find_by_email(&list(&app).await, &email).unwrap()["created_at"].clone();

    tokio::time::sleep(std::time::Duration::from_millis(1100)).await;
    call(
        &app,
        "PUT",
        &format!("/api/users/{}", id),
        Some(json!({ "name": "Stamp2", "email": email })),
    )
    .await;

    let users = list(&app).await;
    assert_eq!(find_by_email(&users, &email).unwrap()["created_at"], created_at);
}

#[tokio::test]
#[ignore = "requires database"]
async fn update_missing_is_404_and_changes_nothing() {
    let _table = exclusive().await;
    let app = app().await;
    create(&app, "Bystander", &unique_email("bystander")).await;
    let id = absent_id(&app).await;
    let before = list(&app).await;

    let (status, body) = call(
        &app,
        "PUT",
        &format!("/api/users/{}", id),
        Some(json!({ "name": "Ghost", "email": unique_email("ghost") })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");

    assert_eq!(list(&app).await, before);
}

#[tokio::test]
#[ignore = "requires database"]
async fn delete_removes_user() {
    let _table = exclusive().await;
    let app = app().await;
    let id = create(&app, "Doomed", &unique_email("del")).await;

    let (status, body) = call(&app, "DELETE", &format!("/api/users/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "result": "deleted" }));

    assert!(!ids(&list(&app).await).contains(&id));

    // Second delete finds nothing
    let (status, _) = call(&app, "DELETE", &format!("/api/users/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires database"]
async fn delete_missing_is_404_and_changes_nothing() {
    let _table = exclusive().await;
    let app = app().await;
    create(&app, "Bystander", &unique_email("bystander")).await;
    let id = absent_id(&app).await;
    let before = list(&app).await;

    let (status, body) = call(&app, "DELETE", &format!("/api/users/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");

    assert_eq!(list(&app).await, before);
}
