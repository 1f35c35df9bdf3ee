mod common;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use serde_json::{Value, json};
use tower::ServiceExt;

use flips::{AppState, build_router};

use common::{hold_write_lock, setup, setup_without_busy_wait};

fn app() -> (tempfile::TempDir, Router) {
    let (dir, config, pool) = setup();
    (dir, build_router(AppState::new(pool, config)))
}

async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str, cookie: &str) -> Request<Body> {
    Request::get(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, cookie: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::COOKIE, cookie)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn session_cookie(response: &Response) -> String {
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("session cookie")
        .to_str()
        .unwrap();
    set_cookie.split(';').next().unwrap().to_string()
}

async fn register(app: &Router, username: &str) -> String {
    let response = send(
        app,
        post_form("/api/auth/register", &format!("username={username}&password=correct-horse")),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    session_cookie(&response)
}

#[tokio::test]
async fn study_routes_require_a_session() {
    let (_dir, app) = app();

    for uri in ["/api/study/next", "/api/stats/overview", "/api/backup/export", "/api/settings"] {
        let response = send(&app, Request::get(uri).body(Body::empty()).unwrap()).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
        let body = json_body(response).await;
        assert_eq!(body["status"], 401);
    }
}

#[tokio::test]
async fn register_add_study_and_answer() {
    let (_dir, app) = app();
    let cookie = register(&app, "alice").await;

    let response = send(
        &app,
        post_json("/api/cards", &cookie, json!({"id": "c1", "word": "house", "translation": "casa"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = send(&app, get("/api/study/next", &cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let card = json_body(response).await;
    assert_eq!(card["id"], "c1");
    assert_eq!(card["word"], "house");

    let response = send(
        &app,
        post_json("/api/study/answer", &cookie, json!({"card_id": "c1", "answer": true})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let schedule = json_body(response).await;
    assert_eq!(schedule["status"], "C");
    assert_eq!(schedule["interval_min"], 10);

    let response = send(&app, get("/api/study/stats", &cookie)).await;
    let amount = json_body(response).await;
    assert_eq!(amount, json!({"new": 0, "cram": 1, "due": 0}));

    let response = send(&app, get("/api/stats/today", &cookie)).await;
    let today = json_body(response).await;
    assert_eq!(today["count"], 1);
    assert_eq!(today["time_spent"], "0:00");
}

#[tokio::test]
async fn empty_collection_has_no_next_card() {
    let (_dir, app) = app();
    let cookie = register(&app, "alice").await;

    let response = send(&app, get("/api/study/next", &cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, Value::Null);
}

#[tokio::test]
async fn errors_map_to_statuses() {
    let (_dir, app) = app();
    let cookie = register(&app, "alice").await;

    let response = send(
        &app,
        post_form("/api/auth/register", "username=alice&password=correct-horse"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = send(
        &app,
        post_json("/api/study/answer", &cookie, json!({"card_id": "missing", "answer": true})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(
        &app,
        post_json("/api/study/limits/increase", &cookie, json!({"limit_type": "CRAM", "amount": 5})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(
        &app,
        post_json("/api/study/limits/increase", &cookie, json!({"limit_type": "NEW", "amount": 0})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(&app, get("/api/stats/hardest?limit=50", &cookie)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_checks_the_password() {
    let (_dir, app) = app();
    register(&app, "alice").await;

    let response = send(&app, post_form("/api/auth/login", "username=alice&password=wrong-horse")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = send(&app, post_form("/api/auth/login", "username=alice&password=correct-horse")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = session_cookie(&response);

    let response = send(&app, get("/api/settings", &cookie)).await;
    let settings = json_body(response).await;
    assert_eq!(settings["username"], "alice");
    assert_eq!(settings["new_limit"], 20);
}

#[tokio::test]
async fn backup_export_is_a_csv_attachment() {
    let (_dir, app) = app();
    let cookie = register(&app, "alice").await;
    send(
        &app,
        post_json(
            "/api/cards/bulk",
            &cookie,
            json!({"cards": [
                {"word": "house", "translation": "casa"},
                {"word": "  ", "translation": "skipped"},
                {"word": "dog", "translation": ""}
            ]}),
        ),
    )
    .await;

    let response = send(&app, get("/api/backup/export", &cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let disposition = response.headers()[header::CONTENT_DISPOSITION].to_str().unwrap().to_string();
    assert!(disposition.contains("flips_backup.csv"));

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let csv = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(csv.starts_with("# SCHEDULE"));
    assert!(csv.contains("# CARDS"));
    assert!(csv.contains("house"));
    assert!(!csv.contains("dog"));
}

#[tokio::test]
async fn bulk_add_reports_failures() {
    let (_dir, app) = app();
    let cookie = register(&app, "alice").await;

    let response = send(
        &app,
        post_json(
            "/api/cards/bulk",
            &cookie,
            json!({"cards": [
                {"word": "house", "translation": "casa"},
                {"word": "", "translation": "skipped"},
                {"word": "dog", "translation": " "}
            ]}),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({"added": ["house"], "failed": ["dog"]}));
}

#[tokio::test]
async fn locked_database_answers_conflict() {
    let (_dir, config, pool) = setup_without_busy_wait();
    let blocker_config = config.clone();
    let app = build_router(AppState::new(pool, config));
    let cookie = register(&app, "alice").await;
    send(
        &app,
        post_json("/api/cards", &cookie, json!({"id": "c1", "word": "house", "translation": "casa"})),
    )
    .await;

    let blocker = hold_write_lock(&blocker_config);
    let response = send(
        &app,
        post_json("/api/study/answer", &cookie, json!({"card_id": "c1", "answer": true})),
    )
    .await;
    drop(blocker);

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(json_body(response).await["status"], 409);
}
