//! Integration tests — start ephemeral PG, build the real router, and walk
//! the registration/login/authorization scenarios end to end.
//!
//! All tests here need PostgreSQL binaries on PATH and are `#[ignore]`d;
//! run them with `cargo test -- --ignored`.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use kaziflow_api::config::ApiConfig;
use kaziflow_api::AppState;
use kaziflow_core::db::DbManager;

/// Ephemeral database + router wired like production, with a fixed test
/// secret and no risk-scorer API key (mock scoring path).
async fn test_app() -> (Router, sqlx::PgPool, DbManager) {
    let mut db = DbManager::ephemeral().await.expect("DbManager::ephemeral");
    db.setup().await.expect("db setup");
    db.start().await.expect("db start");

    let pool = sqlx::PgPool::connect(&db.connection_url())
        .await
        .expect("connect to ephemeral PG");

    kaziflow_api::migrate(&pool).await.expect("migrations");

    let state = AppState {
        pool: pool.clone(),
        config: ApiConfig {
            bind_addr: "127.0.0.1:0".into(),
            pg_connection_url: db.connection_url(),
            jwt_secret: "test-secret".into(),
            google_api_key: None,
            allowed_origins: ApiConfig::default_allowed_origins(),
        },
        http: reqwest::Client::new(),
    };

    (kaziflow_api::router(state), pool, db)
}

/// Send a JSON request, returning (status, parsed body).
async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let resp = app.clone().oneshot(request).await.expect("request");
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("parse JSON body")
    };
    (status, value)
}

async fn register(app: &Router, email: &str, password: &str, role: &str) -> (StatusCode, Value) {
    send(
        app,
        "POST",
        "/auth/register",
        None,
        Some(json!({
            "email": email,
            "password": password,
            "fullName": "Test User",
            "role": role,
            "companyName": "Test Co"
        })),
    )
    .await
}

async fn login(app: &Router, email: &str, password: &str) -> (StatusCode, Value) {
    send(
        app,
        "POST",
        "/auth/login",
        None,
        Some(json!({"email": email, "password": password})),
    )
    .await
}

async fn login_token(app: &Router, email: &str, password: &str) -> String {
    let (status, body) = login(app, email, password).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token_type"], "bearer");
    body["access_token"].as_str().expect("token").to_string()
}

#[tokio::test]
#[ignore = "requires PostgreSQL binaries on PATH"]
async fn duplicate_registration_is_rejected() {
    let (app, _pool, mut db) = test_app().await;

    let (status, body) = register(&app, "a@x.com", "password123", "vendor").await;
    assert_eq!(status, StatusCode::OK);
    // public projection only, never the credential
    assert_eq!(body["email"], "a@x.com");
    assert!(body.get("hashedPassword").is_none());
    assert!(body.get("password").is_none());

    let (status, body) = register(&app, "a@x.com", "password123", "vendor").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "duplicate_account");

    db.stop().await.expect("db stop");
}

#[tokio::test]
#[ignore = "requires PostgreSQL binaries on PATH"]
async fn login_failures_are_indistinguishable() {
    let (app, _pool, mut db) = test_app().await;

    register(&app, "known@x.com", "password123", "vendor").await;

    let (wrong_pw_status, wrong_pw_body) = login(&app, "known@x.com", "wrong-password").await;
    let (unknown_status, unknown_body) = login(&app, "nobody@x.com", "password123").await;

    assert_eq!(wrong_pw_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    // same kind, same message — no account enumeration
    assert_eq!(wrong_pw_body, unknown_body);

    db.stop().await.expect("db stop");
}

#[tokio::test]
#[ignore = "requires PostgreSQL binaries on PATH"]
async fn short_or_overlong_passwords_are_rejected() {
    let (app, _pool, mut db) = test_app().await;

    let (status, body) = register(&app, "short@x.com", "abc", "vendor").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");

    let long = "x".repeat(73);
    let (status, body) = register(&app, "long@x.com", &long, "vendor").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");

    db.stop().await.expect("db stop");
}

#[tokio::test]
#[ignore = "requires PostgreSQL binaries on PATH"]
async fn vendor_is_forbidden_from_risk_analysis() {
    let (app, _pool, mut db) = test_app().await;

    register(&app, "v@x.com", "password123", "vendor").await;
    let (_, vendor) = send(
        &app,
        "GET",
        "/auth/me",
        Some(&login_token(&app, "v@x.com", "password123").await),
        None,
    )
    .await;
    let vendor_id = vendor["id"].as_str().expect("vendor id").to_string();

    let token = login_token(&app, "v@x.com", "password123").await;
    let (status, body) = send(
        &app,
        "POST",
        &format!("/risk/analyze/{vendor_id}"),
        Some(&token),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "forbidden");

    db.stop().await.expect("db stop");
}

#[tokio::test]
#[ignore = "requires PostgreSQL binaries on PATH"]
async fn bank_analysis_scores_and_notifies_the_vendor() {
    let (app, _pool, mut db) = test_app().await;

    register(&app, "v@x.com", "password123", "vendor").await;
    register(&app, "b@x.com", "password123", "bank").await;

    let vendor_token = login_token(&app, "v@x.com", "password123").await;
    let (_, vendor) = send(&app, "GET", "/auth/me", Some(&vendor_token), None).await;
    let vendor_id = vendor["id"].as_str().expect("vendor id").to_string();

    let bank_token = login_token(&app, "b@x.com", "password123").await;
    let (status, body) = send(
        &app,
        "POST",
        &format!("/risk/analyze/{vendor_id}"),
        Some(&bank_token),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    // no API key configured — deterministic mock result
    assert_eq!(body["score"], 85);
    assert_eq!(body["level"], "Low");
    assert_eq!(body["vendorId"], vendor_id);

    // the vendor was notified
    let (status, notifications) = send(&app, "GET", "/notifications", Some(&vendor_token), None).await;
    assert_eq!(status, StatusCode::OK);
    let items = notifications.as_array().expect("array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "Risk assessment completed");
    assert_eq!(items[0]["isRead"], false);

    // unknown vendor is a 404, not a crash
    let (status, _) = send(
        &app,
        "POST",
        "/risk/analyze/00000000-0000-0000-0000-000000000000",
        Some(&bank_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    db.stop().await.expect("db stop");
}

#[tokio::test]
#[ignore = "requires PostgreSQL binaries on PATH"]
async fn password_change_invalidates_the_old_password() {
    let (app, _pool, mut db) = test_app().await;

    register(&app, "d@x.com", "password123", "vendor").await;
    let token = login_token(&app, "d@x.com", "password123").await;

    // wrong current password is rejected
    let (status, _) = send(
        &app,
        "POST",
        "/auth/change-password",
        Some(&token),
        Some(json!({"currentPassword": "wrong", "newPassword": "new-password-1"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        "POST",
        "/auth/change-password",
        Some(&token),
        Some(json!({"currentPassword": "password123", "newPassword": "new-password-1"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // old password no longer works, new one does
    let (status, _) = login(&app, "d@x.com", "password123").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let _token = login_token(&app, "d@x.com", "new-password-1").await;

    db.stop().await.expect("db stop");
}

#[tokio::test]
#[ignore = "requires PostgreSQL binaries on PATH"]
async fn profile_update_changes_only_provided_fields() {
    let (app, _pool, mut db) = test_app().await;

    register(&app, "p@x.com", "password123", "vendor").await;
    let token = login_token(&app, "p@x.com", "password123").await;

    let (status, body) = send(
        &app,
        "PATCH",
        "/auth/me",
        Some(&token),
        Some(json!({"fullName": "Renamed User"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["fullName"], "Renamed User");
    // untouched field keeps its value
    assert_eq!(body["companyName"], "Test Co");

    let (_, me) = send(&app, "GET", "/auth/me", Some(&token), None).await;
    assert_eq!(me["fullName"], "Renamed User");

    db.stop().await.expect("db stop");
}

#[tokio::test]
#[ignore = "requires PostgreSQL binaries on PATH"]
async fn deleted_account_invalidates_outstanding_tokens() {
    let (app, pool, mut db) = test_app().await;

    register(&app, "gone@x.com", "password123", "vendor").await;
    let token = login_token(&app, "gone@x.com", "password123").await;

    sqlx::query("DELETE FROM accounts WHERE email = $1")
        .bind("gone@x.com")
        .execute(&pool)
        .await
        .expect("delete account");

    let (status, body) = send(&app, "GET", "/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "unauthorized");

    db.stop().await.expect("db stop");
}

#[tokio::test]
#[ignore = "requires PostgreSQL binaries on PATH"]
async fn missing_or_garbage_tokens_are_rejected() {
    let (app, _pool, mut db) = test_app().await;

    let (status, _) = send(&app, "GET", "/invoices", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, "GET", "/invoices", Some("not-a-jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    db.stop().await.expect("db stop");
}

#[tokio::test]
#[ignore = "requires PostgreSQL binaries on PATH"]
async fn invoice_visibility_follows_roles() {
    let (app, _pool, mut db) = test_app().await;

    register(&app, "v1@x.com", "password123", "vendor").await;
    register(&app, "v2@x.com", "password123", "vendor").await;
    register(&app, "bank@x.com", "password123", "bank").await;

    let v1 = login_token(&app, "v1@x.com", "password123").await;
    let v2 = login_token(&app, "v2@x.com", "password123").await;
    let bank = login_token(&app, "bank@x.com", "password123").await;

    let new_invoice = |desc: &str| {
        json!({
            "amount": 1000.0,
            "description": desc,
            "dueDate": "2026-09-30T00:00:00Z"
        })
    };

    for desc in ["coffee", "fertilizer"] {
        let (status, body) = send(&app, "POST", "/invoices", Some(&v1), Some(new_invoice(desc))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["status"], "pending");
        let qr = body["qrCode"].as_str().expect("qr code");
        assert!(qr.starts_with("data:image/svg+xml;base64,"));
    }
    let (status, _) = send(&app, "POST", "/invoices", Some(&v2), Some(new_invoice("veg"))).await;
    assert_eq!(status, StatusCode::CREATED);

    // vendors see only their own
    let (_, list) = send(&app, "GET", "/invoices", Some(&v1), None).await;
    assert_eq!(list.as_array().unwrap().len(), 2);
    let (_, list) = send(&app, "GET", "/invoices", Some(&v2), None).await;
    assert_eq!(list.as_array().unwrap().len(), 1);

    // reviewing roles see everything
    let (_, list) = send(&app, "GET", "/invoices", Some(&bank), None).await;
    assert_eq!(list.as_array().unwrap().len(), 3);

    db.stop().await.expect("db stop");
}

#[tokio::test]
#[ignore = "requires PostgreSQL binaries on PATH"]
async fn notification_read_flow_is_scoped_to_the_owner() {
    let (app, _pool, mut db) = test_app().await;

    register(&app, "v@x.com", "password123", "vendor").await;
    register(&app, "r@x.com", "password123", "retailer").await;
    register(&app, "bank@x.com", "password123", "bank").await;

    let vendor = login_token(&app, "v@x.com", "password123").await;
    let retailer = login_token(&app, "r@x.com", "password123").await;

    // invoice addressed to the retailer produces a notification for them
    let (_, retailer_me) = send(&app, "GET", "/auth/me", Some(&retailer), None).await;
    let (status, _) = send(
        &app,
        "POST",
        "/invoices",
        Some(&vendor),
        Some(json!({
            "amount": 500.0,
            "description": "beans",
            "dueDate": "2026-09-30T00:00:00Z",
            "retailerId": retailer_me["id"]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, list) = send(&app, "GET", "/notifications", Some(&retailer), None).await;
    let items = list.as_array().unwrap();
    assert_eq!(items.len(), 1);
    let notification_id = items[0]["id"].as_str().unwrap().to_string();

    // another account marking it read is a no-op
    let bank = login_token(&app, "bank@x.com", "password123").await;
    let (status, _) = send(
        &app,
        "POST",
        &format!("/notifications/{notification_id}/read"),
        Some(&bank),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (_, list) = send(&app, "GET", "/notifications", Some(&retailer), None).await;
    assert_eq!(list.as_array().unwrap()[0]["isRead"], false);

    // the owner marking it read sticks
    let (status, _) = send(
        &app,
        "POST",
        &format!("/notifications/{notification_id}/read"),
        Some(&retailer),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (_, list) = send(&app, "GET", "/notifications", Some(&retailer), None).await;
    assert_eq!(list.as_array().unwrap()[0]["isRead"], true);

    db.stop().await.expect("db stop");
}
