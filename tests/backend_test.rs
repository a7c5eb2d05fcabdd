mod common;

use std::collections::HashMap;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
};
use serde_json::{Value, json};
use zapdash::{backend::ApiClient, error::ApiError, types::TargetMonth};

use common::{Recorder, UNREACHABLE, recorder, spawn};

#[tokio::test]
async fn test_login_returns_token() {
    let seen = recorder();
    let router = Router::new()
        .route(
            "/auth/login",
            post(|State(seen): State<Recorder>, Json(body): Json<Value>| async move {
                seen.lock().await.push(body.to_string());
                Json(json!({"access_token": "tok-123", "token_type": "bearer"}))
            }),
        )
        .with_state(seen.clone());
    let client = ApiClient::new(spawn(router).await);

    let token = client.login("owner", "secret").await.unwrap();

    assert_eq!(token.access_token, "tok-123");
    assert_eq!(token.token_type.as_deref(), Some("bearer"));
    let body: Value = serde_json::from_str(&seen.lock().await[0]).unwrap();
    assert_eq!(body, json!({"username": "owner", "password": "secret"}));
}

#[tokio::test]
async fn test_login_failure_surfaces_detail() {
    let router = Router::new().route(
        "/auth/login",
        post(|| async {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({"detail": "Invalid Zaptec credentials"})),
            )
        }),
    );
    let client = ApiClient::new(spawn(router).await);

    let err = client.login("owner", "wrong").await.unwrap_err();

    assert!(matches!(err, ApiError::Auth { status, .. } if status == StatusCode::UNAUTHORIZED));
    assert_eq!(err.to_string(), "Invalid Zaptec credentials");
}

#[tokio::test]
async fn test_sync_posts_token_and_window() {
    let seen = recorder();
    let router = Router::new()
        .route(
            "/sync",
            post(|State(seen): State<Recorder>, Json(body): Json<Value>| async move {
                seen.lock().await.push(body.to_string());
                Json(json!({"message": "Synced 12 sessions."}))
            }),
        )
        .with_state(seen.clone());
    let client = ApiClient::new(spawn(router).await);

    let message = client.sync("tok-123", 45).await.unwrap();

    assert_eq!(message, "Synced 12 sessions.");
    let body: Value = serde_json::from_str(&seen.lock().await[0]).unwrap();
    assert_eq!(body, json!({"access_token": "tok-123", "history_days": 45}));
}

#[tokio::test]
async fn test_sync_failure_with_plain_text_body() {
    let router = Router::new().route(
        "/sync",
        post(|| async { (StatusCode::BAD_GATEWAY, "Zaptec API timed out") }),
    );
    let client = ApiClient::new(spawn(router).await);

    let err = client.sync("tok", 30).await.unwrap_err();

    assert_eq!(err.status(), Some(StatusCode::BAD_GATEWAY));
    assert_eq!(err.to_string(), "Zaptec API timed out");
}

#[tokio::test]
async fn test_generate_invoices_passes_target_month() {
    let seen = recorder();
    let router = Router::new()
        .route(
            "/generate-invoices",
            post(
                |State(seen): State<Recorder>, Query(q): Query<HashMap<String, String>>| async move {
                    seen.lock()
                        .await
                        .push(q.get("target_month").cloned().unwrap_or_default());
                    Json(json!({"message": "Generated 3 invoices."}))
                },
            ),
        )
        .with_state(seen.clone());
    let client = ApiClient::new(spawn(router).await);

    let month: TargetMonth = "2024-03".parse().unwrap();
    let message = client.generate_invoices(Some(month)).await.unwrap();
    client.generate_invoices(None).await.unwrap();

    assert_eq!(message, "Generated 3 invoices.");
    assert_eq!(*seen.lock().await, vec!["2024-03".to_string(), String::new()]);
}

#[tokio::test]
async fn test_list_invoices_keeps_backend_order() {
    let router = Router::new().route(
        "/invoices",
        get(|| async {
            Json(json!([
                {"invoice_id": "b", "period_start": "2024-02-01", "period_end": "2024-02-29",
                 "total_amount": 10.0, "pdf_url": "/pdf/b.pdf", "generated_at": "2024-03-01T09:00:00"},
                {"invoice_id": "a", "period_start": "2024-03-01", "period_end": "2024-03-31",
                 "total_amount": 20.25, "pdf_url": "/pdf/a.pdf", "generated_at": "2024-04-01T09:00:00"}
            ]))
        }),
    );
    let client = ApiClient::new(spawn(router).await);

    let invoices = client.list_invoices().await.unwrap();

    let ids: Vec<&str> = invoices.iter().map(|i| i.invoice_id.as_str()).collect();
    assert_eq!(ids, vec!["b", "a"]);
    assert_eq!(invoices[1].total_amount, Some(20.25));
}

#[tokio::test]
async fn test_list_invoices_rejects_plain_text() {
    let router = Router::new().route("/invoices", get(|| async { "not json" }));
    let client = ApiClient::new(spawn(router).await);

    let err = client.list_invoices().await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn test_refresh_falls_back_to_get() {
    let router = Router::new().route(
        "/refresh",
        get(|| async { Json(json!({"message": "Data refreshed successfully."})) }),
    );
    let client = ApiClient::new(spawn(router).await);

    assert_eq!(client.refresh().await.unwrap(), "Data refreshed successfully.");
}

#[tokio::test]
async fn test_unreachable_backend_names_base_url() {
    let client = ApiClient::new(UNREACHABLE);

    let err = client.sync("tok", 30).await.unwrap_err();

    assert!(matches!(err, ApiError::Network { .. }));
    assert!(err.to_string().contains(UNREACHABLE));
    assert!(err.to_string().contains("CORS"));
}

#[test]
fn test_base_url_trailing_slash_is_trimmed() {
    assert_eq!(
        ApiClient::new("http://localhost:8000/").base_url(),
        "http://localhost:8000"
    );
}
