mod common;

use std::collections::HashMap;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
};
use serde_json::{Value, json};
use zapdash::{baas::BaasClient, error::ApiError};

use common::{Recorder, recorder, spawn};

const KEY: &str = "anon-key";

fn header(headers: &HeaderMap, name: &str) -> String {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

fn platform(seen: Recorder) -> Router {
    Router::new()
        .route(
            "/auth/v1/token",
            post(
                |State(seen): State<Recorder>,
                 Query(q): Query<HashMap<String, String>>,
                 headers: HeaderMap,
                 Json(body): Json<Value>| async move {
                    seen.lock().await.push(format!(
                        "token grant={} apikey={}",
                        q.get("grant_type").cloned().unwrap_or_default(),
                        header(&headers, "apikey")
                    ));
                    if body["password"] == "pw" {
                        (
                            StatusCode::OK,
                            Json(json!({"access_token": "user-jwt", "refresh_token": "r", "user": {"id": "u1"}})),
                        )
                    } else {
                        (
                            StatusCode::BAD_REQUEST,
                            Json(json!({"error": "invalid_grant", "error_description": "Invalid login credentials"})),
                        )
                    }
                },
            ),
        )
        .route(
            "/auth/v1/signup",
            post(|Json(body): Json<Value>| async move {
                Json(json!({"id": "u2", "email": body["email"]}))
            }),
        )
        .route(
            "/auth/v1/logout",
            post(|State(seen): State<Recorder>, headers: HeaderMap| async move {
                seen.lock()
                    .await
                    .push(format!("logout {}", header(&headers, "authorization")));
                StatusCode::NO_CONTENT
            }),
        )
        .route(
            "/rest/v1/invoices",
            get(
                |State(seen): State<Recorder>,
                 Query(q): Query<HashMap<String, String>>,
                 headers: HeaderMap| async move {
                    seen.lock().await.push(format!(
                        "select {} auth={} profile={}",
                        q.get("select").cloned().unwrap_or_default(),
                        header(&headers, "authorization"),
                        header(&headers, "accept-profile"),
                    ));
                    Json(json!([{"invoice_id": "inv-1", "total_amount": 42.5}]))
                },
            )
            .post(
                |State(seen): State<Recorder>, headers: HeaderMap, Json(body): Json<Value>| async move {
                    seen.lock().await.push(format!(
                        "insert prefer={} profile={}",
                        header(&headers, "prefer"),
                        header(&headers, "content-profile"),
                    ));
                    (StatusCode::CREATED, Json(json!([body])))
                },
            ),
        )
        .with_state(seen)
}

#[tokio::test]
async fn test_anonymous_select_uses_public_key() {
    let seen = recorder();
    let client = BaasClient::new(spawn(platform(seen.clone())).await, KEY);

    let rows = client.from("invoices").select("invoice_id,total_amount").await.unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["invoice_id"], "inv-1");
    assert_eq!(
        seen.lock().await[0],
        "select invoice_id,total_amount auth=Bearer anon-key profile="
    );
}

#[tokio::test]
async fn test_sign_in_sets_token_and_sign_out_clears_it() {
    let seen = recorder();
    let client = BaasClient::new(spawn(platform(seen.clone())).await, KEY);

    let session = client.auth().sign_in_with_password("me@example.com", "pw").await.unwrap();
    assert_eq!(session.access_token, "user-jwt");
    assert_eq!(client.access_token().await.as_deref(), Some("user-jwt"));

    client.from("invoices").select("*").await.unwrap();
    client.auth().sign_out().await.unwrap();
    assert_eq!(client.access_token().await, None);

    let seen = seen.lock().await;
    assert_eq!(seen[0], "token grant=password apikey=anon-key");
    assert_eq!(seen[1], "select * auth=Bearer user-jwt profile=");
    assert_eq!(seen[2], "logout Bearer user-jwt");
}

#[tokio::test]
async fn test_failed_sign_in_surfaces_description() {
    let client = BaasClient::new(spawn(platform(recorder())).await, KEY);

    let err = client
        .auth()
        .sign_in_with_password("me@example.com", "nope")
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Auth { .. }));
    assert_eq!(err.to_string(), "Invalid login credentials");
    assert_eq!(client.access_token().await, None);
}

#[tokio::test]
async fn test_sign_up_without_session_keeps_token_empty() {
    let client = BaasClient::new(spawn(platform(recorder())).await, KEY);

    let user = client.auth().sign_up("new@example.com", "pw").await.unwrap();

    assert_eq!(user["email"], "new@example.com");
    assert_eq!(client.access_token().await, None);
}

#[tokio::test]
async fn test_insert_with_schema_profile() {
    let seen = recorder();
    let client = BaasClient::new(spawn(platform(seen.clone())).await, KEY).with_schema("billing");

    let rows = client
        .from("invoices")
        .insert(json!({"invoice_id": "inv-2"}))
        .await
        .unwrap();

    assert_eq!(rows, vec![json!({"invoice_id": "inv-2"})]);
    assert_eq!(
        seen.lock().await[0],
        "insert prefer=return=representation profile=billing"
    );
}

#[tokio::test]
async fn test_sign_out_without_session_is_noop() {
    let seen = recorder();
    let client = BaasClient::new(spawn(platform(seen.clone())).await, KEY);

    client.auth().sign_out().await.unwrap();

    assert!(seen.lock().await.is_empty());
}
