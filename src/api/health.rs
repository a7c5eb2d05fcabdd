use std::sync::Arc;

use axum::{Extension, response::Json};
use serde_json::{Value, json};

use crate::dashboard::Dashboard;

pub async fn health(Extension(dashboard): Extension<Arc<Dashboard>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "api_url": dashboard.client().base_url(),
    }))
}
