use axum::{
    Extension, Router,
    routing::{get, post},
};
use std::{net::SocketAddr, str::FromStr, sync::Arc};

use crate::{Res, api, dashboard::Dashboard};

pub fn router(dashboard: Arc<Dashboard>) -> Router {
    Router::new()
        .route("/", get(api::index))
        .route("/health", get(api::health))
        .route("/login", post(api::login))
        .route("/logout", post(api::logout))
        .route("/sync", post(api::sync))
        .route("/generate", post(api::generate))
        .route("/refresh", post(api::refresh))
        .layer(Extension(dashboard))
}

/// Serves the dashboard on `addr` until the process is stopped.
pub async fn start_dashboard_server(dashboard: Arc<Dashboard>, addr: &str) -> Res<()> {
    let addr = SocketAddr::from_str(addr)
        .map_err(|e| format!("Failed to parse server address `{}`: {}", addr, e))?;

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router(dashboard)).await?;
    Ok(())
}
