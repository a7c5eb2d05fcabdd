//! # Invoicing Backend Client
//!
//! This module wraps every outbound call zapdash makes to the invoicing backend.
//! The backend owns all business logic (vendor API integration, invoice computation,
//! PDF rendering, persistence); this side only issues requests and hands the decoded
//! responses to the dashboard and CLI layers.
//!
//! ## Architecture
//!
//! ```text
//! CLI / Dashboard
//!        ↓
//! ApiClient
//!     ├── auth      POST /auth/login
//!     ├── sync      POST /sync, legacy /refresh
//!     └── invoices  POST /generate-invoices, GET /invoices
//!        ↓
//! crate::http (JSON-or-text payloads, error messages)
//!        ↓
//! Invoicing backend
//! ```
//!
//! ## Error Contract
//!
//! Each operation is a single HTTP call:
//! - non-2xx responses become [`ApiError::Http`] (or [`ApiError::Auth`] for login)
//!   carrying the body's `detail`, `message` or `error_description`
//! - unreachable backends become [`ApiError::Network`] naming the configured base URL
//! - bodies that are not JSON are treated as plain-text messages
//!
//! No retries are attempted. The only exception is the legacy refresh, which falls
//! back from POST to GET once when the backend rejects the method.
//!
//! ## Session Handling
//!
//! The client itself is stateless. Operations that need the vendor access token
//! take it as an argument; the token lives in [`crate::management::SessionManager`].

pub mod auth;
pub mod invoices;
pub mod sync;

use reqwest::{Client, Method, RequestBuilder};

use crate::{config, error::ApiError, http::Payload};

/// Client for the invoicing backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: Client::new(),
        }
    }

    /// Creates a client for the configured `ZAPDASH_API_URL`.
    pub fn from_env() -> Self {
        Self::new(config::api_url())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}{}", self.base_url, path))
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Payload, ApiError> {
        crate::http::execute(request, &self.base_url).await
    }
}
