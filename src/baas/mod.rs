//! # Backend-as-a-Service Connector
//!
//! A thin REST client for a hosted data and auth platform that speaks the
//! PostgREST/GoTrue conventions:
//!
//! - `/rest/v1/{table}?select=...` for table reads and inserts
//! - `/auth/v1/token?grant_type=password`, `/auth/v1/signup`, `/auth/v1/logout`
//!
//! Every request carries the public key in the `apikey` header and a bearer token:
//! the signed-in user's access token when there is one, the public key otherwise.
//! The access token held here is unrelated to the vendor token stored by
//! [`crate::management::SessionManager`].
//!
//! ```
//! let baas = BaasClient::new(url, key);
//! baas.auth().sign_in_with_password("me@example.com", "secret").await?;
//! let rows = baas.from("invoices").select("invoice_id,total_amount").await?;
//! baas.auth().sign_out().await?;
//! ```

mod auth;
mod table;

pub use auth::{AuthApi, AuthSession};
pub use table::TableQuery;

use std::sync::Arc;

use reqwest::{Client, Method};
use serde_json::Value;
use tokio::sync::Mutex;

use crate::{config, error::ApiError, http::Payload};

/// Extra parts of a [`BaasClient::request`] call.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl RequestOptions {
    pub fn query(mut self, key: &str, value: &str) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn header(mut self, key: &str, value: &str) -> Self {
        self.headers.push((key.to_string(), value.to_string()));
        self
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

#[derive(Debug, Clone)]
pub struct BaasClient {
    base_url: String,
    api_key: String,
    schema: Option<String>,
    http: Client,
    access_token: Arc<Mutex<Option<String>>>,
}

impl BaasClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            schema: None,
            http: Client::new(),
            access_token: Arc::new(Mutex::new(None)),
        }
    }

    /// Uses `schema` for table access via the `Accept-Profile`/`Content-Profile` headers.
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Creates a client from `ZAPDASH_BAAS_URL`, `ZAPDASH_BAAS_KEY` and the optional
    /// `ZAPDASH_BAAS_SCHEMA`.
    pub fn from_env() -> Result<Self, ApiError> {
        let url = config::baas_url().ok_or_else(|| ApiError::Config("ZAPDASH_BAAS_URL".into()))?;
        let key = config::baas_key().ok_or_else(|| ApiError::Config("ZAPDASH_BAAS_KEY".into()))?;

        let client = Self::new(url, key);
        Ok(match config::baas_schema() {
            Some(schema) => client.with_schema(schema),
            None => client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    /// The access token obtained by the last successful sign-in, if any.
    pub async fn access_token(&self) -> Option<String> {
        self.access_token.lock().await.clone()
    }

    pub(crate) async fn set_access_token(&self, token: Option<String>) {
        *self.access_token.lock().await = token;
    }

    /// Sends a request to `path` with the `apikey` and bearer headers set.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<Payload, ApiError> {
        let bearer = match self.access_token().await {
            Some(token) => token,
            None => self.api_key.clone(),
        };

        let mut request = self
            .http
            .request(method, format!("{}{}", self.base_url, path))
            .header("apikey", &self.api_key)
            .bearer_auth(bearer);

        if !options.query.is_empty() {
            request = request.query(&options.query);
        }
        for (key, value) in &options.headers {
            request = request.header(key.as_str(), value.as_str());
        }
        if let Some(body) = &options.body {
            request = request.json(body);
        }

        crate::http::execute(request, &self.base_url).await
    }

    /// Starts a query against `table`.
    pub fn from<'a>(&'a self, table: &str) -> TableQuery<'a> {
        TableQuery::new(self, table)
    }

    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }
}
