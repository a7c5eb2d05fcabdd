use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::{
    baas::{BaasClient, RequestOptions},
    error::ApiError,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub user: Option<Value>,
}

/// Password auth against `/auth/v1`. Signing in and out updates the access token
/// held by the owning [`BaasClient`].
pub struct AuthApi<'a> {
    client: &'a BaasClient,
}

impl<'a> AuthApi<'a> {
    pub(crate) fn new(client: &'a BaasClient) -> Self {
        Self { client }
    }

    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, ApiError> {
        let options = RequestOptions::default()
            .query("grant_type", "password")
            .body(json!({ "email": email, "password": password }));

        let session: AuthSession = self
            .client
            .request(Method::POST, "/auth/v1/token", options)
            .await
            .map_err(ApiError::into_auth)?
            .into_typed()?;

        self.client
            .set_access_token(Some(session.access_token.clone()))
            .await;
        Ok(session)
    }

    /// Registers a user. When the platform signs the user in right away, the
    /// returned access token is kept.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<Value, ApiError> {
        let options =
            RequestOptions::default().body(json!({ "email": email, "password": password }));

        let response = match self
            .client
            .request(Method::POST, "/auth/v1/signup", options)
            .await
            .map_err(ApiError::into_auth)?
        {
            crate::http::Payload::Json(value) => value,
            crate::http::Payload::Text(text) => Value::String(text),
        };

        if let Some(token) = response.get("access_token").and_then(Value::as_str) {
            self.client.set_access_token(Some(token.to_string())).await;
        }
        Ok(response)
    }

    /// Revokes the session server side. The local token is cleared even when the
    /// server call fails.
    pub async fn sign_out(&self) -> Result<(), ApiError> {
        if self.client.access_token().await.is_none() {
            return Ok(());
        }

        let result = self
            .client
            .request(Method::POST, "/auth/v1/logout", RequestOptions::default())
            .await;
        self.client.set_access_token(None).await;
        result.map(|_| ())
    }
}
