use reqwest::Method;

use crate::{
    backend::ApiClient,
    error::ApiError,
    types::{LoginRequest, TokenPayload},
};

impl ApiClient {
    /// Logs in against the charging vendor through the backend.
    ///
    /// Sends `{username, password}` to `POST /auth/login` and returns the token
    /// payload. Any non-2xx answer is reported as [`ApiError::Auth`] with the
    /// message from the response body.
    ///
    /// # Example
    ///
    /// ```
    /// let token = client.login("owner@example.com", "secret").await?;
    /// session.store(token.access_token).await?;
    /// ```
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenPayload, ApiError> {
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };

        let payload = self
            .execute(self.request(Method::POST, "/auth/login").json(&body))
            .await
            .map_err(ApiError::into_auth)?;

        let token: TokenPayload = payload.into_typed()?;
        if token.access_token.trim().is_empty() {
            return Err(ApiError::Decode("login response has an empty access_token".into()));
        }

        Ok(token)
    }
}
