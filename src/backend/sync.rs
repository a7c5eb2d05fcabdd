use reqwest::{Method, StatusCode};

use crate::{backend::ApiClient, error::ApiError, types::SyncRequest};

impl ApiClient {
    /// Asks the backend to pull `history_days` of charging history from the vendor.
    ///
    /// Returns the backend's status message.
    pub async fn sync(&self, access_token: &str, history_days: u32) -> Result<String, ApiError> {
        let body = SyncRequest {
            access_token: access_token.to_string(),
            history_days,
        };

        let payload = self
            .execute(self.request(Method::POST, "/sync").json(&body))
            .await?;
        Ok(payload.into_message())
    }

    /// Legacy single-step data pull, superseded by [`ApiClient::sync`] followed by
    /// [`ApiClient::generate_invoices`].
    ///
    /// Older backends only expose `GET /refresh`, so a 405 on POST is retried once
    /// with GET.
    pub async fn refresh(&self) -> Result<String, ApiError> {
        let payload = match self.execute(self.request(Method::POST, "/refresh")).await {
            Err(e) if e.status() == Some(StatusCode::METHOD_NOT_ALLOWED) => {
                self.execute(self.request(Method::GET, "/refresh")).await?
            }
            other => other?,
        };
        Ok(payload.into_message())
    }
}
