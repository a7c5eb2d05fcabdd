use reqwest::Method;

use crate::{
    backend::ApiClient,
    error::ApiError,
    types::{Invoice, TargetMonth},
};

impl ApiClient {
    /// Requests generation of the monthly invoice PDFs.
    ///
    /// Without a month the backend picks its own default. With one, the call goes
    /// to `POST /generate-invoices?target_month=YYYY-MM`.
    pub async fn generate_invoices(
        &self,
        target_month: Option<TargetMonth>,
    ) -> Result<String, ApiError> {
        let mut request = self.request(Method::POST, "/generate-invoices");
        if let Some(month) = target_month {
            request = request.query(&[("target_month", month.to_string())]);
        }

        let payload = self.execute(request).await?;
        Ok(payload.into_message())
    }

    /// Lists the generated invoices in the order the backend returns them.
    pub async fn list_invoices(&self) -> Result<Vec<Invoice>, ApiError> {
        let payload = self.execute(self.request(Method::GET, "/invoices")).await?;
        payload.into_typed()
    }
}
