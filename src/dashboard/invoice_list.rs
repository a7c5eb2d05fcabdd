use crate::{backend::ApiClient, types::Invoice};

/// Cached invoice collection, refetched whenever the reload signal moves.
#[derive(Debug, Default)]
pub struct InvoiceList {
    invoices: Vec<Invoice>,
    fetched_for: Option<u64>,
}

impl InvoiceList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Brings the list up to date with `reload`.
    ///
    /// Fetches on first display and whenever `reload` differs from the value of the
    /// last fetch. A failed fetch shows an empty list instead of an error.
    pub async fn refresh_for(&mut self, client: &ApiClient, reload: u64) -> &[Invoice] {
        if self.fetched_for != Some(reload) {
            self.invoices = client.list_invoices().await.unwrap_or_default();
            self.fetched_for = Some(reload);
        }
        &self.invoices
    }

    pub fn invoices(&self) -> &[Invoice] {
        &self.invoices
    }

    /// Forgets the fetched data so the next display fetches again.
    pub fn reset(&mut self) {
        self.invoices.clear();
        self.fetched_for = None;
    }
}
