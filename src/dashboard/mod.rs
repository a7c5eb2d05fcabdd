//! # Dashboard
//!
//! Session and action orchestration shared by the CLI and the local web server.
//!
//! The dashboard has two macro-states, see [`View`]:
//!
//! - **LoggedOut**: only login is possible. A successful login stores the vendor
//!   access token and switches to `LoggedIn`.
//! - **LoggedIn**: sync, generate, the legacy refresh and logout are available and
//!   the invoice list is shown.
//!
//! Every action button follows the same sequence: take the single-flight slot
//! (the loading flag), call exactly one [`ApiClient`] operation, then set the status
//! message from the result. Success also bumps the reload signal so the invoice
//! list refetches; failure leaves it alone. The slot is released afterwards on
//! every path.

mod flight;
mod invoice_list;
pub mod render;

pub use flight::{FlightTicket, SingleFlight};
pub use invoice_list::InvoiceList;

use std::future::Future;

use thiserror::Error;
use tokio::sync::Mutex;

use crate::{
    backend::ApiClient,
    config,
    error::ApiError,
    management::{SessionError, SessionManager},
    types::{Invoice, TargetMonth},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    LoggedOut,
    LoggedIn,
}

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("Another action is still running.")]
    Busy,

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct UiState {
    pub status: Option<String>,
    pub target_month: TargetMonth,
    pub history_days: u32,
    pub reload: u64,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            status: None,
            target_month: TargetMonth::last_completed(),
            history_days: config::history_days(),
            reload: 0,
        }
    }
}

/// Everything needed to render the dashboard once.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub view: View,
    pub ui: UiState,
    pub loading: bool,
    pub invoices: Vec<Invoice>,
    pub api_base: String,
}

pub struct Dashboard {
    client: ApiClient,
    session: Mutex<SessionManager>,
    ui: Mutex<UiState>,
    invoices: Mutex<InvoiceList>,
    flight: SingleFlight,
}

impl Dashboard {
    pub fn new(client: ApiClient, session: SessionManager) -> Self {
        Self::with_state(client, session, UiState::default())
    }

    pub fn with_state(client: ApiClient, session: SessionManager, ui: UiState) -> Self {
        Self {
            client,
            session: Mutex::new(session),
            ui: Mutex::new(ui),
            invoices: Mutex::new(InvoiceList::new()),
            flight: SingleFlight::new(),
        }
    }

    /// Dashboard for the configured backend and the session stored in the data dir.
    pub async fn load() -> Result<Self, SessionError> {
        let session = SessionManager::load_default().await?;
        Ok(Self::new(ApiClient::from_env(), session))
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// True while an action is in flight.
    pub fn is_loading(&self) -> bool {
        self.flight.is_busy()
    }

    pub async fn view(&self) -> View {
        if self.session.lock().await.is_logged_in() {
            View::LoggedIn
        } else {
            View::LoggedOut
        }
    }

    pub async fn token(&self) -> Option<String> {
        self.session.lock().await.token().map(str::to_owned)
    }

    pub async fn ui(&self) -> UiState {
        self.ui.lock().await.clone()
    }

    pub async fn status(&self) -> Option<String> {
        self.ui.lock().await.status.clone()
    }

    pub async fn reload_signal(&self) -> u64 {
        self.ui.lock().await.reload
    }

    pub async fn set_status(&self, status: Option<String>) {
        self.ui.lock().await.status = status;
    }

    /// Submits the login form.
    ///
    /// On success the token is stored and the dashboard switches to
    /// [`View::LoggedIn`]. The status message reflects the outcome either way.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, DashboardError> {
        let _ticket = self.begin()?;

        let outcome = self.store_login(username, password).await;
        let mut ui = self.ui.lock().await;
        match outcome {
            Ok(()) => {
                let message = format!("Logged in as {}.", username);
                ui.status = Some(message.clone());
                Ok(message)
            }
            Err(e) => {
                ui.status = Some(e.to_string());
                Err(e)
            }
        }
    }

    async fn store_login(&self, username: &str, password: &str) -> Result<(), DashboardError> {
        let token = self.client.login(username, password).await?;
        self.session.lock().await.store(token.access_token).await?;
        self.invoices.lock().await.reset();
        Ok(())
    }

    /// Forgets the stored token. No request is made.
    ///
    /// The invoice list and status are reset even when the session file cannot
    /// be removed; the storage error is returned afterwards.
    pub async fn logout(&self) -> Result<(), DashboardError> {
        let cleared = self.session.lock().await.clear().await;
        self.invoices.lock().await.reset();
        self.ui.lock().await.status = None;
        Ok(cleared?)
    }

    /// Pulls the selected history window from the vendor into the backend.
    pub async fn sync(&self) -> Result<String, DashboardError> {
        self.sync_with(None).await
    }

    /// Like [`Dashboard::sync`], selecting `days` first when given.
    ///
    /// The selection only changes once the action actually starts, so a rejected
    /// (busy) request leaves the UI state alone.
    pub async fn sync_with(&self, days: Option<u32>) -> Result<String, DashboardError> {
        let ticket = self.begin()?;
        let days = {
            let mut ui = self.ui.lock().await;
            if let Some(days) = days {
                ui.history_days = days;
            }
            ui.history_days
        };

        self.complete(ticket, async move {
            let token = self.token().await.ok_or(ApiError::NotLoggedIn)?;
            self.client.sync(&token, days).await
        })
        .await
    }

    /// Generates the invoices for the selected month.
    pub async fn generate_invoices(&self) -> Result<String, DashboardError> {
        self.generate_invoices_for(None).await
    }

    /// Like [`Dashboard::generate_invoices`], selecting `month` first when given.
    pub async fn generate_invoices_for(
        &self,
        month: Option<TargetMonth>,
    ) -> Result<String, DashboardError> {
        let ticket = self.begin()?;
        let month = {
            let mut ui = self.ui.lock().await;
            if let Some(month) = month {
                ui.target_month = month;
            }
            ui.target_month
        };

        self.complete(ticket, self.client.generate_invoices(Some(month)))
            .await
    }

    /// Legacy single-step pull.
    pub async fn refresh(&self) -> Result<String, DashboardError> {
        let ticket = self.begin()?;
        self.complete(ticket, self.client.refresh()).await
    }

    /// Invoice list for the current reload signal. Empty while logged out.
    ///
    /// Fetch failures show up as an empty list; use [`Dashboard::fetch_invoices`]
    /// when the error matters.
    pub async fn invoices(&self) -> Vec<Invoice> {
        if self.view().await == View::LoggedOut {
            return Vec::new();
        }

        let reload = self.reload_signal().await;
        let mut list = self.invoices.lock().await;
        list.refresh_for(&self.client, reload).await.to_vec()
    }

    /// Fetches the invoice list, reporting failures instead of hiding them.
    pub async fn fetch_invoices(&self) -> Result<Vec<Invoice>, DashboardError> {
        if self.view().await == View::LoggedOut {
            return Err(ApiError::NotLoggedIn.into());
        }
        Ok(self.client.list_invoices().await?)
    }

    pub async fn snapshot(&self) -> Snapshot {
        let invoices = self.invoices().await;
        Snapshot {
            view: self.view().await,
            ui: self.ui().await,
            loading: self.is_loading(),
            invoices,
            api_base: self.client.base_url().to_string(),
        }
    }

    fn begin(&self) -> Result<FlightTicket<'_>, DashboardError> {
        self.flight.try_begin().ok_or(DashboardError::Busy)
    }

    /// Runs `action` while holding `_ticket`, then records the outcome.
    async fn complete<F>(
        &self,
        _ticket: FlightTicket<'_>,
        action: F,
    ) -> Result<String, DashboardError>
    where
        F: Future<Output = Result<String, ApiError>>,
    {
        let outcome = if self.view().await == View::LoggedIn {
            action.await
        } else {
            Err(ApiError::NotLoggedIn)
        };

        let mut ui = self.ui.lock().await;
        match outcome {
            Ok(message) => {
                ui.status = Some(message.clone());
                ui.reload += 1;
                Ok(message)
            }
            Err(e) => {
                ui.status = Some(e.to_string());
                Err(e.into())
            }
        }
    }
}
