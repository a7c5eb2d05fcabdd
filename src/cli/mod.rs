//! # CLI Module
//!
//! User-facing command implementations for zapdash. Each command loads the
//! persisted session, drives one [`crate::dashboard::Dashboard`] operation and prints
//! the resulting status message.
//!
//! ## Commands
//!
//! ### Session
//! - [`login`] - logs in against the charging vendor and stores the access token
//! - [`logout`] - forgets the stored token, no request is made
//! - [`status`] - shows the session state and the configured backend
//!
//! ### Actions
//! - [`sync`] - pulls charging history into the backend
//! - [`generate`] - requests the monthly invoice PDFs
//! - [`refresh`] - legacy single-step pull, kept for older backends
//!
//! ### Invoices
//! - [`invoices`] - lists generated invoices, optionally opening one PDF
//!
//! ### Dashboard
//! - [`serve`] - serves the HTML dashboard locally
//!
//! ### Backend-as-a-service
//! - [`baas_sign_up`], [`baas_select`], [`baas_insert`]
//!
//! ## Typical Usage
//!
//! ```bash
//! zapdash login --username owner@example.com
//! zapdash sync --history-days 60
//! zapdash generate --month 2024-03
//! zapdash invoices
//! zapdash serve --open
//! ```
//!
//! Failures are printed with the `error!` macro and end the process with status 1.

mod auth;
mod baas;
mod invoices;
mod serve;
mod sync;

pub use auth::login;
pub use auth::logout;
pub use auth::status;
pub use baas::Credentials;
pub use baas::baas_insert;
pub use baas::baas_select;
pub use baas::baas_sign_up;
pub use invoices::generate;
pub use invoices::invoices;
pub use serve::serve;
pub use sync::refresh;
pub use sync::sync;

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::{dashboard::Dashboard, error, management::SessionManager};

async fn load_dashboard() -> Dashboard {
    match Dashboard::load().await {
        Ok(dashboard) => dashboard,
        Err(e) => error!(
            "Cannot load session from {}: {}",
            SessionManager::default_path().display(),
            e
        ),
    }
}

fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}
