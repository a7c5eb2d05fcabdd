//! Zaptec Invoice Dashboard Library
//!
//! This library drives a charging-station invoicing backend from the command line:
//! logging in against the vendor through the backend, triggering data syncs,
//! requesting monthly invoice PDFs and listing the generated invoices. All business
//! logic lives in the backend; this crate only issues HTTP requests and renders the
//! responses, either in the terminal or as a small locally served HTML dashboard.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints of the local dashboard server
//! - `baas` - Optional backend-as-a-service connector (PostgREST/GoTrue)
//! - `backend` - Invoicing backend client
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `dashboard` - Session state and action orchestration
//! - `error` - API error taxonomy
//! - `http` - Shared response decoding and error messages
//! - `management` - Persisted session storage
//! - `server` - Local HTTP server for the dashboard page
//! - `types` - Data structures and type definitions
//!
//! # Example
//!
//! ```
//! use zapdash::{backend::ApiClient, config};
//!
//! #[tokio::main]
//! async fn main() -> zapdash::Res<()> {
//!     config::load_env().await?;
//!     let invoices = ApiClient::from_env().list_invoices().await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod baas;
pub mod backend;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod http;
pub mod management;
pub mod server;
pub mod types;

/// Result alias used by the binary and server plumbing, where errors of
/// different kinds only need to be reported.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational line with a blue `o` marker.
///
/// ```
/// info!("Syncing {} days of charging history...", days);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success line with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error to stderr with a red `!` marker and exits with status 1.
///
/// Only meant for the CLI layer; library code returns errors instead.
///
/// ```
/// error!("Cannot load session: {}", e);
/// // not reached
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning to stderr with a yellow `!` marker.
///
/// ```
/// warning!("`refresh` is deprecated, use `sync` and `generate`");
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
