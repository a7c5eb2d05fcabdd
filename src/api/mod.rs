//! # API Module
//!
//! HTTP endpoints of the local dashboard server started by `zapdash serve`.
//!
//! ## Endpoints
//!
//! - [`index`] - `GET /` renders the dashboard page for the current session
//! - [`login`], [`logout`] - `POST /login`, `POST /logout`
//! - [`sync`], [`generate`], [`refresh`] - `POST` action forms
//! - [`health`] - `GET /health` status and version for monitoring
//!
//! Action handlers always redirect back to `/` (303), where the status message of
//! the action is shown. All handlers share one [`crate::dashboard::Dashboard`]
//! through an axum `Extension`.
//!
//! ```rust,ignore
//! use axum::{Router, routing::{get, post}};
//! use zapdash::api;
//!
//! let app = Router::new()
//!     .route("/", get(api::index))
//!     .route("/sync", post(api::sync))
//!     .route("/health", get(api::health));
//! ```

mod actions;
mod health;

pub use actions::GenerateForm;
pub use actions::LoginForm;
pub use actions::SyncForm;
pub use actions::generate;
pub use actions::index;
pub use actions::login;
pub use actions::logout;
pub use actions::refresh;
pub use actions::sync;
pub use health::health;
