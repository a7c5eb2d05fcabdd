use reqwest::StatusCode;
use thiserror::Error;

/// Errors raised while talking to the invoicing backend or the hosted BaaS.
///
/// `Auth` and `Http` display exactly the best message the server gave us, so the
/// text can be shown to the user as-is.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{message}")]
    Auth { status: StatusCode, message: String },

    #[error("{message}")]
    Http { status: StatusCode, message: String },

    #[error(
        "Cannot reach the API at {base_url}. Check ZAPDASH_API_URL and that the backend accepts requests from this client (CORS/URL misconfiguration)."
    )]
    Network {
        base_url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Unexpected response from the API: {0}")]
    Decode(String),

    #[error("Not logged in. Run `zapdash login` first.")]
    NotLoggedIn,

    #[error("Invalid month `{0}`, expected YYYY-MM")]
    InvalidMonth(String),

    #[error("Missing configuration: {0}")]
    Config(String),
}

impl ApiError {
    /// HTTP status of the failed response, if the server answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Auth { status, .. } | ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Turns an HTTP error into an authentication error, leaving other kinds alone.
    pub fn into_auth(self) -> Self {
        match self {
            ApiError::Http { status, message } => ApiError::Auth { status, message },
            other => other,
        }
    }
}
