//! Response handling shared by the backend and BaaS clients.
//!
//! Every response body is read as text first and then decoded as JSON when
//! possible. A body that is not JSON is kept as plain text instead of failing, and
//! a non-2xx status always becomes an [`ApiError::Http`] carrying the most useful
//! message the body offers.

use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;

/// Fields checked, in order, for a human readable message.
const MESSAGE_FIELDS: [&str; 3] = ["detail", "message", "error_description"];

/// A decoded response body.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(Value),
    Text(String),
}

impl Payload {
    /// Decodes a body, degrading to plain text when it is not valid JSON.
    pub fn parse(body: &str) -> Self {
        match serde_json::from_str::<Value>(body) {
            Ok(value) => Payload::Json(value),
            Err(_) => Payload::Text(body.to_string()),
        }
    }

    /// Converts a JSON payload into `T`.
    pub fn into_typed<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        match self {
            Payload::Json(value) => {
                serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
            }
            Payload::Text(text) => Err(ApiError::Decode(format!(
                "expected JSON, got `{}`",
                shorten(&text)
            ))),
        }
    }

    /// Best message for a successful response.
    ///
    /// Uses the `message` field when present, the raw text for plain-text bodies
    /// and the compact JSON otherwise.
    pub fn into_message(self) -> String {
        match self {
            Payload::Json(value) => match value.get("message").and_then(Value::as_str) {
                Some(message) => message.to_string(),
                None => value.to_string(),
            },
            Payload::Text(text) => text.trim().to_string(),
        }
    }
}

/// Picks the message surfaced for a failed response.
///
/// A string `detail`, `message` or `error_description` wins. A `detail` that is
/// not a string (validation error lists) is rendered as compact JSON. Unparsable
/// bodies are returned verbatim, and empty or message-less bodies fall back to
/// `Request failed (<status>)`.
pub fn error_message(status: StatusCode, payload: &Payload) -> String {
    let fallback = || format!("Request failed ({})", status.as_u16());

    match payload {
        Payload::Json(value) => {
            for field in MESSAGE_FIELDS {
                match value.get(field) {
                    Some(Value::String(message)) if !message.trim().is_empty() => {
                        return message.clone();
                    }
                    Some(Value::Null) | Some(Value::String(_)) | None => {}
                    Some(other) if field == "detail" => return other.to_string(),
                    Some(_) => {}
                }
            }
            fallback()
        }
        Payload::Text(text) if text.trim().is_empty() => fallback(),
        Payload::Text(text) => text.clone(),
    }
}

/// Sends a request and applies the shared response contract.
///
/// `base_url` is only used to build the connectivity hint when the server cannot
/// be reached.
pub async fn execute(request: RequestBuilder, base_url: &str) -> Result<Payload, ApiError> {
    let network = |source: reqwest::Error| ApiError::Network {
        base_url: base_url.to_string(),
        source,
    };

    let response = request.send().await.map_err(network)?;
    let status = response.status();
    let body = response.text().await.map_err(network)?;
    let payload = Payload::parse(&body);

    if !status.is_success() {
        return Err(ApiError::Http {
            status,
            message: error_message(status, &payload),
        });
    }

    Ok(payload)
}

fn shorten(text: &str) -> String {
    const MAX: usize = 120;
    let text = text.trim();
    match text.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}…", &text[..idx]),
        None => text.to_string(),
    }
}
