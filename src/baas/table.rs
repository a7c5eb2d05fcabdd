use reqwest::Method;
use serde_json::Value;

use crate::{
    baas::{BaasClient, RequestOptions},
    error::ApiError,
    http::Payload,
};

/// Read/insert access to one table, PostgREST style.
pub struct TableQuery<'a> {
    client: &'a BaasClient,
    table: String,
}

impl<'a> TableQuery<'a> {
    pub(crate) fn new(client: &'a BaasClient, table: &str) -> Self {
        Self {
            client,
            table: table.to_string(),
        }
    }

    fn path(&self) -> String {
        format!("/rest/v1/{}", self.table)
    }

    /// `GET /rest/v1/{table}?select={columns}`.
    pub async fn select(&self, columns: &str) -> Result<Vec<Value>, ApiError> {
        let mut options = RequestOptions::default().query("select", columns);
        if let Some(schema) = self.client.schema() {
            options = options.header("Accept-Profile", schema);
        }

        let payload = self
            .client
            .request(Method::GET, &self.path(), options)
            .await?;
        rows(payload)
    }

    /// Inserts one row (object) or several (array) and returns what was stored.
    pub async fn insert(&self, values: Value) -> Result<Vec<Value>, ApiError> {
        let mut options = RequestOptions::default()
            .header("Prefer", "return=representation")
            .body(values);
        if let Some(schema) = self.client.schema() {
            options = options.header("Content-Profile", schema);
        }

        let payload = self
            .client
            .request(Method::POST, &self.path(), options)
            .await?;
        rows(payload)
    }
}

fn rows(payload: Payload) -> Result<Vec<Value>, ApiError> {
    match payload {
        Payload::Json(Value::Array(rows)) => Ok(rows),
        Payload::Json(Value::Null) => Ok(Vec::new()),
        Payload::Json(row) => Ok(vec![row]),
        Payload::Text(text) if text.trim().is_empty() => Ok(Vec::new()),
        Payload::Text(text) => Err(ApiError::Decode(format!("expected rows, got `{}`", text.trim()))),
    }
}
