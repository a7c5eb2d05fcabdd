use std::{fmt, str::FromStr};

use chrono::{Datelike, Months, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tabled::Tabled;

use crate::error::ApiError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPayload {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncRequest {
    pub access_token: String,
    pub history_days: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Invoice {
    #[serde(deserialize_with = "string_or_number")]
    pub invoice_id: String,
    #[serde(default)]
    pub owner_id: Option<String>,
    pub period_start: String,
    pub period_end: String,
    #[serde(default)]
    pub total_amount: Option<f64>,
    #[serde(default)]
    pub pdf_url: Option<String>,
    #[serde(default)]
    pub generated_at: Option<String>,
}

impl Invoice {
    /// Link to the invoice PDF. Relative links are resolved against the API base.
    ///
    /// `None` while the backend has no PDF for the invoice.
    pub fn pdf_link(&self, api_base: &str) -> Option<String> {
        let url = self.pdf_url.as_deref().map(str::trim).filter(|u| !u.is_empty())?;
        if url.starts_with("http://") || url.starts_with("https://") {
            return Some(url.to_string());
        }

        let base = api_base.trim_end_matches('/');
        if url.starts_with('/') {
            Some(format!("{}{}", base, url))
        } else {
            Some(format!("{}/{}", base, url))
        }
    }

    /// Amount with two decimals, or `n/a` when the backend sent none.
    pub fn amount(&self) -> String {
        match self.total_amount {
            Some(amount) => format!("{:.2} €", amount),
            None => "n/a".to_string(),
        }
    }

    pub fn label(&self) -> String {
        format!(
            "Invoice {} to {} ({})",
            self.period_start,
            self.period_end,
            self.amount()
        )
    }
}

#[derive(Tabled)]
pub struct InvoiceTableRow {
    pub id: String,
    pub period: String,
    pub amount: String,
    pub generated: String,
    pub pdf: String,
}

impl InvoiceTableRow {
    pub fn from_invoice(invoice: &Invoice, api_base: &str) -> Self {
        Self {
            id: invoice.invoice_id.clone(),
            period: format!("{} to {}", invoice.period_start, invoice.period_end),
            amount: invoice.amount(),
            generated: invoice.generated_at.clone().unwrap_or_default(),
            pdf: invoice.pdf_link(api_base).unwrap_or_default(),
        }
    }
}

/// A billing month in `YYYY-MM` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TargetMonth {
    year: i32,
    month: u32,
}

impl TargetMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    /// The month before the one containing `date`.
    pub fn previous_of(date: NaiveDate) -> Self {
        let first = date.with_day(1).unwrap_or(date);
        let prev = first.checked_sub_months(Months::new(1)).unwrap_or(first);
        Self {
            year: prev.year(),
            month: prev.month(),
        }
    }

    /// Last completed calendar month, the default billing target.
    pub fn last_completed() -> Self {
        Self::previous_of(Utc::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }
}

impl fmt::Display for TargetMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for TargetMonth {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ApiError::InvalidMonth(s.to_string());
        let trimmed = s.trim();

        let (year, month) = trimmed.split_once('-').ok_or_else(invalid)?;
        let digits = year.chars().chain(month.chars()).all(|c| c.is_ascii_digit());
        if year.len() != 4 || month.len() != 2 || !digits {
            return Err(invalid());
        }

        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        Self::new(year, month).ok_or_else(invalid)
    }
}

/// Value parser for clap arguments taking a month.
pub fn parse_target_month(s: &str) -> Result<TargetMonth, String> {
    s.parse::<TargetMonth>().map_err(|e| e.to_string())
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "invoice_id must be a string or number, got {}",
            other
        ))),
    }
}
