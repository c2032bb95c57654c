//! EOD request parameters and their normalization.

use agent_tools_core::{Error, Result};
use chrono::NaiveDate;
use serde::Serialize;

/// Query parameter carrying the API key.
pub const ACCESS_KEY_PARAM: &str = "access_key";

/// Smallest page size the provider accepts.
pub const MIN_LIMIT: i64 = 1;

/// Largest page size the provider accepts.
pub const MAX_LIMIT: i64 = 1000;

/// Date format the provider expects.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Caller-facing EOD request, as supplied by the host.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EodRequest {
    /// One or more comma-separated tickers, e.g. `"aapl,brk.b"`.
    pub symbols: String,
    /// Start date, `YYYY-MM-DD`.
    pub date_from: Option<String>,
    /// End date, `YYYY-MM-DD`.
    pub date_to: Option<String>,
    /// Exchange MIC code, e.g. `XNAS`.
    pub exchange: Option<String>,
    /// Results per page; clamped to [1, 1000].
    pub limit: Option<i64>,
    /// Results to skip; floored at 0.
    pub offset: Option<i64>,
    /// `ASC` or `DESC`.
    pub sort: Option<String>,
    /// Per-request API key; overrides the configured one.
    pub api_key: Option<String>,
}

impl EodRequest {
    /// Create a request for the given symbols.
    pub fn new(symbols: impl Into<String>) -> Self {
        Self {
            symbols: symbols.into(),
            ..Self::default()
        }
    }

    pub fn date_from(mut self, date: impl Into<String>) -> Self {
        self.date_from = Some(date.into());
        self
    }

    pub fn date_to(mut self, date: impl Into<String>) -> Self {
        self.date_to = Some(date.into());
        self
    }

    /// Start date from a calendar day.
    pub fn date_from_day(self, day: NaiveDate) -> Self {
        self.date_from(day.format(DATE_FORMAT).to_string())
    }

    /// End date from a calendar day.
    pub fn date_to_day(self, day: NaiveDate) -> Self {
        self.date_to(day.format(DATE_FORMAT).to_string())
    }

    pub fn exchange(mut self, exchange: impl Into<String>) -> Self {
        self.exchange = Some(exchange.into());
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: i64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }
}

/// Normalize a ticker list: uppercase, trimmed, `.` replaced by `-`.
///
/// `"aapl, msft.b"` becomes `"AAPL,MSFT-B"`. Empty list elements are dropped.
pub fn normalize_symbols(raw: &str) -> String {
    raw.split(',')
        .map(|s| s.trim().to_uppercase().replace('.', "-"))
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(",")
}

/// Normalized query parameters, minus the API key.
///
/// This is what gets echoed back as `params_used`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EodQuery {
    pub symbols: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exchange: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
}

impl EodQuery {
    /// Normalize a request. Empty optional strings are treated as unset.
    pub fn from_request(request: &EodRequest) -> Result<Self> {
        let symbols = normalize_symbols(&request.symbols);
        if symbols.is_empty() {
            return Err(Error::invalid_input("No symbols provided"));
        }

        Ok(Self {
            symbols,
            date_from: non_empty(&request.date_from).map(str::to_string),
            date_to: non_empty(&request.date_to).map(str::to_string),
            exchange: non_empty(&request.exchange).map(str::to_uppercase),
            limit: request.limit.map(|l| l.clamp(MIN_LIMIT, MAX_LIMIT) as u32),
            offset: request.offset.map(|o| o.max(0) as u64),
            sort: non_empty(&request.sort).map(str::to_uppercase),
        })
    }

    /// Query string pairs sent to the provider, key first.
    pub fn to_params(&self, access_key: &str) -> Vec<(&'static str, String)> {
        let mut params = vec![
            (ACCESS_KEY_PARAM, access_key.to_string()),
            ("symbols", self.symbols.clone()),
        ];

        if let Some(date_from) = &self.date_from {
            params.push(("date_from", date_from.clone()));
        }
        if let Some(date_to) = &self.date_to {
            params.push(("date_to", date_to.clone()));
        }
        if let Some(exchange) = &self.exchange {
            params.push(("exchange", exchange.clone()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        if let Some(offset) = self.offset {
            params.push(("offset", offset.to_string()));
        }
        if let Some(sort) = &self.sort {
            params.push(("sort", sort.clone()));
        }

        params
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
