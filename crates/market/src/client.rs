//! Marketstack EOD client.
//!
//! One GET per call, no retry, no cache. The API key never appears in the
//! returned envelope.

use crate::outcome::{EodOutcome, EodPayload};
use crate::query::{EodQuery, EodRequest};
use crate::transport::{redact_url, EodTransport, ReqwestTransport};
use agent_tools_core::{Error, MarketstackConfig, Result};
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::{debug, info, warn};

/// EOD client over a pluggable transport.
pub struct EodClient<T = ReqwestTransport> {
    config: MarketstackConfig,
    transport: T,
}

impl EodClient<ReqwestTransport> {
    /// Create a client backed by a blocking `reqwest` transport using the
    /// configured timeout.
    pub fn new(config: MarketstackConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(Duration::from_secs(config.timeout_secs))?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: EodTransport> EodClient<T> {
    /// Create a client with a custom transport.
    pub fn with_transport(config: MarketstackConfig, transport: T) -> Self {
        Self { config, transport }
    }

    /// Fetch end-of-day data. Every failure is reported in the envelope.
    pub fn get_eod_data(&self, request: &EodRequest) -> EodOutcome {
        debug!(symbols = %request.symbols, "get_eod_data: starting");

        match self.fetch(request) {
            Ok(payload) => {
                info!(
                    symbols = %payload.symbols,
                    count = payload.count,
                    "Fetched EOD data"
                );
                EodOutcome::Success(payload)
            }
            Err(e) => {
                warn!(symbols = %request.symbols, "get_eod_data failed: {}", e);
                e.into()
            }
        }
    }

    fn fetch(&self, request: &EodRequest) -> Result<EodPayload> {
        let api_key = self
            .config
            .resolve_api_key(request.api_key.as_deref())
            .ok_or_else(|| Error::config("No API key provided"))?;

        let query = EodQuery::from_request(request)?;
        let response = self
            .transport
            .get(&self.config.eod_url(), &query.to_params(api_key))?;

        let mut body = match serde_json::from_str::<Value>(&response.body)? {
            Value::Object(body) => body,
            _ => return Err(Error::parse("response body is not a JSON object")),
        };

        if response.status != 200 {
            return Err(Error::http(
                error_message(&body).unwrap_or("Unknown error"),
                response.status,
                redact_url(&response.url),
            ));
        }

        if body.contains_key("error") {
            return Err(Error::api(error_message(&body).unwrap_or("API error")));
        }

        let pagination = body
            .remove("pagination")
            .filter(|p| !p.is_null())
            .unwrap_or_else(|| Value::Object(Map::new()));

        let data = match body.remove("data") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(records)) => records,
            Some(_) => return Err(Error::parse("`data` is not a list")),
        };

        Ok(EodPayload {
            symbols: query.symbols.clone(),
            pagination,
            count: data.len(),
            data,
            params_used: query,
        })
    }
}

/// `error.message` from a provider body, if it is a string.
fn error_message(body: &Map<String, Value>) -> Option<&str> {
    body.get("error")?.get("message")?.as_str()
}
