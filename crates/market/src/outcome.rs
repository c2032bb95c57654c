//! Result envelopes returned by the market data operations.

use crate::query::EodQuery;
use crate::trends::analyze_price_trends;
use agent_tools_core::{Error, TrendAnalysis};
use serde::{Serialize, Serializer};
use serde_json::Value;

/// Coarse failure class reported in `error_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorType {
    /// Transport-level failure.
    Network,
    /// Anything unexpected during a fetch.
    Unknown,
    /// Statistics could not be computed.
    Analysis,
}

/// Successful EOD fetch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EodPayload {
    /// Normalized symbols that were requested.
    pub symbols: String,
    /// Provider pagination block, or `{}`.
    pub pagination: Value,
    /// Provider records in API order.
    pub data: Vec<Value>,
    /// `data.len()`.
    pub count: usize,
    /// Parameters sent, without the API key.
    pub params_used: EodQuery,
}

impl EodPayload {
    /// Run the trend analysis over this payload's records.
    pub fn analyze(&self) -> TrendOutcome {
        analyze_price_trends(&self.data)
    }
}

/// Failed EOD fetch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EodFailure {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<ErrorType>,
    /// Set for HTTP-level failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    /// Set for HTTP-level failures; the API key is stripped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_url: Option<String>,
}

impl EodFailure {
    fn message(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            error_type: None,
            status_code: None,
            request_url: None,
        }
    }

    fn typed(error: impl Into<String>, error_type: ErrorType) -> Self {
        Self {
            error_type: Some(error_type),
            ..Self::message(error)
        }
    }
}

impl From<Error> for EodFailure {
    fn from(err: Error) -> Self {
        match err {
            Error::Config(msg) | Error::InvalidInput(msg) => EodFailure::message(msg),
            Error::Network(detail) => {
                EodFailure::typed(format!("Request failed: {}", detail), ErrorType::Network)
            }
            Error::Api {
                message,
                status_code,
                request_url,
            } => EodFailure {
                status_code,
                request_url,
                ..EodFailure::message(message)
            },
            other => EodFailure::typed(format!("Unexpected error: {}", other), ErrorType::Unknown),
        }
    }
}

/// Result of [`EodClient::get_eod_data`](crate::EodClient::get_eod_data).
///
/// Serializes with a boolean `success` key next to the payload or failure
/// fields.
#[derive(Debug, Clone, PartialEq)]
pub enum EodOutcome {
    Success(EodPayload),
    Failure(EodFailure),
}

impl EodOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, EodOutcome::Success(_))
    }

    pub fn payload(&self) -> Option<&EodPayload> {
        match self {
            EodOutcome::Success(payload) => Some(payload),
            EodOutcome::Failure(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&EodFailure> {
        match self {
            EodOutcome::Success(_) => None,
            EodOutcome::Failure(failure) => Some(failure),
        }
    }
}

impl From<Error> for EodOutcome {
    fn from(err: Error) -> Self {
        EodOutcome::Failure(err.into())
    }
}

impl Serialize for EodOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Tagged<'a, T> {
            success: bool,
            #[serde(flatten)]
            inner: &'a T,
        }

        match self {
            EodOutcome::Success(payload) => Tagged {
                success: true,
                inner: payload,
            }
            .serialize(serializer),
            EodOutcome::Failure(failure) => Tagged {
                success: false,
                inner: failure,
            }
            .serialize(serializer),
        }
    }
}

/// Analysis failure: `{error}` or `{error, error_type: "analysis"}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisFailure {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<ErrorType>,
}

impl From<Error> for AnalysisFailure {
    fn from(err: Error) -> Self {
        match err {
            Error::InvalidInput(msg) => AnalysisFailure {
                error: msg,
                error_type: None,
            },
            other => AnalysisFailure {
                error: format!("Analysis failed: {}", other),
                error_type: Some(ErrorType::Analysis),
            },
        }
    }
}

/// Result of [`analyze_price_trends`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TrendOutcome {
    Analysis(TrendAnalysis),
    Failure(AnalysisFailure),
}

impl TrendOutcome {
    pub fn analysis(&self) -> Option<&TrendAnalysis> {
        match self {
            TrendOutcome::Analysis(analysis) => Some(analysis),
            TrendOutcome::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            TrendOutcome::Analysis(_) => None,
            TrendOutcome::Failure(failure) => Some(&failure.error),
        }
    }
}

impl From<Error> for TrendOutcome {
    fn from(err: Error) -> Self {
        TrendOutcome::Failure(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_network_failure_shape() {
        let outcome = EodOutcome::from(Error::network("operation timed out"));
        let value = serde_json::to_value(&outcome).unwrap();

        assert_eq!(
            value,
            json!({
                "success": false,
                "error": "Request failed: operation timed out",
                "error_type": "network"
            })
        );
    }

    #[test]
    fn test_http_failure_shape() {
        let outcome = EodOutcome::from(Error::http("Invalid access key", 401, "https://x.test/eod?symbols=AAPL"));
        let value = serde_json::to_value(&outcome).unwrap();

        assert_eq!(
            value,
            json!({
                "success": false,
                "error": "Invalid access key",
                "status_code": 401,
                "request_url": "https://x.test/eod?symbols=AAPL"
            })
        );
    }

    #[test]
    fn test_missing_key_shape() {
        let outcome = EodOutcome::from(Error::config("No API key provided"));
        let value = serde_json::to_value(&outcome).unwrap();

        assert_eq!(value, json!({"success": false, "error": "No API key provided"}));
    }

    #[test]
    fn test_unexpected_failure_shape() {
        let outcome = EodOutcome::from(Error::parse("response body is not a JSON object"));
        let failure = outcome.failure().unwrap();

        assert_eq!(failure.error_type, Some(ErrorType::Unknown));
        assert!(failure.error.starts_with("Unexpected error: "));
    }

    #[test]
    fn test_success_shape() {
        let payload = EodPayload {
            symbols: "AAPL".to_string(),
            pagination: json!({}),
            data: vec![json!({"close": 1.5})],
            count: 1,
            params_used: EodQuery {
                symbols: "AAPL".to_string(),
                date_from: None,
                date_to: None,
                exchange: None,
                limit: Some(5),
                offset: None,
                sort: None,
            },
        };
        let value = serde_json::to_value(&EodOutcome::Success(payload)).unwrap();

        assert_eq!(
            value,
            json!({
                "success": true,
                "symbols": "AAPL",
                "pagination": {},
                "data": [{"close": 1.5}],
                "count": 1,
                "params_used": {"symbols": "AAPL", "limit": 5}
            })
        );
    }

    #[test]
    fn test_analysis_failure_shapes() {
        let plain = serde_json::to_value(TrendOutcome::from(Error::invalid_input("No data to analyze"))).unwrap();
        assert_eq!(plain, json!({"error": "No data to analyze"}));

        let typed = serde_json::to_value(TrendOutcome::from(Error::analysis("bad close"))).unwrap();
        assert_eq!(typed, json!({"error": "Analysis failed: bad close", "error_type": "analysis"}));
    }
}
