//! PyO3 bindings for the agent tools.
//!
//! Exposes the four tool operations to a Python agent host:
//! - Alert publication and resolution lookup
//! - End-of-day market data fetch
//! - Price trend analysis
//!
//! Every function returns its result envelope as a JSON string. Arguments
//! are taken as loose Python objects and coerced in the function body, so a
//! wrong type or a bad configuration becomes an error envelope instead of a
//! Python exception.

use chrono::NaiveDate;
use pyo3::exceptions::PyRuntimeError;
use pyo3::prelude::*;
use pyo3::types::PyString;
use serde::Serialize;
use serde_json::Value;
use std::future::Future;

use agent_tools_alerts::{PublishOutcome, ResolveOutcome};
use agent_tools_core::{AlertConfig, Config, Error, MarketstackConfig, Result};
use agent_tools_market::{EodClient, EodOutcome, EodRequest, TrendOutcome};

// ============================================================================
// Argument Coercion
// ============================================================================

/// A date argument as the host supplied it.
enum DateArg {
    Text(String),
    Day(NaiveDate),
}

/// Extract an optional argument. `None` (absent or Python `None`) is `Ok(None)`.
fn extract_opt<'py, T>(name: &str, value: Option<&Bound<'py, PyAny>>) -> Result<Option<T>>
where
    T: FromPyObject<'py>,
{
    match value {
        None => Ok(None),
        Some(v) if v.is_none() => Ok(None),
        Some(v) => v
            .extract::<T>()
            .map(Some)
            .map_err(|e| Error::invalid_input(format!("argument '{}': {}", name, e))),
    }
}

/// Extract a date argument given either as a `YYYY-MM-DD` string or as a
/// `datetime.date`.
fn extract_date(name: &str, value: Option<&Bound<'_, PyAny>>) -> Result<Option<DateArg>> {
    match value {
        Some(v) if !v.is_none() && !v.is_instance_of::<PyString>() => {
            Ok(extract_opt::<NaiveDate>(name, value)?.map(DateArg::Day))
        }
        _ => Ok(extract_opt::<String>(name, value)?.map(DateArg::Text)),
    }
}

fn with_date_from(request: EodRequest, date: Option<DateArg>) -> EodRequest {
    match date {
        Some(DateArg::Text(text)) => request.date_from(text),
        Some(DateArg::Day(day)) => request.date_from_day(day),
        None => request,
    }
}

fn with_date_to(request: EodRequest, date: Option<DateArg>) -> EodRequest {
    match date {
        Some(DateArg::Text(text)) => request.date_to(text),
        Some(DateArg::Day(day)) => request.date_to_day(day),
        None => request,
    }
}

fn to_json<T: Serialize>(value: &T) -> PyResult<String> {
    serde_json::to_string(value).map_err(|e| PyRuntimeError::new_err(e.to_string()))
}

/// Base configuration: the file at `config_path` if given, defaults otherwise.
fn base_config(config_path: Option<String>) -> Result<Config> {
    match config_path {
        Some(path) => Config::from_file(path),
        None => Ok(Config::default()),
    }
}

/// Alert configuration. `config_json` replaces the alerts section.
fn alert_config(config_path: Option<String>, config_json: Option<String>) -> Result<AlertConfig> {
    match config_json {
        Some(json) => AlertConfig::from_json_str(&json),
        None => Ok(base_config(config_path)?.alerts),
    }
}

/// Marketstack configuration. `config_json` replaces the marketstack
/// section; the environment fills in a missing key.
fn marketstack_config(
    config_path: Option<String>,
    config_json: Option<String>,
) -> Result<MarketstackConfig> {
    let mut config = match config_json {
        Some(json) => serde_json::from_str(&json)?,
        None => base_config(config_path)?.marketstack,
    };
    if config.api_key.is_none() {
        config.api_key = MarketstackConfig::from_env().api_key;
    }
    Ok(config)
}

/// Drive an alert operation to completion on a private current-thread runtime.
fn block_on<F: Future>(future: F) -> Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    Ok(runtime.block_on(future))
}

// ============================================================================
// Alert Intake
// ============================================================================

/// Load the configured alert document and report it as published.
#[pyfunction]
#[pyo3(signature = (config_json=None, config_path=None))]
fn publish_alert(py: Python<'_>, config_json: Option<&Bound<'_, PyAny>>, config_path: Option<&Bound<'_, PyAny>>) -> PyResult<String> {
    let args = (|| -> Result<_> {
        Ok((
            extract_opt::<String>("config_json", config_json)?,
            extract_opt::<String>("config_path", config_path)?,
        ))
    })();

    let outcome = py.allow_threads(move || -> Result<PublishOutcome> {
        let (config_json, config_path) = args?;
        let config = alert_config(config_path, config_json)?;
        block_on(async move { agent_tools_alerts::publish_alert(&config).await })
    });

    to_json(&outcome.unwrap_or_else(PublishOutcome::from))
}

/// Look up the resolution for an alert id. A missing or `None` id falls
/// back to the default alert.
#[pyfunction]
#[pyo3(signature = (alert_id=None, config_json=None, config_path=None))]
fn resolve_alert(
    py: Python<'_>,
    alert_id: Option<&Bound<'_, PyAny>>,
    config_json: Option<&Bound<'_, PyAny>>,
    config_path: Option<&Bound<'_, PyAny>>,
) -> PyResult<String> {
    let args = (|| -> Result<_> {
        Ok((
            extract_opt::<String>("alert_id", alert_id)?,
            extract_opt::<String>("config_json", config_json)?,
            extract_opt::<String>("config_path", config_path)?,
        ))
    })();

    let outcome = py.allow_threads(move || -> Result<ResolveOutcome> {
        let (alert_id, config_json, config_path) = args?;
        let config = alert_config(config_path, config_json)?;
        block_on(async move {
            agent_tools_alerts::resolve_alert(alert_id.as_deref(), &config).await
        })
    });

    to_json(&outcome.unwrap_or_else(ResolveOutcome::from))
}

// ============================================================================
// Stock Data
// ============================================================================

/// Fetch end-of-day data from Marketstack.
#[pyfunction]
#[pyo3(signature = (
    symbols=None,
    date_from=None,
    date_to=None,
    exchange=None,
    limit=None,
    offset=None,
    sort=None,
    marketstack_api_key=None,
    config_json=None,
    config_path=None,
))]
#[allow(clippy::too_many_arguments)]
fn get_eod_data(
    py: Python<'_>,
    symbols: Option<&Bound<'_, PyAny>>,
    date_from: Option<&Bound<'_, PyAny>>,
    date_to: Option<&Bound<'_, PyAny>>,
    exchange: Option<&Bound<'_, PyAny>>,
    limit: Option<&Bound<'_, PyAny>>,
    offset: Option<&Bound<'_, PyAny>>,
    sort: Option<&Bound<'_, PyAny>>,
    marketstack_api_key: Option<&Bound<'_, PyAny>>,
    config_json: Option<&Bound<'_, PyAny>>,
    config_path: Option<&Bound<'_, PyAny>>,
) -> PyResult<String> {
    let args = (|| -> Result<_> {
        let request = EodRequest {
            symbols: extract_opt::<String>("symbols", symbols)?.unwrap_or_default(),
            exchange: extract_opt("exchange", exchange)?,
            limit: extract_opt("limit", limit)?,
            offset: extract_opt("offset", offset)?,
            sort: extract_opt("sort", sort)?,
            api_key: extract_opt("marketstack_api_key", marketstack_api_key)?,
            ..EodRequest::default()
        };
        let request = with_date_from(request, extract_date("date_from", date_from)?);
        let request = with_date_to(request, extract_date("date_to", date_to)?);
        Ok((
            request,
            extract_opt::<String>("config_json", config_json)?,
            extract_opt::<String>("config_path", config_path)?,
        ))
    })();

    let outcome = py.allow_threads(move || -> EodOutcome {
        let fetched = args.and_then(|(request, config_json, config_path)| {
            let client = EodClient::new(marketstack_config(config_path, config_json)?)?;
            Ok(client.get_eod_data(&request))
        });
        fetched.unwrap_or_else(|e| {
            tracing::warn!("get_eod_data rejected: {}", e);
            e.into()
        })
    });

    to_json(&outcome)
}

/// Summarize a JSON array of EOD records.
#[pyfunction]
#[pyo3(signature = (eod_data_json=None))]
fn analyze_price_trends(eod_data_json: Option<&Bound<'_, PyAny>>) -> PyResult<String> {
    let records = extract_opt::<String>("eod_data_json", eod_data_json).and_then(|json| {
        match json {
            Some(json) => Ok(serde_json::from_str::<Vec<Value>>(&json)?),
            None => Ok(Vec::new()),
        }
    });

    let outcome = match records {
        Ok(records) => agent_tools_market::analyze_price_trends(&records),
        Err(e) => TrendOutcome::from(e),
    };

    to_json(&outcome)
}

// ============================================================================
// Module Definition
// ============================================================================

/// Agent Tools - alert intake and market data tools for Python agent hosts.
#[pymodule]
fn agent_tools(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Alert intake
    m.add_function(wrap_pyfunction!(publish_alert, m)?)?;
    m.add_function(wrap_pyfunction!(resolve_alert, m)?)?;

    // Stock data
    m.add_function(wrap_pyfunction!(get_eod_data, m)?)?;
    m.add_function(wrap_pyfunction!(analyze_price_trends, m)?)?;

    Ok(())
}
