//! Descriptive statistics over an EOD price series.
//!
//! Index 0 of the input is treated as the most recent record.

use crate::outcome::TrendOutcome;
use agent_tools_core::{Error, PriceStats, Result, TrendAnalysis, VolumeStats};
use serde_json::{Map, Value};
use statrs::statistics::Statistics;
use tracing::debug;

/// Summarize close prices and volumes of `eod_data`.
///
/// Pure: reads its input, performs no I/O.
pub fn analyze_price_trends(eod_data: &[Value]) -> TrendOutcome {
    match compute(eod_data) {
        Ok(analysis) => TrendOutcome::Analysis(analysis),
        Err(e) => {
            debug!(records = eod_data.len(), "Trend analysis skipped: {}", e);
            e.into()
        }
    }
}

fn compute(eod_data: &[Value]) -> Result<TrendAnalysis> {
    if eod_data.is_empty() {
        return Err(Error::invalid_input("No data to analyze"));
    }

    let mut closes = Vec::with_capacity(eod_data.len());
    let mut volumes = Vec::with_capacity(eod_data.len());

    for record in eod_data.iter().filter_map(Value::as_object) {
        if let Some(close) = numeric_field(record, "close")? {
            closes.push(close);
        }
        if let Some(volume) = numeric_field(record, "volume")? {
            volumes.push(volume);
        }
    }

    let (Some(&current), Some(&last)) = (closes.first(), closes.last()) else {
        return Err(Error::invalid_input("No valid price data"));
    };

    let (average, highest, lowest) = summarize(&closes);
    let mut price_stats = PriceStats {
        current,
        highest,
        lowest,
        average,
        change: None,
        change_percent: None,
    };

    if closes.len() > 1 {
        let change = current - last;
        price_stats.change = Some(change);
        price_stats.change_percent = Some(if last != 0.0 { change / last * 100.0 } else { 0.0 });
    }

    let volume_stats = (!volumes.is_empty()).then(|| {
        let (average, highest, lowest) = summarize(&volumes);
        VolumeStats {
            average,
            highest,
            lowest,
        }
    });

    Ok(TrendAnalysis {
        price_stats,
        data_points: eod_data.len(),
        volume_stats,
    })
}

/// (mean, max, min) of a non-empty series.
fn summarize(values: &[f64]) -> (f64, f64, f64) {
    (
        Statistics::mean(values),
        Statistics::max(values),
        Statistics::min(values),
    )
}

/// Numeric value of `key`. Absent or null is `None`; finite numeric strings
/// are parsed; anything else, booleans and `"NaN"`/`"inf"` included, fails
/// the analysis.
fn numeric_field(record: &Map<String, Value>, key: &str) -> Result<Option<f64>> {
    match record.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_f64()
            .map(Some)
            .ok_or_else(|| Error::analysis(format!("{} value {} is not a float", key, n))),
        Some(Value::String(s)) => match s.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(Some(v)),
            Ok(_) => Err(Error::analysis(format!("{} value '{}' is not finite", key, s))),
            Err(_) => Err(Error::analysis(format!(
                "could not convert {} to float: '{}'",
                key, s
            ))),
        },
        Some(other) => Err(Error::analysis(format!(
            "{} has non-numeric value {}",
            key, other
        ))),
    }
}
