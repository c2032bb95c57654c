//! Alert publication and resolution lookup.
//!
//! Both operations read a local JSON document and report the result as if
//! it had been exchanged over the event mesh. Failures are folded into the
//! returned envelope.

use crate::outcome::{PublishOutcome, ResolveOutcome};
use agent_tools_core::{json_label, lookup, AlertConfig, Error, Result};
use serde_json::Value;
use std::path::Path;
use tracing::{debug, error, info, warn};

/// Alert looked up when the caller names none.
pub const DEFAULT_ALERT_ID: &str = "AMBER-CA-2026-001";

/// Load the alert document at `config.data_file` and report it as published
/// to `config.topic`.
pub async fn publish_alert(config: &AlertConfig) -> PublishOutcome {
    debug!(path = %config.data_file.display(), "publish_alert: starting");

    match load_alert(&config.data_file).await {
        Ok(alert) => {
            let alert_id = json_label(alert.get("alert_id"));
            info!(alert_id = %alert_id, topic = %config.topic, "Loaded alert");
            PublishOutcome::Success {
                message: format!("Published alert {} to topic {}", alert_id, config.topic),
                alert,
            }
        }
        Err(e) => {
            error!(path = %config.data_file.display(), "publish_alert failed: {}", e);
            e.into()
        }
    }
}

/// Find the resolution for `alert_id` (default [`DEFAULT_ALERT_ID`]) in
/// `config.resolutions_file`.
pub async fn resolve_alert(alert_id: Option<&str>, config: &AlertConfig) -> ResolveOutcome {
    let alert_id = alert_id.unwrap_or(DEFAULT_ALERT_ID);
    debug!(alert_id, path = %config.resolutions_file.display(), "resolve_alert: starting");

    let resolution = match load_resolution(&config.resolutions_file, alert_id).await {
        Ok(resolution) => resolution,
        Err(e @ Error::NotFound(_)) => {
            warn!(alert_id, "{}", e);
            return e.into();
        }
        Err(e) => {
            error!(alert_id, "resolve_alert failed: {}", e);
            return e.into();
        }
    };

    let child_status = json_label(lookup(&resolution, &["resolution_details", "child_status"]));
    info!(alert_id, child_status = %child_status, "Resolved alert");

    ResolveOutcome::Success {
        message: format!("Alert {} resolved: {}", alert_id, child_status),
        resolution,
    }
}

async fn read_json(path: &Path) -> Result<Value> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| Error::from_io(e, path))?;
    Ok(serde_json::from_str(&raw)?)
}

async fn load_alert(path: &Path) -> Result<Value> {
    let alert = read_json(path).await?;
    if !alert.is_object() {
        return Err(Error::parse(format!(
            "alert document {} is not a JSON object",
            path.display()
        )));
    }
    Ok(alert)
}

async fn load_resolution(path: &Path, alert_id: &str) -> Result<Value> {
    let mut doc = read_json(path).await?;
    let resolutions = doc
        .get_mut("resolutions")
        .and_then(Value::as_array_mut)
        .ok_or_else(|| {
            Error::parse(format!(
                "resolutions document {} has no `resolutions` list",
                path.display()
            ))
        })?;

    let index = resolutions
        .iter()
        .position(|r| r.get("alert_id").and_then(Value::as_str) == Some(alert_id))
        .ok_or_else(|| Error::not_found(format!("Resolution for {} not found", alert_id)))?;

    Ok(resolutions.swap_remove(index))
}
