//! Result envelopes returned by the alert operations.

use agent_tools_core::Error;
use serde::Serialize;
use serde_json::Value;

/// Result of [`publish_alert`](crate::publish_alert).
///
/// Serializes as `{"status": "success", "alert", "message"}` or
/// `{"status": "error", "message"}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum PublishOutcome {
    Success { alert: Value, message: String },
    Error { message: String },
}

impl PublishOutcome {
    /// Whether the alert was published.
    pub fn is_success(&self) -> bool {
        matches!(self, PublishOutcome::Success { .. })
    }

    /// Human-readable message, present in both variants.
    pub fn message(&self) -> &str {
        match self {
            PublishOutcome::Success { message, .. } | PublishOutcome::Error { message } => message,
        }
    }
}

impl From<Error> for PublishOutcome {
    fn from(err: Error) -> Self {
        PublishOutcome::Error {
            message: err.to_string(),
        }
    }
}

/// Result of [`resolve_alert`](crate::resolve_alert).
///
/// Serializes as `{"status": "success", "resolution", "message"}` or
/// `{"status": "error", "message"}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ResolveOutcome {
    Success { resolution: Value, message: String },
    Error { message: String },
}

impl ResolveOutcome {
    /// Whether a resolution was found.
    pub fn is_success(&self) -> bool {
        matches!(self, ResolveOutcome::Success { .. })
    }

    pub fn message(&self) -> &str {
        match self {
            ResolveOutcome::Success { message, .. } | ResolveOutcome::Error { message } => message,
        }
    }
}

impl From<Error> for ResolveOutcome {
    fn from(err: Error) -> Self {
        ResolveOutcome::Error {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_publish_success_shape() {
        let outcome = PublishOutcome::Success {
            alert: json!({"alert_id": "A-1"}),
            message: "Published alert A-1 to topic alert/received".to_string(),
        };

        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(
            value,
            json!({
                "status": "success",
                "alert": {"alert_id": "A-1"},
                "message": "Published alert A-1 to topic alert/received"
            })
        );
    }

    #[test]
    fn test_error_shape() {
        let outcome = ResolveOutcome::from(Error::not_found("Resolution for Y not found"));
        assert!(!outcome.is_success());

        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value, json!({"status": "error", "message": "Resolution for Y not found"}));
    }
}
