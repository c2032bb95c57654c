//! Mock alert intake for the agent tools.
//!
//! This crate handles:
//! - Loading a canned alert document and reporting it as published
//! - Looking up an alert's resolution in a canned resolutions document
//!
//! No message broker is contacted; the topic only appears in messages.

pub mod intake;
pub mod outcome;

pub use intake::{publish_alert, resolve_alert, DEFAULT_ALERT_ID};
pub use outcome::{PublishOutcome, ResolveOutcome};
