//! Core types and configuration for the agent tool crates.
//!
//! This crate provides shared types used across all other crates:
//! - Trend analysis output types and JSON helpers
//! - Configuration structures
//! - Common error types

pub mod config;
pub mod error;
pub mod types;

pub use config::{AlertConfig, Config, MarketstackConfig};
pub use error::{Error, Result};
pub use types::*;
