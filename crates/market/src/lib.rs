//! End-of-day market data tools.
//!
//! This crate handles:
//! - Request normalization (symbols, limit/offset clamping)
//! - A single-shot Marketstack EOD fetch behind a swappable transport
//! - Descriptive statistics over the returned close/volume series

pub mod query;
pub mod transport;
pub mod client;
pub mod outcome;
pub mod trends;

#[cfg(test)]
mod test_support;

pub use query::{normalize_symbols, EodQuery, EodRequest};
pub use transport::{EodTransport, HttpResponse, ReqwestTransport};
pub use client::EodClient;
pub use outcome::{AnalysisFailure, EodFailure, EodOutcome, EodPayload, ErrorType, TrendOutcome};
pub use trends::analyze_price_trends;
