//! HTTP transport for the EOD client.

use crate::query::ACCESS_KEY_PARAM;
use agent_tools_core::{Error, Result};
use reqwest::Url;
use std::time::Duration;
use tracing::debug;

/// Raw HTTP response, as far as the client cares.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Final URL after redirects, including the query string.
    pub url: String,
    /// Response body text.
    pub body: String,
}

/// One blocking GET with query parameters.
///
/// Implementations report transport-level failures (DNS, connect, timeout,
/// body read) as [`Error::Network`]. Any HTTP status is a successful
/// transport result.
pub trait EodTransport {
    fn get(&self, url: &str, params: &[(&'static str, String)]) -> Result<HttpResponse>;
}

/// Blocking `reqwest` transport with a fixed timeout.
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    /// Build a transport whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

impl EodTransport for ReqwestTransport {
    fn get(&self, url: &str, params: &[(&'static str, String)]) -> Result<HttpResponse> {
        debug!("Sending request to: {}", url);

        // Errors carry the request URL, which includes the key.
        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .map_err(|e| Error::network(e.without_url().to_string()))?;

        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let body = response
            .text()
            .map_err(|e| Error::network(format!("Failed to read response body: {}", e.without_url())))?;

        Ok(HttpResponse {
            status,
            url: final_url,
            body,
        })
    }
}

/// Strip the API key from a URL's query string.
pub fn redact_url(raw: &str) -> String {
    let Ok(mut url) = Url::parse(raw) else {
        return raw.to_string();
    };

    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| *k != ACCESS_KEY_PARAM)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    if kept.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(kept);
    }

    url.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::serve_once;

    #[test]
    fn test_reqwest_transport_captures_response() {
        let (base_url, server) = serve_once("200 OK", r#"{"data": []}"#);
        let transport = ReqwestTransport::new(Duration::from_secs(5)).unwrap();
        let params = vec![(ACCESS_KEY_PARAM, "k-1".to_string()), ("symbols", "BRK-B".to_string())];

        let response = transport.get(&format!("{}/eod", base_url), &params).unwrap();
        let request = server.join().unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.url, format!("{}/eod?access_key=k-1&symbols=BRK-B", base_url));
        assert_eq!(response.body, r#"{"data": []}"#);
        assert!(request.starts_with("GET /v2/eod?access_key=k-1&symbols=BRK-B HTTP/1.1"));
    }

    #[test]
    fn test_reqwest_transport_connection_refused() {
        let transport = ReqwestTransport::new(Duration::from_secs(2)).unwrap();
        let params = vec![(ACCESS_KEY_PARAM, "supersecret".to_string())];

        let err = transport.get("http://127.0.0.1:1/v2/eod", &params).unwrap_err();

        assert!(matches!(err, Error::Network(_)));
        assert!(!err.to_string().contains("supersecret"));
    }

    #[test]
    fn test_redact_url_drops_key() {
        let redacted = redact_url("https://api.marketstack.com/v2/eod?access_key=secret&symbols=AAPL&limit=5");
        assert_eq!(redacted, "https://api.marketstack.com/v2/eod?symbols=AAPL&limit=5");
    }

    #[test]
    fn test_redact_url_only_key() {
        let redacted = redact_url("https://api.marketstack.com/v2/eod?access_key=secret");
        assert_eq!(redacted, "https://api.marketstack.com/v2/eod");
    }

    #[test]
    fn test_redact_url_unparseable() {
        assert_eq!(redact_url("not a url"), "not a url");
    }
}
