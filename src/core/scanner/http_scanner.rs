// src/core/scanner/http_scanner.rs

use std::time::Duration;
use tracing::debug;

/// A fetched HTTPS response: status code and fully read body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpObservation {
    pub status: u16,
    pub body: String,
}

/// Sends `GET https://<target>` and reads the whole body, bounded by `timeout`.
///
/// Certificate validation is whatever the `client` was built with (see
/// `ScanConfig::verify_tls`).
pub async fn run_http_probe(client: &reqwest::Client, target: &str, timeout: Duration) -> Result<HttpObservation, String> {
    let url = format!("https://{}", target);
    tokio::time::timeout(timeout, fetch(client, &url))
        .await
        .unwrap_or_else(|_| Err(format!("HTTP request timed out after {timeout:?}")))
}

pub(crate) async fn fetch(client: &reqwest::Client, url: &str) -> Result<HttpObservation, String> {
    debug!(url, "Sending HTTP request.");
    let response = client.get(url).send().await.map_err(|e| {
        debug!(url, error = %e, "HTTP request failed.");
        format!("HTTP request failed: {}", e)
    })?;

    let status = response.status().as_u16();
    debug!(url, status, "Received HTTP response.");

    let body = response.text().await.map_err(|e| {
        debug!(url, error = %e, "Failed to read response body.");
        format!("Failed to read response body: {}", e)
    })?;
    debug!(url, bytes = body.len(), "Successfully read response body.");

    Ok(HttpObservation { status, body })
}
