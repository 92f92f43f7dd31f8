// src/config.rs

use std::time::Duration;
use tracing::debug;

use crate::error::ConfigurationError;

/// Fingerprint database used when `--fingerprints` is not given.
pub const DEFAULT_FINGERPRINTS_URL: &str =
    "https://raw.githubusercontent.com/topscoder/subgomain/main/tests/testfingerprints.json";

/// Resolver list used when `--resolvers` is not given.
pub const DEFAULT_RESOLVERS_URL: &str = "https://raw.githubusercontent.com/trickest/resolvers/main/resolvers.txt";

pub const DEFAULT_CONCURRENCY: usize = 5;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);
const LOADER_TIMEOUT: Duration = Duration::from_secs(30);

/// Runtime settings shared by every worker of a scan.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Number of concurrent workers.
    pub concurrency: usize,
    /// Deadline applied to each DNS lookup and to the HTTPS fetch.
    pub timeout: Duration,
    /// Validate TLS certificates on the content probe.
    ///
    /// Off by default: a taken-over or abandoned host often serves an invalid or
    /// mismatched certificate, and rejecting it would hide the response body.
    pub verify_tls: bool,
    pub user_agent: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            timeout: DEFAULT_TIMEOUT,
            verify_tls: false,
            user_agent: format!("VanguardTakeover/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ScanConfig {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.concurrency == 0 {
            return Err(ConfigurationError::InvalidConcurrency(self.concurrency));
        }
        if self.timeout.is_zero() {
            return Err(ConfigurationError::InvalidTimeout);
        }
        Ok(())
    }

    /// Builds the HTTP client used for the content probe and for remote loaders.
    pub fn http_client(&self) -> Result<reqwest::Client, ConfigurationError> {
        debug!(verify_tls = self.verify_tls, timeout = ?self.timeout, "Building HTTP client.");
        reqwest::Client::builder()
            .user_agent(self.user_agent.as_str())
            .timeout(self.timeout)
            .danger_accept_invalid_certs(!self.verify_tls)
            .build()
            .map_err(ConfigurationError::HttpClient)
    }

    /// Client for downloading the fingerprint database and resolver list.
    /// Certificates are always validated here.
    pub fn loader_client(&self) -> Result<reqwest::Client, ConfigurationError> {
        reqwest::Client::builder()
            .user_agent(self.user_agent.as_str())
            .timeout(LOADER_TIMEOUT)
            .build()
            .map_err(ConfigurationError::HttpClient)
    }
}
