// src/core/scanner/probe.rs

use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;
use tracing::debug;

use super::dns_scanner::run_dns_probe;
use super::http_scanner::run_http_probe;
use crate::config::ScanConfig;
use crate::core::models::ProbeResult;
use crate::error::ConfigurationError;

/// Collects the raw observations for one domain.
///
/// Implementations never fail: every sub-probe that errors or times out just
/// leaves its part of the `ProbeResult` empty.
pub trait Prober: Send + Sync + 'static {
    fn probe(&self, domain: &str, resolver: SocketAddr, timeout: Duration) -> impl Future<Output = ProbeResult> + Send;
}

/// Probes over the network: CNAME and A/AAAA through the given resolver, and
/// an HTTPS GET to the domain itself.
#[derive(Debug, Clone)]
pub struct NetworkProber {
    http: reqwest::Client,
}

impl NetworkProber {
    pub fn new(config: &ScanConfig) -> Result<Self, ConfigurationError> {
        Ok(Self::with_client(config.http_client()?))
    }

    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

impl Prober for NetworkProber {
    async fn probe(&self, domain: &str, resolver: SocketAddr, timeout: Duration) -> ProbeResult {
        let (dns, http) = tokio::join!(
            run_dns_probe(domain, resolver, timeout),
            run_http_probe(&self.http, domain, timeout)
        );

        let mut result = ProbeResult::default();
        match dns.cname {
            Ok(cname) => result.cname = cname.unwrap_or_default(),
            Err(e) => result.cname_error = Some(e),
        }
        match dns.addresses {
            Ok(addresses) => result.addresses = addresses.unwrap_or_default(),
            Err(e) => result.address_error = Some(e),
        }
        match http {
            Ok(observation) => {
                result.response_status = Some(observation.status);
                result.response_body = observation.body;
            }
            Err(e) => result.http_error = Some(e),
        }

        debug!(
            domain,
            cname = %result.cname,
            addresses = result.addresses.len(),
            status = ?result.response_status,
            "Probe finished."
        );
        result
    }
}
