// src/core/scanner/dns_scanner.rs

use std::collections::BTreeSet;
use std::net::SocketAddr;
use std::time::Duration;
use tracing::debug;

use crate::core::models::ScanResult;
use hickory_resolver::config::{LookupIpStrategy, NameServerConfig, Protocol, ResolverConfig, ResolverOpts};
use hickory_resolver::proto::rr::{RData, RecordType};
use hickory_resolver::TokioAsyncResolver;

/// What the DNS half of a probe observed for one domain.
#[derive(Debug, Clone)]
pub struct DnsObservation {
    pub cname: ScanResult<String>,
    pub addresses: ScanResult<BTreeSet<String>>,
}

/// Builds a resolver that talks only to `nameserver`, over UDP, with a single attempt.
///
/// The system configuration and hosts file are ignored so every query goes to
/// the resolver picked by the rotator.
pub fn build_resolver(nameserver: SocketAddr, timeout: Duration) -> TokioAsyncResolver {
    let mut config = ResolverConfig::new();
    config.add_name_server(NameServerConfig::new(nameserver, Protocol::Udp));

    let mut opts = ResolverOpts::default();
    opts.timeout = timeout;
    opts.attempts = 1;
    opts.use_hosts_file = false;
    opts.ip_strategy = LookupIpStrategy::Ipv4AndIpv6;
    opts.validate = false;

    TokioAsyncResolver::tokio(config, opts)
}

/// Runs the CNAME and A/AAAA lookups for `target` concurrently, each bounded by `timeout`.
pub async fn run_dns_probe(target: &str, nameserver: SocketAddr, timeout: Duration) -> DnsObservation {
    debug!(target, %nameserver, "Starting DNS probe.");
    let resolver = build_resolver(nameserver, timeout);

    let (cname, addresses) = tokio::join!(
        with_deadline(timeout, lookup_cname(&resolver, target)),
        with_deadline(timeout, lookup_addresses(&resolver, target))
    );

    debug!(target, cname = ?cname, addresses = ?addresses, "DNS probe finished.");
    DnsObservation { cname, addresses }
}

async fn with_deadline<T>(
    timeout: Duration,
    lookup: impl std::future::Future<Output = ScanResult<T>>,
) -> ScanResult<T> {
    tokio::time::timeout(timeout, lookup)
        .await
        .unwrap_or_else(|_| Err(format!("DNS lookup timed out after {timeout:?}")))
}

/// Looks up the CNAME target of a domain. The trailing root dot is stripped.
async fn lookup_cname(resolver: &TokioAsyncResolver, target: &str) -> ScanResult<String> {
    debug!(target, "Looking up CNAME record.");
    match resolver.lookup(target, RecordType::CNAME).await {
        Ok(lookup) => {
            let cname = lookup.iter().find_map(|rdata| match rdata {
                RData::CNAME(name) => Some(name.to_string().trim_end_matches('.').to_string()),
                _ => None,
            });
            match cname {
                Some(cname) => {
                    debug!(target, cname = %cname, "CNAME record found.");
                    Ok(Some(cname))
                }
                None => {
                    debug!(target, "No CNAME record in the answer.");
                    Ok(None)
                }
            }
        }
        Err(e) => {
            debug!(target, error = %e, "CNAME lookup failed.");
            Err(format!("DNS Error: {}", e))
        }
    }
}

/// Looks up the A and AAAA records of a domain.
async fn lookup_addresses(resolver: &TokioAsyncResolver, target: &str) -> ScanResult<BTreeSet<String>> {
    debug!(target, "Looking up A/AAAA records.");
    match resolver.lookup_ip(target).await {
        Ok(lookup) => {
            let addresses: BTreeSet<String> = lookup.iter().map(|ip| ip.to_string()).collect();
            if addresses.is_empty() {
                debug!(target, "No A/AAAA records found.");
                return Ok(None);
            }
            debug!(target, count = addresses.len(), "A/AAAA records found.");
            Ok(Some(addresses))
        }
        Err(e) => {
            debug!(target, error = %e, "A/AAAA lookup failed.");
            Err(format!("DNS Error: {}", e))
        }
    }
}
