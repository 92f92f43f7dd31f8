// src/core/scanner/mod.rs

// This file acts as the public interface for the `scanner` module.
// It declares the probe stages, the matcher, and hosts the orchestrator
// that runs them over a list of domains.
pub mod dns_scanner;
pub mod http_scanner;
pub mod matcher;
pub mod probe;

use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;
use tracing::{debug, error, info};

use crate::config::ScanConfig;
use crate::core::knowledge_base::FingerprintDatabase;
use crate::core::models::DomainReport;
use crate::core::resolvers::ResolverRotator;
use crate::core::targets::normalize_domain;
use self::matcher::match_fingerprints;
use self::probe::Prober;

/// Runs probe + match over many domains with a fixed pool of workers.
///
/// All shared state is read-only except the rotator's cursor, which the
/// rotator guards itself.
pub struct Scanner<P> {
    prober: Arc<P>,
    database: Arc<FingerprintDatabase>,
    rotator: Arc<ResolverRotator>,
    config: ScanConfig,
}

impl<P> Clone for Scanner<P> {
    fn clone(&self) -> Self {
        Self {
            prober: Arc::clone(&self.prober),
            database: Arc::clone(&self.database),
            rotator: Arc::clone(&self.rotator),
            config: self.config.clone(),
        }
    }
}

impl<P: Prober> Scanner<P> {
    pub fn new(prober: P, database: Arc<FingerprintDatabase>, rotator: Arc<ResolverRotator>, config: ScanConfig) -> Self {
        Self {
            prober: Arc::new(prober),
            database,
            rotator,
            config,
        }
    }

    /// Scans every domain and sends one report per domain to `reports` as
    /// soon as it is ready. Report order does not follow input order.
    ///
    /// Returns once every worker has drained the queue. Workers stop early
    /// only if the receiving side of `reports` is dropped.
    pub async fn run(&self, domains: Vec<String>, reports: mpsc::UnboundedSender<DomainReport>) {
        if domains.is_empty() {
            return;
        }

        let total = domains.len();
        let workers = self.config.concurrency.max(1);
        info!(domains = total, workers, "Starting scan.");

        // Pre-filled and closed: once drained, recv() yields None and workers exit.
        let (tx, rx) = mpsc::channel(total);
        for domain in domains {
            if tx.try_send(domain).is_err() {
                error!("Work queue rejected a domain.");
            }
        }
        drop(tx);
        let queue = Arc::new(Mutex::new(rx));

        let mut pool = JoinSet::new();
        for worker in 0..workers {
            let scanner = self.clone();
            let queue = Arc::clone(&queue);
            let reports = reports.clone();
            pool.spawn(async move {
                loop {
                    let next = queue.lock().await.recv().await;
                    let Some(domain) = next else { break };
                    let report = scanner.scan_domain(&domain).await;
                    if reports.send(report).is_err() {
                        debug!(worker, "Report receiver dropped, stopping worker.");
                        break;
                    }
                }
                debug!(worker, "Worker finished.");
            });
        }

        while let Some(joined) = pool.join_next().await {
            if let Err(e) = joined {
                error!(error = %e, "Scan worker panicked.");
            }
        }
        info!(domains = total, "Scan finished.");
    }

    /// Scans every domain and collects all reports.
    pub async fn scan(&self, domains: Vec<String>) -> Vec<DomainReport> {
        let (tx, mut rx) = mpsc::unbounded_channel();
        self.run(domains, tx).await;

        let mut reports = Vec::new();
        while let Some(report) = rx.recv().await {
            reports.push(report);
        }
        reports
    }

    /// Validates, probes and matches a single domain.
    ///
    /// A malformed name is reported as an error without consuming a resolver.
    pub async fn scan_domain(&self, input: &str) -> DomainReport {
        let domain = match normalize_domain(input) {
            Ok(domain) => domain,
            Err(e) => {
                debug!(domain = input, error = %e, "Skipping invalid domain.");
                return DomainReport::new(input, Err(e), None);
            }
        };

        let resolver = self.rotator.next();
        debug!(domain = %domain, %resolver, "Checking domain.");

        let result = self.prober.probe(&domain, resolver, self.config.timeout).await;
        let verdict = match_fingerprints(&result, &self.database);

        match verdict.service() {
            Some(service) => info!(domain = %domain, service, "Domain is vulnerable."),
            None => debug!(domain = %domain, "No fingerprint matched."),
        }
        DomainReport::new(input, Ok(verdict), Some(resolver))
    }
}
