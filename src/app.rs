// src/app.rs

use color_eyre::eyre::{eyre, Result, WrapErr};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::info;

use crate::cli::Args;
use crate::core::knowledge_base::FingerprintDatabase;
use crate::core::models::DomainReport;
use crate::core::resolvers::{load_resolvers, ResolverRotator};
use crate::core::scanner::probe::NetworkProber;
use crate::core::scanner::Scanner;
use crate::core::targets::load_domains;
use crate::output::{render_json, render_line};

pub const USAGE: &str = "Usage: vanguard-takeover -d <domain> | -l <filename> [-f <url_or_local_path>] \
[-r <url_or_local_path>] [-t <int>] [--timeout <seconds>] [-s]";

/// Summary counters for the log once the scan is over.
#[derive(Debug, Default)]
pub struct ScanSummary {
    pub scanned: usize,
    pub vulnerable: usize,
    pub errors: usize,
}

/// Loads every input, runs the scan and prints one line per domain.
///
/// Any load or configuration failure is returned before the first domain is
/// probed; per-domain failures only ever show up as report lines.
pub async fn run(args: Args) -> Result<ScanSummary> {
    let domains = match (&args.domain, &args.domains) {
        (Some(domain), _) => vec![domain.clone()],
        (None, Some(path)) => load_domains(path).await.wrap_err("Error reading domains")?,
        (None, None) => return Err(eyre!(USAGE)),
    };

    let config = args.scan_config();
    config.validate()?;

    let loader = config.loader_client()?;
    let database = FingerprintDatabase::load(&args.fingerprints, &loader)
        .await
        .wrap_err("Error loading fingerprints")?;
    let resolvers = load_resolvers(&args.resolvers, &loader)
        .await
        .wrap_err("Error loading resolvers")?;
    let rotator = ResolverRotator::new(resolvers)?;

    let prober = NetworkProber::new(&config)?;
    let scanner = Scanner::new(prober, Arc::new(database), Arc::new(rotator), config);

    let (tx, mut rx) = mpsc::unbounded_channel::<DomainReport>();
    let printer = tokio::spawn({
        let silent = args.silent;
        let json = args.json;
        async move {
            let mut summary = ScanSummary::default();
            while let Some(report) = rx.recv().await {
                summary.scanned += 1;
                if report.is_vulnerable() {
                    summary.vulnerable += 1;
                } else if report.outcome.is_err() {
                    summary.errors += 1;
                }

                let line = if json { render_json(&report, silent) } else { render_line(&report, silent) };
                if let Some(line) = line {
                    println!("{line}");
                }
            }
            summary
        }
    });

    scanner.run(domains, tx).await;
    let summary = printer.await?;
    info!(
        scanned = summary.scanned,
        vulnerable = summary.vulnerable,
        errors = summary.errors,
        "All domains processed."
    );
    Ok(summary)
}
