// src/cli.rs

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::{ScanConfig, DEFAULT_FINGERPRINTS_URL, DEFAULT_RESOLVERS_URL};

#[derive(Parser, Debug)]
#[command(author, version, about = "Detects subdomain takeover candidates from DNS and HTTP fingerprints", long_about = None)]
pub struct Args {
    /// A single domain to be checked
    #[arg(short, long, conflicts_with = "domains")]
    pub domain: Option<String>,

    /// File containing the domains to be checked, one per line
    #[arg(short = 'l', long)]
    pub domains: Option<PathBuf>,

    /// URL or local file path of the fingerprints JSON database
    #[arg(short, long, default_value = DEFAULT_FINGERPRINTS_URL)]
    pub fingerprints: String,

    /// URL or local file path of the resolver list
    #[arg(short, long, default_value = DEFAULT_RESOLVERS_URL)]
    pub resolvers: String,

    /// Number of concurrent workers
    #[arg(short, long, default_value = "5")]
    pub threads: usize,

    /// Timeout in seconds for DNS lookups and HTTP requests
    #[arg(long, default_value = "2")]
    pub timeout: u64,

    /// Only print vulnerable domains
    #[arg(short, long)]
    pub silent: bool,

    /// Enable debug logging on stderr
    #[arg(long)]
    pub debug: bool,

    /// Validate TLS certificates when fetching content (off by default)
    #[arg(long)]
    pub verify_tls: bool,

    /// Print one JSON object per domain instead of text lines
    #[arg(long)]
    pub json: bool,
}

impl Args {
    pub fn scan_config(&self) -> ScanConfig {
        ScanConfig {
            concurrency: self.threads,
            timeout: Duration::from_secs(self.timeout),
            verify_tls: self.verify_tls,
            ..ScanConfig::default()
        }
    }
}
