// src/error.rs

//! Error types for the takeover scanner.
//!
//! Load-time failures (`LoadError`, `ConfigurationError`) abort the process before
//! any domain is scanned. `ScanError` is per-domain and only ever ends up inside a
//! `DomainReport`.

use serde::{Serialize, Serializer};
use std::path::PathBuf;
use thiserror::Error;

/// Invalid or unusable scan configuration.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("resolver list is empty")]
    NoResolvers,

    #[error("concurrency must be at least 1 (got {0})")]
    InvalidConcurrency(usize),

    #[error("timeout must be greater than zero")]
    InvalidTimeout,

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

/// Failure while loading the fingerprint database, the resolver list or the domain list.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to download {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("malformed fingerprint database: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid resolver on line {line}: {entry:?}")]
    InvalidResolver { line: usize, entry: String },

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

/// Per-domain failure that is distinct from a "not vulnerable" verdict.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    #[error("invalid domain {domain:?}: {reason}")]
    InvalidDomain { domain: String, reason: String },
}

impl Serialize for ScanError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
