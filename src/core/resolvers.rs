// src/core/resolvers.rs

use rand::Rng;
use std::net::{IpAddr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, info};

use crate::core::sources::read_source;
use crate::error::{ConfigurationError, LoadError};

pub const DNS_PORT: u16 = 53;

/// Hands out DNS resolvers in round-robin order.
///
/// The cursor is only ever touched through a single atomic read-modify-write,
/// so concurrent workers never read the same position twice within a cycle
/// and never lose an advance.
#[derive(Debug)]
pub struct ResolverRotator {
    resolvers: Vec<SocketAddr>,
    cursor: AtomicUsize,
}

impl ResolverRotator {
    /// Creates a rotator starting at a random position, so repeated runs do
    /// not all start on the first resolver of the list.
    pub fn new(resolvers: Vec<SocketAddr>) -> Result<Self, ConfigurationError> {
        if resolvers.is_empty() {
            return Err(ConfigurationError::NoResolvers);
        }
        let start = rand::thread_rng().gen_range(0..resolvers.len());
        debug!(count = resolvers.len(), start, "Resolver rotator initialized.");
        Self::with_start(resolvers, start)
    }

    /// Creates a rotator with a fixed start position (taken modulo the list length).
    pub fn with_start(resolvers: Vec<SocketAddr>, start: usize) -> Result<Self, ConfigurationError> {
        if resolvers.is_empty() {
            return Err(ConfigurationError::NoResolvers);
        }
        let start = start % resolvers.len();
        Ok(Self { resolvers, cursor: AtomicUsize::new(start) })
    }

    /// Returns the resolver at the cursor and advances the cursor by one.
    pub fn next(&self) -> SocketAddr {
        let len = self.resolvers.len();
        let position = self
            .cursor
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| Some((current + 1) % len))
            .unwrap_or_else(|current| current);
        self.resolvers[position]
    }
}

/// Parses a newline-delimited resolver list.
///
/// Entries are IP literals (port 53 implied) or `ip:port` socket addresses.
/// Blank lines and `#` comments are skipped.
pub fn parse_resolvers(text: &str) -> Result<Vec<SocketAddr>, LoadError> {
    let mut resolvers = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let entry = raw.split('#').next().unwrap_or_default().trim();
        if entry.is_empty() {
            continue;
        }
        let addr = entry
            .parse::<IpAddr>()
            .map(|ip| SocketAddr::new(ip, DNS_PORT))
            .or_else(|_| entry.parse::<SocketAddr>())
            .map_err(|_| LoadError::InvalidResolver { line: index + 1, entry: entry.to_string() })?;
        resolvers.push(addr);
    }
    Ok(resolvers)
}

/// Loads and parses a resolver list from a URL or a local file.
pub async fn load_resolvers(source: &str, client: &reqwest::Client) -> Result<Vec<SocketAddr>, LoadError> {
    let text = read_source(source, client).await?;
    let resolvers = parse_resolvers(&text)?;
    if resolvers.is_empty() {
        return Err(ConfigurationError::NoResolvers.into());
    }
    info!(source, count = resolvers.len(), "Resolver list loaded.");
    Ok(resolvers)
}
