// src/core/targets.rs

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;
use tracing::info;
use url::{Host, Url};

use crate::core::sources::read_file;
use crate::error::{LoadError, ScanError};

/// One DNS label: letters, digits, hyphens and underscores, no leading or trailing hyphen.
static RE_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[a-z0-9_]|[a-z0-9_][a-z0-9_-]{0,61}[a-z0-9_])$").unwrap());

const MAX_NAME_LEN: usize = 253;

/// Reads a newline-delimited domain list. Blank lines are skipped; duplicates are kept.
pub async fn load_domains(path: &Path) -> Result<Vec<String>, LoadError> {
    let text = read_file(path).await?;
    let domains = parse_domains(&text);
    info!(path = %path.display(), count = domains.len(), "Domain list loaded.");
    Ok(domains)
}

pub fn parse_domains(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Turns user input into the host name that gets probed.
///
/// Accepts a bare FQDN (optionally with a trailing dot) or an http(s) URL, in
/// which case only its host is kept. Anything that is not a plain DNS name,
/// such as an IP literal or a name with invalid labels, is rejected.
pub fn normalize_domain(input: &str) -> Result<String, ScanError> {
    let invalid = |reason: &str| ScanError::InvalidDomain {
        domain: input.to_string(),
        reason: reason.to_string(),
    };

    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(invalid("empty name"));
    }

    let with_scheme = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };
    let url = Url::parse(&with_scheme).map_err(|e| invalid(&e.to_string()))?;

    let host = match url.host() {
        Some(Host::Domain(host)) => host.trim_end_matches('.').to_string(),
        Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => return Err(invalid("IP addresses have no DNS records to take over")),
        None => return Err(invalid("missing host")),
    };

    if host.is_empty() || host.len() > MAX_NAME_LEN {
        return Err(invalid("name length out of range"));
    }
    if let Some(label) = host.split('.').find(|label| !RE_LABEL.is_match(label)) {
        return Err(invalid(&format!("invalid label {label:?}")));
    }
    Ok(host)
}
