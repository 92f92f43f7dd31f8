// src/core/models.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use std::net::SocketAddr;
use strum::{AsRefStr, Display};

use crate::error::ScanError;

// --- Tipi di Risultato Riutilizzabili ---
// Reusable Result Types
// A lookup outcome: a value, nothing found, or the reason the lookup failed.
pub type ScanResult<T> = Result<Option<T>, String>;

// --- Modelli Fingerprint ---
// Fingerprint Models

/// A signature describing the detectable characteristics of one takeover-prone service.
///
/// Each non-empty indicator list is a required category when matching: every
/// category the fingerprint declares must fire, while a single indicator inside
/// a category is enough for that category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "RawFingerprint")]
pub struct Fingerprint {
    pub service: String,
    #[serde(rename = "cname")]
    pub cname_indicators: Vec<String>,
    #[serde(rename = "a")]
    pub a_record_indicators: Vec<String>,
    #[serde(rename = "fingerprint")]
    pub content_indicators: Vec<String>,
    /// Only meaningful together with `content_indicators`.
    #[serde(rename = "http_status", skip_serializing_if = "Option::is_none")]
    pub expected_http_status: Option<u16>,
    pub vulnerable: bool,
}

impl Fingerprint {
    /// Returns `true` if at least one indicator category is populated.
    pub fn has_indicators(&self) -> bool {
        !self.cname_indicators.is_empty()
            || !self.a_record_indicators.is_empty()
            || !self.content_indicators.is_empty()
    }
}

/// The on-disk shape of a fingerprint, before normalization.
#[derive(Deserialize)]
struct RawFingerprint {
    #[serde(default)]
    service: String,
    #[serde(default, deserialize_with = "string_or_list")]
    cname: Vec<String>,
    #[serde(default, deserialize_with = "string_or_list")]
    a: Vec<String>,
    #[serde(default, deserialize_with = "string_or_list")]
    fingerprint: Vec<String>,
    #[serde(default)]
    http_status: Option<u16>,
    #[serde(default)]
    vulnerable: bool,
    #[serde(default)]
    status: Option<String>,
}

impl From<RawFingerprint> for Fingerprint {
    fn from(raw: RawFingerprint) -> Self {
        let flagged_by_status = raw
            .status
            .as_deref()
            .is_some_and(|s| s.trim().eq_ignore_ascii_case("vulnerable"));

        Self {
            service: raw.service,
            cname_indicators: raw.cname,
            a_record_indicators: raw.a,
            content_indicators: raw.fingerprint,
            expected_http_status: raw.http_status,
            vulnerable: raw.vulnerable || flagged_by_status,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

/// Accepts `"x"`, `["x", ...]` or `null` and normalizes to a list.
/// Empty strings are dropped since an empty substring would match anything.
fn string_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = match Option::<OneOrMany>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::One(value)) => vec![value],
        Some(OneOrMany::Many(values)) => values,
    };
    Ok(values.into_iter().filter(|v| !v.is_empty()).collect())
}

// --- Modelli Probe ---
// Probe Models

/// Raw observations collected for one domain.
///
/// Every sub-probe fails independently: a failed lookup leaves its data field
/// empty and records the reason in the matching `*_error` field.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProbeResult {
    pub cname: String,
    pub cname_error: Option<String>,
    pub addresses: BTreeSet<String>,
    pub address_error: Option<String>,
    pub response_body: String,
    pub response_status: Option<u16>,
    pub http_error: Option<String>,
}

// --- Modelli Verdetto ---
// Verdict Models

/// The evidence category that fired for a matched fingerprint.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
pub enum Signal {
    #[strum(serialize = "cname")]
    Cname,
    #[serde(rename = "a")]
    #[strum(serialize = "a")]
    ARecord,
    #[strum(serialize = "content")]
    Content,
}

/// The outcome of matching one `ProbeResult` against the fingerprint database.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum ScanVerdict {
    NoMatch,
    Match {
        fingerprint: Fingerprint,
        /// Categories that fired, in `cname`, `a`, `content` order.
        signals: Vec<Signal>,
    },
}

impl ScanVerdict {
    pub fn is_match(&self) -> bool {
        matches!(self, ScanVerdict::Match { .. })
    }

    pub fn service(&self) -> Option<&str> {
        match self {
            ScanVerdict::Match { fingerprint, .. } => Some(&fingerprint.service),
            ScanVerdict::NoMatch => None,
        }
    }
}

// --- Report Principale ---
// Main Report

/// One terminal record per scanned domain.
#[derive(Debug, Clone, Serialize)]
pub struct DomainReport {
    pub domain: String,
    pub outcome: Result<ScanVerdict, ScanError>,
    /// The resolver used for the DNS probes, absent if no probe was issued.
    pub resolver: Option<SocketAddr>,
    pub scanned_at: DateTime<Utc>,
}

impl DomainReport {
    pub fn new(domain: impl Into<String>, outcome: Result<ScanVerdict, ScanError>, resolver: Option<SocketAddr>) -> Self {
        Self {
            domain: domain.into(),
            outcome,
            resolver,
            scanned_at: Utc::now(),
        }
    }

    pub fn is_vulnerable(&self) -> bool {
        matches!(&self.outcome, Ok(verdict) if verdict.is_match())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_string_fingerprint_normalizes_like_a_list() {
        let bare: Fingerprint =
            serde_json::from_str(r#"{"service": "S", "fingerprint": "Not Found", "vulnerable": true}"#).unwrap();
        let list: Fingerprint =
            serde_json::from_str(r#"{"service": "S", "fingerprint": ["Not Found"], "vulnerable": true}"#).unwrap();

        assert_eq!(bare.content_indicators, vec!["Not Found".to_string()]);
        assert_eq!(bare, list);
    }

    #[test]
    fn missing_and_null_fields_default_to_empty() {
        let fp: Fingerprint =
            serde_json::from_str(r#"{"service": "Parked", "cname": null, "discussion": "ignored"}"#).unwrap();

        assert!(fp.cname_indicators.is_empty());
        assert!(fp.a_record_indicators.is_empty());
        assert!(fp.content_indicators.is_empty());
        assert_eq!(fp.expected_http_status, None);
        assert!(!fp.vulnerable);
        assert!(!fp.has_indicators());
    }

    #[test]
    fn empty_indicator_strings_are_dropped() {
        let fp: Fingerprint =
            serde_json::from_str(r#"{"service": "S", "cname": ["", "x.net"], "fingerprint": ""}"#).unwrap();

        assert_eq!(fp.cname_indicators, vec!["x.net".to_string()]);
        assert!(fp.content_indicators.is_empty());
    }

    #[test]
    fn status_vulnerable_sets_the_flag() {
        let fp: Fingerprint =
            serde_json::from_str(r#"{"service": "S", "cname": ["x"], "status": "Vulnerable"}"#).unwrap();
        assert!(fp.vulnerable);

        let fp: Fingerprint =
            serde_json::from_str(r#"{"service": "S", "cname": ["x"], "status": "Not vulnerable"}"#).unwrap();
        assert!(!fp.vulnerable);
    }

    #[test]
    fn signal_names() {
        assert_eq!(Signal::Cname.to_string(), "cname");
        assert_eq!(Signal::ARecord.as_ref(), "a");
        assert_eq!(serde_json::to_string(&Signal::Content).unwrap(), "\"content\"");
    }
}
