// src/core/scanner/matcher.rs

use tracing::debug;

use crate::core::knowledge_base::FingerprintDatabase;
use crate::core::models::{Fingerprint, ProbeResult, ScanVerdict, Signal};

/// Matches a probe against the database. The first qualifying fingerprint wins.
///
/// Fingerprints not flagged vulnerable are skipped outright: parked or safe
/// states often share CNAME and body patterns with the vulnerable ones.
pub fn match_fingerprints(result: &ProbeResult, database: &FingerprintDatabase) -> ScanVerdict {
    for fingerprint in database.iter().filter(|fp| fp.vulnerable) {
        if let Some(signals) = evaluate(fingerprint, result) {
            debug!(service = %fingerprint.service, signals = ?signals, "Fingerprint matched.");
            return ScanVerdict::Match {
                fingerprint: fingerprint.clone(),
                signals,
            };
        }
    }
    ScanVerdict::NoMatch
}

/// Checks every category the fingerprint declares.
///
/// Returns the fired signals if all declared categories fire, `None` otherwise
/// (including when the fingerprint declares no category at all).
pub fn evaluate(fingerprint: &Fingerprint, result: &ProbeResult) -> Option<Vec<Signal>> {
    let mut signals = Vec::with_capacity(3);

    if !fingerprint.cname_indicators.is_empty() {
        if !cname_matches(fingerprint, result) {
            debug!(service = %fingerprint.service, "CNAME indicators not satisfied.");
            return None;
        }
        signals.push(Signal::Cname);
    }

    if !fingerprint.a_record_indicators.is_empty() {
        if !a_record_matches(fingerprint, result) {
            debug!(service = %fingerprint.service, "A record indicators not satisfied.");
            return None;
        }
        signals.push(Signal::ARecord);
    }

    // http_status only constrains the content category, so it is ignored
    // when there are no content indicators.
    if !fingerprint.content_indicators.is_empty() {
        if !content_matches(fingerprint, result) {
            debug!(service = %fingerprint.service, "Content indicators not satisfied.");
            return None;
        }
        signals.push(Signal::Content);
    }

    (!signals.is_empty()).then_some(signals)
}

fn cname_matches(fingerprint: &Fingerprint, result: &ProbeResult) -> bool {
    !result.cname.is_empty()
        && fingerprint
            .cname_indicators
            .iter()
            .any(|indicator| result.cname.contains(indicator.as_str()))
}

fn a_record_matches(fingerprint: &Fingerprint, result: &ProbeResult) -> bool {
    fingerprint
        .a_record_indicators
        .iter()
        .any(|indicator| result.addresses.contains(indicator))
}

fn content_matches(fingerprint: &Fingerprint, result: &ProbeResult) -> bool {
    let Some(status) = result.response_status else {
        return false;
    };
    if fingerprint.expected_http_status.is_some_and(|expected| expected != status) {
        return false;
    }
    fingerprint
        .content_indicators
        .iter()
        .any(|indicator| result.response_body.contains(indicator.as_str()))
}
