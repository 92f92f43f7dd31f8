// src/output.rs

//! Turns domain reports into the lines printed on stdout.

use crate::core::models::{DomainReport, ScanVerdict, Signal};

/// Renders one report as a text line, or `None` if `silent` hides it.
///
/// Silent mode keeps only vulnerable domains.
pub fn render_line(report: &DomainReport, silent: bool) -> Option<String> {
    match &report.outcome {
        Ok(ScanVerdict::Match { fingerprint, signals }) => Some(format!(
            "[VULNERABLE] [{}] {} ({})",
            fingerprint.service,
            report.domain,
            join_signals(signals)
        )),
        Ok(ScanVerdict::NoMatch) if !silent => Some(format!("[NOT VULNERABLE] {}", report.domain)),
        Err(e) if !silent => Some(format!("[ERROR] {}: {}", report.domain, e)),
        _ => None,
    }
}

/// Renders one report as a single-line JSON object, with the same silent rule.
pub fn render_json(report: &DomainReport, silent: bool) -> Option<String> {
    if silent && !report.is_vulnerable() {
        return None;
    }
    serde_json::to_string(report).ok()
}

fn join_signals(signals: &[Signal]) -> String {
    signals.iter().map(ToString::to_string).collect::<Vec<_>>().join("+")
}
