//! The fingerprint database: the read-only set of service signatures a scan
//! matches against.
//!
//! The database is loaded once, before scanning starts, from a JSON array
//! (see `Fingerprint` for the accepted shape) and is then shared between all
//! workers without synchronization.

use std::ops::Deref;
use tracing::{info, warn};

use crate::core::models::Fingerprint;
use crate::core::sources::read_source;
use crate::error::LoadError;

/// An ordered, immutable list of fingerprints. Order matters: matching is
/// first-match-wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FingerprintDatabase {
    fingerprints: Vec<Fingerprint>,
}

impl FingerprintDatabase {
    pub fn new(fingerprints: Vec<Fingerprint>) -> Self {
        Self { fingerprints }
    }

    /// Parses a JSON array of fingerprint objects.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let fingerprints: Vec<Fingerprint> = serde_json::from_str(json)?;

        let inert = fingerprints.iter().filter(|fp| fp.vulnerable && !fp.has_indicators()).count();
        if inert > 0 {
            warn!(count = inert, "Fingerprints flagged vulnerable without any indicator will never match.");
        }

        Ok(Self::new(fingerprints))
    }

    /// Loads the database from a URL or a local file.
    pub async fn load(source: &str, client: &reqwest::Client) -> Result<Self, LoadError> {
        let json = read_source(source, client).await?;
        let database = Self::from_json(&json)?;
        info!(
            source,
            total = database.len(),
            vulnerable = database.vulnerable_count(),
            "Fingerprint database loaded."
        );
        Ok(database)
    }

    pub fn vulnerable_count(&self) -> usize {
        self.fingerprints.iter().filter(|fp| fp.vulnerable).count()
    }
}

impl Deref for FingerprintDatabase {
    type Target = [Fingerprint];

    fn deref(&self) -> &Self::Target {
        &self.fingerprints
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
        {"service": "GitHub Pages", "cname": ["github.io"], "fingerprint": "There isn't a GitHub Pages site here.", "vulnerable": true},
        {"service": "Parked", "cname": ["parked.example"], "vulnerable": false, "status": "Not vulnerable"},
        {"service": "Heroku", "cname": ["herokuapp.com"], "fingerprint": ["No such app"], "http_status": 404, "vulnerable": true}
    ]"#;

    #[test]
    fn parses_database_in_order() {
        let db = FingerprintDatabase::from_json(SAMPLE).unwrap();

        assert_eq!(db.len(), 3);
        assert_eq!(db.vulnerable_count(), 2);
        let services: Vec<&str> = db.iter().map(|fp| fp.service.as_str()).collect();
        assert_eq!(services, ["GitHub Pages", "Parked", "Heroku"]);
        assert_eq!(db[2].expected_http_status, Some(404));
    }

    #[test]
    fn malformed_json_is_a_load_error() {
        assert!(matches!(FingerprintDatabase::from_json("{not json"), Err(LoadError::Json(_))));
        assert!(matches!(
            FingerprintDatabase::from_json(r#"{"service": "not an array"}"#),
            Err(LoadError::Json(_))
        ));
    }

    #[test]
    fn wrong_indicator_type_is_a_load_error() {
        let json = r#"[{"service": "S", "fingerprint": 42, "vulnerable": true}]"#;
        assert!(FingerprintDatabase::from_json(json).is_err());
    }
}
