///! Satellite catalog registry
///!
///! Parses the GCAT satcat TSV into typed entries keyed by catalog number
///! and answers operational-orbit lookups. The parsed snapshot is replaced
///! wholesale whenever the underlying text changes, never mutated in place.

use super::cache::TimedFileCache;
use crate::errors::Result;
use serde::Deserialize;
use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// One row of the satellite catalog. Only the fields the pipeline uses are
/// kept; the TSV carries dozens more that are ignored during parsing.
#[derive(Debug, Clone, Deserialize)]
pub struct SatcatEntry {
    #[serde(rename = "Satcat")]
    pub catalog_number: String,

    /// Operational-orbit category code, e.g. "LEO/S". May be empty.
    #[serde(rename = "OpOrbit", default)]
    pub op_orbit: String,

    #[serde(rename = "Name", default)]
    pub name: String,
}

/// Immutable parsed snapshot of the satellite catalog.
#[derive(Debug, Default)]
pub struct SatcatSnapshot {
    entries: HashMap<String, SatcatEntry>,
}

impl SatcatSnapshot {
    /// Operational-orbit code for a catalog number, if the catalog knows
    /// the object and the field is non-empty. Absence is not an error.
    pub fn orbit_code(&self, catalog_number: u64) -> Option<&str> {
        self.entries
            .get(&catalog_number.to_string())
            .map(|entry| entry.op_orbit.as_str())
            .filter(|code| !code.is_empty())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Satellite catalog behind a timed file cache.
pub struct SatelliteRegistry {
    cache: TimedFileCache,
    snapshot: RwLock<Arc<SatcatSnapshot>>,
    /// Hash of the last parsed text, to skip reparsing an unchanged file.
    fingerprint: RwLock<Option<u64>>,
}

impl SatelliteRegistry {
    pub fn new(cache: TimedFileCache) -> Self {
        Self {
            cache,
            snapshot: RwLock::new(Arc::new(SatcatSnapshot::default())),
            fingerprint: RwLock::new(None),
        }
    }

    /// Load the current catalog snapshot, refetching and reparsing only
    /// when the cached text has changed.
    pub async fn load(&self) -> Result<Arc<SatcatSnapshot>> {
        let text = self.cache.get().await?;

        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        let fingerprint = hasher.finish();

        if *self.fingerprint.read().await == Some(fingerprint) {
            return Ok(self.snapshot.read().await.clone());
        }

        let snapshot = Arc::new(parse_satcat(&text));
        info!("Loaded {} satellite catalog entries", snapshot.len());

        *self.snapshot.write().await = snapshot.clone();
        *self.fingerprint.write().await = Some(fingerprint);
        Ok(snapshot)
    }
}

/// Parse tab-separated catalog text. The first line is the header row;
/// rows that fail to deserialize are logged and skipped.
pub fn parse_satcat(text: &str) -> SatcatSnapshot {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut entries = HashMap::new();
    let mut error_count = 0;

    for (row, result) in reader.deserialize::<SatcatEntry>().enumerate() {
        match result {
            Ok(entry) => {
                entries.insert(entry.catalog_number.clone(), entry);
            }
            Err(e) => {
                error_count += 1;
                tracing::warn!("Error parsing satcat row {}: {}", row + 1, e);
            }
        }
    }

    if error_count > 0 {
        tracing::warn!("Skipped {} unparsable satcat rows", error_count);
    }

    SatcatSnapshot { entries }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Satcat\tName\tOpOrbit\tExtra\n\
        25544\tISS\tLLEO/I\tx\n\
        41866\tGOES 16\tGEO/S\tx\n\
        99999\tMYSTERY\t\tx\n";

    #[test]
    fn test_parse_keyed_by_catalog_number() {
        let snapshot = parse_satcat(SAMPLE);
        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot.orbit_code(25544), Some("LLEO/I"));
        assert_eq!(snapshot.orbit_code(41866), Some("GEO/S"));
    }

    #[test]
    fn test_empty_orbit_code_is_absent() {
        let snapshot = parse_satcat(SAMPLE);
        assert_eq!(snapshot.orbit_code(99999), None);
    }

    #[test]
    fn test_unknown_catalog_number_is_absent() {
        let snapshot = parse_satcat(SAMPLE);
        assert_eq!(snapshot.orbit_code(12345), None);
    }

    #[test]
    fn test_header_only_text() {
        let snapshot = parse_satcat("Satcat\tName\tOpOrbit\n");
        assert!(snapshot.is_empty());
    }
}
