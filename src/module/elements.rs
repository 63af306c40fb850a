///! Element-set catalog
///!
///! Fetches the active-satellite TLE text through the timed cache and
///! groups it into three-line records.

use super::cache::TimedFileCache;
use crate::errors::{Error, Result};
use tracing::debug;

/// One tracked object: name line plus the two element lines, verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementSetRecord {
    pub name: String,
    pub line1: String,
    pub line2: String,
}

/// Catalog of three-line element sets behind a timed file cache.
pub struct ElementSetCatalog {
    cache: TimedFileCache,
}

impl ElementSetCatalog {
    pub fn new(cache: TimedFileCache) -> Self {
        Self { cache }
    }

    /// Load the current catalog, in source order.
    pub async fn load(&self) -> Result<Vec<ElementSetRecord>> {
        let text = self.cache.get().await?;
        let records = parse_element_sets(&text)?;
        debug!("Loaded {} element-set records", records.len());
        Ok(records)
    }
}

/// Group raw catalog text into (name, line1, line2) triples.
///
/// A trailing empty line from a final newline is discarded; any other
/// line count that is not a multiple of three is a hard parse error.
pub fn parse_element_sets(text: &str) -> Result<Vec<ElementSetRecord>> {
    let mut lines: Vec<&str> = text.split('\n').map(|l| l.trim_end_matches('\r')).collect();
    if lines.last() == Some(&"") {
        lines.pop();
    }
    if lines.len() % 3 != 0 {
        return Err(Error::MalformedCatalog(lines.len()));
    }

    let records = lines
        .chunks(3)
        .map(|chunk| ElementSetRecord {
            name: chunk[0].trim().to_string(),
            line1: chunk[1].to_string(),
            line2: chunk[2].to_string(),
        })
        .collect();

    Ok(records)
}
