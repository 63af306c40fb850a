///! Catalog manager
///!
///! Owns the two external-catalog caches for the whole process. Built
///! once at startup and injected into request handling; requests only
///! ever read immutable snapshots out of it.

use super::cache::{Fetcher, HttpFetcher, TimedFileCache};
use super::elements::{ElementSetCatalog, ElementSetRecord};
use super::satcat::{SatcatSnapshot, SatelliteRegistry};
use crate::config::ServerConfig;
use crate::errors::Result;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

const ELEMENTS_FILE: &str = "active.txt";
const SATCAT_FILE: &str = "satcat.tsv";

pub struct CatalogManager {
    elements: ElementSetCatalog,
    registry: SatelliteRegistry,
}

impl CatalogManager {
    pub fn new(config: &ServerConfig) -> anyhow::Result<Self> {
        let fetcher: Arc<dyn Fetcher> = Arc::new(HttpFetcher::new(Duration::from_secs(
            config.fetch_timeout_secs,
        ))?);
        Ok(Self::with_fetcher(config, fetcher))
    }

    pub fn with_fetcher(config: &ServerConfig, fetcher: Arc<dyn Fetcher>) -> Self {
        let max_age = Duration::from_secs(config.catalog_max_age_hours * 3600);
        let cache_dir = Path::new(&config.cache_dir);

        let elements = ElementSetCatalog::new(TimedFileCache::new(
            &config.elements_url,
            cache_dir.join(ELEMENTS_FILE),
            max_age,
            fetcher.clone(),
        ));
        let registry = SatelliteRegistry::new(TimedFileCache::new(
            &config.satcat_url,
            cache_dir.join(SATCAT_FILE),
            max_age,
            fetcher,
        ));

        Self { elements, registry }
    }

    /// Current element-set records, in source order.
    pub async fn element_sets(&self) -> Result<Vec<ElementSetRecord>> {
        self.elements.load().await
    }

    /// Current satellite-catalog snapshot for orbit-code lookups.
    pub async fn satcat(&self) -> Result<Arc<SatcatSnapshot>> {
        self.registry.load().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use tempfile::TempDir;

    /// Serves fixed bodies per URL, no network.
    struct StaticFetcher;

    #[async_trait]
    impl Fetcher for StaticFetcher {
        async fn fetch(&self, url: &str) -> anyhow::Result<String> {
            if url.ends_with("active.txt") {
                Ok("SAT A\n1 line\n2 line\n".to_string())
            } else {
                Ok("Satcat\tName\tOpOrbit\n25544\tISS\tLLEO/I\n".to_string())
            }
        }
    }

    #[tokio::test]
    async fn test_manager_loads_both_catalogs() {
        let temp_dir = TempDir::new().unwrap();
        let config = ServerConfig {
            cache_dir: temp_dir.path().to_string_lossy().to_string(),
            ..ServerConfig::default()
        };
        let manager = CatalogManager::with_fetcher(&config, Arc::new(StaticFetcher));

        let records = manager.element_sets().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "SAT A");

        let satcat = manager.satcat().await.unwrap();
        assert_eq!(satcat.orbit_code(25544), Some("LLEO/I"));
    }

    #[tokio::test]
    async fn test_manager_writes_cache_files() {
        let temp_dir = TempDir::new().unwrap();
        let config = ServerConfig {
            cache_dir: temp_dir.path().to_string_lossy().to_string(),
            ..ServerConfig::default()
        };
        let manager = CatalogManager::with_fetcher(&config, Arc::new(StaticFetcher));

        manager.element_sets().await.unwrap();
        manager.satcat().await.unwrap();

        assert!(temp_dir.path().join(ELEMENTS_FILE).exists());
        assert!(temp_dir.path().join(SATCAT_FILE).exists());
    }
}
