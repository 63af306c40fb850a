///! Fetch-or-reuse cache for a remote text resource
///!
///! A local copy younger than the staleness threshold is returned verbatim
///! with no network call. Anything else triggers a refetch that overwrites
///! the local copy atomically. A failed refetch propagates; there is no
///! fallback to stale data.

use crate::errors::{Error, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Abstraction over the network fetch so tests can count calls.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> anyhow::Result<String>;
}

/// Production fetcher backed by reqwest with a bounded timeout.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> anyhow::Result<String> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}

/// One cached remote resource with a staleness threshold.
pub struct TimedFileCache {
    url: String,
    path: PathBuf,
    max_age: Duration,
    fetcher: Arc<dyn Fetcher>,
    /// Serializes refreshes so concurrent requests cannot race to refetch
    /// the same resource.
    refresh_lock: Mutex<()>,
}

impl TimedFileCache {
    pub fn new(
        url: impl Into<String>,
        path: impl AsRef<Path>,
        max_age: Duration,
        fetcher: Arc<dyn Fetcher>,
    ) -> Self {
        Self {
            url: url.into(),
            path: path.as_ref().to_path_buf(),
            max_age,
            fetcher,
            refresh_lock: Mutex::new(()),
        }
    }

    /// Return the cached content, refetching first if the local copy is
    /// missing or at least `max_age` old.
    pub async fn get(&self) -> Result<String> {
        let _guard = self.refresh_lock.lock().await;

        if let Some(age) = self.local_age().await {
            if age < self.max_age {
                debug!("Using cached copy of {} ({}s old)", self.url, age.as_secs());
                return fs::read_to_string(&self.path).await.map_err(|e| Error::Fetch {
                    url: self.url.clone(),
                    source: e.into(),
                });
            }
        }

        self.refresh().await
    }

    /// Age of the local copy, None if it does not exist.
    async fn local_age(&self) -> Option<Duration> {
        let metadata = fs::metadata(&self.path).await.ok()?;
        let modified = metadata.modified().ok()?;
        Some(SystemTime::now().duration_since(modified).unwrap_or_default())
    }

    /// Fetch the resource and overwrite the local copy via temp file + rename
    /// so readers never observe a partial write.
    async fn refresh(&self) -> Result<String> {
        info!("Downloading {}...", self.url);
        let content = self
            .fetcher
            .fetch(&self.url)
            .await
            .map_err(|e| Error::Fetch {
                url: self.url.clone(),
                source: e,
            })?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await.map_err(|e| Error::Fetch {
                    url: self.url.clone(),
                    source: e.into(),
                })?;
            }
        }

        let tmp_path = self.path.with_extension("tmp");
        let write_result = async {
            fs::write(&tmp_path, &content).await?;
            fs::rename(&tmp_path, &self.path).await
        }
        .await;
        write_result.map_err(|e| Error::Fetch {
            url: self.url.clone(),
            source: e.into(),
        })?;

        Ok(content)
    }
}
