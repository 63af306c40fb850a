use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default = "default_cache_dir")]
    pub cache_dir: String,

    #[serde(default = "default_elements_url")]
    pub elements_url: String,

    #[serde(default = "default_satcat_url")]
    pub satcat_url: String,

    /// Maximum age of a cached catalog before it is refetched.
    #[serde(default = "default_catalog_max_age_hours")]
    pub catalog_max_age_hours: u64,

    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_cache_dir() -> String {
    "data".to_string()
}

fn default_elements_url() -> String {
    "https://www.celestrak.com/NORAD/elements/active.txt".to_string()
}

fn default_satcat_url() -> String {
    "https://planet4589.org/space/gcat/tsv/cat/satcat.tsv".to_string()
}

fn default_catalog_max_age_hours() -> u64 {
    24
}

fn default_fetch_timeout_secs() -> u64 {
    60
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            cache_dir: default_cache_dir(),
            elements_url: default_elements_url(),
            satcat_url: default_satcat_url(),
            catalog_max_age_hours: default_catalog_max_age_hours(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
        }
    }
}

impl ServerConfig {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ServerConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load from file if present, otherwise fall back to defaults.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        if std::path::Path::new(path).exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
