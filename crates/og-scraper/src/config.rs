//! Service configuration from environment variables and an optional TOML file

use crate::error::{Result, ScraperError};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default TTL for cached scrape results
const DEFAULT_CACHE_TTL_SECS: u64 = 120;
/// Default interval between background sweeps of expired entries
const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 30;
/// Injected into the response `type` field when no config file sets one
const DEFAULT_PAGE_TYPE: &str = "website";

/// Resolved service configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Static string written into every response's `type` field
    pub page_type: String,
    /// Log file destination; stdout when absent
    pub log_path: Option<PathBuf>,
    pub cache_ttl: Duration,
    pub sweep_interval: Duration,
}

/// Shape of the optional TOML config file
///
/// ```toml
/// [log]
/// path = "/var/log/og-scraper.log"
///
/// [type]
/// type = "website"
/// ```
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    #[serde(default)]
    log: LogSection,
    #[serde(default, rename = "type")]
    page_type: TypeSection,
}

#[derive(Debug, Default, Deserialize)]
struct LogSection {
    path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct TypeSection {
    #[serde(rename = "type")]
    value: Option<String>,
}

impl Config {
    /// Load configuration from the environment
    ///
    /// `CONFIG_PATH`, when set, points at a TOML file whose `[log]` and
    /// `[type]` sections refine the defaults. A config path that does
    /// not parse is a startup error; an unset path is not.
    pub fn load() -> Result<Self> {
        let file = match std::env::var("CONFIG_PATH") {
            Ok(path) => Self::parse_file(Path::new(&path))?,
            Err(_) => FileConfig::default(),
        };

        let port = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(8000);

        let cache_ttl_secs = std::env::var("CACHE_TTL_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_CACHE_TTL_SECS);

        let sweep_interval_secs = std::env::var("SWEEP_INTERVAL_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_SWEEP_INTERVAL_SECS);

        Ok(Self {
            port,
            page_type: file
                .page_type
                .value
                .unwrap_or_else(|| DEFAULT_PAGE_TYPE.to_string()),
            log_path: file.log.path,
            cache_ttl: Duration::from_secs(cache_ttl_secs),
            sweep_interval: Duration::from_secs(sweep_interval_secs),
        })
    }

    fn parse_file(path: &Path) -> Result<FileConfig> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ScraperError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        toml::from_str(&raw).map_err(|e| {
            ScraperError::Config(format!("failed to parse {}: {}", path.display(), e))
        })
    }
}
