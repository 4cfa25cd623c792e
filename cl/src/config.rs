//! Configuration for the `cl` binary

use eyre::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::options::LoggerOptions;

/// Top-level configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Simulated crawler
    pub crawler: CrawlerConfig,

    /// Logger options, same keys as [`LoggerOptions`]
    pub logger: LoggerOptions,

    /// Level for the binary's own diagnostics on stderr
    #[serde(rename = "log-level")]
    pub log_level: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CrawlerConfig {
    /// Crawler name shown in every line
    pub name: String,

    /// Number of URLs to crawl
    pub urls: usize,

    /// Retry ceiling per job
    pub max_retries: Option<u32>,

    /// RNG seed for reproducible runs
    pub seed: Option<u64>,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            name: "MyJawa".to_string(),
            urls: 50,
            max_retries: Some(3),
            seed: None,
        }
    }
}

impl Config {
    /// Load config from file, or use defaults
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        let default_paths = [
            Some(PathBuf::from("crawlog.yml")),
            dirs::config_dir().map(|p| p.join("crawlog").join("crawlog.yml")),
        ];

        for path in default_paths.iter().flatten() {
            if path.exists() {
                match Self::load_from_file(path) {
                    Ok(config) => return Ok(config),
                    Err(e) => warn!("Failed to load config from {}: {}", path.display(), e),
                }
            }
        }

        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;
        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;
        info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Save config to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.crawler.name, "MyJawa");
        assert_eq!(config.crawler.urls, 50);
        assert_eq!(config.crawler.max_retries, Some(3));
        assert!(config.logger.level.is_none());
    }

    #[test]
    fn test_load_explicit_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("crawlog.yml");
        fs::write(
            &path,
            "crawler:\n  name: Spider\n  urls: 5\n  max-retries: 1\nlogger:\n  level: warn\n  color: cyan\n  page-log: false\n",
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.crawler.name, "Spider");
        assert_eq!(config.crawler.urls, 5);
        assert_eq!(config.crawler.max_retries, Some(1));
        assert_eq!(config.logger.level.as_deref(), Some("warn"));
        assert_eq!(config.logger.color.as_deref(), Some("cyan"));
        assert_eq!(config.logger.page_log, Some(false));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("crawlog.yml");
        fs::write(&path, "log-level: debug\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(config.crawler.name, "MyJawa");
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("nope.yml");
        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn test_malformed_explicit_file_is_an_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("crawlog.yml");
        fs::write(&path, "crawler: [not, a, map]\n").unwrap();

        let err = Config::load(Some(&path)).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse config file"));
    }

    #[test]
    fn test_save_and_reload() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("saved.yml");
        let mut config = Config::default();
        config.crawler.seed = Some(9);
        config.logger.color = Some("green".to_string());

        config.save(&path).unwrap();
        let loaded = Config::load(Some(&path)).unwrap();
        assert_eq!(loaded.crawler.seed, Some(9));
        assert_eq!(loaded.logger.color.as_deref(), Some("green"));
    }
}
