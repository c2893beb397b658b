use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use recordgen_engine::{FetchSettings, DEFAULT_ENDPOINT};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub(crate) const CONFIG_FILENAME: &str = "recordgen.ron";

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct AppConfig {
    pub endpoint: String,
    pub batch_size: u32,
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
    pub max_body_bytes: u64,
    pub output_dir: PathBuf,
    /// Lines from the end of the table at which the next page is requested.
    pub scroll_threshold: f64,
    pub viewport_rows: usize,
    pub log_to_file: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        let fetch = FetchSettings::default();
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            batch_size: recordgen_core::DEFAULT_BATCH_SIZE,
            connect_timeout_ms: fetch.connect_timeout.as_millis() as u64,
            request_timeout_ms: fetch.request_timeout.as_millis() as u64,
            max_body_bytes: fetch.max_bytes,
            output_dir: PathBuf::from("output"),
            scroll_threshold: 2.0,
            viewport_rows: 20,
            log_to_file: true,
        }
    }
}

impl AppConfig {
    /// Loads `explicit` if given, else `./recordgen.ron` when present, else defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => {
                let path = PathBuf::from(CONFIG_FILENAME);
                if path.exists() {
                    Self::from_file(&path)?
                } else {
                    Self::default()
                }
            }
        };
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = ron::from_str(&content).map_err(|err| ConfigError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.batch_size == 0 {
            return Err(ConfigError::Invalid("batch_size must be positive".into()));
        }
        if self.viewport_rows == 0 {
            return Err(ConfigError::Invalid("viewport_rows must be positive".into()));
        }
        if !self.scroll_threshold.is_finite() || self.scroll_threshold < 0.0 {
            return Err(ConfigError::Invalid(
                "scroll_threshold must be a non-negative number".into(),
            ));
        }
        Ok(())
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            endpoint: self.endpoint.clone(),
            connect_timeout: Duration::from_millis(self.connect_timeout_ms),
            request_timeout: Duration::from_millis(self.request_timeout_ms),
            max_bytes: self.max_body_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("recordgen.ron");
        fs::write(
            &path,
            "(endpoint: \"http://127.0.0.1:9000/api/generate\", batch_size: 25)",
        )
        .unwrap();

        let config = AppConfig::load(Some(&path)).unwrap();

        assert_eq!(config.endpoint, "http://127.0.0.1:9000/api/generate");
        assert_eq!(config.batch_size, 25);
        assert_eq!(config.viewport_rows, AppConfig::default().viewport_rows);
        assert_eq!(
            config.fetch_settings().request_timeout,
            FetchSettings::default().request_timeout
        );
    }

    #[test]
    fn zero_batch_size_is_rejected() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("recordgen.ron");
        fs::write(&path, "(batch_size: 0)").unwrap();

        assert!(matches!(
            AppConfig::load(Some(&path)),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("absent.ron");

        assert!(matches!(
            AppConfig::load(Some(&path)),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn malformed_file_reports_parse_error() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("recordgen.ron");
        fs::write(&path, "(batch_size: \"ten\"").unwrap();

        assert!(matches!(
            AppConfig::load(Some(&path)),
            Err(ConfigError::Parse { .. })
        ));
    }
}
