//! Configuration file support for trip-planner
//!
//! Loads config from ~/.trip-planner/config.toml. Command-line flags and
//! environment variables (resolved by clap) take precedence over the file,
//! and the file over built-in defaults.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

use crate::transport::DEFAULT_TIMEOUT_SECS;

/// Backend URL used when nothing else is configured
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";

/// Directory under $HOME holding config and history
const APP_DIR: &str = ".trip-planner";

/// Contents of config.toml; every key is optional
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Planning backend base URL
    pub backend_url: Option<String>,

    /// Per-request timeout for backend calls
    pub request_timeout_secs: Option<u64>,

    /// Never contact the backend
    pub offline: Option<bool>,

    /// Default path for /save
    pub transcript_path: Option<PathBuf>,
}

impl Config {
    /// Load config from ~/.trip-planner/config.toml
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    /// Load config from a specific file. Missing or unparsable files yield defaults.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Failed to parse config file");
                    Self::default()
                }
            },
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read config file");
                Self::default()
            }
        }
    }
}

/// Values from the command line or environment
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub backend_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub offline: bool,
    pub transcript_path: Option<PathBuf>,
}

/// Fully resolved runtime settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub backend_url: String,
    pub request_timeout: Duration,
    pub offline: bool,
    pub transcript_path: PathBuf,
}

impl Settings {
    /// Apply precedence: overrides, then config file, then defaults
    pub fn resolve(overrides: Overrides, config: Config) -> Self {
        let backend_url = overrides
            .backend_url
            .or(config.backend_url)
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());

        let timeout_secs = overrides
            .timeout_secs
            .or(config.request_timeout_secs)
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            backend_url,
            request_timeout: Duration::from_secs(timeout_secs),
            offline: overrides.offline || config.offline.unwrap_or(false),
            transcript_path: overrides
                .transcript_path
                .or(config.transcript_path)
                .unwrap_or_else(|| PathBuf::from("trip-transcript.html")),
        }
    }
}

/// ~/.trip-planner
pub fn app_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_default().join(APP_DIR)
}

/// Get the config file path
pub fn config_path() -> PathBuf {
    app_dir().join("config.toml")
}

/// Get the REPL history file path
pub fn history_path() -> PathBuf {
    app_dir().join("history")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_path() {
        let path = config_path();
        assert!(path.to_string_lossy().contains(".trip-planner"));
        assert!(path.to_string_lossy().ends_with("config.toml"));
        assert!(history_path().to_string_lossy().ends_with("history"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("nope.toml"));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "backend_url = \"http://planner:8080\"\nrequest_timeout_secs = 5\noffline = true"
        )
        .unwrap();

        let config = Config::load_from(file.path());
        assert_eq!(config.backend_url.as_deref(), Some("http://planner:8080"));
        assert_eq!(config.request_timeout_secs, Some(5));
        assert_eq!(config.offline, Some(true));
    }

    #[test]
    fn test_load_invalid_file_falls_back() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "backend_url = [not valid").unwrap();
        assert_eq!(Config::load_from(file.path()), Config::default());
    }

    #[test]
    fn test_resolve_defaults() {
        let settings = Settings::resolve(Overrides::default(), Config::default());
        assert_eq!(settings.backend_url, DEFAULT_BACKEND_URL);
        assert_eq!(settings.request_timeout, Duration::from_secs(30));
        assert!(!settings.offline);
    }

    #[test]
    fn test_resolve_precedence() {
        let config = Config {
            backend_url: Some("http://from-file".into()),
            request_timeout_secs: Some(10),
            offline: None,
            transcript_path: Some("file.html".into()),
        };
        let overrides = Overrides {
            backend_url: Some("http://from-cli".into()),
            timeout_secs: None,
            offline: false,
            transcript_path: None,
        };
        let settings = Settings::resolve(overrides, config);
        assert_eq!(settings.backend_url, "http://from-cli");
        assert_eq!(settings.request_timeout, Duration::from_secs(10));
        assert_eq!(settings.transcript_path, PathBuf::from("file.html"));
    }

    #[test]
    fn test_zero_timeout_uses_default() {
        let overrides = Overrides {
            timeout_secs: Some(0),
            ..Overrides::default()
        };
        let settings = Settings::resolve(overrides, Config::default());
        assert_eq!(settings.request_timeout, Duration::from_secs(30));
    }
}
