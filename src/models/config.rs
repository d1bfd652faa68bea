use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::FeedError;
use crate::models::post::{builtin_seed, load_seed, Post};
use crate::models::reveal::RevealTiming;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub initial_delay_ms: u64,
    pub stagger_ms: u64,
    pub seed_path: Option<PathBuf>,
    pub log_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            initial_delay_ms: 1000,
            stagger_ms: 200,
            seed_path: None,
            log_path: None,
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf, FeedError> {
        let path = dirs::config_dir()
            .ok_or_else(|| FeedError::Config("Could not find config directory".to_string()))?
            .join("visafeed/config.json");
        Ok(path)
    }

    /// Loads `path`, or the default location when `None`. Only a missing
    /// default file falls back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, FeedError> {
        match path {
            Some(path) => Self::read(path),
            None => {
                let path = Self::default_path()?;
                match Self::read(&path) {
                    Err(FeedError::Io(_)) if !path.exists() => {
                        log::debug!("no config at {:?}, using defaults", path);
                        Ok(Config::default())
                    }
                    other => other,
                }
            }
        }
    }

    fn read(path: &Path) -> Result<Self, FeedError> {
        let file = File::open(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => FeedError::Io(format!("No config file at {:?}", path)),
            _ => FeedError::Config(format!("Failed to open config file at {:?}: {}", path, e)),
        })?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .map_err(|e| FeedError::Config(format!("Failed to parse config JSON: {}", e)))
    }

    pub fn timing(&self) -> RevealTiming {
        RevealTiming {
            initial_delay: Duration::from_millis(self.initial_delay_ms),
            stagger: Duration::from_millis(self.stagger_ms),
        }
    }

    pub fn seed(&self) -> Result<Vec<Post>, FeedError> {
        match &self.seed_path {
            Some(path) => load_seed(path),
            None => Ok(builtin_seed()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{ "stagger_ms": 50 }"#).unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.stagger_ms, 50);
        assert_eq!(config.initial_delay_ms, 1000);
        assert_eq!(config.timing().stagger, Duration::from_millis(50));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        assert!(Config::load(Some(&missing)).is_err());
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();
        assert!(matches!(Config::load(Some(file.path())), Err(FeedError::Config(_))));
    }

    #[test]
    fn default_seed_is_builtin() {
        assert_eq!(Config::default().seed().unwrap(), builtin_seed());
    }
}
