//! TOML configuration loading and validation.

use std::path::Path;

use serde::Deserialize;

use crate::engine::DEFAULT_DRIFT_THRESHOLD;
use crate::error::{Error, Result};

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_drift_threshold")]
    pub drift_threshold: f64,
}

fn default_drift_threshold() -> f64 {
    DEFAULT_DRIFT_THRESHOLD
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            drift_threshold: default_drift_threshold(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
        }
    }
}

impl Config {
    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from `path` if the file exists, defaults otherwise.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate config invariants.
    fn validate(&self) -> Result<()> {
        let t = self.engine.drift_threshold;
        if !(t > 0.0 && t < 1.0) {
            return Err(Error::Config(format!(
                "drift_threshold must be in (0.0, 1.0), got {t}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_example_config() {
        let config: Config = toml::from_str("[engine]\ndrift_threshold = 0.05\n").unwrap();
        assert_eq!(config.engine.drift_threshold, 0.05);
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.engine.drift_threshold, DEFAULT_DRIFT_THRESHOLD);
    }

    #[test]
    fn validate_catches_bad_threshold() {
        let config: Config = toml::from_str("[engine]\ndrift_threshold = 1.5\n").unwrap();
        assert!(config.validate().is_err());

        let config: Config = toml::from_str("[engine]\ndrift_threshold = 0.0\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_missing_file_falls_back_to_defaults() {
        let config = Config::load_or_default(Path::new("/nonexistent/config.toml")).unwrap();
        assert_eq!(config.engine.drift_threshold, DEFAULT_DRIFT_THRESHOLD);
    }

    #[test]
    fn load_existing_file() {
        use std::io::Write;
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(b"[engine]\ndrift_threshold = 0.02\n").unwrap();

        let config = Config::load_or_default(tmp.path()).unwrap();
        assert_eq!(config.engine.drift_threshold, 0.02);
    }
}
