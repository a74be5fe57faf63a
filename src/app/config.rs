//! Configuration for the headless runner

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::parser::{MarkerError, MarkerPair, THINK_CLOSE, THINK_OPEN};

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid markers: {0}")]
    Markers(#[from] MarkerError),
}

/// Runner configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Marker literals bounding a reasoning region
    pub markers: MarkerConfig,
    /// Characters per chunk fed to the parser (0 feeds the whole input at once)
    pub chunk_size: usize,
    /// Report format
    pub format: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            markers: MarkerConfig::default(),
            chunk_size: 16,
            format: OutputFormat::Text,
        }
    }
}

impl Config {
    /// Load and validate a JSON config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&data)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parse and validate config JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.marker_pair()?;
        Ok(config)
    }

    /// Validated marker pair
    pub fn marker_pair(&self) -> Result<MarkerPair, MarkerError> {
        MarkerPair::new(self.markers.open.as_str(), self.markers.close.as_str())
    }
}

/// Marker literals as written on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerConfig {
    pub open: String,
    pub close: String,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            open: THINK_OPEN.to_string(),
            close: THINK_CLOSE.to_string(),
        }
    }
}

impl From<&MarkerPair> for MarkerConfig {
    fn from(markers: &MarkerPair) -> Self {
        Self {
            open: markers.open().to_string(),
            close: markers.close().to_string(),
        }
    }
}

/// Report format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.chunk_size, 16);
        assert_eq!(config.format, OutputFormat::Text);
        assert_eq!(config.marker_pair().unwrap(), MarkerPair::think());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = Config::from_json(r#"{"format": "json"}"#).unwrap();
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.chunk_size, 16);
        assert_eq!(config.markers, MarkerConfig::default());
    }

    #[test]
    fn test_custom_markers() {
        let config = Config::from_json(
            r#"{"markers": {"open": "[THINK]", "close": "[/THINK]"}, "chunk_size": 3}"#,
        )
        .unwrap();
        let markers = config.marker_pair().unwrap();
        assert_eq!(markers.open(), "[THINK]");
        assert_eq!(config.chunk_size, 3);
    }

    #[test]
    fn test_invalid_markers_rejected() {
        let err = Config::from_json(r#"{"markers": {"open": "", "close": "</x>"}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Markers(MarkerError::Empty("open"))));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/nonexistent/think-stream.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"chunk_size": 0}"#).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.chunk_size, 0);
    }
}
