//! YAML configuration for the matching engine.
//!
//! One file configures the normalizer and says where the taxonomy comes from
//! and how often to reload it.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//! name: "household matching"
//!
//! normalizer:
//!   version: 1
//!   normalize_unicode: true
//!   drop_numeric_tokens: true
//!
//! taxonomy:
//!   # JSON or YAML; omit to use the built-in taxonomy.
//!   path: "/etc/pantry/taxonomy.yaml"
//!   # Reload and swap every 5 minutes. Omit to load once.
//!   refresh_secs: 300
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use canonical::NormalizerConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EngineConfig {
    /// Configuration format version
    #[serde(default = "default_config_version")]
    pub version: String,

    /// Optional configuration name/description
    #[serde(default)]
    pub name: Option<String>,

    /// Name normalization settings, shared by taxonomy loading and matching
    #[serde(default)]
    pub normalizer: NormalizerConfig,

    /// Taxonomy source and refresh policy
    #[serde(default)]
    pub taxonomy: TaxonomyYamlConfig,
}

impl EngineConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: EngineConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.normalizer
            .validate()
            .map_err(ConfigLoadError::Validation)?;
        self.taxonomy.validate()?;

        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            version: default_config_version(),
            name: None,
            normalizer: NormalizerConfig::default(),
            taxonomy: TaxonomyYamlConfig::default(),
        }
    }
}

/// Where the taxonomy comes from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyYamlConfig {
    /// Taxonomy document (`.json`, `.yaml`, `.yml`). `None` selects the
    /// built-in taxonomy.
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Reload interval in seconds. `None` loads once at startup.
    #[serde(default)]
    pub refresh_secs: Option<u64>,
}

impl TaxonomyYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if let Some(path) = &self.path {
            if path.as_os_str().is_empty() {
                return Err(ConfigLoadError::Validation(
                    "taxonomy.path must not be empty".to_string(),
                ));
            }
        }
        if self.refresh_secs == Some(0) {
            return Err(ConfigLoadError::Validation(
                "taxonomy.refresh_secs must be >= 1".to_string(),
            ));
        }
        if self.refresh_secs.is_some() && self.path.is_none() {
            return Err(ConfigLoadError::Validation(
                "taxonomy.refresh_secs requires taxonomy.path".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_config_version() -> String {
    "1.0".to_string()
}
