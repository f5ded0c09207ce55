//! Controller configuration.
//!
//! All structs use `serde(default)` so partial configs work correctly;
//! missing fields and sections fall back to the built-in delays and
//! markers.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use docview_common::errors::ConfigError;
use docview_common::notifications::DEFAULT_TOAST_TTL;

use crate::view::DEFAULT_INTERNAL_MARKER;

/// Simulated scan delay before a fallback file list arrives.
pub const DEFAULT_FILE_LIST_DELAY_MS: u64 = 800;

/// Simulated load delay before fallback initial data arrives.
pub const DEFAULT_INITIAL_DATA_DELAY_MS: u64 = 300;

/// Fallback timer delays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackConfig {
    pub file_list_delay_ms: u64,
    pub initial_data_delay_ms: u64,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            file_list_delay_ms: DEFAULT_FILE_LIST_DELAY_MS,
            initial_data_delay_ms: DEFAULT_INITIAL_DATA_DELAY_MS,
        }
    }
}

/// Toast lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToastConfig {
    pub ttl_ms: u64,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            ttl_ms: DEFAULT_TOAST_TTL.as_millis() as u64,
        }
    }
}

/// Storage classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path substring marking a volume as internal storage for the default
    /// removable-volume heuristic.
    pub internal_marker: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            internal_marker: DEFAULT_INTERNAL_MARKER.into(),
        }
    }
}

/// Top-level controller configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub fallback: FallbackConfig,
    pub toast: ToastConfig,
    pub storage: StorageConfig,
}

impl UiConfig {
    pub fn file_list_delay(&self) -> Duration {
        Duration::from_millis(self.fallback.file_list_delay_ms)
    }

    pub fn initial_data_delay(&self) -> Duration {
        Duration::from_millis(self.fallback.initial_data_delay_ms)
    }

    pub fn toast_ttl(&self) -> Duration {
        Duration::from_millis(self.toast.ttl_ms)
    }
}

/// Parse a config from a TOML string.
pub fn from_toml_str(content: &str) -> Result<UiConfig, ConfigError> {
    toml::from_str(content).map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))
}

/// Load config from a specific TOML file path.
///
/// Deserializes using serde defaults for any missing fields.
pub fn load_from_path(path: &Path) -> Result<UiConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ParseError(format!("failed to read {}: {e}", path.display())))?;

    let config = from_toml_str(&content)?;
    info!("loaded config from {}", path.display());
    Ok(config)
}
