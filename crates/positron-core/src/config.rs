use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{PositronError, Result};

/// Top-level configuration for the Positron dashboard.
///
/// Loaded from `~/.positron/config.toml` by default. Every section falls back
/// to its defaults, so an empty file is a valid configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PositronConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub submission: SubmissionConfig,
    #[serde(default)]
    pub access: AccessConfig,
}

impl PositronConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: PositronConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| PositronError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
    /// JSON seed file for the dashboard collections. Built-in fixtures are
    /// used when unset.
    pub seed_file: Option<String>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            seed_file: None,
        }
    }
}

/// Latency of each simulated submission, in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmissionConfig {
    pub contact_ms: u64,
    pub call_to_action_ms: u64,
    pub subscribe_ms: u64,
    pub settings_save_ms: u64,
    pub support_contact_ms: u64,
    pub role_continue_ms: u64,
    pub sensor_export_ms: u64,
    pub report_download_ms: u64,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            contact_ms: 1500,
            call_to_action_ms: 1500,
            subscribe_ms: 1500,
            settings_save_ms: 1000,
            support_contact_ms: 1000,
            role_continue_ms: 1500,
            sensor_export_ms: 1500,
            report_download_ms: 1500,
        }
    }
}

/// Route guard settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessConfig {
    /// Path prefix that requires an authenticated session.
    pub protected_prefix: String,
    /// Where unauthenticated requests for protected paths are sent.
    pub login_path: String,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            protected_prefix: "/dashboard".to_string(),
            login_path: "/role-selection".to_string(),
        }
    }
}
