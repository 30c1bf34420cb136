//! Seed data for the dashboard collections.
//!
//! Every screen starts from an injected seed. [`FixtureSeeds`] ships the demo
//! data compiled into the binary; [`JsonSeedFile`] reads a user-supplied file
//! with the same shape.

use std::path::{Path, PathBuf};

use positron_core::error::{PositronError, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::reports::{PerformanceMetric, UsageSample};
use crate::types::{
    Alert, NotificationSetting, Recommendation, SensorReading, SupportArticle, SystemPreference,
    Zone,
};

const FIXTURE_JSON: &str = include_str!("../fixtures/seed.json");

/// One vector per collection. Missing collections start empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedBundle {
    pub alerts: Vec<Alert>,
    pub recommendations: Vec<Recommendation>,
    pub zones: Vec<Zone>,
    pub sensor_readings: Vec<SensorReading>,
    pub support_articles: Vec<SupportArticle>,
    pub notification_settings: Vec<NotificationSetting>,
    pub system_preferences: Vec<SystemPreference>,
    pub water_usage: Vec<UsageSample>,
    pub performance_metrics: Vec<PerformanceMetric>,
}

impl SeedBundle {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Source of the initial dashboard collections.
pub trait SeedProvider: Send + Sync {
    fn load(&self) -> Result<SeedBundle>;

    /// Human readable origin, used in logs.
    fn describe(&self) -> String;
}

/// The built-in demo data.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureSeeds;

impl SeedProvider for FixtureSeeds {
    fn load(&self) -> Result<SeedBundle> {
        let bundle = SeedBundle::from_json(FIXTURE_JSON)
            .map_err(|e| PositronError::Seed(format!("built-in fixture: {}", e)))?;
        debug!(alerts = bundle.alerts.len(), zones = bundle.zones.len(), "Fixture seeds parsed");
        Ok(bundle)
    }

    fn describe(&self) -> String {
        "built-in fixtures".to_string()
    }
}

/// Seed collections read from a JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonSeedFile {
    path: PathBuf,
}

impl JsonSeedFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SeedProvider for JsonSeedFile {
    fn load(&self) -> Result<SeedBundle> {
        let content = std::fs::read_to_string(&self.path)?;
        let bundle = SeedBundle::from_json(&content)
            .map_err(|e| PositronError::Seed(format!("{}: {}", self.path.display(), e)))?;
        info!("Seed data loaded from {}", self.path.display());
        Ok(bundle)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_fixture_seeds_parse() {
        let bundle = FixtureSeeds.load().unwrap();
        assert_eq!(bundle.alerts.len(), 4);
        assert_eq!(bundle.recommendations.len(), 4);
        assert_eq!(bundle.zones.len(), 3);
        assert_eq!(bundle.sensor_readings.len(), 4);
        assert_eq!(bundle.support_articles.len(), 4);
        assert_eq!(bundle.notification_settings.len(), 4);
        assert_eq!(bundle.system_preferences.len(), 5);
        assert_eq!(bundle.water_usage.len(), 7);
        assert_eq!(bundle.performance_metrics.len(), 4);
    }

    #[test]
    fn test_missing_collections_default_to_empty() {
        let bundle = SeedBundle::from_json(r#"{"zones": []}"#).unwrap();
        assert!(bundle.alerts.is_empty());
        assert!(bundle.water_usage.is_empty());
    }

    #[test]
    fn test_json_seed_file_load() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"notification_settings": [
                {{"id": "1", "type": "Critical Alerts", "email": true, "push": false, "sms": false}}
            ]}}"#
        )
        .unwrap();

        let provider = JsonSeedFile::new(file.path());
        let bundle = provider.load().unwrap();
        assert_eq!(bundle.notification_settings.len(), 1);
        assert_eq!(provider.describe(), file.path().display().to_string());
    }

    #[test]
    fn test_json_seed_file_errors() {
        let missing = JsonSeedFile::new("/nonexistent/seed.json");
        assert!(matches!(missing.load(), Err(PositronError::Io(_))));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"alerts": [{{"id": "1"}}]}}"#).unwrap();
        let err = JsonSeedFile::new(file.path()).load().unwrap_err();
        assert!(matches!(err, PositronError::Seed(_)));
    }
}
