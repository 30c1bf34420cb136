//! Record types for every dashboard screen.
//!
//! Classification fields are closed enumerations; descriptive fields are
//! immutable after seeding. Each record names its single lifecycle field via
//! [`Lifecycle`].

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, Weekday};
use positron_core::types::RecordId;
use serde::{Deserialize, Serialize};

use crate::list_state::{Lifecycle, Record};

// =============================================================================
// Alerts
// =============================================================================

/// Severity of an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    Critical,
    Warning,
    Info,
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertKind::Critical => write!(f, "critical"),
            AlertKind::Warning => write!(f, "warning"),
            AlertKind::Info => write!(f, "info"),
        }
    }
}

/// Follow-up action offered on an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertActionKind {
    Irrigation,
    Maintenance,
    System,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertAction {
    pub kind: AlertActionKind,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: RecordId,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub timestamp: NaiveDateTime,
    #[serde(default)]
    pub zone: Option<String>,
    pub is_read: bool,
    #[serde(default)]
    pub action: Option<AlertAction>,
}

impl Record for Alert {
    const COLLECTION: &'static str = "alerts";
    fn id(&self) -> &RecordId {
        &self.id
    }
}

impl Lifecycle for Alert {
    type Flag = bool;
    fn flag(&self) -> bool {
        self.is_read
    }
    fn with_flag(&self, is_read: bool) -> Self {
        Self {
            is_read,
            ..self.clone()
        }
    }
}

// =============================================================================
// AI Recommendations
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    WaterSaving,
    ScheduleOptimization,
    Maintenance,
    WeatherAlert,
}

impl fmt::Display for RecommendationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecommendationKind::WaterSaving => write!(f, "water_saving"),
            RecommendationKind::ScheduleOptimization => write!(f, "schedule_optimization"),
            RecommendationKind::Maintenance => write!(f, "maintenance"),
            RecommendationKind::WeatherAlert => write!(f, "weather_alert"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Impact {
    High,
    Medium,
    Low,
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Impact::High => write!(f, "high"),
            Impact::Medium => write!(f, "medium"),
            Impact::Low => write!(f, "low"),
        }
    }
}

/// Weather snapshot attached to a recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub condition: String,
    /// Degrees Celsius.
    pub temperature: f64,
    /// Chance of precipitation, percent.
    pub precipitation: f64,
    /// Relative humidity, percent.
    pub humidity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: RecordId,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    pub impact: Impact,
    pub time_to_implement: String,
    #[serde(default)]
    pub potential_savings: Option<String>,
    #[serde(default)]
    pub weather: Option<WeatherSnapshot>,
    pub is_implemented: bool,
}

impl Record for Recommendation {
    const COLLECTION: &'static str = "recommendations";
    fn id(&self) -> &RecordId {
        &self.id
    }
}

impl Lifecycle for Recommendation {
    type Flag = bool;
    fn flag(&self) -> bool {
        self.is_implemented
    }
    fn with_flag(&self, is_implemented: bool) -> Self {
        Self {
            is_implemented,
            ..self.clone()
        }
    }
}

// =============================================================================
// Irrigation Zones
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneStatus {
    Idle,
    Running,
    Scheduled,
    Error,
}

impl fmt::Display for ZoneStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZoneStatus::Idle => write!(f, "idle"),
            ZoneStatus::Running => write!(f, "running"),
            ZoneStatus::Scheduled => write!(f, "scheduled"),
            ZoneStatus::Error => write!(f, "error"),
        }
    }
}

impl std::str::FromStr for ZoneStatus {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "idle" => Ok(ZoneStatus::Idle),
            "running" => Ok(ZoneStatus::Running),
            "scheduled" => Ok(ZoneStatus::Scheduled),
            "error" => Ok(ZoneStatus::Error),
            _ => Err(format!("Unknown zone status: {}", s)),
        }
    }
}

/// Weekly watering schedule of a zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub enabled: bool,
    /// Local start time, `HH:MM`.
    pub start_time: String,
    pub duration_minutes: u32,
    pub days: Vec<Weekday>,
}

impl Schedule {
    /// Days as three-letter abbreviations, e.g. `Mon, Wed, Fri`.
    pub fn days_summary(&self) -> String {
        self.days
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub id: RecordId,
    pub name: String,
    pub status: ZoneStatus,
    /// Soil moisture, percent.
    pub moisture: f64,
    pub last_watered: NaiveDateTime,
    pub schedule: Schedule,
}

impl Record for Zone {
    const COLLECTION: &'static str = "zones";
    fn id(&self) -> &RecordId {
        &self.id
    }
}

impl Lifecycle for Zone {
    type Flag = ZoneStatus;
    fn flag(&self) -> ZoneStatus {
        self.status
    }
    fn with_flag(&self, status: ZoneStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }
}

// =============================================================================
// Sensor Readings
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorKind {
    SoilMoisture,
    Temperature,
    Humidity,
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorKind::SoilMoisture => write!(f, "soil_moisture"),
            SensorKind::Temperature => write!(f, "temperature"),
            SensorKind::Humidity => write!(f, "humidity"),
        }
    }
}

impl std::str::FromStr for SensorKind {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "soil_moisture" | "moisture" => Ok(SensorKind::SoilMoisture),
            "temperature" => Ok(SensorKind::Temperature),
            "humidity" => Ok(SensorKind::Humidity),
            _ => Err(format!("Unknown sensor kind: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadingStatus {
    Normal,
    Warning,
    Critical,
}

impl fmt::Display for ReadingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadingStatus::Normal => write!(f, "normal"),
            ReadingStatus::Warning => write!(f, "warning"),
            ReadingStatus::Critical => write!(f, "critical"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    pub id: RecordId,
    pub sensor_id: String,
    #[serde(rename = "type")]
    pub kind: SensorKind,
    pub value: f64,
    pub unit: String,
    /// Zone label, e.g. `Zone A`.
    pub location: String,
    pub timestamp: NaiveDateTime,
    pub status: ReadingStatus,
}

impl SensorReading {
    /// Location as a lowercase slug, e.g. `zone-a`.
    pub fn zone_slug(&self) -> String {
        slugify(&self.location)
    }
}

impl Record for SensorReading {
    const COLLECTION: &'static str = "sensor_readings";
    fn id(&self) -> &RecordId {
        &self.id
    }
}

// =============================================================================
// Support Articles
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArticleCategory {
    GettingStarted,
    Troubleshooting,
    Maintenance,
    Features,
}

impl fmt::Display for ArticleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArticleCategory::GettingStarted => write!(f, "getting_started"),
            ArticleCategory::Troubleshooting => write!(f, "troubleshooting"),
            ArticleCategory::Maintenance => write!(f, "maintenance"),
            ArticleCategory::Features => write!(f, "features"),
        }
    }
}

impl std::str::FromStr for ArticleCategory {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "getting_started" => Ok(ArticleCategory::GettingStarted),
            "troubleshooting" => Ok(ArticleCategory::Troubleshooting),
            "maintenance" => Ok(ArticleCategory::Maintenance),
            "features" => Ok(ArticleCategory::Features),
            _ => Err(format!("Unknown article category: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportArticle {
    pub id: RecordId,
    pub title: String,
    pub category: ArticleCategory,
    pub content: String,
    pub last_updated: NaiveDate,
    pub helpful_count: u32,
}

impl Record for SupportArticle {
    const COLLECTION: &'static str = "support_articles";
    fn id(&self) -> &RecordId {
        &self.id
    }
}

// =============================================================================
// Settings
// =============================================================================

/// Delivery channel of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Email,
    Push,
    Sms,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Email => write!(f, "email"),
            Channel::Push => write!(f, "push"),
            Channel::Sms => write!(f, "sms"),
        }
    }
}

impl std::str::FromStr for Channel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email" => Ok(Channel::Email),
            "push" => Ok(Channel::Push),
            "sms" => Ok(Channel::Sms),
            _ => Err(format!("Unknown channel: {}", s)),
        }
    }
}

/// Enabled state of each delivery channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Channels {
    pub email: bool,
    pub push: bool,
    pub sms: bool,
}

impl Channels {
    pub fn get(&self, channel: Channel) -> bool {
        match channel {
            Channel::Email => self.email,
            Channel::Push => self.push,
            Channel::Sms => self.sms,
        }
    }

    pub fn toggled(self, channel: Channel) -> Self {
        let mut next = self;
        match channel {
            Channel::Email => next.email = !next.email,
            Channel::Push => next.push = !next.push,
            Channel::Sms => next.sms = !next.sms,
        }
        next
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationSetting {
    pub id: RecordId,
    /// Notification category, e.g. `Critical Alerts`.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(flatten)]
    pub channels: Channels,
}

impl Record for NotificationSetting {
    const COLLECTION: &'static str = "notification_settings";
    fn id(&self) -> &RecordId {
        &self.id
    }
}

impl Lifecycle for NotificationSetting {
    type Flag = Channels;
    fn flag(&self) -> Channels {
        self.channels
    }
    fn with_flag(&self, channels: Channels) -> Self {
        Self {
            channels,
            ..self.clone()
        }
    }
}

/// Input control kind of a system preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreferenceInput {
    Text,
    Number,
    Toggle,
    Select,
}

impl fmt::Display for PreferenceInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreferenceInput::Text => write!(f, "text"),
            PreferenceInput::Number => write!(f, "number"),
            PreferenceInput::Toggle => write!(f, "toggle"),
            PreferenceInput::Select => write!(f, "select"),
        }
    }
}

impl PreferenceInput {
    /// Read a raw form value as this input kind produces it.
    ///
    /// Text and select inputs keep the raw string as is, even when it looks
    /// like a number or a boolean.
    pub fn parse_value(&self, raw: &str) -> Result<PreferenceValue, String> {
        match self {
            PreferenceInput::Text | PreferenceInput::Select => {
                Ok(PreferenceValue::Text(raw.to_string()))
            }
            PreferenceInput::Toggle => match raw.trim() {
                "true" | "on" => Ok(PreferenceValue::Toggle(true)),
                "false" | "off" => Ok(PreferenceValue::Toggle(false)),
                other => Err(format!("{} is not a valid toggle value", other)),
            },
            PreferenceInput::Number => match raw.trim().parse::<f64>() {
                Ok(n) if n.is_finite() => Ok(PreferenceValue::Number(n)),
                _ => Err(format!("{} is not a valid number value", raw)),
            },
        }
    }
}

/// Value of a system preference. Untagged so seeds hold plain JSON scalars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PreferenceValue {
    Toggle(bool),
    Number(f64),
    Text(String),
}

impl fmt::Display for PreferenceValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreferenceValue::Toggle(v) => write!(f, "{}", v),
            PreferenceValue::Number(v) => write!(f, "{}", v),
            PreferenceValue::Text(v) => f.write_str(v),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemPreference {
    pub id: RecordId,
    pub name: String,
    pub value: PreferenceValue,
    #[serde(rename = "type")]
    pub input: PreferenceInput,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub unit: Option<String>,
}

impl Record for SystemPreference {
    const COLLECTION: &'static str = "system_preferences";
    fn id(&self) -> &RecordId {
        &self.id
    }
}

impl Lifecycle for SystemPreference {
    type Flag = PreferenceValue;
    fn flag(&self) -> PreferenceValue {
        self.value.clone()
    }
    fn with_flag(&self, value: PreferenceValue) -> Self {
        Self {
            value,
            ..self.clone()
        }
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Lowercase, hyphen-separated form of a label: `Zone A` -> `zone-a`.
pub fn slugify(label: &str) -> String {
    label
        .split_whitespace()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}
