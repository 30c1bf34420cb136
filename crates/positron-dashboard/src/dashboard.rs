//! The dashboard aggregate: every screen's list state built from one seed.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::info;

use crate::error::DashboardError;
use crate::list_state::ListState;
use crate::reports::{PerformanceMetric, UsageSample, UsageSummary};
use crate::screens::{
    AlertList, ArticleList, NotificationList, PreferenceList, RecommendationList, SensorList,
    ZoneList,
};
use crate::seed::SeedProvider;

/// Sidebar entries of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    Overview,
    Sensors,
    Controls,
    Reports,
    Alerts,
    Recommendations,
    Support,
    Settings,
}

impl Screen {
    pub const ALL: [Screen; 8] = [
        Screen::Overview,
        Screen::Sensors,
        Screen::Controls,
        Screen::Reports,
        Screen::Alerts,
        Screen::Recommendations,
        Screen::Support,
        Screen::Settings,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Screen::Overview => "/dashboard",
            Screen::Sensors => "/dashboard/sensors",
            Screen::Controls => "/dashboard/controls",
            Screen::Reports => "/dashboard/reports",
            Screen::Alerts => "/dashboard/alerts",
            Screen::Recommendations => "/dashboard/recommendations",
            Screen::Support => "/dashboard/support",
            Screen::Settings => "/dashboard/settings",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Screen::Overview => "Overview",
            Screen::Sensors => "Sensors",
            Screen::Controls => "Controls",
            Screen::Reports => "Reports",
            Screen::Alerts => "Alerts",
            Screen::Recommendations => "AI Recommendations",
            Screen::Support => "Support",
            Screen::Settings => "Settings",
        }
    }

    /// Exact match on a sidebar path; trailing slashes are ignored.
    pub fn from_path(path: &str) -> Option<Screen> {
        let trimmed = path.trim_end_matches('/');
        Screen::ALL.into_iter().find(|s| s.path() == trimmed)
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for Screen {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "overview" => Ok(Screen::Overview),
            "sensors" => Ok(Screen::Sensors),
            "controls" => Ok(Screen::Controls),
            "reports" => Ok(Screen::Reports),
            "alerts" => Ok(Screen::Alerts),
            "recommendations" => Ok(Screen::Recommendations),
            "support" => Ok(Screen::Support),
            "settings" => Ok(Screen::Settings),
            _ => Err(format!("Unknown screen: {}", s)),
        }
    }
}

/// Usage history and metrics shown on the reports screen. Read-only.
#[derive(Debug, Clone, Default)]
pub struct Reports {
    pub water_usage: Vec<UsageSample>,
    pub metrics: Vec<PerformanceMetric>,
}

impl Reports {
    pub fn summary(&self) -> Option<UsageSummary> {
        UsageSummary::from_samples(&self.water_usage)
    }
}

/// State of every dashboard screen.
///
/// Screens are independent: an operation on one list never touches another.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub alerts: AlertList,
    pub recommendations: RecommendationList,
    pub zones: ZoneList,
    pub sensors: SensorList,
    pub articles: ArticleList,
    pub notifications: NotificationList,
    pub preferences: PreferenceList,
    pub reports: Reports,
}

impl Dashboard {
    pub fn from_seeds(provider: &dyn SeedProvider) -> Result<Self, DashboardError> {
        let seed = provider.load()?;
        let dashboard = Self {
            alerts: ListState::initialize(seed.alerts)?,
            recommendations: ListState::initialize(seed.recommendations)?,
            zones: ListState::initialize(seed.zones)?,
            sensors: ListState::initialize(seed.sensor_readings)?,
            articles: ListState::initialize(seed.support_articles)?,
            notifications: ListState::initialize(seed.notification_settings)?,
            preferences: ListState::initialize(seed.system_preferences)?,
            reports: Reports {
                water_usage: seed.water_usage,
                metrics: seed.performance_metrics,
            },
        };
        info!(
            source = %provider.describe(),
            alerts = dashboard.alerts.len(),
            recommendations = dashboard.recommendations.len(),
            zones = dashboard.zones.len(),
            "Dashboard initialized"
        );
        Ok(dashboard)
    }
}
