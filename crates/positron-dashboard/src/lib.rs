//! Positron Dashboard crate - screen state for the irrigation dashboard.
//!
//! Provides:
//! - A generic filtered list state shared by every screen
//! - Record types, named filters and lifecycle operations per screen
//! - Summary statistics over full collections
//! - Injectable seed providers and report summaries

pub mod dashboard;
pub mod error;
pub mod filters;
pub mod list_state;
pub mod reports;
pub mod screens;
pub mod seed;
pub mod types;

pub use dashboard::{Dashboard, Reports, Screen};
pub use error::{DashboardError, ListError};
pub use filters::{AlertFilter, ArticleFilter, RecommendationFilter, SensorFilter, ZoneFilter};
pub use list_state::{AllRecords, Filter, Lifecycle, ListState, Record};
pub use reports::{PerformanceMetric, Trend, UsageSample, UsageSummary};
pub use screens::{
    AlertList, AlertStats, ArticleList, NotificationList, PreferenceList, RecommendationList,
    RecommendationStats, SensorList, SensorStats, ZoneList, ZoneStats,
};
pub use seed::{FixtureSeeds, JsonSeedFile, SeedBundle, SeedProvider};
pub use types::*;
