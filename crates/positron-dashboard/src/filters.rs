//! Named filters for each dashboard screen.
//!
//! Every filter is a closed type, so selecting a filter that does not exist is
//! unrepresentable in code. String names are parsed through `FromStr` and
//! rejected by [`ListState::set_filter_named`](crate::list_state::ListState::set_filter_named).

use std::fmt;
use std::str::FromStr;

use crate::list_state::Filter;
use crate::types::{
    slugify, Alert, AlertKind, ArticleCategory, Impact, Recommendation, SensorKind,
    SensorReading, SupportArticle, Zone, ZoneStatus,
};

// =============================================================================
// Alerts
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AlertFilter {
    #[default]
    All,
    Unread,
    Critical,
}

impl Filter<Alert> for AlertFilter {
    fn matches(&self, alert: &Alert) -> bool {
        match self {
            AlertFilter::All => true,
            AlertFilter::Unread => !alert.is_read,
            AlertFilter::Critical => alert.kind == AlertKind::Critical,
        }
    }
}

impl fmt::Display for AlertFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertFilter::All => write!(f, "all"),
            AlertFilter::Unread => write!(f, "unread"),
            AlertFilter::Critical => write!(f, "critical"),
        }
    }
}

impl FromStr for AlertFilter {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(AlertFilter::All),
            "unread" => Ok(AlertFilter::Unread),
            "critical" => Ok(AlertFilter::Critical),
            _ => Err(format!("Unknown alert filter: {}", s)),
        }
    }
}

// =============================================================================
// Recommendations
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RecommendationFilter {
    #[default]
    All,
    HighImpact,
    NotImplemented,
}

impl Filter<Recommendation> for RecommendationFilter {
    fn matches(&self, rec: &Recommendation) -> bool {
        match self {
            RecommendationFilter::All => true,
            RecommendationFilter::HighImpact => rec.impact == Impact::High,
            RecommendationFilter::NotImplemented => !rec.is_implemented,
        }
    }
}

impl fmt::Display for RecommendationFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecommendationFilter::All => write!(f, "all"),
            RecommendationFilter::HighImpact => write!(f, "high_impact"),
            RecommendationFilter::NotImplemented => write!(f, "not_implemented"),
        }
    }
}

impl FromStr for RecommendationFilter {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(RecommendationFilter::All),
            "high_impact" => Ok(RecommendationFilter::HighImpact),
            "not_implemented" => Ok(RecommendationFilter::NotImplemented),
            _ => Err(format!("Unknown recommendation filter: {}", s)),
        }
    }
}

// =============================================================================
// Zones
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ZoneFilter {
    #[default]
    All,
    Status(ZoneStatus),
}

impl Filter<Zone> for ZoneFilter {
    fn matches(&self, zone: &Zone) -> bool {
        match self {
            ZoneFilter::All => true,
            ZoneFilter::Status(status) => zone.status == *status,
        }
    }
}

impl fmt::Display for ZoneFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZoneFilter::All => write!(f, "all"),
            ZoneFilter::Status(status) => write!(f, "{}", status),
        }
    }
}

impl FromStr for ZoneFilter {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(ZoneFilter::All),
            other => other.parse::<ZoneStatus>().map(ZoneFilter::Status),
        }
    }
}

// =============================================================================
// Sensor readings
// =============================================================================

/// Zone selector combined with a sensor kind.
///
/// `zone` is a slug such as `zone-a`; `None` means all zones. Selectors given
/// as a location label (`Zone A`) are slugged first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SensorFilter {
    pub zone: Option<String>,
    pub kind: Option<SensorKind>,
}

impl SensorFilter {
    /// Build from the two selector values, where `all` means no constraint.
    pub fn from_selectors(zone: &str, kind: &str) -> Result<Self, String> {
        let zone = match zone {
            "all" => None,
            label => Some(slugify(label)),
        };
        let kind = match kind {
            "all" => None,
            other => Some(other.parse::<SensorKind>()?),
        };
        Ok(Self { zone, kind })
    }
}

impl Filter<SensorReading> for SensorFilter {
    fn matches(&self, reading: &SensorReading) -> bool {
        let zone_ok = self
            .zone
            .as_deref()
            .map_or(true, |slug| reading.zone_slug() == slug);
        let kind_ok = self.kind.map_or(true, |kind| reading.kind == kind);
        zone_ok && kind_ok
    }
}

// =============================================================================
// Support articles
// =============================================================================

/// Free-text search combined with a category.
///
/// The query matches case-insensitively against title and content; an empty
/// query matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleFilter {
    pub query: String,
    pub category: Option<ArticleCategory>,
}

impl ArticleFilter {
    pub fn new(query: impl Into<String>, category: Option<ArticleCategory>) -> Self {
        Self {
            query: query.into(),
            category,
        }
    }
}

impl Filter<SupportArticle> for ArticleFilter {
    fn matches(&self, article: &SupportArticle) -> bool {
        let needle = self.query.to_lowercase();
        let matches_search = article.title.to_lowercase().contains(&needle)
            || article.content.to_lowercase().contains(&needle);
        let matches_category = self.category.map_or(true, |c| article.category == c);
        matches_search && matches_category
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use positron_core::types::RecordId;

    fn reading(id: &str, kind: SensorKind, location: &str) -> SensorReading {
        SensorReading {
            id: RecordId::new(id),
            sensor_id: format!("S{}", id),
            kind,
            value: 1.0,
            unit: "%".to_string(),
            location: location.to_string(),
            timestamp: NaiveDateTime::default(),
            status: crate::types::ReadingStatus::Normal,
        }
    }

    fn article(title: &str, content: &str, category: ArticleCategory) -> SupportArticle {
        SupportArticle {
            id: RecordId::new(title),
            title: title.to_string(),
            category,
            content: content.to_string(),
            last_updated: NaiveDate::default(),
            helpful_count: 0,
        }
    }

    #[test]
    fn test_named_filters_parse_and_display() {
        for name in ["all", "unread", "critical"] {
            assert_eq!(name.parse::<AlertFilter>().unwrap().to_string(), name);
        }
        for name in ["all", "high_impact", "not_implemented"] {
            assert_eq!(
                name.parse::<RecommendationFilter>().unwrap().to_string(),
                name
            );
        }
        for name in ["all", "idle", "running", "scheduled", "error"] {
            assert_eq!(name.parse::<ZoneFilter>().unwrap().to_string(), name);
        }
        assert!("urgent".parse::<AlertFilter>().is_err());
        assert!("high".parse::<RecommendationFilter>().is_err());
        assert!("paused".parse::<ZoneFilter>().is_err());
    }

    #[test]
    fn test_sensor_filter_zone_and_kind() {
        let filter = SensorFilter::from_selectors("zone-a", "moisture").unwrap();
        assert!(filter.matches(&reading("1", SensorKind::SoilMoisture, "Zone A")));
        assert!(!filter.matches(&reading("2", SensorKind::Humidity, "Zone A")));
        assert!(!filter.matches(&reading("3", SensorKind::SoilMoisture, "Zone C")));

        let all = SensorFilter::from_selectors("all", "all").unwrap();
        assert_eq!(all, SensorFilter::default());
        assert!(all.matches(&reading("4", SensorKind::Temperature, "Zone B")));

        assert!(SensorFilter::from_selectors("all", "pressure").is_err());

        let by_label = SensorFilter::from_selectors("Zone A", "all").unwrap();
        assert_eq!(by_label.zone.as_deref(), Some("zone-a"));
        assert!(by_label.matches(&reading("5", SensorKind::Temperature, "Zone A")));
    }

    #[test]
    fn test_article_filter_query_is_case_insensitive() {
        let a = article(
            "Troubleshooting Sensor Issues",
            "Common sensor problems and their solutions.",
            ArticleCategory::Troubleshooting,
        );
        assert!(ArticleFilter::new("SENSOR", None).matches(&a));
        assert!(ArticleFilter::new("solutions", None).matches(&a));
        assert!(!ArticleFilter::new("pump", None).matches(&a));
        assert!(ArticleFilter::default().matches(&a));
    }

    #[test]
    fn test_article_filter_category_and_query_combine() {
        let a = article("Maintenance Schedule Guide", "tasks", ArticleCategory::Maintenance);
        assert!(ArticleFilter::new("guide", Some(ArticleCategory::Maintenance)).matches(&a));
        assert!(!ArticleFilter::new("guide", Some(ArticleCategory::Features)).matches(&a));
        assert!(!ArticleFilter::new("missing", Some(ArticleCategory::Maintenance)).matches(&a));
    }
}
