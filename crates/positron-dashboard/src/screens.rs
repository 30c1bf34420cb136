//! Screen-level operations and summary statistics.
//!
//! Each screen is a [`ListState`] instantiated with its record and filter
//! type. Statistics are always computed over the full collection through
//! [`ListState::aggregate`], never over the filtered view.

use chrono::NaiveTime;
use serde::Serialize;
use tracing::info;

use crate::error::{DashboardError, ListError};
use crate::filters::{AlertFilter, ArticleFilter, RecommendationFilter, SensorFilter, ZoneFilter};
use crate::list_state::{AllRecords, ListState, Record};
use crate::types::{
    slugify, Alert, AlertKind, ArticleCategory, Channel, Impact, NotificationSetting, PreferenceInput,
    PreferenceValue, ReadingStatus, Recommendation, Schedule, SensorKind, SensorReading,
    SupportArticle, SystemPreference, Zone, ZoneStatus,
};

pub type AlertList = ListState<Alert, AlertFilter>;
pub type RecommendationList = ListState<Recommendation, RecommendationFilter>;
pub type ZoneList = ListState<Zone, ZoneFilter>;
pub type SensorList = ListState<SensorReading, SensorFilter>;
pub type ArticleList = ListState<SupportArticle, ArticleFilter>;
pub type NotificationList = ListState<NotificationSetting, AllRecords>;
pub type PreferenceList = ListState<SystemPreference, AllRecords>;

// =============================================================================
// Alerts
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AlertStats {
    pub critical: usize,
    pub warning: usize,
    pub unread: usize,
}

impl ListState<Alert, AlertFilter> {
    pub fn mark_read(&mut self, id: &str) -> Result<&Alert, ListError> {
        self.set_lifecycle_flag(id, true)
    }

    pub fn mark_all_read(&mut self) {
        self.set_all_lifecycle_flags(true);
    }

    pub fn stats(&self) -> AlertStats {
        AlertStats {
            critical: self.aggregate(|a| a.kind == AlertKind::Critical),
            warning: self.aggregate(|a| a.kind == AlertKind::Warning),
            unread: self.aggregate(|a| !a.is_read),
        }
    }
}

// =============================================================================
// Recommendations
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RecommendationStats {
    pub high_impact: usize,
    pub implemented: usize,
    pub pending: usize,
}

impl ListState<Recommendation, RecommendationFilter> {
    pub fn implement(&mut self, id: &str) -> Result<&Recommendation, ListError> {
        let rec = self.set_lifecycle_flag(id, true)?;
        info!(id, title = %rec.title, "Recommendation implemented");
        Ok(rec)
    }

    pub fn stats(&self) -> RecommendationStats {
        RecommendationStats {
            high_impact: self.aggregate(|r| r.impact == Impact::High),
            implemented: self.aggregate(|r| r.is_implemented),
            pending: self.aggregate(|r| !r.is_implemented),
        }
    }
}

// =============================================================================
// Irrigation zones
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ZoneStats {
    pub running: usize,
    pub scheduled: usize,
    pub errored: usize,
    /// Mean soil moisture across all zones, `None` when there are no zones.
    pub average_moisture: Option<f64>,
}

impl ListState<Zone, ZoneFilter> {
    pub fn start_irrigation(&mut self, id: &str) -> Result<&Zone, ListError> {
        let zone = self.set_lifecycle_flag(id, ZoneStatus::Running)?;
        info!(id, zone = %zone.name, "Irrigation started");
        Ok(zone)
    }

    pub fn stop_irrigation(&mut self, id: &str) -> Result<&Zone, ListError> {
        let zone = self.set_lifecycle_flag(id, ZoneStatus::Idle)?;
        info!(id, zone = %zone.name, "Irrigation stopped");
        Ok(zone)
    }

    /// Replace a zone's schedule. The schedule is validated before the zone
    /// is looked up.
    pub fn replace_schedule(&mut self, id: &str, schedule: Schedule) -> Result<&Zone, DashboardError> {
        validate_schedule(id, &schedule)?;
        let zone = self.replace(id, move |z| Zone {
            schedule,
            ..z.clone()
        })?;
        Ok(zone)
    }

    pub fn stats(&self) -> ZoneStats {
        let average_moisture = if self.is_empty() {
            None
        } else {
            let total: f64 = self.records().iter().map(|z| z.moisture).sum();
            Some(total / self.len() as f64)
        };
        ZoneStats {
            running: self.aggregate(|z| z.status == ZoneStatus::Running),
            scheduled: self.aggregate(|z| z.status == ZoneStatus::Scheduled),
            errored: self.aggregate(|z| z.status == ZoneStatus::Error),
            average_moisture,
        }
    }
}

fn validate_schedule(zone: &str, schedule: &Schedule) -> Result<(), DashboardError> {
    let invalid = |reason: &str| DashboardError::InvalidSchedule {
        zone: zone.to_string(),
        reason: reason.to_string(),
    };
    if NaiveTime::parse_from_str(&schedule.start_time, "%H:%M").is_err() {
        return Err(invalid("start time must be HH:MM"));
    }
    if schedule.duration_minutes == 0 {
        return Err(invalid("duration must be positive"));
    }
    if schedule.enabled && schedule.days.is_empty() {
        return Err(invalid("an enabled schedule needs at least one day"));
    }
    Ok(())
}

// =============================================================================
// Sensor readings
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SensorStats {
    pub normal: usize,
    pub warning: usize,
    pub critical: usize,
}

impl ListState<SensorReading, SensorFilter> {
    /// Change the zone selector, keeping the sensor kind.
    pub fn select_zone(&mut self, zone: Option<&str>) {
        let mut filter = self.filter().clone();
        filter.zone = zone.map(slugify);
        self.set_filter(filter);
    }

    /// Change the sensor kind, keeping the zone selector.
    pub fn select_kind(&mut self, kind: Option<SensorKind>) {
        let mut filter = self.filter().clone();
        filter.kind = kind;
        self.set_filter(filter);
    }

    pub fn stats(&self) -> SensorStats {
        SensorStats {
            normal: self.aggregate(|r| r.status == ReadingStatus::Normal),
            warning: self.aggregate(|r| r.status == ReadingStatus::Warning),
            critical: self.aggregate(|r| r.status == ReadingStatus::Critical),
        }
    }
}

// =============================================================================
// Support articles
// =============================================================================

impl ListState<SupportArticle, ArticleFilter> {
    /// Change the search text, keeping the category.
    pub fn search(&mut self, query: &str) {
        let mut filter = self.filter().clone();
        filter.query = query.to_string();
        self.set_filter(filter);
    }

    /// Change the category, keeping the search text.
    pub fn select_category(&mut self, category: Option<ArticleCategory>) {
        let mut filter = self.filter().clone();
        filter.category = category;
        self.set_filter(filter);
    }
}

// =============================================================================
// Settings
// =============================================================================

impl ListState<NotificationSetting, AllRecords> {
    pub fn toggle_channel(
        &mut self,
        id: &str,
        channel: Channel,
    ) -> Result<&NotificationSetting, ListError> {
        self.replace(id, |setting| NotificationSetting {
            channels: setting.channels.toggled(channel),
            ..setting.clone()
        })
    }

    /// Number of notification types delivered on `channel`.
    pub fn enabled_on(&self, channel: Channel) -> usize {
        self.aggregate(|s| s.channels.get(channel))
    }
}

impl ListState<SystemPreference, AllRecords> {
    /// Set a preference value, checking it against the preference's input kind.
    pub fn set_preference(
        &mut self,
        id: &str,
        value: PreferenceValue,
    ) -> Result<&SystemPreference, DashboardError> {
        let pref = self.get(id).ok_or_else(|| ListError::RecordNotFound {
            collection: SystemPreference::COLLECTION,
            id: id.to_string(),
        })?;
        validate_preference(pref, &value)?;
        Ok(self.set_lifecycle_flag(id, value)?)
    }

    /// Set a preference from a raw form value, read according to the
    /// preference's input kind.
    pub fn set_preference_from_input(
        &mut self,
        id: &str,
        raw: &str,
    ) -> Result<&SystemPreference, DashboardError> {
        let pref = self.get(id).ok_or_else(|| ListError::RecordNotFound {
            collection: SystemPreference::COLLECTION,
            id: id.to_string(),
        })?;
        let value = pref
            .input
            .parse_value(raw)
            .map_err(|reason| DashboardError::InvalidPreference {
                preference: pref.id.to_string(),
                reason,
            })?;
        self.set_preference(id, value)
    }
}

fn validate_preference(pref: &SystemPreference, value: &PreferenceValue) -> Result<(), DashboardError> {
    let invalid = |reason: String| DashboardError::InvalidPreference {
        preference: pref.id.to_string(),
        reason,
    };
    match (pref.input, value) {
        (PreferenceInput::Text, PreferenceValue::Text(_)) => Ok(()),
        (PreferenceInput::Toggle, PreferenceValue::Toggle(_)) => Ok(()),
        (PreferenceInput::Number, PreferenceValue::Number(n)) if n.is_finite() => Ok(()),
        (PreferenceInput::Number, PreferenceValue::Number(_)) => {
            Err(invalid("number must be finite".to_string()))
        }
        (PreferenceInput::Select, PreferenceValue::Text(choice)) => {
            if pref.options.iter().any(|o| o == choice) {
                Ok(())
            } else {
                Err(invalid(format!(
                    "{} is not one of {}",
                    choice,
                    pref.options.join(", ")
                )))
            }
        }
        (input, other) => Err(invalid(format!("{} is not a valid {} value", other, input))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDateTime, Weekday};
    use positron_core::types::RecordId;

    fn zone(id: &str, status: ZoneStatus, moisture: f64) -> Zone {
        Zone {
            id: RecordId::new(id),
            name: format!("Zone {}", id),
            status,
            moisture,
            last_watered: NaiveDateTime::default(),
            schedule: Schedule {
                enabled: true,
                start_time: "06:00".to_string(),
                duration_minutes: 30,
                days: vec![Weekday::Mon],
            },
        }
    }

    fn zones() -> ZoneList {
        ListState::initialize(vec![
            zone("z1", ZoneStatus::Idle, 42.0),
            zone("z2", ZoneStatus::Running, 38.0),
            zone("z3", ZoneStatus::Scheduled, 46.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_start_and_stop_irrigation() {
        let mut list = zones();
        assert_eq!(
            list.start_irrigation("z1").unwrap().status,
            ZoneStatus::Running
        );
        assert_eq!(list.stop_irrigation("z2").unwrap().status, ZoneStatus::Idle);
        assert!(matches!(
            list.start_irrigation("z9"),
            Err(ListError::RecordNotFound { collection: "zones", .. })
        ));
    }

    #[test]
    fn test_zone_stats() {
        let mut list = zones();
        let stats = list.stats();
        assert_eq!(stats.running, 1);
        assert_eq!(stats.scheduled, 1);
        assert_eq!(stats.errored, 0);
        assert!((stats.average_moisture.unwrap() - 42.0).abs() < 1e-9);

        list.set_filter(ZoneFilter::Status(ZoneStatus::Idle));
        assert_eq!(list.stats(), stats);
    }

    #[test]
    fn test_zone_stats_empty() {
        let list: ZoneList = ListState::initialize(vec![]).unwrap();
        assert_eq!(list.stats().average_moisture, None);
    }

    #[test]
    fn test_replace_schedule_keeps_other_fields() {
        let mut list = zones();
        let before = list.get("z1").cloned().unwrap();
        let schedule = Schedule {
            enabled: false,
            start_time: "21:30".to_string(),
            duration_minutes: 15,
            days: vec![],
        };
        let updated = list.replace_schedule("z1", schedule.clone()).unwrap();
        assert_eq!(updated.schedule, schedule);
        assert_eq!(updated.status, before.status);
        assert_eq!(updated.name, before.name);
        assert_eq!(updated.moisture, before.moisture);
    }

    #[test]
    fn test_replace_schedule_rejects_invalid() {
        let mut list = zones();
        let base = list.get("z1").unwrap().schedule.clone();

        let bad_time = Schedule {
            start_time: "6 am".to_string(),
            ..base.clone()
        };
        let bad_duration = Schedule {
            duration_minutes: 0,
            ..base.clone()
        };
        let no_days = Schedule {
            days: vec![],
            ..base.clone()
        };
        for schedule in [bad_time, bad_duration, no_days] {
            let err = list.replace_schedule("z1", schedule).unwrap_err();
            assert!(matches!(err, DashboardError::InvalidSchedule { ref zone, .. } if zone == "z1"));
        }
        assert_eq!(list.get("z1").unwrap().schedule, base);
    }

    #[test]
    fn test_replace_schedule_missing_zone() {
        let mut list = zones();
        let schedule = list.get("z1").unwrap().schedule.clone();
        let err = list.replace_schedule("nope", schedule).unwrap_err();
        assert!(matches!(
            err,
            DashboardError::List(ListError::RecordNotFound { .. })
        ));
    }

    fn preferences() -> PreferenceList {
        ListState::initialize(vec![
            SystemPreference {
                id: RecordId::new("1"),
                name: "Default Irrigation Duration".to_string(),
                value: PreferenceValue::Number(30.0),
                input: PreferenceInput::Number,
                options: vec![],
                unit: Some("minutes".to_string()),
            },
            SystemPreference {
                id: RecordId::new("3"),
                name: "Temperature Units".to_string(),
                value: PreferenceValue::Text("Celsius".to_string()),
                input: PreferenceInput::Select,
                options: vec!["Celsius".to_string(), "Fahrenheit".to_string()],
                unit: None,
            },
            SystemPreference {
                id: RecordId::new("4"),
                name: "Auto-adjust for Weather".to_string(),
                value: PreferenceValue::Toggle(true),
                input: PreferenceInput::Toggle,
                options: vec![],
                unit: None,
            },
            SystemPreference {
                id: RecordId::new("5"),
                name: "Night Mode Schedule".to_string(),
                value: PreferenceValue::Text("22:00-06:00".to_string()),
                input: PreferenceInput::Text,
                options: vec![],
                unit: None,
            },
        ])
        .unwrap()
    }

    #[test]
    fn test_set_preference_valid_values() {
        let mut prefs = preferences();
        prefs
            .set_preference("1", PreferenceValue::Number(45.0))
            .unwrap();
        prefs
            .set_preference("3", PreferenceValue::Text("Fahrenheit".to_string()))
            .unwrap();
        prefs
            .set_preference("4", PreferenceValue::Toggle(false))
            .unwrap();
        assert_eq!(prefs.get("1").unwrap().value, PreferenceValue::Number(45.0));
        assert_eq!(
            prefs.get("3").unwrap().value,
            PreferenceValue::Text("Fahrenheit".to_string())
        );
        assert_eq!(prefs.get("4").unwrap().value, PreferenceValue::Toggle(false));
    }

    #[test]
    fn test_set_preference_rejects_mismatched_values() {
        let mut prefs = preferences();
        let cases = [
            ("1", PreferenceValue::Text("thirty".to_string())),
            ("1", PreferenceValue::Number(f64::NAN)),
            ("3", PreferenceValue::Text("Kelvin".to_string())),
            ("4", PreferenceValue::Number(1.0)),
        ];
        for (id, value) in cases {
            let err = prefs.set_preference(id, value).unwrap_err();
            assert!(matches!(err, DashboardError::InvalidPreference { .. }));
        }
        assert!(matches!(
            prefs.set_preference("9", PreferenceValue::Toggle(true)),
            Err(DashboardError::List(ListError::RecordNotFound { .. }))
        ));
        assert_eq!(prefs.get("1").unwrap().value, PreferenceValue::Number(30.0));
    }

    #[test]
    fn test_set_preference_from_input_uses_input_kind() {
        let mut prefs = preferences();
        prefs.set_preference_from_input("5", "2200").unwrap();
        prefs.set_preference_from_input("5", "true").unwrap();
        assert_eq!(
            prefs.get("5").unwrap().value,
            PreferenceValue::Text("true".to_string())
        );

        prefs.set_preference_from_input("1", "45").unwrap();
        prefs.set_preference_from_input("3", "Fahrenheit").unwrap();
        prefs.set_preference_from_input("4", "false").unwrap();
        assert_eq!(prefs.get("1").unwrap().value, PreferenceValue::Number(45.0));
        assert_eq!(prefs.get("4").unwrap().value, PreferenceValue::Toggle(false));

        for (id, raw) in [("1", "thirty"), ("1", "NaN"), ("4", "maybe"), ("3", "Kelvin")] {
            let err = prefs.set_preference_from_input(id, raw).unwrap_err();
            assert!(matches!(err, DashboardError::InvalidPreference { .. }));
        }
        assert!(matches!(
            prefs.set_preference_from_input("9", "1"),
            Err(DashboardError::List(ListError::RecordNotFound { .. }))
        ));
    }
}
