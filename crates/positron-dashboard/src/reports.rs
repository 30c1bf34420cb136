//! Water usage history and performance metrics for the reports screen.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day of water usage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageSample {
    pub date: NaiveDate,
    /// Liters used.
    pub usage: f64,
    /// Liters saved against the unoptimised baseline.
    pub savings: f64,
    /// System efficiency, percent.
    pub efficiency: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Up,
    Down,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetric {
    pub name: String,
    pub value: f64,
    /// Change against the previous period, percent.
    pub change: f64,
    pub unit: String,
    pub trend: Trend,
}

impl PerformanceMetric {
    /// Whether the trend is good news.
    ///
    /// `higher_is_better` says which direction counts as an improvement for
    /// this metric. A neutral trend is neither good nor bad.
    pub fn is_favorable(&self, higher_is_better: bool) -> Option<bool> {
        match self.trend {
            Trend::Neutral => None,
            Trend::Up => Some(higher_is_better),
            Trend::Down => Some(!higher_is_better),
        }
    }
}

/// Totals over a usage history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageSummary {
    pub days: usize,
    pub total_usage: f64,
    pub total_savings: f64,
    pub mean_efficiency: f64,
    /// Day with the highest efficiency; the earliest wins a tie.
    pub best_day: NaiveDate,
}

impl UsageSummary {
    /// Summarise a usage history. Returns `None` for an empty history.
    pub fn from_samples(samples: &[UsageSample]) -> Option<Self> {
        let first = samples.first()?;
        let mut best = first;
        for sample in &samples[1..] {
            if sample.efficiency > best.efficiency {
                best = sample;
            }
        }
        let total_efficiency: f64 = samples.iter().map(|s| s.efficiency).sum();
        Some(Self {
            days: samples.len(),
            total_usage: samples.iter().map(|s| s.usage).sum(),
            total_savings: samples.iter().map(|s| s.savings).sum(),
            mean_efficiency: total_efficiency / samples.len() as f64,
            best_day: best.date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(day: u32, usage: f64, savings: f64, efficiency: f64) -> UsageSample {
        UsageSample {
            date: NaiveDate::from_ymd_opt(2024, 2, day).unwrap(),
            usage,
            savings,
            efficiency,
        }
    }

    #[test]
    fn test_usage_summary() {
        let samples = vec![
            sample(14, 250.0, 50.0, 85.0),
            sample(15, 200.0, 75.0, 90.0),
            sample(16, 180.0, 90.0, 92.0),
            sample(17, 220.0, 60.0, 92.0),
        ];
        let summary = UsageSummary::from_samples(&samples).unwrap();
        assert_eq!(summary.days, 4);
        assert_eq!(summary.total_usage, 850.0);
        assert_eq!(summary.total_savings, 275.0);
        assert!((summary.mean_efficiency - 89.75).abs() < 1e-9);
        assert_eq!(summary.best_day, NaiveDate::from_ymd_opt(2024, 2, 16).unwrap());
    }

    #[test]
    fn test_usage_summary_empty() {
        assert!(UsageSummary::from_samples(&[]).is_none());
    }

    #[test]
    fn test_metric_favorability() {
        let metric = |trend| PerformanceMetric {
            name: "Water Usage".to_string(),
            value: 195.0,
            change: -12.5,
            unit: "liters".to_string(),
            trend,
        };
        // Falling water usage is good
        assert_eq!(metric(Trend::Down).is_favorable(false), Some(true));
        assert_eq!(metric(Trend::Up).is_favorable(false), Some(false));
        // Rising efficiency is good
        assert_eq!(metric(Trend::Up).is_favorable(true), Some(true));
        assert_eq!(metric(Trend::Neutral).is_favorable(true), None);
    }
}
