//! CLI argument definitions for the Positron dashboard.
//!
//! Priority resolution: CLI args > env vars > config file > defaults.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use positron_dashboard::{ArticleCategory, Channel};
use positron_portal::ExportFormat;

/// Positron - smart irrigation dashboard state, driven from the command line.
#[derive(Parser, Debug)]
#[command(name = "positron", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// JSON seed file for the dashboard collections.
    #[arg(short = 's', long = "seed-file")]
    pub seed_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write the default configuration file.
    InitConfig,

    /// Alerts and notifications.
    Alerts {
        /// all, unread or critical.
        #[arg(long, default_value = "all")]
        filter: String,
        /// Mark an alert as read. Repeatable.
        #[arg(long = "mark-read")]
        mark_read: Vec<String>,
        #[arg(long = "mark-all-read")]
        mark_all_read: bool,
    },

    /// AI recommendations.
    Recommendations {
        /// all, high_impact or not_implemented.
        #[arg(long, default_value = "all")]
        filter: String,
        /// Mark a recommendation as implemented. Repeatable.
        #[arg(long)]
        implement: Vec<String>,
    },

    /// Irrigation zones.
    Zones {
        /// all, idle, running, scheduled or error.
        #[arg(long, default_value = "all")]
        filter: String,
        #[arg(long)]
        start: Vec<String>,
        #[arg(long)]
        stop: Vec<String>,
    },

    /// Sensor readings.
    Sensors {
        /// all or a zone slug such as zone-a.
        #[arg(long, default_value = "all")]
        zone: String,
        /// all, soil_moisture, temperature or humidity.
        #[arg(long, default_value = "all")]
        kind: String,
        /// Simulate an export in the given format.
        #[arg(long)]
        export: Option<ExportFormat>,
    },

    /// Support articles.
    Support {
        #[arg(long, default_value = "")]
        query: String,
        #[arg(long)]
        category: Option<ArticleCategory>,
    },

    /// Notification settings and system preferences.
    Settings {
        /// Toggle a channel, as ID:CHANNEL (e.g. 2:sms). Repeatable.
        #[arg(long, value_parser = parse_toggle)]
        toggle: Vec<(String, Channel)>,
        /// Set a preference, as ID=VALUE (e.g. 1=45). The value is read
        /// according to the preference's input kind. Repeatable.
        #[arg(long, value_parser = parse_assignment)]
        set: Vec<(String, String)>,
        /// Simulate saving the settings.
        #[arg(long)]
        save: bool,
    },

    /// Water usage report and performance metrics.
    Reports {
        /// Simulate a report download in the given format.
        #[arg(long)]
        download: Option<ExportFormat>,
    },

    /// Select a role and navigate to its dashboard.
    Navigate { role: String },

    /// Send the contact form.
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        subject: String,
        #[arg(long)]
        message: String,
    },

    /// Subscribe an email address to updates.
    Subscribe { email: String },

    /// Request early access from the landing page call to action.
    CallToAction { email: String },

    /// Raise a support request from the support screen.
    SupportContact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        subject: String,
        #[arg(long)]
        message: String,
    },

    /// Check whether a path is reachable for a session.
    CheckRoute {
        path: String,
        /// Check as an unauthenticated session.
        #[arg(long)]
        anonymous: bool,
    },
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > POSITRON_CONFIG env var > ~/.positron/config.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("POSITRON_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Resolve the seed file.
    ///
    /// Priority: --seed-file flag > config file value. `None` means built-in fixtures.
    pub fn resolve_seed_file(&self, config_seed: Option<&str>) -> Option<PathBuf> {
        self.seed_file
            .clone()
            .or_else(|| config_seed.map(PathBuf::from))
    }

    /// Resolve the log level: --log-level flag > config file value.
    pub fn resolve_log_level(&self, config_level: &str) -> String {
        self.log_level
            .clone()
            .unwrap_or_else(|| config_level.to_string())
    }
}

/// Default config file path for the current platform.
fn default_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".positron").join("config.toml");
    }
    #[cfg(not(target_os = "windows"))]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".positron").join("config.toml");
    }
    PathBuf::from("config.toml")
}

fn parse_toggle(s: &str) -> Result<(String, Channel), String> {
    let (id, channel) = s
        .split_once(':')
        .ok_or_else(|| format!("expected ID:CHANNEL, got {}", s))?;
    Ok((id.to_string(), channel.parse()?))
}

fn parse_assignment(s: &str) -> Result<(String, String), String> {
    let (id, raw) = s
        .split_once('=')
        .ok_or_else(|| format!("expected ID=VALUE, got {}", s))?;
    Ok((id.to_string(), raw.to_string()))
}
