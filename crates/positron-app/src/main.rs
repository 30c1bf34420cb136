//! Positron application binary - composition root.
//!
//! 1. Parse arguments and load configuration from TOML
//! 2. Initialize logging
//! 3. Build the dashboard from the configured seed provider
//! 4. Run one screen command and print the resulting state as JSON

mod cli;

use std::fmt::Debug;

use clap::Parser;
use serde::Serialize;
use serde_json::json;

use positron_core::config::PositronConfig;
use positron_core::events::EventBus;
use positron_dashboard::{
    Dashboard, FixtureSeeds, JsonSeedFile, ListState, Record, SeedProvider, SensorFilter,
};
use positron_portal::{
    ContactForm, ExportRequest, Navigator, RoleSelection, RouteGuard, SimulatedSubmitter,
    StaticSession, SubmissionControl, SubmissionKind, Subscription, SupportRequest, Validate,
};

use crate::cli::{CliArgs, Command};

type AppResult<T> = Result<T, Box<dyn std::error::Error>>;

fn print_json<T: Serialize>(value: &T) -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Records of the current filtered view.
fn view_of<T: Record + Serialize, F: positron_dashboard::Filter<T>>(
    list: &ListState<T, F>,
) -> Vec<&T> {
    list.view().collect()
}

/// Run one simulated submission to completion and report its outcome.
async fn run_submission<R>(
    kind: SubmissionKind,
    request: R,
    config: &PositronConfig,
    bus: &EventBus,
) -> AppResult<()>
where
    R: Validate + Debug + Send + 'static,
{
    let control = SubmissionControl::new(
        kind,
        SimulatedSubmitter::<R>::for_kind(kind, &config.submission),
    )
    .with_events(bus.clone());
    let status = control.submit_validated(request)?.wait().await;
    print_json(&json!({ "kind": kind, "status": status }))
}

fn load_dashboard(args: &CliArgs, config: &PositronConfig) -> AppResult<Dashboard> {
    let seed_file = args.resolve_seed_file(config.general.seed_file.as_deref());
    let provider: Box<dyn SeedProvider> = match seed_file {
        Some(path) => Box::new(JsonSeedFile::new(path)),
        None => Box::new(FixtureSeeds),
    };
    Ok(Dashboard::from_seeds(provider.as_ref())?)
}

async fn run(
    args: CliArgs,
    config: PositronConfig,
    config_file: std::path::PathBuf,
    bus: &EventBus,
) -> AppResult<()> {
    // Commands that do not need the dashboard.
    match &args.command {
        Command::InitConfig => {
            config.save(&config_file)?;
            return print_json(&json!({ "config": config_file.display().to_string() }));
        }
        Command::Navigate { role } => {
            let control = SubmissionControl::new(
                SubmissionKind::RoleContinue,
                SimulatedSubmitter::<String>::for_kind(SubmissionKind::RoleContinue, &config.submission),
            )
            .with_events(bus.clone());
            let mut navigator = Navigator::new().with_events(bus.clone());
            let mut selection = RoleSelection::new();
            selection.select(role.clone());
            return match selection.continue_with(&control, &mut navigator).await {
                Ok(path) => print_json(&json!({ "role": role, "path": path })),
                Err(e) => {
                    // Unknown roles are not fatal.
                    tracing::warn!(error = %e, "Navigation skipped");
                    print_json(&json!({ "role": role, "path": null, "error": e.to_string() }))
                }
            };
        }
        Command::Contact {
            name,
            email,
            subject,
            message,
        } => {
            let form = ContactForm {
                name: name.clone(),
                email: email.clone(),
                subject: subject.clone(),
                message: message.clone(),
            };
            return run_submission(SubmissionKind::Contact, form, &config, bus).await;
        }
        Command::Subscribe { email } => {
            let sub = Subscription {
                email: email.clone(),
            };
            return run_submission(SubmissionKind::Subscribe, sub, &config, bus).await;
        }
        Command::CallToAction { email } => {
            let sub = Subscription {
                email: email.clone(),
            };
            return run_submission(SubmissionKind::CallToAction, sub, &config, bus).await;
        }
        Command::SupportContact {
            name,
            email,
            subject,
            message,
        } => {
            let request = SupportRequest {
                name: name.clone(),
                email: email.clone(),
                subject: subject.clone(),
                message: message.clone(),
            };
            return run_submission(SubmissionKind::SupportContact, request, &config, bus).await;
        }
        Command::CheckRoute { path, anonymous } => {
            let session = if *anonymous {
                StaticSession::anonymous()
            } else {
                StaticSession::authenticated()
            };
            let guard = RouteGuard::new(session, &config.access).with_events(bus.clone());
            return print_json(&json!({ "path": path, "decision": guard.check(path) }));
        }
        _ => {}
    }

    let mut dashboard = load_dashboard(&args, &config)?;

    match args.command {
        Command::Alerts {
            filter,
            mark_read,
            mark_all_read,
        } => {
            let alerts = &mut dashboard.alerts;
            alerts.set_filter_named(&filter)?;
            for id in &mark_read {
                alerts.mark_read(id)?;
            }
            if mark_all_read {
                alerts.mark_all_read();
            }
            print_json(&json!({ "stats": alerts.stats(), "alerts": view_of(alerts) }))
        }
        Command::Recommendations { filter, implement } => {
            let recs = &mut dashboard.recommendations;
            recs.set_filter_named(&filter)?;
            for id in &implement {
                recs.implement(id)?;
            }
            print_json(&json!({ "stats": recs.stats(), "recommendations": view_of(recs) }))
        }
        Command::Zones {
            filter,
            start,
            stop,
        } => {
            let zones = &mut dashboard.zones;
            zones.set_filter_named(&filter)?;
            for id in &start {
                zones.start_irrigation(id)?;
            }
            for id in &stop {
                zones.stop_irrigation(id)?;
            }
            print_json(&json!({ "stats": zones.stats(), "zones": view_of(zones) }))
        }
        Command::Sensors { zone, kind, export } => {
            let sensors = &mut dashboard.sensors;
            sensors.set_filter(SensorFilter::from_selectors(&zone, &kind)?);
            print_json(&json!({ "stats": sensors.stats(), "readings": view_of(sensors) }))?;
            if let Some(format) = export {
                run_submission(SubmissionKind::SensorExport, ExportRequest { format }, &config, bus)
                    .await?;
            }
            Ok(())
        }
        Command::Support { query, category } => {
            let articles = &mut dashboard.articles;
            articles.search(&query);
            articles.select_category(category);
            print_json(&json!({ "articles": view_of(articles) }))
        }
        Command::Settings { toggle, set, save } => {
            for (id, channel) in &toggle {
                dashboard.notifications.toggle_channel(id, *channel)?;
            }
            for (id, raw) in &set {
                dashboard.preferences.set_preference_from_input(id, raw)?;
            }
            print_json(&json!({
                "notifications": view_of(&dashboard.notifications),
                "preferences": view_of(&dashboard.preferences),
            }))?;
            if save {
                let control = SubmissionControl::new(
                    SubmissionKind::SettingsSave,
                    SimulatedSubmitter::<()>::for_kind(SubmissionKind::SettingsSave, &config.submission),
                )
                .with_events(bus.clone());
                let status = control.submit(())?.wait().await;
                print_json(&json!({ "kind": SubmissionKind::SettingsSave, "status": status }))?;
            }
            Ok(())
        }
        Command::Reports { download } => {
            let reports = &dashboard.reports;
            print_json(&json!({
                "summary": reports.summary(),
                "water_usage": reports.water_usage,
                "metrics": reports.metrics,
            }))?;
            if let Some(format) = download {
                run_submission(SubmissionKind::ReportDownload, ExportRequest { format }, &config, bus)
                    .await?;
            }
            Ok(())
        }
        Command::InitConfig
        | Command::Navigate { .. }
        | Command::Contact { .. }
        | Command::Subscribe { .. }
        | Command::CallToAction { .. }
        | Command::SupportContact { .. }
        | Command::CheckRoute { .. } => Ok(()),
    }
}

#[tokio::main]
async fn main() -> AppResult<()> {
    let args = CliArgs::parse();

    // Config.
    let config_file = args.resolve_config_path();
    let config = PositronConfig::load_or_default(&config_file);

    // Tracing. RUST_LOG wins over the flag and the config file.
    let level = args.resolve_log_level(&config.general.log_level);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&level)),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting Positron v{}", env!("CARGO_PKG_VERSION"));
    tracing::debug!(path = %config_file.display(), "Configuration resolved");

    let bus = EventBus::default();
    let mut events = bus.subscribe();

    let result = run(args, config, config_file, &bus).await;

    while let Ok(event) = events.try_recv() {
        tracing::debug!(event = event.event_name(), timestamp = event.timestamp().0, "Domain event");
    }
    result
}
