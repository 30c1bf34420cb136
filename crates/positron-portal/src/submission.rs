//! Single-flight submission controls.
//!
//! A [`SubmissionControl`] stands for one button or form that hands work to an
//! asynchronous [`Submitter`]. While a submission is outstanding the control
//! is disabled; once it settles the control re-enables and records the
//! outcome as a [`SubmitStatus`] banner.
//!
//! A control can be detached (its screen went away). Completions that arrive
//! after that are dropped without touching the control.

use std::fmt;
use std::marker::PhantomData;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use positron_core::config::SubmissionConfig;
use positron_core::events::{DomainEvent, EventBus};
use positron_core::types::Timestamp;
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::error::SubmissionError;
use crate::forms::Validate;

/// The controls that submit work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionKind {
    Contact,
    CallToAction,
    Subscribe,
    SettingsSave,
    SupportContact,
    RoleContinue,
    SensorExport,
    ReportDownload,
}

impl SubmissionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionKind::Contact => "contact",
            SubmissionKind::CallToAction => "call_to_action",
            SubmissionKind::Subscribe => "subscribe",
            SubmissionKind::SettingsSave => "settings_save",
            SubmissionKind::SupportContact => "support_contact",
            SubmissionKind::RoleContinue => "role_continue",
            SubmissionKind::SensorExport => "sensor_export",
            SubmissionKind::ReportDownload => "report_download",
        }
    }

    /// Configured latency of the simulated submission for this control.
    pub fn latency(&self, config: &SubmissionConfig) -> Duration {
        let ms = match self {
            SubmissionKind::Contact => config.contact_ms,
            SubmissionKind::CallToAction => config.call_to_action_ms,
            SubmissionKind::Subscribe => config.subscribe_ms,
            SubmissionKind::SettingsSave => config.settings_save_ms,
            SubmissionKind::SupportContact => config.support_contact_ms,
            SubmissionKind::RoleContinue => config.role_continue_ms,
            SubmissionKind::SensorExport => config.sensor_export_ms,
            SubmissionKind::ReportDownload => config.report_download_ms,
        };
        Duration::from_millis(ms)
    }
}

impl fmt::Display for SubmissionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Acknowledgement returned by a successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionReceipt {
    pub message: String,
    pub completed_at: Timestamp,
}

/// Something that performs a submission.
#[async_trait]
pub trait Submitter: Send + Sync + 'static {
    type Request: Send + 'static;

    async fn submit(&self, request: Self::Request) -> Result<SubmissionReceipt, SubmissionError>;
}

/// Stand-in submitter: waits a fixed latency, then succeeds, or fails with an
/// injected reason.
#[derive(Debug, Clone)]
pub struct SimulatedSubmitter<R> {
    latency: Duration,
    failure: Option<String>,
    _request: PhantomData<fn(R)>,
}

impl<R> SimulatedSubmitter<R> {
    pub fn new(latency: Duration) -> Self {
        Self {
            latency,
            failure: None,
            _request: PhantomData,
        }
    }

    /// Submitter using the configured latency of `kind`.
    pub fn for_kind(kind: SubmissionKind, config: &SubmissionConfig) -> Self {
        Self::new(kind.latency(config))
    }

    /// Make every submission fail with `reason` after the latency.
    pub fn with_failure(mut self, reason: impl Into<String>) -> Self {
        self.failure = Some(reason.into());
        self
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }
}

#[async_trait]
impl<R> Submitter for SimulatedSubmitter<R>
where
    R: fmt::Debug + Send + 'static,
{
    type Request = R;

    async fn submit(&self, request: R) -> Result<SubmissionReceipt, SubmissionError> {
        debug!(
            ?request,
            latency_ms = self.latency.as_millis() as u64,
            "Simulating submission"
        );
        tokio::time::sleep(self.latency).await;
        match &self.failure {
            Some(reason) => Err(SubmissionError::Failed(reason.clone())),
            None => Ok(SubmissionReceipt {
                message: "Submitted".to_string(),
                completed_at: Timestamp::now(),
            }),
        }
    }
}

/// Outcome banner of a control.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitStatus {
    #[default]
    Idle,
    Succeeded,
    Failed(String),
}

#[derive(Debug, Default)]
struct ControlState {
    in_flight: Option<Uuid>,
    status: SubmitStatus,
    detached: bool,
}

/// Handle to a submission that has been started.
#[derive(Debug)]
pub struct PendingSubmission {
    id: Uuid,
    handle: JoinHandle<SubmitStatus>,
}

impl PendingSubmission {
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Wait for the submission to settle and return its outcome.
    ///
    /// The outcome is returned even when the control was detached in the
    /// meantime; the control itself is left untouched in that case.
    pub async fn wait(self) -> SubmitStatus {
        match self.handle.await {
            Ok(status) => status,
            Err(e) => SubmitStatus::Failed(format!("submission task ended: {}", e)),
        }
    }
}

/// One single-flight control.
pub struct SubmissionControl<S: Submitter> {
    kind: SubmissionKind,
    submitter: Arc<S>,
    state: Arc<Mutex<ControlState>>,
    events: Option<EventBus>,
}

impl<S: Submitter> SubmissionControl<S> {
    pub fn new(kind: SubmissionKind, submitter: S) -> Self {
        Self {
            kind,
            submitter: Arc::new(submitter),
            state: Arc::new(Mutex::new(ControlState::default())),
            events: None,
        }
    }

    /// Publish submission lifecycle events on `bus`.
    pub fn with_events(mut self, bus: EventBus) -> Self {
        self.events = Some(bus);
        self
    }

    pub fn kind(&self) -> SubmissionKind {
        self.kind
    }

    /// Whether the control accepts a new submission.
    pub fn is_enabled(&self) -> bool {
        let state = self.state.lock().unwrap();
        !state.detached && state.in_flight.is_none()
    }

    pub fn is_detached(&self) -> bool {
        self.state.lock().unwrap().detached
    }

    pub fn status(&self) -> SubmitStatus {
        self.state.lock().unwrap().status.clone()
    }

    /// Start a submission.
    ///
    /// The control is disabled before this returns. The work runs on the tokio
    /// runtime; await the returned handle to observe the outcome. Must be
    /// called from within a runtime.
    pub fn submit(&self, request: S::Request) -> Result<PendingSubmission, SubmissionError> {
        let id = Uuid::new_v4();
        {
            let mut state = self.state.lock().unwrap();
            if state.detached {
                return Err(SubmissionError::Detached(self.kind));
            }
            if state.in_flight.is_some() {
                debug!(kind = %self.kind, "Submission rejected: already in flight");
                return Err(SubmissionError::InFlight(self.kind));
            }
            state.in_flight = Some(id);
            state.status = SubmitStatus::Idle;
        }

        debug!(kind = %self.kind, submission_id = %id, "Submission started");
        self.publish(DomainEvent::SubmissionStarted {
            submission_id: id,
            kind: self.kind.to_string(),
            timestamp: Timestamp::now(),
        });

        let kind = self.kind;
        let submitter = Arc::clone(&self.submitter);
        let state = Arc::clone(&self.state);
        let events = self.events.clone();
        let handle = tokio::spawn(async move {
            // The submitter runs in its own task so a panic still settles the control.
            let work = tokio::spawn(async move { submitter.submit(request).await });
            let result = match work.await {
                Ok(result) => result,
                Err(e) => {
                    error!(kind = %kind, submission_id = %id, error = %e, "Submitter aborted");
                    Err(SubmissionError::Failed(format!("submitter aborted: {}", e)))
                }
            };
            complete(&state, events.as_ref(), kind, id, result)
        });

        Ok(PendingSubmission { id, handle })
    }

    /// Validate `request`, then start it. Invalid input never disables the control.
    pub fn submit_validated(&self, request: S::Request) -> Result<PendingSubmission, SubmissionError>
    where
        S::Request: Validate,
    {
        request.validate()?;
        self.submit(request)
    }

    /// Detach the control. Later completions are discarded and new
    /// submissions are refused.
    pub fn detach(&self) {
        let mut state = self.state.lock().unwrap();
        if !state.detached {
            state.detached = true;
            debug!(kind = %self.kind, in_flight = state.in_flight.is_some(), "Control detached");
        }
    }

    fn publish(&self, event: DomainEvent) {
        if let Some(bus) = &self.events {
            bus.publish(event);
        }
    }
}

fn complete(
    state: &Mutex<ControlState>,
    events: Option<&EventBus>,
    kind: SubmissionKind,
    id: Uuid,
    result: Result<SubmissionReceipt, SubmissionError>,
) -> SubmitStatus {
    let status = match result {
        Ok(_) => SubmitStatus::Succeeded,
        Err(SubmissionError::Failed(reason)) => SubmitStatus::Failed(reason),
        Err(e) => SubmitStatus::Failed(e.to_string()),
    };

    let detached = {
        let mut state = state.lock().unwrap();
        if !state.detached {
            state.in_flight = None;
            state.status = status.clone();
        }
        state.detached
    };

    let timestamp = Timestamp::now();
    let event = if detached {
        debug!(kind = %kind, submission_id = %id, "Submission settled after detach; discarded");
        DomainEvent::SubmissionDiscarded {
            submission_id: id,
            kind: kind.to_string(),
            timestamp,
        }
    } else {
        match &status {
            SubmitStatus::Failed(reason) => {
                warn!(kind = %kind, submission_id = %id, reason = %reason, "Submission failed");
                DomainEvent::SubmissionFailed {
                    submission_id: id,
                    kind: kind.to_string(),
                    reason: reason.clone(),
                    timestamp,
                }
            }
            _ => {
                info!(kind = %kind, submission_id = %id, "Submission succeeded");
                DomainEvent::SubmissionSucceeded {
                    submission_id: id,
                    kind: kind.to_string(),
                    timestamp,
                }
            }
        }
    };
    if let Some(bus) = events {
        bus.publish(event);
    }
    status
}
