use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::types::Timestamp;

/// Domain events emitted by the portal layer.
///
/// The dashboard's list state is side-effect free; events only come from the
/// parts of the system that stand in for outside collaborators (submissions,
/// navigation, route guarding).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[non_exhaustive]
pub enum DomainEvent {
    // =========================================================================
    // Submission Events
    // =========================================================================
    /// A control accepted a submission and disabled itself.
    SubmissionStarted {
        submission_id: Uuid,
        kind: String,
        timestamp: Timestamp,
    },

    /// A submission finished successfully.
    SubmissionSucceeded {
        submission_id: Uuid,
        kind: String,
        timestamp: Timestamp,
    },

    /// A submission finished with a failure.
    SubmissionFailed {
        submission_id: Uuid,
        kind: String,
        reason: String,
        timestamp: Timestamp,
    },

    /// A submission finished after its control was detached. Nothing was updated.
    SubmissionDiscarded {
        submission_id: Uuid,
        kind: String,
        timestamp: Timestamp,
    },

    // =========================================================================
    // Navigation Events
    // =========================================================================
    /// A role was resolved to its dashboard path.
    NavigationResolved {
        role: String,
        path: String,
        timestamp: Timestamp,
    },

    /// Navigation was requested for a role id that does not exist.
    UnknownRole {
        role_id: String,
        timestamp: Timestamp,
    },

    /// A protected path was requested without an authenticated session.
    AccessDenied {
        path: String,
        redirect: String,
        timestamp: Timestamp,
    },
}

impl DomainEvent {
    /// Returns the timestamp of the event.
    pub fn timestamp(&self) -> Timestamp {
        match self {
            DomainEvent::SubmissionStarted { timestamp, .. }
            | DomainEvent::SubmissionSucceeded { timestamp, .. }
            | DomainEvent::SubmissionFailed { timestamp, .. }
            | DomainEvent::SubmissionDiscarded { timestamp, .. }
            | DomainEvent::NavigationResolved { timestamp, .. }
            | DomainEvent::UnknownRole { timestamp, .. }
            | DomainEvent::AccessDenied { timestamp, .. } => *timestamp,
        }
    }

    /// Returns a short event name for logging.
    pub fn event_name(&self) -> &'static str {
        match self {
            DomainEvent::SubmissionStarted { .. } => "submission_started",
            DomainEvent::SubmissionSucceeded { .. } => "submission_succeeded",
            DomainEvent::SubmissionFailed { .. } => "submission_failed",
            DomainEvent::SubmissionDiscarded { .. } => "submission_discarded",
            DomainEvent::NavigationResolved { .. } => "navigation_resolved",
            DomainEvent::UnknownRole { .. } => "unknown_role",
            DomainEvent::AccessDenied { .. } => "access_denied",
        }
    }
}

/// Fan-out channel for [`DomainEvent`]s.
///
/// Cloning the bus shares the underlying channel. Publishing with no
/// subscribers is not an error.
#[derive(Clone, Debug)]
pub struct EventBus {
    tx: broadcast::Sender<DomainEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Publish an event, returning how many subscribers received it.
    pub fn publish(&self, event: DomainEvent) -> usize {
        tracing::trace!(event = event.event_name(), "Publishing domain event");
        self.tx.send(event).unwrap_or(0)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.tx.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_timestamp_and_name() {
        let ts = Timestamp(1_708_425_000);
        let event = DomainEvent::UnknownRole {
            role_id: "pilot".to_string(),
            timestamp: ts,
        };
        assert_eq!(event.timestamp(), ts);
        assert_eq!(event.event_name(), "unknown_role");

        let event = DomainEvent::SubmissionFailed {
            submission_id: Uuid::new_v4(),
            kind: "contact".to_string(),
            reason: "offline".to_string(),
            timestamp: ts,
        };
        assert_eq!(event.event_name(), "submission_failed");
    }

    #[test]
    fn test_event_serialization() {
        let event = DomainEvent::NavigationResolved {
            role: "admin".to_string(),
            path: "/admin-dashboard".to_string(),
            timestamp: Timestamp(0),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("NavigationResolved"));
        assert!(json.contains("/admin-dashboard"));
        let back: DomainEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back.event_name(), "navigation_resolved");
    }

    #[test]
    fn test_publish_without_subscribers() {
        let bus = EventBus::default();
        let delivered = bus.publish(DomainEvent::AccessDenied {
            path: "/dashboard".to_string(),
            redirect: "/role-selection".to_string(),
            timestamp: Timestamp::now(),
        });
        assert_eq!(delivered, 0);
    }

    #[tokio::test]
    async fn test_subscribers_receive_published_events() {
        let bus = EventBus::new(8);
        let mut rx = bus.subscribe();
        let delivered = bus.publish(DomainEvent::UnknownRole {
            role_id: "pilot".to_string(),
            timestamp: Timestamp::now(),
        });
        assert_eq!(delivered, 1);

        let event = rx.recv().await.unwrap();
        assert!(matches!(event, DomainEvent::UnknownRole { ref role_id, .. } if role_id == "pilot"));
    }
}
