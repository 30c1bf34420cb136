//! Role selection and the role-to-dashboard routing contract.

use std::fmt;
use std::str::FromStr;

use positron_core::events::{DomainEvent, EventBus};
use positron_core::types::Timestamp;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::NavigationError;
use crate::submission::{SubmissionControl, SubmitStatus, Submitter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Farmer,
    Admin,
    Expert,
    Support,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Farmer, Role::Admin, Role::Expert, Role::Support];

    pub fn id(&self) -> &'static str {
        match self {
            Role::Farmer => "farmer",
            Role::Admin => "admin",
            Role::Expert => "expert",
            Role::Support => "support",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Role::Farmer => "Farmer",
            Role::Admin => "Administrator",
            Role::Expert => "Agricultural Expert",
            Role::Support => "Support Staff",
        }
    }

    pub fn dashboard_path(&self) -> &'static str {
        match self {
            Role::Farmer => "/dashboard",
            Role::Admin => "/admin-dashboard",
            Role::Expert => "/expert-dashboard",
            Role::Support => "/support-dashboard",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Role {
    type Err = NavigationError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|r| r.id() == s)
            .ok_or_else(|| NavigationError::UnknownRole(s.to_string()))
    }
}

/// Tracks the current location and resolves roles to dashboard paths.
#[derive(Debug, Default)]
pub struct Navigator {
    current: Option<&'static str>,
    unknown_roles: Vec<String>,
    events: Option<EventBus>,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_events(mut self, bus: EventBus) -> Self {
        self.events = Some(bus);
        self
    }

    /// Route to the dashboard of `role_id`.
    ///
    /// An unknown role is logged and recorded; the current path is left as it
    /// was and [`NavigationError::UnknownRole`] is returned.
    pub fn navigate(&mut self, role_id: &str) -> Result<&'static str, NavigationError> {
        match role_id.parse::<Role>() {
            Ok(role) => {
                let path = role.dashboard_path();
                self.current = Some(path);
                info!(role = %role, path, "Navigating to dashboard");
                self.publish(DomainEvent::NavigationResolved {
                    role: role.to_string(),
                    path: path.to_string(),
                    timestamp: Timestamp::now(),
                });
                Ok(path)
            }
            Err(err) => {
                warn!(role_id, "Unknown role selected");
                self.unknown_roles.push(role_id.to_string());
                self.publish(DomainEvent::UnknownRole {
                    role_id: role_id.to_string(),
                    timestamp: Timestamp::now(),
                });
                Err(err)
            }
        }
    }

    pub fn current_path(&self) -> Option<&'static str> {
        self.current
    }

    /// Role ids that failed to resolve, oldest first.
    pub fn unknown_roles(&self) -> &[String] {
        &self.unknown_roles
    }

    fn publish(&self, event: DomainEvent) {
        if let Some(bus) = &self.events {
            bus.publish(event);
        }
    }
}

/// State of the role-selection screen.
#[derive(Debug, Clone, Default)]
pub struct RoleSelection {
    selected: Option<String>,
}

impl RoleSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, role_id: impl Into<String>) {
        self.selected = Some(role_id.into());
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Submit the selection through `control`, then navigate.
    ///
    /// Returns `Ok(None)` without submitting when nothing is selected, and
    /// without navigating when the control was detached before the
    /// submission settled.
    pub async fn continue_with<S>(
        &self,
        control: &SubmissionControl<S>,
        navigator: &mut Navigator,
    ) -> Result<Option<&'static str>, NavigationError>
    where
        S: Submitter<Request = String>,
    {
        let Some(role_id) = self.selected.clone() else {
            return Ok(None);
        };

        let status = control.submit(role_id.clone())?.wait().await;
        if control.is_detached() {
            return Ok(None);
        }
        match status {
            SubmitStatus::Succeeded => navigator.navigate(&role_id).map(Some),
            SubmitStatus::Failed(reason) => {
                warn!(role_id = %role_id, reason = %reason, "Role selection failed");
                Ok(None)
            }
            SubmitStatus::Idle => Ok(None),
        }
    }
}
