//! Route guarding for the dashboard.
//!
//! Whether a session is authenticated is answered by an injected
//! [`SessionProvider`]. The guard only decides which paths need one.

use positron_core::config::AccessConfig;
use positron_core::events::{DomainEvent, EventBus};
use positron_core::types::Timestamp;
use serde::Serialize;
use tracing::{debug, info};

/// Source of the current session's authentication state.
pub trait SessionProvider: Send + Sync {
    fn is_authenticated(&self) -> bool;
}

/// Fixed session state, for the CLI and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticSession {
    authenticated: bool,
}

impl StaticSession {
    pub fn authenticated() -> Self {
        Self {
            authenticated: true,
        }
    }

    pub fn anonymous() -> Self {
        Self {
            authenticated: false,
        }
    }
}

impl SessionProvider for StaticSession {
    fn is_authenticated(&self) -> bool {
        self.authenticated
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessDecision {
    Allow,
    Redirect(String),
}

pub struct RouteGuard<P> {
    session: P,
    protected_prefix: String,
    login_path: String,
    events: Option<EventBus>,
}

impl<P: SessionProvider> RouteGuard<P> {
    pub fn new(session: P, config: &AccessConfig) -> Self {
        Self {
            session,
            protected_prefix: config.protected_prefix.trim_end_matches('/').to_string(),
            login_path: config.login_path.clone(),
            events: None,
        }
    }

    pub fn with_events(mut self, bus: EventBus) -> Self {
        self.events = Some(bus);
        self
    }

    /// Whether `path` is the protected prefix itself or lies below it.
    pub fn is_protected(&self, path: &str) -> bool {
        match path.strip_prefix(self.protected_prefix.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }

    pub fn check(&self, path: &str) -> AccessDecision {
        if !self.is_protected(path) || self.session.is_authenticated() {
            debug!(path, "Access allowed");
            return AccessDecision::Allow;
        }
        info!(path, redirect = %self.login_path, "Unauthenticated request redirected");
        if let Some(bus) = &self.events {
            bus.publish(DomainEvent::AccessDenied {
                path: path.to_string(),
                redirect: self.login_path.clone(),
                timestamp: Timestamp::now(),
            });
        }
        AccessDecision::Redirect(self.login_path.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    struct ToggleSession(Arc<AtomicBool>);

    impl SessionProvider for ToggleSession {
        fn is_authenticated(&self) -> bool {
            self.0.load(Ordering::SeqCst)
        }
    }

    fn guard(session: StaticSession) -> RouteGuard<StaticSession> {
        RouteGuard::new(session, &AccessConfig::default())
    }

    #[test]
    fn test_protected_paths() {
        let g = guard(StaticSession::anonymous());
        assert!(g.is_protected("/dashboard"));
        assert!(g.is_protected("/dashboard/"));
        assert!(g.is_protected("/dashboard/alerts"));
        assert!(!g.is_protected("/dashboards"));
        assert!(!g.is_protected("/admin-dashboard"));
        assert!(!g.is_protected("/role-selection"));
        assert!(!g.is_protected("/"));
    }

    #[test]
    fn test_anonymous_redirected_from_dashboard() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();
        let g = guard(StaticSession::anonymous()).with_events(bus);

        assert_eq!(
            g.check("/dashboard/settings"),
            AccessDecision::Redirect("/role-selection".to_string())
        );
        assert_eq!(g.check("/"), AccessDecision::Allow);
        match rx.try_recv().unwrap() {
            DomainEvent::AccessDenied { path, redirect, .. } => {
                assert_eq!(path, "/dashboard/settings");
                assert_eq!(redirect, "/role-selection");
            }
            other => panic!("unexpected event: {:?}", other),
        }
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_authenticated_allowed() {
        let g = guard(StaticSession::authenticated());
        assert_eq!(g.check("/dashboard"), AccessDecision::Allow);
        assert_eq!(g.check("/dashboard/reports"), AccessDecision::Allow);
    }

    #[test]
    fn test_session_consulted_per_request() {
        let flag = Arc::new(AtomicBool::new(false));
        let g = RouteGuard::new(ToggleSession(Arc::clone(&flag)), &AccessConfig::default());
        assert!(matches!(g.check("/dashboard"), AccessDecision::Redirect(_)));
        flag.store(true, Ordering::SeqCst);
        assert_eq!(g.check("/dashboard"), AccessDecision::Allow);
    }

    #[test]
    fn test_custom_prefix_and_login() {
        let config = AccessConfig {
            protected_prefix: "/app/".to_string(),
            login_path: "/login".to_string(),
        };
        let g = RouteGuard::new(StaticSession::anonymous(), &config);
        assert_eq!(g.check("/app/zones"), AccessDecision::Redirect("/login".to_string()));
        assert_eq!(g.check("/dashboard"), AccessDecision::Allow);
    }
}
