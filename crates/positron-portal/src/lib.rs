//! Positron Portal crate - submissions, forms, role navigation and route guarding.
//!
//! Provides:
//! - Single-flight submission controls over an async submitter
//! - Validated contact, subscription, support and export payloads
//! - The role-to-dashboard routing contract
//! - A session-backed guard for dashboard paths

pub mod access;
pub mod error;
pub mod forms;
pub mod navigation;
pub mod submission;

pub use access::{AccessDecision, RouteGuard, SessionProvider, StaticSession};
pub use error::{FormError, NavigationError, SubmissionError};
pub use forms::{ContactForm, ExportFormat, ExportRequest, Subscription, SupportRequest, Validate};
pub use navigation::{Navigator, Role, RoleSelection};
pub use submission::{
    PendingSubmission, SimulatedSubmitter, SubmissionControl, SubmissionKind, SubmissionReceipt,
    SubmitStatus, Submitter,
};
