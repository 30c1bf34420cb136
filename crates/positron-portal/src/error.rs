//! Error types for submissions, forms and navigation.

use crate::submission::SubmissionKind;

/// Errors from a submission control.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    #[error("A {0} submission is already in flight")]
    InFlight(SubmissionKind),
    #[error("The {0} control is no longer attached")]
    Detached(SubmissionKind),
    #[error("Submission failed: {0}")]
    Failed(String),
    #[error("Invalid form: {0}")]
    Form(#[from] FormError),
}

/// Form validation failures, raised before any submission starts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),
}

/// Navigation failures. None of them is fatal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavigationError {
    #[error("Unknown role: {0}")]
    UnknownRole(String),
    #[error(transparent)]
    Submission(#[from] SubmissionError),
}
