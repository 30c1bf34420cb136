//! Error types for the dashboard state layer.

use positron_core::error::PositronError;

/// Errors from [`ListState`](crate::list_state::ListState) operations.
#[derive(Debug, thiserror::Error)]
pub enum ListError {
    #[error("Record not found in {collection}: {id}")]
    RecordNotFound { collection: &'static str, id: String },
    #[error("Invalid filter for {collection}: {name}")]
    InvalidFilter { collection: &'static str, name: String },
    #[error("Duplicate id in {collection} seed: {id}")]
    DuplicateId { collection: &'static str, id: String },
}

/// Errors from screen-level operations and dashboard assembly.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error(transparent)]
    List(#[from] ListError),
    #[error("Invalid schedule for zone {zone}: {reason}")]
    InvalidSchedule { zone: String, reason: String },
    #[error("Invalid value for preference {preference}: {reason}")]
    InvalidPreference { preference: String, reason: String },
    #[error("Seed error: {0}")]
    Seed(#[from] PositronError),
}
