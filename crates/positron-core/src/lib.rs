pub mod config;
pub mod error;
pub mod events;
pub mod types;

pub use config::PositronConfig;
pub use error::{PositronError, Result};
pub use events::{DomainEvent, EventBus};
pub use types::*;
