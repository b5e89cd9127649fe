pub mod config;
pub mod core;
pub mod error;
pub mod snapshot;
pub mod store;

// Calendar projection and the per-user session over it
pub mod calendar;
pub mod workspace;

pub use crate::core::{Task, TaskId, TaskStatus};
pub use error::{Error, Result};
pub use snapshot::Snapshot;
pub use workspace::{SyncHandle, Workspace};
