//! Core domain models for the scheduling engine.
//!
//! This module contains the task and event records plus the pure
//! computations derived from them: lifecycle transitions, blocking
//! resolution, and the subtask hierarchy.

pub mod deps;
pub mod event;
pub mod lifecycle;
pub mod subtasks;
pub mod task;

pub use event::{ContentStatus, Event, EventDraft, EventId, EventPatch, EventSource, EventType};
pub use subtasks::SubtaskProgress;
pub use task::{
    ClientId, MemberId, Priority, ProjectId, Task, TaskDraft, TaskId, TaskPatch, TaskStatus,
};
