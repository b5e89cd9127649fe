//! In-memory snapshot of the workspace.
//!
//! The engine never talks to storage from its computations. The
//! workspace refreshes a `Snapshot` from the store collaborators and
//! every derived computation (blocking, hierarchy, bucketing, overdue,
//! filtering) reads from that snapshot and writes nothing back.

use std::collections::BTreeMap;

use crate::core::event::{Event, EventId};
use crate::core::task::{Task, TaskId};

/// Immutable view of every task and event currently known.
///
/// Backed by BTreeMaps so iteration order is deterministic, which the
/// bucketing engine relies on for reproducible output.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub tasks: BTreeMap<TaskId, Task>,
    pub events: BTreeMap<EventId, Event>,
}

impl Snapshot {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a snapshot from freshly listed store contents.
    pub fn from_lists(tasks: Vec<Task>, events: Vec<Event>) -> Self {
        Self {
            tasks: tasks.into_iter().map(|t| (t.id, t)).collect(),
            events: events.into_iter().map(|e| (e.id, e)).collect(),
        }
    }

    /// Look up a task by id.
    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.get(&id)
    }

    /// Look up an event by id.
    pub fn event(&self, id: EventId) -> Option<&Event> {
        self.events.get(&id)
    }

    /// Insert or replace a task. Used for read-your-writes merges.
    pub fn upsert_task(&mut self, task: Task) {
        self.tasks.insert(task.id, task);
    }

    /// Insert or replace an event.
    pub fn upsert_event(&mut self, event: Event) {
        self.events.insert(event.id, event);
    }

    /// Drop a task. Dependents keep their `blocked_by` reference; the
    /// resolver treats the dangling id as not blocking.
    pub fn remove_task(&mut self, id: TaskId) {
        self.tasks.remove(&id);
    }

    /// Drop an event.
    pub fn remove_event(&mut self, id: EventId) {
        self.events.remove(&id);
    }

    /// Check if nothing is loaded.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty() && self.events.is_empty()
    }
}
