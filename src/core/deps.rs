//! Dependency resolution over the blocking forest.
//!
//! Each task carries at most one `blocked_by` predecessor, so the
//! relation is a forest keyed by id rather than a general graph. All
//! lookups here are pure reads over a snapshot and exist for display
//! and warnings only. They never gate a mutation: a blocked task can
//! still be completed, rescheduled, or deleted, and deleting a
//! predecessor simply leaves a dangling reference behind.

use crate::core::task::{Task, TaskId};
use crate::snapshot::Snapshot;

/// Check if a task is blocked by an open predecessor.
///
/// True iff `blocked_by` is set, the referenced task still exists, and
/// that task is not completed. A dangling reference resolves to not
/// blocked so stale snapshots render instead of erroring.
pub fn is_blocked(snapshot: &Snapshot, task: &Task) -> bool {
    match task.blocked_by {
        Some(blocker_id) => snapshot
            .task(blocker_id)
            .map(|blocker| !blocker.completed())
            .unwrap_or(false),
        None => false,
    }
}

/// Look up the predecessor task, if it exists.
pub fn blocker<'a>(snapshot: &'a Snapshot, task: &Task) -> Option<&'a Task> {
    task.blocked_by.and_then(|id| snapshot.task(id))
}

/// All tasks whose `blocked_by` points at the given task.
///
/// Ascending by id, so repeated calls over the same snapshot return
/// the same order.
pub fn dependents(snapshot: &Snapshot, id: TaskId) -> Vec<&Task> {
    snapshot
        .tasks
        .values()
        .filter(|task| task.blocked_by == Some(id))
        .collect()
}

/// Check if pointing `task`'s `blocked_by` at `candidate` would close a
/// cycle through the predecessor chain.
///
/// Opt-in guard for write paths that want it; the engine itself never
/// calls this and stores whatever edge the caller asks for, including
/// self-references. The walk is bounded by the task count so a chain
/// that already contains a cycle terminates.
pub fn would_create_cycle(snapshot: &Snapshot, task: TaskId, candidate: TaskId) -> bool {
    if task == candidate {
        return true;
    }

    let mut current = Some(candidate);
    let mut remaining = snapshot.tasks.len();
    while let Some(id) = current {
        if id == task {
            return true;
        }
        if remaining == 0 {
            // Chain longer than the task count means it already loops
            // somewhere that does not involve `task`.
            return false;
        }
        remaining -= 1;
        current = snapshot.task(id).and_then(|t| t.blocked_by);
    }
    false
}
