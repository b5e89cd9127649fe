//! Task lifecycle transitions.
//!
//! The status graph is `todo -> in-progress -> done`, with `cancelled`
//! reachable from any non-terminal state and `todo` reachable from
//! `done` (reopening). Completion is derived from status, so every
//! operation here keeps the two in lockstep by construction.
//!
//! Blocking is advisory: nothing in this module, and nothing anywhere
//! in the engine, rejects a transition because a predecessor is still
//! open. [`can_transition`] describes the canonical graph for callers
//! that want to gray out actions; [`set_status`] accepts any target.

use super::task::{Task, TaskStatus};

/// Return a copy of the task with its status replaced.
///
/// Accepts any target status. The engine persists through a
/// last-write-wins store and blocking is advisory, so there is no
/// rejection path; callers wanting to respect the canonical graph
/// check [`can_transition`] first.
pub fn set_status(task: &Task, status: TaskStatus) -> Task {
    let mut updated = task.clone();
    updated.status = status;
    updated
}

/// Flip a task between done and todo.
///
/// Done reopens to todo; every other status completes to done. This is
/// the checkbox operation; it never manipulates completion separately
/// from status.
pub fn toggle_complete(task: &Task) -> Task {
    let next = match task.status {
        TaskStatus::Done => TaskStatus::Todo,
        _ => TaskStatus::Done,
    };
    set_status(task, next)
}

/// Check if a transition follows the canonical status graph.
///
/// Valid edges:
/// - todo -> in-progress
/// - in-progress -> done
/// - todo -> done (checking off directly)
/// - done -> todo (reopening)
/// - any non-terminal -> cancelled
///
/// Advisory only. Presentation layers use this to decide what to
/// offer; [`set_status`] does not consult it.
pub fn can_transition(from: TaskStatus, to: TaskStatus) -> bool {
    matches!(
        (from, to),
        (TaskStatus::Todo, TaskStatus::InProgress)
            | (TaskStatus::InProgress, TaskStatus::Done)
            | (TaskStatus::Todo, TaskStatus::Done)
            | (TaskStatus::Done, TaskStatus::Todo)
            | (TaskStatus::Todo, TaskStatus::Cancelled)
            | (TaskStatus::InProgress, TaskStatus::Cancelled)
    )
}
