//! Subtask hierarchy: parent/child grouping and progress rollup.
//!
//! A task with `parent_task_id` set is a subtask. Subtasks render
//! nested under their parent and never surface in top-level calendar
//! buckets; the bucketing engine filters them out. Progress rollup is
//! informational only and never writes back to the parent.

use crate::core::task::{Task, TaskDraft, TaskId, TaskStatus};
use crate::snapshot::Snapshot;

/// Completion rollup across a task's direct subtasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubtaskProgress {
    /// Subtasks whose status is done.
    pub done: usize,
    /// All direct subtasks.
    pub total: usize,
}

/// Direct subtasks of a parent, ordered by `(order_index, id)`.
pub fn subtasks_of(snapshot: &Snapshot, parent_id: TaskId) -> Vec<&Task> {
    let mut children: Vec<&Task> = snapshot
        .tasks
        .values()
        .filter(|task| task.parent_task_id == Some(parent_id))
        .collect();
    children.sort_by_key(|task| (task.order_index, task.id));
    children
}

/// Count completed vs total direct subtasks.
///
/// Reads only; the parent's own status is never derived from this.
pub fn subtask_progress(snapshot: &Snapshot, parent_id: TaskId) -> SubtaskProgress {
    let children = subtasks_of(snapshot, parent_id);
    SubtaskProgress {
        done: children.iter().filter(|task| task.completed()).count(),
        total: children.len(),
    }
}

/// Draft for a new subtask appended under a parent.
///
/// Inherits the parent's priority, project, and owner; starts at todo
/// with `order_index` equal to the current subtask count so it lands
/// at the end of the list.
pub fn subtask_draft(snapshot: &Snapshot, parent: &Task, title: &str) -> TaskDraft {
    let mut draft = TaskDraft::new(title, parent.owner_id);
    draft.status = TaskStatus::Todo;
    draft.priority = parent.priority;
    draft.project_id = parent.project_id;
    draft.parent_task_id = Some(parent.id);
    draft.order_index = subtasks_of(snapshot, parent.id).len() as u32;
    draft
}

/// Next free `order_index` within a `(parent, group)` scope.
///
/// The index is advisory and unique only within this scope; appending
/// at the current count keeps board columns stable.
pub fn next_order_index(
    snapshot: &Snapshot,
    parent_id: Option<TaskId>,
    group_name: Option<&str>,
) -> u32 {
    snapshot
        .tasks
        .values()
        .filter(|task| task.parent_task_id == parent_id)
        .filter(|task| task.group_name.as_deref() == group_name)
        .count() as u32
}
