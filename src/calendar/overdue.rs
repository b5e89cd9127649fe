//! Overdue detection for the rollover rule.
//!
//! Incomplete tasks whose scheduled date has passed keep following the
//! user: the bucketing engine merges them into today's bucket on top
//! of whatever is dated today. Done tasks never roll over, and
//! cancelled tasks are abandoned rather than late.

use chrono::NaiveDate;

use crate::core::task::{Task, TaskStatus};

/// Check if a task is overdue as of `today`.
///
/// Requires an actual schedule: tasks without a `start_date` are
/// never overdue.
pub fn is_overdue(task: &Task, today: NaiveDate) -> bool {
    if task.completed() || task.status == TaskStatus::Cancelled {
        return false;
    }
    match task.start_date {
        Some(start) => start < today,
        None => false,
    }
}

/// Whole days a task is late. Zero for unscheduled tasks and for
/// anything dated today or later.
pub fn overdue_days(task: &Task, today: NaiveDate) -> i64 {
    task.start_date
        .map(|start| (today - start).num_days().max(0))
        .unwrap_or(0)
}
