//! Drag sessions for rescheduling tasks on the grid.
//!
//! The engine half of drag-and-drop: the presentation layer reports
//! where a drag started, what cell the pointer is over, and where it
//! was released. Releasing over a cell yields a [`MovePlan`] for the
//! workspace to persist; releasing anywhere else clears the session
//! and yields nothing, so no store call is made.

use chrono::NaiveDate;

use crate::calendar::clock::hour_label;
use crate::core::task::TaskId;

/// A cell a drag can be released over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    /// An hour cell in the day or week grid.
    HourCell { date: NaiveDate, hour: u32 },
    /// The unscheduled row of a date column.
    UnscheduledRow { date: NaiveDate },
}

/// The mutation a completed drag asks for: new date, new time, and
/// nothing else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovePlan {
    pub task_id: TaskId,
    pub start_date: NaiveDate,
    /// Canonical `"HH:00"` for hour cells; None clears the time.
    pub start_time: Option<String>,
}

impl MovePlan {
    /// Resolve a drop target into the fields to write.
    ///
    /// Hour cells write the canonical zero-padded hour string; finer
    /// precision is not representable through dragging.
    pub fn for_target(task_id: TaskId, target: DropTarget) -> Self {
        match target {
            DropTarget::HourCell { date, hour } => Self {
                task_id,
                start_date: date,
                start_time: Some(hour_label(hour)),
            },
            DropTarget::UnscheduledRow { date } => Self {
                task_id,
                start_date: date,
                start_time: None,
            },
        }
    }
}

/// Transient state for one drag gesture.
///
/// At most one task drags at a time; starting a new drag replaces any
/// forgotten previous one.
#[derive(Debug, Clone, Default)]
pub struct DragState {
    active: Option<DragSession>,
}

#[derive(Debug, Clone)]
struct DragSession {
    task_id: TaskId,
    hover: Option<DropTarget>,
}

impl DragState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start dragging a task.
    pub fn begin(&mut self, task_id: TaskId) {
        self.active = Some(DragSession {
            task_id,
            hover: None,
        });
    }

    /// The task currently being dragged, if any.
    pub fn dragging(&self) -> Option<TaskId> {
        self.active.as_ref().map(|session| session.task_id)
    }

    /// Record the cell currently under the pointer, for highlighting.
    pub fn hover(&mut self, target: Option<DropTarget>) {
        if let Some(session) = self.active.as_mut() {
            session.hover = target;
        }
    }

    /// The highlighted cell, if a drag is active and over one.
    pub fn hovered(&self) -> Option<DropTarget> {
        self.active.as_ref().and_then(|session| session.hover)
    }

    /// End the drag at the given target.
    ///
    /// Always clears the session. Returns a plan only when the release
    /// landed on a real target; a release outside the grid is a no-op.
    pub fn finish(&mut self, target: Option<DropTarget>) -> Option<MovePlan> {
        let session = self.active.take()?;
        target.map(|target| MovePlan::for_target(session.task_id, target))
    }

    /// Abort the drag without producing a plan.
    pub fn cancel(&mut self) {
        self.active = None;
    }
}
