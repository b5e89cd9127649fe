//! Calendar views: grids, bucketing, filtering, dragging, overdue.
//!
//! Everything here is a pure function over a snapshot plus an injected
//! `today`, so views are reproducible and trivially testable. The only
//! stateful piece is [`drag::DragState`], which tracks a single
//! in-flight pointer gesture.

pub mod bucket;
pub mod clock;
pub mod drag;
pub mod grid;
pub mod overdue;
pub mod view;

pub use bucket::{day_schedule, month_grid, week_schedule, DaySchedule, HourSlot, MonthCell, ScheduleItem};
pub use clock::{FIRST_HOUR, HOUR_SLOTS, LAST_HOUR};
pub use drag::{DragState, DropTarget, MovePlan};
pub use grid::{month_days, week_days, MonthDay, MONTH_CELLS};
pub use overdue::{is_overdue, overdue_days};
pub use view::{AssigneeFilter, ViewFilter, ViewMode, ViewSelection};
