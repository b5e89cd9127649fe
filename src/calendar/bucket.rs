//! Placement of tasks and events into calendar buckets.
//!
//! Day and week views are hour grids: one row per hour from 8 to 20
//! plus an unscheduled row per day. The month view is the 42-cell grid
//! from [`crate::calendar::grid`] with a flat item list per cell.
//!
//! Placement rules:
//! - items land on a day by `start_date` equality
//! - subtasks never appear; they live under their parent
//! - a parseable start time picks the hour row equal to its floor hour
//! - no time, or an unreadable time, lands in the unscheduled row
//! - the bucket for today additionally absorbs every overdue task,
//!   de-duplicated by id (the task stays visible under its own date)
//!
//! All functions are pure over a [`ViewSelection`]; `today` is passed
//! in so results are reproducible.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::calendar::clock::{grid_hours, parse_clock_time, FIRST_HOUR, LAST_HOUR};
use crate::calendar::grid::{month_days, week_days};
use crate::calendar::overdue::is_overdue;
use crate::calendar::view::ViewSelection;
use crate::core::event::Event;
use crate::core::task::Task;

/// A task or event placed on the calendar.
#[derive(Debug, Clone)]
pub enum ScheduleItem {
    Task(Task),
    Event(Event),
}

impl ScheduleItem {
    pub fn title(&self) -> &str {
        match self {
            ScheduleItem::Task(task) => &task.title,
            ScheduleItem::Event(event) => &event.title,
        }
    }

    pub fn start_time(&self) -> Option<&str> {
        match self {
            ScheduleItem::Task(task) => task.start_time.as_deref(),
            ScheduleItem::Event(event) => event.start_time.as_deref(),
        }
    }

    pub fn is_task(&self) -> bool {
        matches!(self, ScheduleItem::Task(_))
    }

    pub fn as_task(&self) -> Option<&Task> {
        match self {
            ScheduleItem::Task(task) => Some(task),
            ScheduleItem::Event(_) => None,
        }
    }

    pub fn as_event(&self) -> Option<&Event> {
        match self {
            ScheduleItem::Task(_) => None,
            ScheduleItem::Event(event) => Some(event),
        }
    }
}

/// One hour row of a day.
#[derive(Debug, Clone)]
pub struct HourSlot {
    pub hour: u32,
    pub items: Vec<ScheduleItem>,
}

/// A single day in the day/week views: the fixed hour rows plus the
/// unscheduled row.
#[derive(Debug, Clone)]
pub struct DaySchedule {
    pub date: NaiveDate,
    /// Always one slot per hour 8..=20, in order, even when empty.
    pub slots: Vec<HourSlot>,
    /// Items on this date with no usable clock time.
    pub unscheduled: Vec<ScheduleItem>,
}

impl DaySchedule {
    /// The slot for a given hour, if it is inside the grid window.
    pub fn slot(&self, hour: u32) -> Option<&HourSlot> {
        self.slots.iter().find(|slot| slot.hour == hour)
    }

    /// Total items placed on this day, unscheduled row included.
    pub fn item_count(&self) -> usize {
        self.slots.iter().map(|slot| slot.items.len()).sum::<usize>() + self.unscheduled.len()
    }
}

/// One cell of the month view: a flat, ordered item list for a date.
#[derive(Debug, Clone)]
pub struct MonthCell {
    pub date: NaiveDate,
    /// False for lead/trail cells borrowed from adjacent months.
    pub in_month: bool,
    pub items: Vec<ScheduleItem>,
}

/// Where a start time puts an item within its day.
enum Placement {
    Slot(u32),
    Unscheduled,
    /// Parseable but outside the 8..=20 window: visible in the month
    /// view's flat list, absent from the hour grid.
    OffGrid,
}

fn placement(start_time: Option<&str>) -> Placement {
    let raw = match start_time {
        Some(raw) => raw,
        None => return Placement::Unscheduled,
    };
    match parse_clock_time(raw) {
        Some((hour, _minute)) if (FIRST_HOUR..=LAST_HOUR).contains(&hour) => Placement::Slot(hour),
        Some(_) => Placement::OffGrid,
        None => Placement::Unscheduled,
    }
}

/// Top-level tasks belonging to a date's bucket, ascending by id.
///
/// For today this includes the overdue rollover; re-running the
/// computation cannot duplicate entries because ids are collected
/// through a set.
fn day_tasks<'a>(
    selection: &ViewSelection<'a>,
    date: NaiveDate,
    today: NaiveDate,
) -> Vec<&'a Task> {
    let mut seen = BTreeSet::new();
    let mut tasks: Vec<&Task> = selection
        .tasks
        .iter()
        .copied()
        .filter(|task| !task.is_subtask())
        .filter(|task| {
            task.start_date == Some(date) || (date == today && is_overdue(task, today))
        })
        .filter(|task| seen.insert(task.id))
        .collect();
    tasks.sort_by_key(|task| task.id);
    tasks
}

/// Events dated exactly on `date`, ascending by id.
fn day_events<'a>(selection: &ViewSelection<'a>, date: NaiveDate) -> Vec<&'a Event> {
    let mut events: Vec<&Event> = selection
        .events
        .iter()
        .copied()
        .filter(|event| event.start_date == date)
        .collect();
    events.sort_by_key(|event| event.id);
    events
}

/// Build the hour-grid bucket for one date.
pub fn day_schedule(
    selection: &ViewSelection<'_>,
    date: NaiveDate,
    today: NaiveDate,
) -> DaySchedule {
    let mut slots: Vec<HourSlot> = grid_hours()
        .map(|hour| HourSlot {
            hour,
            items: Vec::new(),
        })
        .collect();
    let mut unscheduled = Vec::new();

    for task in day_tasks(selection, date, today) {
        match placement(task.start_time.as_deref()) {
            Placement::Slot(hour) => {
                if let Some(slot) = slots.iter_mut().find(|slot| slot.hour == hour) {
                    slot.items.push(ScheduleItem::Task(task.clone()));
                }
            }
            Placement::Unscheduled => unscheduled.push(ScheduleItem::Task(task.clone())),
            Placement::OffGrid => {}
        }
    }
    for event in day_events(selection, date) {
        match placement(event.start_time.as_deref()) {
            Placement::Slot(hour) => {
                if let Some(slot) = slots.iter_mut().find(|slot| slot.hour == hour) {
                    slot.items.push(ScheduleItem::Event(event.clone()));
                }
            }
            Placement::Unscheduled => unscheduled.push(ScheduleItem::Event(event.clone())),
            Placement::OffGrid => {}
        }
    }

    DaySchedule {
        date,
        slots,
        unscheduled,
    }
}

/// The week view: seven day buckets for the Monday-start week
/// containing `today`.
pub fn week_schedule(selection: &ViewSelection<'_>, today: NaiveDate) -> Vec<DaySchedule> {
    week_days(today)
        .into_iter()
        .map(|date| day_schedule(selection, date, today))
        .collect()
}

/// The month view: 42 cells for the month containing `reference`,
/// each with its date's items as a flat ordered list.
///
/// The week view ignores navigation, but the month view does follow
/// `reference`. Today's cell still gets the overdue rollover whenever
/// today falls inside the rendered grid.
pub fn month_grid(
    selection: &ViewSelection<'_>,
    reference: NaiveDate,
    today: NaiveDate,
) -> Vec<MonthCell> {
    month_days(reference)
        .into_iter()
        .map(|day| {
            let mut items: Vec<ScheduleItem> = day_tasks(selection, day.date, today)
                .into_iter()
                .map(|task| ScheduleItem::Task(task.clone()))
                .collect();
            items.extend(
                day_events(selection, day.date)
                    .into_iter()
                    .map(|event| ScheduleItem::Event(event.clone())),
            );
            MonthCell {
                date: day.date,
                in_month: day.in_month,
                items,
            }
        })
        .collect()
}
