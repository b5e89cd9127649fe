//! View filtering applied before bucketing.
//!
//! Two independent axes compose: the mode decides which kinds of
//! items are on the calendar at all (schedule vs content), then the
//! audience narrows within the mode (assignee filter for schedule,
//! platform keys for content). The result feeds the bucketing engine
//! untouched.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::event::Event;
use crate::core::task::{MemberId, Task};
use crate::snapshot::Snapshot;

/// Which calendar the user is looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Tasks plus every non-content event.
    Schedule,
    /// Content publications only; no tasks.
    Content,
}

impl Default for ViewMode {
    fn default() -> Self {
        Self::Schedule
    }
}

/// Audience filter for tasks in schedule mode.
///
/// Events are never filtered by assignee; they belong to the whole
/// workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssigneeFilter {
    /// No filtering.
    All,
    /// Tasks assigned to the viewer, plus unassigned tasks the viewer
    /// owns.
    Me,
    /// Tasks explicitly assigned to one member.
    Member(MemberId),
}

impl Default for AssigneeFilter {
    fn default() -> Self {
        Self::All
    }
}

impl AssigneeFilter {
    /// Check a task against the filter on behalf of `viewer`.
    pub fn matches(&self, task: &Task, viewer: MemberId) -> bool {
        match self {
            AssigneeFilter::All => true,
            AssigneeFilter::Me => {
                task.assignee_id == Some(viewer)
                    || (task.assignee_id.is_none() && task.owner_id == viewer)
            }
            AssigneeFilter::Member(member) => task.assignee_id == Some(*member),
        }
    }
}

/// The composed filter: mode first, then audience.
#[derive(Debug, Clone)]
pub struct ViewFilter {
    pub mode: ViewMode,
    /// Applies in schedule mode only.
    pub assignee: AssigneeFilter,
    /// Platform keys for content mode. An empty set means no
    /// restriction, so a freshly reset view shows everything.
    pub platforms: BTreeSet<String>,
    /// Member the `Me` filter resolves against.
    pub viewer: MemberId,
}

impl ViewFilter {
    /// Schedule mode with no audience restriction.
    pub fn schedule(viewer: MemberId) -> Self {
        Self {
            mode: ViewMode::Schedule,
            assignee: AssigneeFilter::All,
            platforms: BTreeSet::new(),
            viewer,
        }
    }

    /// Content mode showing every platform.
    pub fn content(viewer: MemberId) -> Self {
        Self {
            mode: ViewMode::Content,
            assignee: AssigneeFilter::All,
            platforms: BTreeSet::new(),
            viewer,
        }
    }

    /// Apply the filter to a snapshot.
    ///
    /// Mode first, then platform (content) or assignee (schedule).
    /// Subtask exclusion is not done here; the bucketing engine owns
    /// that rule regardless of filtering.
    pub fn select<'a>(&self, snapshot: &'a Snapshot) -> ViewSelection<'a> {
        let selection = match self.mode {
            ViewMode::Schedule => ViewSelection {
                tasks: snapshot
                    .tasks
                    .values()
                    .filter(|task| self.assignee.matches(task, self.viewer))
                    .collect(),
                events: snapshot
                    .events
                    .values()
                    .filter(|event| !event.is_content())
                    .collect(),
            },
            ViewMode::Content => ViewSelection {
                tasks: Vec::new(),
                events: snapshot
                    .events
                    .values()
                    .filter(|event| event.is_content())
                    .filter(|event| self.platform_matches(event))
                    .collect(),
            },
        };
        trace!(
            mode = ?self.mode,
            tasks = selection.tasks.len(),
            events = selection.events.len(),
            "selected view items"
        );
        selection
    }

    fn platform_matches(&self, event: &Event) -> bool {
        if self.platforms.is_empty() {
            return true;
        }
        match event.platform() {
            Some(platform) => self.platforms.contains(platform),
            None => false,
        }
    }
}

/// Items that survived filtering, ready for the bucketing engine.
#[derive(Debug, Clone, Default)]
pub struct ViewSelection<'a> {
    pub tasks: Vec<&'a Task>,
    pub events: Vec<&'a Event>,
}

impl<'a> ViewSelection<'a> {
    /// Everything in the snapshot, unfiltered.
    pub fn all(snapshot: &'a Snapshot) -> Self {
        Self {
            tasks: snapshot.tasks.values().collect(),
            events: snapshot.events.values().collect(),
        }
    }
}
