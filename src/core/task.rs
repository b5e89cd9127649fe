//! Task data model for the scheduling engine.
//!
//! Tasks are the assignable units of work on the board and the calendar.
//! Each task tracks its lifecycle status, schedule fields, hierarchy and
//! blocking links, and grouping metadata.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fallback duration for tasks created without an explicit one.
pub const DEFAULT_DURATION_MIN: u32 = 60;

/// Unique identifier for a task.
///
/// Uses UUID v4 for generation and provides a short form display
/// for human-readable output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub Uuid);

impl TaskId {
    /// Create a new unique task identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Return first 8 characters of the UUID for display.
    pub fn short(&self) -> String {
        self.0.to_string()[..8].to_string()
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TaskId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Identifier of a workspace member (owner or assignee).
///
/// Members live outside this engine; the id is an opaque reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(pub Uuid);

impl MemberId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MemberId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MemberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a project record managed outside this engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(pub Uuid);

impl ProjectId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a client record managed outside this engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(pub Uuid);

impl ClientId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for ClientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Priority ladder used for board ordering and display emphasis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Default for Priority {
    fn default() -> Self {
        Self::Medium
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::Low => write!(f, "low"),
            Priority::Medium => write!(f, "medium"),
            Priority::High => write!(f, "high"),
            Priority::Urgent => write!(f, "urgent"),
        }
    }
}

/// Task status in its lifecycle.
///
/// `todo → in-progress → done`, with `cancelled` reachable from any
/// non-terminal state and `todo` reachable from `done` (reopening).
/// The transition graph itself lives in [`crate::core::lifecycle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    /// Not started.
    Todo,
    /// Actively being worked on.
    InProgress,
    /// Finished. The only status for which a task counts as completed.
    Done,
    /// Abandoned. Terminal, and never counts as completed.
    Cancelled,
}

impl Default for TaskStatus {
    fn default() -> Self {
        Self::Todo
    }
}

impl TaskStatus {
    /// Check if the status is terminal (Done or Cancelled).
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Done | TaskStatus::Cancelled)
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskStatus::Todo => write!(f, "todo"),
            TaskStatus::InProgress => write!(f, "in-progress"),
            TaskStatus::Done => write!(f, "done"),
            TaskStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// A single task on the board.
///
/// Tasks carry their own schedule (date plus optional clock time), an
/// advisory single-predecessor blocking link, and an optional parent
/// making them a subtask. Completion is derived from `status` through
/// [`Task::completed`]; no separate boolean is stored, so the two can
/// never disagree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier for this task.
    pub id: TaskId,
    /// Human-readable title.
    pub title: String,
    /// Longer free-form description.
    pub description: Option<String>,
    /// Display priority.
    pub priority: Priority,
    /// Current lifecycle status.
    pub status: TaskStatus,
    /// Calendar date the task is scheduled on, if any.
    pub start_date: Option<NaiveDate>,
    /// Clock time within the day, stored as a raw string ("14:00").
    /// Hour granularity is what the calendar grid renders; parsing is
    /// defensive and an unreadable value degrades to unscheduled.
    pub start_time: Option<String>,
    /// Planned duration in minutes.
    pub duration_min: u32,
    /// Project this task belongs to.
    pub project_id: Option<ProjectId>,
    /// Client this task is billed or attributed to.
    pub client_id: Option<ClientId>,
    /// Member the task is assigned to.
    pub assignee_id: Option<MemberId>,
    /// Member who created the task. Always present.
    pub owner_id: MemberId,
    /// Parent task id. Set iff this task is a subtask.
    pub parent_task_id: Option<TaskId>,
    /// Id of at most one predecessor task that advisorily blocks this one.
    pub blocked_by: Option<TaskId>,
    /// Sort key within the (parent, group) scope. Advisory only.
    pub order_index: u32,
    /// Phase/column label on the board.
    pub group_name: Option<String>,
    /// When the task was created. Assigned by the store.
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Build a task from a draft, assigning id and creation timestamp.
    ///
    /// This is the store-side half of creation: drafts carry everything
    /// the caller chooses, the rest is generated here.
    pub fn from_draft(draft: TaskDraft) -> Self {
        Self {
            id: TaskId::new(),
            title: draft.title,
            description: draft.description,
            priority: draft.priority,
            status: draft.status,
            start_date: draft.start_date,
            start_time: draft.start_time,
            duration_min: draft.duration_min.unwrap_or(DEFAULT_DURATION_MIN),
            project_id: draft.project_id,
            client_id: draft.client_id,
            assignee_id: draft.assignee_id,
            owner_id: draft.owner_id,
            parent_task_id: draft.parent_task_id,
            blocked_by: draft.blocked_by,
            order_index: draft.order_index,
            group_name: draft.group_name,
            created_at: Utc::now(),
        }
    }

    /// Whether the task counts as completed.
    ///
    /// Derived from status: true iff `status == done`. Cancelled tasks
    /// are terminal but never completed.
    pub fn completed(&self) -> bool {
        matches!(self.status, TaskStatus::Done)
    }

    /// Check if this task is a subtask of another task.
    pub fn is_subtask(&self) -> bool {
        self.parent_task_id.is_some()
    }

    /// Apply a partial patch in place. Only provided fields change.
    pub fn apply_patch(&mut self, patch: TaskPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(start_date) = patch.start_date {
            self.start_date = start_date;
        }
        if let Some(start_time) = patch.start_time {
            self.start_time = start_time;
        }
        if let Some(duration_min) = patch.duration_min {
            self.duration_min = duration_min;
        }
        if let Some(project_id) = patch.project_id {
            self.project_id = project_id;
        }
        if let Some(client_id) = patch.client_id {
            self.client_id = client_id;
        }
        if let Some(assignee_id) = patch.assignee_id {
            self.assignee_id = assignee_id;
        }
        if let Some(parent_task_id) = patch.parent_task_id {
            self.parent_task_id = parent_task_id;
        }
        if let Some(blocked_by) = patch.blocked_by {
            self.blocked_by = blocked_by;
        }
        if let Some(order_index) = patch.order_index {
            self.order_index = order_index;
        }
        if let Some(group_name) = patch.group_name {
            self.group_name = group_name;
        }
    }
}

/// Payload for creating a task through the store.
///
/// The store assigns `id` and `created_at`; everything else comes from
/// here. A missing `duration_min` falls back to the configured default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskDraft {
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub status: TaskStatus,
    pub start_date: Option<NaiveDate>,
    pub start_time: Option<String>,
    pub duration_min: Option<u32>,
    pub project_id: Option<ProjectId>,
    pub client_id: Option<ClientId>,
    pub assignee_id: Option<MemberId>,
    pub owner_id: MemberId,
    pub parent_task_id: Option<TaskId>,
    pub blocked_by: Option<TaskId>,
    pub order_index: u32,
    pub group_name: Option<String>,
}

impl TaskDraft {
    /// Create a draft with the given title and owner.
    ///
    /// Status starts at Todo, priority at Medium, and every optional
    /// field empty.
    pub fn new(title: &str, owner_id: MemberId) -> Self {
        Self {
            title: title.to_string(),
            description: None,
            priority: Priority::default(),
            status: TaskStatus::default(),
            start_date: None,
            start_time: None,
            duration_min: None,
            project_id: None,
            client_id: None,
            assignee_id: None,
            owner_id,
            parent_task_id: None,
            blocked_by: None,
            order_index: 0,
            group_name: None,
        }
    }
}

/// Partial update for a task. Only provided fields change.
///
/// Nullable fields use a double Option: outer `None` leaves the field
/// alone, `Some(None)` clears it, `Some(Some(v))` sets it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub priority: Option<Priority>,
    pub status: Option<TaskStatus>,
    pub start_date: Option<Option<NaiveDate>>,
    pub start_time: Option<Option<String>>,
    pub duration_min: Option<u32>,
    pub project_id: Option<Option<ProjectId>>,
    pub client_id: Option<Option<ClientId>>,
    pub assignee_id: Option<Option<MemberId>>,
    pub parent_task_id: Option<Option<TaskId>>,
    pub blocked_by: Option<Option<TaskId>>,
    pub order_index: Option<u32>,
    pub group_name: Option<Option<String>>,
}

impl TaskPatch {
    /// Patch touching only the schedule fields.
    pub fn reschedule(date: NaiveDate, time: Option<String>) -> Self {
        Self {
            start_date: Some(Some(date)),
            start_time: Some(time),
            ..Self::default()
        }
    }

    /// Patch touching only the status field.
    pub fn with_status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}
