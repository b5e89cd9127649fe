//! Event data model for the calendar.
//!
//! Events are scheduled occurrences without a completion lifecycle:
//! meetings, calls, deadlines, work blocks, and content publications.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::task::DEFAULT_DURATION_MIN;

/// Fallback display color for events created without one.
pub const DEFAULT_EVENT_COLOR: &str = "#3b82f6";

/// Unique identifier for a calendar event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub Uuid);

impl EventId {
    /// Create a new unique event identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Return first 8 characters of the UUID for display.
    pub fn short(&self) -> String {
        self.0.to_string()[..8].to_string()
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for EventId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Kind of calendar event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventType {
    Meeting,
    Call,
    Deadline,
    WorkBlock,
    Note,
    /// A content publication (social post, article). Carries the
    /// platform key in `location` and a [`ContentStatus`].
    Content,
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventType::Meeting => write!(f, "meeting"),
            EventType::Call => write!(f, "call"),
            EventType::Deadline => write!(f, "deadline"),
            EventType::WorkBlock => write!(f, "work-block"),
            EventType::Note => write!(f, "note"),
            EventType::Content => write!(f, "content"),
        }
    }
}

/// Editorial state of a content event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentStatus {
    Draft,
    Ready,
    Published,
}

/// Where an event originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventSource {
    /// Created in this workspace.
    Local,
    /// Mirrored in from an external calendar.
    Synced,
}

/// A scheduled occurrence on the calendar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// Unique identifier for this event.
    pub id: EventId,
    /// Human-readable title.
    pub title: String,
    /// Kind of event.
    pub kind: EventType,
    /// Calendar date the event occurs on.
    pub start_date: NaiveDate,
    /// Clock time within the day. Absent means all-day.
    pub start_time: Option<String>,
    /// Planned duration in minutes.
    pub duration_min: u32,
    /// Display color (hex string).
    pub color: String,
    /// Free-text location. For content events this is the platform key.
    pub location: Option<String>,
    /// Editorial state, only meaningful for content events.
    pub content_status: Option<ContentStatus>,
    /// Local vs externally synchronized origin.
    pub source: Option<EventSource>,
    /// When the event was created. Assigned by the store.
    pub created_at: DateTime<Utc>,
}

impl Event {
    /// Build an event from a draft, assigning id and creation timestamp.
    pub fn from_draft(draft: EventDraft) -> Self {
        Self {
            id: EventId::new(),
            title: draft.title,
            kind: draft.kind,
            start_date: draft.start_date,
            start_time: draft.start_time,
            duration_min: draft.duration_min.unwrap_or(DEFAULT_DURATION_MIN),
            color: draft
                .color
                .unwrap_or_else(|| DEFAULT_EVENT_COLOR.to_string()),
            location: draft.location,
            content_status: draft.content_status,
            source: draft.source,
            created_at: Utc::now(),
        }
    }

    /// Check if the event has no clock time (all-day).
    pub fn is_all_day(&self) -> bool {
        self.start_time.is_none()
    }

    /// Check if this is a content publication event.
    pub fn is_content(&self) -> bool {
        matches!(self.kind, EventType::Content)
    }

    /// Platform key for content events, read from `location`.
    ///
    /// None for every other event kind, regardless of `location`.
    pub fn platform(&self) -> Option<&str> {
        if self.is_content() {
            self.location.as_deref()
        } else {
            None
        }
    }

    /// Apply a partial patch in place. Only provided fields change.
    pub fn apply_patch(&mut self, patch: EventPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
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
        if let Some(color) = patch.color {
            self.color = color;
        }
        if let Some(location) = patch.location {
            self.location = location;
        }
        if let Some(content_status) = patch.content_status {
            self.content_status = content_status;
        }
        if let Some(source) = patch.source {
            self.source = source;
        }
    }
}

/// Payload for creating an event through the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDraft {
    pub title: String,
    pub kind: EventType,
    pub start_date: NaiveDate,
    pub start_time: Option<String>,
    pub duration_min: Option<u32>,
    pub color: Option<String>,
    pub location: Option<String>,
    pub content_status: Option<ContentStatus>,
    pub source: Option<EventSource>,
}

impl EventDraft {
    /// Create a draft for the given kind and date, everything else empty.
    pub fn new(title: &str, kind: EventType, start_date: NaiveDate) -> Self {
        Self {
            title: title.to_string(),
            kind,
            start_date,
            start_time: None,
            duration_min: None,
            color: None,
            location: None,
            content_status: None,
            source: None,
        }
    }
}

/// Partial update for an event. Same double-Option convention as
/// [`crate::core::task::TaskPatch`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventPatch {
    pub title: Option<String>,
    pub kind: Option<EventType>,
    pub start_date: Option<NaiveDate>,
    pub start_time: Option<Option<String>>,
    pub duration_min: Option<u32>,
    pub color: Option<String>,
    pub location: Option<Option<String>>,
    pub content_status: Option<Option<ContentStatus>>,
    pub source: Option<Option<EventSource>>,
}
