//! Test fixtures for integration tests.
//!
//! Provides helpers for:
//! - Sessions over fresh in-memory stores
//! - A fixed calendar week to schedule against
//! - Draft builders for scheduled tasks and events

use std::sync::Arc;

use chrono::NaiveDate;

use huddle::calendar::view::ViewFilter;
use huddle::config::Config;
use huddle::core::event::{ContentStatus, Event, EventDraft, EventType};
use huddle::core::task::{MemberId, Task, TaskDraft};
use huddle::store::{MemoryEventStore, MemoryTaskStore};
use huddle::Workspace;

/// Route tracing output through the test writer when `RUST_LOG` is
/// set. Only the first call installs a subscriber; the rest are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// The fixed "today" the suite schedules around: Wednesday 2025-06-11.
/// Its week runs Monday 2025-06-09 through Sunday 2025-06-15.
pub fn today() -> NaiveDate {
    date(2025, 6, 11)
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

/// One member's session plus handles to the shared stores, so tests
/// can open more sessions against the same board.
pub struct BoardHarness {
    pub tasks: Arc<MemoryTaskStore>,
    pub events: Arc<MemoryEventStore>,
    pub ws: Workspace<MemoryTaskStore, MemoryEventStore>,
    pub viewer: MemberId,
}

impl BoardHarness {
    pub fn new() -> Self {
        init_tracing();
        let tasks = Arc::new(MemoryTaskStore::new());
        let events = Arc::new(MemoryEventStore::new());
        let ws = Workspace::new(Arc::clone(&tasks), Arc::clone(&events), Config::default());

        Self {
            tasks,
            events,
            ws,
            viewer: MemberId::new(),
        }
    }

    /// Open another member's session over the same stores.
    pub fn join(&self) -> (Workspace<MemoryTaskStore, MemoryEventStore>, MemberId) {
        let ws = Workspace::new(
            Arc::clone(&self.tasks),
            Arc::clone(&self.events),
            Config::default(),
        );
        (ws, MemberId::new())
    }

    /// Create a task assigned to the viewer at a date and optional time.
    pub async fn task_at(&mut self, title: &str, on: NaiveDate, at: Option<&str>) -> Task {
        let mut draft = TaskDraft::new(title, self.viewer);
        draft.assignee_id = Some(self.viewer);
        draft.start_date = Some(on);
        draft.start_time = at.map(str::to_string);
        self.ws.create_task(draft).await.expect("create task")
    }

    /// Create an undated task owned by the viewer.
    pub async fn backlog_task(&mut self, title: &str) -> Task {
        let mut draft = TaskDraft::new(title, self.viewer);
        draft.assignee_id = Some(self.viewer);
        self.ws.create_task(draft).await.expect("create task")
    }

    /// Create a meeting at a date and time.
    pub async fn meeting_at(&mut self, title: &str, on: NaiveDate, at: &str) -> Event {
        let mut draft = EventDraft::new(title, EventType::Meeting, on);
        draft.start_time = Some(at.to_string());
        self.ws.create_event(draft).await.expect("create event")
    }

    /// Create a draft content publication for a platform.
    pub async fn content_post(&mut self, title: &str, on: NaiveDate, platform: &str) -> Event {
        let mut draft = EventDraft::new(title, EventType::Content, on);
        draft.location = Some(platform.to_string());
        draft.content_status = Some(ContentStatus::Draft);
        self.ws.create_event(draft).await.expect("create event")
    }

    /// Schedule-mode filter resolving `Me` against the viewer.
    pub fn schedule_filter(&self) -> ViewFilter {
        ViewFilter::schedule(self.viewer)
    }

    /// Content-mode filter resolving `Me` against the viewer.
    pub fn content_filter(&self) -> ViewFilter {
        ViewFilter::content(self.viewer)
    }
}

impl Default for BoardHarness {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_week_shape() {
        assert_eq!(today(), date(2025, 6, 11));
        assert_eq!(
            today().format("%A").to_string(),
            "Wednesday",
            "the fixture week is built around a midweek today"
        );
    }

    #[tokio::test]
    async fn test_harness_starts_empty() {
        let harness = BoardHarness::new();
        assert!(harness.ws.snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_joined_session_shares_the_board() {
        let mut harness = BoardHarness::new();
        let created = harness.backlog_task("shared").await;

        let (mut other, _member) = harness.join();
        other.refresh().await.expect("refresh");

        assert!(other.snapshot().task(created.id).is_some());
    }
}
