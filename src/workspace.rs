//! The engine facade: two stores, one snapshot, and the mutation paths
//! the views hang off.
//!
//! Every mutation goes to the store first and merges the store's reply
//! into the local snapshot, so a caller sees its own writes immediately
//! without waiting for a change notice or a refresh. Changes made by
//! other users stay invisible until [`Workspace::refresh`] runs; the
//! background loop from [`Workspace::spawn_sync`] tells the caller when
//! that is worth doing.

use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::{broadcast, mpsc};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::calendar::bucket::{day_schedule, month_grid, week_schedule, DaySchedule, MonthCell};
use crate::calendar::clock::hour_label;
use crate::calendar::drag::MovePlan;
use crate::calendar::view::ViewFilter;
use crate::config::Config;
use crate::core::event::{Event, EventDraft, EventId, EventPatch};
use crate::core::subtasks::subtask_draft;
use crate::core::task::{Task, TaskDraft, TaskId, TaskPatch, TaskStatus};
use crate::core::{deps, lifecycle};
use crate::snapshot::Snapshot;
use crate::store::{ChangeKind, EntityStore, StoreNotice};
use crate::{Error, Result};

/// Handle to a running sync loop, used for graceful shutdown.
pub struct SyncHandle {
    cancel: CancellationToken,
}

impl SyncHandle {
    pub fn new(cancel: CancellationToken) -> Self {
        Self { cancel }
    }

    /// Signal the loop to stop forwarding and exit.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

/// One user's live session over shared task and event stores.
pub struct Workspace<T, E>
where
    T: EntityStore<Entity = Task, Id = TaskId, Draft = TaskDraft, Patch = TaskPatch>,
    E: EntityStore<Entity = Event, Id = EventId, Draft = EventDraft, Patch = EventPatch>,
{
    tasks: Arc<T>,
    events: Arc<E>,
    config: Config,
    snapshot: Snapshot,
}

impl<T, E> Workspace<T, E>
where
    T: EntityStore<Entity = Task, Id = TaskId, Draft = TaskDraft, Patch = TaskPatch>,
    E: EntityStore<Entity = Event, Id = EventId, Draft = EventDraft, Patch = EventPatch>,
{
    /// Start with an empty snapshot; call [`refresh`](Self::refresh) to
    /// pull existing records.
    pub fn new(tasks: Arc<T>, events: Arc<E>, config: Config) -> Self {
        Self {
            tasks,
            events,
            config,
            snapshot: Snapshot::new(),
        }
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Replace the snapshot with the stores' current contents.
    pub async fn refresh(&mut self) -> Result<()> {
        let (tasks, events) = tokio::join!(self.tasks.list(), self.events.list());
        self.snapshot = Snapshot::from_lists(tasks?, events?);
        debug!("snapshot refreshed");
        Ok(())
    }

    // ---- tasks ----

    /// Create a task, filling the configured duration when the draft
    /// leaves it out.
    pub async fn create_task(&mut self, mut draft: TaskDraft) -> Result<Task> {
        if draft.duration_min.is_none() {
            draft.duration_min = Some(self.config.default_duration_min);
        }
        let task = self.tasks.create(draft).await?;
        debug!(task_id = %task.id, title = %task.title, "task created");
        self.snapshot.upsert_task(task.clone());
        Ok(task)
    }

    pub async fn update_task(&mut self, id: TaskId, patch: TaskPatch) -> Result<Task> {
        let task = self.tasks.update(id, patch).await?;
        self.snapshot.upsert_task(task.clone());
        Ok(task)
    }

    pub async fn remove_task(&mut self, id: TaskId) -> Result<()> {
        self.tasks.remove(id).await?;
        self.snapshot.remove_task(id);
        debug!(task_id = %id, "task removed");
        Ok(())
    }

    /// Set a status directly. Unusual edges are allowed and only logged;
    /// the transition graph is advice for pickers, not a gate.
    pub async fn set_task_status(&mut self, id: TaskId, status: TaskStatus) -> Result<Task> {
        if let Some(task) = self.snapshot.task(id) {
            if !lifecycle::can_transition(task.status, status) {
                debug!(task_id = %id, from = %task.status, to = %status, "off-graph status change");
            }
        }
        self.update_task(id, TaskPatch::with_status(status)).await
    }

    /// Flip between done and todo, from whatever state the task is in.
    pub async fn toggle_task(&mut self, id: TaskId) -> Result<Task> {
        let current = self.snapshot.task(id).ok_or(Error::TaskNotFound(id))?;
        let next = lifecycle::toggle_complete(current).status;
        self.update_task(id, TaskPatch::with_status(next)).await
    }

    /// Reschedule onto a date, into an hour cell or (with `hour` absent)
    /// the unscheduled row.
    pub async fn move_task(
        &mut self,
        id: TaskId,
        date: NaiveDate,
        hour: Option<u32>,
    ) -> Result<Task> {
        let time = hour.map(hour_label);
        debug!(task_id = %id, %date, ?time, "task moved");
        self.update_task(id, TaskPatch::reschedule(date, time)).await
    }

    /// Apply the outcome of a completed drag.
    pub async fn apply_move(&mut self, plan: MovePlan) -> Result<Task> {
        self.update_task(
            plan.task_id,
            TaskPatch::reschedule(plan.start_date, plan.start_time),
        )
        .await
    }

    /// Add a subtask under a parent known to the snapshot, inheriting
    /// its priority and project and taking the next order slot.
    pub async fn create_subtask(&mut self, parent_id: TaskId, title: &str) -> Result<Task> {
        let parent = self
            .snapshot
            .task(parent_id)
            .ok_or(Error::TaskNotFound(parent_id))?;
        let draft = subtask_draft(&self.snapshot, parent, title);
        self.create_task(draft).await
    }

    /// Point `blocked_by` somewhere else, or clear it. No cycle check:
    /// the stored shape is whatever the last writer said it is.
    pub async fn set_blocker(&mut self, id: TaskId, blocker: Option<TaskId>) -> Result<Task> {
        self.update_task(
            id,
            TaskPatch {
                blocked_by: Some(blocker),
                ..TaskPatch::default()
            },
        )
        .await
    }

    /// [`set_blocker`](Self::set_blocker) behind a cycle guard, for
    /// callers that want the write refused instead of represented.
    pub async fn set_blocker_checked(
        &mut self,
        id: TaskId,
        blocker: Option<TaskId>,
    ) -> Result<Task> {
        if let Some(candidate) = blocker {
            if deps::would_create_cycle(&self.snapshot, id, candidate) {
                return Err(Error::Validation(format!(
                    "blocking {id} on {candidate} would create a cycle"
                )));
            }
        }
        self.set_blocker(id, blocker).await
    }

    // ---- events ----

    /// Create an event, filling the configured duration and color when
    /// the draft leaves them out.
    pub async fn create_event(&mut self, mut draft: EventDraft) -> Result<Event> {
        if draft.duration_min.is_none() {
            draft.duration_min = Some(self.config.default_duration_min);
        }
        if draft.color.is_none() {
            draft.color = Some(self.config.default_event_color.clone());
        }
        let event = self.events.create(draft).await?;
        debug!(event_id = %event.id, title = %event.title, "event created");
        self.snapshot.upsert_event(event.clone());
        Ok(event)
    }

    pub async fn update_event(&mut self, id: EventId, patch: EventPatch) -> Result<Event> {
        let event = self.events.update(id, patch).await?;
        self.snapshot.upsert_event(event.clone());
        Ok(event)
    }

    pub async fn remove_event(&mut self, id: EventId) -> Result<()> {
        self.events.remove(id).await?;
        self.snapshot.remove_event(id);
        debug!(event_id = %id, "event removed");
        Ok(())
    }

    // ---- views ----

    /// One day's hour grid over the current snapshot.
    pub fn day_view(&self, filter: &ViewFilter, date: NaiveDate, today: NaiveDate) -> DaySchedule {
        day_schedule(&filter.select(&self.snapshot), date, today)
    }

    /// The week containing `today`, Monday first.
    pub fn week_view(&self, filter: &ViewFilter, today: NaiveDate) -> Vec<DaySchedule> {
        week_schedule(&filter.select(&self.snapshot), today)
    }

    /// The 42-cell month grid around `reference`.
    pub fn month_view(
        &self,
        filter: &ViewFilter,
        reference: NaiveDate,
        today: NaiveDate,
    ) -> Vec<MonthCell> {
        month_grid(&filter.select(&self.snapshot), reference, today)
    }

    // ---- sync ----

    /// Spawn a loop that forwards change notices from both stores into
    /// `tx` until shut down or both stores close. The caller reacts by
    /// calling [`refresh`](Self::refresh); notices carry no payload
    /// worth reading beyond that.
    pub fn spawn_sync(&self, tx: mpsc::UnboundedSender<StoreNotice>) -> SyncHandle {
        let cancel = CancellationToken::new();
        let cancel_clone = cancel.clone();
        let mut task_notices = self.tasks.subscribe();
        let mut event_notices = self.events.subscribe();

        debug!("sync loop starting");

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = cancel_clone.cancelled() => {
                        debug!("sync loop cancelled");
                        break;
                    }
                    notice = task_notices.recv() => {
                        if !forward(notice, &tx) {
                            break;
                        }
                    }
                    notice = event_notices.recv() => {
                        if !forward(notice, &tx) {
                            break;
                        }
                    }
                }
            }
        });

        SyncHandle::new(cancel)
    }
}

/// Pass one broadcast result downstream. Returns false when the loop
/// should stop: the source closed or nobody is listening anymore.
fn forward(
    notice: std::result::Result<StoreNotice, broadcast::error::RecvError>,
    tx: &mpsc::UnboundedSender<StoreNotice>,
) -> bool {
    let notice = match notice {
        Ok(notice) => notice,
        Err(broadcast::error::RecvError::Lagged(missed)) => {
            // Whatever was missed, one synthetic update still triggers
            // the full re-read that reconciles the snapshot.
            warn!(missed, "sync receiver lagged");
            StoreNotice {
                kind: ChangeKind::Updated,
            }
        }
        Err(broadcast::error::RecvError::Closed) => return false,
    };
    tx.send(notice).is_ok()
}
