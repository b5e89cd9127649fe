//! In-memory store, the reference implementation of the store shape.
//!
//! Backs the test suite and works as a real store for single-process
//! embedding. Records live in a `BTreeMap` behind an async `RwLock`;
//! every mutation broadcasts a coarse [`StoreNotice`].

use std::collections::BTreeMap;

use tokio::sync::{broadcast, RwLock};
use tracing::debug;

use crate::core::event::{Event, EventDraft, EventId, EventPatch};
use crate::core::task::{Task, TaskDraft, TaskId, TaskPatch};
use crate::error::Error;
use crate::store::{ChangeKind, EntityStore, StoreNotice};
use crate::Result;

/// Buffered notices per subscriber before a slow one starts lagging.
const NOTICE_CAPACITY: usize = 64;

/// Record shape [`MemoryStore`] can manage.
pub trait StoreRecord: Clone + Send + Sync + 'static {
    type Id: Copy + Ord + Eq + Send + Sync + 'static;
    type Draft: Send + 'static;
    type Patch: Send + 'static;

    fn id(&self) -> Self::Id;
    fn from_draft(draft: Self::Draft) -> Self;
    fn apply_patch(&mut self, patch: Self::Patch);
    fn not_found(id: Self::Id) -> Error;
}

impl StoreRecord for Task {
    type Id = TaskId;
    type Draft = TaskDraft;
    type Patch = TaskPatch;

    fn id(&self) -> TaskId {
        self.id
    }

    fn from_draft(draft: TaskDraft) -> Self {
        Task::from_draft(draft)
    }

    fn apply_patch(&mut self, patch: TaskPatch) {
        Task::apply_patch(self, patch);
    }

    fn not_found(id: TaskId) -> Error {
        Error::TaskNotFound(id)
    }
}

impl StoreRecord for Event {
    type Id = EventId;
    type Draft = EventDraft;
    type Patch = EventPatch;

    fn id(&self) -> EventId {
        self.id
    }

    fn from_draft(draft: EventDraft) -> Self {
        Event::from_draft(draft)
    }

    fn apply_patch(&mut self, patch: EventPatch) {
        Event::apply_patch(self, patch);
    }

    fn not_found(id: EventId) -> Error {
        Error::EventNotFound(id)
    }
}

/// In-memory store for one record kind.
pub struct MemoryStore<R: StoreRecord> {
    records: RwLock<BTreeMap<R::Id, R>>,
    notices: broadcast::Sender<StoreNotice>,
}

/// In-memory task store.
pub type MemoryTaskStore = MemoryStore<Task>;
/// In-memory event store.
pub type MemoryEventStore = MemoryStore<Event>;

impl<R: StoreRecord> MemoryStore<R> {
    pub fn new() -> Self {
        let (notices, _) = broadcast::channel(NOTICE_CAPACITY);
        Self {
            records: RwLock::new(BTreeMap::new()),
            notices,
        }
    }

    /// Number of records currently held.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    fn notify(&self, kind: ChangeKind) {
        // No subscribers is fine; the notice just goes nowhere.
        let _ = self.notices.send(StoreNotice { kind });
    }
}

impl<R: StoreRecord> Default for MemoryStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: StoreRecord> EntityStore for MemoryStore<R> {
    type Entity = R;
    type Id = R::Id;
    type Draft = R::Draft;
    type Patch = R::Patch;

    async fn create(&self, draft: R::Draft) -> Result<R> {
        let record = R::from_draft(draft);
        let id = record.id();
        self.records.write().await.insert(id, record.clone());
        debug!(store = std::any::type_name::<R>(), "created record");
        self.notify(ChangeKind::Created);
        Ok(record)
    }

    async fn update(&self, id: R::Id, patch: R::Patch) -> Result<R> {
        let updated = {
            let mut records = self.records.write().await;
            let record = records.get_mut(&id).ok_or_else(|| R::not_found(id))?;
            record.apply_patch(patch);
            record.clone()
        };
        debug!(store = std::any::type_name::<R>(), "updated record");
        self.notify(ChangeKind::Updated);
        Ok(updated)
    }

    async fn remove(&self, id: R::Id) -> Result<()> {
        self.records
            .write()
            .await
            .remove(&id)
            .ok_or_else(|| R::not_found(id))?;
        debug!(store = std::any::type_name::<R>(), "removed record");
        self.notify(ChangeKind::Removed);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<R>> {
        Ok(self.records.read().await.values().cloned().collect())
    }

    fn subscribe(&self) -> broadcast::Receiver<StoreNotice> {
        self.notices.subscribe()
    }
}
