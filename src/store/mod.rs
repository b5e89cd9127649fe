//! Store collaborators backing the engine.
//!
//! Tasks and events each sit behind an instance of the same store
//! shape: async create/update/remove/list plus a push notification
//! channel. The engine never persists anything itself; it keeps a
//! refreshable snapshot and treats the store as the source of record.
//! Mutations follow last-write-wins across users, and failures
//! propagate to the caller untouched; retry policy, if any, lives
//! inside the store.

use std::future::Future;

use tokio::sync::broadcast;

use crate::Result;

pub mod memory;

pub use memory::{MemoryEventStore, MemoryStore, MemoryTaskStore, StoreRecord};

/// What a change notice describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Created,
    Updated,
    Removed,
}

/// Push notification emitted after any store mutation.
///
/// Deliberately coarse. Subscribers re-read the full list rather than
/// patching state from the payload, which keeps reconciliation
/// idempotent even when notices arrive late, duplicated, or not at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreNotice {
    pub kind: ChangeKind,
}

/// Async CRUD plus change notification for one entity kind.
///
/// Tasks and events each require an implementation. Returned futures
/// are Send so the workspace can drive them from spawned tasks.
pub trait EntityStore: Send + Sync + 'static {
    type Entity: Clone + Send + 'static;
    type Id: Copy + Eq + Send + 'static;
    type Draft: Send + 'static;
    type Patch: Send + 'static;

    /// Create an entity from a draft. The store assigns the id and
    /// creation timestamp.
    fn create(&self, draft: Self::Draft) -> impl Future<Output = Result<Self::Entity>> + Send;

    /// Apply a partial patch. Only provided fields change.
    fn update(
        &self,
        id: Self::Id,
        patch: Self::Patch,
    ) -> impl Future<Output = Result<Self::Entity>> + Send;

    /// Delete by id. Unknown ids are an error.
    fn remove(&self, id: Self::Id) -> impl Future<Output = Result<()>> + Send;

    /// Read the current full contents.
    fn list(&self) -> impl Future<Output = Result<Vec<Self::Entity>>> + Send;

    /// Subscribe to change notices. Dropping the receiver unsubscribes.
    fn subscribe(&self) -> broadcast::Receiver<StoreNotice>;
}
