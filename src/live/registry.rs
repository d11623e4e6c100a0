//! The process-scoped set of connected live-update viewers.

use std::{
    collections::HashMap,
    sync::{
        Mutex, MutexGuard, PoisonError,
        atomic::{AtomicU64, Ordering},
    },
};

use axum::extract::ws::Message;
use tokio::sync::mpsc::UnboundedSender;

use crate::{Error, live::NewDonationMessage};

/// Identifier for a connected viewer, unique for the lifetime of the process.
pub type ViewerId = u64;

/// The set of currently-connected live-update viewers.
///
/// Created once at startup and shared behind an `Arc`. The tokio runtime is
/// multi-threaded, so the map is guarded by a mutex; the lock is only ever
/// held for a map operation, never across an await point.
///
/// Delivery is at-most-once: a viewer whose connection is tearing down is
/// skipped, and a viewer that reconnects later starts fresh with no replay.
#[derive(Debug, Default)]
pub struct ViewerRegistry {
    viewers: Mutex<HashMap<ViewerId, UnboundedSender<Message>>>,
    next_id: AtomicU64,
}

impl ViewerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock the viewer map.
    ///
    /// The lock is only ever held for a single map operation, so a poisoned
    /// guard still holds an intact map and can be reused.
    fn viewers(&self) -> MutexGuard<'_, HashMap<ViewerId, UnboundedSender<Message>>> {
        self.viewers.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add a viewer's outbound channel and return its ID.
    pub fn register(&self, sender: UnboundedSender<Message>) -> ViewerId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.viewers().insert(id, sender);

        id
    }

    /// Remove a viewer from the registry.
    ///
    /// Removing an ID that was already removed is a no-op.
    pub fn deregister(&self, id: ViewerId) {
        self.viewers().remove(&id);
    }

    /// Serialize `message` once and offer it to every registered viewer.
    ///
    /// Viewers whose channel has closed (their socket task has exited) are
    /// skipped, not queued. Returns the number of viewers the message was
    /// handed to; zero viewers is not an error.
    ///
    /// # Errors
    /// Returns [Error::JsonSerializationError] if the message cannot be
    /// serialized.
    pub fn broadcast(&self, message: &NewDonationMessage) -> Result<usize, Error> {
        let text = serde_json::to_string(message)
            .map_err(|error| Error::JsonSerializationError(error.to_string()))?;

        let viewers = self.viewers();
        let mut delivered = 0;

        for sender in viewers.values() {
            if sender.send(Message::Text(text.clone().into())).is_ok() {
                delivered += 1;
            }
        }

        Ok(delivered)
    }

    /// The number of currently-registered viewers.
    pub fn viewer_count(&self) -> usize {
        self.viewers().len()
    }
}
