//! Live query listeners for the in-memory store.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use futures::StreamExt;
use tokio::sync::watch;
use tracing::debug;

use tracktogether_core::traits::SnapshotStream;
use tracktogether_core::types::{
    CollectionPath, Document, DocumentPath, DocumentSnapshot, FieldFilter, matches_all,
};

/// Identifier of a registered listener.
pub type ListenerId = u64;

/// One registered query and the channel its results are pushed to.
#[derive(Debug)]
struct Listener {
    collection: CollectionPath,
    filters: Vec<FieldFilter>,
    tx: watch::Sender<Vec<DocumentSnapshot>>,
}

/// Tracks listener registrations and pushes fresh result sets on change.
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    listeners: DashMap<ListenerId, Listener>,
    next_id: AtomicU64,
}

/// Evaluate an equality query over the document map.
pub(crate) fn run_query(
    docs: &BTreeMap<DocumentPath, Document>,
    collection: &CollectionPath,
    filters: &[FieldFilter],
) -> Vec<DocumentSnapshot> {
    docs.iter()
        .filter(|(path, data)| collection.contains(path) && matches_all(filters, data))
        .map(|(path, data)| DocumentSnapshot::new(path.clone(), data.clone()))
        .collect()
}

impl ListenerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener seeded with `initial` and return its id and stream.
    pub fn register(
        &self,
        collection: CollectionPath,
        filters: Vec<FieldFilter>,
        initial: Vec<DocumentSnapshot>,
    ) -> (ListenerId, SnapshotStream) {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let (tx, rx) = watch::channel(initial);
        debug!(listener_id = id, collection = %collection, "Listener registered");
        self.listeners.insert(
            id,
            Listener {
                collection,
                filters,
                tx,
            },
        );

        let stream = futures::stream::unfold((rx, true), |(mut rx, first)| async move {
            if !first && rx.changed().await.is_err() {
                return None;
            }
            let current = rx.borrow_and_update().clone();
            Some((current, (rx, false)))
        });
        (id, stream.boxed())
    }

    /// Drop a listener. Its stream ends once the pending value is consumed.
    pub fn remove(&self, id: ListenerId) -> bool {
        let removed = self.listeners.remove(&id).is_some();
        if removed {
            debug!(listener_id = id, "Listener released");
        }
        removed
    }

    /// Number of live listeners.
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Whether no listener is registered.
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Re-run every listener whose collection contains one of `changed`
    /// and push the result if it differs from what the listener last saw.
    pub fn notify(&self, docs: &BTreeMap<DocumentPath, Document>, changed: &[DocumentPath]) {
        for entry in self.listeners.iter() {
            let listener = entry.value();
            if !changed.iter().any(|p| listener.collection.contains(p)) {
                continue;
            }
            let fresh = run_query(docs, &listener.collection, &listener.filters);
            listener.tx.send_if_modified(|current| {
                if *current == fresh {
                    false
                } else {
                    *current = fresh;
                    true
                }
            });
        }
    }
}
