//! Document store trait for the hierarchical key-document backend.
//!
//! The store is the only persistence mechanism. It offers per-document
//! reads, equality-filtered collection queries, live subscriptions, and
//! atomic multi-document batches. Single-document writes are expressed as
//! one-operation batches so that every backend only has to implement
//! [`DocumentStore::commit`] once.

use std::fmt;
use std::pin::Pin;

use async_trait::async_trait;
use futures::Stream;

use crate::result::AppResult;
use crate::types::{CollectionPath, Document, DocumentPath, DocumentSnapshot, FieldFilter};

/// One write inside a [`WriteBatch`].
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOp {
    /// Create or fully replace a document.
    Set {
        /// Target document.
        path: DocumentPath,
        /// New contents.
        data: Document,
    },
    /// Merge top-level fields into an existing document. Fails the whole
    /// batch if the document does not exist.
    Update {
        /// Target document.
        path: DocumentPath,
        /// Fields to overwrite.
        fields: Document,
    },
    /// Remove a document. Deleting a missing document is not an error.
    Delete {
        /// Target document.
        path: DocumentPath,
    },
}

impl WriteOp {
    /// The document this operation targets.
    pub fn path(&self) -> &DocumentPath {
        match self {
            Self::Set { path, .. } | Self::Update { path, .. } | Self::Delete { path } => path,
        }
    }
}

/// An ordered set of writes applied all-or-nothing by [`DocumentStore::commit`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WriteBatch {
    ops: Vec<WriteOp>,
}

impl WriteBatch {
    /// Create an empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a full-document write.
    pub fn set(&mut self, path: DocumentPath, data: Document) -> &mut Self {
        self.ops.push(WriteOp::Set { path, data });
        self
    }

    /// Queue a partial update of an existing document.
    pub fn update(&mut self, path: DocumentPath, fields: Document) -> &mut Self {
        self.ops.push(WriteOp::Update { path, fields });
        self
    }

    /// Queue a delete.
    pub fn delete(&mut self, path: DocumentPath) -> &mut Self {
        self.ops.push(WriteOp::Delete { path });
        self
    }

    /// Number of queued writes.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Whether the batch has no writes.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// The queued writes, in order.
    pub fn ops(&self) -> &[WriteOp] {
        &self.ops
    }

    /// Consume the batch into its writes.
    pub fn into_ops(self) -> Vec<WriteOp> {
        self.ops
    }
}

/// Stream of query results. Every item is the full current result set.
pub type SnapshotStream = Pin<Box<dyn Stream<Item = Vec<DocumentSnapshot>> + Send>>;

/// Handle that releases a live subscription.
///
/// Releasing is explicit: the listener stays registered until
/// [`Unsubscribe::unsubscribe`] is called.
pub struct Unsubscribe {
    release: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Unsubscribe {
    /// Wrap the backend-specific release action.
    pub fn new(release: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// Stop the subscription. The paired stream ends after this call.
    pub fn unsubscribe(mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl fmt::Debug for Unsubscribe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Unsubscribe")
            .field("released", &self.release.is_none())
            .finish()
    }
}

/// A live query: the release handle plus the lazy snapshot sequence.
pub struct Subscription {
    /// Releases the listener.
    pub unsubscribe: Unsubscribe,
    /// Current result set, then one item per change.
    pub snapshots: SnapshotStream,
}

impl Subscription {
    /// Split into `(Unsubscribe, snapshots)`.
    pub fn into_parts(self) -> (Unsubscribe, SnapshotStream) {
        (self.unsubscribe, self.snapshots)
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("unsubscribe", &self.unsubscribe)
            .finish_non_exhaustive()
    }
}

/// Trait for document store backends.
#[async_trait]
pub trait DocumentStore: Send + Sync + fmt::Debug + 'static {
    /// Read one document. Returns `None` if it does not exist.
    async fn get(&self, path: &DocumentPath) -> AppResult<Option<DocumentSnapshot>>;

    /// List the direct children of `collection` matching every filter.
    async fn query(
        &self,
        collection: &CollectionPath,
        filters: &[FieldFilter],
    ) -> AppResult<Vec<DocumentSnapshot>>;

    /// Observe a query. The stream yields the current result set first and
    /// then the full result set again after every change that affects it.
    async fn subscribe(
        &self,
        collection: &CollectionPath,
        filters: Vec<FieldFilter>,
    ) -> AppResult<Subscription>;

    /// Apply every write in `batch` atomically, or none of them.
    async fn commit(&self, batch: WriteBatch) -> AppResult<()>;

    /// Start a new batch.
    fn batch(&self) -> WriteBatch {
        WriteBatch::new()
    }

    /// Create or replace a document.
    async fn set(&self, path: &DocumentPath, data: Document) -> AppResult<()> {
        let mut batch = self.batch();
        batch.set(path.clone(), data);
        self.commit(batch).await
    }

    /// Merge fields into an existing document.
    async fn update(&self, path: &DocumentPath, fields: Document) -> AppResult<()> {
        let mut batch = self.batch();
        batch.update(path.clone(), fields);
        self.commit(batch).await
    }

    /// Delete a document.
    async fn delete(&self, path: &DocumentPath) -> AppResult<()> {
        let mut batch = self.batch();
        batch.delete(path.clone());
        self.commit(batch).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn test_batch_preserves_order() {
        let lists = CollectionPath::root("lists");
        let mut batch = WriteBatch::new();
        batch
            .set(lists.doc("a"), Document::new())
            .delete(lists.doc("b"));
        assert_eq!(batch.len(), 2);
        assert_eq!(batch.ops()[0].path(), &lists.doc("a"));
        assert_eq!(batch.ops()[1], WriteOp::Delete { path: lists.doc("b") });
    }

    #[test]
    fn test_unsubscribe_runs_release_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let handle = Unsubscribe::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        handle.unsubscribe();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
