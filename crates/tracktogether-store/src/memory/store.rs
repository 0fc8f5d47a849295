//! In-memory document store with atomic batches and live queries.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info};

use tracktogether_core::error::AppError;
use tracktogether_core::result::AppResult;
use tracktogether_core::traits::{DocumentStore, Subscription, Unsubscribe, WriteBatch, WriteOp};
use tracktogether_core::types::{
    CollectionPath, Document, DocumentPath, DocumentSnapshot, FieldFilter,
};

use super::subscription::{ListenerRegistry, run_query};

#[derive(Debug, Default)]
struct Inner {
    docs: RwLock<BTreeMap<DocumentPath, Document>>,
    listeners: ListenerRegistry,
    offline: AtomicBool,
    snapshot_path: Option<PathBuf>,
}

/// Document store held in process memory.
///
/// Batches are validated against a staged copy of the touched documents
/// before anything is applied, so a failing batch leaves no trace.
/// Concurrent batches are serialized by a single write lock; there is no
/// isolation beyond that, so two read-modify-write sequences on the same
/// document resolve as last-write-wins.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocumentStore {
    inner: Arc<Inner>,
}

impl MemoryDocumentStore {
    /// Create an empty, purely in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a store backed by a JSON snapshot file. A missing file yields
    /// an empty store; [`flush`](Self::flush) writes it back.
    pub async fn open(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref().to_path_buf();
        let docs: BTreeMap<DocumentPath, Document> = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        info!(path = %path.display(), documents = docs.len(), "Document store opened");

        Ok(Self {
            inner: Arc::new(Inner {
                docs: RwLock::new(docs),
                snapshot_path: Some(path),
                ..Inner::default()
            }),
        })
    }

    /// Persist all documents to the snapshot file, if one is configured.
    pub async fn flush(&self) -> AppResult<()> {
        let Some(path) = &self.inner.snapshot_path else {
            return Ok(());
        };
        let bytes = {
            let docs = self.inner.docs.read().await;
            serde_json::to_vec_pretty(&*docs)?
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, bytes).await?;
        debug!(path = %path.display(), "Document store flushed");
        Ok(())
    }

    /// Simulate losing connectivity. While offline every call fails with a
    /// transient error.
    pub fn set_offline(&self, offline: bool) {
        self.inner.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of live subscriptions.
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.len()
    }

    /// Total number of stored documents.
    pub async fn document_count(&self) -> usize {
        self.inner.docs.read().await.len()
    }

    fn ensure_online(&self) -> AppResult<()> {
        if self.inner.offline.load(Ordering::SeqCst) {
            return Err(AppError::transient("Document store is unreachable"));
        }
        Ok(())
    }
}

/// Replay `ops` over the current documents without touching them.
///
/// Returns the final state of every touched path (`None` = deleted).
fn stage(
    docs: &BTreeMap<DocumentPath, Document>,
    ops: Vec<WriteOp>,
) -> AppResult<HashMap<DocumentPath, Option<Document>>> {
    let mut staged: HashMap<DocumentPath, Option<Document>> = HashMap::new();

    for op in ops {
        match op {
            WriteOp::Set { path, data } => {
                staged.insert(path, Some(data));
            }
            WriteOp::Update { path, fields } => {
                let current = match staged.get(&path) {
                    Some(state) => state.clone(),
                    None => docs.get(&path).cloned(),
                };
                let Some(mut doc) = current else {
                    return Err(AppError::not_found(format!(
                        "Cannot update missing document {path}"
                    )));
                };
                doc.extend(fields);
                staged.insert(path, Some(doc));
            }
            WriteOp::Delete { path } => {
                staged.insert(path, None);
            }
        }
    }

    Ok(staged)
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn get(&self, path: &DocumentPath) -> AppResult<Option<DocumentSnapshot>> {
        self.ensure_online()?;
        let docs = self.inner.docs.read().await;
        Ok(docs
            .get(path)
            .map(|data| DocumentSnapshot::new(path.clone(), data.clone())))
    }

    async fn query(
        &self,
        collection: &CollectionPath,
        filters: &[FieldFilter],
    ) -> AppResult<Vec<DocumentSnapshot>> {
        self.ensure_online()?;
        let docs = self.inner.docs.read().await;
        Ok(run_query(&docs, collection, filters))
    }

    async fn subscribe(
        &self,
        collection: &CollectionPath,
        filters: Vec<FieldFilter>,
    ) -> AppResult<Subscription> {
        self.ensure_online()?;
        // Register under the read guard: a commit must either be part of
        // the initial result or reach the listener through `notify`.
        let (id, snapshots) = {
            let docs = self.inner.docs.read().await;
            let initial = run_query(&docs, collection, &filters);
            self.inner
                .listeners
                .register(collection.clone(), filters, initial)
        };

        let inner = Arc::clone(&self.inner);
        let unsubscribe = Unsubscribe::new(move || {
            inner.listeners.remove(id);
        });

        Ok(Subscription {
            unsubscribe,
            snapshots,
        })
    }

    async fn commit(&self, batch: WriteBatch) -> AppResult<()> {
        self.ensure_online()?;
        if batch.is_empty() {
            return Ok(());
        }
        let op_count = batch.len();

        let mut docs = self.inner.docs.write().await;
        let staged = stage(&docs, batch.into_ops())?;

        let changed: Vec<DocumentPath> = staged.keys().cloned().collect();
        for (path, state) in staged {
            match state {
                Some(doc) => {
                    docs.insert(path, doc);
                }
                None => {
                    docs.remove(&path);
                }
            }
        }

        self.inner.listeners.notify(&docs, &changed);
        debug!(ops = op_count, documents = changed.len(), "Batch committed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use futures::StreamExt;
    use serde_json::json;

    use super::*;
    use tracktogether_core::ErrorKind;

    fn doc(value: serde_json::Value) -> Document {
        match value {
            serde_json::Value::Object(map) => map,
            _ => Document::new(),
        }
    }

    fn lists() -> CollectionPath {
        CollectionPath::root("lists")
    }

    #[tokio::test]
    async fn test_set_get_delete() {
        let store = MemoryDocumentStore::new();
        let path = lists().doc("l1");
        store
            .set(&path, doc(json!({"name": "Watchlist"})))
            .await
            .unwrap();

        let snap = store.get(&path).await.unwrap().expect("document exists");
        assert_eq!(snap.id(), "l1");
        assert_eq!(snap.data["name"], "Watchlist");

        store.delete(&path).await.unwrap();
        assert!(store.get(&path).await.unwrap().is_none());
        store.delete(&path).await.expect("deleting twice is fine");
    }

    #[tokio::test]
    async fn test_update_merges_fields() {
        let store = MemoryDocumentStore::new();
        let path = lists().doc("l1");
        store
            .set(&path, doc(json!({"name": "A", "ownerId": "u1"})))
            .await
            .unwrap();
        store
            .update(&path, doc(json!({"name": "B"})))
            .await
            .unwrap();
        let snap = store.get(&path).await.unwrap().unwrap();
        assert_eq!(snap.data["name"], "B");
        assert_eq!(snap.data["ownerId"], "u1");
    }

    #[tokio::test]
    async fn test_update_missing_document_fails() {
        let store = MemoryDocumentStore::new();
        let err = store
            .update(&lists().doc("nope"), doc(json!({"name": "B"})))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_failed_batch_applies_nothing() {
        let store = MemoryDocumentStore::new();
        let mut batch = store.batch();
        batch
            .set(lists().doc("l1"), doc(json!({"name": "A"})))
            .update(lists().doc("missing"), doc(json!({"name": "B"})));
        assert!(store.commit(batch).await.is_err());
        assert!(store.get(&lists().doc("l1")).await.unwrap().is_none());
        assert_eq!(store.document_count().await, 0);
    }

    #[tokio::test]
    async fn test_update_after_set_in_same_batch() {
        let store = MemoryDocumentStore::new();
        let path = lists().doc("l1");
        let mut batch = store.batch();
        batch
            .set(path.clone(), doc(json!({"name": "A"})))
            .update(path.clone(), doc(json!({"status": "x"})));
        store.commit(batch).await.unwrap();
        let snap = store.get(&path).await.unwrap().unwrap();
        assert_eq!(snap.data["name"], "A");
        assert_eq!(snap.data["status"], "x");
    }

    #[tokio::test]
    async fn test_query_only_direct_children_matching_filters() {
        let store = MemoryDocumentStore::new();
        let inbox = CollectionPath::root("users").doc("u2").collection("invitations");
        store
            .set(&inbox.doc("a"), doc(json!({"status": "pending"})))
            .await
            .unwrap();
        store
            .set(&inbox.doc("b"), doc(json!({"status": "declined"})))
            .await
            .unwrap();
        store
            .set(
                &CollectionPath::root("users").doc("u2"),
                doc(json!({"email": "u2@x.com"})),
            )
            .await
            .unwrap();

        let pending = store
            .query(&inbox, &[FieldFilter::eq("status", "pending")])
            .await
            .unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id(), "a");
        assert_eq!(store.query(&inbox, &[]).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_offline_is_transient() {
        let store = MemoryDocumentStore::new();
        store.set_offline(true);
        let err = store.get(&lists().doc("l1")).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Transient);
        assert!(err.is_retryable());
        store.set_offline(false);
        assert!(store.get(&lists().doc("l1")).await.is_ok());
    }

    #[tokio::test]
    async fn test_subscription_pushes_changes_until_released() {
        let store = MemoryDocumentStore::new();
        let inbox = CollectionPath::root("users").doc("u2").collection("invitations");
        let (unsubscribe, mut snapshots) = store
            .subscribe(&inbox, vec![FieldFilter::eq("status", "pending")])
            .await
            .unwrap()
            .into_parts();
        assert_eq!(store.listener_count(), 1);

        assert!(snapshots.next().await.expect("initial snapshot").is_empty());

        store
            .set(&inbox.doc("a"), doc(json!({"status": "pending"})))
            .await
            .unwrap();
        assert_eq!(snapshots.next().await.expect("change").len(), 1);

        store
            .update(&inbox.doc("a"), doc(json!({"status": "accepted"})))
            .await
            .unwrap();
        assert!(snapshots.next().await.expect("change").is_empty());

        unsubscribe.unsubscribe();
        assert_eq!(store.listener_count(), 0);
        assert!(snapshots.next().await.is_none());
    }

    #[tokio::test]
    async fn test_unrelated_writes_do_not_wake_listener() {
        let store = MemoryDocumentStore::new();
        let inbox = CollectionPath::root("users").doc("u2").collection("invitations");
        let (unsubscribe, mut snapshots) = store
            .subscribe(&inbox, Vec::new())
            .await
            .unwrap()
            .into_parts();
        snapshots.next().await.expect("initial snapshot");

        store
            .set(&lists().doc("l1"), doc(json!({"name": "A"})))
            .await
            .unwrap();
        store
            .set(&inbox.doc("a"), doc(json!({"status": "pending"})))
            .await
            .unwrap();

        let next = snapshots.next().await.expect("change");
        assert_eq!(next.len(), 1);
        unsubscribe.unsubscribe();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_subscribe_racing_a_write_sees_it() {
        let store = MemoryDocumentStore::new();

        for round in 0..200 {
            let inbox = CollectionPath::root("users")
                .doc(format!("u{round}"))
                .collection("invitations");
            let writer = {
                let store = store.clone();
                let path = inbox.doc("a");
                tokio::spawn(async move {
                    store.set(&path, doc(json!({"status": "pending"}))).await
                })
            };

            let (unsubscribe, mut snapshots) = store
                .subscribe(&inbox, Vec::new())
                .await
                .unwrap()
                .into_parts();
            writer.await.unwrap().unwrap();

            let mut seen = snapshots.next().await.expect("initial snapshot");
            if seen.is_empty() {
                seen = tokio::time::timeout(Duration::from_secs(1), snapshots.next())
                    .await
                    .unwrap_or_else(|_| panic!("round {round}: write never delivered"))
                    .expect("change");
            }
            assert_eq!(seen.len(), 1, "round {round}");
            unsubscribe.unsubscribe();
        }
        assert_eq!(store.listener_count(), 0);
    }

    #[tokio::test]
    async fn test_snapshot_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("nested").join("store.json");

        let store = MemoryDocumentStore::open(&file).await.unwrap();
        store
            .set(&lists().doc("l1"), doc(json!({"name": "Watchlist"})))
            .await
            .unwrap();
        store.flush().await.unwrap();

        let reopened = MemoryDocumentStore::open(&file).await.unwrap();
        let snap = reopened.get(&lists().doc("l1")).await.unwrap().unwrap();
        assert_eq!(snap.data["name"], "Watchlist");
    }
}
