//! List repository.

use std::sync::Arc;

use tracing::{debug, warn};

use tracktogether_core::result::AppResult;
use tracktogether_core::traits::DocumentStore;
use tracktogether_core::types::{CollectionPath, Document, DocumentPath, ListId, UserId, encode};
use tracktogether_entity::TrackedList;

/// Repository for list documents in the flat `lists` collection.
#[derive(Debug, Clone)]
pub struct ListRepository {
    store: Arc<dyn DocumentStore>,
}

impl ListRepository {
    /// Create a repository over `store`.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// The `lists` collection.
    pub fn collection() -> CollectionPath {
        CollectionPath::root("lists")
    }

    /// Path of one list document.
    pub fn path(list_id: ListId) -> DocumentPath {
        Self::collection().doc(list_id)
    }

    /// Fields to merge when only the membership array changed.
    pub fn shared_with_fields(list: &TrackedList) -> AppResult<Document> {
        let mut fields = Document::new();
        fields.insert(
            "sharedWith".to_string(),
            serde_json::to_value(&list.shared_with)?,
        );
        Ok(fields)
    }

    /// Find a list by id.
    pub async fn find_by_id(&self, list_id: ListId) -> AppResult<Option<TrackedList>> {
        self.store
            .get(&Self::path(list_id))
            .await?
            .map(|snap| snap.decode())
            .transpose()
    }

    /// Persist a new list.
    pub async fn create(&self, list: &TrackedList) -> AppResult<()> {
        self.store.set(&Self::path(list.id), encode(list)?).await
    }

    /// Lists on which `user_id` is an accepted member, oldest first.
    ///
    /// The store has no array-contains filter, so this scans the collection.
    /// Documents that do not decode as a list are logged and skipped.
    pub async fn find_for_member(&self, user_id: UserId) -> AppResult<Vec<TrackedList>> {
        let snaps = self.store.query(&Self::collection(), &[]).await?;
        let mut lists: Vec<TrackedList> = snaps
            .iter()
            .filter_map(|snap| match snap.decode::<TrackedList>() {
                Ok(list) => Some(list),
                Err(e) => {
                    warn!(path = %snap.path, error = %e, "Skipping malformed list");
                    None
                }
            })
            .filter(|list| list.is_member(user_id))
            .collect();
        lists.sort_by_key(|l| l.created_at);
        debug!(user_id = %user_id, scanned = snaps.len(), found = lists.len(), "Lists for member");
        Ok(lists)
    }

    /// Delete the list document only; sub-collections are left in place.
    pub async fn delete(&self, list_id: ListId) -> AppResult<()> {
        self.store.delete(&Self::path(list_id)).await
    }
}
