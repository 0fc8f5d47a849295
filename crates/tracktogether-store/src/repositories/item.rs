//! Item repository.

use std::sync::Arc;

use tracktogether_core::result::AppResult;
use tracktogether_core::traits::DocumentStore;
use tracktogether_core::types::{CollectionPath, ListId, encode};
use tracktogether_entity::Item;

use super::decode_all;
use super::list::ListRepository;

/// Repository for the `lists/{list}/items` sub-collection.
#[derive(Debug, Clone)]
pub struct ItemRepository {
    store: Arc<dyn DocumentStore>,
}

impl ItemRepository {
    /// Create a repository over `store`.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Items collection of one list.
    pub fn collection(list_id: ListId) -> CollectionPath {
        ListRepository::path(list_id).collection("items")
    }

    /// Persist an item under a list.
    pub async fn create(&self, list_id: ListId, item: &Item) -> AppResult<()> {
        self.store
            .set(&Self::collection(list_id).doc(item.id), encode(item)?)
            .await
    }

    /// Items of a list, oldest first.
    pub async fn find_by_list(&self, list_id: ListId) -> AppResult<Vec<Item>> {
        let snaps = self.store.query(&Self::collection(list_id), &[]).await?;
        let mut items: Vec<Item> = decode_all(&snaps)?;
        items.sort_by_key(|i| i.created_at);
        Ok(items)
    }
}
