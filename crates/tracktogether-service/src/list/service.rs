//! List CRUD service.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::watch;
use tracing::{debug, info};

use tracktogether_core::error::AppError;
use tracktogether_core::result::AppResult;
use tracktogether_core::traits::DocumentStore;
use tracktogether_core::types::{ItemId, ListId};
use tracktogether_entity::{Item, NewItem, TrackedList};
use tracktogether_store::{ItemRepository, ListRepository};

use super::cache::{ListCache, ListSnapshot};
use crate::context::ActorContext;
use crate::failure::store_failure;

/// Manages lists and the items inside them.
#[derive(Debug, Clone)]
pub struct ListService {
    /// List repository.
    lists: ListRepository,
    /// Item repository.
    items: ItemRepository,
    /// Optimistic per-user state.
    cache: Arc<ListCache>,
}

impl ListService {
    /// Creates a list service sharing `cache` with other services.
    pub fn new(store: Arc<dyn DocumentStore>, cache: Arc<ListCache>) -> Self {
        Self {
            lists: ListRepository::new(Arc::clone(&store)),
            items: ItemRepository::new(store),
            cache,
        }
    }

    /// The shared list cache.
    pub fn cache(&self) -> Arc<ListCache> {
        Arc::clone(&self.cache)
    }

    /// Creates a list owned by the actor.
    pub async fn create_list(&self, ctx: &ActorContext, name: &str) -> AppResult<ListId> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("List name must not be empty"));
        }

        let list = TrackedList::new(&ctx.user(), name);
        self.lists
            .create(&list)
            .await
            .map_err(store_failure("create list"))?;

        info!(user_id = %ctx.user_id, list_id = %list.id, name, "List created");
        let list_id = list.id;
        self.cache.upsert(ctx.user_id, list);
        Ok(list_id)
    }

    /// Lists the actor is an accepted member of, refreshing the cache.
    pub async fn list_for(&self, ctx: &ActorContext) -> AppResult<Vec<TrackedList>> {
        self.cache.begin_load(ctx.user_id);
        let lists = match self.lists.find_for_member(ctx.user_id).await {
            Ok(lists) => lists,
            Err(e) => {
                let current = self.cache.snapshot(ctx.user_id).lists;
                self.cache.replace(ctx.user_id, current);
                return Err(store_failure("load lists")(e));
            }
        };
        self.cache.replace(ctx.user_id, lists.clone());
        Ok(lists)
    }

    /// Observe the actor's lists. The first value is whatever is cached.
    pub fn watch_lists(&self, ctx: &ActorContext) -> watch::Receiver<ListSnapshot> {
        self.cache.watch(ctx.user_id)
    }

    /// Loads one list the actor is a member of.
    pub async fn get_list(&self, ctx: &ActorContext, list_id: ListId) -> AppResult<TrackedList> {
        let list = self
            .lists
            .find_by_id(list_id)
            .await
            .map_err(store_failure("load list"))?
            .ok_or_else(|| AppError::not_found(format!("List {list_id} not found")))?;

        if !list.is_member(ctx.user_id) {
            return Err(AppError::authorization(
                "You are not a member of this list",
            ));
        }
        Ok(list)
    }

    /// Deletes a list document. Any accepted member may delete; items
    /// under the list are left in place.
    pub async fn delete_list(&self, ctx: &ActorContext, list_id: ListId) -> AppResult<()> {
        let list = self.get_list(ctx, list_id).await?;

        self.lists
            .delete(list_id)
            .await
            .map_err(store_failure("delete list"))?;

        info!(user_id = %ctx.user_id, list_id = %list_id, "List deleted");
        self.cache.remove_for_members(&list);
        Ok(())
    }

    /// Adds an item to a list. Membership is not checked.
    pub async fn add_item(
        &self,
        ctx: &ActorContext,
        list_id: ListId,
        item: NewItem,
    ) -> AppResult<ItemId> {
        let item = item.into_item(Utc::now())?;

        let exists = self
            .lists
            .find_by_id(list_id)
            .await
            .map_err(store_failure("load list"))?
            .is_some();
        if !exists {
            return Err(AppError::not_found(format!("List {list_id} not found")));
        }

        self.items
            .create(list_id, &item)
            .await
            .map_err(store_failure("add item"))?;

        info!(
            user_id = %ctx.user_id,
            list_id = %list_id,
            item_id = %item.id,
            kind = %item.kind(),
            "Item added"
        );
        Ok(item.id)
    }

    /// Items of a list, oldest first.
    pub async fn items_for(&self, list_id: ListId) -> AppResult<Vec<Item>> {
        let items = self
            .items
            .find_by_list(list_id)
            .await
            .map_err(store_failure("load items"))?;
        debug!(list_id = %list_id, count = items.len(), "Items loaded");
        Ok(items)
    }
}
