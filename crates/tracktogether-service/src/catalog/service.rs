//! Catalog browsing service.

use std::sync::Arc;

use tracing::debug;

use tracktogether_catalog::CatalogClient;
use tracktogether_core::config::CatalogConfig;
use tracktogether_core::result::AppResult;
use tracktogether_core::types::{ItemId, ListId};
use tracktogether_entity::{CatalogEntry, MediaKind};

use crate::context::ActorContext;
use crate::list::ListService;

/// Searches the external catalogs and saves results into lists.
#[derive(Debug, Clone)]
pub struct CatalogService {
    /// External catalog.
    client: Arc<dyn CatalogClient>,
    /// Used to persist chosen entries.
    lists: ListService,
    /// Image shown for entries whose kind has no poster.
    placeholder_image: String,
}

impl CatalogService {
    /// Creates a catalog service.
    pub fn new(client: Arc<dyn CatalogClient>, lists: ListService, config: &CatalogConfig) -> Self {
        Self {
            client,
            lists,
            placeholder_image: config.placeholder_image.clone(),
        }
    }

    /// Free-text search. A blank query returns nothing without calling
    /// the catalog.
    pub async fn search(&self, kind: MediaKind, query: &str) -> AppResult<Vec<CatalogEntry>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        let entries = self.client.search(kind, query).await?;
        Ok(self.presentable(kind, entries))
    }

    /// The top-rated feed for `kind`.
    pub async fn top_rated(&self, kind: MediaKind) -> AppResult<Vec<CatalogEntry>> {
        let entries = self.client.top_rated(kind).await?;
        Ok(self.presentable(kind, entries))
    }

    /// Saves a catalog entry as an item of `list_id`.
    pub async fn add_to_list(
        &self,
        ctx: &ActorContext,
        list_id: ListId,
        entry: &CatalogEntry,
    ) -> AppResult<ItemId> {
        self.lists
            .add_item(ctx, list_id, entry.to_new_item())
            .await
    }

    fn presentable(&self, kind: MediaKind, entries: Vec<CatalogEntry>) -> Vec<CatalogEntry> {
        let received = entries.len();
        let entries: Vec<CatalogEntry> = if kind.has_poster() {
            entries
                .into_iter()
                .filter(|e| e.image_url.is_some())
                .collect()
        } else {
            entries
                .into_iter()
                .map(|mut e| {
                    if e.image_url.is_none() {
                        e.image_url = Some(self.placeholder_image.clone());
                    }
                    e
                })
                .collect()
        };
        debug!(kind = %kind, received, kept = entries.len(), "Catalog results");
        entries
    }
}
