//! Catalog client trait.

use async_trait::async_trait;

use tracktogether_core::result::AppResult;
use tracktogether_entity::{CatalogEntry, MediaKind};

/// Read-only search and listing over one of the external catalogs.
#[async_trait]
pub trait CatalogClient: Send + Sync + std::fmt::Debug + 'static {
    /// The top-rated (or, for games, popular) feed of `kind`.
    async fn top_rated(&self, kind: MediaKind) -> AppResult<Vec<CatalogEntry>>;

    /// Free-text search within `kind`.
    async fn search(&self, kind: MediaKind, text: &str) -> AppResult<Vec<CatalogEntry>>;
}
