//! Wiring of the store, identity provider and services for one run.

use std::sync::Arc;

use tracing::debug;

use tracktogether_auth::{IdentityProvider, LocalIdentityProvider};
use tracktogether_catalog::HttpCatalogClient;
use tracktogether_core::config::AppConfig;
use tracktogether_core::error::AppError;
use tracktogether_core::result::AppResult;
use tracktogether_core::traits::DocumentStore;
use tracktogether_service::{ActorContext, CatalogService, InvitationService, ListCache, ListService};
use tracktogether_store::MemoryDocumentStore;

/// Everything a command needs.
#[derive(Debug)]
pub struct App {
    store: MemoryDocumentStore,
    pub auth: LocalIdentityProvider,
    pub lists: ListService,
    pub invitations: InvitationService,
    pub catalog: CatalogService,
}

impl App {
    /// Opens the configured store and builds the services over it.
    pub async fn open(config: &AppConfig) -> AppResult<Self> {
        let store = match &config.store.snapshot_path {
            Some(path) => MemoryDocumentStore::open(path).await?,
            None => MemoryDocumentStore::new(),
        };
        let shared: Arc<dyn DocumentStore> = Arc::new(store.clone());

        let auth = LocalIdentityProvider::restore(Arc::clone(&shared), &config.auth).await?;
        let cache = Arc::new(ListCache::new());
        let lists = ListService::new(Arc::clone(&shared), Arc::clone(&cache));
        let invitations = InvitationService::new(shared, cache);
        let client = HttpCatalogClient::new(config.catalog.clone())?;
        let catalog = CatalogService::new(Arc::new(client), lists.clone(), &config.catalog);

        Ok(Self {
            store,
            auth,
            lists,
            invitations,
            catalog,
        })
    }

    /// The signed-in user, or an authentication error.
    pub async fn actor(&self) -> AppResult<ActorContext> {
        let user = self
            .auth
            .current_user()
            .await
            .ok_or_else(|| AppError::authentication("Not signed in; run `tracktogether login`"))?;
        debug!(user_id = %user.id, "Acting user resolved");
        Ok(ActorContext::new(&user))
    }

    /// Writes the store back to its snapshot file.
    pub async fn close(&self) -> AppResult<()> {
        self.store.flush().await
    }
}
