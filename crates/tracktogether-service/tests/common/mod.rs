//! Shared fixtures for service integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use tracktogether_core::traits::DocumentStore;
use tracktogether_core::types::UserId;
use tracktogether_entity::User;
use tracktogether_service::{ActorContext, InvitationService, ListCache, ListService};
use tracktogether_store::{MemoryDocumentStore, UserDirectory};

/// Services wired over one in-memory store.
pub struct Harness {
    pub store: MemoryDocumentStore,
    pub lists: ListService,
    pub invitations: InvitationService,
}

impl Harness {
    pub fn new() -> Self {
        let store = MemoryDocumentStore::new();
        let shared: Arc<dyn DocumentStore> = Arc::new(store.clone());
        let cache = Arc::new(ListCache::new());
        Self {
            lists: ListService::new(Arc::clone(&shared), Arc::clone(&cache)),
            invitations: InvitationService::new(shared, cache),
            store,
        }
    }

    pub fn shared_store(&self) -> Arc<dyn DocumentStore> {
        Arc::new(self.store.clone())
    }

    /// Registers a profile directly, skipping password hashing.
    pub async fn user(&self, email: &str) -> ActorContext {
        let user = User::new(UserId::new(), email);
        UserDirectory::new(self.shared_store())
            .upsert(&user)
            .await
            .unwrap();
        ActorContext::new(&user)
    }
}
