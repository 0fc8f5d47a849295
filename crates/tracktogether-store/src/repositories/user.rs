//! User profile directory.

use std::sync::Arc;

use tracing::debug;

use tracktogether_core::result::AppResult;
use tracktogether_core::traits::DocumentStore;
use tracktogether_core::types::{CollectionPath, DocumentPath, FieldFilter, UserId, encode};
use tracktogether_entity::User;

/// Lookup of user profiles written at registration.
#[derive(Debug, Clone)]
pub struct UserDirectory {
    store: Arc<dyn DocumentStore>,
}

impl UserDirectory {
    /// Create a directory over `store`.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// The `users` collection.
    pub fn collection() -> CollectionPath {
        CollectionPath::root("users")
    }

    /// Path of one profile document.
    pub fn path(user_id: UserId) -> DocumentPath {
        Self::collection().doc(user_id)
    }

    /// Write (or overwrite) a profile.
    pub async fn upsert(&self, user: &User) -> AppResult<()> {
        self.store.set(&Self::path(user.id), encode(user)?).await
    }

    /// Find a profile by id.
    pub async fn find_by_id(&self, user_id: UserId) -> AppResult<Option<User>> {
        self.store
            .get(&Self::path(user_id))
            .await?
            .map(|snap| snap.decode())
            .transpose()
    }

    /// Find a profile by exact email match.
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let snaps = self
            .store
            .query(&Self::collection(), &[FieldFilter::eq("email", email)])
            .await?;
        debug!(email, matches = snaps.len(), "User lookup by email");
        snaps.first().map(|snap| snap.decode()).transpose()
    }
}
