//! Password-based identity provider backed by the document store.
//!
//! Credentials live at `credentials/{userId}` and never leave this module.
//! The signed-in user of the device is kept in memory and mirrored to
//! `device/session` so it survives a restart of the process.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{info, warn};

use tracktogether_core::config::AuthConfig;
use tracktogether_core::error::AppError;
use tracktogether_core::result::AppResult;
use tracktogether_core::traits::DocumentStore;
use tracktogether_core::types::{CollectionPath, DocumentPath, FieldFilter, UserId, encode};
use tracktogether_entity::User;
use tracktogether_store::UserDirectory;

use crate::password::{PasswordHasher, PasswordPolicy};
use crate::provider::IdentityProvider;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Credential {
    user_id: UserId,
    email: String,
    password_hash: String,
}

/// Identity provider that keeps Argon2id credentials next to the data.
#[derive(Debug, Clone)]
pub struct LocalIdentityProvider {
    store: Arc<dyn DocumentStore>,
    users: UserDirectory,
    hasher: PasswordHasher,
    policy: PasswordPolicy,
    session: Arc<RwLock<Option<User>>>,
}

impl LocalIdentityProvider {
    /// Creates a provider with no signed-in user.
    ///
    /// Fails when the configured Argon2 costs are out of range.
    pub fn new(store: Arc<dyn DocumentStore>, config: &AuthConfig) -> AppResult<Self> {
        Ok(Self {
            users: UserDirectory::new(Arc::clone(&store)),
            store,
            hasher: PasswordHasher::new(config)?,
            policy: PasswordPolicy::new(config),
            session: Arc::new(RwLock::new(None)),
        })
    }

    /// Creates a provider and restores the persisted session, if any.
    pub async fn restore(store: Arc<dyn DocumentStore>, config: &AuthConfig) -> AppResult<Self> {
        let provider = Self::new(store, config)?;
        if let Some(snap) = provider.store.get(&Self::session_path()).await? {
            match snap.decode::<User>() {
                Ok(user) => *provider.session.write().await = Some(user),
                Err(e) => warn!(error = %e, "Discarding unreadable session"),
            }
        }
        Ok(provider)
    }

    fn credentials() -> CollectionPath {
        CollectionPath::root("credentials")
    }

    fn session_path() -> DocumentPath {
        CollectionPath::root("device").doc("session")
    }

    async fn find_credential(&self, email: &str) -> AppResult<Option<Credential>> {
        let snaps = self
            .store
            .query(&Self::credentials(), &[FieldFilter::eq("email", email)])
            .await?;
        snaps.first().map(|snap| snap.decode()).transpose()
    }

    async fn start_session(&self, user: &User) -> AppResult<()> {
        self.store.set(&Self::session_path(), encode(user)?).await?;
        *self.session.write().await = Some(user.clone());
        Ok(())
    }
}

#[async_trait]
impl IdentityProvider for LocalIdentityProvider {
    async fn current_user(&self) -> Option<User> {
        self.session.read().await.clone()
    }

    async fn register(&self, email: &str, password: &str) -> AppResult<User> {
        let email = email.trim();
        self.policy.validate_email(email)?;
        self.policy.validate_password(password)?;

        if self.find_credential(email).await?.is_some() {
            return Err(AppError::conflict(format!(
                "An account already exists for '{email}'"
            )));
        }

        let user = User::new(UserId::new(), email);
        let credential = Credential {
            user_id: user.id,
            email: user.email.clone(),
            password_hash: self.hasher.hash_password(password)?,
        };

        let mut batch = self.store.batch();
        batch
            .set(Self::credentials().doc(user.id), encode(&credential)?)
            .set(UserDirectory::path(user.id), encode(&user)?);
        self.store.commit(batch).await?;

        self.start_session(&user).await?;
        info!(user_id = %user.id, email = %user.email, "User registered");
        Ok(user)
    }

    async fn login(&self, email: &str, password: &str) -> AppResult<User> {
        let email = email.trim();
        let credential = self
            .find_credential(email)
            .await?
            .ok_or_else(|| AppError::authentication("Invalid email or password"))?;

        if !self
            .hasher
            .verify_password(password, &credential.password_hash)?
        {
            warn!(email, "Login failed: wrong password");
            return Err(AppError::authentication("Invalid email or password"));
        }

        let user = match self.users.find_by_id(credential.user_id).await? {
            Some(user) => user,
            None => {
                let user = User::new(credential.user_id, credential.email);
                self.users.upsert(&user).await?;
                user
            }
        };

        self.start_session(&user).await?;
        info!(user_id = %user.id, "User logged in");
        Ok(user)
    }

    async fn logout(&self) -> AppResult<()> {
        self.store.delete(&Self::session_path()).await?;
        if let Some(user) = self.session.write().await.take() {
            info!(user_id = %user.id, "User logged out");
        }
        Ok(())
    }
}
