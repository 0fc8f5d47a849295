//! Identity provider trait.

use async_trait::async_trait;

use tracktogether_core::result::AppResult;
use tracktogether_entity::User;

/// Issues stable user ids and tracks the signed-in user of this device.
#[async_trait]
pub trait IdentityProvider: Send + Sync + std::fmt::Debug + 'static {
    /// The signed-in user, if any.
    async fn current_user(&self) -> Option<User>;

    /// Create an account and sign it in.
    async fn register(&self, email: &str, password: &str) -> AppResult<User>;

    /// Sign in with existing credentials.
    async fn login(&self, email: &str, password: &str) -> AppResult<User>;

    /// Sign out.
    async fn logout(&self) -> AppResult<()>;
}
