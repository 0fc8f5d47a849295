//! The acting user passed into every service call.

use chrono::{DateTime, Utc};

use tracktogether_core::types::UserId;
use tracktogether_entity::User;

/// Who is performing an operation.
#[derive(Debug, Clone)]
pub struct ActorContext {
    /// The acting user's id.
    pub user_id: UserId,
    /// The acting user's email.
    pub email: String,
    /// When the operation started.
    pub request_time: DateTime<Utc>,
}

impl ActorContext {
    /// Context for `user`, stamped now.
    pub fn new(user: &User) -> Self {
        Self {
            user_id: user.id,
            email: user.email.clone(),
            request_time: Utc::now(),
        }
    }

    /// The acting user as an entity.
    pub fn user(&self) -> User {
        User::new(self.user_id, self.email.clone())
    }
}

impl From<&User> for ActorContext {
    fn from(user: &User) -> Self {
        Self::new(user)
    }
}
