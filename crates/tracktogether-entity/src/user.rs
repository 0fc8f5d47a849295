//! User entity model.

use serde::{Deserialize, Serialize};

use tracktogether_core::types::UserId;

/// An authenticated user as issued by the identity provider.
///
/// Stored as the profile document `users/{id}` so other users can find
/// it by exact email match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Stable user identifier.
    pub id: UserId,
    /// Login email address.
    pub email: String,
}

impl User {
    /// Create a user value.
    pub fn new(id: UserId, email: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
        }
    }
}
