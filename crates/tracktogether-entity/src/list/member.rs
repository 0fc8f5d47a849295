//! Membership entries stored in a list's `sharedWith` array.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tracktogether_core::error::AppError;
use tracktogether_core::types::UserId;

/// Membership state of one user on one list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    /// Invited, not yet answered.
    Pending,
    /// Full member.
    Accepted,
}

/// One `{userId, email, status, addedAt, acceptedAt}` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedWithEntry {
    /// The member.
    pub user_id: UserId,
    /// The member's email at the time of the invite.
    pub email: String,
    /// Current membership state.
    pub status: MemberStatus,
    /// When the entry was added.
    pub added_at: DateTime<Utc>,
    /// When the invite was accepted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accepted_at: Option<DateTime<Utc>>,
}

impl SharedWithEntry {
    /// The implicit owner entry, accepted from the start.
    pub fn owner(user_id: UserId, email: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            email: email.into(),
            status: MemberStatus::Accepted,
            added_at: now,
            accepted_at: Some(now),
        }
    }

    /// A freshly invited member.
    pub fn pending(user_id: UserId, email: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            email: email.into(),
            status: MemberStatus::Pending,
            added_at: now,
            accepted_at: None,
        }
    }

    /// Transition pending → accepted.
    pub fn accept(&mut self, at: DateTime<Utc>) -> Result<(), AppError> {
        if self.status != MemberStatus::Pending {
            return Err(AppError::state(format!(
                "Membership of {} is already accepted",
                self.user_id
            )));
        }
        self.status = MemberStatus::Accepted;
        self.accepted_at = Some(at);
        Ok(())
    }

    /// Whether the member has accepted.
    pub fn is_accepted(&self) -> bool {
        self.status == MemberStatus::Accepted
    }
}
