//! Invitation entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tracktogether_core::error::AppError;
use tracktogether_core::types::{InvitationId, ListId, UserId};

use super::status::InvitationStatus;
use crate::list::TrackedList;
use crate::user::User;

/// An invitation to collaborate on a list.
///
/// Owned by the invitee and stored at `users/{invitee}/invitations/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invitation {
    /// Unique invitation identifier.
    pub id: InvitationId,
    /// The list being shared.
    pub list_id: ListId,
    /// List name at the time of the invite.
    pub list_name: String,
    /// The inviting user.
    pub invited_by: UserId,
    /// The inviting user's email.
    pub invited_by_email: String,
    /// Lifecycle state.
    pub status: InvitationStatus,
    /// When the invitation was sent.
    pub created_at: DateTime<Utc>,
    /// When it was accepted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accepted_at: Option<DateTime<Utc>>,
    /// When it was declined.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declined_at: Option<DateTime<Utc>>,
}

impl Invitation {
    /// A pending invitation from `inviter` for `list`.
    pub fn new(list: &TrackedList, inviter: &User, now: DateTime<Utc>) -> Self {
        Self {
            id: InvitationId::new(),
            list_id: list.id,
            list_name: list.display_name().to_string(),
            invited_by: inviter.id,
            invited_by_email: inviter.email.clone(),
            status: InvitationStatus::Pending,
            created_at: now,
            accepted_at: None,
            declined_at: None,
        }
    }

    /// Whether accept/decline are still legal.
    pub fn is_pending(&self) -> bool {
        self.status == InvitationStatus::Pending
    }

    /// Transition pending → accepted.
    pub fn accept(&mut self, at: DateTime<Utc>) -> Result<(), AppError> {
        self.ensure_pending()?;
        self.status = InvitationStatus::Accepted;
        self.accepted_at = Some(at);
        Ok(())
    }

    /// Transition pending → declined.
    pub fn decline(&mut self, at: DateTime<Utc>) -> Result<(), AppError> {
        self.ensure_pending()?;
        self.status = InvitationStatus::Declined;
        self.declined_at = Some(at);
        Ok(())
    }

    fn ensure_pending(&self) -> Result<(), AppError> {
        if self.status.is_terminal() {
            return Err(AppError::state(format!(
                "Invitation {} is already {}",
                self.id, self.status
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracktogether_core::ErrorKind;

    fn pending() -> Invitation {
        let owner = User::new(UserId::new(), "u1@x.com");
        let list = TrackedList::new(&owner, "Watchlist");
        Invitation::new(&list, &owner, Utc::now())
    }

    #[test]
    fn test_new_invitation_copies_list_and_inviter() {
        let inv = pending();
        assert!(inv.is_pending());
        assert_eq!(inv.list_name, "Watchlist");
        assert_eq!(inv.invited_by_email, "u1@x.com");
    }

    #[test]
    fn test_accept_is_terminal() {
        let mut inv = pending();
        inv.accept(Utc::now()).expect("pending accepts");
        assert_eq!(inv.status, InvitationStatus::Accepted);
        assert!(inv.accepted_at.is_some());
        assert_eq!(inv.accept(Utc::now()).unwrap_err().kind, ErrorKind::State);
        assert_eq!(inv.decline(Utc::now()).unwrap_err().kind, ErrorKind::State);
    }

    #[test]
    fn test_decline_is_terminal() {
        let mut inv = pending();
        inv.decline(Utc::now()).expect("pending declines");
        assert_eq!(inv.status, InvitationStatus::Declined);
        assert!(inv.declined_at.is_some());
        assert_eq!(inv.accept(Utc::now()).unwrap_err().kind, ErrorKind::State);
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_value(pending()).expect("serialize");
        assert_eq!(json["status"], InvitationStatus::Pending.as_str());
        assert!(json.get("listName").is_some());
        assert!(json.get("invitedByEmail").is_some());
    }
}
