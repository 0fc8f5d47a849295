//! Tracked list entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tracktogether_core::types::{ListId, UserId};

use super::member::SharedWithEntry;
use crate::user::User;

/// Name used when a list has no usable name.
pub const FALLBACK_LIST_NAME: &str = "Shared List";

/// A user-curated list, stored as the single document `lists/{id}`.
///
/// `shared_with` is the membership record: the owner is its first entry
/// and every invited user appears at most once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedList {
    /// Unique list identifier.
    pub id: ListId,
    /// Display name (trimmed).
    pub name: String,
    /// The user who created the list.
    pub owner_id: UserId,
    /// When the list was created.
    pub created_at: DateTime<Utc>,
    /// Members in insertion order.
    #[serde(default)]
    pub shared_with: Vec<SharedWithEntry>,
}

impl TrackedList {
    /// Create a list owned by `owner`, who becomes its first accepted member.
    pub fn new(owner: &User, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: ListId::new(),
            name: name.into(),
            owner_id: owner.id,
            created_at: now,
            shared_with: vec![SharedWithEntry::owner(owner.id, owner.email.clone(), now)],
        }
    }

    /// The membership entry for `user_id`, in any state.
    pub fn entry_for(&self, user_id: UserId) -> Option<&SharedWithEntry> {
        self.shared_with.iter().find(|e| e.user_id == user_id)
    }

    /// Mutable access to the membership entry for `user_id`.
    pub fn entry_for_mut(&mut self, user_id: UserId) -> Option<&mut SharedWithEntry> {
        self.shared_with.iter_mut().find(|e| e.user_id == user_id)
    }

    /// Whether `user_id` is an accepted member. The owner always is.
    pub fn is_member(&self, user_id: UserId) -> bool {
        user_id == self.owner_id || self.entry_for(user_id).is_some_and(|e| e.is_accepted())
    }

    /// Every accepted member, owner first.
    pub fn member_ids(&self) -> Vec<UserId> {
        let mut ids = vec![self.owner_id];
        for entry in self.shared_with.iter().filter(|e| e.is_accepted()) {
            if !ids.contains(&entry.user_id) {
                ids.push(entry.user_id);
            }
        }
        ids
    }

    /// Drop the entry for `user_id`. Returns whether one was removed.
    pub fn remove_entry(&mut self, user_id: UserId) -> bool {
        let before = self.shared_with.len();
        self.shared_with.retain(|e| e.user_id != user_id);
        before != self.shared_with.len()
    }

    /// Name to show in invitations.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            FALLBACK_LIST_NAME
        } else {
            &self.name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_is_first_accepted_member() {
        let owner = User::new(UserId::new(), "u1@x.com");
        let list = TrackedList::new(&owner, "Watchlist");
        assert_eq!(list.shared_with.len(), 1);
        assert!(list.shared_with[0].is_accepted());
        assert!(list.is_member(owner.id));
        assert!(!list.is_member(UserId::new()));
    }

    #[test]
    fn test_pending_entry_is_not_membership() {
        let owner = User::new(UserId::new(), "u1@x.com");
        let guest = UserId::new();
        let mut list = TrackedList::new(&owner, "Watchlist");
        list.shared_with
            .push(SharedWithEntry::pending(guest, "u2@x.com", Utc::now()));
        assert!(list.entry_for(guest).is_some());
        assert!(!list.is_member(guest));
        assert_eq!(list.member_ids(), vec![owner.id]);
        assert!(list.remove_entry(guest));
        assert!(!list.remove_entry(guest));
    }

    #[test]
    fn test_member_ids_list_owner_once() {
        let owner = User::new(UserId::new(), "u1@x.com");
        let guest = UserId::new();
        let mut list = TrackedList::new(&owner, "Watchlist");
        let mut entry = SharedWithEntry::pending(guest, "u2@x.com", Utc::now());
        entry.accept(Utc::now()).unwrap();
        list.shared_with.push(entry);
        assert_eq!(list.member_ids(), vec![owner.id, guest]);
    }

    #[test]
    fn test_display_name_fallback() {
        let owner = User::new(UserId::new(), "u1@x.com");
        let list = TrackedList::new(&owner, "  ");
        assert_eq!(list.display_name(), FALLBACK_LIST_NAME);
    }
}
