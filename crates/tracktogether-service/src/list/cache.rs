//! Observable per-user list state.
//!
//! Each user gets one `watch` channel holding a [`ListSnapshot`]. Writes
//! made through this process update it immediately for every accepted
//! member of the touched list, before the next full reload from the store.

use dashmap::DashMap;
use serde::Serialize;
use tokio::sync::watch;
use tracing::debug;

use tracktogether_core::types::{ListId, UserId};
use tracktogether_entity::TrackedList;

/// What a user's list screen shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListSnapshot {
    /// A reload is in flight.
    pub loading: bool,
    /// Lists the user is an accepted member of.
    pub lists: Vec<TrackedList>,
}

impl Default for ListSnapshot {
    fn default() -> Self {
        Self {
            loading: true,
            lists: Vec::new(),
        }
    }
}

/// State container for every user seen by this process.
#[derive(Debug, Default)]
pub struct ListCache {
    states: DashMap<UserId, watch::Sender<ListSnapshot>>,
}

impl ListCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    fn modify(&self, user_id: UserId, f: impl FnOnce(&mut ListSnapshot) -> bool) {
        self.states
            .entry(user_id)
            .or_insert_with(|| watch::channel(ListSnapshot::default()).0)
            .send_if_modified(f);
    }

    /// Observe `user_id`'s lists.
    pub fn watch(&self, user_id: UserId) -> watch::Receiver<ListSnapshot> {
        self.states
            .entry(user_id)
            .or_insert_with(|| watch::channel(ListSnapshot::default()).0)
            .subscribe()
    }

    /// Current state for `user_id`.
    pub fn snapshot(&self, user_id: UserId) -> ListSnapshot {
        self.states
            .get(&user_id)
            .map(|tx| tx.borrow().clone())
            .unwrap_or_default()
    }

    /// Flag a reload as started.
    pub fn begin_load(&self, user_id: UserId) {
        self.modify(user_id, |s| !std::mem::replace(&mut s.loading, true));
    }

    /// Replace the lists with a fresh reload.
    pub fn replace(&self, user_id: UserId, lists: Vec<TrackedList>) {
        debug!(user_id = %user_id, count = lists.len(), "List cache reloaded");
        self.modify(user_id, |s| {
            s.loading = false;
            s.lists = lists;
            true
        });
    }

    /// Insert or refresh one list.
    pub fn upsert(&self, user_id: UserId, list: TrackedList) {
        self.modify(user_id, |s| {
            match s.lists.iter_mut().find(|l| l.id == list.id) {
                Some(existing) => *existing = list,
                None => s.lists.push(list),
            }
            true
        });
    }

    /// Refresh `list` for each of its accepted members.
    pub fn upsert_for_members(&self, list: &TrackedList) {
        for user_id in list.member_ids() {
            self.upsert(user_id, list.clone());
        }
    }

    /// Drop `list` from each of its accepted members.
    pub fn remove_for_members(&self, list: &TrackedList) {
        for user_id in list.member_ids() {
            self.remove(user_id, list.id);
        }
    }

    /// Drop one list.
    pub fn remove(&self, user_id: UserId, list_id: ListId) {
        self.modify(user_id, |s| {
            let before = s.lists.len();
            s.lists.retain(|l| l.id != list_id);
            before != s.lists.len()
        });
    }
}
