//! Integration tests for the typed repositories over the in-memory store.

use std::sync::Arc;

use chrono::Utc;
use futures::StreamExt;
use serde_json::json;

use tracktogether_core::traits::DocumentStore;
use tracktogether_core::types::UserId;
use tracktogether_entity::{
    Invitation, InvitationStatus, MediaKind, NewItem, SharedWithEntry, TrackedList, User,
};
use tracktogether_store::{
    InvitationRepository, ItemRepository, ListRepository, MemoryDocumentStore, UserDirectory,
};

fn store() -> Arc<dyn DocumentStore> {
    Arc::new(MemoryDocumentStore::new())
}

#[tokio::test]
async fn test_user_lookup_by_exact_email() {
    let store = store();
    let users = UserDirectory::new(store);
    let user = User::new(UserId::new(), "u2@x.com");
    users.upsert(&user).await.unwrap();

    assert_eq!(users.find_by_email("u2@x.com").await.unwrap(), Some(user.clone()));
    assert_eq!(users.find_by_email("U2@x.com").await.unwrap(), None);
    assert_eq!(users.find_by_id(user.id).await.unwrap(), Some(user));
}

#[tokio::test]
async fn test_lists_for_member_skip_pending_entries() {
    let store = store();
    let lists = ListRepository::new(store);
    let owner = User::new(UserId::new(), "u1@x.com");
    let guest = User::new(UserId::new(), "u2@x.com");

    let mut shared = TrackedList::new(&owner, "Watchlist");
    shared
        .shared_with
        .push(SharedWithEntry::pending(guest.id, &guest.email, Utc::now()));
    lists.create(&shared).await.unwrap();
    lists
        .create(&TrackedList::new(&owner, "Games"))
        .await
        .unwrap();

    let owned = lists.find_for_member(owner.id).await.unwrap();
    assert_eq!(owned.len(), 2);
    assert_eq!(owned[0].name, "Watchlist");
    assert!(lists.find_for_member(guest.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_lists_for_member_skip_malformed_documents() {
    let store = store();
    let lists = ListRepository::new(Arc::clone(&store));
    let owner = User::new(UserId::new(), "u1@x.com");
    lists
        .create(&TrackedList::new(&owner, "Watchlist"))
        .await
        .unwrap();

    let serde_json::Value::Object(garbage) = json!({"name": 42, "sharedWith": "nobody"}) else {
        unreachable!()
    };
    store
        .set(&ListRepository::collection().doc("broken"), garbage)
        .await
        .unwrap();

    let found = lists.find_for_member(owner.id).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Watchlist");
}

#[tokio::test]
async fn test_deleting_list_leaves_items() {
    let store = store();
    let lists = ListRepository::new(Arc::clone(&store));
    let items = ItemRepository::new(store);
    let owner = User::new(UserId::new(), "u1@x.com");
    let list = TrackedList::new(&owner, "Watchlist");
    lists.create(&list).await.unwrap();

    let item = NewItem::titled(MediaKind::Movie, "Heat")
        .into_item(Utc::now())
        .unwrap();
    items.create(list.id, &item).await.unwrap();

    lists.delete(list.id).await.unwrap();
    assert!(lists.find_by_id(list.id).await.unwrap().is_none());
    assert_eq!(items.find_by_list(list.id).await.unwrap(), vec![item]);
}

#[tokio::test]
async fn test_pending_inbox_stream() {
    let store = store();
    let invitations = InvitationRepository::new(store);
    let owner = User::new(UserId::new(), "u1@x.com");
    let invitee = UserId::new();
    let list = TrackedList::new(&owner, "Watchlist");

    let (unsubscribe, mut inbox) = invitations.subscribe_pending(invitee).await.unwrap();
    assert!(inbox.next().await.unwrap().is_empty());

    let mut invitation = Invitation::new(&list, &owner, Utc::now());
    invitations.create(invitee, &invitation).await.unwrap();
    let snapshot = inbox.next().await.unwrap();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].list_name, "Watchlist");

    invitation.decline(Utc::now()).unwrap();
    invitations.create(invitee, &invitation).await.unwrap();
    assert!(inbox.next().await.unwrap().is_empty());

    let stored = invitations
        .find_by_id(invitee, invitation.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, InvitationStatus::Declined);
    assert!(invitations.find_pending(invitee).await.unwrap().is_empty());

    unsubscribe.unsubscribe();
    assert!(inbox.next().await.is_none());
}
