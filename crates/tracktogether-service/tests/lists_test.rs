//! List and item management against the in-memory store.

mod common;

use tracktogether_core::error::ErrorKind;
use tracktogether_core::types::ListId;
use tracktogether_entity::{MediaKind, MemberStatus, NewItem};

use common::Harness;

#[tokio::test]
async fn test_create_then_list_for_owner() {
    let h = Harness::new();
    let owner = h.user("u1@x.com").await;

    let list_id = h.lists.create_list(&owner, "  Watchlist ").await.unwrap();
    let lists = h.lists.list_for(&owner).await.unwrap();

    assert_eq!(lists.len(), 1);
    assert_eq!(lists[0].id, list_id);
    assert_eq!(lists[0].name, "Watchlist");
    assert_eq!(lists[0].owner_id, owner.user_id);
    assert_eq!(lists[0].shared_with.len(), 1);
    assert_eq!(lists[0].shared_with[0].user_id, owner.user_id);
    assert_eq!(lists[0].shared_with[0].status, MemberStatus::Accepted);
}

#[tokio::test]
async fn test_blank_names_rejected_without_writes() {
    let h = Harness::new();
    let owner = h.user("u1@x.com").await;
    let documents = h.store.document_count().await;

    for name in ["", "   "] {
        let err = h.lists.create_list(&owner, name).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }
    assert_eq!(h.store.document_count().await, documents);
}

#[tokio::test]
async fn test_create_updates_cache_optimistically() {
    let h = Harness::new();
    let owner = h.user("u1@x.com").await;
    let mut watched = h.lists.watch_lists(&owner);
    assert!(watched.borrow().loading);

    let list_id = h.lists.create_list(&owner, "Watchlist").await.unwrap();
    assert_eq!(watched.borrow_and_update().lists[0].id, list_id);

    h.lists.list_for(&owner).await.unwrap();
    let snapshot = watched.borrow_and_update().clone();
    assert!(!snapshot.loading);
    assert_eq!(snapshot.lists.len(), 1);
}

#[tokio::test]
async fn test_failed_reload_clears_loading_flag() {
    let h = Harness::new();
    let owner = h.user("u1@x.com").await;
    h.lists.create_list(&owner, "Watchlist").await.unwrap();

    h.store.set_offline(true);
    let err = h.lists.list_for(&owner).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Transient);

    let snapshot = h.lists.watch_lists(&owner).borrow().clone();
    assert!(!snapshot.loading);
    assert_eq!(snapshot.lists.len(), 1);
}

#[tokio::test]
async fn test_delete_requires_membership_and_leaves_items() {
    let h = Harness::new();
    let owner = h.user("u1@x.com").await;
    let stranger = h.user("u9@x.com").await;
    let list_id = h.lists.create_list(&owner, "Watchlist").await.unwrap();
    h.lists
        .add_item(&owner, list_id, NewItem::titled(MediaKind::Movie, "Heat"))
        .await
        .unwrap();

    let err = h.lists.delete_list(&stranger, list_id).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authorization);

    h.lists.delete_list(&owner, list_id).await.unwrap();
    assert!(h.lists.list_for(&owner).await.unwrap().is_empty());
    assert_eq!(h.lists.items_for(list_id).await.unwrap().len(), 1);

    let err = h.lists.delete_list(&owner, list_id).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_add_item_rules() {
    let h = Harness::new();
    let owner = h.user("u1@x.com").await;
    let stranger = h.user("u9@x.com").await;
    let list_id = h.lists.create_list(&owner, "Games").await.unwrap();

    let err = h
        .lists
        .add_item(&owner, list_id, NewItem::titled(MediaKind::Game, " "))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);

    let err = h
        .lists
        .add_item(&owner, ListId::new(), NewItem::titled(MediaKind::Game, "Celeste"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);

    // Non-members may add items.
    let item_id = h
        .lists
        .add_item(&stranger, list_id, NewItem::titled(MediaKind::Game, "Celeste"))
        .await
        .unwrap();

    let items = h.lists.items_for(list_id).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, item_id);
    assert_eq!(items[0].kind(), MediaKind::Game);
    assert_eq!(items[0].description, "No description available");
}
