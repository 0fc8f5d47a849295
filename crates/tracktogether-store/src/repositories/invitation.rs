//! Invitation repository.

use std::pin::Pin;
use std::sync::Arc;

use futures::{Stream, StreamExt};
use tracing::warn;

use tracktogether_core::result::AppResult;
use tracktogether_core::traits::{DocumentStore, Unsubscribe};
use tracktogether_core::types::{
    CollectionPath, DocumentPath, DocumentSnapshot, FieldFilter, InvitationId, UserId, encode,
};
use tracktogether_entity::{Invitation, InvitationStatus};

use super::decode_all;
use super::user::UserDirectory;

/// Stream of inbox contents; each item is the full pending set.
pub type InvitationStream = Pin<Box<dyn Stream<Item = Vec<Invitation>> + Send>>;

/// Repository for `users/{invitee}/invitations`.
#[derive(Debug, Clone)]
pub struct InvitationRepository {
    store: Arc<dyn DocumentStore>,
}

impl InvitationRepository {
    /// Create a repository over `store`.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Inbox collection of one user.
    pub fn collection(invitee: UserId) -> CollectionPath {
        UserDirectory::path(invitee).collection("invitations")
    }

    /// Path of one invitation.
    pub fn path(invitee: UserId, invitation_id: InvitationId) -> DocumentPath {
        Self::collection(invitee).doc(invitation_id)
    }

    /// Find an invitation in `invitee`'s inbox.
    pub async fn find_by_id(
        &self,
        invitee: UserId,
        invitation_id: InvitationId,
    ) -> AppResult<Option<Invitation>> {
        self.store
            .get(&Self::path(invitee, invitation_id))
            .await?
            .map(|snap| snap.decode())
            .transpose()
    }

    /// Persist an invitation.
    pub async fn create(&self, invitee: UserId, invitation: &Invitation) -> AppResult<()> {
        self.store
            .set(&Self::path(invitee, invitation.id), encode(invitation)?)
            .await
    }

    /// Remove an invitation.
    pub async fn delete(&self, invitee: UserId, invitation_id: InvitationId) -> AppResult<()> {
        self.store.delete(&Self::path(invitee, invitation_id)).await
    }

    /// Pending invitations of `invitee`, oldest first.
    pub async fn find_pending(&self, invitee: UserId) -> AppResult<Vec<Invitation>> {
        let snaps = self
            .store
            .query(&Self::collection(invitee), &pending_filter())
            .await?;
        let mut invitations: Vec<Invitation> = decode_all(&snaps)?;
        invitations.sort_by_key(|i| i.created_at);
        Ok(invitations)
    }

    /// Observe the pending inbox of `invitee`.
    ///
    /// Malformed documents are skipped with a warning rather than ending
    /// the stream.
    pub async fn subscribe_pending(
        &self,
        invitee: UserId,
    ) -> AppResult<(Unsubscribe, InvitationStream)> {
        let subscription = self
            .store
            .subscribe(&Self::collection(invitee), pending_filter())
            .await?;
        let (unsubscribe, snapshots) = subscription.into_parts();
        let invitations = snapshots.map(|snaps| decode_lenient(&snaps)).boxed();
        Ok((unsubscribe, invitations))
    }
}

fn pending_filter() -> Vec<FieldFilter> {
    vec![FieldFilter::eq("status", InvitationStatus::Pending.as_str())]
}

fn decode_lenient(snaps: &[DocumentSnapshot]) -> Vec<Invitation> {
    let mut invitations: Vec<Invitation> = snaps
        .iter()
        .filter_map(|snap| match snap.decode::<Invitation>() {
            Ok(inv) => Some(inv),
            Err(e) => {
                warn!(path = %snap.path, error = %e, "Skipping malformed invitation");
                None
            }
        })
        .collect();
    invitations.sort_by_key(|i| i.created_at);
    invitations
}
