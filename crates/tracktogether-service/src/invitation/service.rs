//! Invitation send / accept / decline service.
//!
//! Membership lives in the list document's `sharedWith` array; the
//! invitation document in the invitee's inbox mirrors its lifecycle.
//! Every transition writes both documents in one batch.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use tracktogether_core::error::{AppError, ErrorKind};
use tracktogether_core::result::AppResult;
use tracktogether_core::traits::{DocumentStore, Unsubscribe};
use tracktogether_core::types::{InvitationId, ListId, encode};
use tracktogether_entity::{Invitation, SharedWithEntry, TrackedList};
use tracktogether_store::{
    InvitationRepository, InvitationStream, ListRepository, UserDirectory,
};

use crate::context::ActorContext;
use crate::failure::store_failure;
use crate::list::ListCache;

/// Drives the invitation state machine.
#[derive(Debug, Clone)]
pub struct InvitationService {
    /// Backing store, used directly for batches.
    store: Arc<dyn DocumentStore>,
    /// Profile lookup by email.
    users: UserDirectory,
    /// List repository.
    lists: ListRepository,
    /// Invitation repository.
    invitations: InvitationRepository,
    /// Cache refreshed for every member after a membership change.
    cache: Arc<ListCache>,
}

impl InvitationService {
    /// Creates an invitation service.
    pub fn new(store: Arc<dyn DocumentStore>, cache: Arc<ListCache>) -> Self {
        Self {
            users: UserDirectory::new(Arc::clone(&store)),
            lists: ListRepository::new(Arc::clone(&store)),
            invitations: InvitationRepository::new(Arc::clone(&store)),
            store,
            cache,
        }
    }

    /// Invites the user registered as `invitee_email` to a list.
    ///
    /// Writes the pending invitation and the pending `sharedWith` entry
    /// together.
    pub async fn send(
        &self,
        ctx: &ActorContext,
        list_id: ListId,
        invitee_email: &str,
    ) -> AppResult<Invitation> {
        let invitee_email = invitee_email.trim();
        if invitee_email == ctx.email {
            return Err(AppError::validation("You cannot invite yourself"));
        }

        let invitee = self
            .users
            .find_by_email(invitee_email)
            .await
            .map_err(store_failure("look up user"))?
            .ok_or_else(|| {
                AppError::not_found(format!("No user registered as '{invitee_email}'"))
            })?;
        if invitee.id == ctx.user_id {
            return Err(AppError::validation("You cannot invite yourself"));
        }

        let mut list = self.load_list(list_id).await?.ok_or_else(|| {
            AppError::not_found(format!("List {list_id} not found"))
        })?;
        if !list.is_member(ctx.user_id) {
            return Err(AppError::authorization(
                "Only members of a list can invite others to it",
            ));
        }
        if list.entry_for(invitee.id).is_some() {
            return Err(AppError::conflict(format!(
                "'{invitee_email}' has already been invited to this list"
            )));
        }

        let now = Utc::now();
        let invitation = Invitation::new(&list, &ctx.user(), now);
        list.shared_with
            .push(SharedWithEntry::pending(invitee.id, invitee.email.clone(), now));

        let mut batch = self.store.batch();
        batch
            .set(
                InvitationRepository::path(invitee.id, invitation.id),
                encode(&invitation)?,
            )
            .update(
                ListRepository::path(list.id),
                ListRepository::shared_with_fields(&list)?,
            );
        self.store
            .commit(batch)
            .await
            .map_err(store_failure("send invitation"))?;
        self.cache.upsert_for_members(&list);

        info!(
            user_id = %ctx.user_id,
            list_id = %list.id,
            invitee_id = %invitee.id,
            invitation_id = %invitation.id,
            "Invitation sent"
        );
        Ok(invitation)
    }

    /// Accepts a pending invitation and joins the list.
    ///
    /// If the actor is already an accepted member the invitation is
    /// closed as accepted and an `AlreadyMember` error is returned.
    pub async fn accept(
        &self,
        ctx: &ActorContext,
        invitation_id: InvitationId,
    ) -> AppResult<TrackedList> {
        let mut invitation = self.load_pending(ctx, invitation_id).await?;
        let now = Utc::now();

        let Some(mut list) = self.load_list(invitation.list_id).await? else {
            if let Err(e) = self.invitations.delete(ctx.user_id, invitation_id).await {
                warn!(
                    invitation_id = %invitation_id,
                    error = %e,
                    "Failed to remove invitation for a deleted list"
                );
            }
            return Err(AppError::not_found(format!(
                "List {} no longer exists",
                invitation.list_id
            )));
        };

        if list.is_member(ctx.user_id) {
            invitation.accept(now)?;
            self.invitations
                .create(ctx.user_id, &invitation)
                .await
                .map_err(store_failure("update invitation"))?;
            info!(
                user_id = %ctx.user_id,
                list_id = %list.id,
                invitation_id = %invitation_id,
                "Stale invitation closed for existing member"
            );
            return Err(AppError::already_member(format!(
                "You are already a member of '{}'",
                list.display_name()
            )));
        }

        match list.entry_for_mut(ctx.user_id) {
            Some(entry) => entry.accept(now)?,
            None => {
                warn!(
                    list_id = %list.id,
                    user_id = %ctx.user_id,
                    "Pending entry missing; adding membership on accept"
                );
                let mut entry = SharedWithEntry::pending(ctx.user_id, ctx.email.clone(), now);
                entry.accept(now)?;
                list.shared_with.push(entry);
            }
        }
        invitation.accept(now)?;

        let mut batch = self.store.batch();
        batch
            .update(
                ListRepository::path(list.id),
                ListRepository::shared_with_fields(&list)?,
            )
            .set(
                InvitationRepository::path(ctx.user_id, invitation.id),
                encode(&invitation)?,
            );
        self.store
            .commit(batch)
            .await
            .map_err(store_failure("accept invitation"))?;

        info!(
            user_id = %ctx.user_id,
            list_id = %list.id,
            invitation_id = %invitation_id,
            "Invitation accepted"
        );
        self.cache.upsert_for_members(&list);
        Ok(list)
    }

    /// Declines a pending invitation.
    ///
    /// The pending `sharedWith` entry is removed in the same batch when the
    /// list still exists. Failing to reach the list is logged, not returned.
    pub async fn decline(
        &self,
        ctx: &ActorContext,
        invitation_id: InvitationId,
    ) -> AppResult<Invitation> {
        let mut invitation = self.load_pending(ctx, invitation_id).await?;
        invitation.decline(Utc::now())?;
        let invitation_path = InvitationRepository::path(ctx.user_id, invitation.id);

        let trimmed = match self.lists.find_by_id(invitation.list_id).await {
            Ok(Some(mut list)) => {
                let pending = list
                    .entry_for(ctx.user_id)
                    .is_some_and(|e| !e.is_accepted());
                (pending && list.remove_entry(ctx.user_id)).then_some(list)
            }
            Ok(None) => {
                warn!(list_id = %invitation.list_id, "Declined invitation for a deleted list");
                None
            }
            Err(e) => {
                warn!(
                    list_id = %invitation.list_id,
                    error = %e,
                    "Could not load list while declining"
                );
                None
            }
        };

        let mut batch = self.store.batch();
        batch.set(invitation_path.clone(), encode(&invitation)?);
        if let Some(list) = &trimmed {
            batch.update(
                ListRepository::path(list.id),
                ListRepository::shared_with_fields(list)?,
            );
        }

        match (self.store.commit(batch).await, &trimmed) {
            (Ok(()), Some(list)) => self.cache.upsert_for_members(list),
            (Ok(()), None) => {}
            (Err(e), Some(list)) if e.kind == ErrorKind::NotFound => {
                warn!(
                    list_id = %invitation.list_id,
                    "List vanished while declining; closing invitation only"
                );
                self.store
                    .set(&invitation_path, encode(&invitation)?)
                    .await
                    .map_err(store_failure("decline invitation"))?;
                self.cache.remove_for_members(list);
            }
            (Err(e), _) => return Err(store_failure("decline invitation")(e)),
        }

        info!(
            user_id = %ctx.user_id,
            list_id = %invitation.list_id,
            invitation_id = %invitation_id,
            "Invitation declined"
        );
        Ok(invitation)
    }

    /// Pending invitations addressed to the actor, oldest first.
    pub async fn pending_for(&self, ctx: &ActorContext) -> AppResult<Vec<Invitation>> {
        self.invitations
            .find_pending(ctx.user_id)
            .await
            .map_err(store_failure("load invitations"))
    }

    /// Live view of the actor's pending invitations. The stream ends once
    /// the returned handle is released.
    pub async fn watch_inbox(
        &self,
        ctx: &ActorContext,
    ) -> AppResult<(Unsubscribe, InvitationStream)> {
        self.invitations
            .subscribe_pending(ctx.user_id)
            .await
            .map_err(store_failure("subscribe to invitations"))
    }

    async fn load_list(&self, list_id: ListId) -> AppResult<Option<TrackedList>> {
        self.lists
            .find_by_id(list_id)
            .await
            .map_err(store_failure("load list"))
    }

    async fn load_pending(
        &self,
        ctx: &ActorContext,
        invitation_id: InvitationId,
    ) -> AppResult<Invitation> {
        let invitation = self
            .invitations
            .find_by_id(ctx.user_id, invitation_id)
            .await
            .map_err(store_failure("load invitation"))?
            .ok_or_else(|| AppError::not_found(format!("Invitation {invitation_id} not found")))?;

        if !invitation.is_pending() {
            return Err(AppError::state(format!(
                "Invitation has already been {}",
                invitation.status
            )));
        }
        Ok(invitation)
    }
}
