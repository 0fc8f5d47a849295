//! Invitation commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use tracktogether_core::result::AppResult;
use tracktogether_core::types::{InvitationId, ListId};
use tracktogether_entity::Invitation;

use crate::app::App;
use crate::output::{self, OutputFormat};

/// Arguments for invitation commands
#[derive(Debug, Args)]
pub struct InviteArgs {
    /// Invitation subcommand
    #[command(subcommand)]
    pub command: InviteCommand,
}

/// Invitation subcommands
#[derive(Debug, Subcommand)]
pub enum InviteCommand {
    /// Invite a registered user to a list
    Send {
        /// List id
        list_id: ListId,
        /// Invitee email
        email: String,
    },
    /// Show pending invitations
    Inbox,
    /// Accept an invitation
    Accept {
        /// Invitation id
        invitation_id: InvitationId,
    },
    /// Decline an invitation
    Decline {
        /// Invitation id
        invitation_id: InvitationId,
    },
}

/// Inbox display row
#[derive(Debug, Serialize, Tabled)]
struct InvitationRow {
    id: String,
    list: String,
    from: String,
    sent_at: String,
}

impl From<&Invitation> for InvitationRow {
    fn from(invitation: &Invitation) -> Self {
        Self {
            id: invitation.id.to_string(),
            list: invitation.list_name.clone(),
            from: invitation.invited_by_email.clone(),
            sent_at: invitation.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute invitation commands
pub async fn execute(app: &App, args: &InviteArgs, format: OutputFormat) -> AppResult<()> {
    let actor = app.actor().await?;

    match &args.command {
        InviteCommand::Send { list_id, email } => {
            let invitation = app.invitations.send(&actor, *list_id, email).await?;
            output::print_success(&format!(
                "Invited {} to '{}' ({})",
                email.trim(),
                invitation.list_name,
                invitation.id
            ));
        }
        InviteCommand::Inbox => {
            let pending = app.invitations.pending_for(&actor).await?;
            let rows: Vec<InvitationRow> = pending.iter().map(InvitationRow::from).collect();
            output::print_list(&rows, format);
        }
        InviteCommand::Accept { invitation_id } => {
            let list = app.invitations.accept(&actor, *invitation_id).await?;
            output::print_success(&format!("Joined '{}'", list.display_name()));
        }
        InviteCommand::Decline { invitation_id } => {
            let invitation = app.invitations.decline(&actor, *invitation_id).await?;
            output::print_success(&format!(
                "Declined invitation to '{}'",
                invitation.list_name
            ));
        }
    }

    Ok(())
}
