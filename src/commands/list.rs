//! List commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use tracktogether_core::result::AppResult;
use tracktogether_core::types::ListId;
use tracktogether_entity::{Item, TrackedList};

use crate::app::App;
use crate::output::{self, OutputFormat};

/// Arguments for list commands
#[derive(Debug, Args)]
pub struct ListArgs {
    /// List subcommand
    #[command(subcommand)]
    pub command: ListCommand,
}

/// List subcommands
#[derive(Debug, Subcommand)]
pub enum ListCommand {
    /// Create a list
    Create {
        /// List name
        name: String,
    },
    /// Show lists you belong to
    Ls,
    /// Delete a list
    Rm {
        /// List id
        list_id: ListId,
    },
    /// Show the items of a list
    Items {
        /// List id
        list_id: ListId,
    },
}

/// List display row
#[derive(Debug, Serialize, Tabled)]
struct ListRow {
    id: String,
    name: String,
    owner: String,
    members: usize,
    pending: usize,
    created_at: String,
}

impl From<&TrackedList> for ListRow {
    fn from(list: &TrackedList) -> Self {
        let members = list.shared_with.iter().filter(|e| e.is_accepted()).count();
        let owner = list
            .entry_for(list.owner_id)
            .map(|e| e.email.clone())
            .unwrap_or_else(|| list.owner_id.to_string());
        Self {
            id: list.id.to_string(),
            name: list.name.clone(),
            owner,
            members,
            pending: list.shared_with.len() - members,
            created_at: list.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Item display row
#[derive(Debug, Serialize, Tabled)]
struct ItemRow {
    id: String,
    kind: String,
    title: String,
    year: String,
    rating: String,
}

impl From<&Item> for ItemRow {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id.to_string(),
            kind: item.kind().to_string(),
            title: item.title.clone(),
            year: item.release_year.map(|y| y.to_string()).unwrap_or_default(),
            rating: item.rating.map(|r| format!("{r:.1}")).unwrap_or_default(),
        }
    }
}

/// Execute list commands
pub async fn execute(app: &App, args: &ListArgs, format: OutputFormat) -> AppResult<()> {
    let actor = app.actor().await?;

    match &args.command {
        ListCommand::Create { name } => {
            let list_id = app.lists.create_list(&actor, name).await?;
            output::print_success(&format!("List '{}' created ({list_id})", name.trim()));
        }
        ListCommand::Ls => {
            let lists = app.lists.list_for(&actor).await?;
            let rows: Vec<ListRow> = lists.iter().map(ListRow::from).collect();
            output::print_list(&rows, format);
        }
        ListCommand::Rm { list_id } => {
            app.lists.delete_list(&actor, *list_id).await?;
            output::print_success(&format!("List {list_id} deleted"));
        }
        ListCommand::Items { list_id } => {
            app.lists.get_list(&actor, *list_id).await?;
            let items = app.lists.items_for(*list_id).await?;
            let rows: Vec<ItemRow> = items.iter().map(ItemRow::from).collect();
            output::print_list(&rows, format);
        }
    }

    Ok(())
}
