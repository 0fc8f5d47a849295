//! Item commands.

use clap::{Args, Subcommand};

use tracktogether_core::result::AppResult;
use tracktogether_core::types::ListId;
use tracktogether_entity::{MediaKind, NewItem};

use crate::app::App;
use crate::output;

/// Arguments for item commands
#[derive(Debug, Args)]
pub struct ItemArgs {
    /// Item subcommand
    #[command(subcommand)]
    pub command: ItemCommand,
}

/// Item subcommands
#[derive(Debug, Subcommand)]
pub enum ItemCommand {
    /// Add an item by hand
    Add {
        /// Target list id
        list_id: ListId,
        /// movie, show or game
        #[arg(short, long)]
        kind: MediaKind,
        /// Title
        #[arg(short, long)]
        title: String,
        /// Release year
        #[arg(short, long)]
        year: Option<i32>,
        /// Rating
        #[arg(short, long)]
        rating: Option<f64>,
        /// Description
        #[arg(short, long)]
        description: Option<String>,
    },
}

/// Execute item commands
pub async fn execute(app: &App, args: &ItemArgs) -> AppResult<()> {
    let actor = app.actor().await?;

    match &args.command {
        ItemCommand::Add {
            list_id,
            kind,
            title,
            year,
            rating,
            description,
        } => {
            let item = NewItem {
                release_year: *year,
                rating: *rating,
                description: description.clone(),
                ..NewItem::titled(*kind, title.clone())
            };
            let item_id = app.lists.add_item(&actor, *list_id, item).await?;
            output::print_success(&format!("Added '{}' ({item_id})", title.trim()));
        }
    }

    Ok(())
}
