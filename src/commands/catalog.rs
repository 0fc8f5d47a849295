//! Catalog commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use tracktogether_core::error::AppError;
use tracktogether_core::result::AppResult;
use tracktogether_core::types::ListId;
use tracktogether_entity::{CatalogEntry, MediaKind};

use crate::app::App;
use crate::output::{self, OutputFormat};

/// Arguments for catalog commands
#[derive(Debug, Args)]
pub struct CatalogArgs {
    /// Catalog subcommand
    #[command(subcommand)]
    pub command: CatalogCommand,
}

/// Saving one result into a list
#[derive(Debug, Args)]
pub struct AddTo {
    /// Add the picked result to this list
    #[arg(long)]
    pub add_to: Option<ListId>,
    /// Zero-based index of the result to add
    #[arg(long, default_value_t = 0)]
    pub pick: usize,
}

/// Catalog subcommands
#[derive(Debug, Subcommand)]
pub enum CatalogCommand {
    /// Top-rated movies or shows, popular games
    Top {
        /// movie, show or game
        kind: MediaKind,
        #[command(flatten)]
        add: AddTo,
    },
    /// Search by title
    Search {
        /// movie, show or game
        kind: MediaKind,
        /// Search text
        query: String,
        #[command(flatten)]
        add: AddTo,
    },
}

/// Catalog display row
#[derive(Debug, Serialize, Tabled)]
struct EntryRow {
    #[tabled(rename = "#")]
    index: usize,
    title: String,
    released: String,
    rating: String,
    image: String,
}

fn rows(entries: &[CatalogEntry]) -> Vec<EntryRow> {
    entries
        .iter()
        .enumerate()
        .map(|(index, e)| EntryRow {
            index,
            title: e.title.clone(),
            released: e.release_date.map(|d| d.to_string()).unwrap_or_default(),
            rating: e.rating.map(|r| format!("{r:.1}")).unwrap_or_default(),
            image: e.image_url.clone().unwrap_or_default(),
        })
        .collect()
}

/// Execute catalog commands
pub async fn execute(app: &App, args: &CatalogArgs, format: OutputFormat) -> AppResult<()> {
    let (entries, add) = match &args.command {
        CatalogCommand::Top { kind, add } => (app.catalog.top_rated(*kind).await?, add),
        CatalogCommand::Search { kind, query, add } => {
            (app.catalog.search(*kind, query).await?, add)
        }
    };

    let Some(list_id) = add.add_to else {
        output::print_list(&rows(&entries), format);
        return Ok(());
    };

    let actor = app.actor().await?;
    let entry = entries.get(add.pick).ok_or_else(|| {
        AppError::validation(format!(
            "No result at index {} ({} results)",
            add.pick,
            entries.len()
        ))
    })?;
    let item_id = app.catalog.add_to_list(&actor, list_id, entry).await?;
    output::print_success(&format!("Added '{}' to list ({item_id})", entry.title));
    Ok(())
}
