//! CLI command definitions and dispatch.

pub mod account;
pub mod catalog;
pub mod invite;
pub mod item;
pub mod list;

use clap::{Parser, Subcommand};

use tracktogether_core::config::AppConfig;
use tracktogether_core::result::AppResult;

use crate::app::App;
use crate::output::OutputFormat;

/// TrackTogether: shared watch and play lists
#[derive(Debug, Parser)]
#[command(name = "tracktogether", version, about, long_about = None)]
pub struct Cli {
    /// Configuration file; skips the layered `config/` lookup
    #[arg(short, long)]
    pub config: Option<String>,

    /// Environment overlay loaded from `config/{env}.toml`
    #[arg(long, default_value = "development", env = "TRACKTOGETHER_ENV")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create an account and sign in
    Register(account::CredentialArgs),
    /// Sign in
    Login(account::CredentialArgs),
    /// Sign out
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Manage lists
    List(list::ListArgs),
    /// Manage items in a list
    Item(item::ItemArgs),
    /// Send and answer invitations
    Invite(invite::InviteArgs),
    /// Browse the movie, show and game catalogs
    Catalog(catalog::CatalogArgs),
}

impl Cli {
    /// Run the command against the configured store, then persist it.
    pub async fn execute(&self, config: AppConfig) -> AppResult<()> {
        let app = App::open(&config).await?;
        let result = match &self.command {
            Commands::Register(args) => account::register(&app, args, self.format).await,
            Commands::Login(args) => account::login(&app, args, self.format).await,
            Commands::Logout => account::logout(&app).await,
            Commands::Whoami => account::whoami(&app, self.format).await,
            Commands::List(args) => list::execute(&app, args, self.format).await,
            Commands::Item(args) => item::execute(&app, args).await,
            Commands::Invite(args) => invite::execute(&app, args, self.format).await,
            Commands::Catalog(args) => catalog::execute(&app, args, self.format).await,
        };
        app.close().await?;
        result
    }
}
