//! Account commands.

use clap::Args;

use tracktogether_auth::IdentityProvider;
use tracktogether_core::result::AppResult;

use crate::app::App;
use crate::output::{self, OutputFormat};

/// Email and password
#[derive(Debug, Args)]
pub struct CredentialArgs {
    /// Account email
    pub email: String,
    /// Account password
    #[arg(short, long, env = "TRACKTOGETHER_PASSWORD")]
    pub password: String,
}

/// Execute `register`
pub async fn register(app: &App, args: &CredentialArgs, format: OutputFormat) -> AppResult<()> {
    let user = app.auth.register(&args.email, &args.password).await?;
    output::print_item(&user, format);
    Ok(())
}

/// Execute `login`
pub async fn login(app: &App, args: &CredentialArgs, format: OutputFormat) -> AppResult<()> {
    let user = app.auth.login(&args.email, &args.password).await?;
    output::print_item(&user, format);
    Ok(())
}

/// Execute `logout`
pub async fn logout(app: &App) -> AppResult<()> {
    app.auth.logout().await?;
    output::print_success("Signed out");
    Ok(())
}

/// Execute `whoami`
pub async fn whoami(app: &App, format: OutputFormat) -> AppResult<()> {
    let actor = app.actor().await?;
    output::print_item(&actor.user(), format);
    Ok(())
}
