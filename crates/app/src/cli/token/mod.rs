use clap::{Args, Subcommand};
use halalchain_app::domain::auth::{ApiTokenMetadata, PgAuthService};

mod create;
mod list;
mod revoke;

/// Issue, inspect and revoke API tokens.
#[derive(Debug, Args)]
pub(crate) struct TokenCommand {
    #[command(subcommand)]
    action: TokenAction,
}

#[derive(Debug, Subcommand)]
enum TokenAction {
    /// Issue a token; the raw value is printed once
    Create(create::CreateTokenArgs),
    /// List a user's tokens, revoked ones included
    List(list::ListTokensArgs),
    /// Revoke a token by its uuid
    Revoke(revoke::RevokeTokenArgs),
}

pub(crate) async fn run(command: TokenCommand) -> Result<(), String> {
    match command.action {
        TokenAction::Create(args) => create::run(args).await,
        TokenAction::List(args) => list::run(args).await,
        TokenAction::Revoke(args) => revoke::run(args).await,
    }
}

async fn auth_service(database_url: &str) -> Result<PgAuthService, String> {
    let db = crate::cli::connect(database_url).await?;

    Ok(PgAuthService::new(db.pool().clone()))
}

fn print_metadata(token: &ApiTokenMetadata) {
    let last_used = token
        .last_used_at
        .map_or_else(|| "never".to_string(), |at| at.to_string());

    let state = token
        .revoked_at
        .map_or_else(|| "active".to_string(), |at| format!("revoked at {at}"));

    println!("token_uuid: {}", token.uuid);
    println!("user_uuid: {}", token.user_uuid);
    println!("token_version: {}", token.version.as_i16());
    println!("created_at: {}", token.created_at);
    println!("last_used_at: {last_used}");
    println!("state: {state}");
}
