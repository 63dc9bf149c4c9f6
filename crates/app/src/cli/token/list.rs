use clap::Args;
use halalchain_app::domain::auth::AuthService;
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct ListTokensArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// User whose tokens should be listed
    #[arg(long)]
    user_uuid: Uuid,
}

pub(crate) async fn run(args: ListTokensArgs) -> Result<(), String> {
    let service = super::auth_service(&args.database_url).await?;

    let tokens = service
        .list_api_tokens(args.user_uuid.into())
        .await
        .map_err(|error| format!("failed to list tokens: {error}"))?;

    if tokens.is_empty() {
        println!("no tokens found for user {}", args.user_uuid);
    }

    for (index, token) in tokens.iter().enumerate() {
        if index > 0 {
            println!();
        }

        super::print_metadata(token);
    }

    Ok(())
}
