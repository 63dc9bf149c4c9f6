use clap::Args;
use halalchain_app::domain::auth::AuthService;
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct CreateTokenArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// User the token acts for; generated when omitted
    #[arg(long)]
    user_uuid: Option<Uuid>,
}

pub(crate) async fn run(args: CreateTokenArgs) -> Result<(), String> {
    let service = super::auth_service(&args.database_url).await?;
    let user = args.user_uuid.unwrap_or_else(Uuid::now_v7);

    let issued = service
        .issue_api_token(user.into())
        .await
        .map_err(|error| format!("failed to create token: {error}"))?;

    super::print_metadata(&issued.metadata);

    println!("api_token: {}", issued.token);
    println!("store this token now; it is only shown once");

    Ok(())
}
