use clap::Args;
use halalchain_app::domain::products::{PgProductsService, ProductsService};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct RestockProductArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Product to restock
    #[arg(long)]
    product_uuid: Uuid,

    /// Units to add to the current stock
    #[arg(long)]
    quantity: u32,
}

pub(crate) async fn run(args: RestockProductArgs) -> Result<(), String> {
    let db = crate::cli::connect(&args.database_url).await?;
    let service = PgProductsService::new(db);

    let product = service
        .restock(args.product_uuid.into(), args.quantity)
        .await
        .map_err(|error| format!("failed to restock product: {error}"))?;

    super::print_product(&product);

    Ok(())
}
