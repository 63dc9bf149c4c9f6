use clap::Args;
use halalchain_app::domain::products::{PgProductsService, ProductsService};
use rust_decimal::Decimal;
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct RepriceProductArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Product to reprice
    #[arg(long)]
    product_uuid: Uuid,

    /// New unit price; existing orders keep the price they were placed at
    #[arg(long)]
    price: Decimal,
}

pub(crate) async fn run(args: RepriceProductArgs) -> Result<(), String> {
    let db = crate::cli::connect(&args.database_url).await?;
    let service = PgProductsService::new(db);

    let product = service
        .update_price(args.product_uuid.into(), args.price)
        .await
        .map_err(|error| format!("failed to update price: {error}"))?;

    super::print_product(&product);

    Ok(())
}
