use clap::Args;
use halalchain_app::domain::products::{
    PgProductsService, ProductsService, data::NewProduct, records::ProductUuid,
};
use rust_decimal::Decimal;
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct CreateProductArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Product display name
    #[arg(long)]
    name: String,

    /// Unit price, e.g. 12.50
    #[arg(long)]
    price: Decimal,

    /// Units in stock
    #[arg(long, default_value_t = 0)]
    stock: u32,

    /// Optional product UUID; generated when omitted
    #[arg(long)]
    product_uuid: Option<Uuid>,
}

pub(crate) async fn run(args: CreateProductArgs) -> Result<(), String> {
    let db = crate::cli::connect(&args.database_url).await?;
    let service = PgProductsService::new(db);

    let product = service
        .create_product(NewProduct {
            uuid: args
                .product_uuid
                .map_or_else(ProductUuid::new, ProductUuid::from_uuid),
            name: args.name,
            price: args.price,
            stock_quantity: args.stock,
        })
        .await
        .map_err(|error| format!("failed to create product: {error}"))?;

    super::print_product(&product);

    Ok(())
}
