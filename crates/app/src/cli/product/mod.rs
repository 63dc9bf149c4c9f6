use clap::{Args, Subcommand};
use halalchain_app::domain::products::records::ProductRecord;

mod create;
mod reprice;
mod restock;

#[derive(Debug, Args)]
pub(crate) struct ProductCommand {
    #[command(subcommand)]
    command: ProductSubcommand,
}

#[derive(Debug, Subcommand)]
enum ProductSubcommand {
    Create(create::CreateProductArgs),
    Restock(restock::RestockProductArgs),
    Reprice(reprice::RepriceProductArgs),
}

pub(crate) async fn run(command: ProductCommand) -> Result<(), String> {
    match command.command {
        ProductSubcommand::Create(args) => create::run(args).await,
        ProductSubcommand::Restock(args) => restock::run(args).await,
        ProductSubcommand::Reprice(args) => reprice::run(args).await,
    }
}

fn print_product(product: &ProductRecord) {
    println!("product_uuid: {}", product.uuid);
    println!("name: {}", product.name);
    println!("price: {}", product.price);
    println!("stock_quantity: {}", product.stock_quantity);
    println!("updated_at: {}", product.updated_at);
}
