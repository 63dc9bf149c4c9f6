use clap::{Parser, Subcommand};
use halalchain_app::database::{self, Db};

mod product;
mod token;

#[derive(Debug, Parser)]
#[command(name = "halalchain-app", about = "HalalChain CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Product(product::ProductCommand),
    Token(token::TokenCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Product(command) => product::run(command).await,
            Commands::Token(command) => token::run(command).await,
        }
    }
}

/// Connect and bring the schema up to date before any command touches it.
pub(crate) async fn connect(database_url: &str) -> Result<Db, String> {
    let pool = database::connect(database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    database::migrate(&pool)
        .await
        .map_err(|error| format!("failed to run migrations: {error}"))?;

    Ok(Db::new(pool))
}
