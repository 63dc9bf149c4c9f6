//! Storage Config

use std::path::PathBuf;

use clap::Args;

/// Where application state lives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum StorageBackend {
    /// `PostgreSQL`, via `DATABASE_URL`.
    Postgres,

    /// Process memory; everything is lost on restart.
    Memory,
}

/// Storage settings.
#[derive(Debug, Args)]
pub struct StorageConfig {
    /// Storage backend (postgres, memory)
    #[arg(long, env = "STORAGE", value_enum, default_value_t = StorageBackend::Postgres)]
    pub storage: StorageBackend,

    /// `PostgreSQL` connection string, required for the postgres backend
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// JSON file of products loaded into the memory backend at start-up
    #[arg(long, env = "MEMORY_SEED")]
    pub memory_seed: Option<PathBuf>,
}
