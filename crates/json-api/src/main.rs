//! HalalChain JSON API Server

use std::process;

use salvo::{
    affix_state::inject,
    oapi::{
        OpenApi,
        security::{Http, HttpAuthScheme, SecurityScheme},
        swagger_ui::SwaggerUi,
    },
    prelude::*,
    trailing_slash::remove_slash,
};
use thiserror::Error;
use tracing::{error, info, warn};

use halalchain_app::{
    context::{AppContext, AppInitError},
    domain::users::UserUuid,
};

use crate::{
    config::{ServerConfig, storage::StorageBackend},
    state::State,
};

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod auth;
mod cart;
mod checkout;
mod config;
mod extensions;
mod healthcheck;
mod observability;
mod orders;
mod products;
mod router;
mod seed;
mod shutdown;
mod state;
#[cfg(test)]
mod test_helpers;

#[derive(Debug, Error)]
enum StartupError {
    #[error("DATABASE_URL is required when STORAGE=postgres")]
    MissingDatabaseUrl,

    #[error(transparent)]
    Init(#[from] AppInitError),

    #[error(transparent)]
    Seed(#[from] seed::SeedError),
}

/// HalalChain JSON API Server entry point
#[tokio::main]
pub async fn main() {
    let config = ServerConfig::load().unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized yet, must use eprintln for config errors"
        )]
        {
            eprintln!("Configuration error: {e}");
        }

        process::exit(1);
    });

    if let Err(e) = observability::init_logging(&config) {
        #[expect(
            clippy::print_stderr,
            reason = "logging failed to initialize, must use eprintln"
        )]
        {
            eprintln!("Logging error: {e}");
        }

        process::exit(1);
    }

    let app = match build_app_context(&config).await {
        Ok(app) => app,
        Err(init_error) => {
            error!("failed to initialize app context: {init_error}");

            process::exit(1);
        }
    };

    let addr = config.socket_addr();

    info!(storage = ?config.storage.storage, "Starting server on {addr}");

    let listener = TcpListener::new(addr).bind().await;

    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(observability::request_logging)
        .hoop(remove_slash())
        .hoop(inject(State::from_app_context(app)))
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(router::app_router());

    let doc = OpenApi::new("HalalChain API", env!("CARGO_PKG_VERSION"))
        .add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
        .merge_router(&router);

    let router = router
        .push(doc.into_router("/api-doc/openapi.json"))
        .push(SwaggerUi::new("/api-doc/openapi.json").into_router("docs"));

    let server = Server::new(listener);

    let handle = server.handle();

    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    server.serve(router).await;
}

async fn build_app_context(config: &ServerConfig) -> Result<AppContext, StartupError> {
    let checkout = config.checkout.to_checkout_config();

    match config.storage.storage {
        StorageBackend::Postgres => {
            let url = config
                .storage
                .database_url
                .as_deref()
                .ok_or(StartupError::MissingDatabaseUrl)?;

            Ok(AppContext::from_database_url(url, checkout).await?)
        }
        StorageBackend::Memory => {
            let app = AppContext::in_memory(checkout);

            if let Some(path) = &config.storage.memory_seed {
                seed::load(path, app.products.as_ref()).await?;
            }

            // The operator CLI cannot reach an in-process store, so mint a token here.
            match app.auth.issue_api_token(UserUuid::new()).await {
                Ok(issued) => warn!(
                    user_uuid = %issued.metadata.user_uuid,
                    api_token = %issued.token,
                    "in-memory storage: issued development api token"
                ),
                Err(source) => error!("failed to issue development api token: {source}"),
            }

            Ok(app)
        }
    }
}
