//! expiry-watch web server
//!
//! Tracks TLS certificate and domain registration expiry dates for a list of
//! domains and serves them as an HTML page plus a small JSON API.

mod config;
mod logging;
mod routes;
mod view;

use std::path::PathBuf;
use std::sync::Arc;

use actix_web::{App, HttpServer, middleware, web};
use anyhow::Context;
use expiry_watch_app::AppStateBuilder;
use expiry_watch_app::adapters::SqliteStore;

use config::Config;

/// Load `.env` when present. A missing file is fine, a malformed one is not.
fn load_dotenv() -> anyhow::Result<Option<PathBuf>> {
    match dotenvy::dotenv() {
        Ok(path) => Ok(Some(path)),
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(e).context("Failed to load .env"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv_path = load_dotenv()?;
    let config = Config::load()?;
    let _log_guard = logging::init(&config.log)?;

    if let Some(path) = dotenv_path {
        tracing::info!("Loaded environment from {}", path.display());
    }
    tracing::info!("Starting expiry-watch v{}", env!("CARGO_PKG_VERSION"));

    let store = SqliteStore::new(&config.database.path)
        .await
        .with_context(|| format!("Failed to open database {}", config.database.path.display()))?;

    let state = AppStateBuilder::new()
        .domain_repository(Arc::new(store))
        .probe_timeouts(config.probe.timeouts())
        .build()
        .context("Failed to build application state")?;
    let state = web::Data::new(state);

    tracing::info!(
        "Listening on http://{} with {} worker(s)",
        config.server.listen,
        config.server.workers
    );

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(middleware::Logger::default())
            .configure(routes::configure)
    })
    .workers(config.server.workers.max(1))
    .bind(&config.server.listen)
    .with_context(|| format!("Failed to bind {}", config.server.listen))?
    .run()
    .await
    .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}
