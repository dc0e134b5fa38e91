//! Posts API server over an in-memory store, optionally seeded from a file.

use std::sync::Arc;

use blogkv::config::Config;
use blogkv::seed::{load_seed_file, seed_posts};
use blogkv::{logging, server, InMemoryKvStore, PostQuery};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let config = Config::from_env()?;
    let query = Arc::new(PostQuery::with_config(
        InMemoryKvStore::new(),
        config.query_config(),
    ));

    if let Some(path) = &config.seed_file {
        let posts = load_seed_file(path)?;
        seed_posts(&query, &posts)?;
        info!(path = %path.display(), "loaded seed file");
    }

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    server::serve(query, listener, shutdown_signal()).await?;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutting down");
}
