//! AirOps HTTP Server Binary
//!
//! Entry point for the dispatch REST API server: initializes the store
//! backend, sets up the HTTP router, and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! # Run with the in-memory store (default)
//! cargo run --bin airops-server
//!
//! # Run with the JSON-file store
//! AIROPS_CONFIG=airops.toml cargo run --bin airops-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `AIROPS_CONFIG`: Path to a TOML repository configuration file
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use airops::db;
use airops::http::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .init();

    info!("Starting AirOps dispatch server");

    // Initialize the global repository once and reuse it across the app
    let config = match env::var("AIROPS_CONFIG") {
        Ok(path) => db::RepositoryConfig::load(&path)
            .map_err(|e| anyhow::anyhow!("loading {path}: {e}"))?,
        Err(_) => db::RepositoryConfig::default(),
    };
    db::init_repository(&config)?;
    let repository = std::sync::Arc::clone(db::get_repository()?);
    info!("Store initialized ({})", config.repository.repo_type);

    let state = AppState::new(repository);
    let app = create_router(state);

    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);
    let addr: SocketAddr = format!("{host}:{port}").parse()?;

    info!("Server listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
