//! Directory service binary for Ambient Spaces.
//!
//! Loads configuration and the seed document, builds the in-memory
//! directory, and serves the HTTP API until `Ctrl-C`.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `ambient-config.yaml` (defaults if absent)
//! 2. Initialize structured logging (tracing)
//! 3. Load the seed document (optionally falling back to the built-in
//!    dataset when the file is missing)
//! 4. Build the directory and shared state
//! 5. Serve until shutdown

mod error;

use std::path::Path;
use std::sync::Arc;

use ambient_api::{AppState, ServerConfig};
use ambient_core::config::DEFAULT_CONFIG_FILE;
use ambient_core::{SeedDocument, ServiceConfig, SpaceDirectory};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::ServiceError;

/// Application entry point for the directory service.
///
/// # Errors
///
/// Returns an error if configuration or the seed cannot be loaded, or if
/// the server fails to bind or serve.
#[tokio::main]
async fn main() -> Result<(), ServiceError> {
    // 1. Load configuration.
    let config = ServiceConfig::load_or_default(Path::new(DEFAULT_CONFIG_FILE))?;

    // 2. Initialize structured logging. RUST_LOG wins over the config.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!(
        host = config.server.host,
        port = config.server.port,
        seed_path = %config.seed.path.display(),
        fallback_to_builtin = config.seed.fallback_to_builtin,
        "Configuration loaded"
    );

    // 3. Load the seed document.
    let seed = SeedDocument::load(&config.seed)?;

    // 4. Build the directory and shared state.
    let directory = SpaceDirectory::from_seed(seed);
    info!(
        sites = directory.site_count(),
        spaces = directory.space_count(),
        streams = directory.stream_count(),
        "Directory initialized"
    );
    let state = Arc::new(AppState::new(directory));

    // 5. Serve.
    let server_config = ServerConfig::from(&config.server);
    ambient_api::start_server(&server_config, state).await?;

    info!("ambient-server shutdown complete");

    Ok(())
}
