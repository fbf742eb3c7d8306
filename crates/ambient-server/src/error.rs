//! Error types for the directory service binary.

/// Top-level error for the directory service binary.
///
/// Each variant wraps a specific subsystem error so `main` can
/// propagate any startup or serving failure with `?`.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: ambient_core::ConfigError,
    },

    /// The seed document could not be loaded.
    #[error("seed error: {source}")]
    Seed {
        /// The underlying seed error.
        #[from]
        source: ambient_core::SeedError,
    },

    /// The HTTP server failed to bind or serve.
    #[error("server error: {source}")]
    Server {
        /// The underlying server error.
        #[from]
        source: ambient_api::ServerError,
    },
}
