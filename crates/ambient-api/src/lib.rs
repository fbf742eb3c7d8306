//! Directory API server for the Ambient Spaces service.
//!
//! This crate provides an Axum HTTP server exposing the site → space →
//! stream directory as JSON:
//!
//! - **Read endpoints** for the site catalog, a site's space groups, and
//!   the parent/child space tree
//! - **Mutation endpoints** to add a stream to a space and delete a
//!   stream
//!
//! # Architecture
//!
//! The server reads from and mutates a single in-memory
//! [`SpaceDirectory`] loaded from the seed document at startup. It is
//! shared through [`AppState`] behind one read-write lock; nothing is
//! persisted.
//!
//! [`SpaceDirectory`]: ambient_core::SpaceDirectory

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use error::ApiError;
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use state::AppState;
