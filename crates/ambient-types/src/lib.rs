//! Shared type definitions for the Ambient Spaces directory service.
//!
//! This crate is the single source of truth for the shapes exchanged
//! between the directory store, the HTTP API, and the web client. Types
//! flow downstream to `TypeScript` via `ts-rs`.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe wrappers for site, space, and stream identifiers
//! - [`structs`] -- Directory entities (sites, space groups, spaces, streams)
//! - [`api`] -- HTTP request and response bodies

pub mod api;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use api::{
    AddStreamRequest, AddStreamResponse, ErrorBody, HealthResponse, MessageResponse,
    SitesResponse, SpaceTreeResponse, SpacesResponse,
};
pub use ids::{SiteId, SpaceId, StreamId};
pub use structs::{Site, Space, SpaceNode, SpacesGroup, Stream};
