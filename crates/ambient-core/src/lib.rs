//! Core of the Ambient Spaces directory service.
//!
//! - [`config`] -- Typed configuration loaded from `ambient-config.yaml`
//! - [`seed`] -- Seed document parsing and the built-in dataset
//! - [`directory`] -- The in-memory [`SpaceDirectory`] store and its
//!   operations
//! - [`tree`] -- Parent/child forest projection of a site's spaces

pub mod config;
pub mod directory;
pub mod seed;
pub mod tree;

pub use config::{ConfigError, ListenConfig, LoggingConfig, SeedConfig, ServiceConfig};
pub use directory::{DirectoryError, ErrorKind, FAULT_INJECTION_SITE_ID, SpaceDirectory};
pub use seed::{SeedDocument, SeedError, SiteSpaces};
