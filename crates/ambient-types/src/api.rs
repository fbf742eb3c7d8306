//! Request and response bodies for the directory HTTP API.
//!
//! Every body here derives [`TS`] so the web client's `api.types.ts` can
//! be regenerated from the Rust definitions instead of hand-maintained.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use validator::{Validate, ValidationError};

use crate::ids::{SpaceId, StreamId};
use crate::structs::{Site, SpaceNode, SpacesGroup};

/// Body of `GET /sites/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SitesResponse {
    /// The site catalog in insertion order.
    pub sites: Vec<Site>,
}

/// Body of `GET /spaces/?siteId=`.
///
/// The web client names this shape `FlattenedSpacesData`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SpacesResponse {
    /// The site's space groups in seed order.
    pub spaces: Vec<SpacesGroup>,
}

/// Body of `GET /spaces/tree?siteId=`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SpaceTreeResponse {
    /// Root spaces with their descendants attached.
    pub tree: Vec<SpaceNode>,
}

/// Body of `POST /spaces/{spaceId}/streams`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, TS)]
#[ts(export, export_to = "bindings/")]
pub struct AddStreamRequest {
    /// Name for the new stream.
    #[validate(custom(function = "validate_not_blank"))]
    pub name: String,
}

/// Reject names that are empty or contain only whitespace.
fn validate_not_blank(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some(Cow::Borrowed("name must not be blank"));
        return Err(err);
    }
    Ok(())
}

/// Body returned when a stream is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct AddStreamResponse {
    /// Newly assigned stream id.
    pub id: StreamId,
    /// Stream name as submitted.
    pub name: String,
    /// Space the stream was added to.
    pub space_id: SpaceId,
}

/// A body carrying only a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct MessageResponse {
    /// The message.
    pub message: String,
}

impl MessageResponse {
    /// Build a message body.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct HealthResponse {
    /// Always `"ok"` while the process is serving.
    pub status: String,
    /// Number of sites in the catalog.
    pub sites: u32,
    /// Seconds since the directory was loaded.
    #[ts(type = "number")]
    pub uptime_seconds: u64,
}

/// Error body returned with every non-2xx response.
///
/// `detail` matches the key the web client reads error text from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ErrorBody {
    /// Human-readable failure description.
    pub detail: String,
    /// HTTP status code, repeated for convenience.
    pub status: u16,
}
