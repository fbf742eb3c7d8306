//! Directory entities: sites, space groups, spaces, and streams.
//!
//! These mirror the seed document and the JSON returned by the directory
//! API. Field names are camelCase on the wire (`parentSpaceId`) to match
//! the web client.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ids::{SiteId, SpaceId, StreamId};

// ---------------------------------------------------------------------------
// Site
// ---------------------------------------------------------------------------

/// A physical site in the fixed, read-only site catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Site {
    /// Site identifier (e.g. `"1"`).
    pub id: SiteId,
    /// Display name (e.g. `"San Jose"`).
    pub name: String,
}

// ---------------------------------------------------------------------------
// Stream
// ---------------------------------------------------------------------------

/// A camera stream owned by exactly one [`Space`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Stream {
    /// Globally unique stream identifier.
    pub id: StreamId,
    /// Display name, unique (case-insensitively) within the owning space.
    pub name: String,
}

impl Stream {
    /// Whether this stream's name equals `name`, ignoring case.
    pub fn name_matches(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

// ---------------------------------------------------------------------------
// Space
// ---------------------------------------------------------------------------

/// A space within a site, holding an ordered list of streams.
///
/// `parent_space_id` links spaces into a forest. The directory stores it
/// verbatim and never validates it; only the tree projection reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Space {
    /// Globally unique space identifier.
    pub id: SpaceId,
    /// Display name. Not unique.
    pub name: String,
    /// Streams in insertion order.
    #[serde(default)]
    pub streams: Vec<Stream>,
    /// Parent space, or `null` for a root space.
    #[serde(default)]
    pub parent_space_id: Option<SpaceId>,
}

impl Space {
    /// Largest stream id in this space, if it has any streams.
    pub fn max_stream_id(&self) -> Option<StreamId> {
        self.streams.iter().map(|s| s.id).max()
    }

    /// Position of the stream with the given id within `streams`.
    pub fn stream_position(&self, stream_id: StreamId) -> Option<usize> {
        self.streams.iter().position(|s| s.id == stream_id)
    }

    /// Whether a stream named `name` (ignoring case) already exists here.
    pub fn has_stream_named(&self, name: &str) -> bool {
        self.streams.iter().any(|s| s.name_matches(name))
    }
}

// ---------------------------------------------------------------------------
// SpacesGroup
// ---------------------------------------------------------------------------

/// A container bundling one or more spaces of a site.
///
/// Grouping carries no behavior; it only exists as a level in the JSON
/// shape the client consumes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SpacesGroup {
    /// Spaces in seed order.
    pub spaces: Vec<Space>,
}

// ---------------------------------------------------------------------------
// SpaceNode
// ---------------------------------------------------------------------------

/// A space arranged into the parent/child forest described by
/// `parentSpaceId`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct SpaceNode {
    /// Space identifier.
    pub id: SpaceId,
    /// Display name.
    pub name: String,
    /// Streams owned directly by this space.
    pub streams: Vec<Stream>,
    /// Parent space, or `null` for a root.
    pub parent_space_id: Option<SpaceId>,
    /// Child spaces in seed order.
    pub children: Vec<SpaceNode>,
}

impl SpaceNode {
    /// Create a leaf node from a space (children are attached later).
    pub fn leaf(space: &Space) -> Self {
        Self {
            id: space.id,
            name: space.name.clone(),
            streams: space.streams.clone(),
            parent_space_id: space.parent_space_id,
            children: Vec::new(),
        }
    }

    /// Total number of streams in this node and all of its descendants.
    pub fn stream_count(&self) -> usize {
        self.children
            .iter()
            .fold(self.streams.len(), |acc, child| {
                acc.saturating_add(child.stream_count())
            })
    }
}
