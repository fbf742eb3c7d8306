//! The in-memory space directory.
//!
//! [`SpaceDirectory`] owns the whole site → group → space → stream tree
//! for the lifetime of the process. It is constructed once from the seed
//! and handed to request handlers by reference; there is no module-level
//! state, so every test can build a fresh directory.
//!
//! All lookups are linear nested searches in seed order: sites, then
//! groups, then spaces, then streams. The first match wins.

use ambient_types::{
    AddStreamResponse, Site, SiteId, Space, SpaceId, SpaceNode, SpacesGroup, Stream, StreamId,
};
use tracing::info;

use crate::seed::{SeedDocument, SiteSpaces};
use crate::tree::build_forest;

/// Site id whose space listing always fails.
///
/// This is the "Mars" fixture: a deliberate fault injection so clients
/// can exercise their error path. It is part of the observable contract
/// and not a bug.
pub const FAULT_INJECTION_SITE_ID: &str = "3";

/// Coarse classification of [`DirectoryError`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The referenced site, space, or stream does not exist.
    NotFound,
    /// The request collides with existing state.
    Conflict,
    /// A server-side failure.
    InternalFailure,
}

/// Errors returned by directory operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectoryError {
    /// No site with this id.
    #[error("Site not found: {0}")]
    SiteNotFound(SiteId),

    /// No space with this id in any site.
    #[error("Space not found: {0}")]
    SpaceNotFound(SpaceId),

    /// No stream with this id in any space.
    #[error("Stream not found: {0}")]
    StreamNotFound(StreamId),

    /// The space already has a stream with this name (ignoring case).
    #[error("Stream with name '{name}' already exists in this space")]
    DuplicateStreamName {
        /// The rejected name, as submitted.
        name: String,
    },

    /// Injected failure for [`FAULT_INJECTION_SITE_ID`].
    #[error("Failed to load spaces for site {0}")]
    InjectedFault(SiteId),

    /// The next stream id would overflow.
    #[error("stream id space exhausted")]
    StreamIdsExhausted,
}

impl DirectoryError {
    /// The coarse kind of this error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::SiteNotFound(_) | Self::SpaceNotFound(_) | Self::StreamNotFound(_) => {
                ErrorKind::NotFound
            }
            Self::DuplicateStreamName { .. } => ErrorKind::Conflict,
            Self::InjectedFault(_) | Self::StreamIdsExhausted => ErrorKind::InternalFailure,
        }
    }
}

/// In-memory store of sites, space groups, spaces, and streams.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpaceDirectory {
    sites: Vec<Site>,
    site_spaces: Vec<SiteSpaces>,
}

impl SpaceDirectory {
    /// Create a directory from a site catalog and per-site groups.
    pub const fn new(sites: Vec<Site>, site_spaces: Vec<SiteSpaces>) -> Self {
        Self { sites, site_spaces }
    }

    /// Create a directory from a loaded seed document.
    pub fn from_seed(seed: SeedDocument) -> Self {
        Self::new(seed.sites, seed.site_spaces)
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// The site catalog in insertion order.
    pub fn list_sites(&self) -> &[Site] {
        &self.sites
    }

    /// The space groups of `site_id`, in seed order.
    ///
    /// # Errors
    ///
    /// [`DirectoryError::InjectedFault`] for [`FAULT_INJECTION_SITE_ID`]
    /// regardless of state; [`DirectoryError::SiteNotFound`] for an
    /// unknown site.
    pub fn list_spaces(&self, site_id: &SiteId) -> Result<&[SpacesGroup], DirectoryError> {
        if site_id.as_str() == FAULT_INJECTION_SITE_ID {
            return Err(DirectoryError::InjectedFault(site_id.clone()));
        }

        if let Some(entry) = self.site_spaces.iter().find(|s| &s.site_id == site_id) {
            return Ok(&entry.groups);
        }

        // Cataloged site that was given no groups.
        if self.sites.iter().any(|s| &s.id == site_id) {
            return Ok(&[]);
        }

        Err(DirectoryError::SiteNotFound(site_id.clone()))
    }

    /// The spaces of `site_id` arranged as a parent/child forest.
    ///
    /// # Errors
    ///
    /// Same as [`Self::list_spaces`].
    pub fn space_tree(&self, site_id: &SiteId) -> Result<Vec<SpaceNode>, DirectoryError> {
        let groups = self.list_spaces(site_id)?;
        Ok(build_forest(groups.iter().flat_map(|g| &g.spaces)))
    }

    /// Number of sites in the catalog.
    pub const fn site_count(&self) -> usize {
        self.sites.len()
    }

    /// Number of spaces across all sites.
    pub fn space_count(&self) -> usize {
        self.spaces().count()
    }

    /// Number of streams across all spaces.
    pub fn stream_count(&self) -> usize {
        self.spaces().map(|s| s.streams.len()).sum()
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Append a stream named `name` to the space `space_id`.
    ///
    /// The new id is one more than the largest stream id anywhere in the
    /// directory (1 when there are none), recomputed on every call.
    ///
    /// # Errors
    ///
    /// [`DirectoryError::SpaceNotFound`] if no space matches,
    /// [`DirectoryError::DuplicateStreamName`] if the space already has a
    /// stream with the same name ignoring case, and
    /// [`DirectoryError::StreamIdsExhausted`] on id overflow.
    pub fn add_stream(
        &mut self,
        space_id: SpaceId,
        name: &str,
    ) -> Result<AddStreamResponse, DirectoryError> {
        let space = self
            .find_space(space_id)
            .ok_or(DirectoryError::SpaceNotFound(space_id))?;

        if space.has_stream_named(name) {
            return Err(DirectoryError::DuplicateStreamName {
                name: name.to_owned(),
            });
        }

        let id = self.next_stream_id()?;

        let space = self
            .find_space_mut(space_id)
            .ok_or(DirectoryError::SpaceNotFound(space_id))?;
        space.streams.push(Stream {
            id,
            name: name.to_owned(),
        });

        info!(stream_id = %id, space_id = %space_id, name, "Stream added");

        Ok(AddStreamResponse {
            id,
            name: name.to_owned(),
            space_id,
        })
    }

    /// Remove the stream `stream_id` from its space and return it.
    ///
    /// The remaining streams keep their order.
    ///
    /// # Errors
    ///
    /// [`DirectoryError::StreamNotFound`] if no stream matches, including
    /// a stream that was already deleted.
    pub fn delete_stream(&mut self, stream_id: StreamId) -> Result<Stream, DirectoryError> {
        for space in self.spaces_mut() {
            if let Some(pos) = space.stream_position(stream_id) {
                let removed = space.streams.remove(pos);
                info!(
                    stream_id = %stream_id,
                    space_id = %space.id,
                    name = %removed.name,
                    "Stream deleted"
                );
                return Ok(removed);
            }
        }

        Err(DirectoryError::StreamNotFound(stream_id))
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn spaces(&self) -> impl Iterator<Item = &Space> {
        self.site_spaces
            .iter()
            .flat_map(|s| &s.groups)
            .flat_map(|g| &g.spaces)
    }

    fn spaces_mut(&mut self) -> impl Iterator<Item = &mut Space> {
        self.site_spaces
            .iter_mut()
            .flat_map(|s| &mut s.groups)
            .flat_map(|g| &mut g.spaces)
    }

    fn find_space(&self, space_id: SpaceId) -> Option<&Space> {
        self.spaces().find(|s| s.id == space_id)
    }

    fn find_space_mut(&mut self, space_id: SpaceId) -> Option<&mut Space> {
        self.spaces_mut().find(|s| s.id == space_id)
    }

    fn next_stream_id(&self) -> Result<StreamId, DirectoryError> {
        let max = self
            .spaces()
            .filter_map(Space::max_stream_id)
            .max()
            .map_or(0, StreamId::into_inner);

        max.checked_add(1)
            .map(StreamId::new)
            .ok_or(DirectoryError::StreamIdsExhausted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> SpaceDirectory {
        SpaceDirectory::from_seed(SeedDocument::builtin())
    }

    fn streams_of(dir: &SpaceDirectory, space_id: u32) -> Vec<(u32, String)> {
        dir.find_space(SpaceId::new(space_id))
            .unwrap()
            .streams
            .iter()
            .map(|s| (s.id.into_inner(), s.name.clone()))
            .collect()
    }

    #[test]
    fn list_sites_preserves_order() {
        let dir = directory();
        let ids: Vec<&str> = dir.list_sites().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3"]);
    }

    #[test]
    fn list_spaces_returns_seeded_groups() {
        let seed = SeedDocument::builtin();
        let dir = SpaceDirectory::from_seed(seed.clone());

        for entry in seed.site_spaces.iter().filter(|s| s.site_id.as_str() != "3") {
            let groups = dir.list_spaces(&entry.site_id).unwrap();
            assert_eq!(groups, entry.groups.as_slice());
        }
    }

    #[test]
    fn list_spaces_unknown_site_is_not_found() {
        let dir = directory();
        let err = dir.list_spaces(&SiteId::from("42")).unwrap_err();
        assert_eq!(err, DirectoryError::SiteNotFound(SiteId::from("42")));
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn fault_site_always_fails() {
        let dir = directory();
        let err = dir.list_spaces(&SiteId::from("3")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InternalFailure);

        // Even when the site has spaces and the catalog lacks it.
        let seed = SeedDocument::builtin();
        let mut site_spaces = seed.site_spaces;
        for entry in &mut site_spaces {
            entry.site_id = SiteId::from("3");
        }
        let dir = SpaceDirectory::new(Vec::new(), site_spaces);
        assert!(matches!(
            dir.list_spaces(&SiteId::from("3")),
            Err(DirectoryError::InjectedFault(_))
        ));
        assert!(dir.space_tree(&SiteId::from("3")).is_err());
    }

    #[test]
    fn cataloged_site_without_groups_is_empty() {
        let sites = vec![Site {
            id: SiteId::from("7"),
            name: "Lisbon".to_owned(),
        }];
        let dir = SpaceDirectory::new(sites, Vec::new());
        assert!(dir.list_spaces(&SiteId::from("7")).unwrap().is_empty());
    }

    #[test]
    fn add_stream_appends_with_next_global_id() {
        let mut dir = directory();
        let created = dir.add_stream(SpaceId::new(2), "Cam 3").unwrap();

        // Builtin max stream id is 16 (Toronto's loading docks).
        assert_eq!(created.id, StreamId::new(17));
        assert_eq!(created.space_id, SpaceId::new(2));
        assert_eq!(
            streams_of(&dir, 2),
            [
                (3, "Marketing Camera 1".to_owned()),
                (4, "Marketing Camera 2".to_owned()),
                (17, "Cam 3".to_owned()),
            ]
        );
    }

    #[test]
    fn add_stream_duplicate_name_ignores_case() {
        let mut dir = directory();
        dir.add_stream(SpaceId::new(2), "Foo").unwrap();
        let err = dir.add_stream(SpaceId::new(2), "foo").unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert!(err.to_string().contains("'foo'"));
        assert_eq!(streams_of(&dir, 2).len(), 3);
    }

    #[test]
    fn same_name_in_other_space_is_allowed() {
        let mut dir = directory();
        dir.add_stream(SpaceId::new(1), "Lobby").unwrap();
        assert!(dir.add_stream(SpaceId::new(11), "lobby").is_ok());
    }

    #[test]
    fn add_stream_unknown_space_is_not_found() {
        let mut dir = directory();
        let err = dir.add_stream(SpaceId::new(404), "Cam").unwrap_err();
        assert_eq!(err, DirectoryError::SpaceNotFound(SpaceId::new(404)));
    }

    #[test]
    fn ids_increase_across_spaces() {
        let mut dir = directory();
        let a = dir.add_stream(SpaceId::new(1), "A").unwrap();
        let b = dir.add_stream(SpaceId::new(9), "B").unwrap();
        assert!(b.id > a.id);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn ids_start_at_one_when_empty() {
        let seed = SeedDocument::parse(
            r#"{"availableSites": [{"id": "1", "name": "Lab"}],
                "labSpaces": [{"spaces": [{"id": 1, "name": "Bench", "streams": []}]}]}"#,
        )
        .unwrap();
        let mut dir = SpaceDirectory::from_seed(seed);
        let created = dir.add_stream(SpaceId::new(1), "First").unwrap();
        assert_eq!(created.id, StreamId::new(1));
    }

    #[test]
    fn id_overflow_is_reported() {
        let seed = SeedDocument::parse(&format!(
            r#"{{"availableSites": [{{"id": "1", "name": "Lab"}}],
                "labSpaces": [{{"spaces": [{{"id": 1, "name": "Bench",
                    "streams": [{{"id": {}, "name": "Last"}}]}}]}}]}}"#,
            u32::MAX
        ))
        .unwrap();
        let mut dir = SpaceDirectory::from_seed(seed);
        assert_eq!(
            dir.add_stream(SpaceId::new(1), "Overflow"),
            Err(DirectoryError::StreamIdsExhausted)
        );
    }

    #[test]
    fn delete_stream_preserves_remaining_order() {
        let mut dir = directory();
        let removed = dir.delete_stream(StreamId::new(12)).unwrap();
        assert_eq!(removed.name, "Elevator Lobby");
        assert_eq!(
            streams_of(&dir, 8),
            [(11, "Main Hallway".to_owned()), (13, "Reception".to_owned())]
        );
    }

    #[test]
    fn delete_twice_is_not_found() {
        let mut dir = directory();
        assert!(dir.delete_stream(StreamId::new(5)).is_ok());
        assert_eq!(
            dir.delete_stream(StreamId::new(5)),
            Err(DirectoryError::StreamNotFound(StreamId::new(5)))
        );
    }

    #[test]
    fn round_trip_add_then_list() {
        let mut dir = directory();
        let created = dir.add_stream(SpaceId::new(2), "X").unwrap();

        let groups = dir.list_spaces(&SiteId::from("1")).unwrap();
        let marketing = groups
            .iter()
            .flat_map(|g| &g.spaces)
            .find(|s| s.id == SpaceId::new(2))
            .unwrap();
        assert_eq!(
            marketing.streams.last(),
            Some(&Stream {
                id: created.id,
                name: "X".to_owned(),
            })
        );
    }

    #[test]
    fn deleted_id_can_be_reissued_only_if_it_was_the_max() {
        let mut dir = directory();
        let created = dir.add_stream(SpaceId::new(2), "Temp").unwrap();
        dir.delete_stream(created.id).unwrap();
        let again = dir.add_stream(SpaceId::new(2), "Temp").unwrap();
        assert_eq!(again.id, created.id);
    }

    #[test]
    fn counts_cover_all_sites() {
        let dir = directory();
        assert_eq!(dir.site_count(), 3);
        assert_eq!(dir.space_count(), 11);
        assert_eq!(dir.stream_count(), 16);
    }

    #[test]
    fn space_tree_for_toronto() {
        let dir = directory();
        let tree = dir.space_tree(&SiteId::from("2")).unwrap();
        let roots: Vec<u32> = tree.iter().map(|n| n.id.into_inner()).collect();
        assert_eq!(roots, [8, 10, 11]);

        let office = &tree[0];
        assert_eq!(office.children.len(), 1);
        let children: Vec<u32> = office.children[0]
            .children
            .iter()
            .map(|n| n.id.into_inner())
            .collect();
        assert_eq!(children, [4, 5, 6, 7, 9]);
    }
}
