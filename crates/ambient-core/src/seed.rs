//! Seed document loading.
//!
//! The seed is a JSON document with the site catalog under
//! `availableSites` and one space collection per site under a key
//! derived from the site name:
//!
//! ```json
//! {
//!   "availableSites": [{"id": "1", "name": "San Jose"}],
//!   "sanJoseSpaces": [{"spaces": [ ... ]}]
//! }
//! ```
//!
//! A site without a collection key has no spaces. Keys matching no site
//! are ignored with a warning.

use std::collections::BTreeMap;
use std::path::Path;

use ambient_types::{Site, SiteId, Space, SpaceId, SpacesGroup, Stream, StreamId};
use serde::Deserialize;
use tracing::{info, warn};

use crate::config::SeedConfig;

/// Errors that can occur when loading the seed document.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    /// The seed file could not be read.
    #[error("failed to read seed file {path}: {source}")]
    Io {
        /// Path that was read.
        path: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The seed content is not a valid seed document.
    #[error("failed to parse seed document: {source}")]
    Json {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },
}

/// The space groups belonging to one site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteSpaces {
    /// Owning site.
    pub site_id: SiteId,
    /// Groups in seed order.
    pub groups: Vec<SpacesGroup>,
}

/// A parsed seed document, resolved per site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedDocument {
    /// The site catalog in seed order.
    pub sites: Vec<Site>,
    /// One entry per site in catalog order.
    pub site_spaces: Vec<SiteSpaces>,
}

/// On-disk shape before per-site resolution.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSeed {
    available_sites: Vec<Site>,
    #[serde(flatten)]
    collections: BTreeMap<String, serde_json::Value>,
}

impl SeedDocument {
    /// Read and parse the seed document at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`SeedError::Io`] if the file cannot be read and
    /// [`SeedError::Json`] if it is not a valid seed document.
    pub fn from_file(path: &Path) -> Result<Self, SeedError> {
        let contents = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&contents)
    }

    /// Parse a seed document from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`SeedError::Json`] if the string is not a valid seed
    /// document.
    pub fn parse(json: &str) -> Result<Self, SeedError> {
        let mut raw: RawSeed = serde_json::from_str(json)?;

        let mut site_spaces = Vec::with_capacity(raw.available_sites.len());
        for site in &raw.available_sites {
            let key = collection_key(&site.name);
            let groups = match raw.collections.remove(&key) {
                Some(value) => serde_json::from_value::<Vec<SpacesGroup>>(value)?,
                None => Vec::new(),
            };
            site_spaces.push(SiteSpaces {
                site_id: site.id.clone(),
                groups,
            });
        }

        for key in raw.collections.keys() {
            warn!(key = %key, "seed key matches no site, ignoring");
        }

        Ok(Self {
            sites: raw.available_sites,
            site_spaces,
        })
    }

    /// Load the seed according to `config`.
    ///
    /// A missing file is an error unless `fallback_to_builtin` is set, in
    /// which case the built-in dataset is returned. Unreadable or
    /// malformed files are always errors.
    ///
    /// # Errors
    ///
    /// Propagates [`SeedError`] from [`Self::from_file`].
    pub fn load(config: &SeedConfig) -> Result<Self, SeedError> {
        match Self::from_file(&config.path) {
            Ok(seed) => {
                info!(path = %config.path.display(), "Seed document loaded");
                Ok(seed)
            }
            Err(SeedError::Io { path, source })
                if config.fallback_to_builtin
                    && source.kind() == std::io::ErrorKind::NotFound =>
            {
                warn!(path = %path, "Seed file not found, using built-in dataset");
                Ok(Self::builtin())
            }
            Err(e) => Err(e),
        }
    }

    /// The fixed built-in dataset: San Jose, Toronto, and the Mars
    /// fault-injection site with no spaces.
    pub fn builtin() -> Self {
        let sites = vec![
            site("1", "San Jose"),
            site("2", "Toronto"),
            site("3", "Mars"),
        ];

        let san_jose = vec![SpacesGroup {
            spaces: vec![
                space(1, "Main Building", None, &[(1, "Main Entrance"), (2, "Reception Desk")]),
                space(
                    2,
                    "Marketing",
                    Some(1),
                    &[(3, "Marketing Camera 1"), (4, "Marketing Camera 2")],
                ),
            ],
        }];

        let toronto = vec![
            SpacesGroup {
                spaces: vec![
                    space(3, "Corporate Office", Some(8), &[(5, "Executive Suite")]),
                    space(4, "Break Room", Some(3), &[(6, "Cafeteria View")]),
                    space(5, "Conference Room A", Some(3), &[(7, "Conference Room Front")]),
                    space(
                        6,
                        "Training Center",
                        Some(3),
                        &[(8, "Training Room 1"), (9, "Training Room 2")],
                    ),
                    space(7, "Cafeteria", Some(3), &[(10, "Dining Area")]),
                    space(
                        8,
                        "Corporate Office",
                        None,
                        &[(11, "Main Hallway"), (12, "Elevator Lobby"), (13, "Reception")],
                    ),
                    space(9, "Storage Room", Some(3), &[]),
                    space(10, "Research Wing", None, &[(14, "Lab Camera")]),
                ],
            },
            SpacesGroup {
                spaces: vec![space(
                    11,
                    "Warehouse",
                    None,
                    &[(15, "Loading Dock 1"), (16, "Loading Dock 2")],
                )],
            },
        ];

        Self {
            sites,
            site_spaces: vec![
                SiteSpaces {
                    site_id: SiteId::from("1"),
                    groups: san_jose,
                },
                SiteSpaces {
                    site_id: SiteId::from("2"),
                    groups: toronto,
                },
                SiteSpaces {
                    site_id: SiteId::from("3"),
                    groups: Vec::new(),
                },
            ],
        }
    }
}

/// Seed key holding a site's space collection: the site name in
/// lower camel case followed by `Spaces` (`"San Jose"` -> `sanJoseSpaces`).
///
/// Case in the name is normalized, so `"SAN JOSE"` maps to the same key.
pub fn collection_key(site_name: &str) -> String {
    let mut key = String::with_capacity(site_name.len().saturating_add(6));
    let words = site_name
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty());

    for (i, word) in words.enumerate() {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            if i == 0 {
                key.extend(first.to_lowercase());
            } else {
                key.extend(first.to_uppercase());
            }
            key.push_str(&chars.as_str().to_lowercase());
        }
    }

    key.push_str("Spaces");
    key
}

fn site(id: &str, name: &str) -> Site {
    Site {
        id: SiteId::from(id),
        name: name.to_owned(),
    }
}

fn space(id: u32, name: &str, parent: Option<u32>, streams: &[(u32, &str)]) -> Space {
    Space {
        id: SpaceId::new(id),
        name: name.to_owned(),
        streams: streams
            .iter()
            .map(|&(stream_id, stream_name)| Stream {
                id: StreamId::new(stream_id),
                name: stream_name.to_owned(),
            })
            .collect(),
        parent_space_id: parent.map(SpaceId::new),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    const SEED: &str = r#"{
        "availableSites": [
            {"id": "1", "name": "San Jose"},
            {"id": "2", "name": "Toronto"},
            {"id": "3", "name": "Mars"}
        ],
        "sanJoseSpaces": [
            {"spaces": [
                {"id": 1, "name": "Main Building", "parentSpaceId": null,
                 "streams": [{"id": 1, "name": "Main Entrance"}]},
                {"id": 2, "name": "Marketing", "parentSpaceId": 1,
                 "streams": [{"id": 3, "name": "Marketing Camera 1"}, {"id": 4, "name": "Marketing Camera 2"}]}
            ]}
        ],
        "torontoSpaces": [
            {"spaces": [{"id": 3, "name": "Warehouse", "streams": []}]},
            {"spaces": [{"id": 4, "name": "Annex", "streams": [{"id": 9, "name": "Dock"}]}]}
        ],
        "atlantisSpaces": []
    }"#;

    #[test]
    fn collection_key_is_lower_camel_case() {
        assert_eq!(collection_key("San Jose"), "sanJoseSpaces");
        assert_eq!(collection_key("Toronto"), "torontoSpaces");
        assert_eq!(collection_key("Mars"), "marsSpaces");
        assert_eq!(collection_key("new york-city"), "newYorkCitySpaces");
    }

    #[test]
    fn collection_key_ignores_input_case() {
        assert_eq!(collection_key("SAN JOSE"), "sanJoseSpaces");
        assert_eq!(collection_key("toRONTO"), "torontoSpaces");
        assert_eq!(collection_key("nEW yORK"), "newYorkSpaces");
    }

    #[test]
    fn parse_resolves_collections_per_site() {
        let seed = SeedDocument::parse(SEED).unwrap();
        assert_eq!(seed.sites.len(), 3);
        assert_eq!(seed.site_spaces.len(), 3);

        let san_jose = &seed.site_spaces[0];
        assert_eq!(san_jose.site_id, SiteId::from("1"));
        assert_eq!(san_jose.groups[0].spaces[1].name, "Marketing");
        assert_eq!(san_jose.groups[0].spaces[1].parent_space_id, Some(SpaceId::new(1)));

        let toronto = &seed.site_spaces[1];
        assert_eq!(toronto.groups.len(), 2);
        assert_eq!(toronto.groups[1].spaces[0].streams[0].id, StreamId::new(9));
    }

    #[test]
    fn site_without_collection_has_no_groups() {
        let seed = SeedDocument::parse(SEED).unwrap();
        let mars = &seed.site_spaces[2];
        assert_eq!(mars.site_id, SiteId::from("3"));
        assert!(mars.groups.is_empty());
    }

    #[test]
    fn missing_catalog_is_a_parse_error() {
        let result = SeedDocument::parse(r#"{"sanJoseSpaces": []}"#);
        assert!(matches!(result, Err(SeedError::Json { .. })));
    }

    #[test]
    fn malformed_collection_is_a_parse_error() {
        let json = r#"{"availableSites": [{"id": "1", "name": "Mars"}], "marsSpaces": {"oops": 1}}"#;
        assert!(matches!(
            SeedDocument::parse(json),
            Err(SeedError::Json { .. })
        ));
    }

    #[test]
    fn builtin_dataset_shape() {
        let seed = SeedDocument::builtin();
        let names: Vec<&str> = seed.sites.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["San Jose", "Toronto", "Mars"]);

        let stream_count: usize = seed
            .site_spaces
            .iter()
            .flat_map(|s| &s.groups)
            .flat_map(|g| &g.spaces)
            .map(|s| s.streams.len())
            .sum();
        assert_eq!(stream_count, 16);
    }

    #[test]
    fn shipped_seed_file_matches_builtin() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../seedData.json");
        let seed = SeedDocument::from_file(&path).unwrap();
        assert_eq!(seed, SeedDocument::builtin());
    }

    #[test]
    fn missing_file_without_fallback_fails() {
        let config = SeedConfig {
            path: PathBuf::from("/nonexistent/seedData.json"),
            fallback_to_builtin: false,
        };
        assert!(matches!(
            SeedDocument::load(&config),
            Err(SeedError::Io { .. })
        ));
    }

    #[test]
    fn missing_file_with_fallback_uses_builtin() {
        let config = SeedConfig {
            path: PathBuf::from("/nonexistent/seedData.json"),
            fallback_to_builtin: true,
        };
        let seed = SeedDocument::load(&config).unwrap();
        assert_eq!(seed, SeedDocument::builtin());
    }

    #[test]
    fn malformed_file_with_fallback_still_fails() {
        let unique = format!(
            "ambient_test_seed_{}_{:?}.json",
            std::process::id(),
            std::thread::current().id(),
        );
        let path = std::env::temp_dir().join(unique);
        std::fs::write(&path, "{ not json").unwrap();

        let config = SeedConfig {
            path: path.clone(),
            fallback_to_builtin: true,
        };
        let result = SeedDocument::load(&config);
        std::fs::remove_file(&path).ok();

        assert!(matches!(result, Err(SeedError::Json { .. })));
    }

    #[test]
    fn unreadable_path_with_fallback_still_fails() {
        // A directory exists but cannot be read as a file, so the error
        // kind is not NotFound.
        let config = SeedConfig {
            path: PathBuf::from(env!("CARGO_MANIFEST_DIR")),
            fallback_to_builtin: true,
        };
        let result = SeedDocument::load(&config);
        assert!(
            matches!(
                &result,
                Err(SeedError::Io { source, .. })
                    if source.kind() != std::io::ErrorKind::NotFound
            ),
            "expected a non-NotFound I/O error, got {result:?}"
        );
    }
}
