//! Parent/child forest projection of a site's spaces.
//!
//! Spaces reference their parent through `parentSpaceId`. The flat seed
//! order is kept: roots appear in seed order, and each node's children
//! appear in seed order. A space whose parent is not part of the same
//! site is left out of the forest, as are spaces caught in a parent
//! cycle (no root reaches them).

use std::collections::{BTreeMap, BTreeSet};

use ambient_types::{Space, SpaceId, SpaceNode};

/// Build the forest for the given spaces.
pub fn build_forest<'a, I>(spaces: I) -> Vec<SpaceNode>
where
    I: IntoIterator<Item = &'a Space>,
{
    let spaces: Vec<&Space> = spaces.into_iter().collect();
    let known: BTreeSet<SpaceId> = spaces.iter().map(|s| s.id).collect();

    let mut children: BTreeMap<SpaceId, Vec<&Space>> = BTreeMap::new();
    let mut roots = Vec::new();
    for space in &spaces {
        match space.parent_space_id {
            None => roots.push(*space),
            Some(parent) if known.contains(&parent) => {
                children.entry(parent).or_default().push(*space);
            }
            Some(_) => {}
        }
    }

    let mut path = BTreeSet::new();
    roots
        .into_iter()
        .map(|root| attach(root, &children, &mut path))
        .collect()
}

/// Build `space`'s node and recurse into its children.
///
/// `path` holds the ids on the current root-to-node path so a seed with
/// duplicated ids cannot recurse forever.
fn attach(
    space: &Space,
    children: &BTreeMap<SpaceId, Vec<&Space>>,
    path: &mut BTreeSet<SpaceId>,
) -> SpaceNode {
    let mut node = SpaceNode::leaf(space);
    path.insert(space.id);

    if let Some(kids) = children.get(&space.id) {
        for child in kids {
            if !path.contains(&child.id) {
                node.children.push(attach(child, children, path));
            }
        }
    }

    path.remove(&space.id);
    node
}
