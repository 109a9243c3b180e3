//! Group membership changes after a node drag.

use crate::graph::{Group, GraphStore};
use crate::types::{GroupId, NodeId, Rect};
use serde::Serialize;

/// What happens to a dragged node's group membership on release.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Reparent {
    Stay,
    Extract { from: GroupId },
    Insert { into: GroupId },
    Transfer { from: GroupId, into: GroupId },
}

/// Decide the membership change for `node` at its current position.
///
/// A grouped node stays put while its box still overlaps its group. Once
/// outside, or when ungrouped, it goes to the smallest other group that fully
/// contains it (declaration order breaks ties), or to the root surface.
pub fn plan_reparent(store: &GraphStore, node: &NodeId) -> Reparent {
    let Some(bounds) = store.node_bounds(node) else {
        return Reparent::Stay;
    };
    let current = store.node(node).and_then(|n| n.group().cloned());

    let still_inside = current
        .as_ref()
        .and_then(|g| store.group(g))
        .is_some_and(|group| bounds.overlaps(&group.bounds));
    if still_inside {
        return Reparent::Stay;
    }

    let target = smallest_container(store.groups(), &bounds, current.as_ref());
    match (current, target) {
        (None, None) => Reparent::Stay,
        (None, Some(into)) => Reparent::Insert { into },
        (Some(from), None) => Reparent::Extract { from },
        (Some(from), Some(into)) => Reparent::Transfer { from, into },
    }
}

fn smallest_container(groups: &[Group], bounds: &Rect, exclude: Option<&GroupId>) -> Option<GroupId> {
    groups
        .iter()
        .filter(|g| Some(&g.id) != exclude && g.bounds.contains_rect(bounds))
        .min_by(|a, b| a.bounds.area().total_cmp(&b.bounds.area()))
        .map(|g| g.id.clone())
}
