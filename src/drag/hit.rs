//! Pointer hit testing against endpoints, group handles and node bodies.

use crate::constants::LINK_HIT_TOLERANCE;
use crate::graph::GraphStore;
use crate::spatial_index::SpatialIndex;
use crate::types::{EndpointId, GroupId, NodeId, Point};

/// Something a press can land on.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum HitTarget {
    Endpoint { node: NodeId, endpoint: EndpointId },
    GroupHandle { group: GroupId },
    Node { node: NodeId },
}

impl HitTarget {
    /// Lower ranks win over higher ones.
    fn rank(&self) -> u8 {
        match self {
            HitTarget::Endpoint { .. } => 0,
            HitTarget::GroupHandle { .. } => 1,
            HitTarget::Node { .. } => 2,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct HitKey {
    /// Draw order; later is on top
    order: usize,
    target: HitTarget,
}

/// Everything under `at` (canvas-space), best candidate first: endpoints,
/// then group handles, then node bodies, topmost first within each class.
pub fn hit_test(store: &GraphStore, at: Point) -> Vec<HitTarget> {
    let groups = store.groups().iter().map(|g| {
        (
            HitTarget::GroupHandle { group: g.id.clone() },
            g.handle_rect(),
        )
    });
    let nodes = store.nodes().iter().filter_map(|n| {
        store
            .node_bounds(&n.id)
            .map(|b| (HitTarget::Node { node: n.id.clone() }, b))
    });
    let endpoints = store.endpoints().map(|e| {
        (
            HitTarget::Endpoint {
                node: e.node.clone(),
                endpoint: e.id.clone(),
            },
            e.bounds(),
        )
    });

    let index = SpatialIndex::from_items(
        groups
            .chain(nodes)
            .chain(endpoints)
            .enumerate()
            .map(|(order, (target, bounds))| (HitKey { order, target }, bounds)),
    );

    let mut hits = index.query_point(at);
    hits.sort_by(|a, b| {
        a.target
            .rank()
            .cmp(&b.target.rank())
            .then(b.order.cmp(&a.order))
    });
    hits.into_iter().map(|k| k.target).collect()
}

/// The endpoint a link released at `at` lands on: among the endpoints whose
/// box grown by the link tolerance strictly contains the point, the one
/// declared last.
pub fn link_target(store: &GraphStore, at: Point) -> Option<(NodeId, EndpointId)> {
    let index = SpatialIndex::from_items(store.endpoints().enumerate().map(|(order, e)| {
        (
            (order, e.node.clone(), e.id.clone()),
            e.bounds().expand(LINK_HIT_TOLERANCE),
        )
    }));

    index
        .query_point(at)
        .into_iter()
        .filter(|key| {
            index
                .bounds(key)
                .is_some_and(|b| b.strictly_contains_point(at))
        })
        .max_by_key(|(order, _, _)| *order)
        .map(|(_, node, endpoint)| (node, endpoint))
}
