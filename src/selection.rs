//! SelectionController - selection mode, marquee and the selected set.
//!
//! While selection mode is on, pan and zoom are switched off; their previous
//! values come back when the mode is left. A marquee selects an entity only if
//! its box lies strictly inside the marquee.

use crate::coords::CoordinateService;
use crate::graph::{EdgeEnd, GraphStore};
use crate::types::{EdgeId, EdgeKind, EndpointId, EntityKind, EntityRef, GroupId, NodeId, Point, Rect};
use crate::viewport::ViewportController;
use serde::Serialize;
use tracing::debug;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct EndpointRef {
    pub node: NodeId,
    pub endpoint: EndpointId,
}

/// Selected entities, per category.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SelectionSet {
    pub nodes: Vec<NodeId>,
    pub edges: Vec<EdgeId>,
    pub groups: Vec<GroupId>,
    pub endpoints: Vec<EndpointRef>,
}

impl SelectionSet {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
            && self.edges.is_empty()
            && self.groups.is_empty()
            && self.endpoints.is_empty()
    }

    pub fn contains_node(&self, id: &NodeId) -> bool {
        self.nodes.contains(id)
    }
}

/// Pointer-space marquee being drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Marquee {
    anchor: Point,
    current: Point,
}

#[derive(Debug)]
pub struct SelectionController {
    enabled: bool,
    categories: Vec<EntityKind>,
    selection: SelectionSet,
    marquee: Option<Marquee>,
    /// (zoomable, moveable) before selection mode was entered
    remembered: Option<(bool, bool)>,
}

impl Default for SelectionController {
    fn default() -> Self {
        Self {
            enabled: false,
            categories: vec![EntityKind::Node],
            selection: SelectionSet::default(),
            marquee: None,
            remembered: None,
        }
    }
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn categories(&self) -> &[EntityKind] {
        &self.categories
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Enter selection mode for the given categories.
    pub fn enable(&mut self, viewport: &mut ViewportController, categories: &[EntityKind]) {
        self.categories = categories.to_vec();
        if self.enabled {
            return;
        }
        self.enabled = true;
        self.remembered = Some((viewport.is_zoomable(), viewport.is_moveable()));
        viewport.set_zoomable(false);
        viewport.set_moveable(false);
        debug!(categories = ?self.categories, "Selection mode on");
    }

    /// Leave selection mode, restoring pan/zoom and clearing the selection.
    pub fn disable(&mut self, viewport: &mut ViewportController) {
        if !self.enabled {
            return;
        }
        self.enabled = false;
        if let Some((zoomable, moveable)) = self.remembered.take() {
            viewport.set_zoomable(zoomable);
            viewport.set_moveable(moveable);
        }
        self.marquee = None;
        self.selection = SelectionSet::default();
        debug!("Selection mode off");
    }

    pub fn clear(&mut self) {
        self.selection = SelectionSet::default();
    }

    pub fn set_selection(&mut self, selection: SelectionSet) {
        self.selection = selection;
    }

    /// Drop selected entities that are no longer in the store.
    pub fn forget(&mut self, store: &GraphStore) {
        let selection = &mut self.selection;
        selection.nodes.retain(|id| store.node(id).is_some());
        selection.edges.retain(|id| store.edge(id).is_some());
        selection.groups.retain(|id| store.group(id).is_some());
        selection
            .endpoints
            .retain(|e| store.endpoint(&e.node, &e.endpoint).is_some());
    }

    /// Add one entity to the selection if it exists and is not already in it.
    pub fn add(&mut self, store: &GraphStore, entity: &EntityRef) -> bool {
        fn push<T: PartialEq>(list: &mut Vec<T>, item: T) -> bool {
            if list.contains(&item) {
                return false;
            }
            list.push(item);
            true
        }

        match entity {
            EntityRef::Node { id } if store.node(id).is_some() => {
                push(&mut self.selection.nodes, id.clone())
            }
            EntityRef::Group { id } if store.group(id).is_some() => {
                push(&mut self.selection.groups, id.clone())
            }
            EntityRef::Edge { id } if store.edge(id).is_some() => {
                push(&mut self.selection.edges, id.clone())
            }
            EntityRef::Endpoint { node, id } if store.endpoint(node, id).is_some() => push(
                &mut self.selection.endpoints,
                EndpointRef {
                    node: node.clone(),
                    endpoint: id.clone(),
                },
            ),
            _ => false,
        }
    }

    // ========================================================================
    // Marquee
    // ========================================================================

    pub fn begin_marquee(&mut self, at: Point) {
        self.marquee = Some(Marquee {
            anchor: at,
            current: at,
        });
    }

    pub fn update_marquee(&mut self, at: Point) {
        if let Some(marquee) = self.marquee.as_mut() {
            marquee.current = at;
        }
    }

    /// The marquee currently drawn, in pointer-space.
    pub fn marquee_rect(&self) -> Option<Rect> {
        self.marquee
            .map(|m| Rect::from_corners(m.anchor, m.current))
    }

    pub fn take_marquee(&mut self) -> Option<Rect> {
        let rect = self.marquee_rect();
        self.marquee = None;
        rect
    }

    /// Everything of an enabled category lying strictly inside `marquee`
    /// (pointer-space). Node-kind edges and groups are never matched.
    pub fn select_in_rect(&self, store: &GraphStore, coords: &CoordinateService, marquee: Rect) -> SelectionSet {
        let area = coords.terminal_to_canvas_rect(marquee);
        let mut result = SelectionSet::default();

        if self.categories.contains(&EntityKind::Node) {
            result.nodes = store
                .nodes()
                .iter()
                .filter(|n| {
                    store
                        .node_bounds(&n.id)
                        .is_some_and(|b| area.strictly_contains_rect(&b))
                })
                .map(|n| n.id.clone())
                .collect();
        }

        if self.categories.contains(&EntityKind::Endpoint) {
            result.endpoints = store
                .endpoints()
                .filter(|e| area.strictly_contains_rect(&e.bounds()))
                .map(|e| EndpointRef {
                    node: e.node.clone(),
                    endpoint: e.id.clone(),
                })
                .collect();
        }

        if self.categories.contains(&EntityKind::Edge) {
            let endpoint_box = |end: &EdgeEnd| match end {
                EdgeEnd::Endpoint { node, endpoint } => store.endpoint(node, endpoint).map(|e| e.bounds()),
                EdgeEnd::Node { .. } => None,
            };
            result.edges = store
                .edges()
                .iter()
                .filter(|e| e.kind == EdgeKind::Endpoint && !e.is_orphaned())
                .filter(|e| {
                    match (endpoint_box(&e.source), endpoint_box(&e.target)) {
                        (Some(a), Some(b)) => area.strictly_contains_rect(&a.union(&b)),
                        _ => false,
                    }
                })
                .map(|e| e.id.clone())
                .collect();
        }

        debug!(
            nodes = result.nodes.len(),
            endpoints = result.endpoints.len(),
            edges = result.edges.len(),
            "Marquee selection"
        );
        result
    }
}
