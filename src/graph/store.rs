//! GraphStore - the authoritative node, edge and group collections.
//!
//! The store is the only place entities are created or destroyed. Every
//! mutation either completes fully or leaves the graph untouched:
//! - an edge exists only while both of its ends resolve (or it is explicitly
//!   orphaned by `remove_node(.., keep_edges = true)`)
//! - a node's `Placement` frame always matches its group's member list
//! - endpoint boxes are recomputed whenever a node's absolute origin changes
//!
//! Collections are plain vectors so declaration order is preserved; it drives
//! draw order and the topmost-wins rule of hit testing.

use super::edge::{DraftEdge, Edge, EdgeEnd};
use super::endpoint::Endpoint;
use super::group::Group;
use super::node::Node;
use crate::config::ThemeConfig;
use crate::constants::DEFAULT_SHAPE_KIND;
use crate::error::{GraphError, GraphResult, LinkRejection};
use crate::events::{CanvasEvent, EventBus};
use crate::registry::ShapeRegistry;
use crate::render::EdgeStyle;
use crate::types::{
    EdgeId, EdgeKind, EdgeSpec, EndpointId, EntityId, EntityKind, GroupId, GroupSpec, NodeId,
    NodeSpec, Placement, Point, Rect,
};
use serde::Serialize;
use tracing::{debug, warn};
use uuid::Uuid;

/// What `remove_node` took out of the graph.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RemovedNode {
    pub node: NodeSpec,
    /// Edges destroyed along with the node; empty with `keep_edges`
    pub edges: Vec<EdgeSpec>,
}

/// What `remove_group` took out of the graph.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RemovedGroup {
    pub group: GroupSpec,
    /// Former members, now placed absolutely
    pub released: Vec<NodeId>,
}

/// Serializable snapshot of the whole graph.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct DataMap {
    pub nodes: Vec<NodeSpec>,
    pub edges: Vec<EdgeSpec>,
    pub groups: Vec<GroupSpec>,
}

#[derive(Debug)]
pub struct GraphStore {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    groups: Vec<Group>,
    registry: ShapeRegistry,
    theme: ThemeConfig,
    bus: EventBus,
}

impl GraphStore {
    pub fn new(bus: EventBus, registry: ShapeRegistry, theme: ThemeConfig) -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            groups: Vec::new(),
            registry,
            theme,
            bus,
        }
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    pub fn edge(&self, id: &EdgeId) -> Option<&Edge> {
        self.edges.iter().find(|e| &e.id == id)
    }

    pub fn group(&self, id: &GroupId) -> Option<&Group> {
        self.groups.iter().find(|g| &g.id == id)
    }

    pub fn endpoint(&self, node: &NodeId, endpoint: &EndpointId) -> Option<&Endpoint> {
        self.node(node)?.endpoint(endpoint)
    }

    /// Every endpoint in node declaration order.
    pub fn endpoints(&self) -> impl Iterator<Item = &Endpoint> {
        self.nodes.iter().flat_map(|n| n.endpoints.iter())
    }

    fn node_index(&self, id: &NodeId) -> Option<usize> {
        self.nodes.iter().position(|n| &n.id == id)
    }

    fn edge_index(&self, id: &EdgeId) -> Option<usize> {
        self.edges.iter().position(|e| &e.id == id)
    }

    fn group_index(&self, id: &GroupId) -> Option<usize> {
        self.groups.iter().position(|g| &g.id == id)
    }

    fn resolve_placement(&self, placement: &Placement) -> Point {
        let origin = placement
            .group()
            .and_then(|g| self.group(g))
            .map(|g| g.origin())
            .unwrap_or(Point::ZERO);
        placement.resolve(origin)
    }

    /// Absolute canvas-space origin of a node.
    pub fn node_origin(&self, id: &NodeId) -> Option<Point> {
        self.node(id).map(|n| self.resolve_placement(&n.placement))
    }

    /// Absolute canvas-space bounds of a node.
    pub fn node_bounds(&self, id: &NodeId) -> Option<Rect> {
        let node = self.node(id)?;
        let origin = self.resolve_placement(&node.placement);
        Some(Rect::from_origin_size(origin, node.size))
    }

    pub fn data_map(&self) -> DataMap {
        DataMap {
            nodes: self.nodes.iter().map(Node::to_spec).collect(),
            edges: self.edges.iter().map(Edge::to_spec).collect(),
            groups: self.groups.iter().map(Group::to_spec).collect(),
        }
    }

    // ========================================================================
    // Nodes
    // ========================================================================

    /// Add a node. If `spec.group` names an existing group the position is
    /// group-relative and the node joins that group; otherwise it is placed
    /// absolutely on the root surface.
    pub fn add_node(&mut self, spec: NodeSpec) -> GraphResult<&Node> {
        if self.node_index(&spec.id).is_some() {
            warn!(node = %spec.id, "Node already exists, ignoring add");
            return Err(GraphError::duplicate(EntityKind::Node, spec.id));
        }

        let at = Point::new(spec.left, spec.top);
        let group_idx = match &spec.group {
            Some(g) => {
                let idx = self.group_index(g);
                if idx.is_none() {
                    warn!(node = %spec.id, group = %g, "Owning group not found, placing node on the root surface");
                }
                idx
            }
            None => None,
        };

        let (placement, parent, origin) = match group_idx {
            Some(gi) => {
                let group = &self.groups[gi];
                (
                    Placement::local(group.id.clone(), at),
                    Some(group.handle),
                    at + group.origin(),
                )
            }
            None => (Placement::absolute(at), None, at),
        };

        let kind = spec
            .kind
            .clone()
            .unwrap_or_else(|| DEFAULT_SHAPE_KIND.to_string());
        let size = spec.size();
        let mut shape = self.registry.create_node(&kind);
        let handle = shape.init(&spec.id);
        shape.mount(parent);
        shape.move_to(at);

        let mut endpoints: Vec<Endpoint> = spec
            .endpoints
            .iter()
            .map(|e| Endpoint::from_spec(&spec.id, e, size))
            .collect();
        for endpoint in &mut endpoints {
            endpoint.update_pos(origin);
        }

        if let Some(gi) = group_idx {
            self.groups[gi].members.push(spec.id.clone());
        }

        debug!(node = %spec.id, x = at.x, y = at.y, grouped = group_idx.is_some(), "Node added");

        let idx = self.nodes.len();
        let id = spec.id;
        self.nodes.push(Node {
            id: id.clone(),
            placement,
            size,
            endpoints,
            kind,
            handle,
            shape,
        });

        self.revive_orphans(&id);
        Ok(&self.nodes[idx])
    }

    /// Add nodes in order, skipping the ones that fail. Returns the ids added.
    pub fn add_nodes(&mut self, specs: impl IntoIterator<Item = NodeSpec>) -> Vec<NodeId> {
        specs
            .into_iter()
            .filter_map(|spec| self.add_node(spec).ok().map(|n| n.id.clone()))
            .collect()
    }

    /// Remove a node and, unless `keep_edges`, every edge touching it.
    ///
    /// With `keep_edges` the neighbour edges stay in the store flagged as
    /// orphaned; they are skipped by redraw and selection until a node with
    /// the same id is added again.
    pub fn remove_node(&mut self, id: &NodeId, keep_edges: bool) -> GraphResult<RemovedNode> {
        let Some(idx) = self.node_index(id) else {
            warn!(node = %id, "Cannot remove unknown node");
            return Err(GraphError::unknown(EntityKind::Node, id));
        };

        let mut edges = Vec::new();
        if keep_edges {
            for edge in self.edges.iter_mut().filter(|e| e.touches(id)) {
                edge.orphaned = true;
            }
        } else {
            for edge_id in self.neighbor_edge_ids(id) {
                if let Ok(spec) = self.remove_edge(&edge_id) {
                    edges.push(spec);
                }
            }
        }

        let mut node = self.nodes.remove(idx);
        if let Some(gi) = node.group().and_then(|g| self.group_index(g)) {
            self.groups[gi].members.retain(|m| m != id);
        }
        node.shape.destroy();

        debug!(node = %id, edges = edges.len(), keep_edges, "Node removed");
        self.bus.publish(CanvasEvent::NodeDelete {
            kind: EntityKind::Node,
            id: id.clone(),
        });

        Ok(RemovedNode {
            node: node.to_spec(),
            edges,
        })
    }

    pub fn remove_nodes(&mut self, ids: &[NodeId], keep_edges: bool) -> Vec<RemovedNode> {
        ids.iter()
            .filter_map(|id| self.remove_node(id, keep_edges).ok())
            .collect()
    }

    /// Edges orphaned by a `keep_edges` removal come back once both of their
    /// ends resolve again.
    fn revive_orphans(&mut self, node: &NodeId) {
        let revived: Vec<usize> = self
            .edges
            .iter()
            .enumerate()
            .filter(|(_, e)| {
                e.orphaned && e.touches(node) && self.resolves(&e.source) && self.resolves(&e.target)
            })
            .map(|(i, _)| i)
            .collect();

        for i in revived {
            let source_group = self.group_of(self.edges[i].source.node());
            let target_group = self.group_of(self.edges[i].target.node());
            let edge = &mut self.edges[i];
            edge.orphaned = false;
            edge.source_group = source_group;
            edge.target_group = target_group;
            debug!(edge = %edge.id, "Orphaned edge reattached");
            self.redraw_edge_at(i);
        }
    }

    fn group_of(&self, node: &NodeId) -> Option<GroupId> {
        self.node(node).and_then(|n| n.group().cloned())
    }

    fn resolves(&self, end: &EdgeEnd) -> bool {
        match end {
            EdgeEnd::Node { node } => self.node(node).is_some(),
            EdgeEnd::Endpoint { node, endpoint } => self.endpoint(node, endpoint).is_some(),
        }
    }

    // ========================================================================
    // Edges
    // ========================================================================

    fn edge_style(&self, shape_type: Option<String>, label: Option<String>, arrow: bool) -> EdgeStyle {
        EdgeStyle {
            shape_type: shape_type.unwrap_or_else(|| self.theme.edge.shape_type.clone()),
            label,
            arrow: arrow || self.theme.edge.arrow,
            orientation_limit: self.theme.endpoint.position.clone(),
        }
    }

    fn resolve_end(
        &self,
        edge: &EdgeId,
        kind: EdgeKind,
        reference: &EntityId,
        owner: Option<&NodeId>,
    ) -> GraphResult<EdgeEnd> {
        let unresolved = || {
            warn!(edge = %edge, reference = %reference, "Cannot resolve edge end");
            GraphError::UnresolvableEndpointReference {
                edge: edge.clone(),
                reference: reference.clone(),
            }
        };

        match kind {
            EdgeKind::Node => self
                .node(reference)
                .map(|n| EdgeEnd::Node { node: n.id.clone() })
                .ok_or_else(unresolved),
            EdgeKind::Endpoint => {
                let node = match owner {
                    Some(owner) => self.node(owner).filter(|n| n.endpoint(reference).is_some()),
                    None => self.nodes.iter().find(|n| n.endpoint(reference).is_some()),
                };
                node.map(|n| EdgeEnd::Endpoint {
                    node: n.id.clone(),
                    endpoint: reference.clone(),
                })
                .ok_or_else(unresolved)
            }
        }
    }

    /// Add an edge. Both ends are resolved before anything is created; the
    /// new edge is drawn once with its anchor points.
    pub fn add_edge(&mut self, spec: EdgeSpec) -> GraphResult<&Edge> {
        let id = spec
            .id
            .clone()
            .unwrap_or_else(|| EdgeId::new(Uuid::new_v4().to_string()));
        if self.edge_index(&id).is_some() {
            warn!(edge = %id, "Edge already exists, ignoring add");
            return Err(GraphError::duplicate(EntityKind::Edge, id));
        }

        let source = self.resolve_end(&id, spec.kind, &spec.source, spec.source_node.as_ref())?;
        let target = self.resolve_end(&id, spec.kind, &spec.target, spec.target_node.as_ref())?;

        let style = self.edge_style(spec.shape_type, spec.label, spec.arrow);
        let mut shape = self.registry.create_edge(&self.theme.edge.kind);
        let handle = shape.init(&style);
        shape.assign_id(&id);

        let source_group = self.group_of(source.node());
        let target_group = self.group_of(target.node());
        let idx = self.edges.len();
        self.edges.push(Edge {
            source_group,
            target_group,
            id,
            kind: spec.kind,
            source,
            target,
            style,
            orphaned: false,
            handle,
            shape,
        });
        self.redraw_edge_at(idx);

        Ok(&self.edges[idx])
    }

    pub fn add_edges(&mut self, specs: impl IntoIterator<Item = EdgeSpec>) -> Vec<EdgeId> {
        specs
            .into_iter()
            .filter_map(|spec| self.add_edge(spec).ok().map(|e| e.id.clone()))
            .collect()
    }

    pub fn remove_edge(&mut self, id: &EdgeId) -> GraphResult<EdgeSpec> {
        let Some(idx) = self.edge_index(id) else {
            warn!(edge = %id, "Cannot remove unknown edge");
            return Err(GraphError::unknown(EntityKind::Edge, id));
        };

        let mut edge = self.edges.remove(idx);
        edge.shape.destroy();
        debug!(edge = %id, "Edge removed");
        Ok(edge.to_spec())
    }

    pub fn remove_edges(&mut self, ids: &[EdgeId]) -> Vec<EdgeSpec> {
        ids.iter()
            .filter_map(|id| self.remove_edge(id).ok())
            .collect()
    }

    /// Edges with the node as source or target, orphaned ones included.
    pub fn neighbor_edges(&self, node: &NodeId) -> Vec<&Edge> {
        self.edges.iter().filter(|e| e.touches(node)).collect()
    }

    pub fn neighbor_edge_ids(&self, node: &NodeId) -> Vec<EdgeId> {
        self.edges
            .iter()
            .filter(|e| e.touches(node))
            .map(|e| e.id.clone())
            .collect()
    }

    /// Nodes at the other end of every edge touching `node`, first-seen order.
    pub fn neighbor_nodes(&self, node: &NodeId) -> Vec<NodeId> {
        if self.node(node).is_none() {
            debug!(node = %node, "Neighbour query for unknown node");
        }
        let mut result: Vec<NodeId> = Vec::new();
        for other in self.edges.iter().filter_map(|e| e.other_node(node)) {
            if !result.contains(other) {
                result.push(other.clone());
            }
        }
        result
    }

    /// Edges with an end on a member of `group`.
    pub fn edges_touching_group(&self, group: &GroupId) -> Vec<EdgeId> {
        self.edges
            .iter()
            .filter(|e| e.touches_group(group))
            .map(|e| e.id.clone())
            .collect()
    }

    // ========================================================================
    // Groups
    // ========================================================================

    pub fn add_group(&mut self, spec: GroupSpec) -> GraphResult<&Group> {
        if self.group_index(&spec.id).is_some() {
            warn!(group = %spec.id, "Group already exists, ignoring add");
            return Err(GraphError::duplicate(EntityKind::Group, spec.id));
        }

        let bounds = Rect::from_origin_size(Point::new(spec.left, spec.top), spec.size());
        let kind = spec
            .kind
            .clone()
            .unwrap_or_else(|| DEFAULT_SHAPE_KIND.to_string());
        let mut shape = self.registry.create_group(&kind);
        let handle = shape.init(&spec.id);
        shape.move_to(bounds.origin());

        debug!(group = %spec.id, "Group added");
        let idx = self.groups.len();
        self.groups.push(Group {
            id: spec.id,
            bounds,
            members: Vec::new(),
            kind,
            handle,
            shape,
        });
        Ok(&self.groups[idx])
    }

    pub fn add_groups(&mut self, specs: impl IntoIterator<Item = GroupSpec>) -> Vec<GroupId> {
        specs
            .into_iter()
            .filter_map(|spec| self.add_group(spec).ok().map(|g| g.id.clone()))
            .collect()
    }

    /// Remove a group. Members are kept and rebased to absolute coordinates.
    pub fn remove_group(&mut self, id: &GroupId) -> GraphResult<RemovedGroup> {
        let Some(idx) = self.group_index(id) else {
            warn!(group = %id, "Cannot remove unknown group");
            return Err(GraphError::unknown(EntityKind::Group, id));
        };

        let mut group = self.groups.remove(idx);
        let origin = group.origin();
        for node in self.nodes.iter_mut().filter(|n| n.group() == Some(id)) {
            let absolute = node.placement.resolve(origin);
            node.placement = Placement::absolute(absolute);
            node.shape.mount(None);
            node.sync_shape();
            node.refresh_endpoints(absolute);
        }
        for edge in &mut self.edges {
            if edge.source_group.as_ref() == Some(id) {
                edge.source_group = None;
            }
            if edge.target_group.as_ref() == Some(id) {
                edge.target_group = None;
            }
        }
        group.shape.destroy();

        debug!(group = %id, released = group.members.len(), "Group removed");
        self.bus.publish(CanvasEvent::NodeDelete {
            kind: EntityKind::Group,
            id: id.clone(),
        });

        Ok(RemovedGroup {
            group: group.to_spec(),
            released: group.members,
        })
    }

    // ========================================================================
    // Movement & Membership
    // ========================================================================

    /// Move a node by `delta` in its own frame. Edges are not redrawn; callers
    /// batch that with [`GraphStore::redraw_node_edges`].
    pub fn translate_node(&mut self, id: &NodeId, delta: Point) -> GraphResult<()> {
        let Some(idx) = self.node_index(id) else {
            return Err(GraphError::unknown(EntityKind::Node, id));
        };

        self.nodes[idx].placement.translate(delta);
        let origin = self.resolve_placement(&self.nodes[idx].placement);
        let node = &mut self.nodes[idx];
        node.sync_shape();
        node.refresh_endpoints(origin);
        Ok(())
    }

    /// Move a group by `delta`. Members ride along since they are stored
    /// group-relative; only their endpoint boxes need refreshing.
    pub fn translate_group(&mut self, id: &GroupId, delta: Point) -> GraphResult<()> {
        let Some(gi) = self.group_index(id) else {
            return Err(GraphError::unknown(EntityKind::Group, id));
        };

        let group = &mut self.groups[gi];
        group.bounds = group.bounds.translate(delta);
        let origin = group.bounds.origin();
        group.shape.move_to(origin);

        for node in self.nodes.iter_mut().filter(|n| n.group() == Some(id)) {
            let absolute = node.placement.resolve(origin);
            node.refresh_endpoints(absolute);
        }
        Ok(())
    }

    /// Take a node out of its group, rebasing it to absolute coordinates.
    /// Returns false if the node was not grouped.
    pub fn detach_from_group(&mut self, id: &NodeId) -> GraphResult<bool> {
        let Some(idx) = self.node_index(id) else {
            return Err(GraphError::unknown(EntityKind::Node, id));
        };
        let Some(group_id) = self.nodes[idx].group().cloned() else {
            return Ok(false);
        };

        let mut origin = Point::ZERO;
        if let Some(gi) = self.group_index(&group_id) {
            let group = &mut self.groups[gi];
            group.members.retain(|m| m != id);
            origin = group.origin();
        }

        let node = &mut self.nodes[idx];
        let absolute = node.placement.resolve(origin);
        node.placement = Placement::absolute(absolute);
        node.shape.mount(None);
        node.sync_shape();
        node.refresh_endpoints(absolute);

        self.set_edge_groups(id, None);
        debug!(node = %id, group = %group_id, "Node extracted from group");
        Ok(true)
    }

    /// Put a node into `group`, rebasing it to group-relative coordinates.
    /// A node already in another group is extracted from it first.
    pub fn attach_to_group(&mut self, id: &NodeId, group: &GroupId) -> GraphResult<()> {
        let Some(gi) = self.group_index(group) else {
            return Err(GraphError::unknown(EntityKind::Group, group));
        };
        match self.node(id) {
            None => return Err(GraphError::unknown(EntityKind::Node, id)),
            Some(node) if node.group() == Some(group) => return Ok(()),
            Some(_) => {}
        }

        self.detach_from_group(id)?;
        let Some(idx) = self.node_index(id) else {
            return Err(GraphError::unknown(EntityKind::Node, id));
        };

        let origin = self.groups[gi].origin();
        let parent = self.groups[gi].handle;
        let node = &mut self.nodes[idx];
        let absolute = node.placement.position();
        node.placement = Placement::local(group.clone(), absolute - origin);
        node.shape.mount(Some(parent));
        node.sync_shape();
        node.refresh_endpoints(absolute);
        self.groups[gi].members.push(id.clone());

        self.set_edge_groups(id, Some(group));
        debug!(node = %id, group = %group, "Node inserted into group");
        Ok(())
    }

    fn set_edge_groups(&mut self, node: &NodeId, group: Option<&GroupId>) {
        for edge in self.edges.iter_mut().filter(|e| e.touches(node)) {
            edge.set_node_group(node, group);
        }
    }

    // ========================================================================
    // Redraw
    // ========================================================================

    fn anchor(&self, end: &EdgeEnd) -> Option<Point> {
        match end {
            EdgeEnd::Node { node } => self.node_bounds(node).map(|b| b.center()),
            EdgeEnd::Endpoint { node, endpoint } => self.endpoint(node, endpoint).map(|e| e.center()),
        }
    }

    /// Canvas-space anchor points of an edge: endpoint centres for endpoint
    /// edges, node centres for node edges.
    pub fn anchor_points(&self, edge: &Edge) -> Option<(Point, Point)> {
        Some((self.anchor(&edge.source)?, self.anchor(&edge.target)?))
    }

    fn redraw_edge_at(&mut self, idx: usize) -> bool {
        let edge = &self.edges[idx];
        if edge.orphaned {
            return false;
        }
        let Some((source, target)) = self.anchor_points(edge) else {
            return false;
        };
        self.edges[idx].redraw(source, target);
        true
    }

    /// Redraw the given edges once each. Returns how many were redrawn.
    pub fn redraw_edges(&mut self, ids: &[EdgeId]) -> usize {
        let mut indices: Vec<usize> = ids.iter().filter_map(|id| self.edge_index(id)).collect();
        indices.sort_unstable();
        indices.dedup();
        indices
            .into_iter()
            .filter(|&i| self.redraw_edge_at(i))
            .count()
    }

    /// Redraw every edge adjacent to any of `nodes`, each exactly once.
    pub fn redraw_node_edges(&mut self, nodes: &[NodeId]) -> usize {
        let indices: Vec<usize> = self
            .edges
            .iter()
            .enumerate()
            .filter(|(_, e)| nodes.iter().any(|n| e.touches(n)))
            .map(|(i, _)| i)
            .collect();
        indices
            .into_iter()
            .filter(|&i| self.redraw_edge_at(i))
            .count()
    }

    // ========================================================================
    // Draft Edges
    // ========================================================================

    /// Create the visual of a not-yet-persisted edge starting at an endpoint.
    pub fn create_draft_edge(&mut self, node: &NodeId, endpoint: &EndpointId) -> GraphResult<DraftEdge> {
        if self.endpoint(node, endpoint).is_none() {
            return Err(GraphError::unknown(EntityKind::Endpoint, endpoint));
        }

        let style = self.edge_style(None, None, false);
        let mut shape = self.registry.create_edge(&self.theme.edge.kind);
        let handle = shape.init(&style);

        Ok(DraftEdge {
            source_node: node.clone(),
            source_endpoint: endpoint.clone(),
            style,
            handle,
            shape,
        })
    }

    /// Turn a draft into a real endpoint edge named `"{source}-{target}"`.
    /// On failure the draft's visual is destroyed.
    pub fn promote_draft(
        &mut self,
        draft: DraftEdge,
        target_node: &NodeId,
        target_endpoint: &EndpointId,
    ) -> GraphResult<&Edge> {
        let id = EdgeId::new(format!("{}-{}", draft.source_endpoint, target_endpoint));
        if self.edge_index(&id).is_some() {
            debug!(edge = %id, "Link already exists, discarding draft");
            draft.discard();
            return Err(LinkRejection::DuplicateEdge(id).into());
        }
        if self.endpoint(&draft.source_node, &draft.source_endpoint).is_none()
            || self.endpoint(target_node, target_endpoint).is_none()
        {
            let reference = target_endpoint.clone();
            draft.discard();
            return Err(GraphError::UnresolvableEndpointReference { edge: id, reference });
        }

        let DraftEdge {
            source_node,
            source_endpoint,
            style,
            handle,
            mut shape,
        } = draft;
        shape.assign_id(&id);

        let source_group = self.group_of(&source_node);
        let target_group = self.group_of(target_node);
        let idx = self.edges.len();
        self.edges.push(Edge {
            source_group,
            target_group,
            id,
            kind: EdgeKind::Endpoint,
            source: EdgeEnd::Endpoint {
                node: source_node,
                endpoint: source_endpoint,
            },
            target: EdgeEnd::Endpoint {
                node: target_node.clone(),
                endpoint: target_endpoint.clone(),
            },
            style,
            orphaned: false,
            handle,
            shape,
        });
        self.redraw_edge_at(idx);

        Ok(&self.edges[idx])
    }
}
