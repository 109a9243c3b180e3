use crate::render::{EdgeShape, EdgeStyle, RenderHandle};
use crate::types::{EdgeId, EdgeKind, EdgeSpec, EndpointId, GroupId, NodeId, Point};
use serde::Serialize;

/// One resolved end of an edge.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EdgeEnd {
    Node { node: NodeId },
    Endpoint { node: NodeId, endpoint: EndpointId },
}

impl EdgeEnd {
    /// The node this end is attached to.
    pub fn node(&self) -> &NodeId {
        match self {
            EdgeEnd::Node { node } | EdgeEnd::Endpoint { node, .. } => node,
        }
    }

    pub fn endpoint(&self) -> Option<&EndpointId> {
        match self {
            EdgeEnd::Node { .. } => None,
            EdgeEnd::Endpoint { endpoint, .. } => Some(endpoint),
        }
    }

    /// The id as it appears in an edge spec's `source`/`target`.
    fn spec_ref(&self) -> &crate::types::EntityId {
        match self {
            EdgeEnd::Node { node } => node,
            EdgeEnd::Endpoint { endpoint, .. } => endpoint,
        }
    }
}

#[derive(Debug)]
pub struct Edge {
    pub id: EdgeId,
    pub kind: EdgeKind,
    pub source: EdgeEnd,
    pub target: EdgeEnd,
    /// Owning group of the source node, cached for redraw filtering
    pub source_group: Option<GroupId>,
    /// Owning group of the target node, cached for redraw filtering
    pub target_group: Option<GroupId>,
    pub style: EdgeStyle,
    pub(crate) orphaned: bool,
    pub(crate) handle: RenderHandle,
    pub(crate) shape: Box<dyn EdgeShape>,
}

impl Edge {
    pub fn touches(&self, node: &NodeId) -> bool {
        self.source.node() == node || self.target.node() == node
    }

    /// The node at the other end from `node`, if the edge touches it.
    pub fn other_node(&self, node: &NodeId) -> Option<&NodeId> {
        if self.source.node() == node {
            Some(self.target.node())
        } else if self.target.node() == node {
            Some(self.source.node())
        } else {
            None
        }
    }

    pub fn touches_group(&self, group: &GroupId) -> bool {
        self.source_group.as_ref() == Some(group) || self.target_group.as_ref() == Some(group)
    }

    /// True while one of the edge's nodes has been removed with `keep_edges`.
    pub fn is_orphaned(&self) -> bool {
        self.orphaned
    }

    pub fn handle(&self) -> RenderHandle {
        self.handle
    }

    pub(crate) fn redraw(&mut self, source: Point, target: Point) {
        self.shape.redraw(source, target);
    }

    /// Refresh the cached owning group of whichever ends sit on `node`.
    pub(crate) fn set_node_group(&mut self, node: &NodeId, group: Option<&GroupId>) {
        if self.source.node() == node {
            self.source_group = group.cloned();
        }
        if self.target.node() == node {
            self.target_group = group.cloned();
        }
    }

    pub fn to_spec(&self) -> EdgeSpec {
        let owning = |end: &EdgeEnd| match end {
            EdgeEnd::Node { .. } => None,
            EdgeEnd::Endpoint { node, .. } => Some(node.clone()),
        };
        EdgeSpec {
            id: Some(self.id.clone()),
            kind: self.kind,
            source: self.source.spec_ref().clone(),
            target: self.target.spec_ref().clone(),
            source_node: owning(&self.source),
            target_node: owning(&self.target),
            label: self.style.label.clone(),
            shape_type: Some(self.style.shape_type.clone()),
            arrow: self.style.arrow,
        }
    }
}

/// A provisional edge drawn during an endpoint-link gesture.
///
/// It owns its shape but has no identity and is not in the store until it is
/// promoted.
#[derive(Debug)]
pub struct DraftEdge {
    pub source_node: NodeId,
    pub source_endpoint: EndpointId,
    pub style: EdgeStyle,
    pub(crate) handle: RenderHandle,
    pub(crate) shape: Box<dyn EdgeShape>,
}

impl DraftEdge {
    pub fn handle(&self) -> RenderHandle {
        self.handle
    }

    pub(crate) fn redraw(&mut self, source: Point, free_end: Point) {
        self.shape.redraw(source, free_end);
    }

    /// Release the visual without promoting.
    pub(crate) fn discard(mut self) {
        self.shape.destroy();
    }
}
