use crate::error::LinkRejection;
use crate::types::{EndpointId, EndpointSpec, NodeId, Point, Rect, Role, Size};
use serde::Serialize;

/// A connection handle owned by a node.
///
/// `offset` is relative to the node origin and never changes on its own;
/// `bounds` is the absolute canvas-space box and is recomputed by the store
/// whenever the owning node's absolute origin moves.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Endpoint {
    pub id: EndpointId,
    pub node: NodeId,
    pub role: Role,
    pub scope: Option<String>,
    pub offset: Point,
    pub size: Size,
    bounds: Rect,
}

impl Endpoint {
    /// Build from a spec. Without an explicit offset, sources sit on the
    /// middle of the node's right edge and targets on the middle of its left
    /// edge.
    pub fn from_spec(node: &NodeId, spec: &EndpointSpec, node_size: Size) -> Self {
        let size = spec.size();
        let offset = spec.offset.unwrap_or_else(|| {
            let y = node_size.height / 2.0 - size.height / 2.0;
            match spec.role {
                Role::Source => Point::new(node_size.width - size.width / 2.0, y),
                Role::Target => Point::new(-size.width / 2.0, y),
            }
        });

        Self {
            id: spec.id.clone(),
            node: node.clone(),
            role: spec.role,
            scope: spec.scope.clone(),
            offset,
            size,
            bounds: Rect::from_origin_size(offset, size),
        }
    }

    /// Recompute the absolute box from the owning node's absolute origin.
    pub fn update_pos(&mut self, node_origin: Point) {
        self.bounds = Rect::from_origin_size(node_origin + self.offset, self.size);
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn center(&self) -> Point {
        self.bounds.center()
    }

    /// Check whether a link drawn from `origin` may end on this endpoint.
    pub fn accepts_link_from(&self, origin: &Endpoint) -> Result<(), LinkRejection> {
        if self.scope != origin.scope {
            return Err(LinkRejection::ScopeMismatch {
                source_scope: origin.scope.clone(),
                target_scope: self.scope.clone(),
            });
        }
        if self.role != Role::Target {
            return Err(LinkRejection::NotATarget {
                node: self.node.clone(),
                endpoint: self.id.clone(),
            });
        }
        Ok(())
    }

    pub fn to_spec(&self) -> EndpointSpec {
        EndpointSpec {
            id: self.id.clone(),
            role: self.role,
            scope: self.scope.clone(),
            offset: Some(self.offset),
            width: Some(self.size.width),
            height: Some(self.size.height),
        }
    }
}
