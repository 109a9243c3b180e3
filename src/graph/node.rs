use super::endpoint::Endpoint;
use crate::render::{NodeShape, RenderHandle};
use crate::types::{EndpointId, GroupId, NodeId, NodeSpec, Placement, Point, Size};

#[derive(Debug)]
pub struct Node {
    pub id: NodeId,
    pub placement: Placement,
    pub size: Size,
    pub endpoints: Vec<Endpoint>,
    pub kind: String,
    pub(crate) handle: RenderHandle,
    pub(crate) shape: Box<dyn NodeShape>,
}

impl Node {
    pub fn group(&self) -> Option<&GroupId> {
        self.placement.group()
    }

    /// Stored position, in the group frame when grouped.
    pub fn position(&self) -> Point {
        self.placement.position()
    }

    pub fn handle(&self) -> RenderHandle {
        self.handle
    }

    pub fn endpoint(&self, id: &EndpointId) -> Option<&Endpoint> {
        self.endpoints.iter().find(|e| &e.id == id)
    }

    /// Recompute every endpoint box from the node's absolute origin.
    pub(crate) fn refresh_endpoints(&mut self, absolute_origin: Point) {
        for endpoint in &mut self.endpoints {
            endpoint.update_pos(absolute_origin);
        }
    }

    /// Push the stored position to the shape.
    pub(crate) fn sync_shape(&mut self) {
        let at = self.placement.position();
        self.shape.move_to(at);
    }

    pub fn to_spec(&self) -> NodeSpec {
        let at = self.position();
        NodeSpec {
            id: self.id.clone(),
            left: at.x,
            top: at.y,
            width: Some(self.size.width),
            height: Some(self.size.height),
            group: self.group().cloned(),
            endpoints: self.endpoints.iter().map(Endpoint::to_spec).collect(),
            kind: Some(self.kind.clone()),
        }
    }
}
