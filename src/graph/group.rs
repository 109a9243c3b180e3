use crate::constants::GROUP_HANDLE_HEIGHT;
use crate::render::{GroupShape, RenderHandle};
use crate::types::{GroupId, GroupSpec, NodeId, Point, Rect};

#[derive(Debug)]
pub struct Group {
    pub id: GroupId,
    /// Absolute canvas-space bounds
    pub bounds: Rect,
    /// Member node ids in insertion order
    pub members: Vec<NodeId>,
    pub kind: String,
    pub(crate) handle: RenderHandle,
    pub(crate) shape: Box<dyn GroupShape>,
}

impl Group {
    pub fn origin(&self) -> Point {
        self.bounds.origin()
    }

    pub fn handle(&self) -> RenderHandle {
        self.handle
    }

    /// The title strip along the top of the group that starts a group drag.
    pub fn handle_rect(&self) -> Rect {
        Rect::new(
            self.bounds.left,
            self.bounds.top,
            self.bounds.width,
            GROUP_HANDLE_HEIGHT.min(self.bounds.height),
        )
    }

    pub fn has_member(&self, node: &NodeId) -> bool {
        self.members.contains(node)
    }

    pub fn to_spec(&self) -> GroupSpec {
        GroupSpec {
            id: self.id.clone(),
            left: self.bounds.left,
            top: self.bounds.top,
            width: Some(self.bounds.width),
            height: Some(self.bounds.height),
            kind: Some(self.kind.clone()),
        }
    }
}
