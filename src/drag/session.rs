//! Drag session - the state of the one pointer gesture in progress.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> EndpointLink   (press on an endpoint, linking enabled)
//! Idle -> GroupDrag      (press on a group handle, dragging enabled)
//! Idle -> NodeDrag       (press on a node body, dragging enabled)
//! Idle -> CanvasPan      (press anywhere else, panning enabled)
//!
//! Any  -> Idle           (release, or hard reset)
//! ```
//!
//! The session is replaced wholesale on every transition and every move;
//! nothing patches its fields in place.

use crate::events::DraftEdgeInfo;
use crate::graph::DraftEdge;
use crate::types::{EdgeId, EdgeSpec, EndpointId, GroupId, NodeId, Point};
use serde::Serialize;

/// Which kind of gesture is active, as reported in drag events.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DragMode {
    #[default]
    None,
    Canvas,
    Node,
    Group,
    Endpoint,
}

#[derive(Debug, Default)]
pub enum DragSession {
    /// No gesture, or a press that started nothing
    #[default]
    Idle,

    /// Panning the canvas
    CanvasPan {
        /// Pointer-space press position
        anchor: Point,
        /// Pan offset when the gesture started
        start_pan: Point,
    },

    /// Moving a node (and the rest of the selection if it is part of it)
    NodeDrag {
        node: NodeId,
        /// Canvas-space pointer position of the previous event
        last: Point,
    },

    /// Moving a group with all its members
    GroupDrag {
        group: GroupId,
        /// Canvas-space pointer position of the previous event
        last: Point,
    },

    /// Drawing a link out of an endpoint
    EndpointLink {
        node: NodeId,
        endpoint: EndpointId,
        /// Canvas-space position the free end follows
        last: Point,
        /// Created on the first move
        draft: Option<DraftEdge>,
        /// Existing link picked up from the pressed target endpoint
        relink: Option<Relink>,
    },
}

/// An existing link being dragged off its target endpoint.
///
/// The link stays in the store until the pointer actually moves. Once
/// detached, its data is kept so an abandoned gesture can put it back.
#[derive(Clone, Debug, PartialEq)]
pub enum Relink {
    Pending(EdgeId),
    Detached(EdgeSpec),
}

impl Relink {
    pub fn edge_id(&self) -> Option<&EdgeId> {
        match self {
            Relink::Pending(id) => Some(id),
            Relink::Detached(spec) => spec.id.as_ref(),
        }
    }
}

impl DragSession {
    pub fn mode(&self) -> DragMode {
        match self {
            Self::Idle => DragMode::None,
            Self::CanvasPan { .. } => DragMode::Canvas,
            Self::NodeDrag { .. } => DragMode::Node,
            Self::GroupDrag { .. } => DragMode::Group,
            Self::EndpointLink { .. } => DragMode::Endpoint,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_panning(&self) -> bool {
        matches!(self, Self::CanvasPan { .. })
    }

    pub fn is_linking(&self) -> bool {
        matches!(self, Self::EndpointLink { .. })
    }

    /// The dragged node, or the node owning the link's origin endpoint.
    pub fn anchor_node(&self) -> Option<&NodeId> {
        match self {
            Self::NodeDrag { node, .. } | Self::EndpointLink { node, .. } => Some(node),
            _ => None,
        }
    }

    pub fn anchor_group(&self) -> Option<&GroupId> {
        match self {
            Self::GroupDrag { group, .. } => Some(group),
            _ => None,
        }
    }

    pub fn anchor_endpoint(&self) -> Option<(&NodeId, &EndpointId)> {
        match self {
            Self::EndpointLink { node, endpoint, .. } => Some((node, endpoint)),
            _ => None,
        }
    }

    /// Last canvas-space pointer position seen by the session.
    pub fn last_pos(&self) -> Option<Point> {
        match self {
            Self::NodeDrag { last, .. }
            | Self::GroupDrag { last, .. }
            | Self::EndpointLink { last, .. } => Some(*last),
            _ => None,
        }
    }

    pub fn relink(&self) -> Option<&Relink> {
        match self {
            Self::EndpointLink { relink, .. } => relink.as_ref(),
            _ => None,
        }
    }

    pub fn draft(&self) -> Option<&DraftEdge> {
        match self {
            Self::EndpointLink { draft, .. } => draft.as_ref(),
            _ => None,
        }
    }

    pub fn draft_info(&self) -> Option<DraftEdgeInfo> {
        match self {
            Self::EndpointLink {
                draft: Some(draft),
                last,
                ..
            } => Some(DraftEdgeInfo {
                source_node: draft.source_node.clone(),
                source_endpoint: draft.source_endpoint.clone(),
                free_end: *last,
            }),
            _ => None,
        }
    }

    /// Move out the current session, leaving `Idle` behind.
    pub fn take(&mut self) -> DragSession {
        std::mem::take(self)
    }
}
