//! Rendering collaborator contracts.
//!
//! The engine never draws anything itself. Every node, group and edge owns a
//! shape object implementing one of the traits below; the engine calls `init`
//! once at creation, `mount` to place the visual into its parent, positional
//! updates while the user interacts, and `destroy` when the entity goes away.
//!
//! The `Headless*` shapes keep track of their state and draw nothing. They are
//! the registry defaults, which makes the engine usable without a front end.

use crate::types::{EdgeId, GroupId, NodeId, Point};
use serde::Serialize;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Global counter for render handles
static HANDLE_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Opaque handle to a visual element, handed out by a shape's `init`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct RenderHandle(u64);

impl RenderHandle {
    /// Allocate a fresh, process-unique handle.
    pub fn next() -> Self {
        Self(HANDLE_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// Visual parameters for an edge path.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EdgeStyle {
    /// Path family, e.g. `"Bezier"`, `"Straight"`
    pub shape_type: String,
    pub label: Option<String>,
    pub arrow: bool,
    /// Allowed endpoint orientations, passed through from the theme
    pub orientation_limit: Option<String>,
}

pub trait NodeShape: fmt::Debug {
    fn init(&mut self, id: &NodeId) -> RenderHandle;

    /// Place the visual under `parent` (a group) or on the root surface.
    fn mount(&mut self, parent: Option<RenderHandle>) {
        let _ = parent;
    }

    /// Position in the node's own frame (group-relative when grouped).
    fn move_to(&mut self, at: Point);

    fn destroy(&mut self);
}

pub trait GroupShape: fmt::Debug {
    fn init(&mut self, id: &GroupId) -> RenderHandle;

    fn move_to(&mut self, at: Point);

    fn destroy(&mut self);
}

pub trait EdgeShape: fmt::Debug {
    fn init(&mut self, style: &EdgeStyle) -> RenderHandle;

    /// Called when a draft edge is promoted and receives its identity.
    fn assign_id(&mut self, id: &EdgeId) {
        let _ = id;
    }

    /// Reposition the path between two canvas-space anchor points.
    fn redraw(&mut self, source: Point, target: Point);

    fn destroy(&mut self);
}

// ============================================================================
// Headless shapes
// ============================================================================

#[derive(Debug, Default)]
pub struct HeadlessNode {
    pub handle: Option<RenderHandle>,
    pub parent: Option<RenderHandle>,
    pub position: Point,
    pub destroyed: bool,
}

impl NodeShape for HeadlessNode {
    fn init(&mut self, _id: &NodeId) -> RenderHandle {
        *self.handle.get_or_insert_with(RenderHandle::next)
    }

    fn mount(&mut self, parent: Option<RenderHandle>) {
        self.parent = parent;
    }

    fn move_to(&mut self, at: Point) {
        self.position = at;
    }

    fn destroy(&mut self) {
        self.destroyed = true;
    }
}

#[derive(Debug, Default)]
pub struct HeadlessGroup {
    pub handle: Option<RenderHandle>,
    pub position: Point,
    pub destroyed: bool,
}

impl GroupShape for HeadlessGroup {
    fn init(&mut self, _id: &GroupId) -> RenderHandle {
        *self.handle.get_or_insert_with(RenderHandle::next)
    }

    fn move_to(&mut self, at: Point) {
        self.position = at;
    }

    fn destroy(&mut self) {
        self.destroyed = true;
    }
}

#[derive(Debug, Default)]
pub struct HeadlessEdge {
    pub handle: Option<RenderHandle>,
    pub path: Option<(Point, Point)>,
    pub destroyed: bool,
}

impl EdgeShape for HeadlessEdge {
    fn init(&mut self, _style: &EdgeStyle) -> RenderHandle {
        *self.handle.get_or_insert_with(RenderHandle::next)
    }

    fn redraw(&mut self, source: Point, target: Point) {
        self.path = Some((source, target));
    }

    fn destroy(&mut self) {
        self.destroyed = true;
    }
}
