//! Core types for the diagram canvas.
//!
//! This module defines the identifiers, geometry primitives, coordinate frames
//! and creation specs shared by the graph store, the viewport and the drag
//! engine.

use crate::constants::{DEFAULT_ENDPOINT_SIZE, DEFAULT_GROUP_SIZE, DEFAULT_NODE_SIZE};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

// ============================================================================
// Identity
// ============================================================================

/// Identity of a node, edge, group or endpoint.
///
/// Diagram data commonly mixes numeric and textual ids, so deserialization
/// accepts both and normalizes to a string.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EntityId(String);

pub type NodeId = EntityId;
pub type EdgeId = EntityId;
pub type GroupId = EntityId;
pub type EndpointId = EntityId;

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&EntityId> for EntityId {
    fn from(id: &EntityId) -> Self {
        id.clone()
    }
}

impl From<i32> for EntityId {
    fn from(n: i32) -> Self {
        Self(n.to_string())
    }
}

impl PartialEq<&str> for EntityId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Int(i64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => Self(s),
            Raw::Int(n) => Self(n.to_string()),
        })
    }
}

/// The four entity categories the engine tracks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Node,
    Edge,
    Group,
    Endpoint,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Node => "node",
            EntityKind::Edge => "edge",
            EntityKind::Group => "group",
            EntityKind::Endpoint => "endpoint",
        };
        f.write_str(name)
    }
}

/// A typed reference to any entity in the store.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EntityRef {
    Node { id: NodeId },
    Edge { id: EdgeId },
    Group { id: GroupId },
    Endpoint { node: NodeId, id: EndpointId },
}

impl EntityRef {
    pub fn node(id: impl Into<EntityId>) -> Self {
        Self::Node { id: id.into() }
    }

    pub fn group(id: impl Into<EntityId>) -> Self {
        Self::Group { id: id.into() }
    }

    pub fn edge(id: impl Into<EntityId>) -> Self {
        Self::Edge { id: id.into() }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Node { .. } => EntityKind::Node,
            Self::Edge { .. } => EntityKind::Edge,
            Self::Group { .. } => EntityKind::Group,
            Self::Endpoint { .. } => EntityKind::Endpoint,
        }
    }
}

// ============================================================================
// Geometry
// ============================================================================

/// A 2D point or vector. Which space it lives in is up to the caller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean length when used as a vector.
    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }
}

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    #[inline]
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    /// Rectangle spanned by two arbitrary corners.
    pub fn from_corners(a: Point, b: Point) -> Self {
        let left = a.x.min(b.x);
        let top = a.y.min(b.y);
        Self::new(left, top, (a.x - b.x).abs(), (a.y - b.y).abs())
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    #[inline]
    pub fn contains_point(&self, p: Point) -> bool {
        p.x >= self.left && p.x <= self.right() && p.y >= self.top && p.y <= self.bottom()
    }

    #[inline]
    pub fn strictly_contains_point(&self, p: Point) -> bool {
        p.x > self.left && p.x < self.right() && p.y > self.top && p.y < self.bottom()
    }

    /// Inclusive containment: edges may touch.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        self.left <= other.left
            && self.right() >= other.right()
            && self.top <= other.top
            && self.bottom() >= other.bottom()
    }

    /// Strict containment: `other` lies entirely inside without touching the border.
    pub fn strictly_contains_rect(&self, other: &Rect) -> bool {
        self.left < other.left
            && self.right() > other.right()
            && self.top < other.top
            && self.bottom() > other.bottom()
    }

    /// True unless the two boxes are completely separated.
    pub fn overlaps(&self, other: &Rect) -> bool {
        !(other.right() < self.left
            || other.left > self.right()
            || other.bottom() < self.top
            || other.top > self.bottom())
    }

    pub fn union(&self, other: &Rect) -> Rect {
        let left = self.left.min(other.left);
        let top = self.top.min(other.top);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect::new(left, top, right - left, bottom - top)
    }

    /// Grow the box by `margin` on every side.
    pub fn expand(&self, margin: f32) -> Rect {
        Rect::new(
            self.left - margin,
            self.top - margin,
            self.width + margin * 2.0,
            self.height + margin * 2.0,
        )
    }

    pub fn translate(&self, delta: Point) -> Rect {
        Rect::new(self.left + delta.x, self.top + delta.y, self.width, self.height)
    }
}

// ============================================================================
// Coordinate Frames
// ============================================================================

/// Where a node's stored position lives.
///
/// Grouped nodes are stored relative to their group's origin; free nodes are
/// stored in absolute canvas coordinates. Carrying the frame in the type keeps
/// the two from being mixed up.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "frame", rename_all = "lowercase")]
pub enum Placement {
    Absolute { at: Point },
    Local { group: GroupId, at: Point },
}

impl Placement {
    pub fn absolute(at: Point) -> Self {
        Self::Absolute { at }
    }

    pub fn local(group: GroupId, at: Point) -> Self {
        Self::Local { group, at }
    }

    /// The owning group, if the position is group-relative.
    pub fn group(&self) -> Option<&GroupId> {
        match self {
            Self::Absolute { .. } => None,
            Self::Local { group, .. } => Some(group),
        }
    }

    /// The stored position in its own frame.
    pub fn position(&self) -> Point {
        match self {
            Self::Absolute { at } | Self::Local { at, .. } => *at,
        }
    }

    pub fn set_position(&mut self, p: Point) {
        match self {
            Self::Absolute { at } | Self::Local { at, .. } => *at = p,
        }
    }

    pub fn translate(&mut self, delta: Point) {
        let p = self.position();
        self.set_position(p + delta);
    }

    /// Resolve to absolute canvas coordinates given the group's origin.
    /// The origin is ignored for absolute placements.
    pub fn resolve(&self, group_origin: Point) -> Point {
        match self {
            Self::Absolute { at } => *at,
            Self::Local { at, .. } => *at + group_origin,
        }
    }
}

// ============================================================================
// Roles & Kinds
// ============================================================================

/// Direction of an endpoint. Links always run from a source to a target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Source,
    Target,
}

/// What an edge connects.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    /// Node body to node body
    #[default]
    Node,
    /// Endpoint handle to endpoint handle
    Endpoint,
}

// ============================================================================
// Creation Specs
// ============================================================================

/// Data describing a node to add.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeSpec {
    pub id: NodeId,
    #[serde(default)]
    pub left: f32,
    #[serde(default)]
    pub top: f32,
    #[serde(default)]
    pub width: Option<f32>,
    #[serde(default)]
    pub height: Option<f32>,
    /// Owning group; the position is group-relative when it resolves
    #[serde(default)]
    pub group: Option<GroupId>,
    #[serde(default)]
    pub endpoints: Vec<EndpointSpec>,
    /// Registry tag selecting the node shape
    #[serde(default)]
    pub kind: Option<String>,
}

impl NodeSpec {
    pub fn new(id: impl Into<NodeId>, left: f32, top: f32) -> Self {
        Self {
            id: id.into(),
            left,
            top,
            width: None,
            height: None,
            group: None,
            endpoints: Vec::new(),
            kind: None,
        }
    }

    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn in_group(mut self, group: impl Into<GroupId>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn with_endpoint(mut self, endpoint: EndpointSpec) -> Self {
        self.endpoints.push(endpoint);
        self
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn size(&self) -> Size {
        Size::new(
            self.width.unwrap_or(DEFAULT_NODE_SIZE.0),
            self.height.unwrap_or(DEFAULT_NODE_SIZE.1),
        )
    }
}

/// Data describing an endpoint owned by a node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointSpec {
    pub id: EndpointId,
    #[serde(rename = "type")]
    pub role: Role,
    /// Compatibility class; only equal scopes may be linked
    #[serde(default)]
    pub scope: Option<String>,
    /// Offset of the endpoint box from the node origin
    #[serde(default)]
    pub offset: Option<Point>,
    #[serde(default)]
    pub width: Option<f32>,
    #[serde(default)]
    pub height: Option<f32>,
}

impl EndpointSpec {
    pub fn new(id: impl Into<EndpointId>, role: Role) -> Self {
        Self {
            id: id.into(),
            role,
            scope: None,
            offset: None,
            width: None,
            height: None,
        }
    }

    pub fn source(id: impl Into<EndpointId>) -> Self {
        Self::new(id, Role::Source)
    }

    pub fn target(id: impl Into<EndpointId>) -> Self {
        Self::new(id, Role::Target)
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.offset = Some(Point::new(x, y));
        self
    }

    pub fn size(&self) -> Size {
        Size::new(
            self.width.unwrap_or(DEFAULT_ENDPOINT_SIZE.0),
            self.height.unwrap_or(DEFAULT_ENDPOINT_SIZE.1),
        )
    }
}

/// Data describing an edge to add.
///
/// For `EdgeKind::Node` edges `source`/`target` are node ids. For
/// `EdgeKind::Endpoint` edges they are endpoint ids, resolved within
/// `source_node`/`target_node`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeSpec {
    #[serde(default)]
    pub id: Option<EdgeId>,
    #[serde(rename = "type", default)]
    pub kind: EdgeKind,
    pub source: EntityId,
    pub target: EntityId,
    #[serde(default)]
    pub source_node: Option<NodeId>,
    #[serde(default)]
    pub target_node: Option<NodeId>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub shape_type: Option<String>,
    #[serde(default)]
    pub arrow: bool,
}

impl EdgeSpec {
    /// A node-to-node edge.
    pub fn between_nodes(
        id: impl Into<EdgeId>,
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
    ) -> Self {
        Self {
            id: Some(id.into()),
            kind: EdgeKind::Node,
            source: source.into(),
            target: target.into(),
            source_node: None,
            target_node: None,
            label: None,
            shape_type: None,
            arrow: false,
        }
    }

    /// An endpoint-to-endpoint edge.
    pub fn between_endpoints(
        id: impl Into<EdgeId>,
        (source_node, source): (impl Into<NodeId>, impl Into<EndpointId>),
        (target_node, target): (impl Into<NodeId>, impl Into<EndpointId>),
    ) -> Self {
        Self {
            id: Some(id.into()),
            kind: EdgeKind::Endpoint,
            source: source.into(),
            target: target.into(),
            source_node: Some(source_node.into()),
            target_node: Some(target_node.into()),
            label: None,
            shape_type: None,
            arrow: false,
        }
    }
}

/// Data describing a group to add.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GroupSpec {
    pub id: GroupId,
    #[serde(default)]
    pub left: f32,
    #[serde(default)]
    pub top: f32,
    #[serde(default)]
    pub width: Option<f32>,
    #[serde(default)]
    pub height: Option<f32>,
    #[serde(default)]
    pub kind: Option<String>,
}

impl GroupSpec {
    pub fn new(id: impl Into<GroupId>, left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            id: id.into(),
            left,
            top,
            width: Some(width),
            height: Some(height),
            kind: None,
        }
    }

    pub fn size(&self) -> Size {
        Size::new(
            self.width.unwrap_or(DEFAULT_GROUP_SIZE.0),
            self.height.unwrap_or(DEFAULT_GROUP_SIZE.1),
        )
    }
}
