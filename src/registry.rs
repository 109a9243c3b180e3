//! Shape registry - maps a type tag to a shape factory.
//!
//! Creation specs name a `kind`; the graph store asks the registry for a shape
//! of that kind and only ever talks to it through the traits in
//! [`crate::render`]. Unknown kinds fall back to the default factory.

use crate::constants::DEFAULT_SHAPE_KIND;
use crate::render::{EdgeShape, GroupShape, HeadlessEdge, HeadlessGroup, HeadlessNode, NodeShape};
use std::collections::HashMap;
use std::fmt;
use tracing::warn;

pub type NodeFactory = Box<dyn Fn() -> Box<dyn NodeShape>>;
pub type GroupFactory = Box<dyn Fn() -> Box<dyn GroupShape>>;
pub type EdgeFactory = Box<dyn Fn() -> Box<dyn EdgeShape>>;

pub struct ShapeRegistry {
    nodes: HashMap<String, NodeFactory>,
    groups: HashMap<String, GroupFactory>,
    edges: HashMap<String, EdgeFactory>,
}

impl ShapeRegistry {
    /// A registry with headless shapes registered under the default kind.
    pub fn new() -> Self {
        let mut registry = Self {
            nodes: HashMap::new(),
            groups: HashMap::new(),
            edges: HashMap::new(),
        };
        registry.register_node(DEFAULT_SHAPE_KIND, || Box::new(HeadlessNode::default()));
        registry.register_group(DEFAULT_SHAPE_KIND, || Box::new(HeadlessGroup::default()));
        registry.register_edge(DEFAULT_SHAPE_KIND, || Box::new(HeadlessEdge::default()));
        registry
    }

    pub fn register_node<F>(&mut self, kind: impl Into<String>, factory: F)
    where
        F: Fn() -> Box<dyn NodeShape> + 'static,
    {
        self.nodes.insert(kind.into(), Box::new(factory));
    }

    pub fn register_group<F>(&mut self, kind: impl Into<String>, factory: F)
    where
        F: Fn() -> Box<dyn GroupShape> + 'static,
    {
        self.groups.insert(kind.into(), Box::new(factory));
    }

    pub fn register_edge<F>(&mut self, kind: impl Into<String>, factory: F)
    where
        F: Fn() -> Box<dyn EdgeShape> + 'static,
    {
        self.edges.insert(kind.into(), Box::new(factory));
    }

    pub fn create_node(&self, kind: &str) -> Box<dyn NodeShape> {
        Self::create(&self.nodes, kind, "node")
            .map(|f| f())
            .unwrap_or_else(|| Box::new(HeadlessNode::default()))
    }

    pub fn create_group(&self, kind: &str) -> Box<dyn GroupShape> {
        Self::create(&self.groups, kind, "group")
            .map(|f| f())
            .unwrap_or_else(|| Box::new(HeadlessGroup::default()))
    }

    pub fn create_edge(&self, kind: &str) -> Box<dyn EdgeShape> {
        Self::create(&self.edges, kind, "edge")
            .map(|f| f())
            .unwrap_or_else(|| Box::new(HeadlessEdge::default()))
    }

    fn create<'a, F>(map: &'a HashMap<String, F>, kind: &str, category: &str) -> Option<&'a F> {
        map.get(kind).or_else(|| {
            warn!(kind, category, "Unknown shape kind, using default");
            map.get(DEFAULT_SHAPE_KIND)
        })
    }
}

impl Default for ShapeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ShapeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShapeRegistry")
            .field("nodes", &self.nodes.keys().collect::<Vec<_>>())
            .field("groups", &self.groups.keys().collect::<Vec<_>>())
            .field("edges", &self.edges.keys().collect::<Vec<_>>())
            .finish()
    }
}
