//! Layout collaborator contract and the initial draw sequence.
//!
//! The canvas never computes positions itself. When a layout is configured,
//! the registered [`LayoutEngine`] rewrites node and group positions in a
//! [`LayoutData`] before anything is added to the store.

use crate::canvas::Canvas;
use crate::constants::{DEFAULT_CHARGE_STRENGTH, DEFAULT_LINK_DISTANCE, DEFAULT_LINK_STRENGTH};
use crate::perf::{FRAME_BUDGET_MS, measure_and_log};
use crate::types::{EdgeId, EdgeKind, EdgeSpec, EndpointId, GroupId, GroupSpec, NodeId, NodeSpec, Point, Size};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

// ============================================================================
// Configuration
// ============================================================================

/// Layout selection as it appears in the canvas config. Unset knobs fall back
/// to the defaults in [`LayoutOptions::for_container`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Name of the engine, informational
    pub kind: String,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub center: Option<Point>,
    pub charge_strength: Option<f32>,
    pub link: LinkForceConfig,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkForceConfig {
    pub distance: Option<f32>,
    pub strength: Option<f32>,
}

/// Fully resolved options handed to the engine.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutOptions {
    pub width: f32,
    pub height: f32,
    pub center: Point,
    pub charge_strength: f32,
    pub link_distance: f32,
    pub link_strength: f32,
}

impl LayoutOptions {
    pub fn for_container(size: Size) -> Self {
        Self {
            width: size.width,
            height: size.height,
            center: Point::new(size.width / 2.0, size.height / 2.0),
            charge_strength: DEFAULT_CHARGE_STRENGTH,
            link_distance: DEFAULT_LINK_DISTANCE,
            link_strength: DEFAULT_LINK_STRENGTH,
        }
    }
}

impl LayoutConfig {
    pub fn options(&self, container: Size) -> LayoutOptions {
        let defaults = LayoutOptions::for_container(container);
        LayoutOptions {
            width: self.width.unwrap_or(defaults.width),
            height: self.height.unwrap_or(defaults.height),
            center: self.center.unwrap_or(defaults.center),
            charge_strength: self.charge_strength.unwrap_or(defaults.charge_strength),
            link_distance: self.link.distance.unwrap_or(defaults.link_distance),
            link_strength: self.link.strength.unwrap_or(defaults.link_strength),
        }
    }
}

// ============================================================================
// Engine Contract
// ============================================================================

/// A link between two nodes as the layout sees it.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutLink {
    pub id: Option<EdgeId>,
    pub source: NodeId,
    pub target: NodeId,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayoutData {
    pub groups: Vec<GroupSpec>,
    pub nodes: Vec<NodeSpec>,
    pub links: Vec<LayoutLink>,
}

impl LayoutData {
    /// Build the layout input from draw data. Endpoint edges are mapped to
    /// the nodes owning their endpoints; edges whose nodes cannot be found are
    /// left out.
    pub fn from_draw(data: &DrawData) -> Self {
        let owner = |endpoint: &EndpointId| -> Option<NodeId> {
            data.nodes
                .iter()
                .find(|n| n.endpoints.iter().any(|e| &e.id == endpoint))
                .map(|n| n.id.clone())
        };

        let links = data
            .edges
            .iter()
            .filter_map(|edge| {
                let (source, target) = match edge.kind {
                    EdgeKind::Node => (Some(edge.source.clone()), Some(edge.target.clone())),
                    EdgeKind::Endpoint => (
                        edge.source_node.clone().or_else(|| owner(&edge.source)),
                        edge.target_node.clone().or_else(|| owner(&edge.target)),
                    ),
                };
                Some(LayoutLink {
                    id: edge.id.clone(),
                    source: source?,
                    target: target?,
                })
            })
            .collect();

        Self {
            groups: data.groups.clone(),
            nodes: data.nodes.clone(),
            links,
        }
    }
}

/// Computes positions for the initial draw.
pub trait LayoutEngine {
    fn name(&self) -> &str;

    /// Write new `left`/`top` values into `data.nodes` and `data.groups`.
    fn layout(&mut self, data: &mut LayoutData, options: &LayoutOptions);
}

// ============================================================================
// Draw Data
// ============================================================================

/// Everything the initial draw adds to the canvas.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawData {
    pub groups: Vec<GroupSpec>,
    pub nodes: Vec<NodeSpec>,
    pub edges: Vec<EdgeSpec>,
}

impl DrawData {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Invalid draw data")
    }
}

/// Ids of the entities a draw actually created.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct DrawSummary {
    pub groups: Vec<GroupId>,
    pub nodes: Vec<NodeId>,
    pub edges: Vec<EdgeId>,
}

impl Canvas {
    /// Initial draw: run the configured layout, then add groups, nodes and
    /// edges in that order.
    pub fn draw(&mut self, mut data: DrawData) -> DrawSummary {
        if let Some(config) = self.config.layout.clone() {
            self.run_layout(&config, &mut data);
        }

        measure_and_log("draw", FRAME_BUDGET_MS, || {
            let groups = self.store.add_groups(data.groups);
            let nodes = self.store.add_nodes(data.nodes);
            let edges = self.store.add_edges(data.edges);
            info!(
                groups = groups.len(),
                nodes = nodes.len(),
                edges = edges.len(),
                "Canvas drawn"
            );
            DrawSummary {
                groups,
                nodes,
                edges,
            }
        })
    }

    fn run_layout(&mut self, config: &LayoutConfig, data: &mut DrawData) {
        let Some(engine) = self.layout.as_mut() else {
            warn!(kind = %config.kind, "Layout configured but no engine registered");
            return;
        };

        let options = config.options(self.viewport.container_size());
        let mut input = LayoutData::from_draw(data);
        debug!(engine = engine.name(), nodes = input.nodes.len(), "Running layout");
        engine.layout(&mut input, &options);

        data.groups = input.groups;
        data.nodes = input.nodes;
    }
}
