//! Canvas - the facade owning every interaction component.
//!
//! One `Canvas` holds the graph store, the viewport, the selection and the
//! drag engine, all sharing a single [`EventBus`]. Hosts feed it pointer,
//! wheel and timer events and subscribe to the bus for what changed.

use crate::config::{CanvasConfig, ContainerConfig};
use crate::constants::DEFAULT_ZOOM_DURATION_MS;
use crate::drag::{DragController, DragSession};
use crate::error::GraphResult;
use crate::events::{CanvasEvent, EventBus, EventName, SubscriptionId};
use crate::graph::{DataMap, Edge, GraphStore, Group, Node, RemovedGroup, RemovedNode};
use crate::layout::LayoutEngine;
use crate::registry::ShapeRegistry;
use crate::selection::{SelectionController, SelectionSet};
use crate::types::{EdgeId, EdgeSpec, EntityKind, EntityRef, GroupId, GroupSpec, NodeId, NodeSpec, Point};
use crate::viewport::{ViewportController, ViewportState};
use std::fmt;
use std::time::Duration;
use tracing::{debug, info};

pub struct Canvas {
    pub(crate) config: CanvasConfig,
    pub(crate) store: GraphStore,
    pub(crate) viewport: ViewportController,
    pub(crate) selection: SelectionController,
    pub(crate) drag: DragController,
    pub(crate) bus: EventBus,
    pub(crate) layout: Option<Box<dyn LayoutEngine>>,
}

impl Canvas {
    pub fn new(config: CanvasConfig) -> Self {
        Self::with_registry(config, ShapeRegistry::new())
    }

    /// Build a canvas whose entities are rendered by the shapes in `registry`.
    pub fn with_registry(config: CanvasConfig, registry: ShapeRegistry) -> Self {
        let bus = EventBus::new();
        let store = GraphStore::new(bus.clone(), registry, config.theme.clone());
        let viewport = ViewportController::new(bus.clone(), config.container, config.zoomable, config.moveable);
        info!(
            width = config.container.size.width,
            height = config.container.size.height,
            "Canvas created"
        );

        Self {
            config,
            store,
            viewport,
            selection: SelectionController::new(),
            drag: DragController::new(),
            bus,
            layout: None,
        }
    }

    pub fn set_layout_engine(&mut self, engine: impl LayoutEngine + 'static) {
        self.layout = Some(Box::new(engine));
    }

    // ========================================================================
    // Components
    // ========================================================================

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn subscribe<F>(&self, name: EventName, handler: F) -> SubscriptionId
    where
        F: Fn(&CanvasEvent) + Send + Sync + 'static,
    {
        self.bus.subscribe(name, handler)
    }

    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut GraphStore {
        &mut self.store
    }

    pub fn viewport(&self) -> &ViewportController {
        &self.viewport
    }

    pub fn selection(&self) -> &SelectionSet {
        self.selection.selection()
    }

    pub fn drag_session(&self) -> &DragSession {
        self.drag.session()
    }

    // ========================================================================
    // Graph
    // ========================================================================

    pub fn add_node(&mut self, spec: NodeSpec) -> GraphResult<&Node> {
        self.store.add_node(spec)
    }

    pub fn add_nodes(&mut self, specs: impl IntoIterator<Item = NodeSpec>) -> Vec<NodeId> {
        self.store.add_nodes(specs)
    }

    pub fn add_edge(&mut self, spec: EdgeSpec) -> GraphResult<&Edge> {
        self.store.add_edge(spec)
    }

    pub fn add_edges(&mut self, specs: impl IntoIterator<Item = EdgeSpec>) -> Vec<EdgeId> {
        self.store.add_edges(specs)
    }

    pub fn add_group(&mut self, spec: GroupSpec) -> GraphResult<&Group> {
        self.store.add_group(spec)
    }

    pub fn add_groups(&mut self, specs: impl IntoIterator<Item = GroupSpec>) -> Vec<GroupId> {
        self.store.add_groups(specs)
    }

    /// Remove a node; it also leaves the selection.
    pub fn remove_node(&mut self, id: &NodeId, keep_edges: bool) -> GraphResult<RemovedNode> {
        let removed = self.store.remove_node(id, keep_edges)?;
        self.selection.forget(&self.store);
        Ok(removed)
    }

    pub fn remove_nodes(&mut self, ids: &[NodeId], keep_edges: bool) -> Vec<RemovedNode> {
        let removed = self.store.remove_nodes(ids, keep_edges);
        self.selection.forget(&self.store);
        removed
    }

    pub fn remove_edge(&mut self, id: &EdgeId) -> GraphResult<EdgeSpec> {
        let removed = self.store.remove_edge(id)?;
        self.selection.forget(&self.store);
        Ok(removed)
    }

    pub fn remove_edges(&mut self, ids: &[EdgeId]) -> Vec<EdgeSpec> {
        let removed = self.store.remove_edges(ids);
        self.selection.forget(&self.store);
        removed
    }

    pub fn remove_group(&mut self, id: &GroupId) -> GraphResult<RemovedGroup> {
        let removed = self.store.remove_group(id)?;
        self.selection.forget(&self.store);
        Ok(removed)
    }

    pub fn get_node(&self, id: &NodeId) -> Option<&Node> {
        self.store.node(id)
    }

    pub fn get_edge(&self, id: &EdgeId) -> Option<&Edge> {
        self.store.edge(id)
    }

    pub fn get_group(&self, id: &GroupId) -> Option<&Group> {
        self.store.group(id)
    }

    pub fn get_neighbor_edges(&self, node: &NodeId) -> Vec<EdgeId> {
        self.store.neighbor_edge_ids(node)
    }

    pub fn get_neighbor_nodes(&self, node: &NodeId) -> Vec<NodeId> {
        self.store.neighbor_nodes(node)
    }

    pub fn data_map(&self) -> DataMap {
        self.store.data_map()
    }

    // ========================================================================
    // Viewport
    // ========================================================================

    pub fn get_zoom(&self) -> f32 {
        self.viewport.scale()
    }

    pub fn get_move_position(&self) -> Point {
        self.viewport.pan()
    }

    pub fn viewport_state(&self) -> ViewportState {
        self.viewport.state()
    }

    pub fn set_zoom(&mut self, scale: f32) -> f32 {
        self.viewport.set_zoom(scale)
    }

    /// Animate to `scale` over the default zoom duration.
    pub fn zoom<F>(&mut self, scale: f32, on_complete: F) -> GraphResult<()>
    where
        F: FnOnce() + 'static,
    {
        self.zoom_over(scale, Duration::from_millis(DEFAULT_ZOOM_DURATION_MS), on_complete)
    }

    pub fn zoom_over<F>(&mut self, scale: f32, duration: Duration, on_complete: F) -> GraphResult<()>
    where
        F: FnOnce() + 'static,
    {
        self.viewport.animate_zoom_to(scale, duration, on_complete)
    }

    pub fn move_to(&mut self, offset: Point) {
        self.viewport.pan_to(offset);
    }

    pub fn focus<F>(&mut self, entity: &EntityRef, on_complete: F) -> GraphResult<()>
    where
        F: FnOnce() + 'static,
    {
        self.viewport.focus_on(&self.store, entity, on_complete)
    }

    /// Wheel input in pointer-space delta units.
    pub fn wheel(&mut self, delta_y: f32) -> bool {
        self.viewport.on_wheel(delta_y)
    }

    /// Advance a running viewport animation by one step.
    pub fn tick(&mut self) -> bool {
        self.viewport.tick()
    }

    pub fn is_animating(&self) -> bool {
        self.viewport.is_animating()
    }

    pub fn set_zoomable(&mut self, zoomable: bool) {
        self.config.zoomable = zoomable;
        self.viewport.set_zoomable(zoomable);
    }

    pub fn set_moveable(&mut self, moveable: bool) {
        self.config.moveable = moveable;
        self.viewport.set_moveable(moveable);
    }

    /// The root element was resized or moved.
    pub fn resize_container(&mut self, container: ContainerConfig) {
        self.config.container = container;
        self.viewport.set_container(container);
        debug!(
            width = container.size.width,
            height = container.size.height,
            "Container resized"
        );
    }

    pub fn terminal_to_canvas(&self, p: Point) -> Point {
        self.viewport.coords().terminal_to_canvas_point(p)
    }

    pub fn canvas_to_terminal(&self, p: Point) -> Point {
        self.viewport.coords().canvas_to_terminal_point(p)
    }

    // ========================================================================
    // Selection
    // ========================================================================

    /// Turn selection mode on for `categories`, or off. Turning it off
    /// clears the selection and restores pan and zoom.
    pub fn set_select_mode(&mut self, enabled: bool, categories: &[EntityKind]) {
        if enabled {
            self.reset_drag();
            self.selection.enable(&mut self.viewport, categories);
        } else {
            self.selection.disable(&mut self.viewport);
        }
    }

    pub fn is_select_mode(&self) -> bool {
        self.selection.is_enabled()
    }

    /// Add one entity to the selection. Unknown ids are ignored.
    pub fn add_to_selection(&mut self, entity: &EntityRef) -> bool {
        self.selection.add(&self.store, entity)
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }
}

impl fmt::Debug for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Canvas")
            .field("nodes", &self.store.nodes().len())
            .field("edges", &self.store.edges().len())
            .field("groups", &self.store.groups().len())
            .field("viewport", &self.viewport.state())
            .field("drag", &self.drag.mode())
            .field("select_mode", &self.selection.is_enabled())
            .finish()
    }
}
