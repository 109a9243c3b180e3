//! Interaction engine for diagram editing surfaces.
//!
//! The crate owns the state behind an interactive node/edge/group diagram:
//! where everything is, how pointer gestures move it, how the view pans and
//! zooms, and what is selected. Drawing is left to the host through the
//! shape traits in [`render`]; changes are announced on the [`events`] bus.
//!
//! ## Module Organization
//!
//! - `canvas` - facade owning every component
//! - `graph` - nodes, endpoints, edges, groups and the store holding them
//! - `coords`, `viewport` - pointer/canvas transforms, pan, zoom, animations
//! - `drag` - pointer-event state machine
//! - `selection` - selection mode and marquee
//! - `events` - publish/subscribe bus
//! - `render`, `registry` - rendering contracts and shape factories
//! - `layout` - layout contract and initial draw
//! - `config`, `logging`, `perf`, `constants`, `error`, `types`

pub mod canvas;
pub mod config;
pub mod constants;
pub mod coords;
pub mod drag;
pub mod error;
pub mod events;
pub mod graph;
pub mod layout;
pub mod logging;
pub mod perf;
pub mod registry;
pub mod render;
pub mod selection;
pub mod spatial_index;
pub mod types;
pub mod viewport;

pub use canvas::Canvas;
pub use config::CanvasConfig;
pub use drag::{DragMode, DragSession, PointerButton, PointerEvent, Release};
pub use error::{GraphError, GraphResult, LinkRejection};
pub use events::{CanvasEvent, EventBus, EventName};
pub use graph::GraphStore;
pub use layout::{DrawData, LayoutEngine};
pub use selection::SelectionSet;
pub use types::{EntityId, EntityKind, EntityRef, Point, Rect, Size};
