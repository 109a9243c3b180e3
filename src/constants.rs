//! Engine-wide constants.
//!
//! Centralizes the numeric knobs of the interaction engine so the drag,
//! viewport and selection code never carries magic numbers.

// ============================================================================
// Zoom & Pan
// ============================================================================

/// Minimum zoom level
pub const MIN_ZOOM: f32 = 0.25;

/// Maximum zoom level
pub const MAX_ZOOM: f32 = 5.0;

/// Default zoom level
pub const DEFAULT_ZOOM: f32 = 1.0;

/// Scale change per unit of wheel delta
pub const WHEEL_ZOOM_FACTOR: f32 = 0.01;

// ============================================================================
// Animation & Timing
// ============================================================================

/// Number of discrete steps a zoom animation is split into
pub const ZOOM_ANIMATION_STEPS: u32 = 20;

/// Default duration of a programmatic zoom in milliseconds
pub const DEFAULT_ZOOM_DURATION_MS: u64 = 50;

/// Duration of the focus (center on entity) animation in milliseconds
pub const FOCUS_DURATION_MS: u64 = 500;

// ============================================================================
// Input Handling
// ============================================================================

/// Margin around endpoint boxes when hit-testing a link release
pub const LINK_HIT_TOLERANCE: f32 = 10.0;

/// Height of the draggable header strip of a group (canvas units)
pub const GROUP_HANDLE_HEIGHT: f32 = 24.0;

/// Maximum pointer travel (pointer-space) for a press/release to count as a click
pub const CLICK_SLOP: f32 = 3.0;

// ============================================================================
// Entity Defaults
// ============================================================================

/// Default node size when a spec omits width/height
pub const DEFAULT_NODE_SIZE: (f32, f32) = (100.0, 40.0);

/// Default group size when a spec omits width/height
pub const DEFAULT_GROUP_SIZE: (f32, f32) = (300.0, 200.0);

/// Default endpoint box size
pub const DEFAULT_ENDPOINT_SIZE: (f32, f32) = (10.0, 10.0);

/// Default edge shape type
pub const DEFAULT_EDGE_SHAPE: &str = "Bezier";

/// Registry tag used when a spec does not name a shape kind
pub const DEFAULT_SHAPE_KIND: &str = "default";

// ============================================================================
// Layout Defaults
// ============================================================================

/// Repulsion between nodes (negative = repel)
pub const DEFAULT_CHARGE_STRENGTH: f32 = -150.0;

/// Rest length of layout links
pub const DEFAULT_LINK_DISTANCE: f32 = 200.0;

/// Stiffness of layout links
pub const DEFAULT_LINK_STRENGTH: f32 = 1.0;
