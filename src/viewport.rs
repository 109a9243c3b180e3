//! ViewportController - pan offset, zoom scale and their animations.
//!
//! Every change to the scale or the pan offset is pushed into the
//! [`CoordinateService`] before anything else can observe it, then announced
//! on the bus (`canvas:zoom` / `canvas:move`) so the renderer reapplies the
//! visual transform.
//!
//! Animations are a fixed number of discrete steps. The host owns the timer:
//! it calls [`ViewportController::tick`] every [`ViewportController::step_interval`]
//! until `tick` returns false. Between ticks the state is fully consistent.

use crate::config::ContainerConfig;
use crate::constants::{FOCUS_DURATION_MS, MAX_ZOOM, MIN_ZOOM, WHEEL_ZOOM_FACTOR, ZOOM_ANIMATION_STEPS};
use crate::coords::{CoordinateService, ViewportInfo, ViewportInfoUpdate};
use crate::error::{GraphError, GraphResult};
use crate::events::{CanvasEvent, EventBus};
use crate::graph::GraphStore;
use crate::types::{EntityKind, EntityRef, Point, Size};
use serde::Serialize;
use std::fmt;
use std::time::Duration;
use tracing::{debug, warn};

pub type AnimationCallback = Box<dyn FnOnce()>;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ViewportState {
    pub scale: f32,
    pub pan: Point,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            scale: 1.0,
            pan: Point::ZERO,
        }
    }
}

struct Animation {
    from_scale: f32,
    to_scale: f32,
    /// Pan interpolation, for focus animations
    pan: Option<(Point, Point)>,
    step: u32,
    interval: Duration,
    on_complete: Option<AnimationCallback>,
}

impl Animation {
    fn value_at(&self, step: u32) -> (f32, Option<Point>) {
        if step >= ZOOM_ANIMATION_STEPS {
            return (self.to_scale, self.pan.map(|(_, to)| to));
        }
        let t = step as f32 / ZOOM_ANIMATION_STEPS as f32;
        let scale = self.from_scale + (self.to_scale - self.from_scale) * t;
        let pan = self.pan.map(|(from, to)| {
            Point::new(from.x + (to.x - from.x) * t, from.y + (to.y - from.y) * t)
        });
        (scale, pan)
    }
}

impl fmt::Debug for Animation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Animation")
            .field("from_scale", &self.from_scale)
            .field("to_scale", &self.to_scale)
            .field("pan", &self.pan)
            .field("step", &self.step)
            .field("has_callback", &self.on_complete.is_some())
            .finish()
    }
}

#[derive(Debug)]
pub struct ViewportController {
    state: ViewportState,
    coords: CoordinateService,
    zoomable: bool,
    moveable: bool,
    animation: Option<Animation>,
    bus: EventBus,
}

pub fn clamp_zoom(scale: f32) -> f32 {
    scale.clamp(MIN_ZOOM, MAX_ZOOM)
}

fn zoom_in_range(scale: f32) -> bool {
    (MIN_ZOOM..=MAX_ZOOM).contains(&scale)
}

impl ViewportController {
    pub fn new(bus: EventBus, container: ContainerConfig, zoomable: bool, moveable: bool) -> Self {
        let state = ViewportState::default();
        let coords = CoordinateService::new(ViewportInfo {
            terminal_offset: container.offset,
            terminal_size: container.size,
            canvas_offset: state.pan,
            scale: state.scale,
        });
        Self {
            state,
            coords,
            zoomable,
            moveable,
            animation: None,
            bus,
        }
    }

    pub fn state(&self) -> ViewportState {
        self.state
    }

    pub fn scale(&self) -> f32 {
        self.state.scale
    }

    pub fn pan(&self) -> Point {
        self.state.pan
    }

    pub fn coords(&self) -> &CoordinateService {
        &self.coords
    }

    pub fn container_size(&self) -> Size {
        self.coords.info().terminal_size
    }

    pub fn is_zoomable(&self) -> bool {
        self.zoomable
    }

    pub fn set_zoomable(&mut self, zoomable: bool) {
        self.zoomable = zoomable;
    }

    pub fn is_moveable(&self) -> bool {
        self.moveable
    }

    pub fn set_moveable(&mut self, moveable: bool) {
        self.moveable = moveable;
    }

    /// Update the root container geometry, e.g. after a window resize.
    pub fn set_container(&mut self, container: ContainerConfig) {
        self.coords.update(
            ViewportInfoUpdate::default()
                .terminal_offset(container.offset)
                .terminal_size(container.size),
        );
    }

    fn apply_scale(&mut self, scale: f32) {
        self.state.scale = scale;
        self.coords.update(ViewportInfoUpdate::default().scale(scale));
        self.bus.publish(CanvasEvent::CanvasZoom { scale });
    }

    fn apply_pan(&mut self, pan: Point) {
        self.state.pan = pan;
        self.coords
            .update(ViewportInfoUpdate::default().canvas_offset(pan));
        self.bus.publish(CanvasEvent::CanvasMove { offset: pan });
    }

    // ========================================================================
    // Immediate changes
    // ========================================================================

    /// Set the scale, clamped to the zoom bounds. Returns the applied value;
    /// non-finite input is ignored and the current scale returned.
    pub fn set_zoom(&mut self, scale: f32) -> f32 {
        if !scale.is_finite() {
            warn!(requested = scale, "Ignoring non-finite zoom");
            return self.state.scale;
        }
        let clamped = clamp_zoom(scale);
        if clamped != scale {
            debug!(requested = scale, applied = clamped, "Zoom clamped to bounds");
        }
        self.apply_scale(clamped);
        clamped
    }

    /// Set the absolute pan offset.
    pub fn pan_to(&mut self, offset: Point) {
        self.apply_pan(offset);
    }

    /// Wheel-driven zoom. Cancels any running animation; at the bounds the
    /// scale stays pinned and the event still counts as handled.
    pub fn on_wheel(&mut self, delta_y: f32) -> bool {
        if !self.zoomable {
            return false;
        }
        if !delta_y.is_finite() {
            warn!(delta = delta_y, "Ignoring non-finite wheel delta");
            return false;
        }
        if self.cancel_animation() {
            debug!("Wheel input cancelled zoom animation");
        }
        let next = clamp_zoom(self.state.scale + delta_y * WHEEL_ZOOM_FACTOR);
        if next != self.state.scale {
            self.apply_scale(next);
        }
        true
    }

    // ========================================================================
    // Animations
    // ========================================================================

    /// Interpolate the scale to `target` over `duration`.
    ///
    /// Out-of-range targets are rejected and nothing starts. A running
    /// animation is replaced; its callback is dropped without being called.
    pub fn animate_zoom_to<F>(&mut self, target: f32, duration: Duration, on_complete: F) -> GraphResult<()>
    where
        F: FnOnce() + 'static,
    {
        if !zoom_in_range(target) {
            warn!(requested = target, "Zoom target out of range, animation not started");
            return Err(GraphError::ZoomOutOfRange { requested: target });
        }
        self.start(target, None, duration, Box::new(on_complete));
        Ok(())
    }

    /// Centre `entity` in the container and reset the scale to 1.0, animated.
    ///
    /// Supports nodes (including grouped ones) and groups.
    pub fn focus_on<F>(&mut self, store: &GraphStore, entity: &EntityRef, on_complete: F) -> GraphResult<()>
    where
        F: FnOnce() + 'static,
    {
        let bounds = match entity {
            EntityRef::Node { id } => store
                .node_bounds(id)
                .ok_or_else(|| GraphError::unknown(EntityKind::Node, id))?,
            EntityRef::Group { id } => store
                .group(id)
                .map(|g| g.bounds)
                .ok_or_else(|| GraphError::unknown(EntityKind::Group, id))?,
            EntityRef::Edge { id } => return Err(GraphError::unknown(EntityKind::Edge, id)),
            EntityRef::Endpoint { id, .. } => return Err(GraphError::unknown(EntityKind::Endpoint, id)),
        };

        let container = self.container_size();
        let center = bounds.center();
        let target_pan = Point::new(container.width / 2.0 - center.x, container.height / 2.0 - center.y);
        debug!(?entity, x = target_pan.x, y = target_pan.y, "Focusing");

        self.start(
            1.0,
            Some(target_pan),
            Duration::from_millis(FOCUS_DURATION_MS),
            Box::new(on_complete),
        );
        Ok(())
    }

    fn start(&mut self, to_scale: f32, to_pan: Option<Point>, duration: Duration, on_complete: AnimationCallback) {
        if self.animation.take().is_some() {
            debug!("Replacing running viewport animation");
        }
        self.animation = Some(Animation {
            from_scale: self.state.scale,
            to_scale,
            pan: to_pan.map(|to| (self.state.pan, to)),
            step: 0,
            interval: duration / ZOOM_ANIMATION_STEPS,
            on_complete: Some(on_complete),
        });
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Delay between animation steps, while an animation runs.
    pub fn step_interval(&self) -> Option<Duration> {
        self.animation.as_ref().map(|a| a.interval)
    }

    /// Advance the running animation by one step. The completion callback
    /// runs right after the final step. Returns true if a step was applied.
    pub fn tick(&mut self) -> bool {
        let Some(animation) = self.animation.as_mut() else {
            return false;
        };
        animation.step += 1;
        let step = animation.step;
        let (scale, pan) = animation.value_at(step);

        self.apply_scale(clamp_zoom(scale));
        if let Some(pan) = pan {
            self.apply_pan(pan);
        }

        if step >= ZOOM_ANIMATION_STEPS {
            let callback = self.animation.take().and_then(|mut a| a.on_complete.take());
            if let Some(callback) = callback {
                callback();
            }
        }
        true
    }

    /// Run the remaining steps at once.
    pub fn finish_animation(&mut self) {
        while self.tick() {}
    }

    /// Stop the running animation where it is. Its callback is not called.
    pub fn cancel_animation(&mut self) -> bool {
        self.animation.take().is_some()
    }
}
