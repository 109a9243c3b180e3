//! Coordinate conversion between pointer-space and canvas-space.
//!
//! Pointer-space is what the input device reports, relative to the viewing
//! surface. Canvas-space is the graph's own coordinate system. The canvas
//! layer is translated by the pan offset and scaled around the centre of the
//! root container, so a conversion needs the container's screen offset and
//! size as well as the pan offset and the zoom scale.
//!
//! Nothing derived from these inputs is cached: every conversion reads the
//! current [`ViewportInfo`], so a stale transform can never leak into a drag.

use crate::constants::DEFAULT_ZOOM;
use crate::types::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// Coordinate axis selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Everything the transform depends on.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewportInfo {
    /// Screen offset of the root container
    pub terminal_offset: Point,
    /// Size of the root container
    pub terminal_size: Size,
    /// Pan offset of the canvas layer
    pub canvas_offset: Point,
    /// Zoom scale of the canvas layer
    pub scale: f32,
}

impl Default for ViewportInfo {
    fn default() -> Self {
        Self {
            terminal_offset: Point::ZERO,
            terminal_size: Size::default(),
            canvas_offset: Point::ZERO,
            scale: DEFAULT_ZOOM,
        }
    }
}

/// Partial change to [`ViewportInfo`]; only the fields that are set are applied.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewportInfoUpdate {
    pub terminal_offset_x: Option<f32>,
    pub terminal_offset_y: Option<f32>,
    pub terminal_width: Option<f32>,
    pub terminal_height: Option<f32>,
    pub canvas_offset_x: Option<f32>,
    pub canvas_offset_y: Option<f32>,
    pub scale: Option<f32>,
}

impl ViewportInfoUpdate {
    pub fn scale(mut self, scale: f32) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn canvas_offset(mut self, offset: Point) -> Self {
        self.canvas_offset_x = Some(offset.x);
        self.canvas_offset_y = Some(offset.y);
        self
    }

    pub fn terminal_offset(mut self, offset: Point) -> Self {
        self.terminal_offset_x = Some(offset.x);
        self.terminal_offset_y = Some(offset.y);
        self
    }

    pub fn terminal_size(mut self, size: Size) -> Self {
        self.terminal_width = Some(size.width);
        self.terminal_height = Some(size.height);
        self
    }
}

/// Pure pointer-space <-> canvas-space transform.
#[derive(Clone, Debug, Default)]
pub struct CoordinateService {
    info: ViewportInfo,
}

impl CoordinateService {
    pub fn new(info: ViewportInfo) -> Self {
        Self { info }
    }

    pub fn info(&self) -> &ViewportInfo {
        &self.info
    }

    /// Merge a partial update into the current viewport info.
    pub fn update(&mut self, update: ViewportInfoUpdate) {
        let info = &mut self.info;
        if let Some(v) = update.terminal_offset_x {
            info.terminal_offset.x = v;
        }
        if let Some(v) = update.terminal_offset_y {
            info.terminal_offset.y = v;
        }
        if let Some(v) = update.terminal_width {
            info.terminal_size.width = v;
        }
        if let Some(v) = update.terminal_height {
            info.terminal_size.height = v;
        }
        if let Some(v) = update.canvas_offset_x {
            info.canvas_offset.x = v;
        }
        if let Some(v) = update.canvas_offset_y {
            info.canvas_offset.y = v;
        }
        if let Some(v) = update.scale {
            info.scale = v;
        }
    }

    #[inline]
    fn axis_params(&self, axis: Axis) -> (f32, f32, f32) {
        let info = &self.info;
        match axis {
            Axis::X => (
                info.terminal_offset.x,
                info.canvas_offset.x,
                info.terminal_size.width / 2.0,
            ),
            Axis::Y => (
                info.terminal_offset.y,
                info.canvas_offset.y,
                info.terminal_size.height / 2.0,
            ),
        }
    }

    /// Convert a pointer-space coordinate on one axis to canvas-space.
    #[inline]
    pub fn terminal_to_canvas(&self, axis: Axis, value: f32) -> f32 {
        let (terminal_offset, canvas_offset, origin) = self.axis_params(axis);
        (value - terminal_offset - canvas_offset - origin) / self.info.scale + origin
    }

    /// Convert a canvas-space coordinate on one axis to pointer-space.
    #[inline]
    pub fn canvas_to_terminal(&self, axis: Axis, value: f32) -> f32 {
        let (terminal_offset, canvas_offset, origin) = self.axis_params(axis);
        (value - origin) * self.info.scale + origin + canvas_offset + terminal_offset
    }

    pub fn terminal_to_canvas_point(&self, p: Point) -> Point {
        Point::new(
            self.terminal_to_canvas(Axis::X, p.x),
            self.terminal_to_canvas(Axis::Y, p.y),
        )
    }

    pub fn canvas_to_terminal_point(&self, p: Point) -> Point {
        Point::new(
            self.canvas_to_terminal(Axis::X, p.x),
            self.canvas_to_terminal(Axis::Y, p.y),
        )
    }

    /// Convert a pointer-space rectangle (e.g. a marquee) to canvas-space.
    pub fn terminal_to_canvas_rect(&self, rect: Rect) -> Rect {
        let a = self.terminal_to_canvas_point(rect.origin());
        let b = self.terminal_to_canvas_point(Point::new(rect.right(), rect.bottom()));
        Rect::from_corners(a, b)
    }

    /// Convert a delta from pointer-space to canvas-space (translation-free).
    #[inline]
    pub fn delta_terminal_to_canvas(&self, delta: Point) -> Point {
        Point::new(delta.x / self.info.scale, delta.y / self.info.scale)
    }
}
