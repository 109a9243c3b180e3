//! Drag engine - the pointer-event state machine.
//!
//! `Canvas::pointer_down` picks a [`DragSession`] from what is under the
//! pointer, `Canvas::pointer_move` applies the continuous mutation of that
//! session, and `Canvas::pointer_up` runs the release logic and drops the
//! session. Only the primary button takes part; other buttons are ignored at
//! every stage.

mod hit;
mod pointer_down;
mod pointer_move;
mod pointer_up;
mod reparent;
mod session;

pub use hit::{HitTarget, hit_test, link_target};
pub use pointer_up::Release;
pub use reparent::{Reparent, plan_reparent};
pub use session::{DragMode, DragSession, Relink};

use crate::types::Point;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
    Other(u16),
}

/// A pointer event as delivered by the host, in pointer-space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub position: Point,
    pub button: PointerButton,
}

impl PointerEvent {
    pub fn new(position: Point, button: PointerButton) -> Self {
        Self { position, button }
    }

    /// Primary-button event at `(x, y)`.
    pub fn primary(x: f32, y: f32) -> Self {
        Self::new(Point::new(x, y), PointerButton::Primary)
    }

    pub fn is_primary(&self) -> bool {
        self.button == PointerButton::Primary
    }
}

/// Where the current press started.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Press {
    /// Pointer-space press position
    pub at: Point,
    /// Nothing was under the pointer
    pub on_empty_canvas: bool,
    /// Largest pointer-space distance from `at` seen so far
    pub travel: f32,
}

/// Owns the drag session and the press that started it.
#[derive(Debug, Default)]
pub struct DragController {
    pub(crate) session: DragSession,
    pub(crate) press: Option<Press>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> &DragSession {
        &self.session
    }

    pub fn mode(&self) -> DragMode {
        self.session.mode()
    }

    /// A primary press is held down.
    pub fn is_pressed(&self) -> bool {
        self.press.is_some()
    }
}
