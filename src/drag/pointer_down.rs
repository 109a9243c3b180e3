use super::hit::{HitTarget, hit_test};
use super::session::{DragMode, DragSession, Relink};
use super::{PointerEvent, Press};
use crate::canvas::Canvas;
use crate::events::{CanvasEvent, DragPayload};
use crate::graph::EdgeEnd;
use crate::profile_scope;
use crate::types::{EdgeId, EndpointId, NodeId, Point};
use tracing::{debug, trace};

impl Canvas {
    /// Start a gesture. Returns the mode of the session that was started.
    pub fn pointer_down(&mut self, event: PointerEvent) -> DragMode {
        profile_scope!("pointer_down");

        if !event.is_primary() {
            trace!(button = ?event.button, "Ignoring non-primary press");
            return DragMode::None;
        }
        if self.drag.press.is_some() {
            debug!("Ignoring pointer-down while a gesture is in progress");
            return self.drag.session.mode();
        }

        let canvas_pos = self.viewport.coords().terminal_to_canvas_point(event.position);
        let hits = hit_test(&self.store, canvas_pos);
        self.drag.press = Some(Press {
            at: event.position,
            on_empty_canvas: hits.is_empty(),
            travel: 0.0,
        });

        let session = if self.selection.is_enabled() {
            self.selection_press(&hits, event.position, canvas_pos)
        } else {
            self.choose_session(&hits, event.position, canvas_pos)
        };
        let mode = session.mode();
        self.drag.session = session;

        if mode != DragMode::None {
            debug!(mode = ?mode, x = canvas_pos.x, y = canvas_pos.y, "Drag started");
            let payload = self.drag_payload(canvas_pos);
            self.bus.publish(CanvasEvent::DragStart(payload));
        }
        mode
    }

    /// First candidate the canvas flags allow, in priority order: endpoint,
    /// group handle, node body, then the canvas itself.
    fn choose_session(&mut self, hits: &[HitTarget], pointer: Point, canvas_pos: Point) -> DragSession {
        for hit in hits {
            match hit {
                HitTarget::Endpoint { node, endpoint } if self.config.linkable => {
                    let (node, endpoint, relink) = match self.incoming_link(node, endpoint) {
                        Some((edge, origin_node, origin_endpoint)) => {
                            (origin_node, origin_endpoint, Some(Relink::Pending(edge)))
                        }
                        None => (node.clone(), endpoint.clone(), None),
                    };
                    return DragSession::EndpointLink {
                        node,
                        endpoint,
                        last: canvas_pos,
                        draft: None,
                        relink,
                    };
                }
                HitTarget::GroupHandle { group } if self.config.draggable => {
                    return DragSession::GroupDrag {
                        group: group.clone(),
                        last: canvas_pos,
                    };
                }
                HitTarget::Node { node } if self.config.draggable => {
                    return DragSession::NodeDrag {
                        node: node.clone(),
                        last: canvas_pos,
                    };
                }
                _ => {}
            }
        }

        if self.viewport.is_moveable() {
            DragSession::CanvasPan {
                anchor: pointer,
                start_pan: self.viewport.pan(),
            }
        } else {
            DragSession::Idle
        }
    }

    /// In selection mode a press on an already selected node drags the whole
    /// selection; anything else starts a marquee.
    fn selection_press(&mut self, hits: &[HitTarget], pointer: Point, canvas_pos: Point) -> DragSession {
        let selected = hits.iter().find_map(|hit| match hit {
            HitTarget::Node { node } if self.selection.selection().contains_node(node) => Some(node.clone()),
            _ => None,
        });

        match selected {
            Some(node) if self.config.draggable => DragSession::NodeDrag {
                node,
                last: canvas_pos,
            },
            _ => {
                self.selection.begin_marquee(pointer);
                DragSession::Idle
            }
        }
    }

    /// With `dis_linkable`, pressing a target endpoint that already has an
    /// incoming link picks that link up: the gesture continues from the
    /// link's source endpoint. The link itself is only detached once the
    /// pointer moves.
    fn incoming_link(&self, node: &NodeId, endpoint: &EndpointId) -> Option<(EdgeId, NodeId, EndpointId)> {
        if !self.config.dis_linkable {
            return None;
        }

        let picked = self.store.edges().iter().filter(|e| !e.is_orphaned()).find_map(|edge| {
            let lands_here = matches!(
                &edge.target,
                EdgeEnd::Endpoint { node: n, endpoint: e } if n == node && e == endpoint
            );
            match (&edge.source, lands_here) {
                (EdgeEnd::Endpoint { node, endpoint }, true) => {
                    Some((edge.id.clone(), node.clone(), endpoint.clone()))
                }
                _ => None,
            }
        });
        if let Some((edge, ..)) = &picked {
            debug!(edge = %edge, "Link picked up for relinking");
        }
        picked
    }

    /// Event payload describing the current session.
    pub(crate) fn drag_payload(&self, pointer_pos: Point) -> DragPayload {
        let session = &self.drag.session;
        DragPayload {
            drag_type: session.mode(),
            pointer_pos,
            drag_node: session
                .anchor_node()
                .or_else(|| session.anchor_group())
                .cloned(),
            drag_endpoint: session.anchor_endpoint().map(|(_, e)| e.clone()),
            drag_edge: session.draft_info(),
        }
    }
}
