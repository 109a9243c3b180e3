use super::PointerEvent;
use super::session::{DragSession, Relink};
use crate::canvas::Canvas;
use crate::events::CanvasEvent;
use crate::graph::DraftEdge;
use crate::profile_scope;
use crate::types::{EndpointId, GroupId, NodeId, Point};
use tracing::{debug, warn};

impl Canvas {
    /// Continue the current gesture. Returns false when there is nothing to
    /// continue.
    pub fn pointer_move(&mut self, event: PointerEvent) -> bool {
        profile_scope!("pointer_move");

        if !event.is_primary() {
            return false;
        }
        let Some(press) = self.drag.press.as_mut() else {
            return false;
        };
        press.travel = press.travel.max((event.position - press.at).length());

        if self.selection.marquee_rect().is_some() {
            self.selection.update_marquee(event.position);
            return true;
        }

        let canvas_pos = self.viewport.coords().terminal_to_canvas_point(event.position);
        self.drag.session = match self.drag.session.take() {
            DragSession::Idle => return false,
            DragSession::CanvasPan { anchor, start_pan } => {
                self.viewport.pan_to(start_pan + (event.position - anchor));
                DragSession::CanvasPan { anchor, start_pan }
            }
            DragSession::NodeDrag { node, last } => {
                self.drag_nodes(&node, canvas_pos - last);
                DragSession::NodeDrag {
                    node,
                    last: canvas_pos,
                }
            }
            DragSession::GroupDrag { group, last } => {
                self.drag_group(&group, canvas_pos - last);
                DragSession::GroupDrag {
                    group,
                    last: canvas_pos,
                }
            }
            DragSession::EndpointLink {
                node,
                endpoint,
                draft,
                relink,
                ..
            } => {
                let relink = relink.and_then(|r| self.detach_relink(r));
                self.drag_link(node, endpoint, draft, relink, canvas_pos)
            }
        };

        let payload = self.drag_payload(canvas_pos);
        self.bus.publish(CanvasEvent::DragMove(payload));
        true
    }

    /// Move the anchor node, or the whole selection when the anchor is part
    /// of it. Every node moves before any edge is redrawn.
    fn drag_nodes(&mut self, anchor: &NodeId, delta: Point) {
        let moving: Vec<NodeId> = if self.selection.selection().contains_node(anchor) {
            self.selection.selection().nodes.clone()
        } else {
            vec![anchor.clone()]
        };

        for id in &moving {
            if let Err(e) = self.store.translate_node(id, delta) {
                debug!(node = %id, error = %e, "Skipping node during drag");
            }
        }
        self.store.redraw_node_edges(&moving);
    }

    fn drag_group(&mut self, group: &GroupId, delta: Point) {
        if let Err(e) = self.store.translate_group(group, delta) {
            warn!(group = %group, error = %e, "Dragged group vanished");
            return;
        }
        let edges = self.store.edges_touching_group(group);
        self.store.redraw_edges(&edges);
    }

    fn drag_link(
        &mut self,
        node: NodeId,
        endpoint: EndpointId,
        draft: Option<DraftEdge>,
        relink: Option<Relink>,
        free_end: Point,
    ) -> DragSession {
        let draft = match draft {
            Some(draft) => Some(draft),
            None => match self.store.create_draft_edge(&node, &endpoint) {
                Ok(draft) => Some(draft),
                Err(e) => {
                    warn!(node = %node, endpoint = %endpoint, error = %e, "Cannot draft link");
                    None
                }
            },
        };

        let start = self.store.endpoint(&node, &endpoint).map(|e| e.center());
        let draft = match (draft, start) {
            (Some(mut draft), Some(start)) => {
                draft.redraw(start, free_end);
                Some(draft)
            }
            (draft, _) => draft,
        };

        DragSession::EndpointLink {
            node,
            endpoint,
            last: free_end,
            draft,
            relink,
        }
    }

    /// Take a picked-up link out of the store. A link that vanished in the
    /// meantime is simply forgotten.
    fn detach_relink(&mut self, relink: Relink) -> Option<Relink> {
        let Relink::Pending(edge) = relink else {
            return Some(relink);
        };
        match self.store.remove_edge(&edge) {
            Ok(spec) => {
                self.selection.forget(&self.store);
                debug!(edge = %edge, "Picked-up link detached");
                Some(Relink::Detached(spec))
            }
            Err(e) => {
                debug!(edge = %edge, error = %e, "Picked-up link is gone");
                None
            }
        }
    }
}
