use super::hit::link_target;
use super::reparent::{Reparent, plan_reparent};
use super::session::{DragMode, DragSession, Relink};
use super::PointerEvent;
use crate::canvas::Canvas;
use crate::constants::CLICK_SLOP;
use crate::error::{GraphError, LinkRejection};
use crate::events::CanvasEvent;
use crate::graph::DraftEdge;
use crate::profile_scope;
use crate::selection::SelectionSet;
use crate::types::{EdgeId, EndpointId, GroupId, NodeId, Point, Rect};
use tracing::{debug, warn};

/// What a release did.
#[derive(Debug, PartialEq)]
pub enum Release {
    /// Not a primary release, or no press to end
    Ignored,
    /// The press started nothing and was not a click
    Nothing,
    /// Press and release on empty canvas without moving
    Clicked,
    Panned,
    NodeMoved { node: NodeId, reparent: Reparent },
    GroupMoved { group: GroupId },
    Linked { edge: EdgeId },
    LinkRejected(GraphError),
    Selected(SelectionSet),
}

impl Canvas {
    /// End the current gesture. The session is dropped whatever happens.
    pub fn pointer_up(&mut self, event: PointerEvent) -> Release {
        profile_scope!("pointer_up");

        if !event.is_primary() {
            return Release::Ignored;
        }
        let Some(press) = self.drag.press.take() else {
            return Release::Ignored;
        };

        if let Some(marquee) = self.selection.take_marquee() {
            self.drag.session = DragSession::Idle;
            return Release::Selected(self.complete_marquee(marquee));
        }

        let canvas_pos = self.viewport.coords().terminal_to_canvas_point(event.position);
        let payload = self.drag_payload(canvas_pos);
        let session = self.drag.session.take();
        let mode = session.mode();

        let mut release = match session {
            DragSession::Idle => Release::Nothing,
            DragSession::CanvasPan { .. } => Release::Panned,
            DragSession::NodeDrag { node, .. } => {
                let reparent = self.finish_node_drag(&node);
                Release::NodeMoved { node, reparent }
            }
            DragSession::GroupDrag { group, .. } => Release::GroupMoved { group },
            DragSession::EndpointLink {
                node,
                endpoint,
                draft,
                relink,
                ..
            } => self.finish_link(&node, &endpoint, draft, relink, canvas_pos),
        };

        if mode != DragMode::None {
            self.bus.publish(CanvasEvent::DragEnd(payload));
        }

        let travel = press.travel.max((event.position - press.at).length());
        let clickable = matches!(release, Release::Nothing | Release::Panned);
        if clickable && press.on_empty_canvas && travel < CLICK_SLOP {
            self.bus.publish(CanvasEvent::CanvasClick {
                pointer_pos: canvas_pos,
            });
            release = Release::Clicked;
        }

        debug!(mode = ?mode, release = ?release, "Drag ended");
        release
    }

    /// Drop the current gesture without running any release logic, e.g.
    /// after the host lost the pointer-up.
    pub fn reset_drag(&mut self) {
        let session = self.drag.session.take();
        if let DragSession::EndpointLink { draft, relink, .. } = session {
            if let Some(draft) = draft {
                draft.discard();
            }
            self.restore_relink(relink);
        }
        self.drag.press = None;
        self.selection.take_marquee();
        debug!("Drag state reset");
    }

    /// Apply a finished marquee (pointer-space) reported by the selection
    /// surface. The result replaces the selection and is published.
    pub fn complete_marquee(&mut self, marquee: Rect) -> SelectionSet {
        if !self.selection.is_enabled() {
            debug!("Marquee ignored outside selection mode");
            return SelectionSet::default();
        }

        let selected = self
            .selection
            .select_in_rect(&self.store, self.viewport.coords(), marquee);
        self.selection.set_selection(selected.clone());
        self.bus.publish(CanvasEvent::MultipleSelect {
            data: selected.clone(),
        });
        selected
    }

    fn finish_node_drag(&mut self, node: &NodeId) -> Reparent {
        let plan = plan_reparent(&self.store, node);
        let applied = match &plan {
            Reparent::Stay => return Reparent::Stay,
            Reparent::Extract { .. } => self.store.detach_from_group(node).map(|_| ()),
            Reparent::Insert { into } | Reparent::Transfer { into, .. } => {
                self.store.attach_to_group(node, into)
            }
        };

        if let Err(e) = applied {
            warn!(node = %node, error = %e, "Re-parenting failed");
            return Reparent::Stay;
        }
        self.store.redraw_node_edges(std::slice::from_ref(node));
        plan
    }

    fn finish_link(
        &mut self,
        node: &NodeId,
        endpoint: &EndpointId,
        draft: Option<DraftEdge>,
        relink: Option<Relink>,
        at: Point,
    ) -> Release {
        let Some(draft) = draft else {
            self.restore_relink(relink);
            return Release::Nothing;
        };

        if let Some(Relink::Detached(link)) = relink {
            debug!(edge = ?link.id, "Picked-up link let go");
            self.bus.publish(CanvasEvent::LinkDisconnect { link });
        }

        let target = match self.check_link_target(node, endpoint, at) {
            Ok(target) => target,
            Err(rejection) => {
                debug!(node = %node, endpoint = %endpoint, %rejection, "Link rejected");
                draft.discard();
                return Release::LinkRejected(rejection.into());
            }
        };

        match self.store.promote_draft(draft, &target.0, &target.1) {
            Ok(edge) => {
                let id = edge.id.clone();
                let link = edge.to_spec();
                debug!(edge = %id, "Link connected");
                self.bus.publish(CanvasEvent::LinkConnect { link });
                Release::Linked { edge: id }
            }
            Err(e) => {
                debug!(node = %node, endpoint = %endpoint, error = %e, "Link rejected");
                Release::LinkRejected(e)
            }
        }
    }

    /// Put a detached picked-up link back where it was. Pending links never
    /// left the store.
    fn restore_relink(&mut self, relink: Option<Relink>) {
        let Some(Relink::Detached(spec)) = relink else {
            return;
        };
        let id = spec.id.clone();
        if let Err(e) = self.store.add_edge(spec) {
            warn!(edge = ?id, error = %e, "Could not restore picked-up link");
        }
    }

    fn check_link_target(
        &self,
        node: &NodeId,
        endpoint: &EndpointId,
        at: Point,
    ) -> Result<(NodeId, EndpointId), LinkRejection> {
        let (target_node, target_endpoint) = link_target(&self.store, at).ok_or(LinkRejection::NoTarget)?;
        let origin = self
            .store
            .endpoint(node, endpoint)
            .ok_or(LinkRejection::NoTarget)?;
        let target = self
            .store
            .endpoint(&target_node, &target_endpoint)
            .ok_or(LinkRejection::NoTarget)?;
        target.accepts_link_from(origin)?;
        Ok((target_node, target_endpoint))
    }
}
