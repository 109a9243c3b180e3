//! Event bus - the publish/subscribe channel every component talks through.
//!
//! One bus is created per canvas and cloned into each component at
//! construction. Clones share the same subscriber list.
//!
//! Handlers run synchronously on the publishing thread. The subscriber list is
//! snapshotted before dispatch, so a handler may subscribe or unsubscribe
//! without deadlocking; such changes take effect from the next publish.

use crate::drag::DragMode;
use crate::selection::SelectionSet;
use crate::types::{EdgeSpec, EndpointId, EntityId, EntityKind, NodeId, Point};
use parking_lot::RwLock;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

// ============================================================================
// Event Names & Payloads
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventName {
    DragStart,
    DragMove,
    DragEnd,
    LinkConnect,
    LinkDisconnect,
    NodeDelete,
    MultipleSelect,
    CanvasClick,
    CanvasZoom,
    CanvasMove,
}

impl EventName {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventName::DragStart => "drag:start",
            EventName::DragMove => "drag:move",
            EventName::DragEnd => "drag:end",
            EventName::LinkConnect => "link:connect",
            EventName::LinkDisconnect => "link:disconnect",
            EventName::NodeDelete => "node:delete",
            EventName::MultipleSelect => "multiple:select",
            EventName::CanvasClick => "canvas:click",
            EventName::CanvasZoom => "canvas:zoom",
            EventName::CanvasMove => "canvas:move",
        }
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The free end of a draft edge while an endpoint link is being drawn.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftEdgeInfo {
    pub source_node: NodeId,
    pub source_endpoint: EndpointId,
    /// Canvas-space position the free end currently follows
    pub free_end: Point,
}

/// Payload shared by the three gesture lifecycle events.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DragPayload {
    pub drag_type: DragMode,
    /// Canvas-space pointer position
    pub pointer_pos: Point,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drag_node: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drag_endpoint: Option<EndpointId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drag_edge: Option<DraftEdgeInfo>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", content = "payload")]
pub enum CanvasEvent {
    #[serde(rename = "drag:start")]
    DragStart(DragPayload),
    #[serde(rename = "drag:move")]
    DragMove(DragPayload),
    #[serde(rename = "drag:end")]
    DragEnd(DragPayload),
    #[serde(rename = "link:connect")]
    LinkConnect { link: EdgeSpec },
    /// A link picked up from its target endpoint was let go
    #[serde(rename = "link:disconnect")]
    LinkDisconnect { link: EdgeSpec },
    #[serde(rename = "node:delete")]
    NodeDelete { kind: EntityKind, id: EntityId },
    #[serde(rename = "multiple:select")]
    MultipleSelect { data: SelectionSet },
    #[serde(rename = "canvas:click")]
    CanvasClick {
        #[serde(rename = "pointerPos")]
        pointer_pos: Point,
    },
    #[serde(rename = "canvas:zoom")]
    CanvasZoom { scale: f32 },
    #[serde(rename = "canvas:move")]
    CanvasMove { offset: Point },
}

impl CanvasEvent {
    pub fn name(&self) -> EventName {
        match self {
            CanvasEvent::DragStart(_) => EventName::DragStart,
            CanvasEvent::DragMove(_) => EventName::DragMove,
            CanvasEvent::DragEnd(_) => EventName::DragEnd,
            CanvasEvent::LinkConnect { .. } => EventName::LinkConnect,
            CanvasEvent::LinkDisconnect { .. } => EventName::LinkDisconnect,
            CanvasEvent::NodeDelete { .. } => EventName::NodeDelete,
            CanvasEvent::MultipleSelect { .. } => EventName::MultipleSelect,
            CanvasEvent::CanvasClick { .. } => EventName::CanvasClick,
            CanvasEvent::CanvasZoom { .. } => EventName::CanvasZoom,
            CanvasEvent::CanvasMove { .. } => EventName::CanvasMove,
        }
    }
}

// ============================================================================
// Bus
// ============================================================================

pub type Handler = Arc<dyn Fn(&CanvasEvent) + Send + Sync>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Subscription {
    id: SubscriptionId,
    /// `None` receives every event
    filter: Option<EventName>,
    handler: Handler,
}

#[derive(Default)]
struct Subscribers {
    next_id: u64,
    list: Vec<Subscription>,
}

#[derive(Clone, Default)]
pub struct EventBus {
    inner: Arc<RwLock<Subscribers>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, name: EventName, handler: F) -> SubscriptionId
    where
        F: Fn(&CanvasEvent) + Send + Sync + 'static,
    {
        self.add(Some(name), Arc::new(handler))
    }

    /// Receive every event regardless of name.
    pub fn subscribe_all<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&CanvasEvent) + Send + Sync + 'static,
    {
        self.add(None, Arc::new(handler))
    }

    fn add(&self, filter: Option<EventName>, handler: Handler) -> SubscriptionId {
        let mut subs = self.inner.write();
        subs.next_id += 1;
        let id = SubscriptionId(subs.next_id);
        subs.list.push(Subscription {
            id,
            filter,
            handler,
        });
        id
    }

    /// Returns false if the subscription was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subs = self.inner.write();
        let before = subs.list.len();
        subs.list.retain(|s| s.id != id);
        subs.list.len() != before
    }

    pub fn publish(&self, event: CanvasEvent) {
        let name = event.name();
        let handlers: Vec<Handler> = {
            let subs = self.inner.read();
            subs.list
                .iter()
                .filter(|s| s.filter.is_none_or(|f| f == name))
                .map(|s| s.handler.clone())
                .collect()
        };

        tracing::trace!(event = %name, handlers = handlers.len(), "publish");
        for handler in handlers {
            handler(&event);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.read().list.len()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
