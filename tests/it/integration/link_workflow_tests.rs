//! Link Workflow Integration Tests
//!
//! Node `a` at the origin carries a source endpoint centred at (100,20);
//! node `b` at (300,0) carries a target endpoint centred at (300,20).

use crate::helpers::{drag, edge_handle, EventLog, RecordingShapes, TestCanvasBuilder};
use diagram_canvas::drag::{DragMode, PointerEvent, Release};
use diagram_canvas::error::{GraphError, LinkRejection};
use diagram_canvas::events::{CanvasEvent, EventName};
use diagram_canvas::types::{EdgeId, EdgeKind, EdgeSpec, EndpointId, EndpointSpec, NodeId, NodeSpec, Point};
use diagram_canvas::Canvas;

fn pair(source: EndpointSpec, target: EndpointSpec, shapes: &RecordingShapes) -> Canvas {
    TestCanvasBuilder::new()
        .recording(shapes)
        .with_node(NodeSpec::new("a", 0.0, 0.0).with_endpoint(source))
        .with_node(NodeSpec::new("b", 300.0, 0.0).with_endpoint(target))
        .build()
}

#[test]
fn test_link_between_matching_scopes() {
    let shapes = RecordingShapes::new();
    let mut canvas = pair(
        EndpointSpec::source("out").with_scope("A"),
        EndpointSpec::target("in").with_scope("A"),
        &shapes,
    );
    let events = EventLog::attach(&canvas);

    let release = drag(&mut canvas, (100.0, 20.0), (300.0, 20.0));

    assert_eq!(release, Release::Linked { edge: "out-in".into() });
    let edge = canvas.get_edge(&"out-in".into()).unwrap();
    assert_eq!(edge.kind, EdgeKind::Endpoint);
    assert_eq!(edge.source.node(), &NodeId::from("a"));
    assert_eq!(edge.target.node(), &NodeId::from("b"));
    assert_eq!(events.count(EventName::LinkConnect), 1);
    assert_eq!(
        shapes.last_path(edge_handle(&canvas, "out-in")),
        Some((Point::new(100.0, 20.0), Point::new(300.0, 20.0)))
    );
}

#[test]
fn test_draft_follows_pointer_then_becomes_edge() {
    let shapes = RecordingShapes::new();
    let mut canvas = pair(EndpointSpec::source("out"), EndpointSpec::target("in"), &shapes);
    let events = EventLog::attach(&canvas);

    assert_eq!(canvas.pointer_down(PointerEvent::primary(100.0, 20.0)), DragMode::Endpoint);
    assert!(canvas.drag_session().draft().is_none());

    canvas.pointer_move(PointerEvent::primary(200.0, 120.0));
    let draft = canvas.drag_session().draft().map(|d| d.handle()).expect("draft created");
    assert_eq!(
        shapes.last_path(draft),
        Some((Point::new(100.0, 20.0), Point::new(200.0, 120.0)))
    );
    let Some(CanvasEvent::DragMove(payload)) = events.last(EventName::DragMove) else {
        panic!("missing drag:move");
    };
    assert_eq!(payload.drag_edge.map(|d| d.free_end), Some(Point::new(200.0, 120.0)));

    canvas.pointer_move(PointerEvent::primary(298.0, 22.0));
    canvas.pointer_up(PointerEvent::primary(298.0, 22.0));

    assert_eq!(edge_handle(&canvas, "out-in"), draft);
    assert!(!shapes.is_destroyed(draft));
}

#[test]
fn test_scope_mismatch_is_rejected() {
    let shapes = RecordingShapes::new();
    let mut canvas = pair(
        EndpointSpec::source("out").with_scope("A"),
        EndpointSpec::target("in").with_scope("B"),
        &shapes,
    );
    let events = EventLog::attach(&canvas);

    canvas.pointer_down(PointerEvent::primary(100.0, 20.0));
    canvas.pointer_move(PointerEvent::primary(300.0, 20.0));
    let draft = canvas.drag_session().draft().map(|d| d.handle()).expect("draft created");
    let release = canvas.pointer_up(PointerEvent::primary(300.0, 20.0));

    assert_eq!(
        release,
        Release::LinkRejected(GraphError::IncompatibleLink(LinkRejection::ScopeMismatch {
            source_scope: Some("A".to_string()),
            target_scope: Some("B".to_string()),
        }))
    );
    assert!(canvas.store().edges().is_empty());
    assert!(shapes.is_destroyed(draft));
    assert_eq!(events.count(EventName::LinkConnect), 0);
    assert_eq!(events.count(EventName::DragEnd), 1);
}

#[test]
fn test_source_to_source_is_rejected() {
    let shapes = RecordingShapes::new();
    let mut canvas = pair(EndpointSpec::source("out"), EndpointSpec::source("out2"), &shapes);

    // out2 sits on b's right edge, centred at (400,20)
    let release = drag(&mut canvas, (100.0, 20.0), (400.0, 20.0));

    assert_eq!(
        release,
        Release::LinkRejected(GraphError::IncompatibleLink(LinkRejection::NotATarget {
            node: "b".into(),
            endpoint: "out2".into(),
        }))
    );
    assert!(canvas.store().edges().is_empty());
}

#[test]
fn test_release_within_tolerance_links() {
    let shapes = RecordingShapes::new();
    let mut canvas = pair(EndpointSpec::source("out"), EndpointSpec::target("in"), &shapes);

    // target box is (295,15)-(305,25); tolerance grows it to (285,5)-(315,35)
    assert_eq!(
        drag(&mut canvas, (100.0, 20.0), (286.0, 34.0)),
        Release::Linked { edge: "out-in".into() }
    );

    let mut canvas = pair(EndpointSpec::source("out"), EndpointSpec::target("in"), &shapes);
    assert_eq!(
        drag(&mut canvas, (100.0, 20.0), (285.0, 20.0)),
        Release::LinkRejected(GraphError::IncompatibleLink(LinkRejection::NoTarget))
    );
}

#[test]
fn test_press_and_release_on_endpoint_does_nothing() {
    let shapes = RecordingShapes::new();
    let mut canvas = pair(EndpointSpec::source("out"), EndpointSpec::target("in"), &shapes);
    let events = EventLog::attach(&canvas);

    canvas.pointer_down(PointerEvent::primary(100.0, 20.0));
    let release = canvas.pointer_up(PointerEvent::primary(100.0, 20.0));

    assert_eq!(release, Release::Nothing);
    assert!(canvas.store().edges().is_empty());
    assert_eq!(events.count(EventName::CanvasClick), 0);
}

#[test]
fn test_duplicate_link_is_rejected() {
    let shapes = RecordingShapes::new();
    let mut canvas = pair(EndpointSpec::source("out"), EndpointSpec::target("in"), &shapes);

    drag(&mut canvas, (100.0, 20.0), (300.0, 20.0));
    let release = drag(&mut canvas, (100.0, 20.0), (300.0, 20.0));

    assert_eq!(
        release,
        Release::LinkRejected(GraphError::IncompatibleLink(LinkRejection::DuplicateEdge(
            "out-in".into()
        )))
    );
    assert_eq!(canvas.store().edges().len(), 1);
}

#[test]
fn test_linking_disabled_drags_the_node() {
    let shapes = RecordingShapes::new();
    let mut canvas = TestCanvasBuilder::new()
        .recording(&shapes)
        .configure(|c| c.linkable = false)
        .with_node(NodeSpec::new("a", 0.0, 0.0).with_endpoint(EndpointSpec::source("out")))
        .build();

    assert_eq!(canvas.pointer_down(PointerEvent::primary(98.0, 20.0)), DragMode::Node);
}

fn relinkable(shapes: &RecordingShapes) -> Canvas {
    TestCanvasBuilder::new()
        .recording(shapes)
        .configure(|c| c.dis_linkable = true)
        .with_node(NodeSpec::new("a", 0.0, 0.0).with_endpoint(EndpointSpec::source("out")))
        .with_node(NodeSpec::new("b", 300.0, 0.0).with_endpoint(EndpointSpec::target("in")))
        .with_node(NodeSpec::new("c", 300.0, 200.0).with_endpoint(EndpointSpec::target("in2")))
        .with_edge(EdgeSpec::between_endpoints("out-in", ("a", "out"), ("b", "in")))
        .build()
}

#[test]
fn test_relink_picks_up_existing_link() {
    let shapes = RecordingShapes::new();
    let mut canvas = relinkable(&shapes);
    let events = EventLog::attach(&canvas);
    let old = edge_handle(&canvas, "out-in");

    assert_eq!(canvas.pointer_down(PointerEvent::primary(300.0, 20.0)), DragMode::Endpoint);
    assert_eq!(
        canvas.drag_session().anchor_endpoint(),
        Some((&NodeId::from("a"), &EndpointId::from("out")))
    );
    assert!(canvas.get_edge(&"out-in".into()).is_some());

    canvas.pointer_move(PointerEvent::primary(300.0, 220.0));
    assert!(canvas.get_edge(&"out-in".into()).is_none());
    assert!(shapes.is_destroyed(old));

    let release = canvas.pointer_up(PointerEvent::primary(300.0, 220.0));

    assert_eq!(release, Release::Linked { edge: "out-in2".into() });
    assert_eq!(canvas.store().edges().len(), 1);
    assert_eq!(events.count(EventName::LinkDisconnect), 1);
    assert_eq!(events.count(EventName::LinkConnect), 1);
}

#[test]
fn test_click_on_linked_target_keeps_link() {
    let shapes = RecordingShapes::new();
    let mut canvas = relinkable(&shapes);
    let events = EventLog::attach(&canvas);
    let handle = edge_handle(&canvas, "out-in");

    canvas.pointer_down(PointerEvent::primary(300.0, 20.0));
    let release = canvas.pointer_up(PointerEvent::primary(300.0, 20.0));

    assert_eq!(release, Release::Nothing);
    assert_eq!(edge_handle(&canvas, "out-in"), handle);
    assert!(!shapes.is_destroyed(handle));
    assert_eq!(events.count(EventName::LinkDisconnect), 0);
}

#[test]
fn test_picked_up_link_dropped_on_canvas_is_disconnected() {
    let shapes = RecordingShapes::new();
    let mut canvas = relinkable(&shapes);
    let events = EventLog::attach(&canvas);

    let release = drag(&mut canvas, (300.0, 20.0), (600.0, 400.0));

    assert_eq!(
        release,
        Release::LinkRejected(GraphError::IncompatibleLink(LinkRejection::NoTarget))
    );
    assert!(canvas.store().edges().is_empty());
    let Some(CanvasEvent::LinkDisconnect { link }) = events.last(EventName::LinkDisconnect) else {
        panic!("missing link:disconnect");
    };
    assert_eq!(link.id, Some(EdgeId::from("out-in")));
    assert_eq!(link.source_node, Some(NodeId::from("a")));
    assert_eq!(link.target_node, Some(NodeId::from("b")));
}

#[test]
fn test_reset_during_pickup_restores_link() {
    let shapes = RecordingShapes::new();
    let mut canvas = relinkable(&shapes);
    let events = EventLog::attach(&canvas);
    let handle = edge_handle(&canvas, "out-in");

    canvas.pointer_down(PointerEvent::primary(300.0, 20.0));
    canvas.reset_drag();
    assert_eq!(edge_handle(&canvas, "out-in"), handle);

    canvas.pointer_down(PointerEvent::primary(300.0, 20.0));
    canvas.pointer_move(PointerEvent::primary(450.0, 120.0));
    let draft = canvas.drag_session().draft().map(|d| d.handle()).expect("draft created");
    canvas.reset_drag();

    assert!(shapes.is_destroyed(draft));
    let edge = canvas.get_edge(&"out-in".into()).expect("link restored");
    assert_eq!(edge.source.node(), &NodeId::from("a"));
    assert_eq!(edge.target.node(), &NodeId::from("b"));
    assert_eq!(canvas.store().edges().len(), 1);
    assert_eq!(events.count(EventName::LinkDisconnect), 0);
    assert_eq!(canvas.pointer_up(PointerEvent::primary(450.0, 120.0)), Release::Ignored);
}

#[test]
fn test_without_relinking_target_starts_new_draft() {
    let shapes = RecordingShapes::new();
    let mut canvas = TestCanvasBuilder::new()
        .recording(&shapes)
        .with_node(NodeSpec::new("a", 0.0, 0.0).with_endpoint(EndpointSpec::source("out")))
        .with_node(NodeSpec::new("b", 300.0, 0.0).with_endpoint(EndpointSpec::target("in")))
        .with_edge(EdgeSpec::between_endpoints("out-in", ("a", "out"), ("b", "in")))
        .build();

    canvas.pointer_down(PointerEvent::primary(300.0, 20.0));

    assert!(canvas.get_edge(&"out-in".into()).is_some());
    assert_eq!(
        canvas.drag_session().anchor_endpoint(),
        Some((&"b".into(), &"in".into()))
    );
}
