//! Unit tests for selection mode and marquee selection.

use crate::helpers::{EventLog, TestCanvasBuilder};
use diagram_canvas::events::{CanvasEvent, EventName};
use diagram_canvas::selection::EndpointRef;
use diagram_canvas::types::{EdgeId, EdgeSpec, EndpointSpec, EntityKind, EntityRef, NodeId, NodeSpec, Rect};
use diagram_canvas::Canvas;

fn two_nodes() -> Canvas {
    TestCanvasBuilder::new()
        .with_node(NodeSpec::new("n1", 0.0, 0.0).with_size(50.0, 50.0))
        .with_node(NodeSpec::new("n2", 200.0, 0.0))
        .build()
}

#[test]
fn test_marquee_selects_only_strictly_enclosed_nodes() {
    let mut canvas = two_nodes();
    canvas.set_select_mode(true, &[EntityKind::Node]);
    let events = EventLog::attach(&canvas);

    let selected = canvas.complete_marquee(Rect::new(-10.0, -10.0, 260.0, 70.0));

    assert_eq!(selected.nodes, vec![NodeId::from("n1")]);
    assert_eq!(canvas.selection(), &selected);
    assert_eq!(
        events.last(EventName::MultipleSelect),
        Some(CanvasEvent::MultipleSelect { data: selected })
    );
}

#[test]
fn test_flush_border_is_not_selected() {
    let mut canvas = two_nodes();
    canvas.set_select_mode(true, &[EntityKind::Node]);

    let selected = canvas.complete_marquee(Rect::new(0.0, 0.0, 100.0, 100.0));
    assert!(selected.is_empty());
}

#[test]
fn test_marquee_outside_selection_mode_is_ignored() {
    let mut canvas = two_nodes();
    let events = EventLog::attach(&canvas);

    let selected = canvas.complete_marquee(Rect::new(-10.0, -10.0, 500.0, 500.0));

    assert!(selected.is_empty());
    assert!(canvas.selection().is_empty());
    assert_eq!(events.count(EventName::MultipleSelect), 0);
}

#[test]
fn test_marquee_follows_zoom() {
    let mut canvas = two_nodes();
    canvas.set_zoom(2.0);
    canvas.set_select_mode(true, &[EntityKind::Node]);

    // n1 spans pointer-space (-400,-300)..(-300,-200) at 2x around (400,300)
    let selected = canvas.complete_marquee(Rect::new(-410.0, -310.0, 120.0, 120.0));
    assert_eq!(selected.nodes, vec![NodeId::from("n1")]);
}

#[test]
fn test_endpoint_and_edge_categories() {
    let mut canvas = TestCanvasBuilder::new()
        .with_node(
            NodeSpec::new("a", 0.0, 0.0).with_endpoint(EndpointSpec::source("out").at(40.0, 40.0)),
        )
        .with_node(
            NodeSpec::new("b", 100.0, 0.0).with_endpoint(EndpointSpec::target("in").at(0.0, 40.0)),
        )
        .with_node(NodeSpec::new("c", 600.0, 0.0))
        .with_edge(EdgeSpec::between_endpoints("out-in", ("a", "out"), ("b", "in")))
        .with_edge(EdgeSpec::between_nodes("ac", "a", "c"))
        .build();
    canvas.set_select_mode(true, &[EntityKind::Endpoint, EntityKind::Edge]);

    // endpoint boxes (40,40,10,10) and (100,40,10,10)
    let selected = canvas.complete_marquee(Rect::new(30.0, 30.0, 100.0, 30.0));

    assert!(selected.nodes.is_empty());
    assert_eq!(
        selected.endpoints,
        vec![
            EndpointRef {
                node: "a".into(),
                endpoint: "out".into()
            },
            EndpointRef {
                node: "b".into(),
                endpoint: "in".into()
            },
        ]
    );
    assert_eq!(selected.edges, vec![EdgeId::from("out-in")]);
}

#[test]
fn test_select_mode_locks_and_restores_view() {
    let mut canvas = two_nodes();
    canvas.set_moveable(false);

    canvas.set_select_mode(true, &[EntityKind::Node]);
    assert!(canvas.is_select_mode());
    assert!(!canvas.wheel(100.0));
    assert_eq!(canvas.get_zoom(), 1.0);

    canvas.complete_marquee(Rect::new(-10.0, -10.0, 100.0, 100.0));
    assert!(!canvas.selection().is_empty());

    canvas.set_select_mode(false, &[]);
    assert!(!canvas.is_select_mode());
    assert!(canvas.selection().is_empty());
    assert!(canvas.viewport().is_zoomable());
    assert!(!canvas.viewport().is_moveable());
}

#[test]
fn test_manual_selection_and_removal_pruning() {
    let mut canvas = two_nodes();

    assert!(canvas.add_to_selection(&EntityRef::node("n1")));
    assert!(canvas.add_to_selection(&EntityRef::node("n2")));
    assert!(!canvas.add_to_selection(&EntityRef::node("n2")));
    assert!(!canvas.add_to_selection(&EntityRef::node("ghost")));

    canvas.remove_node(&"n1".into(), false).unwrap();
    assert_eq!(canvas.selection().nodes, vec![NodeId::from("n2")]);

    canvas.clear_selection();
    assert!(canvas.selection().is_empty());
}
