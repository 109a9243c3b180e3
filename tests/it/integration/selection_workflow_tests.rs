//! Selection Workflow Integration Tests

use crate::helpers::{drag, EventLog, TestCanvasBuilder};
use diagram_canvas::drag::{DragMode, PointerEvent, Release, Reparent};
use diagram_canvas::events::EventName;
use diagram_canvas::selection::SelectionSet;
use diagram_canvas::types::{EntityKind, EntityRef, NodeId, NodeSpec, Point};
use diagram_canvas::Canvas;

fn selectable(builder: TestCanvasBuilder) -> Canvas {
    let mut canvas = builder
        .with_node(NodeSpec::new("n1", 0.0, 0.0))
        .with_node(NodeSpec::new("n2", 200.0, 0.0))
        .with_node(NodeSpec::new("n3", 500.0, 300.0))
        .build();
    canvas.set_select_mode(true, &[EntityKind::Node]);
    canvas
}

#[test]
fn test_pointer_marquee_selects_enclosed_nodes() {
    let mut canvas = selectable(TestCanvasBuilder::new());
    let events = EventLog::attach(&canvas);

    assert_eq!(canvas.pointer_down(PointerEvent::primary(-10.0, -10.0)), DragMode::None);
    assert!(canvas.pointer_move(PointerEvent::primary(250.0, 60.0)));
    let release = canvas.pointer_up(PointerEvent::primary(250.0, 60.0));

    let Release::Selected(selected) = release else {
        panic!("expected a selection, got {:?}", release);
    };
    assert_eq!(selected.nodes, vec![NodeId::from("n1")]);
    assert_eq!(canvas.selection(), &selected);
    assert_eq!(events.count(EventName::MultipleSelect), 1);
    assert_eq!(events.count(EventName::DragStart), 0);
    assert_eq!(events.count(EventName::CanvasClick), 0);
}

#[test]
fn test_press_on_unselected_node_draws_marquee() {
    let mut canvas = selectable(TestCanvasBuilder::new());

    assert_eq!(canvas.pointer_down(PointerEvent::primary(50.0, 20.0)), DragMode::None);
    assert!(canvas.drag_session().is_idle());
    canvas.pointer_move(PointerEvent::primary(60.0, 30.0));
    let release = canvas.pointer_up(PointerEvent::primary(60.0, 30.0));

    assert_eq!(release, Release::Selected(SelectionSet::default()));
    assert_eq!(canvas.get_node(&"n1".into()).unwrap().position(), Point::ZERO);
}

#[test]
fn test_selected_nodes_drag_together_in_select_mode() {
    let mut canvas = selectable(TestCanvasBuilder::new());

    drag(&mut canvas, (-10.0, -10.0), (310.0, 60.0));
    assert_eq!(
        canvas.selection().nodes,
        vec![NodeId::from("n1"), NodeId::from("n2")]
    );

    let release = drag(&mut canvas, (25.0, 25.0), (35.0, 45.0));

    assert_eq!(
        release,
        Release::NodeMoved {
            node: "n1".into(),
            reparent: Reparent::Stay
        }
    );
    assert_eq!(canvas.get_node(&"n1".into()).unwrap().position(), Point::new(10.0, 20.0));
    assert_eq!(canvas.get_node(&"n2".into()).unwrap().position(), Point::new(210.0, 20.0));
    assert_eq!(canvas.get_node(&"n3".into()).unwrap().position(), Point::new(500.0, 300.0));
}

#[test]
fn test_frozen_nodes_fall_back_to_marquee() {
    let mut canvas = selectable(TestCanvasBuilder::new().configure(|c| c.draggable = false));
    canvas.add_to_selection(&EntityRef::node("n1"));

    assert_eq!(canvas.pointer_down(PointerEvent::primary(25.0, 25.0)), DragMode::None);
    let release = canvas.pointer_up(PointerEvent::primary(25.0, 25.0));

    assert!(matches!(release, Release::Selected(_)));
    assert_eq!(canvas.get_node(&"n1".into()).unwrap().position(), Point::ZERO);
}

#[test]
fn test_entering_select_mode_drops_gesture() {
    let mut canvas = TestCanvasBuilder::new()
        .with_node(NodeSpec::new("n1", 0.0, 0.0))
        .build();

    assert_eq!(canvas.pointer_down(PointerEvent::primary(25.0, 25.0)), DragMode::Node);
    canvas.set_select_mode(true, &[EntityKind::Node]);

    assert!(canvas.drag_session().is_idle());
    assert!(!canvas.pointer_move(PointerEvent::primary(45.0, 25.0)));
    assert_eq!(canvas.pointer_up(PointerEvent::primary(45.0, 25.0)), Release::Ignored);
    assert_eq!(canvas.get_node(&"n1".into()).unwrap().position(), Point::ZERO);
}

#[test]
fn test_leaving_select_mode_restores_panning() {
    let mut canvas = selectable(TestCanvasBuilder::new());
    drag(&mut canvas, (-10.0, -10.0), (250.0, 60.0));
    assert!(!canvas.viewport().is_moveable());

    canvas.set_select_mode(false, &[]);

    assert!(canvas.selection().is_empty());
    assert_eq!(drag(&mut canvas, (700.0, 100.0), (720.0, 110.0)), Release::Panned);
    assert_eq!(canvas.get_move_position(), Point::new(20.0, 10.0));
}
