//! Snapshot tests using the insta crate.
//!
//! Event payloads are what hosts deserialize, so their wire shape is pinned
//! here with inline snapshots. Coordinates are redacted where the exact float
//! formatting is not the point of the test.
//!
//! To update snapshots after intentional changes:
//! ```sh
//! cargo insta test --accept
//! ```

use crate::helpers::{drag, EventLog, TestCanvasBuilder};
use diagram_canvas::drag::{PointerEvent, Reparent};
use diagram_canvas::events::EventName;
use diagram_canvas::types::{EndpointSpec, EntityKind, GroupSpec, NodeSpec, Rect};
use diagram_canvas::Canvas;

fn linkable_pair() -> Canvas {
    // out centred at (100,20), in centred at (300,20)
    TestCanvasBuilder::new()
        .with_node(NodeSpec::new("a", 0.0, 0.0).with_endpoint(EndpointSpec::source("out")))
        .with_node(NodeSpec::new("b", 300.0, 0.0).with_endpoint(EndpointSpec::target("in")))
        .build()
}

// ============================================================================
// Event Payloads
// ============================================================================

#[test]
fn snapshot_link_connect_event() {
    let mut canvas = linkable_pair();
    let events = EventLog::attach(&canvas);

    drag(&mut canvas, (100.0, 20.0), (300.0, 20.0));

    let event = events.last(EventName::LinkConnect).expect("link:connect published");
    insta::assert_json_snapshot!(event, @r###"
    {
      "type": "link:connect",
      "payload": {
        "link": {
          "id": "out-in",
          "type": "endpoint",
          "source": "out",
          "target": "in",
          "sourceNode": "a",
          "targetNode": "b",
          "label": null,
          "shapeType": "Bezier",
          "arrow": false
        }
      }
    }
    "###);
}

#[test]
fn snapshot_drag_end_payload_for_link() {
    let mut canvas = linkable_pair();
    let events = EventLog::attach(&canvas);

    canvas.pointer_down(PointerEvent::primary(100.0, 20.0));
    canvas.pointer_move(PointerEvent::primary(200.0, 200.0));
    canvas.pointer_up(PointerEvent::primary(200.0, 200.0));

    let event = events.last(EventName::DragEnd).expect("drag:end published");
    insta::assert_json_snapshot!(event, {
        ".payload.pointerPos" => "[point]",
        ".payload.dragEdge.freeEnd" => "[point]",
    }, @r###"
    {
      "type": "drag:end",
      "payload": {
        "dragType": "endpoint",
        "pointerPos": "[point]",
        "dragNode": "a",
        "dragEndpoint": "out",
        "dragEdge": {
          "sourceNode": "a",
          "sourceEndpoint": "out",
          "freeEnd": "[point]"
        }
      }
    }
    "###);
}

#[test]
fn snapshot_canvas_drag_omits_entity_fields() {
    let mut canvas = linkable_pair();
    let events = EventLog::attach(&canvas);

    canvas.pointer_down(PointerEvent::primary(600.0, 400.0));

    let event = events.last(EventName::DragStart).expect("drag:start published");
    insta::assert_json_snapshot!(event, {
        ".payload.pointerPos" => "[point]",
    }, @r###"
    {
      "type": "drag:start",
      "payload": {
        "dragType": "canvas",
        "pointerPos": "[point]"
      }
    }
    "###);
}

#[test]
fn snapshot_multiple_select_event() {
    let mut canvas = TestCanvasBuilder::new()
        .with_node(NodeSpec::new("n1", 0.0, 0.0).with_size(50.0, 50.0))
        .with_node(NodeSpec::new("n2", 200.0, 0.0))
        .build();
    canvas.set_select_mode(true, &[EntityKind::Node]);
    let events = EventLog::attach(&canvas);

    canvas.complete_marquee(Rect::new(-10.0, -10.0, 260.0, 70.0));

    let event = events.last(EventName::MultipleSelect).expect("multiple:select published");
    insta::assert_json_snapshot!(event, @r###"
    {
      "type": "multiple:select",
      "payload": {
        "data": {
          "nodes": [
            "n1"
          ],
          "edges": [],
          "groups": [],
          "endpoints": []
        }
      }
    }
    "###);
}

#[test]
fn snapshot_group_delete_event() {
    let mut canvas = TestCanvasBuilder::new()
        .with_group(GroupSpec::new("g", 100.0, 50.0, 300.0, 300.0))
        .build();
    let events = EventLog::attach(&canvas);

    canvas.remove_group(&"g".into()).unwrap();

    let event = events.last(EventName::NodeDelete).expect("node:delete published");
    insta::assert_json_snapshot!(event, @r###"
    {
      "type": "node:delete",
      "payload": {
        "kind": "group",
        "id": "g"
      }
    }
    "###);
}

// ============================================================================
// Release Outcomes
// ============================================================================

#[test]
fn snapshot_reparent_transfer() {
    let plan = Reparent::Transfer {
        from: "g1".into(),
        into: "g2".into(),
    };
    insta::assert_json_snapshot!(plan, @r###"
    {
      "action": "transfer",
      "from": "g1",
      "into": "g2"
    }
    "###);
}
