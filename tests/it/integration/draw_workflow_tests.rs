//! Draw Workflow Integration Tests

use crate::helpers::{EventLog, TestCanvasBuilder};
use diagram_canvas::layout::{DrawData, LayoutConfig, LayoutData, LayoutEngine, LayoutOptions};
use diagram_canvas::types::{EdgeKind, EntityId, NodeId, Point};
use parking_lot::Mutex;
use std::sync::Arc;

/// Places nodes on a horizontal line through the layout centre and records
/// what it was given.
#[derive(Clone, Default)]
struct LineLayout {
    seen: Arc<Mutex<Vec<(usize, usize, LayoutOptions)>>>,
}

impl LayoutEngine for LineLayout {
    fn name(&self) -> &str {
        "line"
    }

    fn layout(&mut self, data: &mut LayoutData, options: &LayoutOptions) {
        self.seen
            .lock()
            .push((data.nodes.len(), data.links.len(), *options));
        for (i, node) in data.nodes.iter_mut().filter(|n| n.group.is_none()).enumerate() {
            node.left = i as f32 * options.link_distance;
            node.top = options.center.y;
        }
    }
}

const DIAGRAM: &str = r#"{
    "groups": [{"id": "g", "left": 100, "top": 100, "width": 300, "height": 300}],
    "nodes": [
        {"id": 1, "left": 10, "top": 10, "group": "g"},
        {"id": 2, "left": 500, "top": 0, "endpoints": [{"id": "p", "type": "target"}]},
        {"id": 3, "left": 700, "top": 0, "endpoints": [{"id": "q", "type": "source"}]}
    ],
    "edges": [
        {"source": 1, "target": 2},
        {"id": "q-p", "type": "endpoint", "source": "q", "target": "p"}
    ]
}"#;

#[test]
fn test_draw_from_json_adds_everything_in_order() {
    let mut canvas = TestCanvasBuilder::new().build();
    let data = DrawData::from_json(DIAGRAM).unwrap();

    let summary = canvas.draw(data);

    assert_eq!(summary.groups, vec![EntityId::from("g")]);
    assert_eq!(
        summary.nodes,
        vec![NodeId::from(1), NodeId::from(2), NodeId::from(3)]
    );
    assert_eq!(summary.edges.len(), 2);

    let grouped = canvas.get_node(&1.into()).unwrap();
    assert_eq!(grouped.group(), Some(&"g".into()));
    assert_eq!(canvas.store().node_origin(&1.into()), Some(Point::new(110.0, 110.0)));

    let link = canvas.get_edge(&"q-p".into()).unwrap();
    assert_eq!(link.kind, EdgeKind::Endpoint);
    assert_eq!(link.source.node(), &NodeId::from(3));
    assert_eq!(link.target.node(), &NodeId::from(2));
}

#[test]
fn test_draw_skips_invalid_entries() {
    let mut canvas = TestCanvasBuilder::new().build();
    let data = DrawData::from_json(
        r#"{
            "nodes": [{"id": "a"}, {"id": "a", "left": 50}, {"id": "b"}],
            "edges": [{"id": "ab", "source": "a", "target": "b"}, {"id": "ax", "source": "a", "target": "x"}]
        }"#,
    )
    .unwrap();

    let summary = canvas.draw(data);

    assert_eq!(summary.nodes, vec![NodeId::from("a"), NodeId::from("b")]);
    assert_eq!(summary.edges, vec![EntityId::from("ab")]);
    assert_eq!(canvas.get_node(&"a".into()).unwrap().position(), Point::ZERO);
}

#[test]
fn test_invalid_draw_json_has_context() {
    let err = DrawData::from_json(r#"{"nodes": [{"left": 1}]}"#).unwrap_err();
    assert!(format!("{:#}", err).contains("Invalid draw data"));
}

#[test]
fn test_configured_layout_positions_free_nodes() {
    let engine = LineLayout::default();
    let mut canvas = TestCanvasBuilder::new()
        .configure(|c| {
            c.layout = Some(LayoutConfig {
                kind: "line".to_string(),
                ..LayoutConfig::default()
            })
        })
        .build();
    canvas.set_layout_engine(engine.clone());

    canvas.draw(DrawData::from_json(DIAGRAM).unwrap());

    let seen = engine.seen.lock();
    assert_eq!(seen.len(), 1);
    let (nodes, links, options) = seen[0];
    assert_eq!(nodes, 3);
    assert_eq!(links, 2);
    assert_eq!(options.center, Point::new(400.0, 300.0));
    assert_eq!(options.link_distance, 200.0);

    assert_eq!(canvas.get_node(&2.into()).unwrap().position(), Point::new(0.0, 300.0));
    assert_eq!(canvas.get_node(&3.into()).unwrap().position(), Point::new(200.0, 300.0));
    assert_eq!(canvas.get_node(&1.into()).unwrap().position(), Point::new(10.0, 10.0));
}

#[test]
fn test_layout_without_engine_keeps_positions() {
    let mut canvas = TestCanvasBuilder::new()
        .configure(|c| c.layout = Some(LayoutConfig::default()))
        .build();

    canvas.draw(DrawData::from_json(DIAGRAM).unwrap());

    assert_eq!(canvas.get_node(&2.into()).unwrap().position(), Point::new(500.0, 0.0));
}

#[test]
fn test_draw_without_layout_ignores_engine() {
    let engine = LineLayout::default();
    let mut canvas = TestCanvasBuilder::new().build();
    canvas.set_layout_engine(engine.clone());

    canvas.draw(DrawData::from_json(DIAGRAM).unwrap());

    assert!(engine.seen.lock().is_empty());
    assert_eq!(canvas.get_node(&3.into()).unwrap().position(), Point::new(700.0, 0.0));
}

#[test]
fn test_draw_publishes_no_gesture_events() {
    let mut canvas = TestCanvasBuilder::new().build();
    let events = EventLog::attach(&canvas);

    canvas.draw(DrawData::from_json(DIAGRAM).unwrap());

    assert!(events.events().is_empty());
}
