use pretty_assertions::assert_eq;

use topo::model::{Edge, EdgeAttrs, Node, NodeKind, Position};
use topo::renderer::render;

fn edge(source: &Node, target: &Node, routing_key: Option<&str>) -> Edge {
    Edge::with_attrs(
        source.id.clone(),
        target.id.clone(),
        EdgeAttrs {
            routing_key: routing_key.map(str::to_string),
            ..EdgeAttrs::default()
        },
    )
}

#[test]
fn snapshot_full_pipeline_topology() {
    let producer = Node::new(NodeKind::Producer, Position::default(), "shop");
    let exchange = Node::new(NodeKind::Exchange, Position::default(), "orders");
    let queue = Node::new(NodeKind::Queue, Position::default(), "orders.created");
    let consumer = Node::new(NodeKind::Consumer, Position::default(), "billing");

    let edges = vec![
        edge(&producer, &exchange, Some("orders.#")),
        edge(&exchange, &queue, Some("orders.*")),
        edge(&queue, &consumer, None),
    ];
    let nodes = vec![producer, exchange, queue, consumer];

    let output = render(&nodes, &edges);
    let expected = "\
producers   exchanges    queues               consumers

┌──────┐    ┌────────┐   ┌────────────────┐   ┌─────────┐
│ shop │    │ orders │   │ orders.created │   │ billing │
└──────┘    └────────┘   └────────────────┘   └─────────┘

bindings:
  shop ──> orders  [orders.#]
  orders ──> orders.created  [orders.*]
  orders.created ──> billing";
    assert_eq!(output, expected);
}

#[test]
fn snapshot_two_queues_stack_vertically() {
    let q1 = Node::new(NodeKind::Queue, Position::default(), "one");
    let q2 = Node::new(NodeKind::Queue, Position::default(), "two");
    let output = render(&[q1, q2], &[]);
    let expected = "\
queues

┌─────┐
│ one │
└─────┘

┌─────┐
│ two │
└─────┘";
    assert_eq!(output, expected);
}

#[test]
fn snapshot_broker_snapshot_end_to_end() {
    let json = r#"{
        "exchanges": [{"name": "orders", "type": "topic"}],
        "queues": [{"name": "orders.created", "state": "running", "messages": 5}],
        "bindings": [{"source": "orders", "destination": "orders.created",
                      "destination_type": "queue", "routing_key": "orders.*"}],
        "connections": [{"name": "shop", "state": "running"}]
    }"#;
    let output = topo::render_snapshot(json).unwrap();
    assert!(output.contains("│ shop │"));
    assert!(output.contains("│ orders │"));
    assert!(output.contains("│ orders.created │"));
    assert!(output.contains("shop ──> orders") || output.contains("orders ──> orders.created"));
    assert!(output.contains("[orders.*]"));
}
