use pretty_assertions::assert_eq;

use topo::layout::{NODE_SPACING, auto_layout};
use topo::model::{Edge, Node, NodeAttrs, NodeKind, NodeStatus, Position};
use topo::query::connected_edges;
use topo::stats::{TopologyStats, topology_stats};
use topo::validate::is_valid_connection;

fn node(kind: NodeKind, label: &str) -> Node {
    Node::new(kind, Position::default(), label)
}

// =============================================================================
// Layout
// =============================================================================

#[test]
fn spec_layout_is_deterministic() {
    let nodes = vec![
        node(NodeKind::Queue, "Q"),
        node(NodeKind::Producer, "P"),
        node(NodeKind::Consumer, "C"),
        node(NodeKind::Exchange, "X"),
    ];
    assert_eq!(auto_layout(&nodes), auto_layout(&nodes));
}

#[test]
fn spec_layout_orders_kinds_left_to_right() {
    let nodes = vec![
        node(NodeKind::Consumer, "C"),
        node(NodeKind::Queue, "Q"),
        node(NodeKind::Exchange, "X"),
        node(NodeKind::Producer, "P"),
    ];
    let placed = auto_layout(&nodes);
    let x = |kind: NodeKind| {
        placed
            .iter()
            .find(|n| n.kind() == kind)
            .unwrap()
            .position
            .x
    };
    assert!(x(NodeKind::Producer) < x(NodeKind::Exchange));
    assert!(x(NodeKind::Exchange) < x(NodeKind::Queue));
    assert!(x(NodeKind::Queue) < x(NodeKind::Consumer));
}

#[test]
fn spec_layout_stacks_same_kind_in_one_column() {
    let nodes = vec![
        node(NodeKind::Queue, "first"),
        node(NodeKind::Queue, "second"),
        node(NodeKind::Queue, "third"),
    ];
    let placed = auto_layout(&nodes);
    assert_eq!(placed[0].position.x, placed[1].position.x);
    assert_eq!(placed[1].position.x, placed[2].position.x);
    assert!(placed[0].position.y < placed[1].position.y);
    assert!(placed[1].position.y < placed[2].position.y);
    assert_eq!(placed[1].position.y - placed[0].position.y, NODE_SPACING);
    assert_eq!(placed[2].position.y - placed[1].position.y, NODE_SPACING);
}

#[test]
fn spec_layout_of_empty_input_is_empty() {
    assert_eq!(auto_layout(&[]), Vec::<Node>::new());
}

// =============================================================================
// Connection legality
// =============================================================================

#[test]
fn spec_connection_rule_table() {
    let p = node(NodeKind::Producer, "p");
    let x = node(NodeKind::Exchange, "x");
    let q = node(NodeKind::Queue, "q");
    let c = node(NodeKind::Consumer, "c");

    assert!(is_valid_connection(&p, &x));
    assert!(is_valid_connection(&x, &q));
    assert!(is_valid_connection(&x, &x));
    assert!(is_valid_connection(&q, &c));

    assert!(!is_valid_connection(&p, &q));
    assert!(!is_valid_connection(&p, &c));
    assert!(!is_valid_connection(&x, &c));
    assert!(!is_valid_connection(&c, &p));
    assert!(!is_valid_connection(&c, &x));
    assert!(!is_valid_connection(&c, &q));
    assert!(!is_valid_connection(&c, &c));
}

// =============================================================================
// Queries
// =============================================================================

#[test]
fn spec_connected_edges_on_a_path() {
    let edges = vec![
        Edge::new("node-1", "node-2"),
        Edge::new("node-2", "node-3"),
        Edge::new("node-3", "node-4"),
    ];
    let touching = connected_edges(&edges, "node-2");
    assert_eq!(touching.len(), 2);
    assert_eq!(touching[0].target, "node-2");
    assert_eq!(touching[1].source, "node-2");
}

// =============================================================================
// Statistics
// =============================================================================

#[test]
fn spec_stats_example() {
    let mut producer = node(NodeKind::Producer, "P");
    producer.attrs.set_status(NodeStatus::Active);
    let exchange = node(NodeKind::Exchange, "X");
    let mut queue = node(NodeKind::Queue, "Q");
    queue.attrs.set_status(NodeStatus::Active);
    if let NodeAttrs::Queue(q) = &mut queue.attrs {
        q.message_count = 100;
    }
    let mut consumer = node(NodeKind::Consumer, "C");
    consumer.attrs.set_status(NodeStatus::Active);

    let edges = vec![
        Edge::new(producer.id.clone(), exchange.id.clone()),
        Edge::new(queue.id.clone(), consumer.id.clone()),
    ];
    let nodes = vec![producer, exchange, queue, consumer];

    assert_eq!(
        topology_stats(&nodes, &edges),
        TopologyStats {
            producers: 1,
            exchanges: 1,
            queues: 1,
            consumers: 1,
            bindings: 2,
            total_messages: 100,
            active_nodes: 3,
        }
    );
}

// =============================================================================
// Construction
// =============================================================================

#[test]
fn spec_queue_construction_defaults() {
    let queue = Node::new(NodeKind::Queue, Position::new(0.0, 0.0), "Q");
    match &queue.attrs {
        NodeAttrs::Queue(q) => {
            assert!(q.durable);
            assert!(!q.exclusive);
            assert!(!q.auto_delete);
            assert_eq!(q.message_count, 0);
            assert_eq!(q.consumer_count, 0);
        }
        other => panic!("expected queue attrs, got {other:?}"),
    }
}

#[test]
fn spec_invalid_kind_is_rejected_by_name() {
    let err = Node::from_kind_str("bogus", Position::default(), "N").unwrap_err();
    assert!(err.to_string().contains("bogus"), "got: {err}");
}
