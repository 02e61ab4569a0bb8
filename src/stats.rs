use serde::{Deserialize, Serialize};

use crate::model::{Edge, Node, NodeAttrs, NodeKind, NodeStatus};

/// Summary counts derived from the current graph. Embedded informationally in
/// exported documents; never re-validated on import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopologyStats {
    pub producers: usize,
    pub exchanges: usize,
    pub queues: usize,
    pub consumers: usize,
    pub bindings: usize,
    pub total_messages: u64,
    pub active_nodes: usize,
}

/// Single pass over nodes plus the edge count. `total_messages` sums queued
/// messages on queue nodes only; producer/consumer rates do not contribute.
pub fn topology_stats(nodes: &[Node], edges: &[Edge]) -> TopologyStats {
    let mut stats = TopologyStats {
        bindings: edges.len(),
        ..TopologyStats::default()
    };

    for node in nodes {
        match node.kind() {
            NodeKind::Producer => stats.producers += 1,
            NodeKind::Exchange => stats.exchanges += 1,
            NodeKind::Queue => stats.queues += 1,
            NodeKind::Consumer => stats.consumers += 1,
        }
        if node.status() == NodeStatus::Active {
            stats.active_nodes += 1;
        }
        if let NodeAttrs::Queue(q) = &node.attrs {
            stats.total_messages += q.message_count;
        }
    }

    stats
}
