use crate::model::{Edge, Node, NodeKind};

/// All nodes of the given kind, input order preserved.
pub fn nodes_by_kind(nodes: &[Node], kind: NodeKind) -> Vec<&Node> {
    nodes.iter().filter(|n| n.kind() == kind).collect()
}

/// First node with the given id. Ids are expected to be unique, but
/// uniqueness is not enforced upstream, so first match wins.
pub fn node_by_id<'a>(nodes: &'a [Node], id: &str) -> Option<&'a Node> {
    nodes.iter().find(|n| n.id == id)
}

/// Every edge touching `node_id` as source or target, input order preserved.
/// A self-loop matches once.
pub fn connected_edges<'a>(edges: &'a [Edge], node_id: &str) -> Vec<&'a Edge> {
    edges
        .iter()
        .filter(|e| e.source == node_id || e.target == node_id)
        .collect()
}
