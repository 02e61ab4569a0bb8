use serde::{Deserialize, Serialize};

use crate::document::{TopologyDocument, export_topology, import_topology};
use crate::error::Result;
use crate::layout::auto_layout;
use crate::model::{Edge, Node, NodeStatus, Position};
use crate::stats::{TopologyStats, topology_stats};

/// The owning node/edge collection. Whoever holds a `Topology` owns the whole
/// graph state; nothing in this crate retains a reference across calls.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Topology {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Topology {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node and returns its id.
    pub fn add_node(&mut self, node: Node) -> String {
        let id = node.id.clone();
        self.nodes.push(node);
        id
    }

    /// Adds an edge and returns its id. Connection legality is advisory and
    /// is not enforced here; check [`crate::validate::is_valid_connection`]
    /// before committing.
    pub fn add_edge(&mut self, edge: Edge) -> String {
        let id = edge.id.clone();
        self.edges.push(edge);
        id
    }

    /// Removes a node and every edge touching it, returning the node.
    /// The cascade keeps the graph free of dangling edge endpoints.
    pub fn remove_node(&mut self, node_id: &str) -> Option<Node> {
        let pos = self.nodes.iter().position(|n| n.id == node_id)?;
        let node = self.nodes.remove(pos);
        self.edges
            .retain(|e| e.source != node_id && e.target != node_id);
        Some(node)
    }

    pub fn remove_edge(&mut self, edge_id: &str) -> Option<Edge> {
        let pos = self.edges.iter().position(|e| e.id == edge_id)?;
        Some(self.edges.remove(pos))
    }

    /// Moves a node; `false` when the id is unknown.
    pub fn update_position(&mut self, node_id: &str, position: Position) -> bool {
        match self.nodes.iter_mut().find(|n| n.id == node_id) {
            Some(node) => {
                node.position = position;
                true
            }
            None => false,
        }
    }

    /// Updates a node's status; `false` when the id is unknown.
    pub fn set_status(&mut self, node_id: &str, status: NodeStatus) -> bool {
        match self.nodes.iter_mut().find(|n| n.id == node_id) {
            Some(node) => {
                node.attrs.set_status(status);
                true
            }
            None => false,
        }
    }

    /// Repositions every node with the layered auto-layout.
    pub fn auto_layout(&mut self) {
        self.nodes = auto_layout(&self.nodes);
    }

    pub fn stats(&self) -> TopologyStats {
        topology_stats(&self.nodes, &self.edges)
    }

    pub fn export(&self) -> TopologyDocument {
        export_topology(&self.nodes, &self.edges)
    }

    pub fn import(doc: TopologyDocument) -> Result<Self> {
        let (nodes, edges) = import_topology(doc)?;
        Ok(Self { nodes, edges })
    }
}
