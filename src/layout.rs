use crate::model::{Node, NodeKind, Position};

// Auto-layout constants.
pub const X0: f64 = 100.0;
pub const Y0: f64 = 100.0;
pub const NODE_SPACING: f64 = 200.0;
pub const LAYER_SPACING: f64 = 300.0;

/// Left-to-right layered placement: one column per node kind in the fixed
/// producer, exchange, queue, consumer order, members stacked vertically in
/// input order. Kinds with no members take no column. Returns a new vector
/// ordered by column; the input is untouched.
pub fn auto_layout(nodes: &[Node]) -> Vec<Node> {
    let mut placed = Vec::with_capacity(nodes.len());
    let mut x = X0;

    for kind in NodeKind::ORDERED {
        let group: Vec<&Node> = nodes.iter().filter(|n| n.kind() == kind).collect();
        if group.is_empty() {
            continue;
        }
        for (i, node) in group.into_iter().enumerate() {
            let mut node = node.clone();
            node.position = Position::new(x, Y0 + i as f64 * NODE_SPACING);
            placed.push(node);
        }
        x += LAYER_SPACING;
    }

    placed
}
