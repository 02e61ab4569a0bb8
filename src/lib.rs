pub mod broker;
pub mod document;
pub mod error;
pub mod format;
pub mod graph;
pub mod layout;
pub mod model;
pub mod query;
pub mod renderer;
pub mod stats;
pub mod validate;

pub use error::{Error, Result};
pub use graph::Topology;
pub use model::{Edge, Node, NodeKind, NodeStatus, Position};

/// Parses a topology document (JSON), re-runs the auto-layout, and renders
/// the ASCII view.
pub fn render_document(json: &str) -> Result<String> {
    let (nodes, edges) = document::import_topology_json(json)?;
    let placed = layout::auto_layout(&nodes);
    Ok(renderer::render(&placed, &edges))
}

/// Parses a raw management-API snapshot (JSON), maps it into the entity
/// model, and renders the ASCII view.
pub fn render_snapshot(json: &str) -> Result<String> {
    let snapshot: broker::BrokerSnapshot = serde_json::from_str(json)?;
    let topo = broker::snapshot_to_topology(&snapshot)?;
    Ok(renderer::render(&topo.nodes, &topo.edges))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_document_rejects_malformed_json() {
        let err = render_document("{not json").unwrap_err();
        assert!(matches!(err, Error::Json(_)), "got {err}");
    }

    #[test]
    fn render_document_rejects_foreign_version() {
        let json = r#"{"version":"9.0","timestamp":"2026-08-23T00:00:00Z",
            "nodes":[],"edges":[],
            "stats":{"producers":0,"exchanges":0,"queues":0,"consumers":0,
                     "bindings":0,"totalMessages":0,"activeNodes":0}}"#;
        let err = render_document(json).unwrap_err();
        assert!(err.to_string().contains("9.0"), "got {err}");
    }

    #[test]
    fn render_snapshot_works_end_to_end() {
        let json = r#"{
            "exchanges": [{"name": "orders", "type": "direct"}],
            "queues": [{"name": "orders.created", "state": "running"}],
            "bindings": [{"source": "orders", "destination": "orders.created",
                          "destination_type": "queue", "routing_key": "created"}],
            "connections": []
        }"#;
        let output = render_snapshot(json).unwrap();
        assert!(output.contains("│ orders │"));
        assert!(output.contains("orders ──> orders.created  [created]"));
    }
}
