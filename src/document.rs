use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{Edge, Node};
use crate::stats::{TopologyStats, topology_stats};

/// Current schema revision written into exported documents.
pub const SCHEMA_VERSION: &str = "1.0";

/// The one persisted artifact this crate defines: a JSON-compatible snapshot
/// of a topology. Node UI flags and edge kind/animated are not part of the
/// document; they are reattached with fixed values on import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopologyDocument {
    pub version: String,
    /// ISO-8601 capture time.
    pub timestamp: String,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    /// Informational only; recomputed from the graph on export, never
    /// re-validated on import.
    pub stats: TopologyStats,
}

/// Snapshot the graph into a versioned document stamped with the current time.
pub fn export_topology(nodes: &[Node], edges: &[Edge]) -> TopologyDocument {
    TopologyDocument {
        version: SCHEMA_VERSION.to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        nodes: nodes.to_vec(),
        edges: edges.to_vec(),
        stats: topology_stats(nodes, edges),
    }
}

/// Re-hydrate a document into live nodes and edges.
///
/// Documents from another schema major version are rejected. UI flags come
/// back as `true` and edges as non-animated bindings no matter what the
/// document claimed, so stale or foreign documents cannot smuggle those in.
/// Connection legality and id uniqueness are deliberately not checked here;
/// untrusted documents must be re-validated by the caller.
pub fn import_topology(doc: TopologyDocument) -> Result<(Vec<Node>, Vec<Edge>)> {
    check_version(&doc.version)?;
    debug!(
        "importing topology document v{}: {} nodes, {} edges",
        doc.version,
        doc.nodes.len(),
        doc.edges.len()
    );

    let mut nodes = doc.nodes;
    for node in &mut nodes {
        node.draggable = true;
        node.selectable = true;
    }
    let mut edges = doc.edges;
    for edge in &mut edges {
        edge.animated = false;
    }
    Ok((nodes, edges))
}

/// Parse a JSON document and import it.
pub fn import_topology_json(json: &str) -> Result<(Vec<Node>, Vec<Edge>)> {
    import_topology(serde_json::from_str(json)?)
}

// Same major version imports; anything else is rejected.
fn check_version(version: &str) -> Result<()> {
    let major = version.split('.').next().unwrap_or("");
    let supported_major = SCHEMA_VERSION.split('.').next().unwrap_or("");
    if major == supported_major {
        Ok(())
    } else {
        Err(Error::UnsupportedVersion {
            found: version.to_string(),
            supported: SCHEMA_VERSION.to_string(),
        })
    }
}
