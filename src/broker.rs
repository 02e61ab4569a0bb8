//! Raw shapes returned by the broker's management API and their mapping into
//! the entity model. Field names here are broker-native (`auto_delete`,
//! `routing_key`); everything downstream uses the entity model only.

use std::collections::HashMap;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::graph::Topology;
use crate::model::{
    Arguments, Edge, EdgeAttrs, ExchangeAttrs, Node, NodeAttrs, NodeStatus, Position,
    ProducerAttrs, QueueAttrs,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawExchange {
    pub name: String,
    #[serde(rename = "type")]
    pub exchange_type: String,
    #[serde(default)]
    pub durable: bool,
    #[serde(default)]
    pub auto_delete: bool,
    #[serde(default)]
    pub arguments: Arguments,
    #[serde(default)]
    pub vhost: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawQueue {
    pub name: String,
    #[serde(default)]
    pub durable: bool,
    #[serde(default)]
    pub exclusive: bool,
    #[serde(default)]
    pub auto_delete: bool,
    #[serde(default = "default_queue_state")]
    pub state: String,
    #[serde(default)]
    pub consumers: u64,
    #[serde(default)]
    pub messages: u64,
    #[serde(default)]
    pub messages_ready: u64,
    #[serde(default)]
    pub messages_unacknowledged: u64,
    #[serde(default)]
    pub vhost: Option<String>,
}

fn default_queue_state() -> String {
    "idle".to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DestinationType {
    Exchange,
    Queue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawBinding {
    pub source: String,
    pub destination: String,
    pub destination_type: DestinationType,
    #[serde(default)]
    pub routing_key: String,
    #[serde(default)]
    pub vhost: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawConnection {
    pub name: String,
    #[serde(default = "default_connection_state")]
    pub state: String,
    #[serde(default)]
    pub channels: u64,
    #[serde(default)]
    pub user: Option<String>,
}

fn default_connection_state() -> String {
    "running".to_string()
}

/// One poll of the management API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrokerSnapshot {
    #[serde(default)]
    pub exchanges: Vec<RawExchange>,
    #[serde(default)]
    pub queues: Vec<RawQueue>,
    #[serde(default)]
    pub bindings: Vec<RawBinding>,
    #[serde(default)]
    pub connections: Vec<RawConnection>,
}

/// Queue state as reported by the broker, normalized to a node status.
/// Unknown states fall back to idle.
pub fn queue_status(state: &str) -> NodeStatus {
    match state.to_ascii_lowercase().as_str() {
        "running" => NodeStatus::Active,
        "idle" | "flow" => NodeStatus::Idle,
        "down" => NodeStatus::Error,
        other => {
            warn!("unknown queue state {other:?}, treating as idle");
            NodeStatus::Idle
        }
    }
}

/// Connection state normalized to a node status.
pub fn connection_status(state: &str) -> NodeStatus {
    match state.to_ascii_lowercase().as_str() {
        "running" => NodeStatus::Active,
        "blocked" => NodeStatus::Error,
        "flow" | "closing" | "closed" => NodeStatus::Idle,
        other => {
            warn!("unknown connection state {other:?}, treating as idle");
            NodeStatus::Idle
        }
    }
}

/// Builds a laid-out topology from a broker snapshot: connections become
/// producers, exchanges and queues become their nodes, bindings become edges
/// wired by name. Fails on an exchange type outside the broker's closed set.
pub fn snapshot_to_topology(snapshot: &BrokerSnapshot) -> Result<Topology> {
    let mut topo = Topology::new();

    for conn in &snapshot.connections {
        topo.add_node(Node::with_attrs(
            Position::default(),
            NodeAttrs::Producer(ProducerAttrs {
                label: conn.name.clone(),
                status: connection_status(&conn.state),
                connection_name: conn.name.clone(),
                publish_rate: 0.0,
            }),
        ));
    }

    let mut exchange_ids: HashMap<&str, String> = HashMap::new();
    for exchange in &snapshot.exchanges {
        let id = topo.add_node(Node::with_attrs(
            Position::default(),
            NodeAttrs::Exchange(ExchangeAttrs {
                label: exchange.name.clone(),
                status: NodeStatus::Idle,
                exchange_type: exchange.exchange_type.parse()?,
                durable: exchange.durable,
                auto_delete: exchange.auto_delete,
                arguments: exchange.arguments.clone(),
            }),
        ));
        exchange_ids.insert(exchange.name.as_str(), id);
    }

    let mut queue_ids: HashMap<&str, String> = HashMap::new();
    for queue in &snapshot.queues {
        let id = topo.add_node(Node::with_attrs(
            Position::default(),
            NodeAttrs::Queue(QueueAttrs {
                label: queue.name.clone(),
                status: queue_status(&queue.state),
                durable: queue.durable,
                exclusive: queue.exclusive,
                auto_delete: queue.auto_delete,
                message_count: queue.messages,
                consumer_count: queue.consumers,
                ttl: None,
                max_length: None,
            }),
        ));
        queue_ids.insert(queue.name.as_str(), id);
    }

    for binding in &snapshot.bindings {
        if binding.source.is_empty() {
            // default-exchange binding, not drawn
            debug!("skipping default-exchange binding to {}", binding.destination);
            continue;
        }
        let Some(source_id) = exchange_ids.get(binding.source.as_str()) else {
            warn!("binding references unknown exchange {:?}", binding.source);
            continue;
        };
        let target_id = match binding.destination_type {
            DestinationType::Exchange => exchange_ids.get(binding.destination.as_str()),
            DestinationType::Queue => queue_ids.get(binding.destination.as_str()),
        };
        let Some(target_id) = target_id else {
            warn!(
                "binding references unknown {:?} destination {:?}",
                binding.destination_type, binding.destination
            );
            continue;
        };
        topo.add_edge(Edge::with_attrs(
            source_id.clone(),
            target_id.clone(),
            EdgeAttrs {
                routing_key: if binding.routing_key.is_empty() {
                    None
                } else {
                    Some(binding.routing_key.clone())
                },
                ..EdgeAttrs::default()
            },
        ));
    }

    topo.auto_layout();
    Ok(topo)
}
