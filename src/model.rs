use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// The closed set of topology participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Producer,
    Exchange,
    Queue,
    Consumer,
}

impl NodeKind {
    /// Fixed left-to-right ordering used by the layout engine.
    pub const ORDERED: [NodeKind; 4] = [
        NodeKind::Producer,
        NodeKind::Exchange,
        NodeKind::Queue,
        NodeKind::Consumer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Producer => "producer",
            NodeKind::Exchange => "exchange",
            NodeKind::Queue => "queue",
            NodeKind::Consumer => "consumer",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "producer" => Ok(NodeKind::Producer),
            "exchange" => Ok(NodeKind::Exchange),
            "queue" => Ok(NodeKind::Queue),
            "consumer" => Ok(NodeKind::Consumer),
            other => Err(Error::InvalidKind(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeStatus {
    Active,
    #[default]
    Idle,
    Error,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExchangeType {
    #[default]
    Direct,
    Fanout,
    Topic,
    Headers,
}

impl FromStr for ExchangeType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s.to_ascii_lowercase().as_str() {
            "direct" => Ok(ExchangeType::Direct),
            "fanout" => Ok(ExchangeType::Fanout),
            "topic" => Ok(ExchangeType::Topic),
            "headers" => Ok(ExchangeType::Headers),
            _ => Err(Error::InvalidExchangeType(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AckMode {
    #[default]
    Auto,
    Manual,
}

/// 2D canvas coordinate. Mutable via layout or manual drag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

pub type Arguments = BTreeMap<String, serde_json::Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProducerAttrs {
    pub label: String,
    pub status: NodeStatus,
    pub connection_name: String,
    pub publish_rate: f64,
}

impl ProducerAttrs {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            status: NodeStatus::Idle,
            connection_name: String::new(),
            publish_rate: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeAttrs {
    pub label: String,
    pub status: NodeStatus,
    pub exchange_type: ExchangeType,
    pub durable: bool,
    pub auto_delete: bool,
    pub arguments: Arguments,
}

impl ExchangeAttrs {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            status: NodeStatus::Idle,
            exchange_type: ExchangeType::Direct,
            durable: true,
            auto_delete: false,
            arguments: Arguments::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueAttrs {
    pub label: String,
    pub status: NodeStatus,
    pub durable: bool,
    pub exclusive: bool,
    pub auto_delete: bool,
    pub message_count: u64,
    pub consumer_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
}

impl QueueAttrs {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            status: NodeStatus::Idle,
            durable: true,
            exclusive: false,
            auto_delete: false,
            message_count: 0,
            consumer_count: 0,
            ttl: None,
            max_length: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumerAttrs {
    pub label: String,
    pub status: NodeStatus,
    pub connection_name: String,
    pub consume_rate: f64,
    pub prefetch_count: u32,
    pub ack_mode: AckMode,
}

impl ConsumerAttrs {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            status: NodeStatus::Idle,
            connection_name: String::new(),
            consume_rate: 0.0,
            prefetch_count: 1,
            ack_mode: AckMode::Auto,
        }
    }
}

/// Kind-specific attributes. The variant is the node's kind, so a node can
/// never carry attributes that disagree with it, and the kind cannot change
/// after construction.
///
/// Serializes as the two sibling keys `kind` and `attributes` of the node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "attributes", rename_all = "lowercase")]
pub enum NodeAttrs {
    Producer(ProducerAttrs),
    Exchange(ExchangeAttrs),
    Queue(QueueAttrs),
    Consumer(ConsumerAttrs),
}

impl NodeAttrs {
    /// Default attributes for `kind`, per-field defaults as the dashboard
    /// creates them.
    pub fn for_kind(kind: NodeKind, label: impl Into<String>) -> Self {
        match kind {
            NodeKind::Producer => NodeAttrs::Producer(ProducerAttrs::new(label)),
            NodeKind::Exchange => NodeAttrs::Exchange(ExchangeAttrs::new(label)),
            NodeKind::Queue => NodeAttrs::Queue(QueueAttrs::new(label)),
            NodeKind::Consumer => NodeAttrs::Consumer(ConsumerAttrs::new(label)),
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            NodeAttrs::Producer(_) => NodeKind::Producer,
            NodeAttrs::Exchange(_) => NodeKind::Exchange,
            NodeAttrs::Queue(_) => NodeKind::Queue,
            NodeAttrs::Consumer(_) => NodeKind::Consumer,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            NodeAttrs::Producer(a) => &a.label,
            NodeAttrs::Exchange(a) => &a.label,
            NodeAttrs::Queue(a) => &a.label,
            NodeAttrs::Consumer(a) => &a.label,
        }
    }

    pub fn status(&self) -> NodeStatus {
        match self {
            NodeAttrs::Producer(a) => a.status,
            NodeAttrs::Exchange(a) => a.status,
            NodeAttrs::Queue(a) => a.status,
            NodeAttrs::Consumer(a) => a.status,
        }
    }

    pub fn set_status(&mut self, status: NodeStatus) {
        match self {
            NodeAttrs::Producer(a) => a.status = status,
            NodeAttrs::Exchange(a) => a.status = status,
            NodeAttrs::Queue(a) => a.status = status,
            NodeAttrs::Consumer(a) => a.status = status,
        }
    }
}

fn default_true() -> bool {
    true
}

/// One topology participant.
///
/// `draggable`/`selectable` are UI affordances only. They are dropped on
/// export and forced back to `true` on import, so they never round-trip
/// through a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub position: Position,
    #[serde(flatten)]
    pub attrs: NodeAttrs,
    #[serde(skip, default = "default_true")]
    pub draggable: bool,
    #[serde(skip, default = "default_true")]
    pub selectable: bool,
}

impl Node {
    /// New node with a fresh id and the kind's default attributes.
    pub fn new(kind: NodeKind, position: Position, label: impl Into<String>) -> Self {
        Self::with_attrs(position, NodeAttrs::for_kind(kind, label))
    }

    /// New node from explicit attributes (the variant fixes the kind).
    pub fn with_attrs(position: Position, attrs: NodeAttrs) -> Self {
        Self {
            id: generate_id(attrs.kind().as_str()),
            position,
            attrs,
            draggable: true,
            selectable: true,
        }
    }

    /// String-boundary constructor. A kind outside the closed set fails with
    /// [`Error::InvalidKind`] naming the offending value.
    pub fn from_kind_str(
        kind: &str,
        position: Position,
        label: impl Into<String>,
    ) -> Result<Self, Error> {
        Ok(Self::new(kind.parse()?, position, label))
    }

    pub fn kind(&self) -> NodeKind {
        self.attrs.kind()
    }

    pub fn label(&self) -> &str {
        self.attrs.label()
    }

    pub fn status(&self) -> NodeStatus {
        self.attrs.status()
    }

    /// Queued message count; `None` for non-queue nodes.
    pub fn message_count(&self) -> Option<u64> {
        match &self.attrs {
            NodeAttrs::Queue(a) => Some(a.message_count),
            _ => None,
        }
    }
}

/// Optional routing metadata carried by a binding.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeAttrs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routing_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_rate: Option<f64>,
}

/// A binding between two nodes.
///
/// `source`/`target` are node ids but are not checked for existence here;
/// dangling references are the caller's problem except for the cascade on
/// node removal (see [`crate::graph::Topology::remove_node`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(rename = "attributes", default)]
    pub attrs: EdgeAttrs,
    #[serde(skip)]
    pub animated: bool,
}

impl Edge {
    /// Every edge is a binding; the kind is fixed.
    pub const KIND: &'static str = "binding";

    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self::with_attrs(source, target, EdgeAttrs::default())
    }

    pub fn with_attrs(
        source: impl Into<String>,
        target: impl Into<String>,
        attrs: EdgeAttrs,
    ) -> Self {
        Self {
            id: generate_id("edge"),
            source: source.into(),
            target: target.into(),
            attrs,
            animated: false,
        }
    }

    pub fn kind(&self) -> &'static str {
        Self::KIND
    }
}

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const SUFFIX_LEN: usize = 9;

/// `<prefix>_<millis>_<random base36>`. Unique with overwhelming probability
/// within one process; not a security token.
pub fn generate_id(prefix: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let mut rng = rand::thread_rng();
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    format!("{prefix}_{millis}_{suffix}")
}
