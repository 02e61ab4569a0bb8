use crate::model::{ExchangeType, Node, NodeKind};

/// Whether a directed connection from `source` to `target` is legal.
///
/// Pure function of the two kinds: producers feed exchanges, exchanges feed
/// exchanges or queues, queues feed consumers, consumers never originate.
/// Advisory only; callers check before committing an edge, nothing purges
/// edges after the fact.
pub fn is_valid_connection(source: &Node, target: &Node) -> bool {
    match (source.kind(), target.kind()) {
        (NodeKind::Producer, target) => target == NodeKind::Exchange,
        (NodeKind::Exchange, target) => {
            matches!(target, NodeKind::Exchange | NodeKind::Queue)
        }
        (NodeKind::Queue, target) => target == NodeKind::Consumer,
        (NodeKind::Consumer, _) => false,
    }
}

/// Whether `key` is a usable routing key for the given exchange type.
///
/// Fanout and headers exchanges ignore routing keys. Direct exchanges need a
/// non-empty exact key. Topic keys are dot-separated segments, each either a
/// wildcard (`*`, `#`) or a word of `[A-Za-z0-9_-]`.
pub fn is_valid_routing_key(key: &str, exchange_type: ExchangeType) -> bool {
    match exchange_type {
        ExchangeType::Fanout | ExchangeType::Headers => true,
        ExchangeType::Direct => !key.is_empty(),
        ExchangeType::Topic => key.split('.').all(|part| {
            part == "*"
                || part == "#"
                || (!part.is_empty()
                    && part
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-'))
        }),
    }
}
