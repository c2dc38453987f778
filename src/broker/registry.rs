use std::collections::HashMap;

use crate::broker::subscriber::SubscriberId;
use crate::broker::topic::Topic;

/// Pure bookkeeping: which subscribers are registered under which topic.
///
/// Registration order is preserved so fan-out order is deterministic. The
/// registry holds ids only; delivery queues live with the broker engine.
#[derive(Debug, Default)]
pub struct Registry {
    topics: HashMap<Topic, Vec<SubscriberId>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a subscriber under a topic, creating the topic entry on first use.
    /// Registering the same id twice is allowed and yields duplicate
    /// deliveries; callers are expected to avoid it.
    pub fn register(&mut self, topic: Topic, id: SubscriberId) {
        self.topics.entry(topic).or_default().push(id);
    }

    /// Removes a subscriber from a topic. Idempotent: unregistering an id
    /// that is not present is a no-op, since a disconnect can race an
    /// explicit cancel. Drops the topic entry once no subscribers remain.
    pub fn unregister(&mut self, topic: &Topic, id: SubscriberId) {
        if let Some(subscribers) = self.topics.get_mut(topic) {
            subscribers.retain(|s| *s != id);
            if subscribers.is_empty() {
                self.topics.remove(topic);
            }
        }
    }

    /// Ordered snapshot of the subscribers of a topic.
    pub fn subscribers_of(&self, topic: &Topic) -> Vec<SubscriberId> {
        self.topics.get(topic).cloned().unwrap_or_default()
    }

    pub fn is_empty(&self, topic: &Topic) -> bool {
        self.topics.get(topic).is_none_or(|s| s.is_empty())
    }
}
