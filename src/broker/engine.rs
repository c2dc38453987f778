use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::broker::event::Event;
use crate::broker::registry::Registry;
use crate::broker::subscriber::{Inbox, SubscriberId, Subscription};
use crate::broker::topic::Topic;

/// Default bound of each subscriber's delivery queue.
pub const DEFAULT_QUEUE_CAPACITY: usize = 256;

/// The fan-out engine of the pub/sub system.
///
/// The broker owns the topic registry and one bounded inbox per live
/// subscriber. All registry mutation happens under a single lock, so
/// subscribes, unsubscribes, and publishes are linearizable with respect to
/// each other; the lock is never held across an await. Consumers read from
/// their own inbox and touch the broker only when (un)subscribing, so a slow
/// consumer never slows down a publisher or any other subscriber.
///
/// `Broker` is cheap to clone; clones share state.
#[derive(Debug, Clone)]
pub struct Broker {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug)]
struct Inner {
    registry: Registry,
    subscribers: HashMap<SubscriberId, SubscriberEntry>,
    queue_capacity: usize,
}

#[derive(Debug)]
struct SubscriberEntry {
    topic: Topic,
    inbox: Arc<Inbox>,
}

impl Broker {
    /// Creates a broker whose subscriber inboxes hold at most
    /// `queue_capacity` undelivered events each; beyond that, the oldest
    /// buffered event is dropped rather than blocking the publisher.
    pub fn new(queue_capacity: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                registry: Registry::new(),
                subscribers: HashMap::new(),
                queue_capacity,
            })),
        }
    }

    /// Registers a new subscriber under `topic` and returns its event stream.
    ///
    /// Registration completes before this returns, so a publish that happens
    /// right after `subscribe` is delivered even if the stream has not been
    /// polled yet.
    pub fn subscribe(&self, topic: Topic) -> Subscription {
        let id = SubscriberId::new_v4();
        let mut inner = self.inner.lock().unwrap();
        let inbox = Arc::new(Inbox::new(inner.queue_capacity));
        inner.registry.register(topic.clone(), id);
        inner.subscribers.insert(
            id,
            SubscriberEntry {
                topic: topic.clone(),
                inbox: inbox.clone(),
            },
        );
        drop(inner);
        debug!(%topic, subscriber = %id, "subscribed");
        Subscription::new(id, topic, inbox, self.clone())
    }

    /// Delivers `event` to every subscriber registered under `topic` at the
    /// time of the call, in registration order. Never blocks on a consumer
    /// and never surfaces a delivery failure to the publisher.
    pub fn publish(&self, topic: &Topic, event: Event) {
        let inner = self.inner.lock().unwrap();
        let ids = inner.registry.subscribers_of(topic);
        for id in &ids {
            if let Some(entry) = inner.subscribers.get(id) {
                entry.inbox.push(event.clone());
            }
        }
        drop(inner);
        debug!(%topic, delivered = ids.len(), "published");
    }

    /// Cancels a subscription: its stream terminates cleanly and later
    /// publishes no longer reach it. Safe to call more than once; the second
    /// call is a no-op. Also runs implicitly when a `Subscription` is
    /// dropped.
    pub fn unsubscribe(&self, id: SubscriberId) {
        let mut inner = self.inner.lock().unwrap();
        if let Some(entry) = inner.subscribers.remove(&id) {
            inner.registry.unregister(&entry.topic, id);
            entry.inbox.close();
            drop(inner);
            debug!(topic = %entry.topic, subscriber = %id, "unsubscribed");
        }
    }

    /// Number of live subscribers of a topic.
    pub fn subscriber_count(&self, topic: &Topic) -> usize {
        self.inner.lock().unwrap().registry.subscribers_of(topic).len()
    }
}

impl Default for Broker {
    fn default() -> Self {
        Self::new(DEFAULT_QUEUE_CAPACITY)
    }
}
