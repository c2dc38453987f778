use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use tokio::sync::Notify;
use uuid::Uuid;

use crate::broker::Broker;
use crate::broker::event::Event;
use crate::broker::topic::Topic;

pub type SubscriberId = Uuid;

/// Per-subscriber delivery queue with a bounded buffer.
///
/// The publisher pushes without ever waiting on the consumer: when the buffer
/// is full the oldest buffered event is dropped to make room. The consumer
/// side suspends on `recv` until an event arrives or the inbox is closed.
#[derive(Debug)]
pub(crate) struct Inbox {
    state: Mutex<InboxState>,
    notify: Notify,
    capacity: usize,
}

#[derive(Debug)]
struct InboxState {
    queue: VecDeque<Event>,
    closed: bool,
}

impl Inbox {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            state: Mutex::new(InboxState {
                queue: VecDeque::new(),
                closed: false,
            }),
            notify: Notify::new(),
            capacity: capacity.max(1),
        }
    }

    /// Enqueues an event, dropping the oldest buffered one when full.
    /// Pushing to a closed inbox is a silent no-op.
    pub(crate) fn push(&self, event: Event) {
        let mut state = self.state.lock().unwrap();
        if state.closed {
            return;
        }
        if state.queue.len() == self.capacity {
            state.queue.pop_front();
            tracing::debug!(capacity = self.capacity, "inbox full, dropped oldest event");
        }
        state.queue.push_back(event);
        drop(state);
        self.notify.notify_one();
    }

    /// Closes the inbox: undelivered events are discarded and `recv` returns
    /// `None` from here on. Closing twice is harmless.
    pub(crate) fn close(&self) {
        let mut state = self.state.lock().unwrap();
        state.closed = true;
        state.queue.clear();
        drop(state);
        self.notify.notify_one();
    }

    pub(crate) async fn recv(&self) -> Option<Event> {
        loop {
            {
                let mut state = self.state.lock().unwrap();
                if let Some(event) = state.queue.pop_front() {
                    return Some(event);
                }
                if state.closed {
                    return None;
                }
            }
            // notify_one stores a permit when no one is waiting, so a push
            // between the check above and this await is not lost.
            self.notify.notified().await;
        }
    }

    pub(crate) fn try_recv(&self) -> Option<Event> {
        self.state.lock().unwrap().queue.pop_front()
    }
}

/// One live subscription: a lazy stream of the events published to its topic
/// from the moment of registration onward.
///
/// The stream ends (yields `None`) when the subscription is unsubscribed.
/// Dropping a `Subscription` unsubscribes it, so an abandoned consumer never
/// leaves a dead registration behind in the broker.
#[derive(Debug)]
pub struct Subscription {
    id: SubscriberId,
    topic: Topic,
    inbox: Arc<Inbox>,
    broker: Broker,
}

impl Subscription {
    pub(crate) fn new(id: SubscriberId, topic: Topic, inbox: Arc<Inbox>, broker: Broker) -> Self {
        Self {
            id,
            topic,
            inbox,
            broker,
        }
    }

    pub fn id(&self) -> SubscriberId {
        self.id
    }

    pub fn topic(&self) -> &Topic {
        &self.topic
    }

    /// Waits for the next event. Returns `None` once the subscription has
    /// been cancelled. Holds no lock while suspended.
    pub async fn recv(&mut self) -> Option<Event> {
        self.inbox.recv().await
    }

    /// Returns a buffered event without waiting, or `None` if none is queued.
    pub fn try_recv(&mut self) -> Option<Event> {
        self.inbox.try_recv()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.broker.unsubscribe(self.id);
    }
}
