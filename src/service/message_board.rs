use std::sync::{Arc, Mutex};

use tracing::info;

use crate::broker::{Broker, Event, SubscriberId, Subscription, Topic};
use crate::store::{Channel, ChannelStore, Post, StoreError};

/// The operations of the system, one seam for the API layer to call.
///
/// Owns the store behind a mutex and shares the broker. A mutation and its
/// publish happen inside one critical section, so the sequence of events a
/// subscriber sees always matches the order `posts()` reports — concurrent
/// writers cannot interleave between the append and the fan-out.
///
/// Cheap to clone; clones share state.
#[derive(Debug, Clone)]
pub struct MessageBoard {
    store: Arc<Mutex<ChannelStore>>,
    broker: Broker,
}

impl MessageBoard {
    pub fn new(store: ChannelStore, broker: Broker) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            broker,
        }
    }

    /// All channels with their posts, in creation order.
    pub fn channels(&self) -> Vec<Channel> {
        self.store.lock().unwrap().channels().to_vec()
    }

    /// Posts of one channel in insertion order; empty when the channel is
    /// unknown.
    pub fn posts(&self, channel: &str) -> Vec<Post> {
        self.store.lock().unwrap().posts(channel).to_vec()
    }

    /// Appends a post (creating the channel if needed) and notifies the
    /// subscribers of that channel's post topic.
    pub fn add_post(&self, channel: &str, message: &str) -> Post {
        let mut store = self.store.lock().unwrap();
        let post = store.add_post(channel, message);
        self.broker.publish(
            &Topic::posts(channel),
            Event::NewPost {
                channel: channel.to_string(),
                post: post.clone(),
            },
        );
        info!(channel, "post added");
        post
    }

    /// Creates an empty channel and notifies the channel-creation topic.
    /// A duplicate name is a conflict; nothing is published and the store is
    /// unchanged.
    pub fn add_channel(&self, name: &str) -> Result<Channel, StoreError> {
        let mut store = self.store.lock().unwrap();
        let channel = store.add_channel(name)?;
        self.broker.publish(
            &Topic::Channels,
            Event::NewChannel {
                name: name.to_string(),
            },
        );
        info!(channel = name, "channel added");
        Ok(channel)
    }

    /// Live feed of posts added to one channel, from now on.
    pub fn new_posts(&self, channel: &str) -> Subscription {
        self.broker.subscribe(Topic::posts(channel))
    }

    /// Live feed of channel creations, regardless of name.
    pub fn new_channels(&self) -> Subscription {
        self.broker.subscribe(Topic::Channels)
    }

    /// Cancels a subscription by id. Idempotent.
    pub fn unsubscribe(&self, id: SubscriberId) {
        self.broker.unsubscribe(id);
    }
}
