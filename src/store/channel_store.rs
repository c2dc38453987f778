use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single message in a channel. Immutable once created.
///
/// `created_at` serializes as an ISO-8601 timestamp under the wire name
/// `date`, so it round-trips unambiguously.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub message: String,
    #[serde(rename = "date")]
    pub created_at: DateTime<Utc>,
}

/// A named, append-only list of posts. Names are unique within the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub name: String,
    pub posts: Vec<Post>,
}

#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    #[error("channel '{0}' already exists")]
    ChannelExists(String),
}

/// The domain state: named channels in creation order, each holding its
/// posts in insertion order. Mutated only through `add_post` / `add_channel`;
/// callers serialize access (the service keeps the store behind a mutex).
/// Process-lifetime only, nothing is persisted.
#[derive(Debug, Default)]
pub struct ChannelStore {
    channels: Vec<Channel>,
}

impl ChannelStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The store the process starts with: `Main` and `Cats`, one post each.
    pub fn seeded() -> Self {
        let mut store = Self::new();
        store.add_post("Main", "hello world");
        store.add_post("Cats", "Meow");
        store
    }

    /// Posts of a channel in insertion order. An unknown channel is not an
    /// error; it simply has no posts.
    pub fn posts(&self, channel: &str) -> &[Post] {
        self.find(channel).map(|c| c.posts.as_slice()).unwrap_or(&[])
    }

    /// All channels with their posts, in creation order.
    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    /// Appends a post with the current timestamp to the named channel,
    /// creating the channel implicitly when absent. Returns the new post.
    pub fn add_post(&mut self, channel: &str, message: &str) -> Post {
        let post = Post {
            message: message.to_string(),
            created_at: Utc::now(),
        };
        match self.find_mut(channel) {
            Some(existing) => existing.posts.push(post.clone()),
            None => self.channels.push(Channel {
                name: channel.to_string(),
                posts: vec![post.clone()],
            }),
        }
        post
    }

    /// Creates a new empty channel. Fails with `ChannelExists` when the name
    /// is already taken, leaving the store unchanged.
    pub fn add_channel(&mut self, name: &str) -> Result<Channel, StoreError> {
        if self.find(name).is_some() {
            return Err(StoreError::ChannelExists(name.to_string()));
        }
        let channel = Channel {
            name: name.to_string(),
            posts: Vec::new(),
        };
        self.channels.push(channel.clone());
        Ok(channel)
    }

    fn find(&self, name: &str) -> Option<&Channel> {
        self.channels.iter().find(|c| c.name == name)
    }

    fn find_mut(&mut self, name: &str) -> Option<&mut Channel> {
        self.channels.iter_mut().find(|c| c.name == name)
    }
}
