use serde::Serialize;

use crate::store::Post;

/// Payload delivered to subscribers of a topic.
///
/// Serialized to JSON when relayed over the wire, with an `event` tag so
/// clients can tell the two families apart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    /// A post was added to `channel`. Published to `Topic::Posts(channel)`.
    NewPost { channel: String, post: Post },
    /// A channel named `name` was created. Published to `Topic::Channels`.
    NewChannel { name: String },
}
