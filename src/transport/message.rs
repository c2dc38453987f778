use serde::{Deserialize, Serialize};

use crate::broker::Event;
use crate::store::{Channel, Post};

/// Requests a client may send, tagged by `type`.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientRequest {
    Channels,
    Posts { channel: String },
    AddPost { channel: String, message: String },
    AddChannel { name: String },
    SubscribePosts { channel: String },
    SubscribeChannels,
    UnsubscribePosts { channel: String },
    UnsubscribeChannels,
}

/// Replies and pushed events, tagged by `type`.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerReply {
    Channels { channels: Vec<Channel> },
    Posts { posts: Vec<Post> },
    PostAdded { post: Post },
    ChannelAdded { channel: Channel },
    Subscribed { topic: String },
    Unsubscribed { topic: String },
    Event(Event),
    Error { message: String },
}
