use std::fmt;

/// A typed key identifying one broadcast stream in the broker.
///
/// Topics are typed rather than built by string concatenation so that a
/// user-chosen channel name can never collide with the broker's own
/// namespacing. Two families exist: one post topic per channel, and a single
/// shared topic for channel creation events.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Topic {
    /// Posts added to one specific channel. A subscriber to `Posts("Main")`
    /// receives only posts added to `"Main"`.
    Posts(String),
    /// Channel creations, regardless of name.
    Channels,
}

impl Topic {
    pub fn posts(channel: &str) -> Self {
        Topic::Posts(channel.to_string())
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Topic::Posts(channel) => write!(f, "post:{channel}"),
            Topic::Channels => write!(f, "channel:new"),
        }
    }
}
