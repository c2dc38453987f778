use serde::Deserialize;

use crate::broker::engine::DEFAULT_QUEUE_CAPACITY;

/// Top-level configuration: where to listen and how the broker buffers.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub broker: BrokerSettings,
}

/// Host and port the WebSocket server binds to.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

/// Operational parameters of the broker.
#[derive(Debug, Deserialize, Clone)]
pub struct BrokerSettings {
    /// Bound of each subscriber's delivery queue; the oldest buffered event
    /// is dropped when a subscriber falls this far behind.
    pub queue_capacity: usize,
}

/// Partially specified settings as loaded from files or environment.
/// Missing values are filled from `Settings::default()`.
#[derive(Debug, Deserialize)]
pub struct PartialSettings {
    pub server: Option<PartialServerSettings>,
    pub broker: Option<PartialBrokerSettings>,
}

#[derive(Debug, Deserialize)]
pub struct PartialServerSettings {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Deserialize)]
pub struct PartialBrokerSettings {
    pub queue_capacity: Option<usize>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            broker: BrokerSettings {
                queue_capacity: DEFAULT_QUEUE_CAPACITY,
            },
        }
    }
}
