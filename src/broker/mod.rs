pub mod engine;
pub mod event;
pub mod registry;
pub mod subscriber;
pub mod topic;

pub use engine::Broker;
pub use event::Event;
pub use subscriber::{SubscriberId, Subscription};
pub use topic::Topic;
