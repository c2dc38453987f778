//! # PostBus
//!
//! `postbus` is a minimal in-process message broker feeding live subscribers
//! of a channel-based publish model. Named channels hold ordered posts;
//! adding a post or a channel publishes an event that every current
//! subscriber of the matching topic receives, in order, without the
//! publisher ever blocking on a slow consumer.
//!
//! ## Core Modules
//!
//! - `broker`: the fan-out engine — topic registry, subscriber inboxes,
//!   publish/subscribe/unsubscribe.
//! - `store`: the domain state — channels and their posts.
//! - `service`: binds store and broker into the operations the API layer
//!   calls.
//! - `transport`: JSON-over-WebSocket server relaying requests and
//!   subscription events.
//! - `config`: settings loading with defaults.
//! - `utils`: logging setup and error types.

pub mod broker;
pub mod config;
pub mod service;
pub mod store;
pub mod transport;
pub mod utils;

#[cfg(test)]
mod tests;
