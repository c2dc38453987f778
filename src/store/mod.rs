//! The `store` module holds the domain state: named channels, each an
//! append-only ordered list of posts.
//!
//! The store knows nothing about subscriptions; publishing events for its
//! mutations is the service layer's job.

pub mod channel_store;

pub use channel_store::{Channel, ChannelStore, Post, StoreError};

#[cfg(test)]
mod tests;
