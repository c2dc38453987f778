//! The `service` module binds the channel store and the broker into the
//! operations the transport layer calls: queries, mutations that publish
//! their events, and subscription feeds.

pub mod message_board;

pub use message_board::MessageBoard;
