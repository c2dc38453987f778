//! The `transport` module exposes the board over JSON-over-WebSocket.
//!
//! It parses client requests, invokes the service operations, and relays
//! subscription events back to clients as they arrive.

pub mod message;
pub mod websocket;
