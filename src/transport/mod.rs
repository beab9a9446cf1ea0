//! The `transport` module handles network communication with clients over
//! WebSockets.
//!
//! It implements the WebSocket server itself: accepting connections, pumping
//! frames in both directions, and driving the hub's connect/message/disconnect
//! lifecycle. The hub side of the boundary stays free of transport types.

pub mod websocket;
