//! # Relaycast
//!
//! `relaycast` is a minimalist, in-memory broadcast relay built with Rust.
//! Clients hold a persistent WebSocket connection to a central hub, and every
//! message any client sends is fanned out to all currently connected clients,
//! the sender included.
//!
//! ## Core Modules
//!
//! The library is structured into several modules, each with a distinct responsibility:
//!
//! - `hub`: The broadcast hub and its connection registry; tracks live
//!   connections and fans inbound messages out to all of them.
//! - `connection`: Represents a connected peer: an identifier plus a bounded
//!   send capability.
//! - `config`: Handles loading and managing server configuration.
//! - `transport`: Runs the WebSocket server and drives the hub's
//!   connect/message/disconnect lifecycle.
//! - `utils`: Shared pieces, such as error types and logging setup.

pub mod config;
pub mod connection;
pub mod hub;
pub mod transport;
pub mod utils;
