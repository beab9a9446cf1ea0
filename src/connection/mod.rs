//! The `connection` module defines the representation of a client session.
//!
//! It provides the `Connection` struct, which encapsulates the state of a
//! single connected peer: its unique identifier and the bounded channel the
//! hub uses to push messages to it.

pub mod handle;
pub use handle::{Connection, ConnectionId};
