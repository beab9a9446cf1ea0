use thiserror::Error;

use crate::connection::ConnectionId;

/// Errors raised by registry mutation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// A connection was registered under an identifier that is already in
    /// use. This signals a transport-layer bug, not a retryable condition.
    #[error("connection `{0}` is already registered")]
    DuplicateIdentifier(ConnectionId),
}

/// A failed delivery attempt to a single peer during fanout.
///
/// Never propagated to the sender or to other peers; the hub recovers
/// locally by evicting the failing connection.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeliveryFailure {
    /// The peer's outbound buffer is full; it stopped reading or cannot keep
    /// up with the broadcast rate.
    #[error("peer outbound buffer is full")]
    BufferFull,

    /// The peer's transport side is already torn down.
    #[error("peer channel is closed")]
    Closed,
}
