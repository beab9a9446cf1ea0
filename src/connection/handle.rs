use tokio::sync::mpsc::Sender;
use tokio::sync::mpsc::error::TrySendError;

use crate::hub::message::Payload;
use crate::utils::error::DeliveryFailure;

/// Opaque identifier for one live session (e.g. `conn-<uuid>`).
pub type ConnectionId = String;

/// Represents one live client session from the hub's point of view.
///
/// A connection is a unique identifier plus a send capability: a bounded
/// channel the hub pushes outbound payloads into. The transport side owns the
/// receiving half and drains it into the actual socket, so the hub never
/// touches transport types.
#[derive(Debug, Clone)]
pub struct Connection {
    /// Unique identifier, generated at accept time and stable for the
    /// connection's lifetime.
    pub id: ConnectionId,

    sender: Sender<Payload>,
}

impl Connection {
    /// Creates a connection with a freshly generated identifier.
    pub fn new(sender: Sender<Payload>) -> Self {
        Self {
            id: format!("conn-{}", uuid::Uuid::new_v4()),
            sender,
        }
    }

    /// Creates a connection with a caller-chosen identifier.
    pub fn with_id(id: impl Into<ConnectionId>, sender: Sender<Payload>) -> Self {
        Self {
            id: id.into(),
            sender,
        }
    }

    /// Pushes one payload towards this peer.
    ///
    /// Never blocks: the channel is bounded and `try_send` is used, so a peer
    /// that stopped reading surfaces as `DeliveryFailure::BufferFull` instead
    /// of stalling the caller. A torn-down peer surfaces as
    /// `DeliveryFailure::Closed`.
    pub fn send(&self, payload: Payload) -> Result<(), DeliveryFailure> {
        self.sender.try_send(payload).map_err(|e| match e {
            TrySendError::Full(_) => DeliveryFailure::BufferFull,
            TrySendError::Closed(_) => DeliveryFailure::Closed,
        })
    }
}
