use std::sync::Mutex;

use tracing::{debug, warn};

use crate::connection::{Connection, ConnectionId};
use crate::hub::message::{FanoutReport, Payload};
use crate::hub::registry::ConnectionRegistry;
use crate::utils::error::RegistryError;

/// The broadcast hub: the single-channel relay at the center of the system.
///
/// The hub owns the `ConnectionRegistry` and exposes the three lifecycle
/// entry points the transport layer drives: `on_connect`, `on_message` and
/// `on_disconnect`. Every inbound message is fanned out best-effort to all
/// currently registered connections; a peer whose send fails is evicted so
/// membership heals itself.
///
/// One hub is constructed per process and shared behind an `Arc`; all methods
/// take `&self`, with the registry guarded by an internal mutex. Per-peer
/// delivery happens strictly outside that lock, so a slow or dead peer can
/// never stall connects, disconnects or other broadcasts.
#[derive(Debug)]
pub struct BroadcastHub {
    registry: Mutex<ConnectionRegistry>,
    include_sender: bool,
}

impl Default for BroadcastHub {
    fn default() -> Self {
        Self::new()
    }
}

impl BroadcastHub {
    /// Creates a hub with the default policy: the sender receives its own
    /// messages, matching "everyone sees every message" chat semantics.
    pub fn new() -> Self {
        Self::with_policy(true)
    }

    /// Creates a hub with an explicit broadcast-to-self policy.
    pub fn with_policy(include_sender: bool) -> Self {
        Self {
            registry: Mutex::new(ConnectionRegistry::new()),
            include_sender,
        }
    }

    /// Registers a newly accepted connection.
    ///
    /// Pure join: no history is replayed and nothing is sent to the new peer.
    /// Fails only on an identifier collision, which indicates a transport
    /// layer bug.
    pub fn on_connect(&self, conn: Connection) -> Result<(), RegistryError> {
        let id = conn.id.clone();
        self.registry.lock().unwrap().register(conn)?;
        debug!("{id} registered with hub");
        Ok(())
    }

    /// Deregisters a closed connection. Idempotent: a second call, or a call
    /// for a peer already evicted during fanout, is a no-op.
    pub fn on_disconnect(&self, id: &ConnectionId) {
        if self.registry.lock().unwrap().deregister(id).is_some() {
            debug!("{id} deregistered from hub");
        }
    }

    /// Fans one inbound payload out to every registered connection.
    ///
    /// Snapshot-then-fanout: the registry is copied under the lock, the lock
    /// is released, and delivery is attempted independently to each snapshot
    /// member (including the sender when the policy says so). A failed send
    /// never aborts the loop and never surfaces to the caller; the failing
    /// peer is evicted from the registry instead.
    pub fn on_message(&self, sender_id: &ConnectionId, payload: Payload) -> FanoutReport {
        let snapshot = self.registry.lock().unwrap().snapshot();

        let mut report = FanoutReport::default();
        for conn in snapshot {
            if !self.include_sender && conn.id == *sender_id {
                continue;
            }
            report.attempted += 1;
            if let Err(e) = conn.send(payload.clone()) {
                warn!("Failed to deliver to {}: {e}, evicting", conn.id);
                report.evicted.push(conn.id);
            }
        }

        if !report.evicted.is_empty() {
            let mut registry = self.registry.lock().unwrap();
            for id in &report.evicted {
                registry.deregister(id);
            }
        }

        report
    }

    /// Number of currently registered connections.
    pub fn connection_count(&self) -> usize {
        self.registry.lock().unwrap().len()
    }

    /// Whether `id` is currently registered.
    pub fn is_connected(&self, id: &ConnectionId) -> bool {
        self.registry.lock().unwrap().contains(id)
    }
}
