use std::collections::HashMap;

use crate::connection::{Connection, ConnectionId};
use crate::utils::error::RegistryError;

/// The authoritative set of currently live connections, keyed by identifier.
///
/// The registry does pure bookkeeping: it owns the `Connection` values while
/// they are registered, and knows nothing about transports or fanout. At most
/// one connection exists per identifier, and an identifier is never reused
/// while its prior connection is still registered.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    connections: HashMap<ConnectionId, Connection>,
}

impl ConnectionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            connections: HashMap::new(),
        }
    }

    /// Adds a connection under its identifier.
    ///
    /// A colliding identifier is a programming error on the transport side,
    /// not a retryable condition: the call fails with `DuplicateIdentifier`
    /// and the existing entry is left untouched.
    pub fn register(&mut self, conn: Connection) -> Result<(), RegistryError> {
        if self.connections.contains_key(&conn.id) {
            return Err(RegistryError::DuplicateIdentifier(conn.id));
        }
        self.connections.insert(conn.id.clone(), conn);
        Ok(())
    }

    /// Removes the entry for `id` if present, returning it.
    ///
    /// An absent identifier is a no-op, never an error: disconnect
    /// notifications may race with send-failure eviction.
    pub fn deregister(&mut self, id: &ConnectionId) -> Option<Connection> {
        self.connections.remove(id)
    }

    /// Returns a point-in-time copy of the registered connections.
    ///
    /// The copy is safe to iterate without any lock held, which is what keeps
    /// slow per-peer sends out of the registry's critical section. Iteration
    /// order is unspecified.
    pub fn snapshot(&self) -> Vec<Connection> {
        self.connections.values().cloned().collect()
    }

    pub fn contains(&self, id: &ConnectionId) -> bool {
        self.connections.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}
