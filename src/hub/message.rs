use crate::connection::ConnectionId;

/// An opaque message payload.
///
/// The hub treats payloads as uninterpreted blobs: no schema, no validation,
/// no transformation. A payload exists only transiently during fanout and is
/// discarded once delivery attempts complete.
pub type Payload = String;

/// Summary of one fanout pass, returned by `BroadcastHub::on_message`.
///
/// Delivery failures never propagate as errors; they show up here as the set
/// of peers that were evicted.
#[derive(Debug, Default, PartialEq)]
pub struct FanoutReport {
    /// Number of peers a delivery was attempted to.
    pub attempted: usize,

    /// Peers whose send failed and were removed from the registry.
    pub evicted: Vec<ConnectionId>,
}
