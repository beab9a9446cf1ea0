use std::collections::HashSet;
use std::sync::Arc;

use super::BroadcastHub;
use super::registry::ConnectionRegistry;
use crate::connection::Connection;
use crate::hub::message::Payload;
use crate::utils::error::RegistryError;
use tokio::sync::mpsc;

fn peer(id: &str) -> (Connection, mpsc::Receiver<Payload>) {
    let (tx, rx) = mpsc::channel::<Payload>(64);
    (Connection::with_id(id, tx), rx)
}

fn drain(rx: &mut mpsc::Receiver<Payload>) -> Vec<Payload> {
    let mut out = Vec::new();
    while let Ok(msg) = rx.try_recv() {
        out.push(msg);
    }
    out
}

#[test]
fn test_registry_register_and_deregister() {
    let mut registry = ConnectionRegistry::new();
    let (conn, _rx) = peer("a");

    registry.register(conn).unwrap();
    assert!(registry.contains(&"a".to_string()));
    assert_eq!(registry.len(), 1);

    assert!(registry.deregister(&"a".to_string()).is_some());
    assert!(registry.is_empty());
}

#[test]
fn test_registry_deregister_is_idempotent() {
    let mut registry = ConnectionRegistry::new();
    let (conn, _rx) = peer("a");
    registry.register(conn).unwrap();

    assert!(registry.deregister(&"a".to_string()).is_some());
    assert!(registry.deregister(&"a".to_string()).is_none());
    assert!(registry.deregister(&"never-registered".to_string()).is_none());
}

#[test]
fn test_registry_duplicate_identifier_keeps_existing_entry() {
    let mut registry = ConnectionRegistry::new();
    let (first, mut first_rx) = peer("a");
    let (second, _second_rx) = peer("a");

    registry.register(first).unwrap();
    let err = registry.register(second).unwrap_err();
    assert_eq!(err, RegistryError::DuplicateIdentifier("a".to_string()));
    assert_eq!(registry.len(), 1);

    // The surviving entry is still the first one.
    for conn in registry.snapshot() {
        conn.send("ping".to_string()).unwrap();
    }
    assert_eq!(drain(&mut first_rx), vec!["ping"]);
}

#[test]
fn test_registry_snapshot_is_a_point_in_time_copy() {
    let mut registry = ConnectionRegistry::new();
    let (a, _a_rx) = peer("a");
    let (b, _b_rx) = peer("b");
    registry.register(a).unwrap();
    registry.register(b).unwrap();

    let snapshot = registry.snapshot();
    registry.deregister(&"a".to_string());

    assert_eq!(snapshot.len(), 2);
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_hub_connect_and_disconnect() {
    let hub = BroadcastHub::new();
    let (conn, _rx) = peer("a");

    hub.on_connect(conn).unwrap();
    assert!(hub.is_connected(&"a".to_string()));

    hub.on_disconnect(&"a".to_string());
    assert!(!hub.is_connected(&"a".to_string()));

    // Idempotent.
    hub.on_disconnect(&"a".to_string());
    assert_eq!(hub.connection_count(), 0);
}

#[test]
fn test_connect_sends_nothing_to_new_peer() {
    let hub = BroadcastHub::new();
    let (conn, mut rx) = peer("a");
    hub.on_connect(conn).unwrap();
    assert!(drain(&mut rx).is_empty());
}

#[test]
fn test_broadcast_includes_sender() {
    let hub = BroadcastHub::new();
    let (a, mut a_rx) = peer("a");
    let (b, mut b_rx) = peer("b");
    hub.on_connect(a).unwrap();
    hub.on_connect(b).unwrap();

    let report = hub.on_message(&"a".to_string(), "hi".to_string());
    assert_eq!(report.attempted, 2);
    assert!(report.evicted.is_empty());

    assert_eq!(drain(&mut a_rx), vec!["hi"]);
    assert_eq!(drain(&mut b_rx), vec!["hi"]);
}

#[test]
fn test_broadcast_can_exclude_sender() {
    let hub = BroadcastHub::with_policy(false);
    let (a, mut a_rx) = peer("a");
    let (b, mut b_rx) = peer("b");
    hub.on_connect(a).unwrap();
    hub.on_connect(b).unwrap();

    let report = hub.on_message(&"a".to_string(), "hi".to_string());
    assert_eq!(report.attempted, 1);

    assert!(drain(&mut a_rx).is_empty());
    assert_eq!(drain(&mut b_rx), vec!["hi"]);
}

#[test]
fn test_failed_delivery_evicts_peer() {
    let hub = BroadcastHub::new();
    let (a, mut a_rx) = peer("a");
    let (b, b_rx) = peer("b");
    hub.on_connect(a).unwrap();
    hub.on_connect(b).unwrap();

    // Tear down b's receiving side so delivery to it fails.
    drop(b_rx);

    let report = hub.on_message(&"a".to_string(), "hi".to_string());
    assert_eq!(report.attempted, 2);
    assert_eq!(report.evicted, vec!["b".to_string()]);
    assert!(!hub.is_connected(&"b".to_string()));

    // a still got the message, and b is gone for subsequent broadcasts.
    assert_eq!(drain(&mut a_rx), vec!["hi"]);
    let report = hub.on_message(&"a".to_string(), "again".to_string());
    assert_eq!(report.attempted, 1);
}

#[test]
fn test_full_buffer_counts_as_delivery_failure() {
    let hub = BroadcastHub::new();
    let (slow_tx, _slow_rx) = mpsc::channel::<Payload>(1);
    let slow = Connection::with_id("slow", slow_tx);
    let (fast, mut fast_rx) = peer("fast");
    hub.on_connect(slow).unwrap();
    hub.on_connect(fast).unwrap();

    // First broadcast fills the slow peer's one-slot buffer; it never reads.
    hub.on_message(&"fast".to_string(), "one".to_string());
    let report = hub.on_message(&"fast".to_string(), "two".to_string());

    assert_eq!(report.evicted, vec!["slow".to_string()]);
    assert!(!hub.is_connected(&"slow".to_string()));
    assert_eq!(drain(&mut fast_rx), vec!["one", "two"]);
}

#[test]
fn test_chat_session_scenario() {
    let hub = BroadcastHub::new();
    let (a, mut a_rx) = peer("a");
    let (b, mut b_rx) = peer("b");
    hub.on_connect(a).unwrap();
    hub.on_connect(b).unwrap();

    hub.on_message(&"a".to_string(), "hi".to_string());
    assert_eq!(drain(&mut a_rx), vec!["hi"]);
    assert_eq!(drain(&mut b_rx), vec!["hi"]);

    hub.on_disconnect(&"b".to_string());
    hub.on_message(&"a".to_string(), "bye".to_string());
    assert_eq!(drain(&mut a_rx), vec!["bye"]);
    assert!(drain(&mut b_rx).is_empty());

    let (c, mut c_rx) = peer("c");
    hub.on_connect(c).unwrap();
    hub.on_message(&"c".to_string(), "yo".to_string());
    assert_eq!(drain(&mut a_rx), vec!["yo"]);
    assert!(drain(&mut b_rx).is_empty());
    assert_eq!(drain(&mut c_rx), vec!["yo"]);
}

#[test]
fn test_concurrent_broadcasts_lose_nothing() {
    const PEERS: usize = 50;

    let hub = Arc::new(BroadcastHub::new());
    let mut receivers = Vec::with_capacity(PEERS);
    for i in 0..PEERS {
        let (conn, rx) = peer(&format!("peer-{i}"));
        hub.on_connect(conn).unwrap();
        receivers.push(rx);
    }

    let handles: Vec<_> = (0..PEERS)
        .map(|i| {
            let hub = hub.clone();
            std::thread::spawn(move || {
                hub.on_message(&format!("peer-{i}"), format!("msg-{i}"));
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let expected: HashSet<String> = (0..PEERS).map(|i| format!("msg-{i}")).collect();
    for mut rx in receivers {
        let got = drain(&mut rx);
        assert_eq!(got.len(), PEERS, "no message lost, none duplicated");
        assert_eq!(got.into_iter().collect::<HashSet<_>>(), expected);
    }
}
