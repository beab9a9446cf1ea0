//! WebSocket transport
//!
//! Bridges real sockets to the transport-agnostic hub. Responsibilities:
//! - Accept TCP/WebSocket connections
//! - Create a `Connection` for each session and hand it to the hub
//! - Forward inbound text frames verbatim to `hub.on_message`
//! - Drain the connection's outbound buffer into the WebSocket sink
//! - Notify the hub exactly once when a session ends, however it ends
//! - Tear the socket down when the hub evicts the peer, so an evicted
//!   client observes the disconnect instead of chatting into the void
//!
//! The wire format is deliberately dumb: whatever text frame a client sends
//! is what every connected client receives. Framing, handshake and close
//! semantics all belong to tungstenite; the hub never sees any of it.

use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::spawn;
use tokio::sync::{Notify, mpsc};
use tokio::time::timeout;
use tokio_tungstenite::accept_async;
use tracing::{debug, error, info, warn};
use tungstenite::protocol::Message as WsMessage;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::config::Settings;
use crate::connection::Connection;
use crate::hub::BroadcastHub;
use crate::hub::message::Payload;

/// Upper bound on a single frame write. A peer that stopped reading jams its
/// TCP buffers and would otherwise hold the send loop indefinitely.
const WRITE_TIMEOUT: Duration = Duration::from_secs(10);

pub async fn start_websocket_server(addr: String, hub: Arc<BroadcastHub>, settings: Settings) {
    let listener = TcpListener::bind(&addr).await.expect("Can't bind");

    info!("WebSocket server listening on ws://{addr}");

    while let Ok((stream, _)) = listener.accept().await {
        let hub = hub.clone();
        let send_buffer = settings.hub.send_buffer;

        tokio::spawn(async move {
            handle_session(stream, hub, send_buffer).await;
        });
    }
}

async fn handle_session(stream: TcpStream, hub: Arc<BroadcastHub>, send_buffer: usize) {
    let ws_stream = match accept_async(stream).await {
        Ok(ws) => ws,
        Err(e) => {
            warn!("WebSocket handshake error: {e}");
            return;
        }
    };
    let (mut ws_sender, mut ws_receiver) = ws_stream.split();

    let (tx, mut rx) = mpsc::channel::<Payload>(send_buffer);
    let conn = Connection::new(tx);
    let conn_id = conn.id.clone();
    if let Err(e) = hub.on_connect(conn) {
        error!("Failed to register {conn_id}: {e}");
        return;
    }
    info!("{conn_id} connected");

    // Both the writer task and the read loop can end the session; whichever
    // finishes first tells the hub, the other finds the flag already set.
    let cleanup_called = Arc::new(AtomicBool::new(false));
    let do_cleanup = {
        let hub = hub.clone();
        let conn_id = conn_id.clone();
        let cleanup_called = cleanup_called.clone();

        move || {
            if !cleanup_called.swap(true, Ordering::SeqCst) {
                hub.on_disconnect(&conn_id);
            }
        }
    };

    let shutdown = Arc::new(Notify::new());

    let writer = {
        let conn_id = conn_id.clone();
        let do_cleanup = do_cleanup.clone();
        let shutdown = shutdown.clone();

        spawn(async move {
            while let Some(payload) = rx.recv().await {
                match timeout(WRITE_TIMEOUT, ws_sender.send(WsMessage::text(payload))).await {
                    Ok(Ok(())) => {}
                    Ok(Err(e)) => {
                        warn!("Failed to send message to {conn_id}: {e}");
                        break;
                    }
                    Err(_) => {
                        warn!("Write to {conn_id} timed out");
                        break;
                    }
                }
            }

            // The channel closing means the hub dropped this connection
            // (eviction) or the session ended; close the socket so the read
            // loop terminates and the client sees the disconnect.
            let _ = timeout(WRITE_TIMEOUT, ws_sender.close()).await;
            do_cleanup();
            shutdown.notify_one();
            debug!("Send loop closed for {conn_id}");
        })
    };

    loop {
        tokio::select! {
            frame = ws_receiver.next() => match frame {
                Some(Ok(msg)) if msg.is_text() => {
                    // An evicted peer is no longer part of the chat; stop
                    // relaying its frames and end the session.
                    if !hub.is_connected(&conn_id) {
                        break;
                    }
                    let text = msg.to_text().unwrap();
                    let report = hub.on_message(&conn_id, text.to_string());
                    debug!(
                        "{conn_id} broadcast {} bytes to {} peers",
                        text.len(),
                        report.attempted
                    );
                }
                Some(Ok(_)) => {}
                Some(Err(_)) | None => break,
            },
            _ = shutdown.notified() => break,
        }
    }

    info!("{conn_id} disconnected");
    do_cleanup();
    // Dropping the sink closes the socket even if a write to a jammed peer
    // is still in flight.
    writer.abort();
}
