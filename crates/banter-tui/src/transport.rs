//! Channel transports.
//!
//! The engine only requires "emit named event" and "receive named event in
//! send order"; this module provides that contract over a WebSocket, with
//! reconnection owned entirely by the transport task. The in-process
//! simulated server in [`crate::server`] satisfies the same contract over
//! plain channels.

use std::time::Duration;

use banter_proto::{wire, InboundEvent, OutboundEvent};
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{info, warn};

/// Reconnection attempts before the transport gives up.
pub const RECONNECT_ATTEMPTS: u32 = 5;

/// Delay between reconnection attempts.
pub const RECONNECT_DELAY: Duration = Duration::from_secs(1);

/// Outbound buffer size. Events beyond this are dropped, never queued up.
const OUTBOUND_BUFFER: usize = 32;

/// Inbound buffer size.
const INBOUND_BUFFER: usize = 64;

/// Lifecycle and data signals surfaced by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelSignal {
    /// The channel is up (initial connect or reconnect).
    Up,
    /// The channel dropped; the transport keeps reconnecting on its own.
    Down,
    /// A decoded server event.
    Event(InboundEvent),
}

/// Handle to a running channel transport.
pub struct ChannelHandle {
    /// Send events to the server.
    pub to_server: mpsc::Sender<OutboundEvent>,
    /// Receive lifecycle signals and server events.
    pub from_server: mpsc::Receiver<ChannelSignal>,
    abort_handle: tokio::task::AbortHandle,
}

impl ChannelHandle {
    /// Stop the transport task.
    pub fn stop(&self) {
        self.abort_handle.abort();
    }
}

/// Spawn the WebSocket transport for `url`.
///
/// The task owns reconnection: up to [`RECONNECT_ATTEMPTS`] attempts spaced
/// [`RECONNECT_DELAY`] apart, with the attempt counter reset after every
/// successful connect. Events queued while the channel was down are dropped
/// on reconnect — outages are never replayed.
pub fn spawn_websocket(url: String) -> ChannelHandle {
    let (to_server, outbound_rx) = mpsc::channel::<OutboundEvent>(OUTBOUND_BUFFER);
    let (signal_tx, from_server) = mpsc::channel::<ChannelSignal>(INBOUND_BUFFER);

    let task = tokio::spawn(run_websocket(url, outbound_rx, signal_tx));

    ChannelHandle { to_server, from_server, abort_handle: task.abort_handle() }
}

async fn run_websocket(
    url: String,
    mut outbound_rx: mpsc::Receiver<OutboundEvent>,
    signal_tx: mpsc::Sender<ChannelSignal>,
) {
    let mut attempts = 0_u32;
    let mut ever_connected = false;

    loop {
        match connect_async(url.as_str()).await {
            Ok((stream, _)) => {
                attempts = 0;
                if ever_connected {
                    // Anything queued during the outage is dropped; the
                    // protocol has no redelivery.
                    while outbound_rx.try_recv().is_ok() {}
                }
                ever_connected = true;
                info!(%url, "websocket connected");
                if signal_tx.send(ChannelSignal::Up).await.is_err() {
                    return;
                }

                let (mut writer, mut reader) = stream.split();
                loop {
                    tokio::select! {
                        inbound = reader.next() => match inbound {
                            Some(Ok(Message::Text(text))) => {
                                match wire::decode::<InboundEvent>(&text) {
                                    Ok(event) => {
                                        if signal_tx.send(ChannelSignal::Event(event)).await.is_err() {
                                            return;
                                        }
                                    },
                                    Err(e) => warn!(error = %e, "dropping undecodable frame"),
                                }
                            },
                            Some(Ok(Message::Close(_))) | None => break,
                            Some(Ok(_)) => {},
                            Some(Err(e)) => {
                                warn!(error = %e, "websocket receive failed");
                                break;
                            },
                        },
                        outbound = outbound_rx.recv() => match outbound {
                            Some(event) => match wire::encode(&event) {
                                Ok(frame) => {
                                    if let Err(e) = writer.send(Message::Text(frame)).await {
                                        warn!(error = %e, "websocket send failed");
                                        break;
                                    }
                                },
                                Err(e) => warn!(error = %e, "dropping unencodable event"),
                            },
                            None => return,
                        },
                    }
                }

                if signal_tx.send(ChannelSignal::Down).await.is_err() {
                    return;
                }
            },
            Err(e) => {
                warn!(error = %e, attempt = attempts + 1, "websocket connect failed");
            },
        }

        attempts += 1;
        if attempts >= RECONNECT_ATTEMPTS {
            warn!("giving up after {RECONNECT_ATTEMPTS} reconnect attempts");
            return;
        }
        tokio::time::sleep(RECONNECT_DELAY).await;
    }
}
