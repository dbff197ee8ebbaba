//! In-process simulated server.
//!
//! Reproduces the production room semantics over channels — no network, no
//! latency — so the TUI can run and be tested deterministically: join emits
//! a system notice and a roster snapshot, messages are echoed back to the
//! room with a server display time, image payloads are validated before the
//! echo, and typing relays exclude the sender.

use banter_proto::{
    ChatMessage, InboundEvent, MessageKind, OutboundEvent, RosterUpdate, RosterUser, ServerNotice,
    SystemNotice,
};
use tokio::sync::mpsc;
use tracing::debug;

use crate::transport::ChannelSignal;

/// Handle to a running in-process server.
pub struct ServerHandle {
    /// Send events to the server.
    pub to_server: mpsc::Sender<OutboundEvent>,
    /// Receive lifecycle signals and server events.
    pub from_server: mpsc::Receiver<ChannelSignal>,
    abort_handle: tokio::task::AbortHandle,
}

impl ServerHandle {
    /// Stop the server task.
    pub fn stop(&self) {
        self.abort_handle.abort();
    }
}

/// Spawn the in-process room server.
///
/// The channel reports `Up` immediately; there is no network to fail.
pub fn spawn_server() -> ServerHandle {
    let (to_server, mut outbound_rx) = mpsc::channel::<OutboundEvent>(32);
    let (signal_tx, from_server) = mpsc::channel::<ChannelSignal>(64);

    let task = tokio::spawn(async move {
        let mut room = Room::default();
        if signal_tx.send(ChannelSignal::Up).await.is_err() {
            return;
        }

        while let Some(event) = outbound_rx.recv().await {
            for reply in room.route(event) {
                if signal_tx.send(ChannelSignal::Event(reply)).await.is_err() {
                    return;
                }
            }
        }
    });

    ServerHandle { to_server, from_server, abort_handle: task.abort_handle() }
}

/// Single-connection room state.
#[derive(Debug, Default)]
struct Room {
    /// The joined user, if any. One connection, so at most one member.
    member: Option<RosterUser>,
}

impl Room {
    /// Route one client event to its broadcast replies, in order.
    fn route(&mut self, event: OutboundEvent) -> Vec<InboundEvent> {
        match event {
            OutboundEvent::Join(join) => {
                debug!(username = %join.username, room = %join.room, "join");
                let user = RosterUser { username: join.username.clone(), user_id: None };
                self.member = Some(user);
                vec![
                    InboundEvent::UserJoined(SystemNotice {
                        message: format!("{} joined the room", join.username),
                        username: join.username,
                        time: display_time(),
                    }),
                    self.roster_snapshot(),
                ]
            },
            OutboundEvent::SendMessage(send) => {
                // Senders that never joined are ignored outright.
                let Some(member) = self.member.as_ref() else {
                    return vec![];
                };
                if send.kind == MessageKind::Image {
                    if let Err(notice) = validate_image_payload(&send.message) {
                        return vec![InboundEvent::Error(notice)];
                    }
                }
                vec![InboundEvent::ReceiveMessage(ChatMessage {
                    username: member.username.clone(),
                    message: send.message,
                    kind: send.kind,
                    time: display_time(),
                    user_id: member.user_id.clone(),
                })]
            },
            // Typing relays exclude the sender; with a single connection
            // there is no one else to notify.
            OutboundEvent::Typing(_) => vec![],
        }
    }

    fn roster_snapshot(&self) -> InboundEvent {
        let users: Vec<RosterUser> = self.member.iter().cloned().collect();
        InboundEvent::OnlineUsersUpdate(RosterUpdate { count: users.len(), users })
    }
}

/// Server display time, `%H:%M:%S` like the production server.
fn display_time() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

/// Server-side image payload validation: image data URL, bounded size.
fn validate_image_payload(payload: &str) -> Result<(), ServerNotice> {
    if !payload.starts_with("data:image/") {
        return Err(ServerNotice { message: "invalid image".to_string() });
    }
    if payload.len() > banter_codec::MAX_SOURCE_BYTES {
        return Err(ServerNotice { message: "too large".to_string() });
    }
    Ok(())
}
