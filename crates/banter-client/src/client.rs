//! The engine: event routing and orchestration.
//!
//! [`Client`] binds the session machine, message log, roster, and typing
//! notifier together. It is the single owner of all mutable client state;
//! renderers read it through accessors and never mutate.

use std::time::Instant;

use banter_codec::{CodecError, ImageSource};
use banter_proto::{InboundEvent, JoinRequest, MessageKind, OutboundEvent, SendMessage, Typing};
use tracing::{debug, info, warn};

use crate::{
    event::{ClientAction, ClientEvent},
    log::MessageLog,
    presence::Roster,
    session::Session,
    typing::TypingNotifier,
};

/// Notice shown when image compression fails. The underlying reason goes to
/// the log; the user gets a generic failure.
const IMAGE_FAILURE_NOTICE: &str = "image processing failed";

/// The client-side synchronization engine.
///
/// Pure state machine: feed it [`ClientEvent`]s, execute the returned
/// [`ClientAction`]s. No I/O dependencies.
#[derive(Debug, Clone, Default)]
pub struct Client {
    session: Session,
    roster: Roster,
    typing: TypingNotifier,
    log: MessageLog,
    /// Peer currently shown in the shared typing indicator. Last event
    /// wins; there is no multi-typer display.
    peer_typing: Option<String>,
    /// Whether an image compression is in flight. Drives the disabled
    /// send affordance — the only busy indicator in the system.
    image_busy: bool,
}

impl Client {
    /// Create a new engine in the disconnected, unjoined state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Process one event and return the actions it produces.
    pub fn handle(&mut self, event: ClientEvent) -> Vec<ClientAction> {
        match event {
            ClientEvent::ChannelUp => self.handle_channel_up(),
            ClientEvent::ChannelDown => self.handle_channel_down(),
            ClientEvent::Server(inbound) => self.handle_server(inbound),
            ClientEvent::Tick { now } => self.handle_tick(now),
            ClientEvent::SubmitJoin { username, now } => self.handle_join(&username, now),
            ClientEvent::Keystroke { now } => self.handle_keystroke(now),
            ClientEvent::SubmitText { body } => self.handle_submit_text(&body),
            ClientEvent::AttachImage { source } => self.handle_attach_image(source),
            ClientEvent::ImageEncoded { result } => self.handle_image_encoded(result),
            ClientEvent::ImageLoadCompleted { index } => {
                debug!(index, "inline image load settled");
                vec![ClientAction::ScrollToLatest, ClientAction::Render]
            },
        }
    }

    fn handle_channel_up(&mut self) -> Vec<ClientAction> {
        if self.session.channel_up() {
            info!("channel up");
            vec![ClientAction::Render]
        } else {
            vec![]
        }
    }

    fn handle_channel_down(&mut self) -> Vec<ClientAction> {
        if self.session.channel_down() {
            // Logged, never alerted: the transport owns reconnection and the
            // status line reflects the state.
            warn!("channel down");
            vec![ClientAction::Render]
        } else {
            vec![]
        }
    }

    /// Route an inbound server event to its component.
    fn handle_server(&mut self, inbound: InboundEvent) -> Vec<ClientAction> {
        match inbound {
            InboundEvent::UserJoined(notice) | InboundEvent::UserLeft(notice) => {
                self.log.push_system(notice);
                vec![ClientAction::ScrollToLatest, ClientAction::Render]
            },
            InboundEvent::OnlineUsersUpdate(update) => {
                debug!(count = update.count, "roster snapshot");
                self.roster.replace(update);
                vec![ClientAction::Render]
            },
            InboundEvent::ReceiveMessage(message) => {
                let index = self.log.push_chat(message, self.session.username());
                debug!(index, "message appended");
                vec![ClientAction::ScrollToLatest, ClientAction::Render]
            },
            InboundEvent::UserTyping(peer) => {
                self.peer_typing = peer.is_typing.then_some(peer.username);
                vec![ClientAction::Render]
            },
            InboundEvent::Error(notice) => {
                vec![ClientAction::Alert { message: notice.message }, ClientAction::Render]
            },
        }
    }

    fn handle_tick(&mut self, now: Instant) -> Vec<ClientAction> {
        let mut actions = Vec::new();
        if self.typing.poll(now) {
            actions.push(ClientAction::Emit(OutboundEvent::Typing(Typing { is_typing: false })));
        }
        if self.session.poll_expand(now) {
            actions.push(ClientAction::ExpandLayout);
            actions.push(ClientAction::Render);
        }
        actions
    }

    fn handle_join(&mut self, username: &str, now: Instant) -> Vec<ClientAction> {
        if self.session.is_joined() {
            // Idempotent: the username is fixed for the rest of the session.
            return vec![];
        }
        match self.session.join(username, now) {
            Ok(name) => {
                info!(username = %name, "joining room");
                vec![
                    ClientAction::Emit(OutboundEvent::Join(JoinRequest::new(name))),
                    ClientAction::Render,
                ]
            },
            Err(e) => vec![ClientAction::Alert { message: e.to_string() }, ClientAction::Render],
        }
    }

    fn handle_keystroke(&mut self, now: Instant) -> Vec<ClientAction> {
        if !self.session.is_joined() {
            return vec![];
        }
        // At-least-once: a start notification goes out on every keystroke,
        // even while one is already outstanding.
        self.typing.keystroke(now);
        vec![ClientAction::Emit(OutboundEvent::Typing(Typing { is_typing: true }))]
    }

    fn handle_submit_text(&mut self, body: &str) -> Vec<ClientAction> {
        let trimmed = body.trim();
        if trimmed.is_empty() || !self.session.is_joined() {
            // Documented silent no-op: no event, no state change, and the
            // compose input keeps its contents.
            return vec![];
        }
        vec![
            ClientAction::Emit(OutboundEvent::SendMessage(SendMessage {
                message: trimmed.to_string(),
                kind: MessageKind::Text,
            })),
            ClientAction::ClearCompose,
            ClientAction::Render,
        ]
    }

    fn handle_attach_image(&mut self, source: ImageSource) -> Vec<ClientAction> {
        if let Err(e) = source.precheck() {
            // Rejected before any encoding work; the affordance was never
            // disabled.
            return vec![ClientAction::Alert { message: e.to_string() }, ClientAction::Render];
        }
        self.image_busy = true;
        vec![ClientAction::StartImageEncode { source }, ClientAction::Render]
    }

    fn handle_image_encoded(&mut self, result: Result<String, CodecError>) -> Vec<ClientAction> {
        self.image_busy = false;
        match result {
            Ok(encoded) => vec![
                ClientAction::Emit(OutboundEvent::SendMessage(SendMessage {
                    message: encoded,
                    kind: MessageKind::Image,
                })),
                ClientAction::Render,
            ],
            Err(e) => {
                warn!(error = %e, "image compression failed");
                vec![
                    ClientAction::Alert { message: IMAGE_FAILURE_NOTICE.to_string() },
                    ClientAction::Render,
                ]
            },
        }
    }

    /// Session state, for renderers.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Presence roster, for renderers.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Message log, for renderers.
    pub fn log(&self) -> &MessageLog {
        &self.log
    }

    /// Peer named in the shared typing indicator, if any.
    pub fn peer_typing(&self) -> Option<&str> {
        self.peer_typing.as_deref()
    }

    /// Whether an image compression is in flight (send affordance disabled).
    pub fn image_busy(&self) -> bool {
        self.image_busy
    }
}
