//! Scenario tests driving the engine through event sequences.
//!
//! Every test feeds [`ClientEvent`]s and inspects the returned
//! [`ClientAction`]s plus observable state. No I/O, no sleeping: time is
//! supplied explicitly.

use std::time::{Duration, Instant};

use banter_client::{
    Classification, Client, ClientAction, ClientEvent, ConnectionState, EXPAND_DELAY,
    TYPING_STOP_DELAY,
};
use banter_codec::ImageSource;
use banter_proto::{
    ChatMessage, InboundEvent, MessageKind, OutboundEvent, PeerTyping, RosterUpdate, RosterUser,
    SendMessage, ServerNotice, SystemNotice, Typing, DEFAULT_ROOM,
};

fn emitted(actions: &[ClientAction]) -> Vec<OutboundEvent> {
    actions
        .iter()
        .filter_map(|a| match a {
            ClientAction::Emit(event) => Some(event.clone()),
            _ => None,
        })
        .collect()
}

fn joined(username: &str, t0: Instant) -> Client {
    let mut client = Client::new();
    client.handle(ClientEvent::ChannelUp);
    client.handle(ClientEvent::SubmitJoin { username: username.to_string(), now: t0 });
    client
}

fn chat(sender: &str, body: &str, kind: MessageKind, time: &str) -> InboundEvent {
    InboundEvent::ReceiveMessage(ChatMessage {
        username: sender.to_string(),
        message: body.to_string(),
        kind,
        time: time.to_string(),
        user_id: None,
    })
}

#[test]
fn join_emits_request_and_transitions() {
    let mut client = Client::new();
    client.handle(ClientEvent::ChannelUp);
    assert_eq!(client.session().state(), ConnectionState::Connected);

    let actions =
        client.handle(ClientEvent::SubmitJoin { username: "alice".to_string(), now: Instant::now() });

    let events = emitted(&actions);
    assert_eq!(events.len(), 1);
    let OutboundEvent::Join(ref join) = events[0] else {
        unreachable!("join must emit a join request");
    };
    assert_eq!(join.username, "alice");
    assert_eq!(join.room, DEFAULT_ROOM);
    assert_eq!(client.session().state(), ConnectionState::Joined);
}

#[test]
fn join_works_while_disconnected() {
    // Join is not gated on the channel: the session still transitions and
    // the request is simply lost by the transport.
    let mut client = Client::new();
    let actions =
        client.handle(ClientEvent::SubmitJoin { username: "bob".to_string(), now: Instant::now() });

    assert_eq!(emitted(&actions).len(), 1);
    assert_eq!(client.session().state(), ConnectionState::Joined);
}

#[test]
fn join_is_idempotent_once_joined() {
    let t0 = Instant::now();
    let mut client = joined("alice", t0);

    let actions =
        client.handle(ClientEvent::SubmitJoin { username: "mallory".to_string(), now: t0 });

    assert!(actions.is_empty());
    assert_eq!(client.session().username(), Some("alice"));
}

#[test]
fn empty_username_is_a_validation_failure() {
    let mut client = Client::new();
    client.handle(ClientEvent::ChannelUp);

    let actions =
        client.handle(ClientEvent::SubmitJoin { username: "   ".to_string(), now: Instant::now() });

    assert!(actions.iter().any(|a| matches!(a, ClientAction::Alert { .. })));
    assert!(emitted(&actions).is_empty());
    assert_eq!(client.session().state(), ConnectionState::Connected);
}

#[test]
fn layout_expands_exactly_once_after_the_join_delay() {
    let t0 = Instant::now();
    let mut client = joined("alice", t0);

    let early = client.handle(ClientEvent::Tick { now: t0 + EXPAND_DELAY / 2 });
    assert!(!early.contains(&ClientAction::ExpandLayout));

    let due = client.handle(ClientEvent::Tick { now: t0 + EXPAND_DELAY });
    assert!(due.contains(&ClientAction::ExpandLayout));

    let later = client.handle(ClientEvent::Tick { now: t0 + EXPAND_DELAY * 3 });
    assert!(!later.contains(&ClientAction::ExpandLayout));
}

#[test]
fn text_send_requires_join() {
    let mut client = Client::new();
    client.handle(ClientEvent::ChannelUp);

    let actions = client.handle(ClientEvent::SubmitText { body: "hello".to_string() });
    assert!(actions.is_empty());
    assert!(client.log().is_empty());
}

#[test]
fn whitespace_only_text_is_silently_dropped() {
    let mut client = joined("alice", Instant::now());

    let actions = client.handle(ClientEvent::SubmitText { body: "   \t ".to_string() });
    assert!(actions.is_empty());
}

#[test]
fn text_send_trims_emits_and_clears_compose() {
    let mut client = joined("alice", Instant::now());

    let actions = client.handle(ClientEvent::SubmitText { body: "  hi there  ".to_string() });

    let events = emitted(&actions);
    assert_eq!(
        events,
        vec![OutboundEvent::SendMessage(SendMessage {
            message: "hi there".to_string(),
            kind: MessageKind::Text,
        })]
    );
    assert!(actions.contains(&ClientAction::ClearCompose));
}

#[test]
fn disconnect_gates_sends_until_rejoin() {
    let t0 = Instant::now();
    let mut client = joined("alice", t0);

    client.handle(ClientEvent::ChannelDown);
    assert_eq!(client.session().state(), ConnectionState::Disconnected);
    assert!(client.handle(ClientEvent::SubmitText { body: "lost".to_string() }).is_empty());

    // Transport-owned reconnect: back to Connected, never to Joined.
    client.handle(ClientEvent::ChannelUp);
    assert_eq!(client.session().state(), ConnectionState::Connected);
    assert!(client.handle(ClientEvent::SubmitText { body: "still lost".to_string() }).is_empty());

    // Manual rejoin restores the send path.
    client.handle(ClientEvent::SubmitJoin { username: "alice".to_string(), now: t0 });
    let actions = client.handle(ClientEvent::SubmitText { body: "back".to_string() });
    assert_eq!(emitted(&actions).len(), 1);
}

#[test]
fn echoed_own_message_renders_as_own() {
    let mut client = joined("Alice", Instant::now());

    let actions = client.handle(ClientEvent::Server(chat("Alice", "hi", MessageKind::Text, "12:00")));

    assert!(actions.contains(&ClientAction::ScrollToLatest));
    let entry = client.log().get(0).cloned();
    assert_eq!(entry.as_ref().map(|e| e.class), Some(Classification::Own));
    assert_eq!(entry.and_then(|e| e.header()), Some("you 12:00".to_string()));
}

#[test]
fn peer_message_renders_with_sender_header() {
    let mut client = joined("alice", Instant::now());

    client.handle(ClientEvent::Server(chat("bob", "hey", MessageKind::Text, "12:01")));

    let entry = client.log().get(0).cloned();
    assert_eq!(entry.as_ref().map(|e| e.class), Some(Classification::Other));
    assert_eq!(entry.and_then(|e| e.header()), Some("bob 12:01".to_string()));
}

#[test]
fn system_notices_append_in_order() {
    let mut client = joined("alice", Instant::now());

    client.handle(ClientEvent::Server(InboundEvent::UserJoined(SystemNotice {
        username: "bob".to_string(),
        message: "bob joined the room".to_string(),
        time: "12:00:00".to_string(),
    })));
    client.handle(ClientEvent::Server(InboundEvent::UserLeft(SystemNotice {
        username: "bob".to_string(),
        message: "bob left the room".to_string(),
        time: "12:00:05".to_string(),
    })));

    let classes: Vec<Classification> = client.log().entries().iter().map(|e| e.class).collect();
    assert_eq!(classes, vec![Classification::System, Classification::System]);
    assert_eq!(client.log().get(1).map(|e| e.body.as_str()), Some("bob left the room"));
}

#[test]
fn roster_snapshot_replaces_and_keeps_count_verbatim() {
    let mut client = joined("alice", Instant::now());

    client.handle(ClientEvent::Server(InboundEvent::OnlineUsersUpdate(RosterUpdate {
        users: vec![
            RosterUser { username: "alice".to_string(), user_id: None },
            RosterUser { username: "bob".to_string(), user_id: None },
        ],
        count: 2,
    })));
    client.handle(ClientEvent::Server(InboundEvent::OnlineUsersUpdate(RosterUpdate {
        users: vec![RosterUser { username: "alice".to_string(), user_id: None }],
        count: 5,
    })));

    assert_eq!(client.roster().users().len(), 1);
    assert_eq!(client.roster().count(), 5);
}

#[test]
fn typing_debounce_emits_one_stop_timed_from_the_last_keystroke() {
    let t0 = Instant::now();
    let mut client = joined("alice", t0);

    let mut starts = 0;
    let mut last = t0;
    for offset_ms in [0_u64, 300, 600] {
        last = t0 + Duration::from_millis(offset_ms);
        let actions = client.handle(ClientEvent::Keystroke { now: last });
        starts += emitted(&actions)
            .iter()
            .filter(|e| matches!(e, OutboundEvent::Typing(Typing { is_typing: true })))
            .count();
    }
    assert_eq!(starts, 3, "every keystroke emits a start notification");

    // Sweep ticks past the window; exactly one stop, not before the quiet
    // interval measured from the last keystroke.
    let mut stops = Vec::new();
    for tick_ms in (0..3000).step_by(100) {
        let now = t0 + Duration::from_millis(600 + tick_ms);
        for event in emitted(&client.handle(ClientEvent::Tick { now })) {
            if matches!(event, OutboundEvent::Typing(Typing { is_typing: false })) {
                stops.push(now);
            }
        }
    }
    assert_eq!(stops.len(), 1);
    assert!(stops[0] >= last + TYPING_STOP_DELAY);
}

#[test]
fn keystrokes_before_join_emit_nothing() {
    let mut client = Client::new();
    client.handle(ClientEvent::ChannelUp);

    let actions = client.handle(ClientEvent::Keystroke { now: Instant::now() });
    assert!(actions.is_empty());
}

#[test]
fn peer_typing_indicator_is_last_event_wins() {
    let mut client = joined("alice", Instant::now());

    client.handle(ClientEvent::Server(InboundEvent::UserTyping(PeerTyping {
        username: "bob".to_string(),
        is_typing: true,
    })));
    assert_eq!(client.peer_typing(), Some("bob"));

    client.handle(ClientEvent::Server(InboundEvent::UserTyping(PeerTyping {
        username: "carol".to_string(),
        is_typing: true,
    })));
    assert_eq!(client.peer_typing(), Some("carol"));

    client.handle(ClientEvent::Server(InboundEvent::UserTyping(PeerTyping {
        username: "carol".to_string(),
        is_typing: false,
    })));
    assert_eq!(client.peer_typing(), None);
}

#[test]
fn server_errors_surface_verbatim() {
    let mut client = joined("alice", Instant::now());

    let actions = client.handle(ClientEvent::Server(InboundEvent::Error(ServerNotice {
        message: "too large".to_string(),
    })));

    assert!(actions.contains(&ClientAction::Alert { message: "too large".to_string() }));
}

#[test]
fn non_image_attachment_rejected_before_any_encode() {
    let mut client = joined("alice", Instant::now());

    let actions = client.handle(ClientEvent::AttachImage {
        source: ImageSource {
            filename: "notes.txt".to_string(),
            media_type: "text/plain".to_string(),
            bytes: b"hello".to_vec(),
        },
    });

    assert!(actions.iter().any(|a| matches!(a, ClientAction::Alert { .. })));
    assert!(!actions.iter().any(|a| matches!(a, ClientAction::StartImageEncode { .. })));
    assert!(!client.image_busy(), "affordance is never disabled for rejected input");
}

#[test]
fn image_attachment_disables_affordance_until_completion() {
    let mut client = joined("alice", Instant::now());
    let source = ImageSource {
        filename: "photo.png".to_string(),
        media_type: "image/png".to_string(),
        bytes: vec![1, 2, 3],
    };

    let actions = client.handle(ClientEvent::AttachImage { source: source.clone() });
    assert!(actions.contains(&ClientAction::StartImageEncode { source }));
    assert!(client.image_busy());

    let actions = client.handle(ClientEvent::ImageEncoded {
        result: Ok("data:image/jpeg;base64,AAAA".to_string()),
    });
    assert!(!client.image_busy());
    assert_eq!(
        emitted(&actions),
        vec![OutboundEvent::SendMessage(SendMessage {
            message: "data:image/jpeg;base64,AAAA".to_string(),
            kind: MessageKind::Image,
        })]
    );
}

#[test]
fn encode_failure_alerts_generically_and_restores_affordance() {
    let mut client = joined("alice", Instant::now());
    client.handle(ClientEvent::AttachImage {
        source: ImageSource {
            filename: "photo.png".to_string(),
            media_type: "image/png".to_string(),
            bytes: vec![1, 2, 3],
        },
    });

    let actions = client.handle(ClientEvent::ImageEncoded {
        result: Err(banter_codec::CodecError::Decode { reason: "truncated".to_string() }),
    });

    assert!(!client.image_busy());
    assert!(actions.contains(&ClientAction::Alert { message: "image processing failed".to_string() }));
    assert!(emitted(&actions).is_empty(), "failures are not retried");
}

#[test]
fn image_messages_scroll_twice() {
    let mut client = joined("alice", Instant::now());

    // Phase one: scroll on insertion.
    let actions =
        client.handle(ClientEvent::Server(chat("bob", "data:image/jpeg;base64,AAAA", MessageKind::Image, "12:02")));
    assert!(actions.contains(&ClientAction::ScrollToLatest));

    // Phase two: scroll again once the inline image settles, loaded or not.
    let actions = client.handle(ClientEvent::ImageLoadCompleted { index: 0 });
    assert!(actions.contains(&ClientAction::ScrollToLatest));
}
