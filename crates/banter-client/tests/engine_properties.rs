//! Property-based tests for the engine.
//!
//! Invariants are checked under arbitrary event sequences: the log only
//! appends, the roster always mirrors the latest snapshot, and the typing
//! debounce produces exactly one stop per burst of activity.

use std::time::{Duration, Instant};

use banter_client::{Client, ClientAction, ClientEvent, TYPING_STOP_DELAY};
use banter_proto::{
    ChatMessage, InboundEvent, MessageKind, OutboundEvent, RosterUpdate, RosterUser, SystemNotice,
    Typing,
};
use proptest::prelude::*;

fn name_strategy() -> impl Strategy<Value = String> {
    "[a-z]{1,8}"
}

fn inbound_strategy() -> impl Strategy<Value = InboundEvent> {
    prop_oneof![
        (name_strategy(), "[ -~]{0,24}").prop_map(|(username, message)| {
            InboundEvent::ReceiveMessage(ChatMessage {
                username,
                message,
                kind: MessageKind::Text,
                time: "12:00".to_string(),
                user_id: None,
            })
        }),
        name_strategy().prop_map(|username| {
            InboundEvent::UserJoined(SystemNotice {
                message: format!("{username} joined the room"),
                username,
                time: "12:00".to_string(),
            })
        }),
        name_strategy().prop_map(|username| {
            InboundEvent::UserLeft(SystemNotice {
                message: format!("{username} left the room"),
                username,
                time: "12:00".to_string(),
            })
        }),
        (prop::collection::vec(name_strategy(), 0..6), 0usize..10).prop_map(|(names, count)| {
            InboundEvent::OnlineUsersUpdate(RosterUpdate {
                users: names
                    .into_iter()
                    .map(|username| RosterUser { username, user_id: None })
                    .collect(),
                count,
            })
        }),
    ]
}

proptest! {
    #[test]
    fn prop_log_is_append_only(events in prop::collection::vec(inbound_strategy(), 0..40)) {
        let mut client = Client::new();
        client.handle(ClientEvent::SubmitJoin { username: "alice".to_string(), now: Instant::now() });

        let mut lengths = Vec::new();
        for event in events {
            let appends = matches!(
                event,
                InboundEvent::ReceiveMessage(_) | InboundEvent::UserJoined(_) | InboundEvent::UserLeft(_)
            );
            let before = client.log().len();
            client.handle(ClientEvent::Server(event));
            let after = client.log().len();

            prop_assert_eq!(after, if appends { before + 1 } else { before });
            lengths.push(after);
        }

        prop_assert!(lengths.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn prop_roster_mirrors_the_latest_snapshot(
        snapshots in prop::collection::vec(
            (prop::collection::vec(name_strategy(), 0..6), 0usize..10),
            1..10,
        )
    ) {
        let mut client = Client::new();

        let mut last = None;
        for (names, count) in snapshots {
            let update = RosterUpdate {
                users: names
                    .into_iter()
                    .map(|username| RosterUser { username, user_id: None })
                    .collect(),
                count,
            };
            client.handle(ClientEvent::Server(InboundEvent::OnlineUsersUpdate(update.clone())));
            last = Some(update);
        }

        let Some(last) = last else {
            return Ok(());
        };
        prop_assert_eq!(client.roster().users(), last.users.as_slice());
        prop_assert_eq!(client.roster().count(), last.count);
    }

    #[test]
    fn prop_keystroke_burst_yields_exactly_one_stop(
        gaps_ms in prop::collection::vec(0u64..1000, 1..15)
    ) {
        let t0 = Instant::now();
        let mut client = Client::new();
        client.handle(ClientEvent::SubmitJoin { username: "alice".to_string(), now: t0 });

        // Keystrokes spaced under the quiet interval: the debounce keeps
        // re-arming, so only the final deadline survives.
        let mut at = t0;
        for gap in gaps_ms {
            at += Duration::from_millis(gap);
            client.handle(ClientEvent::Keystroke { now: at });
        }

        let mut stops = 0;
        for tick_ms in (0..4000u64).step_by(50) {
            let actions = client.handle(ClientEvent::Tick { now: at + Duration::from_millis(tick_ms) });
            stops += actions
                .iter()
                .filter(|a| {
                    matches!(
                        a,
                        ClientAction::Emit(OutboundEvent::Typing(Typing { is_typing: false }))
                    )
                })
                .count();

            if stops > 0 {
                prop_assert!(Duration::from_millis(tick_ms) >= TYPING_STOP_DELAY);
            }
        }

        prop_assert_eq!(stops, 1);
    }
}
