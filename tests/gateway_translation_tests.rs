// End-to-end tests for the inbound translation side: vendor session events
// in, normalized packets out of the sink channel.

use anyhow::anyhow;
use tokio::sync::mpsc;

use presence_bridge::gateway::{EventTranslator, FriendUpdate, VendorEvent, VendorStatus, VendorTextDecoder};
use presence_bridge::models::{AvailabilityState, OutboundPacket, SubscriptionChange};

fn setup() -> (
    EventTranslator<mpsc::Sender<OutboundPacket>, VendorTextDecoder>,
    mpsc::Receiver<OutboundPacket>,
) {
    let (tx, rx) = mpsc::channel(32);
    let translator = EventTranslator::new(
        "owner@example.org",
        "vendor.example.org",
        VendorTextDecoder,
        tx,
    );
    (translator, rx)
}

fn drain(rx: &mut mpsc::Receiver<OutboundPacket>) -> Vec<OutboundPacket> {
    let mut packets = Vec::new();
    while let Ok(packet) = rx.try_recv() {
        packets.push(packet);
    }
    packets
}

#[test]
fn test_friend_list_update_emits_one_presence_per_friend_in_order() {
    let (translator, mut rx) = setup();

    translator.handle_event(VendorEvent::FriendListUpdate {
        from: "alice".to_string(),
        friends: vec![
            FriendUpdate {
                id: "alice".to_string(),
                status: VendorStatus::AVAILABLE,
                custom_text: None,
            },
            FriendUpdate {
                id: "bob".to_string(),
                status: VendorStatus::OUT_TO_LUNCH,
                custom_text: Some("back at one".to_string()),
            },
            FriendUpdate {
                id: "carol".to_string(),
                status: VendorStatus::OFFLINE,
                custom_text: None,
            },
        ],
    });

    let packets = drain(&mut rx);
    assert_eq!(packets.len(), 3);

    let presences: Vec<_> = packets
        .into_iter()
        .map(|p| match p {
            OutboundPacket::Presence(presence) => presence,
            other => panic!("Expected only presence packets, got {:?}", other),
        })
        .collect();

    // Input order is preserved, no deduplication or sorting.
    assert_eq!(presences[0].from, "alice@vendor.example.org");
    assert_eq!(presences[0].state, AvailabilityState::Available);
    assert_eq!(presences[0].status_text, None);

    assert_eq!(presences[1].from, "bob@vendor.example.org");
    assert_eq!(presences[1].state, AvailabilityState::ExtendedAway);
    assert_eq!(presences[1].status_text.as_deref(), Some("back at one"));

    assert_eq!(presences[2].from, "carol@vendor.example.org");
    assert_eq!(presences[2].state, AvailabilityState::Unavailable);

    for presence in &presences {
        assert_eq!(presence.to, "owner@example.org");
    }
}

#[test]
fn test_chat_message_is_decoded_and_emitted() {
    let (translator, mut rx) = setup();

    translator.handle_event(VendorEvent::Message {
        from: "Alice".to_string(),
        raw_body: "\u{1b}[1m<font face=\"Arial\">lunch?</font>".to_string(),
    });

    let packets = drain(&mut rx);
    assert_eq!(packets.len(), 1);
    match &packets[0] {
        OutboundPacket::Message(m) => {
            assert_eq!(m.from, "alice@vendor.example.org");
            assert_eq!(m.to, "owner@example.org");
            assert_eq!(m.body, "lunch?");
        }
        other => panic!("Expected a message packet, got {:?}", other),
    }
}

#[test]
fn test_friend_add_and_remove_emit_subscription_changes() {
    let (translator, mut rx) = setup();

    translator.handle_event(VendorEvent::FriendAdded {
        from: "dave".to_string(),
    });
    translator.handle_event(VendorEvent::FriendRemoved {
        from: "dave".to_string(),
    });

    let packets = drain(&mut rx);
    assert_eq!(packets.len(), 2);
    match (&packets[0], &packets[1]) {
        (OutboundPacket::Subscription(added), OutboundPacket::Subscription(removed)) => {
            assert_eq!(added.kind, SubscriptionChange::Subscribed);
            assert_eq!(removed.kind, SubscriptionChange::Unsubscribed);
            assert_eq!(added.from, "dave@vendor.example.org");
            assert_eq!(removed.from, "dave@vendor.example.org");
        }
        other => panic!("Expected two subscription packets, got {:?}", other),
    }
}

#[test]
fn test_transport_exception_emits_no_packets() {
    let (translator, mut rx) = setup();

    translator.handle_event(VendorEvent::TransportException {
        detail: "read loop died".to_string(),
        cause: anyhow!("connection reset by peer"),
    });

    assert!(drain(&mut rx).is_empty());
}

#[test]
fn test_diagnostic_only_events_emit_no_packets() {
    let (translator, mut rx) = setup();

    translator.handle_event(VendorEvent::Buzz {
        from: "alice".to_string(),
    });
    translator.handle_event(VendorEvent::NewMail { count: 4 });
    translator.handle_event(VendorEvent::ConferenceInvite {
        room: "weekly-sync".to_string(),
        from: "bob".to_string(),
    });
    translator.handle_event(VendorEvent::ChatRoomMessage {
        room: "lobby".to_string(),
        from: "carol".to_string(),
    });
    translator.handle_event(VendorEvent::ConnectionClosed);
    translator.handle_event(VendorEvent::TransportError {
        code: 42,
        detail: "server says no".to_string(),
    });

    assert!(drain(&mut rx).is_empty());
}
