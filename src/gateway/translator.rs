// Translation of vendor session events into normalized outbound packets.
//
// The vendor session layer produces a wide, irregular stream of event kinds;
// only four of them have a normalized representation on the local protocol
// (chat messages, friend status updates, friend added/removed). Everything
// else is surfaced as a log record and dropped. The dispatch below matches
// every kind explicitly so that a new vendor event kind shows up as a
// compile error here rather than vanishing into a default branch.

use log::{debug, error, info, warn};
use thiserror::Error;
use tokio::sync::mpsc;

use crate::gateway::decoder::TextDecoder;
use crate::gateway::status::{map_status, VendorStatus};
use crate::models::{
    NormalizedMessage, NormalizedPresence, OutboundPacket, SubscriptionChange, SubscriptionEvent,
};

/// One friend entry carried by a friend-list update.
#[derive(Debug, Clone)]
pub struct FriendUpdate {
    pub id: String,
    pub status: VendorStatus,
    pub custom_text: Option<String>,
}

/// Every event kind the vendor session layer can deliver.
///
/// Kinds without a normalized representation still appear here; the
/// translator logs them and produces nothing. That narrowness is policy,
/// not an oversight.
#[derive(Debug)]
pub enum VendorEvent {
    Message { from: String, raw_body: String },
    OfflineMessage { from: String, raw_body: String },
    FriendListUpdate { from: String, friends: Vec<FriendUpdate> },
    FriendAdded { from: String },
    FriendRemoved { from: String },
    FileTransferOffer { from: String, filename: String },
    ConnectionClosed,
    ContactListSnapshot { friends: Vec<String> },
    NewMail { count: u32 },
    Notify { from: String, kind: String },
    Buzz { from: String },
    ContactRequest { from: String },
    ContactRejection { from: String },
    ConferenceInvite { room: String, from: String },
    ConferenceDecline { room: String, from: String },
    ConferenceLogon { room: String, from: String },
    ConferenceLogoff { room: String, from: String },
    ConferenceMessage { room: String, from: String },
    ChatRoomLogon { room: String, from: String },
    ChatRoomLogoff { room: String, from: String },
    ChatRoomMessage { room: String, from: String },
    ChatRoomUserUpdate { room: String, from: String },
    ChatConnectionClosed,
    TransportError { code: u32, detail: String },
    TransportException { detail: String, cause: anyhow::Error },
}

/// Raised by a sink that cannot take a packet right now. The translator
/// logs it and moves on; it never reaches the session.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SinkError {
    #[error("outbound queue is full")]
    Full,
    #[error("outbound queue is closed")]
    Closed,
}

/// Accepts normalized packets for delivery over the local protocol.
/// Implementations must not block; the translator runs on the session's
/// event context.
pub trait PacketSink {
    fn deliver(&self, packet: OutboundPacket) -> Result<(), SinkError>;
}

impl PacketSink for mpsc::Sender<OutboundPacket> {
    fn deliver(&self, packet: OutboundPacket) -> Result<(), SinkError> {
        self.try_send(packet).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => SinkError::Full,
            mpsc::error::TrySendError::Closed(_) => SinkError::Closed,
        })
    }
}

/// Per-session translator. Each vendor session owns one; nothing here is
/// shared across sessions.
pub struct EventTranslator<S, D> {
    /// Local identifier of the session owner; the `to` of every packet.
    session_owner: String,
    /// Transport domain used to turn vendor identifiers into local ones.
    domain: String,
    decoder: D,
    sink: S,
}

impl<S: PacketSink, D: TextDecoder> EventTranslator<S, D> {
    pub fn new(session_owner: &str, domain: &str, decoder: D, sink: S) -> Self {
        EventTranslator {
            session_owner: session_owner.to_string(),
            domain: domain.to_string(),
            decoder,
            sink,
        }
    }

    /// Convert a vendor identifier into a local one. Vendor identifiers are
    /// case-insensitive; the local protocol's are not.
    fn local_id(&self, vendor_id: &str) -> String {
        format!("{}@{}", vendor_id.trim().to_lowercase(), self.domain)
    }

    /// Handle one vendor session event, emitting zero or more normalized
    /// packets. Never fails: sink backpressure and transport faults are
    /// logged here and absorbed.
    pub fn handle_event(&self, event: VendorEvent) {
        match event {
            VendorEvent::Message { from, raw_body } => {
                let message = NormalizedMessage {
                    from: self.local_id(&from),
                    to: self.session_owner.clone(),
                    body: self.decoder.decode(&raw_body),
                };
                self.send(OutboundPacket::Message(message));
            }
            VendorEvent::FriendListUpdate { from, friends } => {
                debug!(
                    "Friend list update from {} with {} entries",
                    from,
                    friends.len()
                );
                // One presence per entry, in the order the vendor sent them.
                for friend in friends {
                    let presence = NormalizedPresence {
                        from: self.local_id(&friend.id),
                        to: self.session_owner.clone(),
                        state: map_status(friend.status),
                        status_text: friend.custom_text,
                    };
                    self.send(OutboundPacket::Presence(presence));
                }
            }
            VendorEvent::FriendAdded { from } => {
                self.send_subscription(&from, SubscriptionChange::Subscribed);
            }
            VendorEvent::FriendRemoved { from } => {
                self.send_subscription(&from, SubscriptionChange::Unsubscribed);
            }
            VendorEvent::OfflineMessage { from, raw_body } => {
                debug!(
                    "Ignoring offline message from {} ({} raw bytes)",
                    from,
                    raw_body.len()
                );
            }
            VendorEvent::FileTransferOffer { from, filename } => {
                info!("Ignoring file transfer offer from {}: {}", from, filename);
            }
            VendorEvent::ConnectionClosed => {
                info!("Vendor session connection closed for {}", self.session_owner);
            }
            VendorEvent::ContactListSnapshot { friends } => {
                info!("Received contact list snapshot ({} entries)", friends.len());
            }
            VendorEvent::NewMail { count } => {
                debug!("Ignoring new-mail notice ({} unread)", count);
            }
            VendorEvent::Notify { from, kind } => {
                debug!("Ignoring {} notify from {}", kind, from);
            }
            VendorEvent::Buzz { from } => {
                debug!("Ignoring buzz from {}", from);
            }
            VendorEvent::ContactRequest { from } => {
                debug!("Ignoring contact request from {}", from);
            }
            VendorEvent::ContactRejection { from } => {
                debug!("Ignoring contact rejection from {}", from);
            }
            VendorEvent::ConferenceInvite { room, from } => {
                debug!("Ignoring conference invite to {} from {}", room, from);
            }
            VendorEvent::ConferenceDecline { room, from } => {
                debug!("Ignoring conference decline for {} from {}", room, from);
            }
            VendorEvent::ConferenceLogon { room, from } => {
                debug!("Ignoring conference logon to {} by {}", room, from);
            }
            VendorEvent::ConferenceLogoff { room, from } => {
                debug!("Ignoring conference logoff from {} by {}", room, from);
            }
            VendorEvent::ConferenceMessage { room, from } => {
                debug!("Ignoring conference message in {} from {}", room, from);
            }
            VendorEvent::ChatRoomLogon { room, from } => {
                debug!("Ignoring chat room logon to {} by {}", room, from);
            }
            VendorEvent::ChatRoomLogoff { room, from } => {
                debug!("Ignoring chat room logoff from {} by {}", room, from);
            }
            VendorEvent::ChatRoomMessage { room, from } => {
                debug!("Ignoring chat room message in {} from {}", room, from);
            }
            VendorEvent::ChatRoomUserUpdate { room, from } => {
                debug!("Ignoring chat room user update in {} for {}", room, from);
            }
            VendorEvent::ChatConnectionClosed => {
                debug!("Vendor chat connection closed");
            }
            VendorEvent::TransportError { code, detail } => {
                error!("Vendor transport error {}: {}", code, detail);
            }
            VendorEvent::TransportException { detail, cause } => {
                // Logged with its cause and swallowed; the session goes on.
                error!("Vendor transport exception: {}: {:#}", detail, cause);
            }
        }
    }

    fn send_subscription(&self, vendor_id: &str, kind: SubscriptionChange) {
        let event = SubscriptionEvent {
            from: self.local_id(vendor_id),
            to: self.session_owner.clone(),
            kind,
        };
        self.send(OutboundPacket::Subscription(event));
    }

    fn send(&self, packet: OutboundPacket) {
        match self.sink.deliver(packet) {
            Ok(()) => {}
            Err(SinkError::Full) => {
                warn!("Failed to enqueue outbound packet: queue full");
            }
            Err(SinkError::Closed) => {
                // Expected during shutdown.
                debug!("Outbound packet queue closed, dropping packet");
            }
        }
    }
}
