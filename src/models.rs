// Shared data model for the gateway core.
// Everything here is a plain value type: constructed once, handed to a sink
// or a renderer, and dropped. Nothing in this module is persisted.

/// The availability states this system distinguishes, independent of the
/// vendor network's status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AvailabilityState {
    Available,
    Away,
    DoNotDisturb,
    ExtendedAway,
    Unavailable,
}

impl AvailabilityState {
    /// Short lowercase name used in the XML and text renderings.
    pub fn as_str(&self) -> &'static str {
        match self {
            AvailabilityState::Available => "available",
            AvailabilityState::Away => "away",
            AvailabilityState::DoNotDisturb => "dnd",
            AvailabilityState::ExtendedAway => "xa",
            AvailabilityState::Unavailable => "unavailable",
        }
    }
}

/// A single user's presence as seen by one observer.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedPresence {
    /// Local identifier of the user the presence is about.
    pub from: String,
    /// Local identifier of the session owner observing it.
    pub to: String,
    pub state: AvailabilityState,
    /// Custom status text, when the vendor network carried one.
    pub status_text: Option<String>,
}

/// One decoded chat message headed for the local protocol.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedMessage {
    pub from: String,
    pub to: String,
    pub body: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionChange {
    Subscribed,
    Unsubscribed,
}

/// A roster subscription change reported by the vendor network.
#[derive(Debug, Clone, PartialEq)]
pub struct SubscriptionEvent {
    pub from: String,
    pub to: String,
    pub kind: SubscriptionChange,
}

/// The artifacts the translator hands to the outbound sink.
#[derive(Debug, Clone, PartialEq)]
pub enum OutboundPacket {
    Message(NormalizedMessage),
    Presence(NormalizedPresence),
    Subscription(SubscriptionEvent),
}

/// Outcome of a presence lookup. Malformed identifiers and directory
/// faults are folded into `NotFound`; callers never see the distinction.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult {
    Found(NormalizedPresence),
    NotFound,
}

/// Keys the resource cache serves icons under. One per availability state,
/// plus a separate "chat" slot that shares the available icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKey {
    State(AvailabilityState),
    Chat,
}

impl ResourceKey {
    /// Every key the cache pre-allocates a slot for.
    pub const ALL: [ResourceKey; 6] = [
        ResourceKey::State(AvailabilityState::Available),
        ResourceKey::State(AvailabilityState::Away),
        ResourceKey::State(AvailabilityState::DoNotDisturb),
        ResourceKey::State(AvailabilityState::ExtendedAway),
        ResourceKey::State(AvailabilityState::Unavailable),
        ResourceKey::Chat,
    ];
}
