// Inbound side of the gateway: vendor session events in, normalized
// packets out. One EventTranslator per vendor session; the status table
// and the text decoder are stateless and shared freely.

pub mod decoder;
pub mod status;
pub mod translator;

pub use decoder::{TextDecoder, VendorTextDecoder};
pub use status::{map_status, VendorStatus};
pub use translator::{EventTranslator, FriendUpdate, PacketSink, SinkError, VendorEvent};
