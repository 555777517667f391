// presence-bridge: translates a vendor IM network's session events into a
// normalized presence/message model, and answers presence queries by
// rendering that state as an image, an XML document, or plain text.
// Transport on both sides (vendor wire protocol, local protocol delivery,
// HTTP) belongs to the host server and is out of scope here.

pub mod config;
pub mod gateway;
pub mod models;
pub mod query;

// Re-export the main types for convenience
pub use config::GatewayConfig;
pub use gateway::{EventTranslator, VendorEvent, VendorStatus};
pub use models::*;
pub use query::{PresenceQueryService, RendererDispatch, ResourceCache};
