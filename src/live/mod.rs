//! Live Update Channel
//!
//! The mounted dashboard's WebSocket side: the browser pushes parameter
//! changes up, the server pushes recomputed chart overlays back down.
//!
//! - [`messages`]: client/server message protocol
//! - [`registry`]: session bookkeeping and the per-session send channel
//! - [`handler`]: axum upgrade handler and connection lifecycle

pub mod handler;
pub mod messages;
pub mod registry;

pub use handler::ws_handler;
pub use messages::{ClientMessage, ServerMessage};
pub use registry::{RegistryConfig, RegistryError, SessionId, SessionRegistry};
