//! Live Updates
//!
//! Keeps the dashboard in sync with bookings made elsewhere.
//!
//! ## Architecture
//!
//! - **Channel**: read-only push transport (WebSocket)
//! - **Messages**: the `SET_INTERVIEW` update and the patch it produces
//! - **Listener**: background task consuming the channel, cancelled at
//!   dashboard teardown
//!
//! ## Wire format
//!
//! ```json
//! { "type": "SET_INTERVIEW", "id": 1, "interview": { "student": "Alice", "interviewer": 3 } }
//! { "type": "SET_INTERVIEW", "id": 1, "interview": null }
//! ```
//!
//! Any other frame is ignored.

mod channel;
mod listener;
mod messages;

pub use channel::{PushChannel, PushConnector, PushError, WsChannel, WsConnector};
pub use listener::{handle_message, ChannelState, ListenerHandle, LiveUpdateListener};
pub use messages::{set_interview_patch, PushMessage};
