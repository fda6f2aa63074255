//! Browsing-session state: the reactive projection of the engine session
//! plus the one-shot event channel.

pub mod repo;
pub mod state;

pub use repo::{BackTwiceProbe, SessionEvent, SessionRepo};
pub use state::SessionState;
