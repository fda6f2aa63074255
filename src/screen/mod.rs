//! Screen orchestration: which top-level surface is active and how
//! remote-control input moves between surfaces.
//!
//! - [`state_machine`] - pure decision tables for back/menu presses
//! - [`controller`] - stateful orchestrator applying the transitions

pub mod controller;
pub mod state_machine;

pub use controller::{AutocompleteResult, ScreenController, UrlInputLocation};
pub use state_machine::{ActiveScreen, Transition};
