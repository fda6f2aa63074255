//! tvshell - application shell for a TV-oriented web browser
//!
//! This library exposes modules for use in integration tests.

pub mod adapters;
pub mod config;
pub mod error;
pub mod hint;
pub mod input;
pub mod screen;
pub mod session;
pub mod settings;
pub mod surfaces;
pub mod traits;
pub mod turbo;
pub mod url_tools;
pub mod urls;
