//! Trait abstractions for the shell's external collaborators.
//!
//! The embedded engine and the URL classifier are injected behind traits so
//! the orchestration logic can be exercised against in-memory doubles (see
//! [`crate::adapters::mock`]).
//!
//! # Traits
//!
//! - [`EngineSession`] - the engine-owned browsing session
//! - [`UrlClassifier`] - URL vs search-query classification

pub mod engine;
pub mod url_classifier;

pub use engine::EngineSession;
pub use url_classifier::UrlClassifier;
