//! Adapter implementations of the collaborator traits.
//!
//! Real deployments bind the engine and surface host to the platform
//! toolkit; [`mock`] provides the in-memory doubles used by tests and the
//! demo binary.

pub mod mock;
