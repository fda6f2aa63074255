//! In-memory test doubles for the shell's collaborators.

pub mod engine;
pub mod surfaces;

pub use engine::MockEngineSession;
pub use surfaces::RecordingSurfaceHost;
