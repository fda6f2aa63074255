//! Immutable session-state snapshot.

/// Value snapshot of the browsing session, published by
/// [`crate::session::SessionRepo`] whenever something changed.
///
/// Snapshots are never mutated in place; each change produces a new value,
/// and the repo guarantees consecutive published snapshots differ in at
/// least one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    /// True only if at least two steps of real history exist. The initial
    /// home entry occupies a history slot but is not a user-reachable back
    /// target, so this is NOT the engine's native can-go-back flag.
    pub back_enabled: bool,
    pub forward_enabled: bool,
    pub desktop_mode_active: bool,
    pub turbo_mode_active: bool,
    pub current_url: String,
    pub loading: bool,
}
