//! Remote-control input vocabulary.
//!
//! All input reaching the shell is already translated to remote-control
//! semantics: a [`RemoteKey`] plus a [`KeyPhase`]. The screen controller
//! intercepts [`RemoteKey::Menu`] globally and routes everything else to
//! whichever surface is currently active.

/// Keys on a TV remote that the shell cares about.
///
/// D-pad and media keys are routed to the active surface unchanged; the
/// shell itself only gives special treatment to `Menu` and `Back`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteKey {
    Menu,
    Back,
    DpadUp,
    DpadDown,
    DpadLeft,
    DpadRight,
    Center,
    MediaPlayPause,
    MediaRewind,
    MediaFastForward,
}

/// Whether the physical key is being pressed or released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPhase {
    Down,
    Up,
}

/// A single remote-control key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoteKeyEvent {
    pub key: RemoteKey,
    pub phase: KeyPhase,
}

impl RemoteKeyEvent {
    pub fn down(key: RemoteKey) -> Self {
        Self {
            key,
            phase: KeyPhase::Down,
        }
    }

    pub fn up(key: RemoteKey) -> Self {
        Self {
            key,
            phase: KeyPhase::Up,
        }
    }
}
