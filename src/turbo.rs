//! Turbo mode toggle.
//!
//! Turbo mode is the user-facing name for tracking/ad blocking. The shell
//! only stores the flag and broadcasts changes; enforcing it is the
//! engine's job.

use tokio::sync::watch;

/// Watch-backed turbo-mode flag. Cloning shares the underlying channel.
#[derive(Clone)]
pub struct TurboMode {
    tx: watch::Sender<bool>,
}

impl TurboMode {
    pub fn new(enabled: bool) -> Self {
        let (tx, _) = watch::channel(enabled);
        Self { tx }
    }

    pub fn is_enabled(&self) -> bool {
        *self.tx.borrow()
    }

    /// Flip the flag. Observers are only notified on actual changes.
    pub fn set_enabled(&self, enabled: bool) {
        self.tx.send_if_modified(|current| {
            if *current != enabled {
                *current = enabled;
                true
            } else {
                false
            }
        });
    }

    /// Change-notification stream carrying the current value.
    pub fn receiver(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }
}

impl Default for TurboMode {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_read() {
        let turbo = TurboMode::new(true);
        assert!(turbo.is_enabled());
        turbo.set_enabled(false);
        assert!(!turbo.is_enabled());
    }

    #[tokio::test]
    async fn test_receiver_sees_changes() {
        let turbo = TurboMode::new(true);
        let mut rx = turbo.receiver();
        assert!(*rx.borrow_and_update());

        turbo.set_enabled(false);
        rx.changed().await.unwrap();
        assert!(!*rx.borrow_and_update());
    }

    #[test]
    fn test_redundant_set_does_not_notify() {
        let turbo = TurboMode::new(true);
        let mut rx = turbo.receiver();
        rx.borrow_and_update();

        turbo.set_enabled(true);
        assert!(!rx.has_changed().unwrap());
    }
}
