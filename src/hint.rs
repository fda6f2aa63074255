//! Overlay hint visibility.
//!
//! The overlay shows a "press back" hint only while a real back target
//! exists. This model projects `back_enabled` out of the session-state
//! stream into its own de-duplicated replay-latest stream, so hint widgets
//! subscribe to exactly the bit they render.

use tokio::sync::watch;

use crate::session::SessionState;

pub struct OverlayHintModel {
    is_displayed_rx: watch::Receiver<bool>,
}

impl OverlayHintModel {
    /// Spawn the forwarding task mapping session state to hint visibility.
    /// The task ends when the session stream's sender is dropped.
    pub fn spawn(mut state_rx: watch::Receiver<Option<SessionState>>) -> Self {
        let initial = state_rx
            .borrow()
            .as_ref()
            .map(|s| s.back_enabled)
            .unwrap_or(false);
        let (tx, is_displayed_rx) = watch::channel(initial);

        tokio::spawn(async move {
            while state_rx.changed().await.is_ok() {
                let back_enabled = state_rx
                    .borrow_and_update()
                    .as_ref()
                    .map(|s| s.back_enabled)
                    .unwrap_or(false);
                tx.send_if_modified(|current| {
                    if *current != back_enabled {
                        *current = back_enabled;
                        true
                    } else {
                        false
                    }
                });
                if tx.is_closed() {
                    break;
                }
            }
        });

        Self { is_displayed_rx }
    }

    /// Replay-latest visibility stream for the hint bar.
    pub fn is_displayed(&self) -> watch::Receiver<bool> {
        self.is_displayed_rx.clone()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::adapters::mock::MockEngineSession;
    use crate::session::SessionRepo;
    use crate::turbo::TurboMode;

    #[tokio::test]
    async fn test_hint_follows_back_enabled() {
        let engine = Arc::new(MockEngineSession::new("https://a.example/"));
        let repo = Arc::new(SessionRepo::new(engine.clone(), TurboMode::new(true)));
        let hint = OverlayHintModel::spawn(repo.state());
        let mut rx = hint.is_displayed();
        assert!(!*rx.borrow_and_update());

        repo.set_back_twice_probe(Box::new(|| Some(true)));
        repo.update();

        rx.changed().await.unwrap();
        assert!(*rx.borrow_and_update());
    }

    #[tokio::test]
    async fn test_hint_ignores_unrelated_state_changes() {
        let engine = Arc::new(MockEngineSession::new("https://a.example/"));
        let repo = Arc::new(SessionRepo::new(engine.clone(), TurboMode::new(true)));
        repo.update();

        let hint = OverlayHintModel::spawn(repo.state());
        let mut rx = hint.is_displayed();
        rx.borrow_and_update();

        engine.set_loading(true);
        repo.update();
        // Give the forwarding task a chance to run.
        tokio::task::yield_now().await;
        tokio::task::yield_now().await;

        assert!(
            !rx.has_changed().unwrap(),
            "loading changes must not re-notify the hint"
        );
    }
}
