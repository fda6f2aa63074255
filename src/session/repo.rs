//! Repository responsible for browsing-session state.
//!
//! [`SessionRepo`] projects the engine session and the turbo-mode flag into
//! a replay-latest, de-duplicated [`SessionState`] stream, and owns the
//! separate fire-and-forget [`SessionEvent`] channel. It is the only writer
//! of both; consumers hold read-only receivers.

use std::sync::{Arc, Mutex};

use tokio::sync::{broadcast, watch};
use tracing::debug;

use crate::session::SessionState;
use crate::traits::EngineSession;
use crate::turbo::TurboMode;
use crate::urls::{host_of, is_youtube_tv};

/// Capacity for the one-shot event channel. Events are consumed immediately
/// by live subscribers; the buffer only covers scheduling slack.
const EVENT_CHANNEL_CAPACITY: usize = 16;

/// One-shot signals for the YouTube TV web app's navigation quirks.
///
/// Delivered at most once per emission to each currently-subscribed
/// observer; never replayed, never de-duplicated. A subscriber created
/// after an emission does not see it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// Behave as if back was pressed inside the site.
    YouTubeBack,
    /// Fully exit the site.
    ExitYouTube,
}

/// Probe answering "do at least two steps of real history exist". Injected
/// by whoever tracks history, because the engine's native flag counts the
/// initial home entry.
pub type BackTwiceProbe = Box<dyn Fn() -> Option<bool> + Send + Sync>;

pub struct SessionRepo {
    engine: Arc<dyn EngineSession>,
    turbo: TurboMode,
    state_tx: watch::Sender<Option<SessionState>>,
    events_tx: broadcast::Sender<SessionEvent>,
    back_twice_probe: Mutex<Option<BackTwiceProbe>>,
    /// Serializes update(): host-change detection and snapshot dedup must
    /// never interleave between concurrent callers.
    update_guard: Mutex<UpdateGuard>,
}

#[derive(Default)]
struct UpdateGuard {
    previous_url_host: Option<String>,
}

impl SessionRepo {
    pub fn new(engine: Arc<dyn EngineSession>, turbo: TurboMode) -> Self {
        let (state_tx, _) = watch::channel(None);
        let (events_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            engine,
            turbo,
            state_tx,
            events_tx,
            back_twice_probe: Mutex::new(None),
            update_guard: Mutex::new(UpdateGuard::default()),
        }
    }

    /// Replay-latest state stream. `None` until the first update.
    pub fn state(&self) -> watch::Receiver<Option<SessionState>> {
        self.state_tx.subscribe()
    }

    /// Fire-and-forget event stream. Late subscribers miss past events.
    pub fn events(&self) -> broadcast::Receiver<SessionEvent> {
        self.events_tx.subscribe()
    }

    /// Install the real-history probe used for `back_enabled`.
    pub fn set_back_twice_probe(&self, probe: BackTwiceProbe) {
        *self.back_twice_probe.lock().expect("probe lock poisoned") = Some(probe);
    }

    /// Recompute and publish session state. Safe to call from any thread;
    /// concurrent calls are serialized.
    ///
    /// Side effect policy, evaluated in order: when the URL's host differs
    /// from the previous update (the first update always counts) and
    /// desktop mode is active, desktop mode is switched off and the page
    /// reloaded — desktop mode is scoped to a single site and must not
    /// leak across navigations to a different site.
    pub fn update(&self) {
        let mut guard = self.update_guard.lock().expect("update lock poisoned");

        let current_url = self.engine.current_url();
        if self.host_differs_from_previous(&mut guard, &current_url) && self.engine.desktop_mode()
        {
            debug!(url = %current_url, "host changed, resetting desktop mode");
            self.engine.set_desktop_mode(false);
            self.engine.load_url(&current_url);
        }

        let new_state = SessionState {
            back_enabled: self.can_go_back_twice().unwrap_or(false),
            forward_enabled: self.engine.can_go_forward(),
            desktop_mode_active: self.engine.desktop_mode(),
            turbo_mode_active: self.turbo.is_enabled(),
            current_url,
            loading: self.engine.loading(),
        };

        self.state_tx.send_if_modified(|current| {
            if current.as_ref() == Some(&new_state) {
                false
            } else {
                *current = Some(new_state);
                true
            }
        });
    }

    /// Re-emit the most recently published value, bypassing dedup. Used to
    /// reset consumer UI that drifted from the published state (e.g. edited
    /// URL bar text).
    pub fn push_current_value(&self) {
        self.state_tx.send_modify(|_| {});
    }

    /// Attempt an in-page or in-history back step.
    ///
    /// On YouTube TV the press turns into a one-shot event instead of a
    /// history step: `ExitYouTube` when `force_youtube_exit` holds,
    /// `YouTubeBack` otherwise. Returns true if the press was consumed.
    pub fn attempt_back(&self, force_youtube_exit: bool) -> bool {
        let on_youtube_tv = is_youtube_tv(&self.engine.current_url());
        if on_youtube_tv && force_youtube_exit {
            self.emit(SessionEvent::ExitYouTube);
            return true;
        }
        if on_youtube_tv {
            self.emit(SessionEvent::YouTubeBack);
            return true;
        }

        if self.engine.can_go_back() {
            self.exit_fullscreen_if_active();
            self.engine.go_back();
            return true;
        }

        false
    }

    pub fn go_forward(&self) {
        if self.engine.can_go_forward() {
            self.engine.go_forward();
        }
    }

    pub fn reload(&self) {
        self.engine.reload();
    }

    pub fn set_desktop_mode(&self, active: bool) {
        self.engine.set_desktop_mode(active);
    }

    pub fn load_url(&self, url: &str) {
        self.engine.load_url(url);
    }

    pub fn set_turbo_mode_enabled(&self, enabled: bool) {
        self.turbo.set_enabled(enabled);
    }

    /// Best-effort fullscreen exit before navigation; changing the URL while
    /// fullscreen leads to unstable rendering. Returns true if fullscreen
    /// was exited.
    pub fn exit_fullscreen_if_active(&self) -> bool {
        if self.engine.fullscreen() {
            self.engine.exit_fullscreen();
            return true;
        }
        false
    }

    pub fn clear_browsing_data(&self) {
        self.engine.clear_browsing_data();
    }

    /// Encoded screenshot of the current page, if the engine has one.
    pub fn current_url_screenshot(&self) -> Option<Vec<u8>> {
        self.engine.thumbnail()
    }

    /// The current snapshot's UI-facing back availability.
    pub fn back_enabled(&self) -> bool {
        self.state_tx
            .borrow()
            .as_ref()
            .map(|s| s.back_enabled)
            .unwrap_or(false)
    }

    /// The current snapshot's URL, if a snapshot was ever published.
    pub fn current_url(&self) -> Option<String> {
        self.state_tx.borrow().as_ref().map(|s| s.current_url.clone())
    }

    /// The engine's live URL, valid before the first published snapshot.
    pub fn session_url(&self) -> String {
        self.engine.current_url()
    }

    fn can_go_back_twice(&self) -> Option<bool> {
        self.back_twice_probe
            .lock()
            .expect("probe lock poisoned")
            .as_ref()
            .and_then(|probe| probe())
    }

    /// A URL without a parsable host always counts as different but leaves
    /// the remembered host alone, so a detour through an app-internal page
    /// does not look like a site change on the way back.
    fn host_differs_from_previous(&self, guard: &mut UpdateGuard, current_url: &str) -> bool {
        let Some(current_host) = host_of(current_url) else {
            return true;
        };
        let differs = guard.previous_url_host.as_deref() != Some(current_host.as_str());
        guard.previous_url_host = Some(current_host);
        differs
    }

    fn emit(&self, event: SessionEvent) {
        debug!(?event, "session event");
        // Send only fails when no subscriber is live, which is fine for
        // fire-and-forget signals.
        let _ = self.events_tx.send(event);
    }
}
