//! Stateful screen orchestrator.
//!
//! [`ScreenController`] owns the current [`ActiveScreen`] value and is its
//! only writer. Transitions come out of the pure decision tables in
//! [`crate::screen::state_machine`]; the controller turns them into ordered
//! surface transactions and publishes the new active screen.
//!
//! Ordering contract: the authoritative active-screen value is updated
//! BEFORE the surface transaction is applied, so observers never see a
//! stale value during a transition. Within a transaction, shows commit
//! before hides (see [`crate::surfaces`]).

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info};

use crate::input::{KeyPhase, RemoteKey, RemoteKeyEvent};
use crate::screen::state_machine::{
    next_state_on_back_press, next_state_on_menu_press, ActiveScreen, Transition,
};
use crate::session::SessionRepo;
use crate::settings::SettingsScreen;
use crate::surfaces::{SurfaceHost, SurfaceId, SurfaceTransaction};
use crate::traits::UrlClassifier;
use crate::urls::APP_URL_HOME;

/// Where a URL was typed, for input routing decisions upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlInputLocation {
    Home,
    Menu,
}

/// Autocomplete outcome attached to text input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutocompleteResult {
    pub text: String,
    pub source: String,
    pub total_items: usize,
}

pub struct ScreenController {
    session_repo: Arc<SessionRepo>,
    url_classifier: Arc<dyn UrlClassifier>,
    active_screen_tx: watch::Sender<ActiveScreen>,
}

impl ScreenController {
    pub fn new(session_repo: Arc<SessionRepo>, url_classifier: Arc<dyn UrlClassifier>) -> Self {
        let (active_screen_tx, _) = watch::channel(ActiveScreen::NavigationOverlay);
        Self {
            session_repo,
            url_classifier,
            active_screen_tx,
        }
    }

    /// Replay-latest stream of the active screen. De-duplicated: the same
    /// value is never announced twice in a row.
    pub fn current_active_screen(&self) -> watch::Receiver<ActiveScreen> {
        self.active_screen_tx.subscribe()
    }

    pub fn active_screen(&self) -> ActiveScreen {
        *self.active_screen_tx.borrow()
    }

    /// Register all top-level surfaces up front so every later transition
    /// can assume they exist and use show/hide only. The overlay is added
    /// last so it takes focus. Called exactly once per session lifetime.
    pub fn set_up_initial_surfaces(&self, surfaces: &mut dyn SurfaceHost) {
        surfaces.apply(
            SurfaceTransaction::new()
                .add(SurfaceId::Render)
                .add(SurfaceId::Overlay),
        );
        self.publish(ActiveScreen::NavigationOverlay);
    }

    /// Resolve typed text and navigate to it.
    ///
    /// Blank input short-circuits. When `is_text_input` is true both
    /// `autocomplete_result` and `input_location` are required; their
    /// absence is a programmer error, not a recoverable runtime case.
    /// Non-text input events carry their context at the source (e.g. home
    /// tile clicks).
    pub fn handle_url_entered(
        &self,
        surfaces: &mut dyn SurfaceHost,
        url_text: &str,
        is_text_input: bool,
        autocomplete_result: Option<&AutocompleteResult>,
        input_location: Option<UrlInputLocation>,
    ) {
        if url_text.trim().is_empty() {
            return;
        }

        if is_text_input {
            assert!(
                autocomplete_result.is_some(),
                "expected autocomplete result for text input"
            );
            assert!(
                input_location.is_some(),
                "expected input location for text input"
            );
        }

        let is_url = self.url_classifier.is_url(url_text);
        let resolved = if is_url {
            self.url_classifier.normalize(url_text)
        } else {
            self.url_classifier.create_search_url(url_text)
        };

        info!(input = url_text, url = %resolved, is_url, "url entered");
        self.show_browser_for_url(surfaces, &resolved);
    }

    /// Open the given settings sub-screen.
    pub fn show_settings(&self, surfaces: &mut dyn SurfaceHost, screen: SettingsScreen) {
        let transition = match screen {
            SettingsScreen::DataCollection => Transition::AddSettingsData,
            SettingsScreen::ClearCookies => Transition::AddSettingsCookies,
            SettingsScreen::FxaProfile => Transition::AddFxaProfile,
        };
        self.apply_transition(surfaces, transition);
    }

    /// Switch to the render screen unless the session sits on the built-in
    /// home surface. Reads the live engine URL, so the check also holds
    /// before the first session-state snapshot is published.
    pub fn show_browser_for_current_session(&self, surfaces: &mut dyn SurfaceHost) {
        if self.session_repo.session_url() != APP_URL_HOME {
            self.apply_transition(surfaces, Transition::ShowBrowser);
        }
    }

    /// Switch to the render screen and load `url`, unconditionally.
    pub fn show_browser_for_url(&self, surfaces: &mut dyn SurfaceHost, url: &str) {
        self.apply_transition(surfaces, Transition::ShowBrowser);
        self.session_repo.load_url(url);
    }

    /// Directly show or hide the overlay, bypassing the transition table.
    pub fn set_overlay_visible(&self, surfaces: &mut dyn SurfaceHost, visible: bool) {
        let screen = if visible {
            ActiveScreen::NavigationOverlay
        } else {
            ActiveScreen::WebRender
        };
        self.publish(screen);
        self.show_overlay_surface(surfaces, visible);
    }

    /// Route a remote key event.
    ///
    /// The menu key is intercepted globally: key-down runs the menu
    /// transition and key-up is always swallowed so one physical press is
    /// handled exactly once. Everything else goes to the active surface;
    /// settings/profile screens do not consume here (their own widgets do).
    pub fn dispatch_key_event(
        &self,
        surfaces: &mut dyn SurfaceHost,
        event: RemoteKeyEvent,
    ) -> bool {
        if event.key == RemoteKey::Menu {
            return match event.phase {
                KeyPhase::Down => self.handle_menu_press(surfaces),
                KeyPhase::Up => true,
            };
        }

        match self.active_screen() {
            ActiveScreen::WebRender => surfaces.dispatch_key(SurfaceId::Render, event),
            ActiveScreen::NavigationOverlay => surfaces.dispatch_key(SurfaceId::Overlay, event),
            _ => false,
        }
    }

    /// Handle a back press. Returns true if the press was consumed; false
    /// means the caller should exit the app.
    ///
    /// On the render screen an in-page back step takes priority and fully
    /// consumes the press without consulting the state machine.
    pub fn handle_back_press(&self, surfaces: &mut dyn SurfaceHost) -> bool {
        if self.active_screen() == ActiveScreen::WebRender && self.session_repo.attempt_back(false)
        {
            return true;
        }

        let transition =
            next_state_on_back_press(self.active_screen(), self.session_repo.back_enabled());
        self.apply_transition(surfaces, transition)
    }

    /// Handle a menu press. Returns true if the press was consumed.
    pub fn handle_menu_press(&self, surfaces: &mut dyn SurfaceHost) -> bool {
        let on_home = self
            .session_repo
            .current_url()
            .map(|url| url == APP_URL_HOME)
            .unwrap_or(false);
        let transition = next_state_on_menu_press(self.active_screen(), on_home);
        self.apply_transition(surfaces, transition)
    }

    /// Apply a transition: publish the new active screen, then perform the
    /// surface changes. Returns false only for `ExitApp`.
    fn apply_transition(&self, surfaces: &mut dyn SurfaceHost, transition: Transition) -> bool {
        debug!(?transition, current = ?self.active_screen(), "screen transition");
        match transition {
            Transition::AddOverlay => {
                self.publish(ActiveScreen::NavigationOverlay);
                self.show_overlay_surface(surfaces, true);
            }
            Transition::RemoveOverlay => {
                self.publish(ActiveScreen::WebRender);
                self.show_overlay_surface(surfaces, false);
            }
            Transition::AddSettingsData | Transition::AddSettingsCookies => {
                self.publish(ActiveScreen::Settings);
                surfaces.apply(
                    SurfaceTransaction::new()
                        .add(SurfaceId::Settings)
                        .hide(SurfaceId::Overlay),
                );
            }
            Transition::AddFxaProfile => {
                self.publish(ActiveScreen::FxaProfile);
                surfaces.apply(
                    SurfaceTransaction::new()
                        .add(SurfaceId::Profile)
                        .hide(SurfaceId::Overlay),
                );
            }
            Transition::RemoveSettings => {
                self.publish(ActiveScreen::NavigationOverlay);
                self.remove_settings_surface(surfaces, SurfaceId::Settings);
            }
            Transition::RemoveFxaProfile => {
                self.publish(ActiveScreen::NavigationOverlay);
                self.remove_settings_surface(surfaces, SurfaceId::Profile);
            }
            Transition::ShowBrowser => {
                self.publish(ActiveScreen::WebRender);
                let mut txn = SurfaceTransaction::new()
                    .show(SurfaceId::Render)
                    .hide(SurfaceId::Overlay);
                // The settings container may or may not be mounted.
                for settings in [SurfaceId::Settings, SurfaceId::Profile] {
                    if surfaces.is_mounted(settings) {
                        txn = txn.remove(settings);
                    }
                }
                surfaces.apply(txn);
            }
            Transition::ExitApp => return false,
            Transition::NoOp => return true,
        }
        true
    }

    fn show_overlay_surface(&self, surfaces: &mut dyn SurfaceHost, to_show: bool) {
        if to_show {
            // Navigating while a video is fullscreened renders unstably, and
            // most browsers hide chrome during fullscreen anyway, so leave
            // fullscreen before any navigation option becomes reachable.
            // Best effort: the overlay comes up either way.
            let _ = self.session_repo.exit_fullscreen_if_active();
            surfaces.apply(SurfaceTransaction::new().show(SurfaceId::Overlay));
        } else {
            surfaces.apply(SurfaceTransaction::new().hide(SurfaceId::Overlay));
        }
    }

    /// Unmount a settings-container surface and bring the overlay back.
    /// Nothing to do when the surface is not mounted (expected absence).
    fn remove_settings_surface(&self, surfaces: &mut dyn SurfaceHost, surface: SurfaceId) {
        let mut txn = SurfaceTransaction::new().show(SurfaceId::Overlay);
        if surfaces.is_mounted(surface) {
            txn = txn.remove(surface);
        }
        surfaces.apply(txn);
    }

    /// Update the authoritative value first; the watch channel drops
    /// duplicate values so consecutive identical screens notify once.
    fn publish(&self, screen: ActiveScreen) {
        self.active_screen_tx.send_if_modified(|current| {
            if *current != screen {
                *current = screen;
                true
            } else {
                false
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::adapters::mock::{MockEngineSession, RecordingSurfaceHost};
    use crate::session::SessionRepo;
    use crate::surfaces::SurfaceOp;
    use crate::traits::engine::EngineSession;
    use crate::turbo::TurboMode;
    use crate::url_tools::DefaultUrlClassifier;

    fn controller_with(url: &str) -> (Arc<MockEngineSession>, ScreenController) {
        let engine = Arc::new(MockEngineSession::new(url));
        let repo = Arc::new(SessionRepo::new(engine.clone(), TurboMode::new(true)));
        repo.update();
        let classifier = Arc::new(DefaultUrlClassifier::new(
            "https://search.example/?q=%s".to_string(),
        ));
        (engine, ScreenController::new(repo, classifier))
    }

    fn autocomplete() -> AutocompleteResult {
        AutocompleteResult {
            text: "mozilla.org".into(),
            source: "default".into(),
            total_items: 1,
        }
    }

    #[test]
    fn test_initial_screen_is_overlay() {
        let (_engine, controller) = controller_with("https://a.example/");
        assert_eq!(controller.active_screen(), ActiveScreen::NavigationOverlay);
    }

    #[test]
    fn test_set_up_initial_surfaces_adds_overlay_last() {
        let (_engine, controller) = controller_with("https://a.example/");
        let mut host = RecordingSurfaceHost::new();

        controller.set_up_initial_surfaces(&mut host);

        assert_eq!(
            host.ops(),
            vec![
                SurfaceOp::Add(SurfaceId::Render),
                SurfaceOp::Add(SurfaceId::Overlay),
            ]
        );
        assert_eq!(controller.active_screen(), ActiveScreen::NavigationOverlay);
    }

    #[test]
    fn test_handle_url_entered_blank_is_noop() {
        let (engine, controller) = controller_with("https://a.example/");
        let mut host = RecordingSurfaceHost::new();

        controller.handle_url_entered(
            &mut host,
            "   ",
            true,
            Some(&autocomplete()),
            Some(UrlInputLocation::Home),
        );

        assert!(host.ops().is_empty(), "blank input must not touch surfaces");
        assert!(engine.loaded_urls().is_empty());
        assert_eq!(controller.active_screen(), ActiveScreen::NavigationOverlay);
    }

    #[test]
    fn test_handle_url_entered_direct_url() {
        let (engine, controller) = controller_with("https://a.example/");
        let mut host = RecordingSurfaceHost::new();

        controller.handle_url_entered(
            &mut host,
            "mozilla.org",
            true,
            Some(&autocomplete()),
            Some(UrlInputLocation::Home),
        );

        assert_eq!(controller.active_screen(), ActiveScreen::WebRender);
        assert_eq!(engine.loaded_urls(), vec!["http://mozilla.org/"]);
    }

    #[test]
    fn test_handle_url_entered_search_query() {
        let (engine, controller) = controller_with("https://a.example/");
        let mut host = RecordingSurfaceHost::new();

        controller.handle_url_entered(
            &mut host,
            "best tv shows",
            false,
            None,
            None,
        );

        assert_eq!(
            engine.loaded_urls(),
            vec!["https://search.example/?q=best+tv+shows"]
        );
    }

    #[test]
    #[should_panic(expected = "expected autocomplete result for text input")]
    fn test_text_input_requires_autocomplete_result() {
        let (_engine, controller) = controller_with("https://a.example/");
        let mut host = RecordingSurfaceHost::new();
        controller.handle_url_entered(
            &mut host,
            "mozilla.org",
            true,
            None,
            Some(UrlInputLocation::Home),
        );
    }

    #[test]
    #[should_panic(expected = "expected input location for text input")]
    fn test_text_input_requires_input_location() {
        let (_engine, controller) = controller_with("https://a.example/");
        let mut host = RecordingSurfaceHost::new();
        controller.handle_url_entered(
            &mut host,
            "mozilla.org",
            true,
            Some(&autocomplete()),
            None,
        );
    }

    #[test]
    fn test_show_settings_maps_sub_screens() {
        let cases = [
            (SettingsScreen::DataCollection, ActiveScreen::Settings),
            (SettingsScreen::ClearCookies, ActiveScreen::Settings),
            (SettingsScreen::FxaProfile, ActiveScreen::FxaProfile),
        ];
        for (sub_screen, expected) in cases {
            let (_engine, controller) = controller_with("https://a.example/");
            let mut host = RecordingSurfaceHost::new();
            controller.show_settings(&mut host, sub_screen);
            assert_eq!(controller.active_screen(), expected, "{sub_screen:?}");
        }
    }

    #[test]
    fn test_settings_transaction_adds_before_hiding_overlay() {
        let (_engine, controller) = controller_with("https://a.example/");
        let mut host = RecordingSurfaceHost::new();
        controller.set_up_initial_surfaces(&mut host);
        host.clear_ops();

        controller.show_settings(&mut host, SettingsScreen::DataCollection);

        assert_eq!(
            host.ops(),
            vec![
                SurfaceOp::Add(SurfaceId::Settings),
                SurfaceOp::Hide(SurfaceId::Overlay),
            ]
        );
    }

    #[test]
    fn test_show_browser_for_current_session_noop_on_home() {
        let (_engine, controller) = controller_with(crate::urls::APP_URL_HOME);
        let mut host = RecordingSurfaceHost::new();

        controller.show_browser_for_current_session(&mut host);

        assert_eq!(controller.active_screen(), ActiveScreen::NavigationOverlay);
        assert!(host.ops().is_empty());
    }

    #[test]
    fn test_show_browser_for_current_session_on_home_before_first_update() {
        // No snapshot published yet: the home check must still hold.
        let engine = Arc::new(MockEngineSession::new(crate::urls::APP_URL_HOME));
        let repo = Arc::new(SessionRepo::new(engine, TurboMode::new(true)));
        let classifier = Arc::new(DefaultUrlClassifier::new(
            "https://search.example/?q=%s".to_string(),
        ));
        let controller = ScreenController::new(repo, classifier);
        let mut host = RecordingSurfaceHost::new();

        controller.show_browser_for_current_session(&mut host);

        assert_eq!(controller.active_screen(), ActiveScreen::NavigationOverlay);
        assert!(host.ops().is_empty());
    }

    #[test]
    fn test_show_browser_for_current_session_switches_off_home() {
        let (_engine, controller) = controller_with("https://a.example/");
        let mut host = RecordingSurfaceHost::new();

        controller.show_browser_for_current_session(&mut host);

        assert_eq!(controller.active_screen(), ActiveScreen::WebRender);
    }

    #[test]
    fn test_show_browser_removes_mounted_settings() {
        let (_engine, controller) = controller_with("https://a.example/");
        let mut host = RecordingSurfaceHost::new();
        controller.set_up_initial_surfaces(&mut host);
        controller.show_settings(&mut host, SettingsScreen::DataCollection);
        host.clear_ops();

        controller.show_browser_for_url(&mut host, "https://b.example/");

        assert_eq!(
            host.ops(),
            vec![
                SurfaceOp::Show(SurfaceId::Render),
                SurfaceOp::Hide(SurfaceId::Overlay),
                SurfaceOp::Remove(SurfaceId::Settings),
            ]
        );
    }

    #[test]
    fn test_set_overlay_visible_exits_fullscreen_first() {
        let (engine, controller) = controller_with("https://a.example/");
        engine.set_fullscreen(true);
        let mut host = RecordingSurfaceHost::new();
        controller.set_up_initial_surfaces(&mut host);
        controller.set_overlay_visible(&mut host, false);

        controller.set_overlay_visible(&mut host, true);

        assert!(!engine.fullscreen(), "fullscreen must be exited best-effort");
        assert_eq!(controller.active_screen(), ActiveScreen::NavigationOverlay);
    }

    #[test]
    fn test_back_on_overlay_exits_app_keeps_screen() {
        let (_engine, controller) = controller_with("https://a.example/");
        let mut host = RecordingSurfaceHost::new();
        controller.set_up_initial_surfaces(&mut host);
        host.clear_ops();

        let consumed = controller.handle_back_press(&mut host);

        assert!(!consumed, "exit-app press is not consumed");
        assert_eq!(controller.active_screen(), ActiveScreen::NavigationOverlay);
        assert!(host.ops().is_empty());
    }

    #[test]
    fn test_back_on_render_without_history_opens_overlay() {
        let (_engine, controller) = controller_with("https://a.example/");
        let mut host = RecordingSurfaceHost::new();
        controller.set_up_initial_surfaces(&mut host);
        controller.set_overlay_visible(&mut host, false);

        let consumed = controller.handle_back_press(&mut host);

        assert!(consumed);
        assert_eq!(controller.active_screen(), ActiveScreen::NavigationOverlay);
    }

    #[test]
    fn test_back_on_render_prefers_in_page_back() {
        let (engine, controller) = controller_with("https://a.example/");
        engine.set_can_go_back(true);
        let mut host = RecordingSurfaceHost::new();
        controller.set_up_initial_surfaces(&mut host);
        controller.set_overlay_visible(&mut host, false);
        host.clear_ops();

        let consumed = controller.handle_back_press(&mut host);

        assert!(consumed);
        assert_eq!(engine.back_calls(), 1, "in-page back must be taken");
        assert_eq!(controller.active_screen(), ActiveScreen::WebRender);
        assert!(host.ops().is_empty(), "state machine must not be consulted");
    }

    #[test]
    fn test_back_on_settings_returns_to_overlay() {
        let (_engine, controller) = controller_with("https://a.example/");
        let mut host = RecordingSurfaceHost::new();
        controller.set_up_initial_surfaces(&mut host);
        controller.show_settings(&mut host, SettingsScreen::ClearCookies);
        host.clear_ops();

        let consumed = controller.handle_back_press(&mut host);

        assert!(consumed);
        assert_eq!(controller.active_screen(), ActiveScreen::NavigationOverlay);
        assert_eq!(
            host.ops(),
            vec![
                SurfaceOp::Show(SurfaceId::Overlay),
                SurfaceOp::Remove(SurfaceId::Settings),
            ]
        );
    }

    #[test]
    fn test_menu_toggles_overlay() {
        let (_engine, controller) = controller_with("https://a.example/");
        let mut host = RecordingSurfaceHost::new();
        controller.set_up_initial_surfaces(&mut host);

        assert!(controller.handle_menu_press(&mut host));
        assert_eq!(controller.active_screen(), ActiveScreen::WebRender);

        assert!(controller.handle_menu_press(&mut host));
        assert_eq!(controller.active_screen(), ActiveScreen::NavigationOverlay);
    }

    #[test]
    fn test_menu_key_down_transitions_key_up_swallowed() {
        let (_engine, controller) = controller_with("https://a.example/");
        let mut host = RecordingSurfaceHost::new();
        controller.set_up_initial_surfaces(&mut host);
        controller.show_settings(&mut host, SettingsScreen::DataCollection);
        host.clear_ops();

        let down_consumed = controller
            .dispatch_key_event(&mut host, RemoteKeyEvent::down(RemoteKey::Menu));
        assert!(down_consumed);
        assert_eq!(controller.active_screen(), ActiveScreen::NavigationOverlay);

        let ops_after_down = host.ops().len();
        let up_consumed =
            controller.dispatch_key_event(&mut host, RemoteKeyEvent::up(RemoteKey::Menu));
        assert!(up_consumed, "key-up of the same press is always consumed");
        assert_eq!(host.ops().len(), ops_after_down, "no further transition");
    }

    #[test]
    fn test_other_keys_route_to_active_surface() {
        let (_engine, controller) = controller_with("https://a.example/");
        let mut host = RecordingSurfaceHost::new();
        controller.set_up_initial_surfaces(&mut host);
        host.set_key_consumed(true);

        let event = RemoteKeyEvent::down(RemoteKey::DpadDown);
        assert!(controller.dispatch_key_event(&mut host, event));
        assert_eq!(host.dispatched_keys(), vec![(SurfaceId::Overlay, event)]);

        controller.set_overlay_visible(&mut host, false);
        assert!(controller.dispatch_key_event(&mut host, event));
        assert_eq!(host.dispatched_keys().last(), Some(&(SurfaceId::Render, event)));
    }

    #[test]
    fn test_keys_not_consumed_on_settings_screen() {
        let (_engine, controller) = controller_with("https://a.example/");
        let mut host = RecordingSurfaceHost::new();
        controller.set_up_initial_surfaces(&mut host);
        controller.show_settings(&mut host, SettingsScreen::DataCollection);
        host.set_key_consumed(true);

        let event = RemoteKeyEvent::down(RemoteKey::Center);
        assert!(!controller.dispatch_key_event(&mut host, event));
        assert!(host.dispatched_keys().is_empty());
    }

    #[tokio::test]
    async fn test_active_screen_stream_replays_and_deduplicates() {
        let (_engine, controller) = controller_with("https://a.example/");
        let mut host = RecordingSurfaceHost::new();
        controller.set_up_initial_surfaces(&mut host);

        controller.set_overlay_visible(&mut host, false);
        let mut rx = controller.current_active_screen();
        assert_eq!(
            *rx.borrow_and_update(),
            ActiveScreen::WebRender,
            "new subscribers immediately receive the latest value"
        );

        // Re-publishing the same value must not notify.
        controller.set_overlay_visible(&mut host, false);
        assert!(!rx.has_changed().unwrap());

        controller.set_overlay_visible(&mut host, true);
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), ActiveScreen::NavigationOverlay);
    }
}
