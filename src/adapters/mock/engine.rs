//! Mock engine session.
//!
//! Scripted flags plus call recording, so tests can both stage engine state
//! and assert which fire-and-forget commands the shell issued.

use std::sync::Mutex;

use crate::traits::EngineSession;

#[derive(Default)]
struct EngineState {
    current_url: String,
    loading: bool,
    can_go_back: bool,
    can_go_forward: bool,
    fullscreen: bool,
    desktop_mode: bool,
    thumbnail: Option<Vec<u8>>,
    loaded_urls: Vec<String>,
    back_calls: usize,
    forward_calls: usize,
    reload_calls: usize,
    clear_data_calls: usize,
}

pub struct MockEngineSession {
    state: Mutex<EngineState>,
}

impl MockEngineSession {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            state: Mutex::new(EngineState {
                current_url: url.into(),
                ..EngineState::default()
            }),
        }
    }

    pub fn set_current_url(&self, url: impl Into<String>) {
        self.lock().current_url = url.into();
    }

    pub fn set_loading(&self, loading: bool) {
        self.lock().loading = loading;
    }

    pub fn set_can_go_back(&self, value: bool) {
        self.lock().can_go_back = value;
    }

    pub fn set_can_go_forward(&self, value: bool) {
        self.lock().can_go_forward = value;
    }

    pub fn set_fullscreen(&self, value: bool) {
        self.lock().fullscreen = value;
    }

    pub fn set_thumbnail(&self, bytes: Option<Vec<u8>>) {
        self.lock().thumbnail = bytes;
    }

    /// URLs the shell asked the engine to load, in order.
    pub fn loaded_urls(&self) -> Vec<String> {
        self.lock().loaded_urls.clone()
    }

    pub fn back_calls(&self) -> usize {
        self.lock().back_calls
    }

    pub fn forward_calls(&self) -> usize {
        self.lock().forward_calls
    }

    pub fn reload_calls(&self) -> usize {
        self.lock().reload_calls
    }

    pub fn clear_data_calls(&self) -> usize {
        self.lock().clear_data_calls
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, EngineState> {
        self.state.lock().expect("mock engine lock poisoned")
    }
}

impl EngineSession for MockEngineSession {
    fn current_url(&self) -> String {
        self.lock().current_url.clone()
    }

    fn loading(&self) -> bool {
        self.lock().loading
    }

    fn can_go_back(&self) -> bool {
        self.lock().can_go_back
    }

    fn can_go_forward(&self) -> bool {
        self.lock().can_go_forward
    }

    fn fullscreen(&self) -> bool {
        self.lock().fullscreen
    }

    fn desktop_mode(&self) -> bool {
        self.lock().desktop_mode
    }

    fn thumbnail(&self) -> Option<Vec<u8>> {
        self.lock().thumbnail.clone()
    }

    fn go_back(&self) {
        self.lock().back_calls += 1;
    }

    fn go_forward(&self) {
        self.lock().forward_calls += 1;
    }

    fn reload(&self) {
        self.lock().reload_calls += 1;
    }

    fn set_desktop_mode(&self, active: bool) {
        self.lock().desktop_mode = active;
    }

    fn exit_fullscreen(&self) -> bool {
        let mut state = self.lock();
        let was_fullscreen = state.fullscreen;
        state.fullscreen = false;
        was_fullscreen
    }

    fn load_url(&self, url: &str) {
        self.lock().loaded_urls.push(url.to_string());
    }

    fn clear_browsing_data(&self) {
        self.lock().clear_data_calls += 1;
    }
}
