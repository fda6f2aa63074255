//! Settings screen model.
//!
//! The settings container hosts three sub-screens; [`SettingsScreen`] is the
//! selector the screen controller maps onto transitions. [`SettingsModel`]
//! carries the data-collection toggle and the clear-data action, reporting
//! completion through a one-shot action event (the surface closes itself on
//! receipt, so the event must not replay).

use std::sync::Arc;

use tokio::sync::{broadcast, watch};
use tracing::info;

use crate::session::SessionRepo;

const ACTION_CHANNEL_CAPACITY: usize = 4;

/// Which settings sub-screen to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsScreen {
    DataCollection,
    ClearCookies,
    FxaProfile,
}

/// One-shot actions emitted by the settings model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsAction {
    SessionCleared,
}

pub struct SettingsModel {
    session_repo: Arc<SessionRepo>,
    data_collection_tx: watch::Sender<bool>,
    actions_tx: broadcast::Sender<SettingsAction>,
}

impl SettingsModel {
    pub fn new(session_repo: Arc<SessionRepo>, data_collection_enabled: bool) -> Self {
        let (data_collection_tx, _) = watch::channel(data_collection_enabled);
        let (actions_tx, _) = broadcast::channel(ACTION_CHANNEL_CAPACITY);
        Self {
            session_repo,
            data_collection_tx,
            actions_tx,
        }
    }

    pub fn data_collection_enabled(&self) -> watch::Receiver<bool> {
        self.data_collection_tx.subscribe()
    }

    pub fn set_data_collection_enabled(&self, enabled: bool) {
        info!(enabled, "data collection toggled");
        self.data_collection_tx.send_if_modified(|current| {
            if *current != enabled {
                *current = enabled;
                true
            } else {
                false
            }
        });
    }

    /// Fire-and-forget action stream. No replay to late subscribers.
    pub fn actions(&self) -> broadcast::Receiver<SettingsAction> {
        self.actions_tx.subscribe()
    }

    /// Wipe engine browsing data and announce completion.
    pub fn clear_browsing_data(&self) {
        self.session_repo.clear_browsing_data();
        let _ = self.actions_tx.send(SettingsAction::SessionCleared);
    }
}
