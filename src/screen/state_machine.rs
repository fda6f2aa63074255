//! Pure decision tables for screen transitions.
//!
//! Both entry points are free of side effects: identical inputs always
//! produce identical outputs. The controller owns all state; this module
//! only answers "given the active screen and this input, what happens".

/// The single top-level surface currently presented to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveScreen {
    #[default]
    NavigationOverlay,
    WebRender,
    Settings,
    FxaProfile,
}

/// Named screen transitions, the output of the decision tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    AddOverlay,
    RemoveOverlay,
    AddSettingsData,
    AddSettingsCookies,
    RemoveSettings,
    AddFxaProfile,
    RemoveFxaProfile,
    ShowBrowser,
    ExitApp,
    NoOp,
}

/// Decide what a back press does.
///
/// `can_go_back_in_content` is only consulted on the render screen: a back
/// step already consumed by content navigation maps to `NoOp`, otherwise
/// the overlay comes up. A back press on the overlay always exits the app,
/// regardless of content history.
pub fn next_state_on_back_press(
    current: ActiveScreen,
    can_go_back_in_content: bool,
) -> Transition {
    match current {
        ActiveScreen::NavigationOverlay => Transition::ExitApp,
        ActiveScreen::WebRender => {
            if can_go_back_in_content {
                Transition::NoOp
            } else {
                Transition::AddOverlay
            }
        }
        ActiveScreen::Settings => Transition::RemoveSettings,
        ActiveScreen::FxaProfile => Transition::RemoveFxaProfile,
    }
}

/// Decide what a menu press does.
///
/// The menu key toggles the overlay; on settings screens it backs out to
/// the overlay. `is_on_home_url` is accepted for parity with the back table
/// but no row currently branches on it.
pub fn next_state_on_menu_press(current: ActiveScreen, _is_on_home_url: bool) -> Transition {
    match current {
        ActiveScreen::NavigationOverlay => Transition::RemoveOverlay,
        ActiveScreen::WebRender => Transition::AddOverlay,
        ActiveScreen::Settings => Transition::RemoveSettings,
        ActiveScreen::FxaProfile => Transition::RemoveFxaProfile,
    }
}
