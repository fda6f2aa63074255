//! Engine session trait abstraction.
//!
//! Everything hard — rendering, JavaScript, the network stack, process
//! isolation — lives behind this trait. The shell only reads session flags
//! and issues fire-and-forget navigation commands; it never awaits their
//! completion (the engine reports results through its own observer
//! machinery, which ends up re-invoking [`crate::session::SessionRepo::update`]).

/// The engine-owned browsing session the shell orchestrates.
///
/// Accessors reflect the engine's current view of the session; command
/// methods are fire-and-forget. Implementations must be callable from any
/// thread.
pub trait EngineSession: Send + Sync {
    /// URL of the current navigation entry.
    fn current_url(&self) -> String;

    /// Whether a page load is in progress.
    fn loading(&self) -> bool;

    /// The engine's native back-availability flag. Note this counts the
    /// initial home entry; UI-facing back availability goes through the
    /// session repo's probe instead.
    fn can_go_back(&self) -> bool;

    fn can_go_forward(&self) -> bool;

    /// Whether content is currently displayed fullscreen.
    fn fullscreen(&self) -> bool;

    /// Whether the session requests desktop-identifying pages.
    fn desktop_mode(&self) -> bool;

    /// Encoded screenshot of the current page, if the engine has one.
    fn thumbnail(&self) -> Option<Vec<u8>>;

    fn go_back(&self);

    fn go_forward(&self);

    fn reload(&self);

    fn set_desktop_mode(&self, active: bool);

    /// Leave fullscreen if content is fullscreen. Returns true if fullscreen
    /// was exited.
    fn exit_fullscreen(&self) -> bool;

    fn load_url(&self, url: &str);

    fn clear_browsing_data(&self);
}
