//! UI-surface registry abstraction.
//!
//! The shell never talks to a GUI framework directly. Surface changes are
//! expressed as a [`SurfaceTransaction`] — an ordered batch of add/show/
//! hide/remove operations — and handed to a [`SurfaceHost`] for execution.
//! Within one transaction, adds and shows are always committed before hides
//! and removes so that input focus lands on the newly visible surface
//! rather than on a surface that is going away. That ordering is a hard
//! requirement of every transition, not an optimization.

use crate::input::RemoteKeyEvent;

/// The top-level surfaces the shell manages. All of them exist for the
/// whole session; visibility is controlled through show/hide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceId {
    /// The engine's render view.
    Render,
    /// The navigation overlay (URL bar, pinned tiles, nav buttons).
    Overlay,
    /// The settings screen. Mounted on demand, removed when left.
    Settings,
    /// The account profile screen. Shares the settings container.
    Profile,
}

/// A single operation on a named surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceOp {
    Add(SurfaceId),
    Show(SurfaceId),
    Hide(SurfaceId),
    Remove(SurfaceId),
}

impl SurfaceOp {
    /// Adds and shows commit before hides and removes.
    fn commits_first(&self) -> bool {
        matches!(self, SurfaceOp::Add(_) | SurfaceOp::Show(_))
    }
}

/// An atomic batch of surface operations.
///
/// Operations are recorded in call order but committed with all adds/shows
/// first (stable within each group). Build with the fluent methods and pass
/// the transaction to [`SurfaceHost::apply`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SurfaceTransaction {
    ops: Vec<SurfaceOp>,
}

impl SurfaceTransaction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, surface: SurfaceId) -> Self {
        self.ops.push(SurfaceOp::Add(surface));
        self
    }

    pub fn show(mut self, surface: SurfaceId) -> Self {
        self.ops.push(SurfaceOp::Show(surface));
        self
    }

    pub fn hide(mut self, surface: SurfaceId) -> Self {
        self.ops.push(SurfaceOp::Hide(surface));
        self
    }

    pub fn remove(mut self, surface: SurfaceId) -> Self {
        self.ops.push(SurfaceOp::Remove(surface));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// The operations in commit order: adds/shows first, then hides/removes,
    /// each group keeping its recording order.
    pub fn into_ordered_ops(self) -> Vec<SurfaceOp> {
        let (first, rest): (Vec<_>, Vec<_>) =
            self.ops.into_iter().partition(SurfaceOp::commits_first);
        first.into_iter().chain(rest).collect()
    }
}

/// Host executing surface transactions against the real UI toolkit.
///
/// Implementations must honor the commit order produced by
/// [`SurfaceTransaction::into_ordered_ops`].
pub trait SurfaceHost {
    /// Commit a batch of surface operations.
    fn apply(&mut self, txn: SurfaceTransaction);

    /// Route a key event to the named surface. Returns true if the surface
    /// consumed the event.
    fn dispatch_key(&mut self, surface: SurfaceId, event: RemoteKeyEvent) -> bool;

    /// Whether the surface is currently mounted (added and not removed).
    fn is_mounted(&self, surface: SurfaceId) -> bool;
}
