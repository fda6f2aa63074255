//! Recording surface host.
//!
//! Applies transactions to an in-memory mounted-set and keeps the full
//! commit-ordered op log for assertions.

use crate::input::RemoteKeyEvent;
use crate::surfaces::{SurfaceHost, SurfaceId, SurfaceOp, SurfaceTransaction};

#[derive(Default)]
pub struct RecordingSurfaceHost {
    ops: Vec<SurfaceOp>,
    mounted: Vec<SurfaceId>,
    visible: Vec<SurfaceId>,
    dispatched_keys: Vec<(SurfaceId, RemoteKeyEvent)>,
    key_consumed: bool,
}

impl RecordingSurfaceHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// All ops applied so far, in commit order.
    pub fn ops(&self) -> Vec<SurfaceOp> {
        self.ops.clone()
    }

    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }

    pub fn is_visible(&self, surface: SurfaceId) -> bool {
        self.visible.contains(&surface)
    }

    pub fn dispatched_keys(&self) -> Vec<(SurfaceId, RemoteKeyEvent)> {
        self.dispatched_keys.clone()
    }

    /// Script whether surfaces report key events as consumed.
    pub fn set_key_consumed(&mut self, consumed: bool) {
        self.key_consumed = consumed;
    }
}

impl SurfaceHost for RecordingSurfaceHost {
    fn apply(&mut self, txn: SurfaceTransaction) {
        for op in txn.into_ordered_ops() {
            match op {
                SurfaceOp::Add(id) => {
                    if !self.mounted.contains(&id) {
                        self.mounted.push(id);
                    }
                    if !self.visible.contains(&id) {
                        self.visible.push(id);
                    }
                }
                SurfaceOp::Show(id) => {
                    if !self.visible.contains(&id) {
                        self.visible.push(id);
                    }
                }
                SurfaceOp::Hide(id) => {
                    self.visible.retain(|s| *s != id);
                }
                SurfaceOp::Remove(id) => {
                    self.mounted.retain(|s| *s != id);
                    self.visible.retain(|s| *s != id);
                }
            }
            self.ops.push(op);
        }
    }

    fn dispatch_key(&mut self, surface: SurfaceId, event: RemoteKeyEvent) -> bool {
        self.dispatched_keys.push((surface, event));
        self.key_consumed
    }

    fn is_mounted(&self, surface: SurfaceId) -> bool {
        self.mounted.contains(&surface)
    }
}
