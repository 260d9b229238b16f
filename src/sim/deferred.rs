//! Epoch-tagged deferred actions
//!
//! Timed follow-ups (a fake platform collapsing into a level restart) are
//! queued with the level epoch current when they were scheduled. When one
//! comes due after the layout has already been replaced, the epochs differ
//! and the tick drops it.

/// What to do when the timer expires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredKind {
    /// Rebuild the given level from scratch
    RegenerateLevel { level: u32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Deferred {
    pub kind: DeferredKind,
    pub due_ms: f64,
    /// Level epoch at scheduling time
    pub epoch: u64,
}

impl Deferred {
    /// Still refers to the layout that is currently live
    pub fn is_current(&self, epoch: u64) -> bool {
        self.epoch == epoch
    }
}

/// Pending deferred actions in scheduling order
#[derive(Debug, Clone, Default)]
pub struct DeferredQueue {
    pending: Vec<Deferred>,
}

impl DeferredQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, kind: DeferredKind, due_ms: f64, epoch: u64) {
        self.pending.push(Deferred {
            kind,
            due_ms,
            epoch,
        });
    }

    /// Remove and return every action due at `now_ms`, oldest first
    pub fn take_due(&mut self, now_ms: f64) -> Vec<Deferred> {
        let (due, pending): (Vec<_>, Vec<_>) = self
            .pending
            .drain(..)
            .partition(|action| action.due_ms <= now_ms);
        self.pending = pending;
        due
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drop everything (restart, teardown)
    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }
}
