//! Work deferred until the host's current layout pass has settled.
//!
//! A value or ceiling write may change the track's rendered width, and the
//! host can only measure it after laying out again. Such writes queue a
//! relayout here; the host drains the queue from its next idle tick. The only
//! guarantee is "after the current synchronous batch".

use std::collections::VecDeque;

/// A unit of work queued for the host's next idle tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredTask {
    /// Recompute geometry and re-snap the handles.
    Relayout,
}

/// Queue of deferred tasks, drained by `SliderEngine::run_idle` with the
/// settled track width.
#[derive(Debug, Default)]
pub struct LayoutScheduler {
    pending: VecDeque<DeferredTask>,
}

impl LayoutScheduler {
    /// Queues a task. A task already waiting is not queued twice.
    pub fn schedule(&mut self, task: DeferredTask) {
        if !self.pending.contains(&task) {
            self.pending.push_back(task);
        }
    }

    /// Whether any task is queued.
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Removes and returns every queued task in order.
    pub fn take(&mut self) -> Vec<DeferredTask> {
        self.pending.drain(..).collect()
    }

    /// Drops every queued task.
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
