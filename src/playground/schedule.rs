//! Deferred work: callbacks for the next rendered frame and fixed-delay timers.

use std::time::{Duration, Instant};

use crate::playground::buffers::Pane;

/// Work to run once the next frame has been drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameTask {
    /// Re-layout and focus a pane that just became visible.
    ResizeAndFocus(Pane),
}

#[derive(Debug, Default)]
pub struct FrameQueue {
    pending: Vec<FrameTask>,
}

impl FrameQueue {
    pub fn request(&mut self, task: FrameTask) {
        self.pending.push(task);
    }

    /// Takes everything requested so far; later requests wait for the next frame.
    pub fn take(&mut self) -> Vec<FrameTask> {
        std::mem::take(&mut self.pending)
    }

    pub fn pending(&self) -> &[FrameTask] {
        &self.pending
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTask {
    /// Try wiring the action elements again.
    WireActions { attempt: u32 },
}

#[derive(Debug, Default)]
pub struct Timers {
    entries: Vec<(Instant, TimerTask)>,
}

impl Timers {
    pub fn schedule(&mut self, now: Instant, delay: Duration, task: TimerTask) {
        self.entries.push((now + delay, task));
    }

    /// Removes and returns every task due at `now`, earliest first.
    pub fn due(&mut self, now: Instant) -> Vec<TimerTask> {
        let mut due: Vec<(Instant, TimerTask)> = Vec::new();
        self.entries.retain(|&(at, task)| {
            if at <= now {
                due.push((at, task));
                false
            } else {
                true
            }
        });
        due.sort_by_key(|&(at, _)| at);
        due.into_iter().map(|(_, task)| task).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
