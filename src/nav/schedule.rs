//! Keyed one-shot tasks.
//!
//! Each task is keyed by its purpose. Arming a key replaces whatever was
//! pending under that key, so a stale delayed effect can never fire after a
//! newer one has been requested. Nothing sleeps: the owner polls
//! [`Scheduler::take_due`] once per frame with the current time.

use std::collections::HashMap;
use std::time::Instant;

use super::PageId;

/// Purpose of a scheduled task. At most one task per key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKey {
    /// Swap the visible page once the book has had time to close.
    PageSwap,
    /// Reveal the auxiliary decoration after the dwell time.
    AuxiliaryReveal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    SwapTo(PageId),
    RevealAuxiliary,
}

impl Task {
    pub fn key(&self) -> TaskKey {
        match self {
            Task::SwapTo(_) => TaskKey::PageSwap,
            Task::RevealAuxiliary => TaskKey::AuxiliaryReveal,
        }
    }
}

#[derive(Debug, Default)]
pub struct Scheduler {
    pending: HashMap<TaskKey, (Instant, Task)>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm `task` to fire at `at`, cancelling any pending task with the same key.
    pub fn arm(&mut self, at: Instant, task: Task) {
        if let Some((_, prev)) = self.pending.insert(task.key(), (at, task)) {
            log::debug!("Re-armed {:?}, dropped {:?}", task.key(), prev);
        }
    }

    /// Cancel the pending task for `key`. Returns the cancelled task, if any.
    pub fn cancel(&mut self, key: TaskKey) -> Option<Task> {
        self.pending.remove(&key).map(|(_, task)| task)
    }

    pub fn pending(&self, key: TaskKey) -> Option<Task> {
        self.pending.get(&key).map(|(_, task)| *task)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Remove and return every task due at `now`, earliest first.
    pub fn take_due(&mut self, now: Instant) -> Vec<Task> {
        let mut due: Vec<(Instant, Task)> = Vec::new();
        self.pending.retain(|_, (at, task)| {
            if *at <= now {
                due.push((*at, *task));
                false
            } else {
                true
            }
        });
        due.sort_by_key(|(at, _)| *at);
        due.into_iter().map(|(_, task)| task).collect()
    }
}
