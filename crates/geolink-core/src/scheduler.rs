//! Deferred work requested by the handler.
//!
//! The handler never runs callbacks itself: it asks the host for a wake-up
//! and the host calls [`crate::PositionSyncHandler::fire`] with the returned
//! [`TaskId`] once the frame or timeout elapses.

use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(pub u64);

pub trait Scheduler {
    /// Wake on the next animation frame.
    fn request_frame(&mut self) -> TaskId;
    /// Wake once `delay` has elapsed.
    fn schedule_after(&mut self, delay: Duration) -> TaskId;
    /// Drop a pending wake-up. Unknown or already fired ids are ignored.
    fn cancel(&mut self, task: TaskId);
}

/// A single cancelable slot: at most one task pending, carrying a payload.
///
/// Requesting while a task is pending keeps the pending wake-up and replaces
/// its payload, so only the last request's payload is ever honored.
#[derive(Debug)]
pub struct TaskSlot<T> {
    pending: Option<(TaskId, T)>,
}

impl<T> Default for TaskSlot<T> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<T> TaskSlot<T> {
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn task(&self) -> Option<TaskId> {
        self.pending.as_ref().map(|(id, _)| *id)
    }

    /// Stores `payload`, calling `start` for a new wake-up only when none is
    /// pending.
    pub fn request(&mut self, payload: T, start: impl FnOnce() -> TaskId) -> TaskId {
        match &mut self.pending {
            Some((id, slot)) => {
                *slot = payload;
                *id
            }
            None => {
                let id = start();
                self.pending = Some((id, payload));
                id
            }
        }
    }

    /// Replaces any pending wake-up with a fresh one.
    pub fn restart<S: Scheduler + ?Sized>(
        &mut self,
        scheduler: &mut S,
        payload: T,
        delay: Duration,
    ) -> TaskId {
        self.cancel(scheduler);
        let id = scheduler.schedule_after(delay);
        self.pending = Some((id, payload));
        id
    }

    /// Takes the payload if `task` is the pending one. Stale ids yield `None`.
    pub fn complete(&mut self, task: TaskId) -> Option<T> {
        match &self.pending {
            Some((id, _)) if *id == task => self.pending.take().map(|(_, payload)| payload),
            _ => None,
        }
    }

    pub fn cancel<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if let Some((id, _)) = self.pending.take() {
            scheduler.cancel(id);
        }
    }
}
