// Bookkeeping for scheduled callbacks, kept free of browser types so it can
// be tested on the host.

use fnv::FnvHashMap;
use geolink_core::TaskId;

/// Live entries are pending wake-ups. A fired entry moves to `spent` and
/// stays there until the next fire, because its callback may still be on
/// the stack when it is retired.
pub struct TaskTable<P> {
    live: FnvHashMap<TaskId, P>,
    spent: Vec<P>,
}

impl<P> Default for TaskTable<P> {
    fn default() -> Self {
        Self {
            live: FnvHashMap::default(),
            spent: Vec::new(),
        }
    }
}

impl<P> TaskTable<P> {
    pub fn insert(&mut self, id: TaskId, pending: P) {
        self.live.insert(id, pending);
    }

    pub fn cancel(&mut self, id: TaskId) -> Option<P> {
        self.live.remove(&id)
    }

    /// Marks `id` as fired. Returns the entries retired by earlier fires,
    /// which are no longer running and may be dropped.
    pub fn retire(&mut self, id: TaskId) -> Vec<P> {
        let stale = std::mem::take(&mut self.spent);
        if let Some(done) = self.live.remove(&id) {
            self.spent.push(done);
        }
        stale
    }

    pub fn drain_live(&mut self) -> Vec<P> {
        self.live.drain().map(|(_, p)| p).collect()
    }

    pub fn live_len(&self) -> usize {
        self.live.len()
    }

    pub fn spent_len(&self) -> usize {
        self.spent.len()
    }
}
