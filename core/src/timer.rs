//! One-shot timers with cancellation
//!
//! The engine's only self-scheduled work is the post-crash restart. Timers
//! are stored here instead of handed to a host callback so that cancelling
//! one is a data operation: once a handle is cancelled (or has fired) it can
//! never be returned by [`TimerQueue::pop_due`] again.

/// Identifies a scheduled timer. Never reused within a queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

impl TimerHandle {
    pub fn id(self) -> u64 {
        self.0
    }
}

#[derive(Debug)]
struct Entry<T> {
    handle: TimerHandle,
    fire_at: f64,
    payload: T,
}

/// Queue of pending one-shot timers, keyed by millisecond timestamps.
#[derive(Debug)]
pub struct TimerQueue<T> {
    entries: Vec<Entry<T>>,
    next_id: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `payload` to fire at `fire_at`.
    pub fn schedule(&mut self, fire_at: f64, payload: T) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            handle,
            fire_at,
            payload,
        });
        handle
    }

    /// Cancel a timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        match self.entries.iter().position(|e| e.handle == handle) {
            Some(idx) => {
                self.entries.swap_remove(idx);
                true
            }
            None => false,
        }
    }

    /// Cancel every pending timer.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// True if the timer is still waiting to fire.
    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.entries.iter().any(|e| e.handle == handle)
    }

    /// Earliest pending deadline.
    pub fn next_deadline(&self) -> Option<f64> {
        self.entries
            .iter()
            .map(|e| e.fire_at)
            .min_by(|a, b| a.total_cmp(b))
    }

    /// Remove and return the earliest timer due at `now`.
    ///
    /// Ties fire in scheduling order.
    pub fn pop_due(&mut self, now: f64) -> Option<(TimerHandle, T)> {
        let idx = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.fire_at <= now)
            .min_by(|(_, a), (_, b)| a.fire_at.total_cmp(&b.fire_at).then(a.handle.cmp(&b.handle)))
            .map(|(idx, _)| idx)?;
        let entry = self.entries.remove(idx);
        Some((entry.handle, entry.payload))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
