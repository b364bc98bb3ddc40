//! Cancelable one-shot timers driven by an external clock
//!
//! The owner passes the current time in milliseconds; nothing here reads a
//! wall clock. Repeating behavior is built by rescheduling from the handler,
//! which keeps every timer cancelable between firings.

/// Handle returned by `schedule`, used to cancel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone)]
struct Entry<K> {
    handle: TimerHandle,
    due_ms: u64,
    kind: K,
}

/// Pending timers, fired in due order (ties in scheduling order)
#[derive(Debug, Clone)]
pub struct Timers<K> {
    entries: Vec<Entry<K>>,
    next_handle: u64,
}

impl<K> Default for Timers<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_handle: 1,
        }
    }
}

impl<K: Clone> Timers<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire `kind` once `delay_ms` has elapsed after `now_ms`
    pub fn schedule(&mut self, now_ms: u64, delay_ms: u64, kind: K) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        let due_ms = now_ms.saturating_add(delay_ms);

        // Stable insert keeps equal deadlines in scheduling order
        let idx = self.entries.partition_point(|e| e.due_ms <= due_ms);
        self.entries.insert(idx, Entry { handle, due_ms, kind });
        handle
    }

    /// Cancel a pending timer. Returns false if it already fired or was canceled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        match self.entries.iter().position(|e| e.handle == handle) {
            Some(idx) => {
                self.entries.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Cancel everything
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.entries.iter().any(|e| e.handle == handle)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pop the earliest timer due at or before `now_ms`.
    ///
    /// Also returns the time it was due, so a handler that reschedules can
    /// chain from the deadline instead of from a late frame.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<(TimerHandle, u64, K)> {
        match self.entries.first() {
            Some(e) if e.due_ms <= now_ms => {
                let entry = self.entries.remove(0);
                Some((entry.handle, entry.due_ms, entry.kind))
            }
            _ => None,
        }
    }
}
