use std::cell::Cell;
use std::rc::Rc;

use crate::foundation::core::TimeMs;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// Ownership of a scheduled timer.
///
/// Dropping the handle cancels the timer, so a timer never outlives whatever holds its
/// handle. Handles are deliberately `!Send`: the queue lives on the single UI thread.
#[derive(Debug)]
#[must_use = "dropping a TimerHandle cancels the timer"]
pub struct TimerHandle {
    id: TimerId,
    alive: Rc<Cell<bool>>,
}

impl TimerHandle {
    pub fn id(&self) -> TimerId {
        self.id
    }

    pub fn is_active(&self) -> bool {
        self.alive.get()
    }

    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.alive.set(false);
    }
}

/// A timer that came due during [`TimerQueue::advance`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fired {
    pub id: TimerId,
    /// Scheduled due time (not the time `advance` was called).
    pub due: TimeMs,
}

#[derive(Debug)]
struct Entry {
    id: TimerId,
    due: TimeMs,
    period_ms: Option<u64>,
    alive: Rc<Cell<bool>>,
}

/// Cooperative timer queue driven by an explicit clock.
///
/// Nothing fires on its own: the host calls [`advance`](Self::advance) with the current time
/// and receives every due firing in chronological order (ties by schedule order). Intervals
/// that fall several periods behind fire once per missed period.
#[derive(Debug, Default)]
pub struct TimerQueue {
    next_id: u64,
    entries: Vec<Entry>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule_once(&mut self, now: TimeMs, delay_ms: u64) -> TimerHandle {
        self.push(now.after(delay_ms), None)
    }

    /// Fire every `period_ms`, first at `now + period_ms`. A zero period is treated as 1 ms.
    pub fn schedule_interval(&mut self, now: TimeMs, period_ms: u64) -> TimerHandle {
        let period_ms = period_ms.max(1);
        self.push(now.after(period_ms), Some(period_ms))
    }

    fn push(&mut self, due: TimeMs, period_ms: Option<u64>) -> TimerHandle {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let alive = Rc::new(Cell::new(true));
        self.entries.push(Entry {
            id,
            due,
            period_ms,
            alive: Rc::clone(&alive),
        });
        TimerHandle { id, alive }
    }

    pub fn advance(&mut self, now: TimeMs) -> Vec<Fired> {
        let mut fired = Vec::new();
        loop {
            self.entries.retain(|e| e.alive.get());
            let next = self
                .entries
                .iter()
                .enumerate()
                .filter(|(_, e)| e.due <= now)
                .min_by_key(|(_, e)| (e.due, e.id))
                .map(|(i, _)| i);
            let Some(i) = next else {
                break;
            };

            let entry = &mut self.entries[i];
            fired.push(Fired {
                id: entry.id,
                due: entry.due,
            });
            match entry.period_ms {
                Some(p) => entry.due = entry.due.after(p),
                None => {
                    entry.alive.set(false);
                }
            }
        }
        fired
    }

    /// Number of live timers.
    pub fn active_count(&self) -> usize {
        self.entries.iter().filter(|e| e.alive.get()).count()
    }

    /// Earliest pending due time.
    pub fn next_due(&self) -> Option<TimeMs> {
        self.entries
            .iter()
            .filter(|e| e.alive.get())
            .map(|e| e.due)
            .min()
    }

    /// Cancel every timer, including ones whose handles are still held elsewhere.
    pub fn clear(&mut self) {
        for e in self.entries.drain(..) {
            e.alive.set(false);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timer.rs"]
mod tests;
