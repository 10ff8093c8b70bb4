//! Deterministic virtual time.
//!
//! A single timer queue that doubles as the clock. Nothing fires on its own:
//! the driver pops due timers with [`VirtualScheduler::pop_due`] and hands
//! them to whoever owns them. Clones share the same queue and clock.

use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use autoslide_core::{
    application::ports::{Clock, Scheduler},
    domain::TimerHandle,
};
use serde::Serialize;
use tracing::trace;

/// Counters for checking the single-timer invariant after a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SchedulerStats {
    /// Timers ever scheduled (repeating and one-shot).
    pub armed: usize,
    /// Cancel calls that hit a live timer.
    pub cancelled: usize,
    /// Timer expiries delivered.
    pub fired: usize,
    /// Highest number of repeating timers alive at once.
    pub max_live_repeating: usize,
}

#[derive(Debug, Clone, Copy)]
struct PendingTimer {
    due: Duration,
    period: Option<Duration>,
}

#[derive(Debug, Default)]
struct Inner {
    now: Duration,
    next_id: u64,
    timers: BTreeMap<TimerHandle, PendingTimer>,
    stats: SchedulerStats,
}

impl Inner {
    fn schedule(&mut self, delay: Duration, period: Option<Duration>) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle::new(self.next_id);
        self.timers.insert(
            handle,
            PendingTimer {
                due: self.now.saturating_add(delay),
                period,
            },
        );
        self.stats.armed += 1;
        let live = self.live_repeating();
        self.stats.max_live_repeating = self.stats.max_live_repeating.max(live);
        handle
    }

    fn live_repeating(&self) -> usize {
        self.timers.values().filter(|t| t.period.is_some()).count()
    }

    /// Earliest due timer, ties broken by arming order.
    fn earliest(&self) -> Option<(TimerHandle, PendingTimer)> {
        self.timers
            .iter()
            .min_by_key(|(handle, timer)| (timer.due, **handle))
            .map(|(handle, timer)| (*handle, *timer))
    }
}

/// Virtual clock plus timer queue.
#[derive(Debug, Clone, Default)]
pub struct VirtualScheduler {
    inner: Arc<Mutex<Inner>>,
}

impl VirtualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // Every mutation leaves `Inner` consistent, so a poisoned guard is still usable.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Pop the next timer due at or before `until`, moving the clock to its
    /// due time. Repeating timers are re-queued one period later.
    pub fn pop_due(&self, until: Duration) -> Option<(Duration, TimerHandle)> {
        let mut inner = self.lock();
        let (handle, timer) = inner.earliest()?;
        if timer.due > until {
            return None;
        }

        inner.now = inner.now.max(timer.due);
        // A repeat that would land past the end of representable time is dropped.
        let next_due = timer
            .period
            .filter(|p| !p.is_zero())
            .and_then(|p| timer.due.checked_add(p));
        match next_due {
            Some(due) => {
                inner.timers.insert(
                    handle,
                    PendingTimer {
                        due,
                        period: timer.period,
                    },
                );
            }
            None => {
                inner.timers.remove(&handle);
            }
        }
        inner.stats.fired += 1;
        trace!(%handle, at_ms = timer.due.as_millis() as u64, "Virtual timer fired");
        Some((timer.due, handle))
    }

    /// Move the clock forward to `t` without firing anything. Never moves
    /// backwards.
    pub fn advance_to(&self, t: Duration) {
        let mut inner = self.lock();
        inner.now = inner.now.max(t);
    }

    /// Fire every timer due up to `until` in time order, then park the clock
    /// at `until`. Returns the handles that fired.
    pub fn run_until(&self, until: Duration, mut on_fire: impl FnMut(TimerHandle)) -> Vec<TimerHandle> {
        let mut fired = Vec::new();
        while let Some((_, handle)) = self.pop_due(until) {
            on_fire(handle);
            fired.push(handle);
        }
        self.advance_to(until);
        fired
    }

    /// Due time of the earliest live timer.
    pub fn next_due(&self) -> Option<Duration> {
        self.lock().earliest().map(|(_, timer)| timer.due)
    }

    pub fn is_live(&self, handle: TimerHandle) -> bool {
        self.lock().timers.contains_key(&handle)
    }

    pub fn live_repeating(&self) -> usize {
        self.lock().live_repeating()
    }

    pub fn stats(&self) -> SchedulerStats {
        self.lock().stats
    }
}

impl Scheduler for VirtualScheduler {
    fn schedule_repeating(&self, period: Duration) -> TimerHandle {
        self.lock().schedule(period, Some(period))
    }

    fn schedule_once(&self, delay: Duration) -> TimerHandle {
        self.lock().schedule(delay, None)
    }

    fn cancel(&self, handle: TimerHandle) {
        let mut inner = self.lock();
        if inner.timers.remove(&handle).is_some() {
            inner.stats.cancelled += 1;
        }
    }
}

impl Clock for VirtualScheduler {
    fn now(&self) -> Duration {
        self.lock().now
    }
}
