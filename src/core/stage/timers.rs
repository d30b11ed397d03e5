//=========================================================================
// Timer Registry
//=========================================================================
//
// Handle-scoped registry of auto-advance timers.
//
// Components schedule timers through their stage context; the engine
// polls the registry once per tick and delivers fired handles back to
// components. Cancellation by handle is idempotent, so the stage can
// force-cancel leftovers on unmount without caring whether the component
// already cleaned up.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::time::{Duration, Instant};

use log::debug;

//=== Internal Dependencies ===============================================

use crate::core::carousel::AutoAdvance;

//=== TimerHandle =========================================================

/// Handle to a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle {
    id: u64,
}

//=== Timers ==============================================================

/// Registry of running auto-advance timers.
pub struct Timers {
    entries: HashMap<u64, AutoAdvance>,
    fired: Vec<TimerHandle>,
    next_id: u64,
}

impl Timers {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            fired: Vec::new(),
            next_id: 0,
        }
    }

    /// Schedules a repeating timer; the first fire is one period from
    /// `now`.
    pub fn schedule(&mut self, period: Duration, now: Instant) -> TimerHandle {
        let id = self.next_id;
        self.next_id += 1;

        let mut timer = AutoAdvance::new(period);
        timer.start(now);
        self.entries.insert(id, timer);

        debug!("Timer {} scheduled with period {:?}", id, period);
        TimerHandle { id }
    }

    /// Cancels a timer. Idempotent; unknown handles are ignored.
    pub fn cancel(&mut self, handle: TimerHandle) {
        if self.entries.remove(&handle.id).is_some() {
            debug!("Timer {} cancelled", handle.id);
        }
    }

    /// Pushes a timer's next fire one full period past `now` (manual
    /// interaction holding an auto-advancing slider still).
    pub fn defer(&mut self, handle: TimerHandle, now: Instant) {
        if let Some(timer) = self.entries.get_mut(&handle.id) {
            timer.defer(now);
        }
    }

    /// Returns whether a handle refers to a live timer.
    pub fn is_running(&self, handle: TimerHandle) -> bool {
        self.entries.contains_key(&handle.id)
    }

    /// Returns the number of live timers.
    pub fn timer_count(&self) -> usize {
        self.entries.len()
    }

    /// Polls all timers against `now`, returning the handles that fired
    /// this tick in stable (scheduling) order.
    pub fn poll(&mut self, now: Instant) -> &[TimerHandle] {
        self.fired.clear();
        for (&id, timer) in self.entries.iter_mut() {
            if timer.fire_if_due(now) {
                self.fired.push(TimerHandle { id });
            }
        }
        self.fired.sort_by_key(|h| h.id);
        &self.fired
    }
}

impl Default for Timers {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
