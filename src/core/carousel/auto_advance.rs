//=========================================================================
// Auto-Advance Timer
//=========================================================================
//
// Repeating interval for hands-free slide advancement.
//
// The timer is polled by the tick loop rather than owning a thread; the
// single logic thread stays the only place state mutates. Cancellation is
// idempotent and follows the same scoped acquire/release discipline as
// observation detach: started on mount, cancelled unconditionally on
// unmount.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::{Duration, Instant};

//=== AutoAdvance =========================================================

/// A repeating timer driving `CyclicIndex::next` on a fixed period.
///
/// After a host stall the timer fires at most once per poll and
/// reschedules from the poll instant; a slideshow never fast-forwards
/// through missed periods.
#[derive(Debug, Clone, Copy)]
pub struct AutoAdvance {
    period: Duration,
    next_due: Option<Instant>,
}

impl AutoAdvance {
    /// Creates a stopped timer with the given period.
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next_due: None,
        }
    }

    /// Starts (or restarts) the timer; the first fire is one full period
    /// from `now`.
    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now + self.period);
    }

    /// Stops the timer. Idempotent; a cancelled timer never fires again
    /// until restarted.
    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    /// Returns whether the timer is currently running.
    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// Pushes the next fire one full period past `now` without firing.
    ///
    /// Used to hold the slideshow still after a manual interaction.
    pub fn defer(&mut self, now: Instant) {
        if self.next_due.is_some() {
            self.next_due = Some(now + self.period);
        }
    }

    /// Polls the timer. Returns `true` when the period elapsed, at most
    /// once per call, rescheduling from `now`.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                self.next_due = Some(now + self.period);
                true
            }
            _ => false,
        }
    }

    /// The configured period.
    pub fn period(&self) -> Duration {
        self.period
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    //--- Test Helpers -----------------------------------------------------

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    /// Tests the timer fires once per elapsed period.
    #[test]
    fn fires_on_period_boundary() {
        let t0 = Instant::now();
        let mut timer = AutoAdvance::new(secs(5));
        timer.start(t0);

        assert!(!timer.fire_if_due(t0));
        assert!(!timer.fire_if_due(t0 + secs(4)));
        assert!(timer.fire_if_due(t0 + secs(5)));
        assert!(!timer.fire_if_due(t0 + secs(6)), "rescheduled from the fire");
        assert!(timer.fire_if_due(t0 + secs(11)));
    }

    /// Tests a stall fires once, not once per missed period.
    #[test]
    fn stall_does_not_burst() {
        let t0 = Instant::now();
        let mut timer = AutoAdvance::new(secs(5));
        timer.start(t0);

        // Host froze for 60 seconds: exactly one fire, next due 5s later.
        let resumed = t0 + secs(60);
        assert!(timer.fire_if_due(resumed));
        assert!(!timer.fire_if_due(resumed + secs(4)));
        assert!(timer.fire_if_due(resumed + secs(5)));
    }

    /// Tests cancel is idempotent and silences the timer.
    #[test]
    fn cancel_is_idempotent() {
        let t0 = Instant::now();
        let mut timer = AutoAdvance::new(secs(5));
        timer.start(t0);

        timer.cancel();
        timer.cancel(); // second call is a no-op

        assert!(!timer.is_running());
        assert!(!timer.fire_if_due(t0 + secs(100)));
    }

    /// Tests a never-started timer does not fire.
    #[test]
    fn stopped_timer_never_fires() {
        let mut timer = AutoAdvance::new(secs(5));
        assert!(!timer.fire_if_due(Instant::now() + secs(100)));
    }

    /// Tests defer pushes the next fire without firing.
    #[test]
    fn defer_postpones_next_fire() {
        let t0 = Instant::now();
        let mut timer = AutoAdvance::new(secs(5));
        timer.start(t0);

        // Manual interaction at t+4 holds the slideshow.
        timer.defer(t0 + secs(4));
        assert!(!timer.fire_if_due(t0 + secs(5)));
        assert!(timer.fire_if_due(t0 + secs(9)));
    }

    /// Tests defer on a stopped timer stays stopped.
    #[test]
    fn defer_on_stopped_timer_is_noop() {
        let mut timer = AutoAdvance::new(secs(5));
        timer.defer(Instant::now());
        assert!(!timer.is_running());
    }
}
