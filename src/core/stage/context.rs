//=========================================================================
// Stage Context
//=========================================================================
//
// What a component sees during its lifecycle callbacks.
//
// The context is the only path through which components acquire
// observations and timers. Everything acquired here is recorded against
// the owning component, which is what lets the stage force-release
// leftovers on unmount — the scoped acquire/release discipline that
// replaces the original's top-level scroll listeners.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::{Duration, Instant};

//=== Internal Dependencies ===============================================

use crate::core::host_bridge::{NavAction, NavEvent};
use crate::core::viewport::{GeometrySource, RegionId};
use crate::core::visibility::{
    ObservationHandle, ObserveOptions, RevealPhase, VisibilityTracker, VisibilityTransition,
};

use super::stage_manager::StageTransition;
use super::timers::{TimerHandle, Timers};
use super::ComponentKey;

//=== Acquired ============================================================

/// Resources a component has acquired and not yet released.
#[derive(Debug, Default)]
pub(super) struct Acquired {
    pub(super) observations: Vec<ObservationHandle>,
    pub(super) timers: Vec<TimerHandle>,
}

//=== StageContext ========================================================

/// Per-callback view of the engine's shared systems, scoped to one
/// component.
pub struct StageContext<'a, K: ComponentKey> {
    pub(super) now: Instant,
    pub(super) visibility: &'a mut VisibilityTracker,
    pub(super) timers: &'a mut Timers,
    pub(super) geometry: &'a dyn GeometrySource,
    pub(super) nav: &'a [NavEvent],
    pub(super) fired: &'a [TimerHandle],
    pub(super) transitions: &'a [VisibilityTransition],
    pub(super) acquired: &'a mut Acquired,
    pub(super) requests: &'a mut Vec<StageTransition<K>>,
}

impl<'a, K: ComponentKey> StageContext<'a, K> {
    //--- Acquisition ------------------------------------------------------

    /// Attaches an observation on `region`, recorded against this
    /// component for release on unmount.
    ///
    /// Unknown regions yield an inert handle, never an error.
    pub fn observe(&mut self, region: RegionId, options: ObserveOptions) -> ObservationHandle {
        let handle = self.visibility.attach(region, options, self.geometry);
        if !handle.is_detached() {
            self.acquired.observations.push(handle);
        }
        handle
    }

    /// Detaches an observation early (before unmount). Idempotent.
    pub fn release(&mut self, handle: ObservationHandle) {
        self.visibility.detach(handle);
        self.acquired.observations.retain(|h| *h != handle);
    }

    /// Schedules a repeating timer, recorded against this component for
    /// cancellation on unmount.
    pub fn schedule(&mut self, period: Duration) -> TimerHandle {
        let handle = self.timers.schedule(period, self.now);
        self.acquired.timers.push(handle);
        handle
    }

    /// Cancels a timer early (before unmount). Idempotent.
    pub fn cancel(&mut self, handle: TimerHandle) {
        self.timers.cancel(handle);
        self.acquired.timers.retain(|h| *h != handle);
    }

    /// Holds an auto-advancing timer still for one full period from now
    /// (called after a manual interaction).
    pub fn defer(&mut self, handle: TimerHandle) {
        self.timers.defer(handle, self.now);
    }

    //--- Per-Tick Signals -------------------------------------------------

    /// Returns whether a timer fired this tick.
    pub fn timer_fired(&self, handle: TimerHandle) -> bool {
        self.fired.contains(&handle)
    }

    /// Navigation gestures aimed at `target` this tick, in arrival order.
    pub fn nav_for(&self, target: RegionId) -> impl Iterator<Item = NavAction> + '_ {
        self.nav
            .iter()
            .filter(move |event| event.target == target)
            .map(|event| event.action)
    }

    /// All visibility edges that occurred this tick, in detection order.
    pub fn transitions(&self) -> &[VisibilityTransition] {
        self.transitions
    }

    /// The edge an observation took this tick, if any.
    ///
    /// `Some(true)` on reveal, `Some(false)` on un-reveal, `None` when the
    /// observation did not cross its threshold this tick. Components use
    /// this to fire enter-animations exactly once per crossing.
    pub fn transition_for(&self, handle: ObservationHandle) -> Option<bool> {
        self.transitions
            .iter()
            .find(|t| t.handle == handle)
            .map(|t| t.visible)
    }

    //--- Queries ----------------------------------------------------------

    /// The current tick instant.
    pub fn now(&self) -> Instant {
        self.now
    }

    /// Reveal phase of an observation.
    pub fn phase(&self, handle: ObservationHandle) -> RevealPhase {
        self.visibility.phase(handle)
    }

    /// Whether an observation is currently visible.
    pub fn is_visible(&self, handle: ObservationHandle) -> bool {
        self.visibility.is_visible(handle)
    }

    /// Read-only access to current geometry.
    pub fn geometry(&self) -> &dyn GeometrySource {
        self.geometry
    }

    /// The current vertical scroll offset.
    pub fn scroll_offset(&self) -> f32 {
        self.geometry.scroll_offset()
    }

    //--- Stage Requests ---------------------------------------------------

    /// Queues a stage transition, applied at the next tick boundary.
    pub fn request(&mut self, transition: StageTransition<K>) {
        self.requests.push(transition);
    }
}
