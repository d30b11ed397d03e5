//=========================================================================
// Visibility Tracker
//=========================================================================
//
// Edge-triggered reveal state for observed regions.
//
// Architecture:
//   attach() → Observation (Hidden) → sample()/process() → RevealPhase
//
// Notifications are transition-only: a region scrolling around inside the
// viewport produces no traffic, only crossings of the configured threshold
// do. One-shot observations latch at `Pinned` on their first reveal and
// go silent.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use crate::core::error::CoreError;
use crate::core::geometry::Margin;
use crate::core::viewport::{GeometrySource, RegionId};

//=== ObserveOptions ======================================================

/// Configuration for a single observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserveOptions {
    /// Minimum intersection ratio that counts as visible, clamped to
    /// `[0, 1]` at attach time.
    ///
    /// A threshold of exactly 0.0 reports visible on the first sample;
    /// callers wanting "any overlap" semantics should use a small positive
    /// threshold instead.
    pub threshold: f32,

    /// Offsets applied to the viewport edges before intersection is
    /// computed. Positive margins reveal earlier.
    pub root_margin: Margin,

    /// Latch on the first reveal: the observation stops updating once it
    /// transitions to visible and never reverts.
    pub trigger_once: bool,
}

impl ObserveOptions {
    /// Sets the visibility threshold.
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Sets the root margin.
    pub fn with_root_margin(mut self, margin: Margin) -> Self {
        self.root_margin = margin;
        self
    }

    /// Enables one-shot latching.
    pub fn once(mut self) -> Self {
        self.trigger_once = true;
        self
    }
}

impl Default for ObserveOptions {
    fn default() -> Self {
        Self {
            threshold: 0.0,
            root_margin: Margin::ZERO,
            trigger_once: false,
        }
    }
}

//=== RevealPhase =========================================================

/// Visibility state of an observation, consumed directly by rendering
/// code (in place of string class toggling).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealPhase {
    /// Not (yet) visible.
    Hidden,
    /// Currently visible; may revert to `Hidden`.
    Revealed,
    /// Revealed by a one-shot observation; never reverts.
    Pinned,
}

impl RevealPhase {
    /// Returns `true` for `Revealed` and `Pinned`.
    pub fn is_visible(&self) -> bool {
        matches!(self, RevealPhase::Revealed | RevealPhase::Pinned)
    }
}

//=== ObservationHandle ===================================================

/// Handle to a registered observation.
///
/// A detached handle (returned by [`VisibilityTracker::attach`] for an
/// unknown region, or constructed via [`ObservationHandle::detached`])
/// is inert: every tracker operation on it is a no-op and its phase is
/// permanently `Hidden`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObservationHandle {
    id: Option<u64>,
}

impl ObservationHandle {
    /// Creates an inert handle not backed by any observation.
    pub fn detached() -> Self {
        Self { id: None }
    }

    /// Returns `true` if this handle was never backed by an observation.
    pub fn is_detached(&self) -> bool {
        self.id.is_none()
    }
}

//=== VisibilityTransition ================================================

/// A single visibility edge (false→true or true→false).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityTransition {
    pub handle: ObservationHandle,
    pub visible: bool,
}

//=== Observation =========================================================

struct Observation {
    region: RegionId,
    options: ObserveOptions,
    phase: RevealPhase,
}

//=== VisibilityTracker ===================================================

/// Tracks reveal state for a set of observed regions.
///
/// State updates are edge-triggered: `sample`/`process` record a
/// [`VisibilityTransition`] only when an observation's boolean visibility
/// actually changes. Transitions accumulate until drained with
/// [`take_transitions`](Self::take_transitions).
pub struct VisibilityTracker {
    observations: HashMap<u64, Observation>,
    transitions: Vec<VisibilityTransition>,
    next_id: u64,
}

impl VisibilityTracker {
    /// Creates a tracker with no observations.
    pub fn new() -> Self {
        Self {
            observations: HashMap::new(),
            transitions: Vec::new(),
            next_id: 0,
        }
    }

    //--- Registration -----------------------------------------------------

    /// Registers an observation on `region`, validating the region against
    /// the geometry source.
    ///
    /// The initial phase is `Hidden`; no transition is recorded until the
    /// first sample crosses the threshold.
    pub fn try_attach(
        &mut self,
        region: RegionId,
        options: ObserveOptions,
        source: &dyn GeometrySource,
    ) -> Result<ObservationHandle, CoreError> {
        if source.region_rect(region).is_none() {
            return Err(CoreError::InvalidTarget { target: region });
        }

        let id = self.next_id;
        self.next_id += 1;

        let options = ObserveOptions {
            threshold: options.threshold.clamp(0.0, 1.0),
            ..options
        };

        self.observations.insert(
            id,
            Observation {
                region,
                options,
                phase: RevealPhase::Hidden,
            },
        );

        debug!("Observation {} attached to {:?}", id, region);
        Ok(ObservationHandle { id: Some(id) })
    }

    /// Lenient variant of [`try_attach`](Self::try_attach): an unknown
    /// region yields a detached no-op handle instead of an error.
    pub fn attach(
        &mut self,
        region: RegionId,
        options: ObserveOptions,
        source: &dyn GeometrySource,
    ) -> ObservationHandle {
        match self.try_attach(region, options, source) {
            Ok(handle) => handle,
            Err(err) => {
                warn!("Attach ignored: {}", err);
                ObservationHandle::detached()
            }
        }
    }

    /// Removes an observation. Idempotent; safe on detached handles. No
    /// transitions for this handle are recorded afterward.
    pub fn detach(&mut self, handle: ObservationHandle) {
        if let Some(id) = handle.id {
            if self.observations.remove(&id).is_some() {
                debug!("Observation {} detached", id);
            }
        }
    }

    //--- Sampling ---------------------------------------------------------

    /// Feeds a raw intersection ratio to a single observation.
    ///
    /// Pinned observations and detached handles ignore the sample.
    pub fn sample(&mut self, handle: ObservationHandle, ratio: f32) {
        let Some(id) = handle.id else { return };
        if let Some(obs) = self.observations.get_mut(&id) {
            Self::apply_ratio(obs, id, ratio, &mut self.transitions);
        }
    }

    /// Recomputes every live observation's ratio from current geometry and
    /// applies the same edge logic as [`sample`](Self::sample).
    ///
    /// Regions that vanished from the source mid-flight count as not
    /// intersecting, so their observations revert to `Hidden` (unless
    /// pinned) rather than going stale.
    pub fn process(&mut self, source: &dyn GeometrySource) {
        let viewport = source.viewport();
        let transitions = &mut self.transitions;

        for (&id, obs) in self.observations.iter_mut() {
            if obs.phase == RevealPhase::Pinned {
                continue;
            }

            let root = obs.options.root_margin.expand(&viewport);
            let ratio = match source.region_rect(obs.region) {
                Some(rect) => rect.intersection_ratio(&root),
                None => 0.0,
            };

            Self::apply_ratio(obs, id, ratio, transitions);
        }
    }

    fn apply_ratio(
        obs: &mut Observation,
        id: u64,
        ratio: f32,
        transitions: &mut Vec<VisibilityTransition>,
    ) {
        if obs.phase == RevealPhase::Pinned {
            return;
        }

        let visible = ratio >= obs.options.threshold;
        if visible == obs.phase.is_visible() {
            return;
        }

        obs.phase = match (visible, obs.options.trigger_once) {
            (true, true) => RevealPhase::Pinned,
            (true, false) => RevealPhase::Revealed,
            (false, _) => RevealPhase::Hidden,
        };

        transitions.push(VisibilityTransition {
            handle: ObservationHandle { id: Some(id) },
            visible,
        });
    }

    //--- Queries ----------------------------------------------------------

    /// Returns the observation's phase; `Hidden` for detached or removed
    /// handles.
    pub fn phase(&self, handle: ObservationHandle) -> RevealPhase {
        handle
            .id
            .and_then(|id| self.observations.get(&id))
            .map(|obs| obs.phase)
            .unwrap_or(RevealPhase::Hidden)
    }

    /// Returns whether the observation is currently visible.
    pub fn is_visible(&self, handle: ObservationHandle) -> bool {
        self.phase(handle).is_visible()
    }

    /// Returns the number of registered observations (pinned included).
    pub fn observation_count(&self) -> usize {
        self.observations.len()
    }

    /// Takes all transitions recorded since the last drain.
    pub fn take_transitions(&mut self) -> Vec<VisibilityTransition> {
        std::mem::take(&mut self.transitions)
    }
}

impl Default for VisibilityTracker {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
