//=========================================================================
// Visibility System
//=========================================================================
//
// Reveal-on-scroll state for observed regions.
//
// Architecture:
//   VisibilityTracker
//     ├─ observations: HashMap<id, Observation>
//     └─ transitions: Vec<VisibilityTransition>   (drained per tick)
//
// Flow:
//   attach() → process(geometry) → RevealPhase / transitions → render
//
// `ScrollSentinel` covers the simpler scalar case (offset past a fixed
// threshold) with the same edge-triggered semantics.
//
//=========================================================================

//=== Module Declarations =================================================

mod scroll;
mod tracker;

//=== Public API ==========================================================

pub use scroll::ScrollSentinel;
pub use tracker::{
    ObservationHandle, ObserveOptions, RevealPhase, VisibilityTracker, VisibilityTransition,
};
