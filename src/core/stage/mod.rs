//=========================================================================
// Stage System
//=========================================================================
//
// Component lifecycle and scoped resource discipline.
//
// Architecture:
//   Stage<K>
//     ├─ components: HashMap<K, Box<dyn Component>>
//     ├─ mounted: Vec<K>                  (update order)
//     └─ acquired: HashMap<K, Acquired>   (per-component ledger)
//
// Flow:
//   queue(Mount) → on_mount() acquires → update() per tick
//   queue(Unmount) → on_unmount() → force-release leftovers
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt::Debug;
use std::hash::Hash;
use std::time::Instant;

//=== Internal Dependencies ===============================================

use crate::core::host_bridge::NavEvent;
use crate::core::viewport::GeometrySource;
use crate::core::visibility::{VisibilityTracker, VisibilityTransition};

//=== Module Declarations =================================================

mod context;
mod stage_manager;
mod timers;

//=== Public API ==========================================================

pub use context::StageContext;
pub use stage_manager::{Stage, StageTransition};
pub use timers::{TimerHandle, Timers};

//=== ComponentKey ========================================================

/// Marker trait for component identifiers.
///
/// Component keys uniquely identify components in the stage's registry.
/// Typically implemented by an application-specific enum of page
/// sections.
pub trait ComponentKey: Clone + Copy + Eq + Hash + Debug + Send + 'static {}

//=== Component ===========================================================

/// Defines component behavior with lifecycle hooks and update logic.
///
/// Components acquire observations and timers through their
/// [`StageContext`] on mount; anything not released by the time the
/// component unmounts is released for it.
///
/// Only `update()` is required; the lifecycle hooks default to doing
/// nothing.
pub trait Component<K: ComponentKey>: Send {
    /// Called when the component enters the mount list.
    fn on_mount(&mut self, _ctx: &mut StageContext<'_, K>) {}

    /// Called when the component leaves the mount list, before the stage
    /// force-releases its remaining acquisitions.
    fn on_unmount(&mut self, _ctx: &mut StageContext<'_, K>) {}

    /// Called every tick while mounted.
    fn update(&mut self, ctx: &mut StageContext<'_, K>);
}

//=== StageServices =======================================================

/// The engine-owned systems a stage pass runs against.
///
/// Bundled so the engine's tick loop hands the stage one coherent
/// snapshot per tick.
pub struct StageServices<'a> {
    /// The tick instant.
    pub now: Instant,

    /// Reveal state for observed regions.
    pub visibility: &'a mut VisibilityTracker,

    /// Auto-advance timer registry.
    pub timers: &'a mut Timers,

    /// Current geometry snapshot.
    pub geometry: &'a dyn GeometrySource,

    /// Navigation gestures that arrived this tick.
    pub nav: &'a [NavEvent],

    /// Timers that fired this tick.
    pub fired: &'a [TimerHandle],

    /// Visibility edges drained from the tracker this tick.
    pub transitions: &'a [VisibilityTransition],
}
