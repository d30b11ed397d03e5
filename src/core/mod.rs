//=========================================================================
// Core Systems
//=========================================================================
//
// The interaction core: geometry, visibility tracking, carousel state,
// component lifecycle, and the host event contract.
//
// All mutation happens on the single logic thread driving the engine's
// tick loop; the host communicates exclusively through message passing
// (see `host_bridge`).
//
//=========================================================================

//=== Module Declarations =================================================

pub mod carousel;
pub mod error;
pub mod geometry;
pub mod host_bridge;
pub mod stage;
pub mod viewport;
pub mod visibility;

//=== Public API ==========================================================

pub use carousel::{AutoAdvance, CyclicIndex, EdgePolicy};
pub use error::CoreError;
pub use geometry::{Length, Margin, Rect};
pub use host_bridge::{HostEvent, NavAction, NavEvent};
pub use stage::{Component, ComponentKey, Stage, StageContext, StageTransition};
pub use viewport::{GeometrySource, RegionId, ViewportModel};
pub use visibility::{
    ObservationHandle, ObserveOptions, RevealPhase, ScrollSentinel, VisibilityTracker,
};
