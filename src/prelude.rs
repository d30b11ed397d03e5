//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use vitrine_engine::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine core
pub use crate::engine::{Engine, EngineBuilder};

// Geometry and viewport
pub use crate::core::geometry::{Length, Margin, Rect};
pub use crate::core::viewport::{GeometrySource, RegionId, ViewportModel};

// Visibility system
pub use crate::core::visibility::{
    ObservationHandle, ObserveOptions, RevealPhase, ScrollSentinel, VisibilityTracker,
    VisibilityTransition,
};

// Carousel system
pub use crate::core::carousel::{AutoAdvance, CyclicIndex, EdgePolicy};

// Stage system
pub use crate::core::stage::{
    Component, ComponentKey, Stage, StageContext, StageTransition, TimerHandle,
};

// Host bridge
pub use crate::core::host_bridge::{HostEvent, NavAction, NavEvent};

// Errors
pub use crate::core::error::CoreError;
