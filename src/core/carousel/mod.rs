//=========================================================================
// Carousel System
//=========================================================================
//
// Index state for sliders, galleries, and filtered grids.
//
// Architecture:
//   CyclicIndex (position + EdgePolicy)  ←  NavAction / AutoAdvance
//
// The index knows nothing about the items it selects over; owners derive
// the length from whatever list they display and `resize` when a filter
// replaces it.
//
//=========================================================================

//=== Module Declarations =================================================

mod auto_advance;
mod cyclic_index;

//=== Public API ==========================================================

pub use auto_advance::AutoAdvance;
pub use cyclic_index::{CyclicIndex, EdgePolicy};
