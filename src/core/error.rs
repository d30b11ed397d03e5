//=========================================================================
// Core Errors
//=========================================================================
//
// The crate's error taxonomy is deliberately small: every navigation and
// visibility operation is total by construction (wrap, clamp, or no-op)
// except the two cases below, which the caller can validate against before
// invoking. No error here is ever fatal to the host.
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::viewport::RegionId;

//=== CoreError ===========================================================

/// Errors surfaced by the interaction core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CoreError {
    /// `goto` was called with an index outside `[0, len)`.
    ///
    /// The carousel position is left unchanged.
    #[error("index {index} out of range for carousel of length {len}")]
    OutOfRange { index: usize, len: usize },

    /// An observation was requested on a region the geometry source does
    /// not know about (never mounted, or already torn down).
    ///
    /// The lenient `attach` path converts this into a no-op handle instead
    /// of surfacing it.
    #[error("region {target:?} is not present in the geometry source")]
    InvalidTarget { target: RegionId },
}
