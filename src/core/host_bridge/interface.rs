//=========================================================================
// Host Bridge Interface
//=========================================================================
//
// Host-to-core event types (the contract).
//
// The embedding host (browser shim, layout engine, test harness) reports
// geometry changes and user navigation here. Region rectangles travel in
// document coordinates; the viewport slides over them as the scroll
// offset changes.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::geometry::Rect;
use crate::core::viewport::RegionId;

//=== NavAction ===========================================================

/// A user navigation gesture aimed at a carousel-like widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    /// Advance one slide (next arrow).
    Next,
    /// Step back one slide (previous arrow).
    Previous,
    /// Jump to an explicit slide (dot indicator, thumbnail).
    Goto(usize),
}

//=== NavEvent ============================================================

/// A navigation gesture routed to the region that owns the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavEvent {
    pub target: RegionId,
    pub action: NavAction,
}

//=== HostEvent ===========================================================

/// Events sent from the host to the core via the event channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    /// The viewport changed size (window resize).
    ViewportResized { width: f32, height: f32 },

    /// The document scrolled to a new vertical offset.
    Scrolled { offset: f32 },

    /// A region was laid out or moved (document coordinates).
    RegionPlaced { region: RegionId, rect: Rect },

    /// A region left the layout.
    RegionRemoved { region: RegionId },

    /// User navigation aimed at a widget.
    Nav(NavEvent),

    /// The host is shutting down; the engine unmounts everything and
    /// exits its loop.
    Shutdown,
}
