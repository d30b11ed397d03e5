//=========================================================================
// Viewport Model
//=========================================================================
//
// Host-owned geometry, seen through a narrow read-only seam.
//
// The host (a browser shim, a layout engine, a test harness) owns every
// region rectangle and the viewport itself. Core systems only read that
// geometry through `GeometrySource`, which keeps the visibility tracker
// independent of where rectangles come from and lets tests inject fixed
// geometry.
//
// `ViewportModel` is the stock implementation, maintained from host
// events by the engine loop.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::debug;

//=== Internal Dependencies ===============================================

use crate::core::geometry::Rect;

//=== RegionId ============================================================

/// Opaque handle to a host-owned screen region.
///
/// The presentation layer assigns ids to the regions it wants observed
/// (a section, a grid, a button anchor) and keeps their rectangles up to
/// date through host events. The core never mutates region geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionId(pub u64);

//=== GeometrySource ======================================================

/// Read-only access to current viewport and region geometry.
///
/// The visibility tracker computes intersection ratios against whatever
/// this trait reports; swapping the implementation swaps the host.
pub trait GeometrySource {
    /// The current viewport rectangle in screen coordinates.
    fn viewport(&self) -> Rect;

    /// The rectangle of a region, or `None` if the region is unknown or
    /// has been torn down.
    fn region_rect(&self, region: RegionId) -> Option<Rect>;

    /// The current vertical scroll offset in pixels from the document top.
    fn scroll_offset(&self) -> f32;
}

//=== ViewportModel =======================================================

/// Concrete geometry source maintained from host events.
///
/// The engine applies `ViewportResized` / `Scrolled` / `RegionPlaced` /
/// `RegionRemoved` events here before each visibility pass, so core
/// systems always observe a consistent snapshot for the tick.
pub struct ViewportModel {
    viewport: Rect,
    scroll_offset: f32,
    regions: HashMap<RegionId, Rect>,
}

impl ViewportModel {
    /// Creates a model with the given initial viewport and no regions.
    pub fn new(viewport: Rect) -> Self {
        Self {
            viewport,
            scroll_offset: 0.0,
            regions: HashMap::new(),
        }
    }

    //--- Host Mutation ----------------------------------------------------

    /// Replaces the viewport rectangle (host resize).
    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = viewport;
    }

    /// Updates the vertical scroll offset.
    pub fn set_scroll_offset(&mut self, offset: f32) {
        self.scroll_offset = offset;
    }

    /// Places or moves a region rectangle.
    pub fn place_region(&mut self, region: RegionId, rect: Rect) {
        if self.regions.insert(region, rect).is_none() {
            debug!("Region {:?} placed at {:?}", region, rect);
        }
    }

    /// Removes a region. Safe to call for regions that were never placed.
    pub fn remove_region(&mut self, region: RegionId) {
        if self.regions.remove(&region).is_some() {
            debug!("Region {:?} removed", region);
        }
    }

    /// Returns the number of regions currently placed.
    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    /// The current viewport rectangle (inherent access for hosts that do
    /// not go through the trait).
    pub fn viewport_rect(&self) -> Rect {
        self.viewport
    }
}

impl GeometrySource for ViewportModel {
    fn viewport(&self) -> Rect {
        self.viewport
    }

    fn region_rect(&self, region: RegionId) -> Option<Rect> {
        self.regions.get(&region).copied()
    }

    fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests placing, moving, and removing regions.
    #[test]
    fn region_lifecycle() {
        let mut model = ViewportModel::new(Rect::new(0.0, 0.0, 1000.0, 800.0));
        let region = RegionId(1);

        assert!(model.region_rect(region).is_none());

        model.place_region(region, Rect::new(0.0, 100.0, 400.0, 300.0));
        assert_eq!(
            model.region_rect(region),
            Some(Rect::new(0.0, 100.0, 400.0, 300.0))
        );

        // Move
        model.place_region(region, Rect::new(0.0, 900.0, 400.0, 300.0));
        assert_eq!(model.region_rect(region).unwrap().y, 900.0);

        model.remove_region(region);
        assert!(model.region_rect(region).is_none());

        // Removing again is safe
        model.remove_region(region);
    }

    /// Tests viewport and scroll updates are reflected through the trait.
    #[test]
    fn viewport_and_scroll_updates() {
        let mut model = ViewportModel::new(Rect::new(0.0, 0.0, 1000.0, 800.0));

        model.set_scroll_offset(350.0);
        model.set_viewport(Rect::new(0.0, 350.0, 1000.0, 800.0));

        let source: &dyn GeometrySource = &model;
        assert_eq!(source.scroll_offset(), 350.0);
        assert_eq!(source.viewport().y, 350.0);
    }
}
