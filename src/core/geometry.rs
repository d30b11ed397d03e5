//=========================================================================
// Geometry
//=========================================================================
//
// Screen-space rectangles and root-margin arithmetic for the visibility
// system.
//
// Coordinates are CSS-pixel f32 with a top-left origin, matching what a
// browser-like host reports for layout rectangles. The visibility tracker
// never owns a region's rectangle; it only reads geometry produced here.
//
//=========================================================================

//=== Rect ================================================================

/// An axis-aligned screen rectangle.
///
/// `x`/`y` locate the top-left corner; `width`/`height` may be zero for
/// degenerate (collapsed) regions but are never negative in well-formed
/// host input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Creates a rectangle from its top-left corner and size.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Returns the rectangle's area.
    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// Returns the right edge coordinate.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Returns the bottom edge coordinate.
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Returns the overlap of two rectangles, or `None` when they are
    /// disjoint.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if right <= x || bottom <= y {
            return None;
        }

        Some(Rect::new(x, y, right - x, bottom - y))
    }

    /// Returns the fraction of this rectangle's area that overlaps
    /// `viewport`, in `[0, 1]`.
    ///
    /// Zero-area rectangles report 0.0: a collapsed region has nothing to
    /// reveal, and a 0.0 ratio keeps `ratio >= threshold` honest for any
    /// positive threshold.
    pub fn intersection_ratio(&self, viewport: &Rect) -> f32 {
        let area = self.area();
        if area <= 0.0 {
            return 0.0;
        }

        match self.intersect(viewport) {
            Some(overlap) => (overlap.area() / area).clamp(0.0, 1.0),
            None => 0.0,
        }
    }
}

//=== Length ==============================================================

/// A signed margin length, absolute or relative to a viewport dimension.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    /// Absolute pixels.
    Px(f32),
    /// Percentage of the corresponding viewport dimension (100.0 = 100%).
    Percent(f32),
}

impl Length {
    /// Resolves the length against a reference dimension (viewport width
    /// for left/right margins, height for top/bottom).
    pub fn resolve(&self, reference: f32) -> f32 {
        match self {
            Length::Px(px) => *px,
            Length::Percent(pct) => reference * pct / 100.0,
        }
    }
}

//=== Margin ==============================================================

/// Root-margin offsets applied to the viewport before intersection is
/// computed.
///
/// Positive values grow the viewport (regions become visible earlier,
/// useful for pre-loading reveals); negative values shrink it (regions
/// must be deeper inside the viewport before they count as visible).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margin {
    pub top: Length,
    pub right: Length,
    pub bottom: Length,
    pub left: Length,
}

impl Margin {
    /// Margin of zero on every edge.
    pub const ZERO: Margin = Margin {
        top: Length::Px(0.0),
        right: Length::Px(0.0),
        bottom: Length::Px(0.0),
        left: Length::Px(0.0),
    };

    /// Creates a uniform pixel margin on all four edges.
    pub fn uniform(px: f32) -> Self {
        Margin {
            top: Length::Px(px),
            right: Length::Px(px),
            bottom: Length::Px(px),
            left: Length::Px(px),
        }
    }

    /// Applies the margin to a viewport rectangle, growing or shrinking it
    /// edge by edge.
    ///
    /// A margin that collapses the viewport entirely yields a zero-size
    /// rectangle at the viewport's center of collapse; intersection against
    /// it is simply empty.
    pub fn expand(&self, viewport: &Rect) -> Rect {
        let top = self.top.resolve(viewport.height);
        let right = self.right.resolve(viewport.width);
        let bottom = self.bottom.resolve(viewport.height);
        let left = self.left.resolve(viewport.width);

        let x = viewport.x - left;
        let y = viewport.y - top;
        let width = (viewport.width + left + right).max(0.0);
        let height = (viewport.height + top + bottom).max(0.0);

        Rect::new(x, y, width, height)
    }
}

impl Default for Margin {
    fn default() -> Self {
        Margin::ZERO
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    //--- Test Helpers -----------------------------------------------------

    fn viewport() -> Rect {
        Rect::new(0.0, 0.0, 1000.0, 800.0)
    }

    //=====================================================================
    // Intersection Tests
    //=====================================================================

    /// Tests a region fully inside the viewport.
    #[test]
    fn fully_contained_region_has_ratio_one() {
        let region = Rect::new(100.0, 100.0, 200.0, 200.0);
        assert_eq!(region.intersection_ratio(&viewport()), 1.0);
    }

    /// Tests a region entirely below the viewport.
    #[test]
    fn disjoint_region_has_ratio_zero() {
        let region = Rect::new(0.0, 2000.0, 200.0, 200.0);
        assert_eq!(region.intersection_ratio(&viewport()), 0.0);
        assert!(region.intersect(&viewport()).is_none());
    }

    /// Tests a region half scrolled out the bottom.
    #[test]
    fn half_visible_region_has_ratio_half() {
        // 200px tall, straddling the bottom edge at y=800.
        let region = Rect::new(0.0, 700.0, 400.0, 200.0);
        let ratio = region.intersection_ratio(&viewport());
        assert!((ratio - 0.5).abs() < 1e-6, "ratio was {}", ratio);
    }

    /// Tests that a zero-area region reports zero.
    #[test]
    fn zero_area_region_has_ratio_zero() {
        let region = Rect::new(100.0, 100.0, 0.0, 0.0);
        assert_eq!(region.intersection_ratio(&viewport()), 0.0);
    }

    /// Tests edge-touching rectangles do not intersect.
    #[test]
    fn edge_touching_rects_are_disjoint() {
        let region = Rect::new(0.0, 800.0, 100.0, 100.0);
        assert!(region.intersect(&viewport()).is_none());
    }

    //=====================================================================
    // Margin Tests
    //=====================================================================

    /// Tests that a positive pixel margin grows the viewport.
    #[test]
    fn positive_margin_grows_viewport() {
        let expanded = Margin::uniform(50.0).expand(&viewport());
        assert_eq!(expanded, Rect::new(-50.0, -50.0, 1100.0, 900.0));
    }

    /// Tests that a negative pixel margin shrinks the viewport.
    #[test]
    fn negative_margin_shrinks_viewport() {
        let expanded = Margin::uniform(-100.0).expand(&viewport());
        assert_eq!(expanded, Rect::new(100.0, 100.0, 800.0, 600.0));
    }

    /// Tests percent margins resolve against the matching dimension.
    #[test]
    fn percent_margin_resolves_per_axis() {
        let margin = Margin {
            top: Length::Percent(10.0),    // 10% of 800 = 80
            right: Length::Px(0.0),
            bottom: Length::Percent(10.0), // 80
            left: Length::Percent(10.0),   // 10% of 1000 = 100
        };
        let expanded = margin.expand(&viewport());
        assert_eq!(expanded, Rect::new(-100.0, -80.0, 1100.0, 960.0));
    }

    /// Tests a margin that collapses the viewport clamps to zero size.
    #[test]
    fn overlarge_negative_margin_collapses_to_zero() {
        let expanded = Margin::uniform(-1000.0).expand(&viewport());
        assert_eq!(expanded.width, 0.0);
        assert_eq!(expanded.height, 0.0);

        let region = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert_eq!(region.intersection_ratio(&expanded), 0.0);
    }

    /// Tests that a pre-load margin makes an off-screen region count.
    #[test]
    fn margin_shifts_visibility_boundary() {
        // Region sits 40px below the viewport bottom.
        let region = Rect::new(0.0, 840.0, 400.0, 100.0);
        assert_eq!(region.intersection_ratio(&viewport()), 0.0);

        let expanded = Margin::uniform(100.0).expand(&viewport());
        assert!(region.intersection_ratio(&expanded) > 0.0);
    }
}
