//=========================================================================
// Scroll Sentinel
//=========================================================================
//
// Edge-triggered threshold on the document scroll offset.
//
// Backs "appear after scrolling down" affordances (the back-to-top
// button): the sentinel flips to visible once the offset passes its
// threshold and back to hidden when it returns above it. Like the
// visibility tracker, it reports transitions, not levels.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::viewport::GeometrySource;

//=== ScrollSentinel ======================================================

/// Watches the vertical scroll offset against a fixed pixel threshold.
#[derive(Debug, Clone, Copy)]
pub struct ScrollSentinel {
    threshold_px: f32,
    visible: bool,
}

impl ScrollSentinel {
    /// Creates a sentinel that becomes visible once the scroll offset
    /// exceeds `threshold_px`. Starts hidden.
    pub fn new(threshold_px: f32) -> Self {
        Self {
            threshold_px,
            visible: false,
        }
    }

    /// Feeds the current scroll offset.
    ///
    /// Returns `Some(new_state)` on a transition, `None` when the state is
    /// unchanged.
    pub fn observe(&mut self, offset: f32) -> Option<bool> {
        let visible = offset > self.threshold_px;
        if visible == self.visible {
            return None;
        }
        self.visible = visible;
        Some(visible)
    }

    /// Convenience: reads the offset from a geometry source.
    pub fn observe_source(&mut self, source: &dyn GeometrySource) -> Option<bool> {
        self.observe(source.scroll_offset())
    }

    /// Returns the current state.
    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests the sentinel reports edges only.
    #[test]
    fn edges_only() {
        let mut sentinel = ScrollSentinel::new(300.0);

        assert_eq!(sentinel.observe(0.0), None);
        assert_eq!(sentinel.observe(150.0), None);
        assert_eq!(sentinel.observe(301.0), Some(true));
        assert_eq!(sentinel.observe(500.0), None);
        assert_eq!(sentinel.observe(120.0), Some(false));
        assert_eq!(sentinel.observe(0.0), None);
    }

    /// Tests the threshold itself does not count as past it.
    #[test]
    fn threshold_is_exclusive() {
        let mut sentinel = ScrollSentinel::new(300.0);

        assert_eq!(sentinel.observe(300.0), None);
        assert!(!sentinel.is_visible());
    }
}
