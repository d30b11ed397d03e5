//=========================================================================
// Cyclic Index
//=========================================================================
//
// Position arithmetic over a fixed-length sequence, independent of what
// the sequence contains.
//
// Two edge policies exist because real sliders disagree: an auto-advancing
// carousel loops forever (Wrap), while manual prev/next buttons stop at
// the ends and render disabled (Clamp). The policy is chosen per instance
// at construction, never globally.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::error::CoreError;

//=== EdgePolicy ==========================================================

/// Behavior of `next`/`previous` at the sequence boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgePolicy {
    /// Advance past the last element back to the first (and vice versa).
    Wrap,
    /// Stop at the boundaries; `at_start`/`at_end` back disabled controls.
    Clamp,
}

//=== CyclicIndex =========================================================

/// Current position over a logical sequence of known length.
///
/// Invariant: `current < len` whenever `len > 0`; `current == 0` when the
/// sequence is empty. Every operation preserves this — `next`/`previous`
/// wrap or clamp, `resize` re-clamps, and `goto` rejects out-of-range
/// indices without moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CyclicIndex {
    len: usize,
    current: usize,
    policy: EdgePolicy,
}

impl CyclicIndex {
    /// Creates an index over `len` elements starting at position 0.
    pub fn new(len: usize, policy: EdgePolicy) -> Self {
        Self {
            len,
            current: 0,
            policy,
        }
    }

    /// Creates a wrapping index (auto-advancing sliders, looping galleries).
    pub fn wrapping(len: usize) -> Self {
        Self::new(len, EdgePolicy::Wrap)
    }

    /// Creates a clamped index (manual controls with disabled boundaries).
    pub fn clamped(len: usize) -> Self {
        Self::new(len, EdgePolicy::Clamp)
    }

    //--- Navigation -------------------------------------------------------

    /// Advances one position. Returns whether the position moved.
    ///
    /// No-op on an empty sequence; under `Clamp`, no-op at the last
    /// position.
    pub fn next(&mut self) -> bool {
        if self.len == 0 {
            return false;
        }
        match self.policy {
            EdgePolicy::Wrap => {
                self.current = (self.current + 1) % self.len;
                true
            }
            EdgePolicy::Clamp => {
                if self.current + 1 < self.len {
                    self.current += 1;
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Steps back one position. Returns whether the position moved.
    ///
    /// No-op on an empty sequence; under `Clamp`, no-op at position 0.
    pub fn previous(&mut self) -> bool {
        if self.len == 0 {
            return false;
        }
        match self.policy {
            EdgePolicy::Wrap => {
                self.current = (self.current + self.len - 1) % self.len;
                true
            }
            EdgePolicy::Clamp => {
                if self.current > 0 {
                    self.current -= 1;
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Jumps to an explicit position (dot indicators, thumbnails).
    ///
    /// Fails with `OutOfRange` for `index >= len`, leaving the position
    /// unchanged.
    pub fn goto(&mut self, index: usize) -> Result<(), CoreError> {
        if index >= self.len {
            return Err(CoreError::OutOfRange {
                index,
                len: self.len,
            });
        }
        self.current = index;
        Ok(())
    }

    /// Adopts a new backing-sequence length (filter changed the candidate
    /// set), re-clamping the position into the new range. Never fails.
    pub fn resize(&mut self, new_len: usize) {
        self.len = new_len;
        if new_len == 0 {
            self.current = 0;
        } else if self.current >= new_len {
            self.current = new_len - 1;
        }
    }

    //--- Queries ----------------------------------------------------------

    /// The current position; 0 when the sequence is empty.
    pub fn current(&self) -> usize {
        self.current
    }

    /// The backing sequence length.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` when the sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` at position 0 (or when empty). Under `Clamp`, the
    /// "previous" control should render disabled.
    pub fn at_start(&self) -> bool {
        self.current == 0
    }

    /// Returns `true` at the last position (or when empty). Under `Clamp`,
    /// the "next" control should render disabled.
    pub fn at_end(&self) -> bool {
        self.len == 0 || self.current + 1 == self.len
    }

    /// The configured edge policy.
    pub fn policy(&self) -> EdgePolicy {
        self.policy
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    //=====================================================================
    // Wraparound
    //=====================================================================

    /// Tests that k next() calls land on k mod len.
    #[test]
    fn next_is_addition_mod_len() {
        for len in 1..=5 {
            for k in 0..20 {
                let mut index = CyclicIndex::wrapping(len);
                for _ in 0..k {
                    assert!(index.next());
                }
                assert_eq!(index.current(), k % len, "len={} k={}", len, k);
            }
        }
    }

    /// Tests next followed by previous restores the position.
    #[test]
    fn next_then_previous_restores() {
        let mut index = CyclicIndex::wrapping(4);
        index.goto(2).unwrap();

        index.next();
        index.previous();
        assert_eq!(index.current(), 2);

        // Also across the boundary.
        index.goto(3).unwrap();
        index.next();
        assert_eq!(index.current(), 0);
        index.previous();
        assert_eq!(index.current(), 3);
    }

    /// Tests the 3-item scenario: previous() from 0 wraps to 2, then a
    /// full cycle of next() returns to 2.
    #[test]
    fn three_item_wrap_scenario() {
        let mut index = CyclicIndex::wrapping(3);

        assert!(index.previous());
        assert_eq!(index.current(), 2);

        for _ in 0..3 {
            index.next();
        }
        assert_eq!(index.current(), 2);
    }

    //=====================================================================
    // Clamped Ends
    //=====================================================================

    /// Tests clamp policy refuses to move past either boundary.
    #[test]
    fn clamp_stops_at_boundaries() {
        let mut index = CyclicIndex::clamped(3);

        assert!(index.at_start());
        assert!(!index.previous(), "previous is disabled at the start");
        assert_eq!(index.current(), 0);

        assert!(index.next());
        assert!(index.next());
        assert!(index.at_end());
        assert!(!index.next(), "next is disabled at the end");
        assert_eq!(index.current(), 2);

        assert!(index.previous());
        assert_eq!(index.current(), 1);
        assert!(!index.at_start());
        assert!(!index.at_end());
    }

    //=====================================================================
    // goto / resize
    //=====================================================================

    /// Tests goto out of range signals and leaves the position unchanged.
    #[test]
    fn goto_out_of_range_leaves_position() {
        let mut index = CyclicIndex::wrapping(3);
        index.goto(1).unwrap();

        let err = index.goto(3).unwrap_err();
        assert_eq!(err, CoreError::OutOfRange { index: 3, len: 3 });
        assert_eq!(index.current(), 1);
    }

    /// Tests goto on an empty sequence always fails.
    #[test]
    fn goto_on_empty_fails() {
        let mut index = CyclicIndex::wrapping(0);
        assert!(index.goto(0).is_err());
        assert_eq!(index.current(), 0);
    }

    /// Tests resize re-clamps a now-invalid position.
    #[test]
    fn resize_reclamps_position() {
        let mut index = CyclicIndex::wrapping(8);
        index.goto(6).unwrap();

        index.resize(4);
        assert_eq!(index.current(), 3, "clamped to new_len - 1");

        index.resize(0);
        assert_eq!(index.current(), 0);
        assert!(index.is_empty());

        // Growing back: position stays where it was clamped.
        index.resize(10);
        assert_eq!(index.current(), 0);
        assert_eq!(index.len(), 10);
    }

    /// Tests resize with a still-valid position leaves it alone.
    #[test]
    fn resize_keeps_valid_position() {
        let mut index = CyclicIndex::clamped(5);
        index.goto(2).unwrap();

        index.resize(4);
        assert_eq!(index.current(), 2);
    }

    //=====================================================================
    // Empty Sequence
    //=====================================================================

    /// Tests every navigation is a no-op when empty.
    #[test]
    fn empty_sequence_is_inert() {
        for policy in [EdgePolicy::Wrap, EdgePolicy::Clamp] {
            let mut index = CyclicIndex::new(0, policy);

            assert!(!index.next());
            assert!(!index.previous());
            assert_eq!(index.current(), 0);
            assert!(index.at_start());
            assert!(index.at_end());
        }
    }
}
