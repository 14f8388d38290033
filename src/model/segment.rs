// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Inkgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Inkgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::ops::RangeInclusive;

/// Inclusive, contiguous run over the ordered action list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Segment {
    start: usize,
    end: usize,
}

impl Segment {
    /// Endpoints are stored in ascending order.
    pub fn new(start: usize, end: usize) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self { start: end, end: start }
        }
    }

    pub fn single(index: usize) -> Self {
        Self { start: index, end: index }
    }

    /// Segment spanning the smallest and largest of `indices`; `None` when empty.
    pub fn spanning(indices: impl IntoIterator<Item = usize>) -> Option<Self> {
        let mut bounds: Option<(usize, usize)> = None;
        for index in indices {
            bounds = Some(match bounds {
                None => (index, index),
                Some((lo, hi)) => (lo.min(index), hi.max(index)),
            });
        }
        bounds.map(|(lo, hi)| Self { start: lo, end: hi })
    }

    /// Builds a segment from a nullable pair; either side missing clears it.
    pub fn from_bounds(start: Option<usize>, end: Option<usize>) -> Option<Self> {
        Some(Self::new(start?, end?))
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index <= self.end
    }

    pub fn indices(&self) -> RangeInclusive<usize> {
        self.start..=self.end
    }

    /// Restricts the segment to a list of `len` actions; `None` when nothing overlaps.
    pub fn clamp_to(&self, len: usize) -> Option<Self> {
        if len == 0 || self.start >= len {
            return None;
        }
        Some(Self { start: self.start, end: self.end.min(len - 1) })
    }
}

/// The hover slot and the filter slot. They are set independently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SegmentSlots {
    highlight: Option<Segment>,
    filter: Option<Segment>,
}

impl SegmentSlots {
    pub fn highlight(&self) -> Option<Segment> {
        self.highlight
    }

    pub fn set_highlight(&mut self, segment: Option<Segment>) {
        self.highlight = segment;
    }

    pub fn filter(&self) -> Option<Segment> {
        self.filter
    }

    pub fn set_filter(&mut self, segment: Option<Segment>) {
        self.filter = segment;
    }

    pub fn effective(&self) -> Option<Segment> {
        effective_segment(self.highlight, self.filter)
    }
}

/// Display precedence: the hover segment wins over the filter segment.
pub fn effective_segment(highlight: Option<Segment>, filter: Option<Segment>) -> Option<Segment> {
    highlight.or(filter)
}

#[cfg(test)]
mod tests {
    use super::{effective_segment, Segment, SegmentSlots};

    #[test]
    fn new_orders_endpoints() {
        let segment = Segment::new(4, 1);
        assert_eq!((segment.start(), segment.end()), (1, 4));
    }

    #[test]
    fn spanning_uses_min_and_max() {
        assert_eq!(Segment::spanning([3, 1]), Some(Segment::new(1, 3)));
        assert_eq!(Segment::spanning([2]), Some(Segment::single(2)));
        assert_eq!(Segment::spanning(std::iter::empty()), None);
    }

    #[test]
    fn from_bounds_clears_on_any_missing_side() {
        assert_eq!(Segment::from_bounds(Some(1), None), None);
        assert_eq!(Segment::from_bounds(None, Some(1)), None);
        assert_eq!(Segment::from_bounds(Some(1), Some(2)), Some(Segment::new(1, 2)));
    }

    #[test]
    fn clamp_to_drops_out_of_range_tail() {
        assert_eq!(Segment::new(2, 9).clamp_to(4), Some(Segment::new(2, 3)));
        assert_eq!(Segment::new(5, 9).clamp_to(4), None);
        assert_eq!(Segment::new(0, 0).clamp_to(0), None);
    }

    #[test]
    fn highlight_takes_precedence_over_filter() {
        let hover = Segment::single(4);
        let filter = Segment::new(0, 2);

        assert_eq!(effective_segment(Some(hover), Some(filter)), Some(hover));
        assert_eq!(effective_segment(None, Some(filter)), Some(filter));
        assert_eq!(effective_segment(Some(hover), None), Some(hover));
        assert_eq!(effective_segment(None, None), None);
    }

    #[test]
    fn slots_are_independent() {
        let mut slots = SegmentSlots::default();
        slots.set_filter(Some(Segment::new(1, 3)));
        slots.set_highlight(Some(Segment::single(0)));
        slots.set_highlight(None);

        assert_eq!(slots.filter(), Some(Segment::new(1, 3)));
        assert_eq!(slots.effective(), Some(Segment::new(1, 3)));
    }
}
