// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use crate::id::{BlockIndex, LaneIndex};
use lane_pack_core::unit::UnitSpan;
use std::fmt::Display;

/// The computed on-screen placement of one block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    index: BlockIndex,
    lane: LaneIndex,
    span: UnitSpan,
}

impl Placement {
    #[inline]
    pub fn new(index: BlockIndex, lane: LaneIndex, span: UnitSpan) -> Self {
        Self { index, lane, span }
    }

    /// The input position of the block this placement belongs to.
    #[inline]
    pub fn index(&self) -> BlockIndex {
        self.index
    }

    /// The lane the block was partitioned into.
    #[inline]
    pub fn lane(&self) -> LaneIndex {
        self.lane
    }

    /// The `[left, left + width]` segment of the unit axis.
    #[inline]
    pub fn span(&self) -> UnitSpan {
        self.span
    }
}

impl Display for Placement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.index, self.lane, self.span)
    }
}

/// Aggregate width statistics of a layout.
///
/// Widths enter the sums scaled by 100, i.e. as percentages of the axis:
/// `width_sum = Σ 100·wᵢ` and `width_sum_sq = Σ (100·wᵢ)²`. The two
/// moments are enough to report mean width and width variance for a
/// render without keeping the per-block widths around.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutStats {
    width_sum: f64,
    width_sum_sq: f64,
}

impl LayoutStats {
    /// Accumulates the statistics over per-block widths in `[0, 1]`.
    pub fn from_widths<I>(widths: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut stats = Self::default();
        for width in widths {
            let percent = width * 100.0;
            stats.width_sum += percent;
            stats.width_sum_sq += percent * percent;
        }
        stats
    }

    #[inline]
    pub fn width_sum(&self) -> f64 {
        self.width_sum
    }

    #[inline]
    pub fn width_sum_sq(&self) -> f64 {
        self.width_sum_sq
    }
}

impl Display for LayoutStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Σw = {:.3}, Σw² = {:.3}",
            self.width_sum, self.width_sum_sq
        )
    }
}

/// The result of one layout computation: per-block placements in input
/// order, the number of lanes used, and aggregate width statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    placements: Vec<Placement>,
    lane_count: u32,
    stats: LayoutStats,
}

impl Layout {
    #[inline]
    pub fn new(placements: Vec<Placement>, lane_count: u32, stats: LayoutStats) -> Self {
        Self {
            placements,
            lane_count,
            stats,
        }
    }

    /// Placements in input order; `placements()[i]` lays out input event `i`.
    #[inline]
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// The minimum number of lanes the partitioner needed.
    #[inline]
    pub fn lane_count(&self) -> u32 {
        self.lane_count
    }

    #[inline]
    pub fn stats(&self) -> LayoutStats {
        self.stats
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Placement> {
        self.placements.iter()
    }
}

impl Display for Layout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Layout ({} lanes):", self.lane_count)?;
        for placement in &self.placements {
            writeln!(f, "  {}", placement)?;
        }
        write!(f, "  {}", self.stats)
    }
}

impl<'a> IntoIterator for &'a Layout {
    type Item = &'a Placement;
    type IntoIter = std::slice::Iter<'a, Placement>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_accumulate_percent_moments() {
        let stats = LayoutStats::from_widths([0.5, 0.5, 1.0]);
        assert!((stats.width_sum() - 200.0).abs() < 1e-12);
        assert!((stats.width_sum_sq() - 15_000.0).abs() < 1e-12);
    }

    #[test]
    fn stats_of_nothing_are_zero() {
        let stats = LayoutStats::from_widths(std::iter::empty());
        assert_eq!(stats.width_sum(), 0.0);
        assert_eq!(stats.width_sum_sq(), 0.0);
    }

    #[test]
    fn layout_accessors() {
        let placements = vec![
            Placement::new(BlockIndex::new(0), LaneIndex::new(0), UnitSpan::full()),
            Placement::new(
                BlockIndex::new(1),
                LaneIndex::new(1),
                UnitSpan::new(0.5, 0.5),
            ),
        ];
        let layout = Layout::new(placements, 2, LayoutStats::from_widths([1.0, 0.5]));
        assert_eq!(layout.len(), 2);
        assert!(!layout.is_empty());
        assert_eq!(layout.lane_count(), 2);
        assert_eq!(layout.placements()[1].lane(), LaneIndex::new(1));
        assert_eq!(layout.iter().count(), 2);
    }
}
