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

use lane_pack_core::{
    time::{TimeDelta, TimeInterval, TimePoint},
    unit::UnitSpan,
};
use lane_pack_model::event::EventSpan;

/// Per-event working state of the layout pipeline.
///
/// Blocks live in one engine-owned array in input order, so `idx` doubles
/// as the array position and as the stable key tying solver variables back
/// to events. Adjacency is stored as block indices into that array; the
/// lists are only meaningful within the `compute` call that built them.
#[derive(Debug, Clone)]
pub(crate) struct ScheduleBlock {
    /// Stable input position of the event.
    pub(crate) idx: usize,
    pub(crate) times: TimeInterval<i32>,
    pub(crate) duration: TimeDelta<i32>,
    /// Lane from interval partitioning, 0-based.
    pub(crate) lane: u32,
    /// Total lanes attributed to the deepest conflict chain through this
    /// block; set by chain seeding.
    pub(crate) path_depth: u32,
    /// Current placement on the unit axis.
    pub(crate) span: UnitSpan,
    /// The placement is final and acts as a constant in later programs.
    pub(crate) is_fixed: bool,
    /// Scratch flag shared by the BFS/DFS passes.
    pub(crate) visited: bool,
    /// Conflicting blocks on lower lanes.
    pub(crate) left_n: Vec<u32>,
    /// Conflicting blocks on higher lanes.
    pub(crate) right_n: Vec<u32>,
    /// Transitive reduction of `left_n`.
    pub(crate) cleft_n: Vec<u32>,
    /// Transitive reduction of `right_n`.
    pub(crate) cright_n: Vec<u32>,
}

impl ScheduleBlock {
    pub(crate) fn new(idx: usize, event: EventSpan) -> Self {
        Self {
            idx,
            times: event.interval(),
            duration: event.duration(),
            lane: 0,
            path_depth: 0,
            span: UnitSpan::default(),
            is_fixed: false,
            visited: false,
            left_n: Vec::new(),
            right_n: Vec::new(),
            cleft_n: Vec::new(),
            cright_n: Vec::new(),
        }
    }

    /// Reinitializes the block for a new computation, keeping the
    /// capacity of the adjacency lists.
    pub(crate) fn reset(&mut self, idx: usize, event: EventSpan) {
        self.idx = idx;
        self.times = event.interval();
        self.duration = event.duration();
        self.lane = 0;
        self.path_depth = 0;
        self.span = UnitSpan::default();
        self.is_fixed = false;
        self.visited = false;
        self.left_n.clear();
        self.right_n.clear();
        self.cleft_n.clear();
        self.cright_n.clear();
    }

    #[inline]
    pub(crate) fn start(&self) -> TimePoint<i32> {
        self.times.start()
    }

    #[inline]
    pub(crate) fn end(&self) -> TimePoint<i32> {
        self.times.end()
    }
}

/// Builds fresh blocks (plus the identity traversal order) from raw
/// minute pairs. Test scaffolding for the stage modules.
#[cfg(test)]
pub(crate) fn blocks_from_pairs(pairs: &[(i16, i16)]) -> (Vec<ScheduleBlock>, Vec<u32>) {
    let blocks: Vec<ScheduleBlock> = pairs
        .iter()
        .enumerate()
        .map(|(idx, &(start, end))| {
            ScheduleBlock::new(idx, EventSpan::new(start, end).expect("valid test span"))
        })
        .collect();
    let order = (0..blocks.len() as u32).collect();
    (blocks, order)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_keeps_adjacency_capacity() {
        let span = EventSpan::new(0, 60).unwrap();
        let mut block = ScheduleBlock::new(0, span);
        block.left_n.extend([1, 2, 3]);
        block.is_fixed = true;
        block.lane = 4;

        let capacity = block.left_n.capacity();
        block.reset(1, EventSpan::new(30, 90).unwrap());

        assert_eq!(block.idx, 1);
        assert_eq!(block.start().value(), 30);
        assert_eq!(block.duration.value(), 60);
        assert_eq!(block.lane, 0);
        assert!(!block.is_fixed);
        assert!(block.left_n.is_empty());
        assert_eq!(block.left_n.capacity(), capacity);
    }
}
