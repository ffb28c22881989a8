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

//! Initial placement seeding.
//!
//! A block's width budget is determined by the longest conflict chain it
//! lies on: starting from the deepest lanes, every block reachable along
//! condensed left edges belongs to a chain that genuinely needs
//! `lane + 1` lanes, so it receives `width = 1 / path_depth` and sits at
//! `left = lane / path_depth`. Blocks on shorter chains get
//! proportionally more width than the flat `1 / lane_count` fallback.

use crate::block::ScheduleBlock;
use lane_pack_core::unit::UnitSpan;

/// Seeds placements from conflict-chain depths.
///
/// Re-sorts `order` by lane descending; `stack` is caller-provided
/// scratch. Leaves every block's `visited` flag set.
pub(crate) fn seed_chains(blocks: &mut [ScheduleBlock], order: &mut [u32], stack: &mut Vec<u32>) {
    order.sort_unstable_by(|&a, &b| blocks[b as usize].lane.cmp(&blocks[a as usize].lane));

    for oi in 0..order.len() {
        let start = order[oi] as usize;
        if blocks[start].visited {
            continue;
        }
        let path_depth = blocks[start].lane + 1;
        stack.clear();
        stack.push(start as u32);
        while let Some(top) = stack.pop() {
            let b = top as usize;
            blocks[b].visited = true;
            blocks[b].path_depth = path_depth;
            for k in 0..blocks[b].cleft_n.len() {
                let adj = blocks[b].cleft_n[k] as usize;
                if !blocks[adj].visited {
                    stack.push(adj as u32);
                }
            }
        }
    }

    for block in blocks.iter_mut() {
        let depth = f64::from(block.path_depth);
        block.span = UnitSpan::new(f64::from(block.lane) / depth, 1.0 / depth);
    }
}

/// Flat fallback seeding: every lane gets `1 / lane_count` of the axis.
pub(crate) fn seed_uniform(blocks: &mut [ScheduleBlock], lane_count: u32) {
    debug_assert!(lane_count >= 1);
    let total = f64::from(lane_count);
    for block in blocks.iter_mut() {
        block.span = UnitSpan::new(f64::from(block.lane) / total, 1.0 / total);
    }
}

pub(crate) fn clear_visited(blocks: &mut [ScheduleBlock]) {
    for block in blocks.iter_mut() {
        block.visited = false;
    }
}
