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

//! Interval partitioning: assigns every block a lane such that blocks on
//! the same lane never overlap in time, using the minimum number of lanes.

use crate::block::ScheduleBlock;
use lane_pack_core::time::{TimeDelta, TimePoint};
use lane_pack_model::options::AssignMethod;
use std::{cmp::Reverse, collections::BinaryHeap};

/// Sorts `order` by start time ascending, longer events first on ties.
/// Both partitioning methods and the conflict-graph scan rely on this
/// order.
pub(crate) fn sort_by_start(blocks: &[ScheduleBlock], order: &mut [u32]) {
    order.sort_unstable_by(|&a, &b| {
        let (ba, bb) = (&blocks[a as usize], &blocks[b as usize]);
        ba.start()
            .cmp(&bb.start())
            .then(bb.duration.cmp(&ba.duration))
    });
}

/// Assigns lanes and returns the total lane count.
///
/// `registry` is caller-provided scratch (the engine's shared buffer).
pub(crate) fn assign(
    blocks: &mut [ScheduleBlock],
    order: &mut [u32],
    registry: &mut Vec<u32>,
    slack: i32,
    method: AssignMethod,
) -> u32 {
    if blocks.is_empty() {
        return 0;
    }
    sort_by_start(blocks, order);
    match method {
        AssignMethod::LowestLane => assign_lowest_lane(blocks, order, registry, slack),
        AssignMethod::MinHeap => assign_min_heap(blocks, order, slack),
    }
}

/// Greedy `O(n²)` variant: among the lanes whose last block has ended
/// (up to `slack`), reuse the one with the smallest index. Keeps lane
/// numbers as low and as stable as possible.
fn assign_lowest_lane(
    blocks: &mut [ScheduleBlock],
    order: &[u32],
    registry: &mut Vec<u32>,
    slack: i32,
) -> u32 {
    let slack = TimeDelta::new(slack);
    registry.clear();
    registry.push(order[0]);
    blocks[order[0] as usize].lane = 0;

    let mut lanes = 0u32;
    for &bi in &order[1..] {
        let b = bi as usize;
        let start = blocks[b].start();
        let mut slot = None;
        let mut best_lane = u32::MAX;
        for (k, &prev) in registry.iter().enumerate() {
            let prev_block = &blocks[prev as usize];
            if prev_block.end() <= start + slack && prev_block.lane < best_lane {
                best_lane = prev_block.lane;
                slot = Some(k);
            }
        }
        match slot {
            Some(k) => {
                blocks[b].lane = best_lane;
                registry[k] = bi;
            }
            None => {
                lanes += 1;
                blocks[b].lane = lanes;
                registry.push(bi);
            }
        }
    }
    lanes + 1
}

/// Classical `O(n log n)` variant over a min-heap of lane end times.
///
/// Note the slack is applied on the opposite side compared to
/// [`assign_lowest_lane`]: here a lane is reusable only when
/// `end + slack <= start`.
fn assign_min_heap(blocks: &mut [ScheduleBlock], order: &[u32], slack: i32) -> u32 {
    let slack = TimeDelta::new(slack);
    let mut heap: BinaryHeap<Reverse<(TimePoint<i32>, u32)>> =
        BinaryHeap::with_capacity(order.len());
    let first = order[0] as usize;
    blocks[first].lane = 0;
    heap.push(Reverse((blocks[first].end(), 0)));

    let mut lanes = 0u32;
    for &bi in &order[1..] {
        let b = bi as usize;
        let start = blocks[b].start();
        let &Reverse((earliest_end, lane)) = heap.peek().expect("heap holds one entry per lane");
        if earliest_end + slack > start {
            lanes += 1;
            blocks[b].lane = lanes;
        } else {
            blocks[b].lane = lane;
            heap.pop();
        }
        heap.push(Reverse((blocks[b].end(), blocks[b].lane)));
    }
    lanes + 1
}
