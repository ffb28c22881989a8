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

//! Numerical fixed-point detection.
//!
//! A block is *fixed* when a chain of tight abutments connects its left
//! edge to the axis origin and (transitively, through already-fixed
//! blocks) its right edge to 1.0. Fixed blocks are frozen as constants in
//! later refinement programs, which splits their component into smaller
//! independent subproblems.

use crate::block::ScheduleBlock;
use lane_pack_core::unit::approx_eq;

struct Frame {
    block: usize,
    child: usize,
    flag: bool,
}

/// Decides fixedness of `start` by walking condensed left edges whose
/// endpoints abut within tolerance. Marks every block it touches as
/// visited and records the verdict in `is_fixed`.
///
/// The fold over the neighbours deliberately evaluates every abutting
/// edge: an early exit on the first fixed neighbour would leave the
/// verdicts of transitive predecessors unset. The traversal uses an
/// explicit stack; the condensed left relation is a DAG (edges strictly
/// decrease the lane), so no cycle check is needed.
pub(crate) fn find_fixed(blocks: &mut [ScheduleBlock], start: usize) -> bool {
    blocks[start].visited = true;
    if blocks[start].span.at_origin() {
        blocks[start].is_fixed = true;
        return true;
    }

    let mut frames = vec![Frame {
        block: start,
        child: 0,
        flag: false,
    }];
    loop {
        let fi = frames.len() - 1;
        let b = frames[fi].block;
        let left = blocks[b].span.left();
        let mut descended = false;
        while frames[fi].child < blocks[b].cleft_n.len() {
            let a = blocks[b].cleft_n[frames[fi].child] as usize;
            frames[fi].child += 1;
            if !approx_eq(left, blocks[a].span.right()) {
                continue;
            }
            if blocks[a].visited {
                frames[fi].flag |= blocks[a].is_fixed;
            } else {
                blocks[a].visited = true;
                if blocks[a].span.at_origin() {
                    blocks[a].is_fixed = true;
                    frames[fi].flag = true;
                } else {
                    frames.push(Frame {
                        block: a,
                        child: 0,
                        flag: false,
                    });
                    descended = true;
                    break;
                }
            }
        }
        if descended {
            continue;
        }
        let fixed = frames[fi].flag;
        blocks[b].is_fixed = fixed;
        frames.pop();
        match frames.last_mut() {
            Some(parent) => parent.flag |= fixed,
            None => return fixed,
        }
    }
}

/// Seeds fixed detection over all unvisited blocks.
///
/// A block enters the search when its right edge touches 1.0, or — with
/// `check_fixed_neighbors`, used between refinement passes — when it
/// abuts the left edge of an already fixed right neighbour.
pub(crate) fn sweep(blocks: &mut [ScheduleBlock], check_fixed_neighbors: bool) {
    for i in 0..blocks.len() {
        if blocks[i].visited {
            continue;
        }
        if blocks[i].span.is_flush_right() {
            find_fixed(blocks, i);
            continue;
        }
        if !check_fixed_neighbors {
            continue;
        }
        let right = blocks[i].span.right();
        for k in 0..blocks[i].right_n.len() {
            let n = blocks[i].right_n[k] as usize;
            if blocks[n].is_fixed && approx_eq(right, blocks[n].span.left()) {
                find_fixed(blocks, i);
                break;
            }
        }
    }
}

/// Counts fixed blocks while resetting `visited` to the fixedness flag,
/// the traversal precondition of both the component BFS and [`sweep`].
pub(crate) fn sync_visited(blocks: &mut [ScheduleBlock]) -> usize {
    let mut count = 0;
    for block in blocks.iter_mut() {
        block.visited = block.is_fixed;
        count += usize::from(block.is_fixed);
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::blocks_from_pairs;
    use lane_pack_core::unit::UnitSpan;

    /// Lays the blocks out manually; the detector only looks at spans
    /// and condensed edges.
    fn place(blocks: &mut [ScheduleBlock], spans: &[(f64, f64)]) {
        for (block, &(left, width)) in blocks.iter_mut().zip(spans) {
            block.span = UnitSpan::new(left, width);
        }
    }

    #[test]
    fn block_at_origin_is_fixed() {
        let (mut blocks, _) = blocks_from_pairs(&[(0, 60)]);
        place(&mut blocks, &[(0.0, 0.4)]);
        assert!(find_fixed(&mut blocks, 0));
        assert!(blocks[0].is_fixed);
    }

    #[test]
    fn solver_drift_at_origin_still_counts() {
        let (mut blocks, _) = blocks_from_pairs(&[(0, 60)]);
        place(&mut blocks, &[(5e-9, 0.4)]);
        assert!(find_fixed(&mut blocks, 0));
    }

    #[test]
    fn tight_chain_to_origin_fixes_the_whole_chain() {
        let (mut blocks, _) = blocks_from_pairs(&[(0, 60), (30, 90)]);
        blocks[1].cleft_n.push(0);
        place(&mut blocks, &[(0.0, 0.5), (0.5, 0.5)]);
        assert!(find_fixed(&mut blocks, 1));
        assert!(blocks[0].is_fixed);
        assert!(blocks[1].is_fixed);
    }

    #[test]
    fn gap_breaks_the_chain() {
        // right-flush block whose left edge floats: not fixed
        let (mut blocks, _) = blocks_from_pairs(&[(0, 60), (30, 90)]);
        blocks[1].cleft_n.push(0);
        place(&mut blocks, &[(0.0, 0.4), (0.5, 0.5)]);
        assert!(!find_fixed(&mut blocks, 1));
        assert!(!blocks[1].is_fixed);
        // the predecessor was never on a tight edge, so it keeps its state
        assert!(!blocks[0].is_fixed);
    }

    #[test]
    fn every_abutting_neighbour_receives_a_verdict() {
        // diamond: block 2 abuts both 0 (anchored) and 1 (floating);
        // the fold must not stop at the first fixed edge
        let (mut blocks, _) = blocks_from_pairs(&[(0, 60), (0, 60), (30, 90)]);
        blocks[2].cleft_n.extend([0, 1]);
        place(&mut blocks, &[(0.0, 0.5), (0.1, 0.4), (0.5, 0.5)]);
        assert!(find_fixed(&mut blocks, 2));
        assert!(blocks[0].is_fixed);
        assert!(blocks[1].visited, "floating neighbour must be evaluated");
        assert!(!blocks[1].is_fixed);
    }

    #[test]
    fn verdicts_propagate_through_deep_chains() {
        let n = 64;
        let pairs: Vec<(i16, i16)> = (0..n).map(|i| (i as i16, i as i16 + 100)).collect();
        let (mut blocks, _) = blocks_from_pairs(&pairs);
        let width = 1.0 / n as f64;
        for i in 0..n {
            if i > 0 {
                blocks[i].cleft_n.push(i as u32 - 1);
            }
            blocks[i].span = UnitSpan::new(i as f64 * width, width);
        }
        assert!(find_fixed(&mut blocks, n - 1));
        assert!(blocks.iter().all(|b| b.is_fixed));
    }

    #[test]
    fn sweep_seeds_only_flush_right_blocks() {
        let (mut blocks, _) = blocks_from_pairs(&[(0, 60), (30, 90), (200, 230)]);
        blocks[1].cleft_n.push(0);
        blocks[0].right_n.push(1);
        // block 2 floats in the middle of the axis
        place(&mut blocks, &[(0.0, 0.5), (0.5, 0.5), (0.25, 0.5)]);
        sweep(&mut blocks, false);
        assert!(blocks[0].is_fixed);
        assert!(blocks[1].is_fixed);
        assert!(!blocks[2].is_fixed);
    }

    #[test]
    fn sweep_with_neighbors_catches_blocks_pinned_by_fixed_ones() {
        // block 0 abuts the fixed block 1 on its right and reaches back
        // to the origin
        let (mut blocks, _) = blocks_from_pairs(&[(0, 60), (30, 90)]);
        blocks[0].right_n.push(1);
        place(&mut blocks, &[(0.0, 0.5), (0.5, 0.5)]);
        blocks[1].is_fixed = true;
        blocks[1].visited = true;

        sweep(&mut blocks, false);
        assert!(!blocks[0].is_fixed, "plain sweep must not use neighbours");

        sweep(&mut blocks, true);
        assert!(blocks[0].is_fixed);
    }

    #[test]
    fn sync_visited_counts_and_mirrors() {
        let (mut blocks, _) = blocks_from_pairs(&[(0, 60), (30, 90), (60, 120)]);
        blocks[0].is_fixed = true;
        blocks[2].is_fixed = true;
        blocks[1].visited = true;
        assert_eq!(sync_visited(&mut blocks), 2);
        assert!(blocks[0].visited);
        assert!(!blocks[1].visited);
        assert!(blocks[2].visited);
    }
}
