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

//! Conflict graph construction and transitive reduction.
//!
//! The adjacency lists give `O(degree)` traversal; the dense matrix gives
//! the `O(1)` "is `j` left of `i`" probes that make the reduction cheap.
//! Both representations are needed: reduction over lists alone would be
//! cubic in the degree.

use crate::block::ScheduleBlock;
use lane_pack_core::time::TimeDelta;

/// Dense boolean reachability matrix over block indices.
///
/// `get(i, j)` answers whether block `j` conflicts with block `i` from a
/// lower lane, i.e. whether `j` is in `left_n` of `i`. The backing
/// storage is engine-owned and grows monotonically with the largest
/// instance seen.
#[derive(Debug, Default)]
pub(crate) struct ConflictMatrix {
    n: usize,
    cells: Vec<bool>,
}

impl ConflictMatrix {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Clears the matrix and resizes it for `n` blocks.
    pub(crate) fn reset(&mut self, n: usize) {
        self.n = n;
        self.cells.clear();
        self.cells.resize(n * n, false);
    }

    #[inline]
    pub(crate) fn set(&mut self, i: usize, j: usize) {
        self.cells[i * self.n + j] = true;
    }

    #[inline]
    pub(crate) fn get(&self, i: usize, j: usize) -> bool {
        self.cells[i * self.n + j]
    }
}

/// Populates `left_n`/`right_n` and the matrix for every conflicting pair.
///
/// Expects `order` sorted by start time: the scan for each block stops at
/// the first candidate starting after its end (minus `slack`), so the
/// total work is proportional to the number of conflicts.
pub(crate) fn link(
    blocks: &mut [ScheduleBlock],
    order: &[u32],
    matrix: &mut ConflictMatrix,
    slack: i32,
) {
    let slack = TimeDelta::new(slack);
    for i in 0..order.len() {
        let bi = order[i] as usize;
        for &oj in &order[i + 1..] {
            let bj = oj as usize;
            if blocks[bj].start() + slack >= blocks[bi].end() {
                break;
            }
            if blocks[bi].lane < blocks[bj].lane {
                matrix.set(bj, bi);
                blocks[bj].left_n.push(bi as u32);
                blocks[bi].right_n.push(bj as u32);
            } else {
                matrix.set(bi, bj);
                blocks[bj].right_n.push(bi as u32);
                blocks[bi].left_n.push(bj as u32);
            }
        }
    }
}

/// Computes `cleft_n`/`cright_n`, the transitive reductions of the
/// adjacency lists: a neighbour survives only if it is not already
/// reachable through another neighbour on the same side. The reduction
/// preserves the reachability closure, so downstream constraints stay
/// equivalent while their count drops to roughly the Hasse diagram size.
pub(crate) fn condense(blocks: &mut [ScheduleBlock], matrix: &ConflictMatrix) {
    for i in 0..blocks.len() {
        let left = std::mem::take(&mut blocks[i].left_n);
        let mut cleft = std::mem::take(&mut blocks[i].cleft_n);
        for &v1 in &left {
            if !left.iter().any(|&v| matrix.get(v as usize, v1 as usize)) {
                cleft.push(v1);
            }
        }
        blocks[i].left_n = left;
        blocks[i].cleft_n = cleft;

        let right = std::mem::take(&mut blocks[i].right_n);
        let mut cright = std::mem::take(&mut blocks[i].cright_n);
        for &v1 in &right {
            if !right.iter().any(|&v| matrix.get(v1 as usize, v as usize)) {
                cright.push(v1);
            }
        }
        blocks[i].right_n = right;
        blocks[i].cright_n = cright;
    }
}
