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

//! Fixed-point width refinement.
//!
//! Each pass solves one LP per non-fixed connected component of the
//! condensed graph, then re-detects numerically locked blocks. Locked
//! blocks leave the variable set, their components fall apart into
//! smaller ones, and the loop stops as soon as a pass locks nothing new.

use crate::{block::ScheduleBlock, fixed, lp};
use lane_pack_model::options::{LayoutOptions, RefineModel};
use tracing::{debug, warn};

/// Collects into `buffer` the connected component of `start` over the
/// undirected condensed graph, skipping visited (i.e. fixed) blocks.
/// Returns the component size.
pub(crate) fn bfs_component(
    blocks: &mut [ScheduleBlock],
    buffer: &mut Vec<u32>,
    start: usize,
) -> usize {
    buffer.clear();
    buffer.push(start as u32);
    blocks[start].visited = true;
    let mut head = 0;
    while head < buffer.len() {
        let b = buffer[head] as usize;
        for k in 0..blocks[b].cleft_n.len() {
            let v = blocks[b].cleft_n[k] as usize;
            if !blocks[v].visited {
                blocks[v].visited = true;
                buffer.push(v as u32);
            }
        }
        for k in 0..blocks[b].cright_n.len() {
            let v = blocks[b].cright_n[k] as usize;
            if !blocks[v].visited {
                blocks[v].visited = true;
                buffer.push(v as u32);
            }
        }
        head += 1;
    }
    buffer.len()
}

/// Runs refinement passes until the fixed count stops growing or the
/// iteration budget is exhausted. A solver failure on a component keeps
/// that component's current placement (widths never shrink, so the
/// layout stays feasible).
pub(crate) fn refine(
    blocks: &mut [ScheduleBlock],
    buffer: &mut Vec<u32>,
    idx_map: &mut [usize],
    options: &LayoutOptions,
) {
    fixed::sweep(blocks, false);
    let mut fixed_count = fixed::sync_visited(blocks);

    for pass in 0..options.refine_iterations() {
        for i in 0..blocks.len() {
            if blocks[i].visited {
                continue;
            }
            bfs_component(blocks, buffer, i);
            let result = match options.refine_model() {
                RefineModel::PerBlock => lp::expand_per_block(blocks, buffer, idx_map),
                RefineModel::SharedWidth => lp::expand_shared(blocks, buffer, idx_map),
            };
            if let Err(error) = result {
                warn!(
                    component = buffer.len(),
                    %error,
                    "width refinement solve failed; keeping current placement"
                );
            }
        }

        for block in blocks.iter_mut() {
            block.visited = block.is_fixed;
        }
        fixed::sweep(blocks, true);
        let count = fixed::sync_visited(blocks);
        if count == fixed_count {
            debug!(passes = pass + 1, fixed = count, "width refinement converged");
            break;
        }
        fixed_count = count;
    }
}
