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

//! Exact layout via one global mixed-integer program.
//!
//! Each conflicting pair gets a binary ordering variable `y`; Big-M
//! relaxation turns the either-left-of disjunction into two linear rows.
//! The branch-and-bound runs under a wall-clock budget, so large
//! instances degrade to the best incumbent instead of hanging a render.

use crate::block::ScheduleBlock;
use good_lp::{
    constraint, solvers::coin_cbc::coin_cbc, variable, variables, Expression, ResolutionError,
    Solution, SolverModel, Variable,
};
use lane_pack_core::{time::TimeDelta, unit::UnitSpan};

/// Big-M constant relaxing the pairwise non-overlap disjunctions.
const BIG_M: f64 = 10.0;

/// Wall-clock budget for the branch-and-bound, in seconds.
const TIME_LIMIT_SECS: u32 = 10;

/// Solves the whole instance as one MILP and writes the primal values
/// back into the block spans. Expects `order` sorted by start time.
pub(crate) fn solve_exact(
    blocks: &mut [ScheduleBlock],
    order: &[u32],
    conflict_slack: i32,
    lane_count: u32,
) -> Result<(), ResolutionError> {
    let n = blocks.len();
    let slack = TimeDelta::new(conflict_slack);
    let min_width = 1.0 / f64::from(lane_count);

    let mut vars = variables!();
    let mut lefts: Vec<Variable> = Vec::with_capacity(n);
    let mut widths: Vec<Variable> = Vec::with_capacity(n);
    for _ in 0..n {
        lefts.push(vars.add(variable().min(0.0)));
        widths.push(vars.add(variable().min(min_width).max(1.0)));
    }

    // one binary ordering variable per conflicting pair, enumerated with
    // the same start-sorted scan as the conflict graph
    let mut pairs: Vec<(usize, usize, Variable)> = Vec::new();
    for i in 0..order.len() {
        let bi = order[i] as usize;
        for &oj in &order[i + 1..] {
            let bj = oj as usize;
            if blocks[bj].start() + slack >= blocks[bi].end() {
                break;
            }
            pairs.push((bi, bj, vars.add(variable().binary())));
        }
    }

    let total_width = widths
        .iter()
        .fold(Expression::from(0.0), |acc, &w| acc + w);
    let mut model = vars.maximise(total_width).using(coin_cbc);
    model.set_parameter("sec", &TIME_LIMIT_SECS.to_string());

    for &(i, j, y) in &pairs {
        let (li, wi, lj, wj) = (lefts[i], widths[i], lefts[j], widths[j]);
        // y = 0: i left of j; y = 1: j left of i
        model = model.with(constraint!(li + wi - lj - BIG_M * y <= 0.0));
        model = model.with(constraint!(lj + wj - li + BIG_M * y <= BIG_M));
    }
    for i in 0..n {
        let (l, w) = (lefts[i], widths[i]);
        model = model.with(constraint!(l + w <= 1.0));
    }

    let solution = model.solve()?;
    for (i, block) in blocks.iter_mut().enumerate() {
        block.span = UnitSpan::new(solution.value(lefts[i]), solution.value(widths[i]));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::blocks_from_pairs;
    use crate::lanes;
    use lane_pack_core::unit::approx_eq;
    use lane_pack_model::options::AssignMethod;

    fn solved(pairs: &[(i16, i16)]) -> (Vec<ScheduleBlock>, u32) {
        let (mut blocks, mut order) = blocks_from_pairs(pairs);
        let mut scratch = Vec::new();
        let total = lanes::assign(
            &mut blocks,
            &mut order,
            &mut scratch,
            0,
            AssignMethod::LowestLane,
        );
        solve_exact(&mut blocks, &order, 0, total).unwrap();
        (blocks, total)
    }

    #[test]
    fn overlapping_pair_splits_the_axis() {
        let (blocks, total) = solved(&[(0, 60), (30, 90)]);
        assert_eq!(total, 2);
        for block in &blocks {
            assert!(approx_eq(block.span.width(), 0.5));
        }
        assert!(!blocks[0].span.overlaps(blocks[1].span));
    }

    #[test]
    fn disjoint_blocks_each_take_everything() {
        let (blocks, _) = solved(&[(0, 60), (120, 180)]);
        for block in &blocks {
            assert!(approx_eq(block.span.width(), 1.0));
        }
    }

    #[test]
    fn staircase_fills_the_axis_without_overlap() {
        let (blocks, _) = solved(&[(0, 60), (30, 90), (60, 120)]);
        let total_width: f64 = blocks.iter().map(|b| b.span.width()).sum();
        assert!(total_width >= 1.5 - 1e-6);
        for a in &blocks {
            assert!(a.span.left() >= -1e-9);
            assert!(a.span.right() <= 1.0 + 1e-9);
        }
        assert!(!blocks[0].span.overlaps(blocks[1].span));
        assert!(!blocks[1].span.overlaps(blocks[2].span));
    }
}
