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

//! Linear programs that grow the widths of one connected component.
//!
//! Only condensed edges become constraints, and fixed blocks enter as
//! constant bounds rather than variables, so the program size tracks the
//! Hasse diagram of the component instead of its full conflict relation.

use crate::block::ScheduleBlock;
use good_lp::{
    constraint, default_solver, variable, variables, Expression, ResolutionError, Solution,
    SolverModel, Variable,
};
use lane_pack_core::unit::{UnitSpan, UNIT_EPS};

/// Constant bounds contributed by fixed neighbours, plus the non-fixed
/// condensed left edges, all in component-local positions.
struct ComponentBounds {
    /// Per member: the largest right edge among its fixed left
    /// neighbours (0 when there is none).
    max_left_fixed: Vec<f64>,
    /// Per member: the smallest left edge among its fixed right
    /// neighbours (1 when there is none).
    min_right_fixed: Vec<f64>,
    /// `(member, left-neighbour)` pairs needing an ordering constraint.
    edges: Vec<(usize, usize)>,
}

fn component_bounds(
    blocks: &[ScheduleBlock],
    comp: &[u32],
    idx_map: &mut [usize],
) -> ComponentBounds {
    for (pos, &b) in comp.iter().enumerate() {
        idx_map[b as usize] = pos;
    }
    let mut bounds = ComponentBounds {
        max_left_fixed: vec![0.0; comp.len()],
        min_right_fixed: vec![1.0; comp.len()],
        edges: Vec::new(),
    };
    for (pos, &bi) in comp.iter().enumerate() {
        let block = &blocks[bi as usize];
        for &v in &block.cleft_n {
            let neighbour = &blocks[v as usize];
            if neighbour.is_fixed {
                bounds.max_left_fixed[pos] =
                    bounds.max_left_fixed[pos].max(neighbour.span.right());
            } else {
                // non-fixed condensed neighbours are always component members
                bounds.edges.push((pos, idx_map[v as usize]));
            }
        }
        for &v in &block.cright_n {
            let neighbour = &blocks[v as usize];
            if neighbour.is_fixed {
                bounds.min_right_fixed[pos] =
                    bounds.min_right_fixed[pos].min(neighbour.span.left());
            }
        }
    }
    bounds
}

/// Per-block width expansion in two phases: maximize the total width,
/// then — holding the total — minimize the absolute deviation of the
/// widths from the component mean. Widths never drop below their current
/// values.
pub(crate) fn expand_per_block(
    blocks: &mut [ScheduleBlock],
    comp: &[u32],
    idx_map: &mut [usize],
) -> Result<(), ResolutionError> {
    let nc = comp.len();
    let bounds = component_bounds(blocks, comp, idx_map);

    // phase one: how wide can the component get in total?
    let mut vars = variables!();
    let mut lefts: Vec<Variable> = Vec::with_capacity(nc);
    let mut widths: Vec<Variable> = Vec::with_capacity(nc);
    for pos in 0..nc {
        let seed_width = blocks[comp[pos] as usize].span.width();
        lefts.push(vars.add(variable().min(bounds.max_left_fixed[pos])));
        widths.push(vars.add(variable().min(seed_width)));
    }
    let total_width = widths
        .iter()
        .fold(Expression::from(0.0), |acc, &w| acc + w);
    let mut model = vars.maximise(total_width).using(default_solver);
    for &(b, v) in &bounds.edges {
        let (lb, lv, wv) = (lefts[b], lefts[v], widths[v]);
        model = model.with(constraint!(lb - lv - wv >= 0.0));
    }
    for pos in 0..nc {
        let (l, w) = (lefts[pos], widths[pos]);
        model = model.with(constraint!(l + w <= bounds.min_right_fixed[pos]));
    }
    let phase_one = model.solve()?;
    let optimum: f64 = widths.iter().map(|&w| phase_one.value(w)).sum();
    let mean = optimum / nc as f64;

    // phase two: same feasible region plus deviation variables
    // `t >= |w - mean|`, coupled to the phase-one optimum
    let mut vars = variables!();
    let mut lefts: Vec<Variable> = Vec::with_capacity(nc);
    let mut widths: Vec<Variable> = Vec::with_capacity(nc);
    let mut deviations: Vec<Variable> = Vec::with_capacity(nc);
    for pos in 0..nc {
        let seed_width = blocks[comp[pos] as usize].span.width();
        lefts.push(vars.add(variable().min(bounds.max_left_fixed[pos])));
        widths.push(vars.add(variable().min(seed_width)));
        deviations.push(vars.add(variable().min(0.0)));
    }
    let spread = deviations
        .iter()
        .fold(Expression::from(0.0), |acc, &t| acc + t);
    let mut model = vars.minimise(spread).using(default_solver);
    for &(b, v) in &bounds.edges {
        let (lb, lv, wv) = (lefts[b], lefts[v], widths[v]);
        model = model.with(constraint!(lb - lv - wv >= 0.0));
    }
    for pos in 0..nc {
        let (l, w, t) = (lefts[pos], widths[pos], deviations[pos]);
        model = model.with(constraint!(l + w <= bounds.min_right_fixed[pos]));
        model = model.with(constraint!(t + w >= mean));
        model = model.with(constraint!(t - w >= -mean));
    }
    let total_width = widths
        .iter()
        .fold(Expression::from(0.0), |acc, &w| acc + w);
    model = model.with(constraint!(total_width >= optimum - UNIT_EPS));
    let phase_two = model.solve()?;

    for pos in 0..nc {
        blocks[comp[pos] as usize].span = UnitSpan::new(
            phase_two.value(lefts[pos]),
            phase_two.value(widths[pos]),
        );
    }
    Ok(())
}

/// Shared-width expansion: one width variable for the whole component,
/// maximized; every member ends up with the same width.
pub(crate) fn expand_shared(
    blocks: &mut [ScheduleBlock],
    comp: &[u32],
    idx_map: &mut [usize],
) -> Result<(), ResolutionError> {
    let nc = comp.len();
    let bounds = component_bounds(blocks, comp, idx_map);

    let mut vars = variables!();
    let mut lefts: Vec<Variable> = Vec::with_capacity(nc);
    for pos in 0..nc {
        lefts.push(vars.add(variable().min(bounds.max_left_fixed[pos])));
    }
    let shared_width = vars.add(variable().min(0.0).max(1.0));
    let mut model = vars.maximise(shared_width).using(default_solver);
    for &(b, v) in &bounds.edges {
        let (lb, lv) = (lefts[b], lefts[v]);
        model = model.with(constraint!(lb - lv - shared_width >= 0.0));
    }
    for pos in 0..nc {
        let l = lefts[pos];
        model = model.with(constraint!(l + shared_width <= bounds.min_right_fixed[pos]));
    }
    let solution = model.solve()?;

    let width = solution.value(shared_width);
    for pos in 0..nc {
        blocks[comp[pos] as usize].span =
            UnitSpan::new(solution.value(lefts[pos]), width);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::blocks_from_pairs;
    use lane_pack_core::unit::approx_eq;

    /// Two-block component: 0 left of 1, nothing fixed.
    fn pair_component() -> (Vec<ScheduleBlock>, Vec<u32>, Vec<usize>) {
        let (mut blocks, _) = blocks_from_pairs(&[(0, 60), (30, 90)]);
        blocks[1].cleft_n.push(0);
        blocks[0].cright_n.push(1);
        blocks[0].span = UnitSpan::new(0.0, 0.5);
        blocks[1].span = UnitSpan::new(0.5, 0.5);
        (blocks, vec![0, 1], vec![0, 0])
    }

    #[test]
    fn bounds_default_to_the_unit_axis() {
        let (blocks, comp, mut idx_map) = pair_component();
        let bounds = component_bounds(&blocks, &comp, &mut idx_map);
        assert_eq!(bounds.max_left_fixed, vec![0.0, 0.0]);
        assert_eq!(bounds.min_right_fixed, vec![1.0, 1.0]);
        assert_eq!(bounds.edges, vec![(1, 0)]);
    }

    #[test]
    fn fixed_neighbours_become_constant_bounds() {
        let (mut blocks, _, mut idx_map) = pair_component();
        blocks[0].is_fixed = true;
        blocks[0].span = UnitSpan::new(0.0, 0.25);
        // component shrinks to the non-fixed block
        let comp = vec![1u32];
        let bounds = component_bounds(&blocks, &comp, &mut idx_map);
        assert!(bounds.edges.is_empty());
        assert!(approx_eq(bounds.max_left_fixed[0], 0.25));
        assert!(approx_eq(bounds.min_right_fixed[0], 1.0));
    }

    #[test]
    fn per_block_expansion_fills_the_axis() {
        let (mut blocks, comp, mut idx_map) = pair_component();
        blocks[0].span = UnitSpan::new(0.0, 0.25);
        blocks[1].span = UnitSpan::new(0.5, 0.25);
        expand_per_block(&mut blocks, &comp, &mut idx_map).unwrap();
        // widths may only grow, total reaches 1, deviation pushes to equality
        assert!(approx_eq(blocks[0].span.width(), 0.5));
        assert!(approx_eq(blocks[1].span.width(), 0.5));
        assert!(approx_eq(blocks[1].span.right(), 1.0));
        assert!(blocks[0].span.right() <= blocks[1].span.left() + 1e-6);
    }

    #[test]
    fn per_block_respects_fixed_right_walls() {
        let (mut blocks, _, mut idx_map) = pair_component();
        blocks[1].is_fixed = true;
        blocks[1].span = UnitSpan::new(0.6, 0.4);
        blocks[0].span = UnitSpan::new(0.0, 0.25);
        let comp = vec![0u32];
        expand_per_block(&mut blocks, &comp, &mut idx_map).unwrap();
        assert!(approx_eq(blocks[0].span.left(), 0.0));
        assert!(approx_eq(blocks[0].span.width(), 0.6));
    }

    #[test]
    fn shared_model_gives_every_member_the_same_width() {
        let (mut blocks, comp, mut idx_map) = pair_component();
        blocks[0].span = UnitSpan::new(0.0, 0.3);
        blocks[1].span = UnitSpan::new(0.5, 0.2);
        expand_shared(&mut blocks, &comp, &mut idx_map).unwrap();
        assert!(approx_eq(blocks[0].span.width(), 0.5));
        assert!(approx_eq(blocks[1].span.width(), 0.5));
        assert!(!blocks[0].span.overlaps(blocks[1].span));
    }
}
