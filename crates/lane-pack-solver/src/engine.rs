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

//! The reusable layout engine tying the pipeline stages together.

use crate::{
    block::ScheduleBlock,
    chain,
    graph::{self, ConflictMatrix},
    lanes, milp, refine,
};
use lane_pack_model::{
    event::EventSpan,
    id::{BlockIndex, LaneIndex},
    options::LayoutOptions,
    solution::{Layout, LayoutStats, Placement},
};
use tracing::{instrument, warn};

/// Computes side-by-side layouts for sets of possibly overlapping events.
///
/// The engine owns all working memory — the block array, the traversal
/// order, BFS scratch, the solver index map and the conflict matrix —
/// and reuses it across [`compute`](Self::compute) calls; capacity only
/// ever grows. One engine therefore serves a whole rendering session,
/// and a call site that lays out many views amortizes every allocation.
///
/// # Examples
///
/// ```no_run
/// use lane_pack_model::prelude::*;
/// use lane_pack_solver::LayoutEngine;
///
/// let events = events_from_pairs(&[(540, 600), (570, 630)]).unwrap();
/// let mut engine = LayoutEngine::new();
/// let layout = engine.compute(&events);
/// assert_eq!(layout.lane_count(), 2);
/// ```
#[derive(Debug, Default)]
pub struct LayoutEngine {
    options: LayoutOptions,
    blocks: Vec<ScheduleBlock>,
    order: Vec<u32>,
    buffer: Vec<u32>,
    idx_map: Vec<usize>,
    matrix: ConflictMatrix,
}

impl LayoutEngine {
    pub fn new() -> Self {
        Self::with_options(LayoutOptions::default())
    }

    pub fn with_options(options: LayoutOptions) -> Self {
        Self {
            options,
            blocks: Vec::new(),
            order: Vec::new(),
            buffer: Vec::new(),
            idx_map: Vec::new(),
            matrix: ConflictMatrix::new(),
        }
    }

    #[inline]
    pub fn options(&self) -> LayoutOptions {
        self.options
    }

    /// Replaces the configuration used by subsequent computations.
    #[inline]
    pub fn set_options(&mut self, options: LayoutOptions) {
        self.options = options;
    }

    /// Runs the layout pipeline and returns one placement per input
    /// event, in input order.
    #[instrument(level = "debug", skip_all, fields(events = events.len()))]
    pub fn compute(&mut self, events: &[EventSpan]) -> Layout {
        if events.is_empty() {
            return Layout::new(Vec::new(), 0, LayoutStats::default());
        }
        self.prepare(events);

        let lane_count = lanes::assign(
            &mut self.blocks,
            &mut self.order,
            &mut self.buffer,
            self.options.assign_slack(),
            self.options.assign_method(),
        );

        if self.options.exact() {
            // uniform seeds double as the fallback placement when the
            // exact solve fails or times out without an incumbent
            chain::seed_uniform(&mut self.blocks, lane_count);
            if let Err(error) = milp::solve_exact(
                &mut self.blocks,
                &self.order,
                self.options.conflict_slack(),
                lane_count,
            ) {
                warn!(%error, "exact solve failed; falling back to seeded placement");
            }
            return self.collect(lane_count);
        }

        if lane_count <= 1 {
            chain::seed_uniform(&mut self.blocks, lane_count);
            return self.collect(lane_count);
        }

        graph::link(
            &mut self.blocks,
            &self.order,
            &mut self.matrix,
            self.options.conflict_slack(),
        );
        graph::condense(&mut self.blocks, &self.matrix);

        if self.options.chain_seeding() {
            chain::seed_chains(&mut self.blocks, &mut self.order, &mut self.buffer);
            chain::clear_visited(&mut self.blocks);
        } else {
            chain::seed_uniform(&mut self.blocks, lane_count);
        }

        refine::refine(
            &mut self.blocks,
            &mut self.buffer,
            &mut self.idx_map,
            &self.options,
        );

        self.collect(lane_count)
    }

    /// Rebuilds the per-call state, reusing every buffer.
    fn prepare(&mut self, events: &[EventSpan]) {
        let n = events.len();
        self.blocks.truncate(n);
        for (i, block) in self.blocks.iter_mut().enumerate() {
            block.reset(i, events[i]);
        }
        for i in self.blocks.len()..n {
            self.blocks.push(ScheduleBlock::new(i, events[i]));
        }
        self.order.clear();
        self.order.extend(0..n as u32);
        self.buffer.clear();
        self.idx_map.clear();
        self.idx_map.resize(n, 0);
        self.matrix.reset(n);
    }

    fn collect(&self, lane_count: u32) -> Layout {
        let placements = self
            .blocks
            .iter()
            .map(|b| Placement::new(BlockIndex::new(b.idx), LaneIndex::new(b.lane), b.span))
            .collect();
        let stats = LayoutStats::from_widths(self.blocks.iter().map(|b| b.span.width()));
        Layout::new(placements, lane_count, stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lane_pack_core::{
        time::TimeDelta,
        unit::{approx_eq, UnitSpan},
    };
    use lane_pack_model::{
        event::events_from_pairs,
        generator::{EventGenConfig, EventGenerator},
        options::{AssignMethod, RefineModel},
    };
    use static_assertions::assert_impl_all;

    assert_impl_all!(LayoutEngine: Send);

    fn layout_of(pairs: &[(i16, i16)], options: LayoutOptions) -> Layout {
        let events = events_from_pairs(pairs).unwrap();
        LayoutEngine::with_options(options).compute(&events)
    }

    fn assert_valid(pairs: &[(i16, i16)], layout: &Layout) {
        let events = events_from_pairs(pairs).unwrap();
        assert_eq!(layout.len(), events.len());
        for placement in layout.placements() {
            let span = placement.span();
            assert!(span.left() >= -1e-9, "left must be non-negative: {}", span);
            assert!(span.right() <= 1.0 + 1e-8, "span exceeds the axis: {}", span);
            assert!(span.width() > 0.0);
        }
        for (i, a) in events.iter().enumerate() {
            for (j, b) in events.iter().enumerate().skip(i + 1) {
                if a.interval().overlaps_beyond(&b.interval(), TimeDelta::zero()) {
                    let (sa, sb) = (
                        layout.placements()[i].span(),
                        layout.placements()[j].span(),
                    );
                    assert!(
                        !sa.overlaps(sb),
                        "conflicting events {} and {} overlap on screen: {} vs {}",
                        i,
                        j,
                        sa,
                        sb
                    );
                }
            }
        }
    }

    #[test]
    fn empty_input_returns_an_empty_layout() {
        let layout = LayoutEngine::new().compute(&[]);
        assert!(layout.is_empty());
        assert_eq!(layout.lane_count(), 0);
        assert_eq!(layout.stats().width_sum(), 0.0);
        assert_eq!(layout.stats().width_sum_sq(), 0.0);
    }

    #[test]
    fn single_block_takes_the_full_axis() {
        let layout = layout_of(&[(0, 60)], LayoutOptions::default());
        assert_eq!(layout.lane_count(), 1);
        assert_eq!(layout.placements()[0].span(), UnitSpan::full());
    }

    #[test]
    fn disjoint_blocks_all_take_the_full_axis() {
        let pairs = [(0, 60), (60, 120)];
        let layout = layout_of(&pairs, LayoutOptions::default());
        assert_eq!(layout.lane_count(), 1);
        for placement in layout.placements() {
            assert_eq!(placement.span(), UnitSpan::full());
        }
    }

    #[test]
    fn two_overlapping_blocks_split_evenly() {
        let pairs = [(0, 60), (30, 90)];
        let layout = layout_of(&pairs, LayoutOptions::default());
        assert_eq!(layout.lane_count(), 2);
        let (a, b) = (layout.placements()[0].span(), layout.placements()[1].span());
        assert!(approx_eq(a.left(), 0.0));
        assert!(approx_eq(a.width(), 0.5));
        assert!(approx_eq(b.left(), 0.5));
        assert!(approx_eq(b.width(), 0.5));
        assert_valid(&pairs, &layout);
    }

    #[test]
    fn permuted_input_permutes_the_placements() {
        let layout = layout_of(&[(30, 90), (0, 60)], LayoutOptions::default());
        // the earlier-starting event still anchors the axis
        assert!(approx_eq(layout.placements()[1].span().left(), 0.0));
        assert!(approx_eq(layout.placements()[0].span().left(), 0.5));
    }

    #[test]
    fn staircase_packs_into_two_half_lanes() {
        let pairs = [(0, 60), (30, 90), (60, 120)];
        let layout = layout_of(&pairs, LayoutOptions::default());
        assert_eq!(layout.lane_count(), 2);
        for placement in layout.placements() {
            assert!(approx_eq(placement.span().width(), 0.5));
        }
        assert!(approx_eq(layout.placements()[0].span().left(), 0.0));
        assert!(approx_eq(layout.placements()[1].span().left(), 0.5));
        assert_valid(&pairs, &layout);
    }

    #[test]
    fn pairwise_overlapping_chain_splits_into_quarters() {
        let pairs = [(0, 60), (15, 75), (30, 90), (45, 105)];
        let layout = layout_of(&pairs, LayoutOptions::default());
        assert_eq!(layout.lane_count(), 4);
        for placement in layout.placements() {
            assert!(approx_eq(placement.span().width(), 0.25));
        }
        assert_valid(&pairs, &layout);
    }

    #[test]
    fn locked_chain_frees_width_for_its_neighbour() {
        // four blocks form a tight quarter-width chain that locks against
        // both axis edges; the fifth starts after the two short chain
        // members have ended, so once the chain is frozen the refinement
        // can grow it from its third-width seed to half the axis
        let pairs = [(0, 100), (0, 40), (0, 39), (0, 100), (50, 100)];
        let layout = layout_of(&pairs, LayoutOptions::default());
        assert_eq!(layout.lane_count(), 4);

        let spans: Vec<UnitSpan> = layout.placements().iter().map(|p| p.span()).collect();
        for span in &spans[..4] {
            assert!(approx_eq(span.width(), 0.25));
        }
        // the two long blocks fill the first two quarters in either order
        let mut outer = [spans[0].left(), spans[3].left()];
        outer.sort_by(f64::total_cmp);
        assert!(approx_eq(outer[0], 0.0));
        assert!(approx_eq(outer[1], 0.25));
        assert!(approx_eq(spans[1].left(), 0.5));
        assert!(approx_eq(spans[2].left(), 0.75));

        // the refined block grew from its 1/3 seed to half the axis
        assert!(approx_eq(spans[4].left(), 0.5));
        assert!(approx_eq(spans[4].width(), 0.5));
        assert_valid(&pairs, &layout);
    }

    #[test]
    fn shared_width_model_equalizes_the_component() {
        let pairs = [(0, 60), (30, 90)];
        let layout = layout_of(
            &pairs,
            LayoutOptions::default().with_refine_model(RefineModel::SharedWidth),
        );
        let (a, b) = (layout.placements()[0].span(), layout.placements()[1].span());
        assert!(approx_eq(a.width(), b.width()));
        assert!(approx_eq(a.width(), 0.5));
        assert_valid(&pairs, &layout);
    }

    #[test]
    fn exact_solve_splits_an_overlapping_pair() {
        let pairs = [(0, 60), (30, 90)];
        let layout = layout_of(&pairs, LayoutOptions::default().with_exact(true));
        assert_eq!(layout.lane_count(), 2);
        for placement in layout.placements() {
            assert!(approx_eq(placement.span().width(), 0.5));
        }
        assert_valid(&pairs, &layout);
    }

    #[test]
    fn recomputation_is_bit_identical() {
        let pairs = [(0, 100), (0, 40), (0, 40), (0, 100), (50, 100)];
        let events = events_from_pairs(&pairs).unwrap();
        let mut engine = LayoutEngine::new();
        let first = engine.compute(&events);
        let second = engine.compute(&events);
        assert_eq!(first, second);
    }

    #[test]
    fn a_reused_engine_matches_a_fresh_one() {
        let big = events_from_pairs(&[(0, 60), (30, 90), (45, 105), (100, 160)]).unwrap();
        let small = events_from_pairs(&[(0, 30)]).unwrap();

        let mut reused = LayoutEngine::new();
        reused.compute(&big);
        reused.compute(&small);
        let warm = reused.compute(&big);

        let fresh = LayoutEngine::new().compute(&big);
        assert_eq!(warm, fresh);
    }

    #[test]
    fn stats_are_the_width_moments() {
        let pairs = [(0, 60), (30, 90), (60, 120)];
        let layout = layout_of(&pairs, LayoutOptions::default());
        let (mut sum, mut sum_sq) = (0.0, 0.0);
        for placement in layout.placements() {
            let percent = placement.span().width() * 100.0;
            sum += percent;
            sum_sq += percent * percent;
        }
        assert!(approx_eq(layout.stats().width_sum(), sum));
        assert!(approx_eq(layout.stats().width_sum_sq(), sum_sq));
    }

    #[test]
    fn uniform_seeding_splits_by_lane_count() {
        let pairs = [(0, 60), (30, 90), (45, 100)];
        let layout = layout_of(
            &pairs,
            LayoutOptions::default()
                .with_chain_seeding(false)
                .with_refine_iterations(0),
        );
        assert_eq!(layout.lane_count(), 3);
        for placement in layout.placements() {
            assert!(approx_eq(placement.span().width(), 1.0 / 3.0));
        }
        assert_valid(&pairs, &layout);
    }

    #[test]
    fn seeded_layouts_respect_the_invariants_on_random_instances() {
        // refinement disabled: this exercises partitioning, condensation
        // and chain seeding on a few hundred random events
        for seed in [1, 7, 23] {
            let config = EventGenConfig::default().with_count(150).with_seed(seed);
            let events = EventGenerator::new(config).generate();
            let pairs: Vec<(i16, i16)> = events
                .iter()
                .map(|e| (e.start().value() as i16, e.end().value() as i16))
                .collect();
            let layout = layout_of(&pairs, LayoutOptions::default().with_refine_iterations(0));
            assert_valid(&pairs, &layout);

            // chain seeding guarantees at least 1 / lane_count per block
            let floor = 1.0 / f64::from(layout.lane_count());
            for placement in layout.placements() {
                assert!(placement.span().width() >= floor - 1e-9);
            }
        }
    }

    #[test]
    fn min_heap_partitioning_feeds_the_same_pipeline() {
        let pairs = [(0, 60), (30, 90), (60, 120)];
        let layout = layout_of(
            &pairs,
            LayoutOptions::default().with_assign_method(AssignMethod::MinHeap),
        );
        assert_eq!(layout.lane_count(), 2);
        assert_valid(&pairs, &layout);
    }
}
