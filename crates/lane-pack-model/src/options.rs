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

//! Engine configuration. All options are plain values; configuring an
//! engine never fails.

/// Which interval-partitioning algorithm assigns blocks to lanes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AssignMethod {
    /// Scan all open lanes and reuse the free lane with the smallest
    /// index. Quadratic worst case, but produces the most stable lane
    /// numbering.
    #[default]
    LowestLane,
    /// Classical min-heap partitioning keyed on lane end times.
    /// `O(n log n)`; lane numbering may differ from [`Self::LowestLane`].
    MinHeap,
}

/// Which linear program refines the widths of a connected component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RefineModel {
    /// One width variable per block: maximize total width, then minimize
    /// the absolute deviation of widths from the component mean.
    #[default]
    PerBlock,
    /// A single width variable shared by the whole component; every block
    /// in the component receives the same width.
    SharedWidth,
}

/// Tuning knobs of the layout engine.
///
/// The defaults reproduce the standard rendering configuration: greedy
/// lowest-lane partitioning, chain-based width seeding, up to 100 LP
/// refinement passes with the per-block model, and no exact solve.
///
/// # Examples
///
/// ```
/// use lane_pack_model::options::{AssignMethod, LayoutOptions};
///
/// let opts = LayoutOptions::default()
///     .with_assign_method(AssignMethod::MinHeap)
///     .with_refine_iterations(10);
/// assert_eq!(opts.refine_iterations(), 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutOptions {
    assign_slack: i32,
    assign_method: AssignMethod,
    chain_seeding: bool,
    conflict_slack: i32,
    refine_iterations: usize,
    refine_model: RefineModel,
    exact: bool,
}

impl Default for LayoutOptions {
    #[inline]
    fn default() -> Self {
        Self {
            assign_slack: 0,
            assign_method: AssignMethod::LowestLane,
            chain_seeding: true,
            conflict_slack: 0,
            refine_iterations: 100,
            refine_model: RefineModel::PerBlock,
            exact: false,
        }
    }
}

impl LayoutOptions {
    /// Slack in minutes applied when deciding whether a lane can be
    /// reused by the partitioner.
    #[inline]
    pub fn assign_slack(&self) -> i32 {
        self.assign_slack
    }

    #[inline]
    pub fn assign_method(&self) -> AssignMethod {
        self.assign_method
    }

    /// Whether initial widths are seeded from conflict-chain depths
    /// instead of the flat `1 / lane_count`.
    #[inline]
    pub fn chain_seeding(&self) -> bool {
        self.chain_seeding
    }

    /// Slack in minutes subtracted from overlaps when building the
    /// conflict graph (and when enumerating exact-solve pairs).
    #[inline]
    pub fn conflict_slack(&self) -> i32 {
        self.conflict_slack
    }

    /// Upper bound on width-refinement passes; zero disables refinement.
    #[inline]
    pub fn refine_iterations(&self) -> usize {
        self.refine_iterations
    }

    #[inline]
    pub fn refine_model(&self) -> RefineModel {
        self.refine_model
    }

    /// Whether to solve the whole layout as one mixed-integer program
    /// instead of running the graph/refinement pipeline.
    #[inline]
    pub fn exact(&self) -> bool {
        self.exact
    }

    #[inline]
    pub fn with_assign_slack(mut self, slack: i32) -> Self {
        self.assign_slack = slack;
        self
    }

    #[inline]
    pub fn with_assign_method(mut self, method: AssignMethod) -> Self {
        self.assign_method = method;
        self
    }

    #[inline]
    pub fn with_chain_seeding(mut self, enabled: bool) -> Self {
        self.chain_seeding = enabled;
        self
    }

    #[inline]
    pub fn with_conflict_slack(mut self, slack: i32) -> Self {
        self.conflict_slack = slack;
        self
    }

    #[inline]
    pub fn with_refine_iterations(mut self, iterations: usize) -> Self {
        self.refine_iterations = iterations;
        self
    }

    #[inline]
    pub fn with_refine_model(mut self, model: RefineModel) -> Self {
        self.refine_model = model;
        self
    }

    #[inline]
    pub fn with_exact(mut self, exact: bool) -> Self {
        self.exact = exact;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_standard_configuration() {
        let opts = LayoutOptions::default();
        assert_eq!(opts.assign_slack(), 0);
        assert_eq!(opts.assign_method(), AssignMethod::LowestLane);
        assert!(opts.chain_seeding());
        assert_eq!(opts.conflict_slack(), 0);
        assert_eq!(opts.refine_iterations(), 100);
        assert_eq!(opts.refine_model(), RefineModel::PerBlock);
        assert!(!opts.exact());
    }

    #[test]
    fn builders_override_single_fields() {
        let opts = LayoutOptions::default()
            .with_assign_slack(5)
            .with_conflict_slack(-5)
            .with_chain_seeding(false)
            .with_refine_model(RefineModel::SharedWidth)
            .with_exact(true);
        assert_eq!(opts.assign_slack(), 5);
        assert_eq!(opts.conflict_slack(), -5);
        assert!(!opts.chain_seeding());
        assert_eq!(opts.refine_model(), RefineModel::SharedWidth);
        assert!(opts.exact());
        // untouched fields keep their defaults
        assert_eq!(opts.refine_iterations(), 100);
    }
}
