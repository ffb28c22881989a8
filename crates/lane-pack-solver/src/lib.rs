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

//! # Schedule Block Layout Pipeline
//!
//! Packs conflicting schedule blocks into side-by-side lanes of the unit
//! axis so that no two time-overlapping blocks share horizontal space and
//! the total used width is maximized.
//!
//! The pipeline behind [`LayoutEngine::compute`](engine::LayoutEngine::compute):
//!
//! 1. Interval partitioning into the minimum number of lanes.
//! 2. Conflict adjacency lists plus a dense reachability matrix, then
//!    transitive reduction of both sides.
//! 3. Conflict-chain depths seed the initial placements.
//! 4. Numerically locked blocks are frozen and the remaining connected
//!    components are grown by linear programs until a fixed point is
//!    reached.
//! 5. Alternatively, one global mixed-integer program solves the whole
//!    instance exactly.
//!
//! Everything runs to completion on the calling thread; the engine owns
//! all scratch memory and reuses it across invocations.

mod block;
mod chain;
mod fixed;
mod graph;
mod lanes;
mod lp;
mod milp;
mod refine;

pub mod engine;

pub use engine::LayoutEngine;
