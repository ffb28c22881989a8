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

//! # Problem and Solution Model
//!
//! Input records ([`event::EventSpan`]), engine configuration
//! ([`options::LayoutOptions`]), layout output ([`solution::Layout`]) and a
//! seeded synthetic instance generator ([`generator::EventGenerator`]) for
//! benchmarks and randomized tests.

pub mod err;
pub mod event;
pub mod generator;
pub mod id;
pub mod options;
pub mod solution;

pub mod prelude {
    //! Convenience re-exports of the commonly used model types.
    pub use crate::err::{InvalidEventListError, InvalidEventSpanError};
    pub use crate::event::{events_from_pairs, EventSpan};
    pub use crate::generator::{EventGenConfig, EventGenerator};
    pub use crate::id::{BlockIndex, LaneIndex};
    pub use crate::options::{AssignMethod, LayoutOptions, RefineModel};
    pub use crate::solution::{Layout, LayoutStats, Placement};
}
