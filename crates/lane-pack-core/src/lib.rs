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

//! # Core Primitives for Schedule Block Layout
//!
//! This crate provides the fundamental data types shared by the lane-pack
//! workspace. It models the two axes of the layout problem:
//!
//! - **Time**: [`time::TimePoint`], [`time::TimeDelta`] and
//!   [`time::TimeInterval`] — strongly typed minutes on the schedule axis.
//! - **Unit axis**: [`unit::UnitSpan`] — a `[left, left + width]` segment of
//!   the normalized horizontal axis `[0, 1]` that a block occupies on screen.
//!
//! The use of distinct newtypes enforces correctness at compile time — for
//! example, preventing the addition of two `TimePoint`s.

pub mod primitives;
pub mod time;
pub mod unit;
