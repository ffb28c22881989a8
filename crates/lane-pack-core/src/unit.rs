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

//! # Unit-Axis Placement
//!
//! The horizontal output axis of the layout engine is the normalized unit
//! interval `[0, 1]`. A [`UnitSpan`] is the segment `[left, left + width]`
//! a block occupies on that axis.
//!
//! All geometric comparisons on this axis are made up to [`UNIT_EPS`],
//! because the positions are produced by a floating-point LP solver and
//! exact equality is not meaningful.

/// Numeric tolerance for equality tests on the unit axis.
pub const UNIT_EPS: f64 = 1e-8;

/// Returns `true` if `a` and `b` are equal up to [`UNIT_EPS`].
#[inline]
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < UNIT_EPS
}

/// The segment `[left, left + width]` of the unit axis occupied by a block.
///
/// # Examples
///
/// ```
/// use lane_pack_core::unit::UnitSpan;
///
/// let span = UnitSpan::new(0.5, 0.25);
/// assert_eq!(span.right(), 0.75);
/// assert!(!span.is_flush_right());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct UnitSpan {
    left: f64,
    width: f64,
}

impl UnitSpan {
    /// Creates a span from its left edge and width.
    #[inline]
    pub fn new(left: f64, width: f64) -> Self {
        debug_assert!(left.is_finite() && width.is_finite());
        debug_assert!(width >= 0.0, "UnitSpan width must be non-negative");
        Self { left, width }
    }

    /// The span covering the whole unit axis.
    #[inline]
    pub const fn full() -> Self {
        Self {
            left: 0.0,
            width: 1.0,
        }
    }

    #[inline]
    pub const fn left(self) -> f64 {
        self.left
    }

    #[inline]
    pub const fn width(self) -> f64 {
        self.width
    }

    /// The right edge, `left + width`.
    #[inline]
    pub fn right(self) -> f64 {
        self.left + self.width
    }

    /// Returns `true` if the left edge sits at the axis origin.
    #[inline]
    pub fn at_origin(self) -> bool {
        self.left.abs() < UNIT_EPS
    }

    /// Returns `true` if the right edge touches 1.0.
    #[inline]
    pub fn is_flush_right(self) -> bool {
        approx_eq(self.right(), 1.0)
    }

    /// Returns `true` if this span's right edge touches `other`'s left edge.
    #[inline]
    pub fn abuts(self, other: Self) -> bool {
        approx_eq(self.right(), other.left)
    }

    /// Returns `true` if the two spans share an open segment longer than
    /// [`UNIT_EPS`]. Touching edges do not count as overlap.
    #[inline]
    pub fn overlaps(self, other: Self) -> bool {
        let lo = self.left.max(other.left);
        let hi = self.right().min(other.right());
        hi - lo > UNIT_EPS
    }
}

impl std::fmt::Display for UnitSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:.6}, {:.6}]", self.left, self.right())
    }
}
