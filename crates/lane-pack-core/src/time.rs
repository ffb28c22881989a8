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

//! # Typed Time Axis
//!
//! Strongly typed minutes on the schedule axis:
//!
//! - [`TimePoint<T>`]: a specific point in time (minutes since midnight).
//! - [`TimeDelta<T>`]: a duration or slack, the difference of two points.
//! - [`TimeInterval<T>`]: a half-open interval `[start, end)` of time points.
//!
//! The distinction between points and deltas rules out meaningless
//! arithmetic such as adding two time points.

use crate::primitives::Interval;
use num_traits::{PrimInt, Signed};
use std::{
    fmt::Display,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
};

/// A point on the time axis, in integer minutes.
///
/// # Examples
///
/// ```
/// use lane_pack_core::time::{TimeDelta, TimePoint};
///
/// let start = TimePoint::new(480);
/// let end = start + TimeDelta::new(90);
/// assert_eq!(end.value(), 570);
/// assert_eq!(end - start, TimeDelta::new(90));
/// ```
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimePoint<T: PrimInt>(T);

impl<T: PrimInt> TimePoint<T> {
    #[inline]
    pub const fn new(value: T) -> Self {
        Self(value)
    }

    #[inline]
    pub fn zero() -> Self {
        Self(T::zero())
    }

    #[inline]
    pub const fn value(self) -> T {
        self.0
    }
}

impl<T: PrimInt> Default for TimePoint<T> {
    #[inline]
    fn default() -> Self {
        Self(T::zero())
    }
}

impl<T: PrimInt + Display> Display for TimePoint<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TimePoint({})", self.0)
    }
}

impl<T: PrimInt> From<T> for TimePoint<T> {
    #[inline]
    fn from(v: T) -> Self {
        Self(v)
    }
}

/// A signed duration on the time axis, in integer minutes.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimeDelta<T: PrimInt + Signed>(T);

impl<T: PrimInt + Signed> TimeDelta<T> {
    #[inline]
    pub const fn new(value: T) -> Self {
        Self(value)
    }

    #[inline]
    pub fn zero() -> Self {
        Self(T::zero())
    }

    #[inline]
    pub const fn value(self) -> T {
        self.0
    }

    #[inline]
    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    #[inline]
    pub fn is_negative(self) -> bool {
        self.0.is_negative()
    }
}

impl<T: PrimInt + Signed> Default for TimeDelta<T> {
    #[inline]
    fn default() -> Self {
        Self(T::zero())
    }
}

impl<T: PrimInt + Signed + Display> Display for TimeDelta<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TimeDelta({})", self.0)
    }
}

impl<T: PrimInt + Signed> From<T> for TimeDelta<T> {
    #[inline]
    fn from(v: T) -> Self {
        Self(v)
    }
}

impl<T: PrimInt + Signed> Add for TimeDelta<T> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl<T: PrimInt + Signed> Sub for TimeDelta<T> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl<T: PrimInt + Signed> Neg for TimeDelta<T> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl<T: PrimInt + Signed> Add<TimeDelta<T>> for TimePoint<T> {
    type Output = TimePoint<T>;

    #[inline]
    fn add(self, rhs: TimeDelta<T>) -> TimePoint<T> {
        TimePoint(self.0 + rhs.0)
    }
}

impl<T: PrimInt + Signed> Sub<TimeDelta<T>> for TimePoint<T> {
    type Output = TimePoint<T>;

    #[inline]
    fn sub(self, rhs: TimeDelta<T>) -> TimePoint<T> {
        TimePoint(self.0 - rhs.0)
    }
}

impl<T: PrimInt + Signed> AddAssign<TimeDelta<T>> for TimePoint<T> {
    #[inline]
    fn add_assign(&mut self, rhs: TimeDelta<T>) {
        self.0 = self.0 + rhs.0;
    }
}

impl<T: PrimInt + Signed> SubAssign<TimeDelta<T>> for TimePoint<T> {
    #[inline]
    fn sub_assign(&mut self, rhs: TimeDelta<T>) {
        self.0 = self.0 - rhs.0;
    }
}

impl<T: PrimInt + Signed> Sub for TimePoint<T> {
    type Output = TimeDelta<T>;

    #[inline]
    fn sub(self, rhs: Self) -> TimeDelta<T> {
        TimeDelta(self.0 - rhs.0)
    }
}

/// A half-open interval `[start, end)` of time points.
pub type TimeInterval<T> = Interval<TimePoint<T>>;

impl<T: PrimInt + Signed> TimeInterval<T> {
    /// Returns the duration `end - start` of the interval.
    #[inline]
    pub fn duration(&self) -> TimeDelta<T> {
        self.end() - self.start()
    }

    /// Returns `true` if the two intervals overlap by more than `slack`
    /// minutes, i.e. `max(starts) + slack < min(ends)`.
    ///
    /// With zero slack this is plain open-interval overlap; a positive
    /// slack forgives short overlaps, a negative slack additionally treats
    /// near-adjacent intervals as overlapping.
    ///
    /// # Examples
    ///
    /// ```
    /// use lane_pack_core::time::{TimeDelta, TimeInterval, TimePoint};
    ///
    /// let a = TimeInterval::new(TimePoint::new(0), TimePoint::new(60));
    /// let b = TimeInterval::new(TimePoint::new(45), TimePoint::new(90));
    /// assert!(a.overlaps_beyond(&b, TimeDelta::new(0)));
    /// assert!(!a.overlaps_beyond(&b, TimeDelta::new(15)));
    /// ```
    #[inline]
    pub fn overlaps_beyond(&self, other: &Self, slack: TimeDelta<T>) -> bool {
        let latest_start = self.start().max(other.start());
        let earliest_end = self.end().min(other.end());
        latest_start + slack < earliest_end
    }
}
