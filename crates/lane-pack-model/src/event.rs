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

use crate::err::{InvalidEventListError, InvalidEventSpanError};
use lane_pack_core::time::{TimeDelta, TimeInterval, TimePoint};
use std::fmt::Display;

/// A single schedulable event: a non-empty half-open interval of minutes.
///
/// The raw input surface of the engine is a pair of `i16` minute stamps
/// (`start_min`, `end_min`); construction validates `start_min < end_min`
/// so the rest of the pipeline never sees an empty or inverted span.
/// Internally the bounds are widened to `i32` so slack arithmetic cannot
/// overflow.
///
/// # Examples
///
/// ```
/// use lane_pack_model::event::EventSpan;
///
/// let span = EventSpan::new(540, 600).unwrap();
/// assert_eq!(span.duration().value(), 60);
/// assert!(EventSpan::new(600, 540).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventSpan {
    times: TimeInterval<i32>,
}

impl EventSpan {
    /// Creates a span from raw minute stamps, rejecting `end_min <= start_min`.
    #[inline]
    pub fn new(start_min: i16, end_min: i16) -> Result<Self, InvalidEventSpanError> {
        if end_min <= start_min {
            return Err(InvalidEventSpanError::new(start_min, end_min));
        }
        Ok(Self {
            times: TimeInterval::new(
                TimePoint::new(i32::from(start_min)),
                TimePoint::new(i32::from(end_min)),
            ),
        })
    }

    /// The half-open time interval `[start, end)` of the event.
    #[inline]
    pub fn interval(&self) -> TimeInterval<i32> {
        self.times
    }

    #[inline]
    pub fn start(&self) -> TimePoint<i32> {
        self.times.start()
    }

    #[inline]
    pub fn end(&self) -> TimePoint<i32> {
        self.times.end()
    }

    /// The cached event length `end - start`, always positive.
    #[inline]
    pub fn duration(&self) -> TimeDelta<i32> {
        self.times.duration()
    }
}

impl Display for EventSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "EventSpan[{}, {})",
            self.start().value(),
            self.end().value()
        )
    }
}

impl TryFrom<(i16, i16)> for EventSpan {
    type Error = InvalidEventSpanError;

    #[inline]
    fn try_from(pair: (i16, i16)) -> Result<Self, Self::Error> {
        Self::new(pair.0, pair.1)
    }
}

/// Validates a batch of raw minute pairs, reporting the first offending
/// index on failure.
pub fn events_from_pairs(pairs: &[(i16, i16)]) -> Result<Vec<EventSpan>, InvalidEventListError> {
    pairs
        .iter()
        .enumerate()
        .map(|(index, &(start, end))| {
            EventSpan::new(start, end).map_err(|cause| InvalidEventListError::new(index, cause))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_span() {
        let span = EventSpan::new(0, 60).unwrap();
        assert_eq!(span.start().value(), 0);
        assert_eq!(span.end().value(), 60);
        assert_eq!(span.duration().value(), 60);
    }

    #[test]
    fn rejects_empty_and_inverted() {
        assert!(EventSpan::new(30, 30).is_err());
        let err = EventSpan::new(90, 30).unwrap_err();
        assert_eq!(err.start_min(), 90);
        assert_eq!(err.end_min(), 30);
    }

    #[test]
    fn negative_minutes_are_allowed() {
        let span = EventSpan::new(-120, -60).unwrap();
        assert_eq!(span.duration().value(), 60);
    }

    #[test]
    fn batch_validation_reports_index() {
        let err = events_from_pairs(&[(0, 60), (60, 120), (50, 50)]).unwrap_err();
        assert_eq!(err.index(), 2);

        let spans = events_from_pairs(&[(0, 60), (60, 120)]).unwrap();
        assert_eq!(spans.len(), 2);
    }

    #[test]
    fn display() {
        let span = EventSpan::new(480, 510).unwrap();
        assert_eq!(format!("{}", span), "EventSpan[480, 510)");
    }
}
