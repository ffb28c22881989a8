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

use std::fmt::Display;

/// An event span whose end does not lie strictly after its start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InvalidEventSpanError {
    start_min: i16,
    end_min: i16,
}

impl InvalidEventSpanError {
    #[inline]
    pub fn new(start_min: i16, end_min: i16) -> Self {
        Self { start_min, end_min }
    }

    #[inline]
    pub fn start_min(&self) -> i16 {
        self.start_min
    }

    #[inline]
    pub fn end_min(&self) -> i16 {
        self.end_min
    }
}

impl Display for InvalidEventSpanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "event span [{}, {}) is empty or inverted",
            self.start_min, self.end_min
        )
    }
}

impl std::error::Error for InvalidEventSpanError {}

/// A batch of raw event pairs contained an invalid span at a known index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InvalidEventListError {
    index: usize,
    cause: InvalidEventSpanError,
}

impl InvalidEventListError {
    #[inline]
    pub fn new(index: usize, cause: InvalidEventSpanError) -> Self {
        Self { index, cause }
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn cause(&self) -> InvalidEventSpanError {
        self.cause
    }
}

impl Display for InvalidEventListError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "event at index {}: {}", self.index, self.cause)
    }
}

impl std::error::Error for InvalidEventListError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.cause)
    }
}
