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

//! # Strongly Typed City Index (Zero-Cost)
//!
//! A `#[repr(transparent)]` wrapper around `usize` identifying one city of
//! a problem instance. Distance matrices, tours, and permutation buffers
//! all index by `CityIndex`, which prevents accidentally mixing city
//! numbers with loop counters or buffer offsets while compiling down to a
//! plain `usize`.

/// A strongly typed index identifying a city of a problem instance.
///
/// # Examples
///
/// ```rust
/// use roundtrip_model::index::CityIndex;
///
/// let city = CityIndex::new(3);
/// assert_eq!(city.get(), 3);
/// assert_eq!(format!("{}", city), "CityIndex(3)");
/// ```
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CityIndex(usize);

impl CityIndex {
    /// Creates a new `CityIndex` with the given `usize` index.
    #[inline(always)]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the underlying `usize` index.
    #[inline(always)]
    pub const fn get(&self) -> usize {
        self.0
    }

    /// Checks if the index is zero.
    #[inline(always)]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl std::fmt::Debug for CityIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CityIndex({})", self.0)
    }
}

impl std::fmt::Display for CityIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CityIndex({})", self.0)
    }
}

impl From<usize> for CityIndex {
    fn from(index: usize) -> Self {
        Self::new(index)
    }
}

impl From<CityIndex> for usize {
    fn from(index: CityIndex) -> Self {
        index.0
    }
}
