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

use crate::index::CityIndex;
use num_traits::{PrimInt, Signed};

/// A closed tour through every city of an instance, plus its total cost.
///
/// The cycle starts and ends at the same city: for an instance with `n`
/// cities it holds `n + 1` entries, `[start, ..., start]`. The degenerate
/// single-city instance produces `[start, start]` with cost zero.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tour<T> {
    /// The total cost of all edges along the cycle.
    cost: T,

    /// The visiting order, first and last entry being the start city.
    cycle: Vec<CityIndex>,
}

impl<T> Tour<T>
where
    T: PrimInt + Signed + Copy,
{
    /// Constructs a new `Tour`.
    ///
    /// # Panics
    ///
    /// Panics if the cycle is not closed, i.e. it is non-empty and its
    /// first and last entry differ, or it holds exactly one entry.
    pub fn new(cost: T, cycle: Vec<CityIndex>) -> Self {
        assert!(
            cycle.len() != 1,
            "called Tour::new with a single-entry cycle; a closed tour repeats its start city"
        );
        if let (Some(first), Some(last)) = (cycle.first(), cycle.last()) {
            assert_eq!(
                first, last,
                "called Tour::new with an open cycle: starts at {} but ends at {}",
                first, last
            );
        }

        Self { cost, cycle }
    }

    /// Returns the total cost of this tour.
    #[inline]
    pub fn cost(&self) -> T {
        self.cost
    }

    /// Returns the full closed cycle, including the repeated start city.
    #[inline]
    pub fn cycle(&self) -> &[CityIndex] {
        &self.cycle
    }

    /// Returns the number of distinct cities visited.
    #[inline]
    pub fn num_cities(&self) -> usize {
        self.cycle.len().saturating_sub(1)
    }

    /// Returns the start (and end) city, if the cycle is non-empty.
    #[inline]
    pub fn start(&self) -> Option<CityIndex> {
        self.cycle.first().copied()
    }
}

impl<T> std::fmt::Display for Tour<T>
where
    T: PrimInt + Signed + Copy + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tour(cost: {}, cycle: ", self.cost)?;
        for (i, city) in self.cycle.iter().enumerate() {
            if i > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "{}", city.get())?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::Tour;
    use crate::index::CityIndex;

    fn cycle(indices: &[usize]) -> Vec<CityIndex> {
        indices.iter().copied().map(CityIndex::new).collect()
    }

    #[test]
    fn test_new_and_accessors() {
        let tour = Tour::new(19i64, cycle(&[0, 1, 2, 0]));
        assert_eq!(tour.cost(), 19);
        assert_eq!(tour.num_cities(), 3);
        assert_eq!(tour.start(), Some(CityIndex::new(0)));
        assert_eq!(tour.cycle().len(), 4);
    }

    #[test]
    fn test_degenerate_single_city() {
        let tour = Tour::new(0i64, cycle(&[4, 4]));
        assert_eq!(tour.cost(), 0);
        assert_eq!(tour.num_cities(), 1);
        assert_eq!(tour.start(), Some(CityIndex::new(4)));
    }

    #[test]
    #[should_panic(expected = "open cycle")]
    fn test_rejects_open_cycle() {
        let _ = Tour::new(7i64, cycle(&[0, 1, 2]));
    }

    #[test]
    #[should_panic(expected = "single-entry cycle")]
    fn test_rejects_single_entry_cycle() {
        let _ = Tour::new(0i64, cycle(&[3]));
    }

    #[test]
    fn test_display() {
        let tour = Tour::new(19i64, cycle(&[0, 2, 1, 0]));
        assert_eq!(format!("{}", tour), "Tour(cost: 19, cycle: 0 -> 2 -> 1 -> 0)");
    }
}
