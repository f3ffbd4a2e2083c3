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

use roundtrip_model::{index::CityIndex, matrix::DistanceMatrix};
use roundtrip_search::num::SearchCost;

/// A strategy for scoring one candidate cycle against a distance matrix.
///
/// `TourEvaluator` decouples the search engine from a particular cost
/// function. Implementations must be pure: the same cycle and matrix
/// always yield the same cost, and nothing outside the evaluator is
/// mutated. The engine recomputes the full cost on every candidate; that
/// full recomputation is the correctness baseline this trait specifies.
pub trait TourEvaluator<T>
where
    T: SearchCost,
{
    /// Returns the name of the evaluator.
    fn name(&self) -> &str;

    /// Sums the edge weights along a cycle, including the closing edge.
    /// A degenerate cycle with fewer than two entries scores zero.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if a cycle entry is not within
    /// `0..matrix.num_cities()`.
    fn evaluate_cycle(&self, matrix: &DistanceMatrix<T>, cycle: &[CityIndex]) -> T;

    /// Sums the edge weights along a cycle without bounds checking.
    ///
    /// # Safety
    ///
    /// The caller must ensure that every cycle entry is within
    /// `0..matrix.num_cities()`.
    unsafe fn evaluate_cycle_unchecked(&self, matrix: &DistanceMatrix<T>, cycle: &[CityIndex])
        -> T;
}

/// The standard evaluator: adds up adjacent edge weights.
///
/// Accumulation is saturating; the solvers verify at entry that
/// `n * max_distance` fits the cost type, so saturation never triggers on
/// a validated run.
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeSumEvaluator;

impl EdgeSumEvaluator {
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl<T> TourEvaluator<T> for EdgeSumEvaluator
where
    T: SearchCost,
{
    fn name(&self) -> &str {
        "EdgeSumEvaluator"
    }

    #[inline]
    fn evaluate_cycle(&self, matrix: &DistanceMatrix<T>, cycle: &[CityIndex]) -> T {
        cycle.windows(2).fold(T::zero(), |cost, edge| {
            cost.saturating_add(matrix.distance(edge[0], edge[1]))
        })
    }

    #[inline(always)]
    unsafe fn evaluate_cycle_unchecked(
        &self,
        matrix: &DistanceMatrix<T>,
        cycle: &[CityIndex],
    ) -> T {
        cycle.windows(2).fold(T::zero(), |cost, edge| {
            cost.saturating_add(unsafe { matrix.distance_unchecked(edge[0], edge[1]) })
        })
    }
}
