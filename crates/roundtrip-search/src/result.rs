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

use crate::stats::SearchStatistics;
use num_traits::{PrimInt, Signed};
use roundtrip_model::tour::Tour;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResult<T> {
    /// Every candidate tour was scored; this one is proven minimal.
    Optimal(Tour<T>),
    /// The run was aborted after finding this tour; it is the best seen
    /// but not proven minimal.
    Feasible(Tour<T>),
    /// The run was aborted before any tour was scored.
    Unknown,
}

impl<T> std::fmt::Display for SearchResult<T>
where
    T: PrimInt + Signed + Copy + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchResult::Optimal(tour) => write!(f, "Optimal(cost={})", tour.cost()),
            SearchResult::Feasible(tour) => write!(f, "Feasible(cost={})", tour.cost()),
            SearchResult::Unknown => write!(f, "Unknown"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationReason {
    /// The generator ran dry: every permutation was scored.
    Exhausted,
    /// A monitor requested termination before exhaustion.
    /// The string carries the monitor's reason.
    Aborted(String),
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationReason::Exhausted => write!(f, "Search Space Exhausted"),
            TerminationReason::Aborted(reason) => write!(f, "Aborted: {}", reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome<T>
where
    T: PrimInt + Signed + Copy,
{
    pub result: SearchResult<T>,
    pub reason: TerminationReason,
    pub statistics: SearchStatistics,
}

impl<T> SearchOutcome<T>
where
    T: PrimInt + Signed + Copy,
{
    #[inline]
    pub fn new(
        result: SearchResult<T>,
        reason: TerminationReason,
        statistics: SearchStatistics,
    ) -> Self {
        Self {
            result,
            reason,
            statistics,
        }
    }

    #[inline]
    pub fn is_optimal(&self) -> bool {
        matches!(self.result, SearchResult::Optimal(_))
    }

    #[inline]
    pub fn has_tour(&self) -> bool {
        matches!(
            self.result,
            SearchResult::Optimal(_) | SearchResult::Feasible(_)
        )
    }

    /// Returns the best tour found, regardless of whether it was proven
    /// minimal.
    #[inline]
    pub fn best_tour(&self) -> Option<&Tour<T>> {
        match &self.result {
            SearchResult::Optimal(tour) | SearchResult::Feasible(tour) => Some(tour),
            SearchResult::Unknown => None,
        }
    }
}

impl<T> std::fmt::Display for SearchOutcome<T>
where
    T: PrimInt + Signed + Copy + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SearchOutcome(result: {}, reason: {})",
            self.result, self.reason
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{SearchOutcome, SearchResult, TerminationReason};
    use crate::stats::SearchStatistics;
    use roundtrip_model::index::CityIndex;
    use roundtrip_model::tour::Tour;

    fn tour(cost: i64) -> Tour<i64> {
        let cycle = [0, 1, 2, 0].iter().map(|&i| CityIndex::new(i)).collect();
        Tour::new(cost, cycle)
    }

    #[test]
    fn test_optimal_outcome() {
        let outcome = SearchOutcome::new(
            SearchResult::Optimal(tour(19)),
            TerminationReason::Exhausted,
            SearchStatistics::default(),
        );
        assert!(outcome.is_optimal());
        assert!(outcome.has_tour());
        assert_eq!(outcome.best_tour().map(Tour::cost), Some(19));
    }

    #[test]
    fn test_feasible_outcome_is_not_optimal() {
        let outcome = SearchOutcome::new(
            SearchResult::Feasible(tour(23)),
            TerminationReason::Aborted("interrupt signal received".to_string()),
            SearchStatistics::default(),
        );
        assert!(!outcome.is_optimal());
        assert!(outcome.has_tour());
        assert_eq!(outcome.best_tour().map(Tour::cost), Some(23));
    }

    #[test]
    fn test_unknown_outcome_has_no_tour() {
        let outcome: SearchOutcome<i64> = SearchOutcome::new(
            SearchResult::Unknown,
            TerminationReason::Aborted("interrupt signal received".to_string()),
            SearchStatistics::default(),
        );
        assert!(!outcome.has_tour());
        assert!(outcome.best_tour().is_none());
    }

    #[test]
    fn test_display() {
        let outcome = SearchOutcome::new(
            SearchResult::Optimal(tour(19)),
            TerminationReason::Exhausted,
            SearchStatistics::default(),
        );
        assert_eq!(
            format!("{}", outcome),
            "SearchOutcome(result: Optimal(cost=19), reason: Search Space Exhausted)"
        );
    }
}
