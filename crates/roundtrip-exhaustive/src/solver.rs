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

//! Exhaustive-search engine for the travelling-salesman problem.
//!
//! This module implements a stateful search engine that scores every
//! ordering of the non-start cities and keeps the cheapest closed tour.
//! The `ExhaustiveSolver` manages reusable internal buffers and the shared
//! progress cells; a search session object encapsulates per-run state,
//! statistics, and timing, enabling reproducible and debuggable runs.
//!
//! Candidate orderings are pulled one at a time from the in-place
//! plain-changes generator and written into a reusable cycle buffer whose
//! endpoints are pinned to the start city, so the loop allocates only when
//! a new best tour is actually installed. Validation happens entirely
//! before the first generator step; the running loop cannot fail.
//!
//! The `solve_with_second` variant pins the second cycle position as well
//! and permutes the remaining cities. It exists as the branch primitive
//! for the parallel coordinator, which fans one branch out per candidate
//! second city.

use crate::{error::SearchError, eval::TourEvaluator, permutation::PlainChanges};
use roundtrip_model::{
    index::CityIndex,
    matrix::{checked_factorial, DistanceMatrix, MAX_FACTORIAL_LEN},
    tour::Tour,
};
use roundtrip_search::{
    monitor::search_monitor::{SearchCommand, SearchMonitor},
    num::SearchCost,
    progress::{ProgressHandle, ProgressState, ProgressTracker},
    result::{SearchOutcome, SearchResult, TerminationReason},
    stats::SearchStatistics,
};
use std::sync::Arc;
use std::time::Instant;

/// The largest instance whose tour count `(n-1)!` fits into a `u64`.
pub const MAX_CITIES: usize = MAX_FACTORIAL_LEN + 1;

/// An exact solver that enumerates the complete tour space.
///
/// The solver owns a reusable cycle buffer and the shared progress state;
/// each call to `solve` spins up a fresh session over them. Reusing one
/// solver across runs keeps allocations at construction time.
#[derive(Debug)]
pub struct ExhaustiveSolver {
    cycle_buf: Vec<CityIndex>,
    progress: Arc<ProgressState>,
}

impl Default for ExhaustiveSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ExhaustiveSolver {
    /// Create a new solver instance.
    #[inline]
    pub fn new() -> Self {
        Self {
            cycle_buf: Vec::new(),
            progress: Arc::new(ProgressState::new()),
        }
    }

    /// Create a new solver instance with preallocated storage for
    /// instances of the given size.
    ///
    /// # Note
    ///
    /// The solver grows its buffer on demand anyway; preallocation only
    /// moves that cost to construction time.
    #[inline]
    pub fn preallocated(num_cities: usize) -> Self {
        Self {
            cycle_buf: Vec::with_capacity(num_cities + 1),
            progress: Arc::new(ProgressState::new()),
        }
    }

    /// Returns a handle for polling the progress of this solver's runs.
    /// The handle stays valid across runs and never blocks the search.
    #[inline]
    pub fn progress(&self) -> ProgressHandle {
        ProgressHandle::new(Arc::clone(&self.progress))
    }

    /// Scores every tour from `start` and returns the proven minimum.
    ///
    /// Validation failures surface before any generation work; see
    /// [`SearchError`].
    #[inline]
    pub fn solve<T, E, M>(
        &mut self,
        matrix: &DistanceMatrix<T>,
        start: CityIndex,
        evaluator: &E,
        monitor: M,
    ) -> Result<SearchOutcome<T>, SearchError>
    where
        T: SearchCost,
        E: TourEvaluator<T>,
        M: SearchMonitor<T>,
    {
        self.solve_internal(matrix, start, None, evaluator, monitor)
    }

    /// Scores every tour from `start` whose second city is pinned to
    /// `second`. The branch primitive of the parallel coordinator.
    #[inline]
    pub fn solve_with_second<T, E, M>(
        &mut self,
        matrix: &DistanceMatrix<T>,
        start: CityIndex,
        second: CityIndex,
        evaluator: &E,
        monitor: M,
    ) -> Result<SearchOutcome<T>, SearchError>
    where
        T: SearchCost,
        E: TourEvaluator<T>,
        M: SearchMonitor<T>,
    {
        self.solve_internal(matrix, start, Some(second), evaluator, monitor)
    }

    #[inline(always)]
    fn solve_internal<T, E, M>(
        &mut self,
        matrix: &DistanceMatrix<T>,
        start: CityIndex,
        second: Option<CityIndex>,
        evaluator: &E,
        mut monitor: M,
    ) -> Result<SearchOutcome<T>, SearchError>
    where
        T: SearchCost,
        E: TourEvaluator<T>,
        M: SearchMonitor<T>,
    {
        let total = validate_instance(matrix, start, second)?;
        let generator = PlainChanges::new(base_sequence(matrix.num_cities(), start, second))?;
        debug_assert_eq!(
            generator.total(),
            total,
            "generator and validation disagree on the tour count"
        );

        // Pin the fixed cycle positions once; the loop only rewrites the
        // free slots.
        self.cycle_buf.clear();
        self.cycle_buf.resize(matrix.num_cities() + 1, start);
        let prefix_len = match second {
            Some(second) => {
                self.cycle_buf[1] = second;
                2
            }
            None => 1,
        };

        let session = ExhaustiveSearchSession {
            matrix,
            evaluator,
            monitor: &mut monitor,
            generator,
            tracker: ProgressTracker::begin(Arc::clone(&self.progress), total),
            stats: SearchStatistics::default(),
            best_cost: T::max_value(),
            best_tour: None,
            cycle_buf: &mut self.cycle_buf,
            prefix_len,
            start_time: Instant::now(),
        };
        session.run(total)
    }
}

/// Checks a run configuration before any generation work and returns the
/// number of tours the run will score. Shared by the sequential engine
/// and the parallel coordinator so both fail fast with identical errors.
pub fn validate_instance<T>(
    matrix: &DistanceMatrix<T>,
    start: CityIndex,
    second: Option<CityIndex>,
) -> Result<u64, SearchError>
where
    T: SearchCost,
{
    let num_cities = matrix.num_cities();
    if num_cities == 0 {
        return Err(SearchError::EmptyInstance);
    }
    if start.get() >= num_cities {
        return Err(SearchError::StartOutOfBounds { start, num_cities });
    }
    if let Some(second) = second {
        if second.get() >= num_cities || second == start {
            return Err(SearchError::InvalidSecondCity {
                second,
                start,
                num_cities,
            });
        }
    }
    if num_cities > MAX_CITIES {
        return Err(SearchError::TooManyCities {
            num_cities,
            max_cities: MAX_CITIES,
        });
    }

    // The accumulated cost of any tour is bounded by n * max_distance.
    // Requiring one unit of headroom on top keeps every real cost
    // strictly below the T::max_value() best-cost sentinel.
    let n = T::from_usize(num_cities).ok_or(SearchError::CostOverflow { num_cities })?;
    let worst = n
        .checked_mul(&matrix.max_distance())
        .ok_or(SearchError::CostOverflow { num_cities })?;
    worst
        .checked_add(&T::one())
        .ok_or(SearchError::CostOverflow { num_cities })?;

    let free = num_cities - 1 - second.map_or(0, |_| 1);
    checked_factorial(free).ok_or(SearchError::TooManyCities {
        num_cities,
        max_cities: MAX_CITIES,
    })
}

/// The non-start (and non-second) cities in ascending order, the seed
/// sequence the generator permutes.
fn base_sequence(
    num_cities: usize,
    start: CityIndex,
    second: Option<CityIndex>,
) -> Vec<CityIndex> {
    (0..num_cities)
        .map(CityIndex::new)
        .filter(|&city| city != start && Some(city) != second)
        .collect()
}

/// A search session for the exhaustive solver. This struct encapsulates
/// the state and logic of a single search run.
struct ExhaustiveSearchSession<'a, T, E, M>
where
    T: SearchCost,
    E: TourEvaluator<T>,
    M: SearchMonitor<T>,
{
    matrix: &'a DistanceMatrix<T>,
    evaluator: &'a E,
    monitor: &'a mut M,
    generator: PlainChanges,
    tracker: ProgressTracker,
    stats: SearchStatistics,
    best_cost: T,
    best_tour: Option<Tour<T>>,
    cycle_buf: &'a mut Vec<CityIndex>,
    prefix_len: usize,
    start_time: Instant,
}

impl<'a, T, E, M> std::fmt::Debug for ExhaustiveSearchSession<'a, T, E, M>
where
    T: SearchCost,
    E: TourEvaluator<T>,
    M: SearchMonitor<T>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExhaustiveSearchSession")
            .field("best_cost", &self.best_cost)
            .field("best_tour", &self.best_tour)
            .field("stats", &self.stats)
            .finish()
    }
}

impl<'a, T, E, M> ExhaustiveSearchSession<'a, T, E, M>
where
    T: SearchCost,
    E: TourEvaluator<T>,
    M: SearchMonitor<T>,
{
    /// Run the search session.
    #[inline]
    fn run(mut self, total: u64) -> Result<SearchOutcome<T>, SearchError> {
        self.monitor.on_enter_search(self.matrix, total);

        let reason = loop {
            if !self.generator.has_more() {
                break TerminationReason::Exhausted;
            }
            if let SearchCommand::Terminate(msg) = self.monitor.search_command() {
                break TerminationReason::Aborted(msg);
            }

            // Cannot fail: gated on has_more above.
            let perm = self.generator.next_permutation()?;
            for (slot, city) in self.cycle_buf[self.prefix_len..].iter_mut().zip(perm.iter()) {
                *slot = *city;
            }

            // Safety: validation pinned every cycle entry into
            // 0..num_cities before the loop started.
            let cost = unsafe {
                self.evaluator
                    .evaluate_cycle_unchecked(self.matrix, self.cycle_buf.as_slice())
            };

            self.stats.on_tour_evaluated();
            self.tracker.on_tour_evaluated();
            self.monitor.on_step();

            // Strictly-lower comparison: the first tour of a given cost
            // wins and later ties never replace it.
            if cost < self.best_cost {
                self.best_cost = cost;
                let tour = Tour::new(cost, self.cycle_buf.clone());
                self.tracker.on_improvement(cost.into());
                self.stats.on_improvement();
                self.monitor.on_improvement(&tour);
                self.best_tour = Some(tour);
            }
        };

        self.tracker.finish();
        self.stats.set_total_time(self.start_time.elapsed());
        self.monitor.on_exit_search(&self.stats);
        Ok(self.finalize(reason))
    }

    /// Finalize the solver result based on the best tour found and the
    /// termination reason.
    ///
    /// # Note
    ///
    /// This consumes self.
    #[inline]
    fn finalize(self, reason: TerminationReason) -> SearchOutcome<T> {
        match reason {
            TerminationReason::Exhausted => {
                // At least one tour is scored on every exhausted run.
                let tour = self
                    .best_tour
                    .expect("expected a best tour once the search space is exhausted");
                SearchOutcome::new(
                    SearchResult::Optimal(tour),
                    TerminationReason::Exhausted,
                    self.stats,
                )
            }
            TerminationReason::Aborted(msg) => {
                let result = match self.best_tour {
                    Some(tour) => SearchResult::Feasible(tour),
                    None => SearchResult::Unknown,
                };
                SearchOutcome::new(result, TerminationReason::Aborted(msg), self.stats)
            }
        }
    }
}
