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

//! # Branch-Parallel Exhaustive Solver
//!
//! Decomposes the tour space by pinning the second city of the cycle to
//! each candidate in turn: `k` cities other than the start yield `k`
//! independent branches of `(k-1)!` tours each. Every branch runs a
//! private `ExhaustiveSolver::solve_with_second` on its own thread inside
//! `std::thread::scope`.
//!
//! ## Highlights
//!
//! - No shared mutable state during generation: workers own generator,
//!   buffers, local best, and progress cells outright.
//! - Reduction is a blocking join followed by a sequential scan in branch
//!   order; equal-cost tours keep the lowest branch index, so the
//!   reported cost always equals the sequential solver's and repeated
//!   runs return the same tour.
//! - Aggregated progress: `BranchProgressHandle::snapshot` sums the
//!   per-worker cells without ever blocking a worker.

use roundtrip_exhaustive::{
    error::SearchError,
    eval::TourEvaluator,
    solver::{validate_instance, ExhaustiveSolver},
};
use roundtrip_model::{index::CityIndex, matrix::DistanceMatrix, tour::Tour};
use roundtrip_search::{
    monitor::no_op::NoOpMonitor,
    num::SearchCost,
    progress::{ProgressHandle, ProgressSnapshot},
    result::{SearchOutcome, SearchResult, TerminationReason},
    stats::SearchStatistics,
};
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

/// The read side of a branch-parallel run's progress.
///
/// Snapshots aggregate the private per-worker cells: completed and total
/// counts are summed, the best cost is the minimum over workers, and the
/// throughput figures add up. Workers never touch the registry lock, so
/// polling cannot stall generation.
#[derive(Debug, Clone)]
pub struct BranchProgressHandle {
    workers: Arc<RwLock<Vec<ProgressHandle>>>,
}

impl BranchProgressHandle {
    fn empty() -> Self {
        Self {
            workers: Arc::new(RwLock::new(Vec::new())),
        }
    }

    fn register(&self, handles: Vec<ProgressHandle>) {
        *self.workers.write().unwrap() = handles;
    }

    /// Returns an immutable snapshot summed over every branch worker.
    pub fn snapshot(&self) -> ProgressSnapshot {
        let workers = self.workers.read().unwrap();
        let mut aggregate = ProgressSnapshot {
            completed: 0,
            total: 0,
            elapsed: Duration::ZERO,
            best_cost: None,
            tours_per_second: 0.0,
        };

        for handle in workers.iter() {
            let snapshot = handle.snapshot();
            aggregate.completed += snapshot.completed;
            aggregate.total += snapshot.total;
            aggregate.elapsed = aggregate.elapsed.max(snapshot.elapsed);
            aggregate.tours_per_second += snapshot.tours_per_second;
            aggregate.best_cost = match (aggregate.best_cost, snapshot.best_cost) {
                (Some(a), Some(b)) => Some(a.min(b)),
                (a, b) => a.or(b),
            };
        }
        aggregate
    }
}

/// An exact solver that fans the tour space out over one worker thread
/// per second-city branch and reduces the local optima.
#[derive(Debug)]
pub struct BranchParallelSolver {
    progress: BranchProgressHandle,
}

impl Default for BranchParallelSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl BranchParallelSolver {
    #[inline]
    pub fn new() -> Self {
        Self {
            progress: BranchProgressHandle::empty(),
        }
    }

    /// Returns a handle for polling aggregated progress. Valid across
    /// runs; a fresh run replaces the worker registry.
    #[inline]
    pub fn progress(&self) -> BranchProgressHandle {
        self.progress.clone()
    }

    /// Scores every tour from `start` across parallel branch workers and
    /// returns the proven minimum.
    ///
    /// The reported cost is identical to the sequential solver's for the
    /// same instance; in the presence of equal-cost optima the reported
    /// tour is the one from the lowest branch index.
    pub fn solve<T, E>(
        &self,
        matrix: &DistanceMatrix<T>,
        start: CityIndex,
        evaluator: &E,
    ) -> Result<SearchOutcome<T>, SearchError>
    where
        T: SearchCost,
        E: TourEvaluator<T> + Sync,
    {
        validate_instance(matrix, start, None)?;
        let start_time = Instant::now();

        let branches: Vec<CityIndex> = (0..matrix.num_cities())
            .map(CityIndex::new)
            .filter(|&city| city != start)
            .collect();

        // Single-city instance: no second city exists to branch on, and
        // the lone degenerate tour is not worth a thread.
        if branches.is_empty() {
            let mut solver = ExhaustiveSolver::new();
            self.progress.register(vec![solver.progress()]);
            return solver.solve(matrix, start, evaluator, NoOpMonitor::new());
        }

        let mut workers: Vec<ExhaustiveSolver> = branches
            .iter()
            .map(|_| ExhaustiveSolver::preallocated(matrix.num_cities()))
            .collect();
        self.progress
            .register(workers.iter().map(ExhaustiveSolver::progress).collect());

        // One scoped thread per branch; each owns its solver exclusively
        // and the scope guarantees all of them are joined before the
        // reduction below runs.
        let results: Vec<Result<SearchOutcome<T>, SearchError>> =
            std::thread::scope(|scope| {
                let handles: Vec<_> = workers
                    .iter_mut()
                    .zip(branches.iter())
                    .map(|(worker, &second)| {
                        scope.spawn(move || {
                            worker.solve_with_second(
                                matrix,
                                start,
                                second,
                                evaluator,
                                NoOpMonitor::new(),
                            )
                        })
                    })
                    .collect();

                handles
                    .into_iter()
                    .map(|handle| handle.join().expect("branch worker thread panicked"))
                    .collect()
            });

        self.reduce(results, start_time)
    }

    /// Sequential reduction over the joined branch results, in branch
    /// order. Strictly-lower comparison keeps the lowest branch index on
    /// equal-cost optima.
    fn reduce<T>(
        &self,
        results: Vec<Result<SearchOutcome<T>, SearchError>>,
        start_time: Instant,
    ) -> Result<SearchOutcome<T>, SearchError>
    where
        T: SearchCost,
    {
        let mut statistics = SearchStatistics::default();
        statistics.set_used_threads(results.len());

        let mut best: Option<Tour<T>> = None;
        for result in results {
            let outcome = result?;
            statistics.absorb(&outcome.statistics);

            if let Some(tour) = outcome.best_tour() {
                let improves = match &best {
                    Some(current) => tour.cost() < current.cost(),
                    None => true,
                };
                if improves {
                    best = Some(tour.clone());
                }
            }
        }
        statistics.set_total_time(start_time.elapsed());

        let tour = best.expect("every branch of a validated instance returns a tour");
        Ok(SearchOutcome::new(
            SearchResult::Optimal(tour),
            TerminationReason::Exhausted,
            statistics,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::BranchParallelSolver;
    use roundtrip_exhaustive::error::SearchError;
    use roundtrip_exhaustive::eval::EdgeSumEvaluator;
    use roundtrip_exhaustive::solver::ExhaustiveSolver;
    use roundtrip_model::index::CityIndex;
    use roundtrip_model::matrix::DistanceMatrix;
    use roundtrip_model::synth::random_matrix;
    use roundtrip_search::monitor::no_op::NoOpMonitor;
    use roundtrip_search::result::TerminationReason;

    fn ci(i: usize) -> CityIndex {
        CityIndex::new(i)
    }

    fn cities(indices: &[usize]) -> Vec<CityIndex> {
        indices.iter().copied().map(CityIndex::new).collect()
    }

    #[test]
    fn test_matches_sequential_on_random_instances() {
        for (num_cities, seed) in [(4usize, 1u64), (5, 2), (6, 3), (7, 4), (8, 5)] {
            let matrix = random_matrix::<i64>(num_cities, seed, 1, 100).expect("valid instance");
            let evaluator = EdgeSumEvaluator::new();

            let sequential = ExhaustiveSolver::new()
                .solve(&matrix, ci(0), &evaluator, NoOpMonitor::new())
                .expect("valid instance");
            let parallel = BranchParallelSolver::new()
                .solve(&matrix, ci(0), &evaluator)
                .expect("valid instance");

            assert_eq!(
                sequential.best_tour().map(|tour| tour.cost()),
                parallel.best_tour().map(|tour| tour.cost()),
                "cost mismatch for n={num_cities} seed={seed}"
            );
            assert!(parallel.is_optimal());
        }
    }

    #[test]
    fn test_deterministic_across_runs() {
        let matrix = random_matrix::<i64>(7, 77, 1, 50).expect("valid instance");
        let evaluator = EdgeSumEvaluator::new();
        let solver = BranchParallelSolver::new();

        let first = solver
            .solve(&matrix, ci(0), &evaluator)
            .expect("valid instance");
        let second = solver
            .solve(&matrix, ci(0), &evaluator)
            .expect("valid instance");

        assert_eq!(first.best_tour(), second.best_tour());
    }

    #[test]
    fn test_ties_keep_lowest_branch() {
        // Every tour of a uniform-weight instance costs the same, so the
        // winner must be branch 0's first emission: the ascending cycle.
        let num_cities = 4;
        let mut distances = vec![0i64; num_cities * num_cities];
        for from in 0..num_cities {
            for to in 0..num_cities {
                if from != to {
                    distances[from * num_cities + to] = 5;
                }
            }
        }
        let matrix = DistanceMatrix::new(num_cities, distances).expect("valid matrix");

        let outcome = BranchParallelSolver::new()
            .solve(&matrix, ci(0), &EdgeSumEvaluator::new())
            .expect("valid instance");

        let tour = outcome.best_tour().expect("optimal tour");
        assert_eq!(tour.cost(), 20);
        assert_eq!(tour.cycle(), cities(&[0, 1, 2, 3, 0]).as_slice());
    }

    #[test]
    fn test_single_city_instance() {
        let matrix = DistanceMatrix::new(1, vec![0i64]).expect("valid matrix");
        let outcome = BranchParallelSolver::new()
            .solve(&matrix, ci(0), &EdgeSumEvaluator::new())
            .expect("valid instance");

        let tour = outcome.best_tour().expect("degenerate tour");
        assert_eq!(tour.cost(), 0);
        assert_eq!(tour.cycle(), cities(&[0, 0]).as_slice());
    }

    #[test]
    fn test_two_city_instance_uses_one_branch() {
        let matrix = DistanceMatrix::new(2, vec![0i64, 9, 9, 0]).expect("valid matrix");
        let outcome = BranchParallelSolver::new()
            .solve(&matrix, ci(0), &EdgeSumEvaluator::new())
            .expect("valid instance");

        assert_eq!(outcome.best_tour().map(|tour| tour.cost()), Some(18));
        assert_eq!(outcome.statistics.used_threads, 1);
    }

    #[test]
    fn test_worker_and_thread_accounting() {
        let matrix = random_matrix::<i64>(6, 8, 1, 20).expect("valid instance");
        let outcome = BranchParallelSolver::new()
            .solve(&matrix, ci(0), &EdgeSumEvaluator::new())
            .expect("valid instance");

        // 5 branches of 4! tours each.
        assert_eq!(outcome.statistics.used_threads, 5);
        assert_eq!(outcome.statistics.tours_evaluated, 120);
        assert_eq!(outcome.reason, TerminationReason::Exhausted);
    }

    #[test]
    fn test_aggregated_progress_reaches_total() {
        let matrix = random_matrix::<i64>(7, 21, 1, 10).expect("valid instance");
        let solver = BranchParallelSolver::new();
        let handle = solver.progress();

        let outcome = solver
            .solve(&matrix, ci(0), &EdgeSumEvaluator::new())
            .expect("valid instance");

        let snapshot = handle.snapshot();
        assert_eq!(snapshot.total, 720); // (7 - 1)!
        assert_eq!(snapshot.completed, 720);
        assert!(snapshot.is_finished());
        assert_eq!(
            snapshot.best_cost,
            outcome.best_tour().map(|tour| tour.cost())
        );
    }

    #[test]
    fn test_rejects_invalid_start_before_spawning() {
        let matrix = random_matrix::<i64>(4, 6, 1, 10).expect("valid instance");
        let err = BranchParallelSolver::new()
            .solve(&matrix, ci(9), &EdgeSumEvaluator::new())
            .unwrap_err();
        assert_eq!(
            err,
            SearchError::StartOutOfBounds {
                start: ci(9),
                num_cities: 4
            }
        );
    }
}
