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

//! # Non-Blocking Progress Reporting
//!
//! A split progress channel for long exhaustive runs: the search loop owns
//! a `ProgressTracker` and pays almost nothing per step, while any number
//! of `ProgressHandle` clones pull immutable `ProgressSnapshot`s from the
//! shared atomics at whatever cadence the display layer chooses.
//!
//! ## Motivation
//!
//! A search scoring tens of millions of tours per second cannot afford an
//! atomic write per tour, let alone a lock. The tracker therefore counts
//! locally and publishes the completed count only every
//! `PUBLISH_INTERVAL` tours, and recomputes throughput only every
//! [`RATE_REFRESH_INTERVAL`] tours; the exact final count is published
//! once at `finish()`. Snapshots never block the search loop: after
//! `begin()` the loop touches only relaxed atomics it alone writes.
//!
//! ## Highlights
//!
//! - `best` starts at `i64::MAX` meaning "no tour installed yet"; the
//!   snapshot maps the sentinel to `None`.
//! - Throughput is stored as `f64` bit pattern inside an `AtomicU64`.
//! - The published completed count is monotonically non-decreasing and
//!   equals the total exactly once the run finishes.

use std::sync::{
    atomic::{AtomicI64, AtomicU64, Ordering},
    Arc, Mutex,
};
use std::time::{Duration, Instant};

/// Tours between two throughput recomputations.
pub const RATE_REFRESH_INTERVAL: u64 = 100_000;

/// Completed-count publishes are gated to every `PUBLISH_INTERVAL` tours.
/// Must be a power of two.
const PUBLISH_INTERVAL: u64 = 1 << 10;

/// Sentinel stored in the atomic best-cost cell while no tour is known.
const NO_BEST: i64 = i64::MAX;

/// An immutable copy of the search progress at one point in time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressSnapshot {
    /// Tours scored so far (published value, trails the loop slightly).
    pub completed: u64,
    /// Total number of tours the run will score.
    pub total: u64,
    /// Wall-clock time since the run began.
    pub elapsed: Duration,
    /// Cost of the best tour found so far, if any.
    pub best_cost: Option<i64>,
    /// Most recently recomputed throughput.
    pub tours_per_second: f64,
}

impl ProgressSnapshot {
    /// Returns the completed fraction in `[0, 1]`.
    #[inline]
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        self.completed as f64 / self.total as f64
    }

    /// Returns `true` once every tour has been scored.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.completed >= self.total
    }
}

impl std::fmt::Display for ProgressSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let best = match self.best_cost {
            Some(cost) => cost.to_string(),
            None => "Inf".to_string(),
        };
        write!(
            f,
            "Progress({}/{} tours, best: {}, {:.0} tours/s, {:.1}s)",
            self.completed,
            self.total,
            best,
            self.tours_per_second,
            self.elapsed.as_secs_f64()
        )
    }
}

/// Shared progress cells, written by one tracker and read by any number of
/// handles.
#[derive(Debug)]
pub struct ProgressState {
    completed: AtomicU64,
    total: AtomicU64,
    best: AtomicI64,
    rate_bits: AtomicU64,
    started: Mutex<Instant>,
}

impl Default for ProgressState {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressState {
    /// Creates a fresh progress state with nothing completed.
    pub fn new() -> Self {
        Self {
            completed: AtomicU64::new(0),
            total: AtomicU64::new(0),
            best: AtomicI64::new(NO_BEST),
            rate_bits: AtomicU64::new(0),
            started: Mutex::new(Instant::now()),
        }
    }

    fn reset(&self, total: u64, started: Instant) {
        self.completed.store(0, Ordering::Relaxed);
        self.total.store(total, Ordering::Relaxed);
        self.best.store(NO_BEST, Ordering::Relaxed);
        self.rate_bits.store(0, Ordering::Relaxed);
        *self.started.lock().unwrap() = started;
    }

    fn snapshot(&self) -> ProgressSnapshot {
        let best = self.best.load(Ordering::Relaxed);
        ProgressSnapshot {
            completed: self.completed.load(Ordering::Relaxed),
            total: self.total.load(Ordering::Relaxed),
            elapsed: self.started.lock().unwrap().elapsed(),
            best_cost: (best != NO_BEST).then_some(best),
            tours_per_second: f64::from_bits(self.rate_bits.load(Ordering::Relaxed)),
        }
    }
}

/// A cloneable read side of the progress channel.
#[derive(Debug, Clone)]
pub struct ProgressHandle {
    state: Arc<ProgressState>,
}

impl ProgressHandle {
    /// Wraps the given shared state for reading.
    pub fn new(state: Arc<ProgressState>) -> Self {
        Self { state }
    }

    /// Returns an immutable snapshot of the current progress.
    /// Never blocks the search loop.
    pub fn snapshot(&self) -> ProgressSnapshot {
        self.state.snapshot()
    }
}

/// The write side of the progress channel, owned by one search session.
#[derive(Debug)]
pub struct ProgressTracker {
    state: Arc<ProgressState>,
    completed: u64,
    next_rate_refresh: u64,
    started: Instant,
}

impl ProgressTracker {
    /// Resets the shared state for a new run over `total` tours and
    /// returns the tracker for it.
    pub fn begin(state: Arc<ProgressState>, total: u64) -> Self {
        let started = Instant::now();
        state.reset(total, started);
        Self {
            state,
            completed: 0,
            next_rate_refresh: RATE_REFRESH_INTERVAL,
            started,
        }
    }

    /// Records one scored tour. Publishes the count and recomputes the
    /// throughput only on their respective intervals, keeping the common
    /// path to a local increment and two compares.
    #[inline]
    pub fn on_tour_evaluated(&mut self) {
        self.completed += 1;
        if self.completed & (PUBLISH_INTERVAL - 1) == 0 {
            self.state.completed.store(self.completed, Ordering::Relaxed);
        }
        if self.completed == self.next_rate_refresh {
            self.refresh_rate();
            self.next_rate_refresh += RATE_REFRESH_INTERVAL;
        }
    }

    /// Records a new best tour cost.
    #[inline]
    pub fn on_improvement(&mut self, cost: i64) {
        self.state.best.store(cost, Ordering::Relaxed);
    }

    /// Publishes the exact final count and a final throughput figure.
    pub fn finish(&mut self) {
        self.state.completed.store(self.completed, Ordering::Relaxed);
        self.refresh_rate();
    }

    /// Returns the exact number of tours recorded so far.
    #[inline]
    pub fn completed(&self) -> u64 {
        self.completed
    }

    fn refresh_rate(&self) {
        let secs = self.started.elapsed().as_secs_f64();
        let rate = if secs > 0.0 {
            self.completed as f64 / secs
        } else {
            0.0
        };
        self.state.rate_bits.store(rate.to_bits(), Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::{ProgressHandle, ProgressState, ProgressTracker, RATE_REFRESH_INTERVAL};
    use std::sync::Arc;

    #[test]
    fn test_initial_snapshot_is_empty() {
        let state = Arc::new(ProgressState::new());
        let tracker = ProgressTracker::begin(Arc::clone(&state), 5040);
        let snapshot = ProgressHandle::new(state).snapshot();

        assert_eq!(snapshot.completed, 0);
        assert_eq!(snapshot.total, 5040);
        assert_eq!(snapshot.best_cost, None);
        assert!(!snapshot.is_finished());
        assert_eq!(tracker.completed(), 0);
    }

    #[test]
    fn test_finish_publishes_exact_count() {
        let state = Arc::new(ProgressState::new());
        let handle = ProgressHandle::new(Arc::clone(&state));
        let mut tracker = ProgressTracker::begin(state, 10);

        for _ in 0..10 {
            tracker.on_tour_evaluated();
        }
        // Below the publish interval, nothing is visible yet.
        assert_eq!(handle.snapshot().completed, 0);

        tracker.finish();
        let snapshot = handle.snapshot();
        assert_eq!(snapshot.completed, 10);
        assert!(snapshot.is_finished());
        assert!((snapshot.fraction() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_published_count_is_monotone() {
        let state = Arc::new(ProgressState::new());
        let handle = ProgressHandle::new(Arc::clone(&state));
        let mut tracker = ProgressTracker::begin(state, 1 << 14);

        let mut last = 0;
        for _ in 0..(1 << 14) {
            tracker.on_tour_evaluated();
            let seen = handle.snapshot().completed;
            assert!(seen >= last, "published count went backwards");
            last = seen;
        }
        tracker.finish();
        assert_eq!(handle.snapshot().completed, 1 << 14);
    }

    #[test]
    fn test_best_cost_round_trip() {
        let state = Arc::new(ProgressState::new());
        let handle = ProgressHandle::new(Arc::clone(&state));
        let mut tracker = ProgressTracker::begin(state, 100);

        tracker.on_improvement(42);
        assert_eq!(handle.snapshot().best_cost, Some(42));

        tracker.on_improvement(19);
        assert_eq!(handle.snapshot().best_cost, Some(19));
    }

    #[test]
    fn test_rate_refresh_interval() {
        let state = Arc::new(ProgressState::new());
        let handle = ProgressHandle::new(Arc::clone(&state));
        let mut tracker = ProgressTracker::begin(state, RATE_REFRESH_INTERVAL * 2);

        for _ in 0..RATE_REFRESH_INTERVAL {
            tracker.on_tour_evaluated();
        }
        assert!(handle.snapshot().tours_per_second > 0.0);
    }

    #[test]
    fn test_begin_resets_previous_run() {
        let state = Arc::new(ProgressState::new());
        let handle = ProgressHandle::new(Arc::clone(&state));

        let mut tracker = ProgressTracker::begin(Arc::clone(&state), 4);
        for _ in 0..4 {
            tracker.on_tour_evaluated();
        }
        tracker.on_improvement(7);
        tracker.finish();

        let _tracker = ProgressTracker::begin(state, 9);
        let snapshot = handle.snapshot();
        assert_eq!(snapshot.completed, 0);
        assert_eq!(snapshot.total, 9);
        assert_eq!(snapshot.best_cost, None);
    }
}
