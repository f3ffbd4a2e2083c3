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

//! # Log Monitor
//!
//! Prints a periodic one-line status table to stdout. Clock reads are
//! gated behind a bitmask-based step filter so the monitor stays out of
//! the way of the scoring loop; the interval only controls how often a
//! line is actually printed once the clock has been read.

use crate::monitor::search_monitor::SearchMonitor;
use crate::stats::SearchStatistics;
use num_traits::{PrimInt, Signed};
use roundtrip_model::{matrix::DistanceMatrix, tour::Tour};
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct LogMonitor<T>
where
    T: std::fmt::Display + std::fmt::Debug + PrimInt + Signed,
{
    start_time: Instant,
    last_log_time: Instant,
    log_interval: Duration,
    clock_check_mask: u64,
    steps: u64,
    best_cost: Option<T>,
}

impl<T> LogMonitor<T>
where
    T: std::fmt::Display + std::fmt::Debug + PrimInt + Signed,
{
    /// Default mask: check the clock every 16,384 steps (2^14).
    const DEFAULT_STEP_CLOCK_CHECK_MASK: u64 = 0x3FFF;

    pub fn new(log_interval: Duration) -> Self {
        Self::with_clock_check_mask(log_interval, Self::DEFAULT_STEP_CLOCK_CHECK_MASK)
    }

    pub fn with_clock_check_mask(log_interval: Duration, clock_check_mask: u64) -> Self {
        Self {
            start_time: Instant::now(),
            last_log_time: Instant::now(),
            log_interval,
            clock_check_mask,
            steps: 0,
            best_cost: None,
        }
    }

    #[inline(always)]
    fn print_header(&self) {
        println!(
            "{:<9} | {:<16} | {:<14} | {:<12}",
            "Elapsed", "Tours", "Best Tour", "Tours/s"
        );
        println!("{}", "-".repeat(60));
    }

    #[inline(always)]
    fn log_line(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.start_time).as_secs_f64();

        let best_cost_str = match &self.best_cost {
            Some(cost) => format!("{}", cost),
            None => "Inf".to_string(),
        };
        let rate = if elapsed > 0.0 {
            self.steps as f64 / elapsed
        } else {
            0.0
        };
        let elapsed_field = format!("{:.1}s", elapsed);

        println!(
            "{:<9} | {:<16} | {:<14} | {:<12.0}",
            elapsed_field, self.steps, best_cost_str, rate
        );

        self.last_log_time = now;
    }
}

impl<T> Default for LogMonitor<T>
where
    T: std::fmt::Display + std::fmt::Debug + PrimInt + Signed,
{
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

impl<T> SearchMonitor<T> for LogMonitor<T>
where
    T: std::fmt::Display + std::fmt::Debug + PrimInt + Signed,
{
    fn name(&self) -> &str {
        "LogMonitor"
    }

    fn on_enter_search(&mut self, matrix: &DistanceMatrix<T>, total_tours: u64) {
        self.start_time = Instant::now();
        self.last_log_time = self.start_time;
        self.steps = 0;
        self.best_cost = None;

        println!(
            "exhaustive search over {} cities, {} tours to score",
            matrix.num_cities(),
            total_tours
        );
        self.print_header();
    }

    fn on_step(&mut self) {
        self.steps = self.steps.wrapping_add(1);
        if self.steps & self.clock_check_mask == 0
            && self.last_log_time.elapsed() >= self.log_interval
        {
            self.log_line();
        }
    }

    fn on_improvement(&mut self, tour: &Tour<T>) {
        self.best_cost = Some(tour.cost());
    }

    fn on_exit_search(&mut self, stats: &SearchStatistics) {
        self.log_line();
        print!("{}", stats);
    }
}

#[cfg(test)]
mod tests {
    use super::LogMonitor;
    use crate::monitor::search_monitor::{SearchCommand, SearchMonitor};
    use crate::stats::SearchStatistics;
    use roundtrip_model::index::CityIndex;
    use roundtrip_model::matrix::DistanceMatrix;
    use roundtrip_model::tour::Tour;
    use std::time::Duration;

    #[test]
    fn test_log_monitor_tracks_best_and_steps() {
        let matrix = DistanceMatrix::new(2, vec![0i64, 3, 3, 0]).expect("valid matrix");
        let mut monitor = LogMonitor::<i64>::with_clock_check_mask(Duration::from_secs(3600), 0x3);

        monitor.on_enter_search(&matrix, 1);
        monitor.on_step();
        monitor.on_step();

        let cycle = [0, 1, 0].iter().map(|&i| CityIndex::new(i)).collect();
        monitor.on_improvement(&Tour::new(6i64, cycle));
        assert_eq!(monitor.best_cost, Some(6));
        assert_eq!(monitor.steps, 2);

        monitor.on_exit_search(&SearchStatistics::default());
    }

    #[test]
    fn test_log_monitor_never_terminates() {
        let monitor = LogMonitor::<i64>::default();
        assert_eq!(monitor.search_command(), SearchCommand::Continue);
    }
}
