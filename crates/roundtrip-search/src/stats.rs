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

use std::time::Duration;

/// Statistics collected during an exhaustive search run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchStatistics {
    /// Total candidate tours scored.
    pub tours_evaluated: u64,
    /// Number of times the best-found tour was replaced.
    pub improvements: u64,
    /// Number of worker threads used during the run.
    pub used_threads: usize,
    /// Total wall-clock time spent searching.
    pub time_total: Duration,
}

impl Default for SearchStatistics {
    fn default() -> Self {
        Self {
            tours_evaluated: 0,
            improvements: 0,
            used_threads: 1,
            time_total: Duration::ZERO,
        }
    }
}

impl SearchStatistics {
    #[inline]
    pub fn on_tour_evaluated(&mut self) {
        self.tours_evaluated = self.tours_evaluated.saturating_add(1);
    }

    #[inline]
    pub fn on_improvement(&mut self) {
        self.improvements = self.improvements.saturating_add(1);
    }

    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }

    #[inline]
    pub fn set_used_threads(&mut self, used_threads: usize) {
        self.used_threads = used_threads;
    }

    /// Folds the counters of a worker run into this aggregate.
    /// Timing and thread counts are owned by the coordinator and left
    /// untouched.
    #[inline]
    pub fn absorb(&mut self, other: &SearchStatistics) {
        self.tours_evaluated = self.tours_evaluated.saturating_add(other.tours_evaluated);
        self.improvements = self.improvements.saturating_add(other.improvements);
    }
}

impl std::fmt::Display for SearchStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Search Statistics:")?;
        writeln!(f, "  Tours evaluated: {}", self.tours_evaluated)?;
        writeln!(f, "  Improvements:    {}", self.improvements)?;
        writeln!(f, "  Used threads:    {}", self.used_threads)?;
        writeln!(
            f,
            "  Total time:      {:.3}s",
            self.time_total.as_secs_f64()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::SearchStatistics;
    use std::time::Duration;

    #[test]
    fn test_counters_accumulate() {
        let mut stats = SearchStatistics::default();
        stats.on_tour_evaluated();
        stats.on_tour_evaluated();
        stats.on_improvement();
        stats.set_used_threads(4);
        stats.set_total_time(Duration::from_millis(250));

        assert_eq!(stats.tours_evaluated, 2);
        assert_eq!(stats.improvements, 1);
        assert_eq!(stats.used_threads, 4);
        assert_eq!(stats.time_total, Duration::from_millis(250));
    }

    #[test]
    fn test_absorb_folds_counters_only() {
        let mut total = SearchStatistics {
            tours_evaluated: 10,
            improvements: 2,
            used_threads: 3,
            time_total: Duration::from_secs(1),
        };
        let worker = SearchStatistics {
            tours_evaluated: 5,
            improvements: 1,
            used_threads: 1,
            time_total: Duration::from_secs(9),
        };

        total.absorb(&worker);
        assert_eq!(total.tours_evaluated, 15);
        assert_eq!(total.improvements, 3);
        assert_eq!(total.used_threads, 3);
        assert_eq!(total.time_total, Duration::from_secs(1));
    }

    #[test]
    fn test_display_formats_all_fields() {
        let stats = SearchStatistics {
            tours_evaluated: 5040,
            improvements: 7,
            used_threads: 2,
            time_total: Duration::from_millis(1234),
        };

        let rendered = format!("{}", stats);
        assert!(rendered.contains("Tours evaluated: 5040"));
        assert!(rendered.contains("Improvements:    7"));
        assert!(rendered.contains("Used threads:    2"));
        assert!(rendered.contains("Total time:      1.234s"));
    }
}
