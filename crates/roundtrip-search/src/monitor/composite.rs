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

use crate::monitor::search_monitor::{SearchCommand, SearchMonitor};
use crate::stats::SearchStatistics;
use num_traits::{PrimInt, Signed};
use roundtrip_model::{matrix::DistanceMatrix, tour::Tour};

/// A monitor that fans every callback out to a list of child monitors.
/// The first child requesting termination wins.
pub struct CompositeMonitor<'a, T> {
    monitors: Vec<Box<dyn SearchMonitor<T> + 'a>>,
}

impl<'a, T> CompositeMonitor<'a, T>
where
    T: PrimInt + Signed,
{
    #[inline]
    pub fn new() -> Self {
        Self {
            monitors: Vec::new(),
        }
    }

    #[inline]
    pub fn add_monitor<M>(&mut self, monitor: M)
    where
        M: SearchMonitor<T> + 'a,
    {
        self.monitors.push(Box::new(monitor));
    }

    #[inline]
    pub fn with_monitor<M>(mut self, monitor: M) -> Self
    where
        M: SearchMonitor<T> + 'a,
    {
        self.add_monitor(monitor);
        self
    }

    #[inline]
    pub fn num_monitors(&self) -> usize {
        self.monitors.len()
    }
}

impl<'a, T> Default for CompositeMonitor<'a, T>
where
    T: PrimInt + Signed,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> std::fmt::Debug for CompositeMonitor<'a, T>
where
    T: PrimInt + Signed,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositeMonitor")
            .field("num_monitors", &self.monitors.len())
            .finish()
    }
}

impl<'a, T> SearchMonitor<T> for CompositeMonitor<'a, T>
where
    T: PrimInt + Signed,
{
    fn name(&self) -> &str {
        "CompositeMonitor"
    }

    fn on_enter_search(&mut self, matrix: &DistanceMatrix<T>, total_tours: u64) {
        for monitor in self.monitors.iter_mut() {
            monitor.on_enter_search(matrix, total_tours);
        }
    }

    fn on_step(&mut self) {
        for monitor in self.monitors.iter_mut() {
            monitor.on_step();
        }
    }

    fn on_improvement(&mut self, tour: &Tour<T>) {
        for monitor in self.monitors.iter_mut() {
            monitor.on_improvement(tour);
        }
    }

    fn on_exit_search(&mut self, stats: &SearchStatistics) {
        for monitor in self.monitors.iter_mut() {
            monitor.on_exit_search(stats);
        }
    }

    fn search_command(&self) -> SearchCommand {
        for monitor in self.monitors.iter() {
            if let SearchCommand::Terminate(reason) = monitor.search_command() {
                return SearchCommand::Terminate(reason);
            }
        }
        SearchCommand::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::CompositeMonitor;
    use crate::monitor::interrupt::InterruptMonitor;
    use crate::monitor::no_op::NoOpMonitor;
    use crate::monitor::search_monitor::{SearchCommand, SearchMonitor};
    use std::sync::atomic::{AtomicBool, Ordering};

    #[test]
    fn test_empty_composite_continues() {
        let composite = CompositeMonitor::<i64>::new();
        assert_eq!(composite.search_command(), SearchCommand::Continue);
        assert_eq!(composite.num_monitors(), 0);
    }

    #[test]
    fn test_first_terminate_wins() {
        let flag = AtomicBool::new(false);
        let composite = CompositeMonitor::<i64>::new()
            .with_monitor(NoOpMonitor::new())
            .with_monitor(InterruptMonitor::new(&flag));

        assert_eq!(composite.search_command(), SearchCommand::Continue);

        flag.store(true, Ordering::Relaxed);
        match composite.search_command() {
            SearchCommand::Terminate(reason) => {
                assert_eq!(reason, "interrupt signal received");
            }
            other => panic!("expected Terminate, got {:?}", other),
        }
    }
}
