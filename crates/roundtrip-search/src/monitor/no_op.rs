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

use crate::monitor::search_monitor::SearchMonitor;
use num_traits::{PrimInt, Signed};
use roundtrip_model::matrix::DistanceMatrix;

/// A monitor that observes nothing and never interferes. The default
/// choice for workers and benchmarks, optimizing down to nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpMonitor<T> {
    _phantom: std::marker::PhantomData<T>,
}

impl<T> NoOpMonitor<T> {
    #[inline]
    pub fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<T> SearchMonitor<T> for NoOpMonitor<T>
where
    T: PrimInt + Signed,
{
    fn name(&self) -> &str {
        "NoOpMonitor"
    }

    fn on_enter_search(&mut self, _matrix: &DistanceMatrix<T>, _total_tours: u64) {}
}

#[cfg(test)]
mod tests {
    use super::NoOpMonitor;
    use crate::monitor::search_monitor::{SearchCommand, SearchMonitor};

    #[test]
    fn test_no_op_monitor_continues() {
        let monitor = NoOpMonitor::<i64>::new();
        assert_eq!(monitor.search_command(), SearchCommand::Continue);
        assert_eq!(monitor.name(), "NoOpMonitor");
    }
}
