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
use roundtrip_model::{matrix::DistanceMatrix, tour::Tour};

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub enum SearchCommand {
    #[default]
    Continue,
    Terminate(String),
}

impl std::fmt::Display for SearchCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchCommand::Continue => write!(f, "Continue"),
            SearchCommand::Terminate(reason) => write!(f, "Terminate: {}", reason),
        }
    }
}

/// Observer and cooperative controller of a running search.
///
/// The solver calls `on_step` once per scored tour and consults
/// `search_command` between generator steps. Termination requested here is
/// the only way a run ends before exhaustion; an aborted run reports its
/// partial best as feasible, never as optimal.
pub trait SearchMonitor<T>
where
    T: PrimInt + Signed,
{
    fn name(&self) -> &str;

    /// Called once before the first generator step.
    fn on_enter_search(&mut self, matrix: &DistanceMatrix<T>, total_tours: u64);

    /// Called once per scored tour. Kept argument-free so that doing
    /// nothing costs nothing.
    fn on_step(&mut self) {}

    /// Called whenever the best-found tour is replaced.
    fn on_improvement(&mut self, _tour: &Tour<T>) {}

    /// Called once after the search loop ends, for any reason.
    fn on_exit_search(&mut self, _stats: &SearchStatistics) {}

    fn search_command(&self) -> SearchCommand {
        SearchCommand::Continue
    }
}

impl<T> std::fmt::Debug for dyn SearchMonitor<T>
where
    T: PrimInt + Signed,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SearchMonitor({})", self.name())
    }
}

impl<T> std::fmt::Display for dyn SearchMonitor<T>
where
    T: PrimInt + Signed,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SearchMonitor({})", self.name())
    }
}
