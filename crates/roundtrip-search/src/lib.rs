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

//! Roundtrip-Search: shared infrastructure for exact tour search
//!
//! Building blocks used by every solver in the workspace, independent of
//! the concrete enumeration strategy.
//!
//! Module map
//! - `num`: the `SearchCost` numeric trait alias bounding tour cost types.
//! - `monitor`: the `SearchMonitor` observer/controller seam plus stock
//!   monitors (no-op, interrupt, periodic log, composite).
//! - `progress`: non-blocking pull-based progress reporting
//!   (`ProgressTracker` on the search side, `ProgressHandle` snapshots on
//!   the consumer side).
//! - `result`: search outcomes with termination reasons.
//! - `stats`: lightweight counters and timing.

pub mod monitor;
pub mod num;
pub mod progress;
pub mod result;
pub mod stats;
