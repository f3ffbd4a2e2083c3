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

//! Roundtrip-Exhaustive: streaming exact search over all tours
//!
//! This crate proves tour optimality the hard way: it scores every one of
//! the `(n-1)!` orderings of the non-start cities. The engine never
//! materializes that set. A counter-driven generator mutates a single
//! sequence in place, one transposition per step, and the search session
//! scores each emission against a reusable cycle buffer.
//!
//! Core flow
//! - Provide a validated `roundtrip_model::DistanceMatrix<T>`.
//! - Choose a `eval::TourEvaluator` (edge-sum scoring by default).
//! - Optionally attach `roundtrip_search` monitors and poll progress
//!   through the solver's `ProgressHandle`.
//! - Run `solver::ExhaustiveSolver`, or fan branches out via
//!   `roundtrip-solver` for the parallel variant.
//!
//! Design highlights
//! - Memory stays O(n) per run: a counter array, the permutation buffer,
//!   and the cycle buffer. Nothing grows with the factorial.
//! - Deterministic: the same instance and start city always produce the
//!   same outcome, with first-found-wins tie handling.
//!
//! Module map
//! - `permutation`: the in-place plain-changes generator.
//! - `eval`: tour scoring.
//! - `solver`: the search engine and session orchestration.
//! - `error`: entry validation failures.

pub mod error;
pub mod eval;
pub mod permutation;
pub mod solver;
