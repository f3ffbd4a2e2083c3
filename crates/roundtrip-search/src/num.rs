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

//! # Search Numeric Trait
//!
//! Unified numeric bounds for tour cost types. `SearchCost` collects the
//! integer capabilities required by the solvers into a single alias:
//! intrinsic traits (`PrimInt`, `Signed`), checked and saturating
//! arithmetic, and a lossless conversion to `i64` for the progress layer's
//! atomic best-cost cell.
//!
//! ## Motivation
//!
//! Exact search should remain generic over integer widths while retaining
//! predictable arithmetic semantics: the accumulated path cost must never
//! wrap around silently. Callers pick a width wide enough for
//! `n * max_edge_weight`; the solvers verify that choice once at entry and
//! then accumulate with saturating adds.
//!
//! Note: `i128` is intentionally excluded; the `Into<i64>` bound limits
//! cost types to `i8`, `i16`, `i32`, and `i64`.

use num_traits::{CheckedAdd, CheckedMul, FromPrimitive, PrimInt, Saturating, Signed};
use std::hash::Hash;

/// A trait alias for numeric types that can carry tour costs.
///
/// Implemented for the signed integer types up to `i64`. The solvers rely
/// on checked multiplication for the entry-time overflow validation and on
/// saturating addition inside the scoring loop.
pub trait SearchCost:
    PrimInt
    + Signed
    + FromPrimitive
    + Into<i64>
    + CheckedAdd
    + CheckedMul
    + Saturating
    + std::fmt::Debug
    + std::fmt::Display
    + Send
    + Sync
    + Hash
{
}

impl<T> SearchCost for T where
    T: PrimInt
        + Signed
        + FromPrimitive
        + Into<i64>
        + CheckedAdd
        + CheckedMul
        + Saturating
        + std::fmt::Debug
        + std::fmt::Display
        + Send
        + Sync
        + Hash
{
}
