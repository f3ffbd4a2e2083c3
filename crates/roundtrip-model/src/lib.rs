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

//! Roundtrip-Model: problem data for exact travelling-salesman search
//!
//! This crate defines the immutable inputs and outputs shared by every
//! solver in the workspace: strongly typed city indices, a validated
//! symmetric distance matrix, and the closed tour produced by a search.
//!
//! Module map
//! - `index`: zero-cost `CityIndex` wrapper around `usize`.
//! - `matrix`: `DistanceMatrix<T>` with construction-time validation.
//! - `tour`: `Tour<T>`, a closed cycle plus its total cost.
//! - `loading`: JSON array-of-arrays instance loader.
//! - `synth`: seeded random instance synthesis.
//!
//! Invariants are enforced where the data is created. A `DistanceMatrix`
//! that exists is square, symmetric, non-negative, and zero on the
//! diagonal, so solvers can index it without re-checking.

pub mod index;
pub mod loading;
pub mod matrix;
pub mod synth;
pub mod tour;
