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

//! # Symmetric Distance Matrix
//!
//! An immutable n-by-n matrix of non-negative edge weights over a complete
//! graph, stored row-major in a single flat allocation. Construction is the
//! single validation point: a `DistanceMatrix<T>` that exists is guaranteed
//! square, symmetric, zero on the diagonal, and free of negative entries,
//! so the search loops can read it unchecked.
//!
//! ## Motivation
//!
//! Exhaustive search reads the matrix billions of times and must never
//! re-validate it inside the hot loop. Pushing every invariant into the
//! constructor keeps the per-edge lookup a single multiply-add.
//!
//! ## Highlights
//!
//! - `DistanceMatrix::new(n, distances)` validates and rejects malformed
//!   input with a typed `MatrixError`.
//! - `distance(from, to)` with debug-asserted bounds and an `unsafe`
//!   `distance_unchecked` variant for the inner loop.
//! - `num_tours()` reports the search-space size `(n-1)!` with overflow
//!   checking, and `max_distance()` feeds the cost-width validation of the
//!   solvers.

use crate::index::CityIndex;
use num_traits::{PrimInt, Signed};

/// The highest sequence length whose factorial still fits into a `u64`.
pub const MAX_FACTORIAL_LEN: usize = 20;

/// Computes `k!` as a `u64`, returning `None` once the product would
/// overflow (any `k` above [`MAX_FACTORIAL_LEN`]).
#[inline]
pub fn checked_factorial(k: usize) -> Option<u64> {
    let mut result: u64 = 1;
    for factor in 2..=k as u64 {
        result = result.checked_mul(factor)?;
    }
    Some(result)
}

#[inline(always)]
fn flatten_index(num_cities: usize, from: CityIndex, to: CityIndex) -> usize {
    from.get() * num_cities + to.get()
}

/// The error type for distance matrix construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatrixError {
    /// The flat distance buffer does not contain exactly `n * n` entries.
    NotSquare {
        /// The declared number of cities.
        num_cities: usize,
        /// The number of entries actually supplied.
        num_entries: usize,
    },
    /// A diagonal entry `d[i][i]` is not zero.
    NonZeroDiagonal {
        /// The city whose self-distance is non-zero.
        city: CityIndex,
    },
    /// An entry pair violates `d[i][j] == d[j][i]`.
    Asymmetric {
        /// The row of the offending entry.
        from: CityIndex,
        /// The column of the offending entry.
        to: CityIndex,
    },
    /// An edge weight is negative.
    NegativeDistance {
        /// The row of the offending entry.
        from: CityIndex,
        /// The column of the offending entry.
        to: CityIndex,
    },
}

impl std::fmt::Display for MatrixError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotSquare {
                num_cities,
                num_entries,
            } => write!(
                f,
                "expected {} x {} = {} distance entries, got {}",
                num_cities,
                num_cities,
                num_cities * num_cities,
                num_entries
            ),
            Self::NonZeroDiagonal { city } => {
                write!(f, "distance from {} to itself must be zero", city)
            }
            Self::Asymmetric { from, to } => write!(
                f,
                "distance from {} to {} differs from the reverse direction",
                from, to
            ),
            Self::NegativeDistance { from, to } => {
                write!(f, "distance from {} to {} is negative", from, to)
            }
        }
    }
}

impl std::error::Error for MatrixError {}

/// An immutable, validated distance matrix over a complete graph.
///
/// Data is stored row-major: `distances[from * n + to]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DistanceMatrix<T> {
    num_cities: usize,
    distances: Vec<T>,
}

impl<T> DistanceMatrix<T>
where
    T: PrimInt + Signed,
{
    /// Constructs a new `DistanceMatrix` from a flat row-major buffer.
    ///
    /// Validation happens here and only here: the buffer must contain
    /// exactly `num_cities * num_cities` entries, the diagonal must be
    /// zero, every entry must be non-negative, and the matrix must be
    /// symmetric.
    pub fn new(num_cities: usize, distances: Vec<T>) -> Result<Self, MatrixError> {
        if distances.len() != num_cities * num_cities {
            return Err(MatrixError::NotSquare {
                num_cities,
                num_entries: distances.len(),
            });
        }

        for from in 0..num_cities {
            for to in 0..num_cities {
                let value = distances[from * num_cities + to];
                if from == to && !value.is_zero() {
                    return Err(MatrixError::NonZeroDiagonal {
                        city: CityIndex::new(from),
                    });
                }
                if value < T::zero() {
                    return Err(MatrixError::NegativeDistance {
                        from: CityIndex::new(from),
                        to: CityIndex::new(to),
                    });
                }
                // Only check each unordered pair once.
                if to > from && value != distances[to * num_cities + from] {
                    return Err(MatrixError::Asymmetric {
                        from: CityIndex::new(from),
                        to: CityIndex::new(to),
                    });
                }
            }
        }

        Ok(Self {
            num_cities,
            distances,
        })
    }

    /// Returns the number of cities in this matrix.
    #[inline]
    pub fn num_cities(&self) -> usize {
        self.num_cities
    }

    /// Returns the distance between two cities.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if either index is out of bounds.
    #[inline]
    pub fn distance(&self, from: CityIndex, to: CityIndex) -> T {
        debug_assert!(
            from.get() < self.num_cities,
            "called `DistanceMatrix::distance` with from index out of bounds: the len is {} but the index is {}",
            self.num_cities,
            from.get()
        );
        debug_assert!(
            to.get() < self.num_cities,
            "called `DistanceMatrix::distance` with to index out of bounds: the len is {} but the index is {}",
            self.num_cities,
            to.get()
        );

        self.distances[flatten_index(self.num_cities, from, to)]
    }

    /// Returns the distance between two cities without bounds checking.
    ///
    /// # Safety
    ///
    /// The caller must ensure that both indices are within
    /// `0..num_cities()`.
    #[inline(always)]
    pub unsafe fn distance_unchecked(&self, from: CityIndex, to: CityIndex) -> T {
        unsafe {
            *self
                .distances
                .get_unchecked(flatten_index(self.num_cities, from, to))
        }
    }

    /// Returns the largest edge weight in the matrix, or zero for the
    /// single-city instance.
    pub fn max_distance(&self) -> T {
        self.distances
            .iter()
            .copied()
            .fold(T::zero(), |acc, d| acc.max(d))
    }

    /// Returns the number of distinct closed tours from a fixed start,
    /// `(n-1)!`, or `None` when that count does not fit into a `u64`.
    #[inline]
    pub fn num_tours(&self) -> Option<u64> {
        checked_factorial(self.num_cities.saturating_sub(1))
    }

    /// Returns the flat row-major distance buffer.
    #[inline]
    pub fn distances(&self) -> &[T] {
        &self.distances
    }
}

impl<T> std::fmt::Display for DistanceMatrix<T>
where
    T: PrimInt + Signed + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "DistanceMatrix({} x {})",
            self.num_cities, self.num_cities
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{checked_factorial, DistanceMatrix, MatrixError, MAX_FACTORIAL_LEN};
    use crate::index::CityIndex;

    fn ci(i: usize) -> CityIndex {
        CityIndex::new(i)
    }

    /// The three-city instance: T <-> N = 7, T <-> M = 8, N <-> M = 4.
    fn tnm_matrix() -> DistanceMatrix<i64> {
        DistanceMatrix::new(3, vec![0, 7, 8, 7, 0, 4, 8, 4, 0]).expect("valid matrix")
    }

    #[test]
    fn test_valid_matrix_roundtrip() {
        let m = tnm_matrix();
        assert_eq!(m.num_cities(), 3);
        assert_eq!(m.distance(ci(0), ci(1)), 7);
        assert_eq!(m.distance(ci(1), ci(0)), 7);
        assert_eq!(m.distance(ci(0), ci(2)), 8);
        assert_eq!(m.distance(ci(1), ci(2)), 4);
        assert_eq!(m.distance(ci(2), ci(2)), 0);
        assert_eq!(m.max_distance(), 8);
    }

    #[test]
    fn test_rejects_wrong_entry_count() {
        let err = DistanceMatrix::new(3, vec![0i64, 1, 2, 3]).unwrap_err();
        assert_eq!(
            err,
            MatrixError::NotSquare {
                num_cities: 3,
                num_entries: 4
            }
        );
    }

    #[test]
    fn test_rejects_non_zero_diagonal() {
        let err = DistanceMatrix::new(2, vec![1i64, 2, 2, 0]).unwrap_err();
        assert_eq!(err, MatrixError::NonZeroDiagonal { city: ci(0) });
    }

    #[test]
    fn test_rejects_asymmetry() {
        let err = DistanceMatrix::new(2, vec![0i64, 2, 3, 0]).unwrap_err();
        assert_eq!(
            err,
            MatrixError::Asymmetric {
                from: ci(0),
                to: ci(1)
            }
        );
    }

    #[test]
    fn test_rejects_negative_distance() {
        let err = DistanceMatrix::new(2, vec![0i64, -2, -2, 0]).unwrap_err();
        assert_eq!(
            err,
            MatrixError::NegativeDistance {
                from: ci(0),
                to: ci(1)
            }
        );
    }

    #[test]
    fn test_single_city_instance() {
        let m = DistanceMatrix::new(1, vec![0i64]).expect("valid matrix");
        assert_eq!(m.num_cities(), 1);
        assert_eq!(m.max_distance(), 0);
        assert_eq!(m.num_tours(), Some(1));
    }

    #[test]
    fn test_num_tours() {
        let m = tnm_matrix();
        // (3 - 1)! = 2
        assert_eq!(m.num_tours(), Some(2));
    }

    #[test]
    fn test_checked_factorial() {
        assert_eq!(checked_factorial(0), Some(1));
        assert_eq!(checked_factorial(1), Some(1));
        assert_eq!(checked_factorial(5), Some(120));
        assert_eq!(checked_factorial(13), Some(6_227_020_800));
        assert_eq!(checked_factorial(MAX_FACTORIAL_LEN), Some(2_432_902_008_176_640_000));
        assert_eq!(checked_factorial(MAX_FACTORIAL_LEN + 1), None);
    }

    #[test]
    fn test_error_display() {
        let err = DistanceMatrix::new(2, vec![0i64, 2, 3, 0]).unwrap_err();
        let rendered = format!("{}", err);
        assert!(rendered.contains("CityIndex(0)"));
        assert!(rendered.contains("CityIndex(1)"));
    }
}
