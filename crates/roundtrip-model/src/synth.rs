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

//! Seeded random instance synthesis.
//!
//! Generates symmetric distance matrices with edge weights drawn uniformly
//! from a caller-supplied inclusive range. Only the upper triangle is
//! sampled; the lower triangle mirrors it and the diagonal stays zero, so
//! the result satisfies every `DistanceMatrix` invariant by construction.
//! The same seed always yields the same instance.

use crate::matrix::DistanceMatrix;
use num_traits::{PrimInt, Signed};
use rand::{distr::uniform::SampleUniform, rngs::StdRng, Rng, SeedableRng};

/// The error type for instance synthesis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SynthesisError<T> {
    /// An instance needs at least one city.
    NoCities,
    /// The requested edge weight range is empty or allows negative weights.
    InvalidBounds {
        /// The lower inclusive edge weight bound.
        min_distance: T,
        /// The upper inclusive edge weight bound.
        max_distance: T,
    },
}

impl<T> std::fmt::Display for SynthesisError<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoCities => write!(f, "an instance needs at least one city"),
            Self::InvalidBounds {
                min_distance,
                max_distance,
            } => write!(
                f,
                "edge weight bounds [{}, {}] must be non-negative and non-empty",
                min_distance, max_distance
            ),
        }
    }
}

impl<T> std::error::Error for SynthesisError<T> where T: std::fmt::Display + std::fmt::Debug {}

/// Synthesizes a random symmetric distance matrix.
///
/// Edge weights are drawn uniformly from `min_distance..=max_distance`
/// using a `StdRng` seeded with `seed`; identical arguments always yield
/// the identical matrix.
pub fn random_matrix<T>(
    num_cities: usize,
    seed: u64,
    min_distance: T,
    max_distance: T,
) -> Result<DistanceMatrix<T>, SynthesisError<T>>
where
    T: PrimInt + Signed + SampleUniform,
{
    if num_cities == 0 {
        return Err(SynthesisError::NoCities);
    }
    if min_distance > max_distance || min_distance < T::zero() {
        return Err(SynthesisError::InvalidBounds {
            min_distance,
            max_distance,
        });
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut distances = vec![T::zero(); num_cities * num_cities];

    for from in 0..num_cities {
        for to in (from + 1)..num_cities {
            let weight = rng.random_range(min_distance..=max_distance);
            distances[from * num_cities + to] = weight;
            distances[to * num_cities + from] = weight;
        }
    }

    let matrix = DistanceMatrix::new(num_cities, distances)
        .expect("a symmetric fill with zero diagonal satisfies every matrix invariant");
    Ok(matrix)
}

#[cfg(test)]
mod tests {
    use super::{random_matrix, SynthesisError};
    use crate::index::CityIndex;

    #[test]
    fn test_same_seed_same_matrix() {
        let a = random_matrix::<i64>(8, 42, 1, 10).expect("valid instance");
        let b = random_matrix::<i64>(8, 42, 1, 10).expect("valid instance");
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = random_matrix::<i64>(8, 42, 1, 10).expect("valid instance");
        let b = random_matrix::<i64>(8, 43, 1, 10).expect("valid instance");
        assert_ne!(a, b);
    }

    #[test]
    fn test_weights_respect_bounds() {
        let matrix = random_matrix::<i64>(10, 7, 3, 5).expect("valid instance");
        for from in 0..10 {
            for to in 0..10 {
                let d = matrix.distance(CityIndex::new(from), CityIndex::new(to));
                if from == to {
                    assert_eq!(d, 0);
                } else {
                    assert!((3..=5).contains(&d), "weight {} out of bounds", d);
                }
            }
        }
    }

    #[test]
    fn test_symmetry() {
        let matrix = random_matrix::<i64>(12, 99, 1, 100).expect("valid instance");
        for from in 0..12 {
            for to in 0..12 {
                assert_eq!(
                    matrix.distance(CityIndex::new(from), CityIndex::new(to)),
                    matrix.distance(CityIndex::new(to), CityIndex::new(from))
                );
            }
        }
    }

    #[test]
    fn test_rejects_empty_instance() {
        assert_eq!(
            random_matrix::<i64>(0, 1, 1, 10),
            Err(SynthesisError::NoCities)
        );
    }

    #[test]
    fn test_rejects_invalid_bounds() {
        assert!(matches!(
            random_matrix::<i64>(4, 1, 10, 1),
            Err(SynthesisError::InvalidBounds { .. })
        ));
        assert!(matches!(
            random_matrix::<i64>(4, 1, -3, 5),
            Err(SynthesisError::InvalidBounds { .. })
        ));
    }

    #[test]
    fn test_single_city() {
        let matrix = random_matrix::<i64>(1, 0, 1, 10).expect("valid instance");
        assert_eq!(matrix.num_cities(), 1);
    }
}
