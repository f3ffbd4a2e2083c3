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

use crate::permutation::PermutationError;
use roundtrip_model::index::CityIndex;

/// The error type for search entry validation. Every variant is detected
/// before the first generator step; a running search no longer fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The instance has no cities at all.
    EmptyInstance,
    /// The start city is not part of the instance.
    StartOutOfBounds {
        /// The rejected start city.
        start: CityIndex,
        /// The number of cities in the instance.
        num_cities: usize,
    },
    /// The fixed second city equals the start or is not part of the
    /// instance.
    InvalidSecondCity {
        /// The rejected second city.
        second: CityIndex,
        /// The start city of the run.
        start: CityIndex,
        /// The number of cities in the instance.
        num_cities: usize,
    },
    /// The tour count `(n-1)!` does not fit into a `u64`.
    TooManyCities {
        /// The number of cities in the instance.
        num_cities: usize,
        /// The largest supported instance size.
        max_cities: usize,
    },
    /// The cost type cannot hold `n * max_distance` without wraparound.
    CostOverflow {
        /// The number of cities in the instance.
        num_cities: usize,
    },
    /// The permutation generator rejected its seed sequence or was pulled
    /// past exhaustion.
    Permutation(PermutationError),
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyInstance => write!(f, "an instance needs at least one city"),
            Self::StartOutOfBounds { start, num_cities } => write!(
                f,
                "start city {} is out of bounds for an instance with {} cities",
                start, num_cities
            ),
            Self::InvalidSecondCity {
                second,
                start,
                num_cities,
            } => write!(
                f,
                "second city {} is invalid for a tour starting at {} over {} cities",
                second, start, num_cities
            ),
            Self::TooManyCities {
                num_cities,
                max_cities,
            } => write!(
                f,
                "an instance with {} cities exceeds the supported maximum of {}",
                num_cities, max_cities
            ),
            Self::CostOverflow { num_cities } => write!(
                f,
                "the cost type cannot hold the worst-case tour cost over {} cities",
                num_cities
            ),
            Self::Permutation(e) => write!(f, "permutation generator error: {e}"),
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Permutation(e) => Some(e),
            _ => None,
        }
    }
}

impl From<PermutationError> for SearchError {
    fn from(e: PermutationError) -> Self {
        Self::Permutation(e)
    }
}

#[cfg(test)]
mod tests {
    use super::SearchError;
    use crate::permutation::PermutationError;
    use roundtrip_model::index::CityIndex;

    #[test]
    fn test_display_names_the_offender() {
        let err = SearchError::StartOutOfBounds {
            start: CityIndex::new(9),
            num_cities: 4,
        };
        let rendered = format!("{}", err);
        assert!(rendered.contains("CityIndex(9)"));
        assert!(rendered.contains("4 cities"));
    }

    #[test]
    fn test_permutation_error_converts() {
        let err: SearchError = PermutationError::Exhausted.into();
        assert_eq!(err, SearchError::Permutation(PermutationError::Exhausted));
    }
}
