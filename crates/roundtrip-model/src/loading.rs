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

//! Problem instance loader for the travelling-salesman domain.
//!
//! This module turns JSON array-of-arrays streams into a validated
//! `DistanceMatrix`. The wire format is the obvious one: a top-level array
//! of `n` rows, each an array of `n` integer edge weights.
//!
//! The loader accepts any `Read`, file path, or string slice, making it
//! convenient to integrate with benchmarks, tests, and tooling. Shape
//! problems (ragged rows) are reported with the offending row index before
//! the matrix invariants are checked, so errors point directly at the
//! broken input rather than at a generic length mismatch.

use crate::matrix::{DistanceMatrix, MatrixError};
use num_traits::{PrimInt, Signed};
use serde::de::DeserializeOwned;
use std::{fs::File, io::BufReader, io::Read, path::Path};

/// The error type for the instance loading process.
#[derive(Debug)]
pub enum InstanceLoadError {
    /// An I/O error occurred while reading the input stream.
    Io(std::io::Error),
    /// The input stream is not valid JSON of the expected shape.
    Json(serde_json::Error),
    /// A row holds a different number of entries than there are rows.
    RaggedRow {
        /// The index of the offending row.
        row: usize,
        /// The number of entries in that row.
        row_len: usize,
        /// The number of rows, which every row length must match.
        num_rows: usize,
    },
    /// The parsed matrix violates a distance matrix invariant.
    Matrix(MatrixError),
}

impl std::fmt::Display for InstanceLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Json(e) => write!(f, "JSON error: {e}"),
            Self::RaggedRow {
                row,
                row_len,
                num_rows,
            } => write!(
                f,
                "row {} holds {} entries but the matrix has {} rows",
                row, row_len, num_rows
            ),
            Self::Matrix(e) => write!(f, "invalid distance matrix: {e}"),
        }
    }
}

impl std::error::Error for InstanceLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Matrix(e) => Some(e),
            Self::RaggedRow { .. } => None,
        }
    }
}

impl From<std::io::Error> for InstanceLoadError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for InstanceLoadError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<MatrixError> for InstanceLoadError {
    fn from(e: MatrixError) -> Self {
        Self::Matrix(e)
    }
}

fn matrix_from_rows<T>(rows: Vec<Vec<T>>) -> Result<DistanceMatrix<T>, InstanceLoadError>
where
    T: PrimInt + Signed,
{
    let num_rows = rows.len();
    for (row, entries) in rows.iter().enumerate() {
        if entries.len() != num_rows {
            return Err(InstanceLoadError::RaggedRow {
                row,
                row_len: entries.len(),
                num_rows,
            });
        }
    }

    let distances = rows.into_iter().flatten().collect();
    Ok(DistanceMatrix::new(num_rows, distances)?)
}

/// Loads a distance matrix from a JSON array-of-arrays reader.
pub fn from_json_reader<T, R>(reader: R) -> Result<DistanceMatrix<T>, InstanceLoadError>
where
    T: PrimInt + Signed + DeserializeOwned,
    R: Read,
{
    let rows: Vec<Vec<T>> = serde_json::from_reader(reader)?;
    matrix_from_rows(rows)
}

/// Loads a distance matrix from a JSON array-of-arrays string slice.
pub fn from_json_str<T>(input: &str) -> Result<DistanceMatrix<T>, InstanceLoadError>
where
    T: PrimInt + Signed + DeserializeOwned,
{
    let rows: Vec<Vec<T>> = serde_json::from_str(input)?;
    matrix_from_rows(rows)
}

/// Loads a distance matrix from a JSON file on disk.
pub fn from_json_file<T, P>(path: P) -> Result<DistanceMatrix<T>, InstanceLoadError>
where
    T: PrimInt + Signed + DeserializeOwned,
    P: AsRef<Path>,
{
    let file = File::open(path)?;
    from_json_reader(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::{from_json_str, InstanceLoadError};
    use crate::index::CityIndex;
    use crate::matrix::MatrixError;

    #[test]
    fn test_loads_three_city_instance() {
        let input = "[[0, 7, 8], [7, 0, 4], [8, 4, 0]]";
        let matrix = from_json_str::<i64>(input).expect("valid instance");
        assert_eq!(matrix.num_cities(), 3);
        assert_eq!(matrix.distance(CityIndex::new(0), CityIndex::new(1)), 7);
        assert_eq!(matrix.distance(CityIndex::new(2), CityIndex::new(1)), 4);
    }

    #[test]
    fn test_rejects_ragged_rows() {
        let input = "[[0, 7], [7, 0, 4], [8, 4, 0]]";
        match from_json_str::<i64>(input) {
            Err(InstanceLoadError::RaggedRow {
                row,
                row_len,
                num_rows,
            }) => {
                assert_eq!(row, 0);
                assert_eq!(row_len, 2);
                assert_eq!(num_rows, 3);
            }
            other => panic!("expected RaggedRow, got {:?}", other.map(|m| m.num_cities())),
        }
    }

    #[test]
    fn test_rejects_malformed_json() {
        let input = "[[0, 7, 8], [7, 0";
        assert!(matches!(
            from_json_str::<i64>(input),
            Err(InstanceLoadError::Json(_))
        ));
    }

    #[test]
    fn test_rejects_invalid_matrix() {
        let input = "[[0, 7], [9, 0]]";
        match from_json_str::<i64>(input) {
            Err(InstanceLoadError::Matrix(MatrixError::Asymmetric { from, to })) => {
                assert_eq!(from, CityIndex::new(0));
                assert_eq!(to, CityIndex::new(1));
            }
            other => panic!("expected Asymmetric, got {:?}", other.map(|m| m.num_cities())),
        }
    }

    #[test]
    fn test_loads_single_city_instance() {
        let matrix = from_json_str::<i64>("[[0]]").expect("valid instance");
        assert_eq!(matrix.num_cities(), 1);
    }
}
