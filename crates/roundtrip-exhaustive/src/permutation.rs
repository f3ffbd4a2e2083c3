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

//! # In-Place Plain-Changes Permutation Generator
//!
//! A pull-based generator producing all `k!` orderings of a sequence of
//! distinct city indices, one per call, each differing from its
//! predecessor by exactly one transposition. The generator owns a single
//! sequence buffer and a counter array of the same order; its memory use
//! is O(k) no matter how many permutations are pulled.
//!
//! ## Motivation
//!
//! Precomputing the permutation set is the textbook way to exhaust a tour
//! space, and it dies at around thirteen cities when `(n-1)!` buffers no
//! longer fit in memory. Streaming the orderings through one mutable
//! buffer removes that ceiling entirely; what the enumeration spends is
//! time, not space. Batch generation is therefore not offered here at all.
//!
//! ## Algorithm
//!
//! The counter array drives the walk: `counters[i]` counts down how many
//! transpositions remain before position `i` resets. Each step decrements
//! the counter at the cursor, swaps the cursor position with either
//! position `counters[cursor]` (odd cursor) or position `0` (even cursor),
//! then scans from index 1 upward resetting spent counters to their
//! position index; the scan's stopping point is the next cursor. The first
//! pull returns the seed sequence unchanged, and after `k!` pulls the
//! generator refuses further calls.

use fixedbitset::FixedBitSet;
use roundtrip_model::index::CityIndex;
use roundtrip_model::matrix::{checked_factorial, MAX_FACTORIAL_LEN};

/// The error type for permutation generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermutationError {
    /// The seed sequence contains the same city twice.
    DuplicateElement {
        /// The city that appears more than once.
        city: CityIndex,
    },
    /// The seed sequence is too long for its permutation count to fit
    /// into a `u64`.
    TooLong {
        /// The length of the rejected sequence.
        len: usize,
        /// The longest supported sequence length.
        max_len: usize,
    },
    /// `next_permutation` was called after all `k!` orderings were
    /// produced. Correct callers gate on `has_more`; hitting this is a
    /// contract violation.
    Exhausted,
}

impl std::fmt::Display for PermutationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateElement { city } => {
                write!(f, "sequence contains {} more than once", city)
            }
            Self::TooLong { len, max_len } => write!(
                f,
                "sequence of length {} exceeds the supported maximum of {}",
                len, max_len
            ),
            Self::Exhausted => write!(f, "all permutations have already been produced"),
        }
    }
}

impl std::error::Error for PermutationError {}

/// A stateful generator over all orderings of a fixed sequence.
///
/// # Examples
///
/// ```rust
/// use roundtrip_exhaustive::permutation::PlainChanges;
/// use roundtrip_model::index::CityIndex;
///
/// let seq = vec![CityIndex::new(1), CityIndex::new(2), CityIndex::new(3)];
/// let mut generator = PlainChanges::new(seq).expect("distinct indices");
///
/// assert_eq!(generator.total(), 6);
/// let mut count = 0;
/// while generator.has_more() {
///     let _perm = generator.next_permutation().expect("gated on has_more");
///     count += 1;
/// }
/// assert_eq!(count, 6);
/// ```
#[derive(Debug, Clone)]
pub struct PlainChanges {
    /// The single exclusively-owned buffer every emission points into.
    seq: Vec<CityIndex>,
    /// One countdown per position, plus a stable guard entry at the end.
    counters: Vec<usize>,
    /// The position whose counter the next step decrements.
    cursor: usize,
    started: bool,
    emitted: u64,
    total: u64,
}

impl PlainChanges {
    /// Seeds a generator over the given sequence of distinct indices.
    ///
    /// Runs in O(k). Fails if the sequence repeats an index or is longer
    /// than [`MAX_FACTORIAL_LEN`].
    pub fn new(seq: Vec<CityIndex>) -> Result<Self, PermutationError> {
        let k = seq.len();
        let total = checked_factorial(k).ok_or(PermutationError::TooLong {
            len: k,
            max_len: MAX_FACTORIAL_LEN,
        })?;

        let highest = seq.iter().map(|city| city.get()).max().unwrap_or(0);
        let mut seen = FixedBitSet::with_capacity(highest + 1);
        for city in seq.iter() {
            if seen.put(city.get()) {
                return Err(PermutationError::DuplicateElement { city: *city });
            }
        }

        Ok(Self {
            seq,
            counters: (0..=k).collect(),
            cursor: 1,
            started: false,
            emitted: 0,
            total,
        })
    }

    /// Returns the total number of orderings, `k!`.
    #[inline]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Returns how many orderings have been produced so far.
    #[inline]
    pub fn emitted(&self) -> u64 {
        self.emitted
    }

    /// Returns `true` while at least one ordering is still pending.
    #[inline]
    pub fn has_more(&self) -> bool {
        self.emitted < self.total
    }

    /// Produces the next ordering in place and returns a view of it.
    ///
    /// The first call returns the seed sequence unchanged; every later
    /// call applies exactly one transposition. Calling past exhaustion
    /// fails with [`PermutationError::Exhausted`].
    #[inline]
    pub fn next_permutation(&mut self) -> Result<&[CityIndex], PermutationError> {
        if self.emitted >= self.total {
            return Err(PermutationError::Exhausted);
        }

        if !self.started {
            self.started = true;
            self.emitted = 1;
            return Ok(&self.seq);
        }

        debug_assert!(
            self.cursor < self.seq.len(),
            "called `PlainChanges::next_permutation` with a spent cursor: {} of {}",
            self.cursor,
            self.seq.len()
        );

        self.counters[self.cursor] -= 1;
        let swap_with = if self.cursor & 1 == 1 {
            self.counters[self.cursor]
        } else {
            0
        };
        self.seq.swap(self.cursor, swap_with);

        // Reset spent counters; the scan's stopping point is the next
        // cursor. The guard entry at index k never reaches zero, so the
        // scan always terminates.
        let mut next = 1;
        while self.counters[next] == 0 {
            self.counters[next] = next;
            next += 1;
        }
        self.cursor = next;

        self.emitted += 1;
        Ok(&self.seq)
    }
}
