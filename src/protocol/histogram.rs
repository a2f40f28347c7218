//! Letter-frequency histogram
//!
//! A `Histogram` holds one counter per ASCII letter plus a separate total.
//! The total is not derived from the buckets: depending on the count mode
//! it may include bytes that never land in a bucket.

use crate::config::CountMode;
use std::ops::AddAssign;

/// Number of letter buckets (a-z)
pub const LETTERS: usize = 26;

/// Per-letter counts plus a total count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Histogram {
    /// Total count; may exceed the sum of `buckets`
    pub total: u64,

    /// Counts for 'a'..='z', case-folded
    pub buckets: [u64; LETTERS],
}

/// Map a byte to its bucket index if it is an ASCII letter
pub fn classify(byte: u8) -> Option<usize> {
    let lower = byte.to_ascii_lowercase();
    if lower.is_ascii_lowercase() {
        Some((lower - b'a') as usize)
    } else {
        None
    }
}

impl Histogram {
    /// Create an empty histogram
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a histogram from a total and bucket counts
    pub fn from_parts(total: u64, buckets: [u64; LETTERS]) -> Self {
        Self { total, buckets }
    }

    /// Record one byte under the given count mode
    pub fn record(&mut self, byte: u8, mode: CountMode) {
        match classify(byte) {
            Some(idx) => {
                self.buckets[idx] += 1;
                self.total += 1;
            }
            None if mode == CountMode::AllBytes => self.total += 1,
            None => {}
        }
    }

    /// Record every byte of a slice
    pub fn record_all(&mut self, bytes: &[u8], mode: CountMode) {
        for &b in bytes {
            self.record(b, mode);
        }
    }

    /// Count for a single letter (case-insensitive); zero for non-letters
    pub fn count(&self, letter: char) -> u64 {
        u8::try_from(letter)
            .ok()
            .and_then(classify)
            .map(|idx| self.buckets[idx])
            .unwrap_or(0)
    }

    /// Fold another histogram into this one
    ///
    /// Counts saturate at `u64::MAX`.
    pub fn merge(&mut self, other: &Histogram) {
        self.total = self.total.saturating_add(other.total);
        for (mine, theirs) in self.buckets.iter_mut().zip(other.buckets.iter()) {
            *mine = mine.saturating_add(*theirs);
        }
    }

    /// Largest single-bucket count
    pub fn max_bucket(&self) -> u64 {
        self.buckets.iter().copied().max().unwrap_or(0)
    }

    /// Sum of the letter buckets, saturating at `u64::MAX`
    pub fn letters_total(&self) -> u64 {
        self.buckets.iter().fold(0u64, |acc, &n| acc.saturating_add(n))
    }

    /// Iterate `(letter, count)` pairs in a-z order
    pub fn iter(&self) -> impl Iterator<Item = (char, u64)> + '_ {
        self.buckets
            .iter()
            .enumerate()
            .map(|(i, &count)| ((b'a' + i as u8) as char, count))
    }
}

impl AddAssign<&Histogram> for Histogram {
    fn add_assign(&mut self, rhs: &Histogram) {
        self.merge(rhs);
    }
}

impl std::iter::Sum for Histogram {
    fn sum<I: Iterator<Item = Histogram>>(iter: I) -> Self {
        iter.fold(Histogram::new(), |mut acc, h| {
            acc += &h;
            acc
        })
    }
}
