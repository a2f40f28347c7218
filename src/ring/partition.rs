//! Strided round-robin work partitioning
//!
//! Rank R of an N-process ring takes file indices R-1, R-1+N, R-1+2N, ...
//! Every rank computes its own share from (rank, N, file count) alone, so no
//! process ever has to ask another what to do.

use crate::ring::Rank;

/// File indices assigned to `rank` in a ring of `ring_size`
///
/// # Panics
///
/// Panics if `ring_size` is zero.
pub fn assigned_indices(
    file_count: usize,
    rank: Rank,
    ring_size: usize,
) -> impl Iterator<Item = usize> {
    assert!(ring_size > 0, "ring size must be positive");
    (rank.get() - 1..file_count).step_by(ring_size)
}

/// Rank that processes the file at `index`
pub fn owner_of(index: usize, ring_size: usize) -> Rank {
    Rank(index % ring_size + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn rank(n: usize) -> Rank {
        Rank::new(n).unwrap()
    }

    #[test]
    fn test_strided_assignment() {
        let got: Vec<usize> = assigned_indices(10, rank(2), 4).collect();
        assert_eq!(got, vec![1, 5, 9]);

        let got: Vec<usize> = assigned_indices(10, rank(1), 1).collect();
        assert_eq!(got, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_more_ranks_than_files() {
        assert_eq!(assigned_indices(2, rank(3), 4).count(), 0);
        assert_eq!(assigned_indices(0, rank(1), 4).count(), 0);
    }

    #[test]
    fn test_partition_is_disjoint_and_exhaustive() {
        for ring_size in 1..=9 {
            for file_count in 0..=25 {
                let mut seen = HashSet::new();
                for r in 1..=ring_size {
                    for idx in assigned_indices(file_count, rank(r), ring_size) {
                        assert!(idx < file_count);
                        assert!(seen.insert(idx), "index {} assigned twice", idx);
                        assert_eq!(owner_of(idx, ring_size), rank(r));
                    }
                }
                assert_eq!(seen.len(), file_count);
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let a: Vec<usize> = assigned_indices(100, rank(3), 7).collect();
        let b: Vec<usize> = assigned_indices(100, rank(3), 7).collect();
        assert_eq!(a, b);
    }
}
