//! Process ring construction and per-rank work
//!
//! The ring is never stored anywhere. Each process only knows its own rank,
//! the ring size, and the two standard streams it was rebound to:
//!
//! ```text
//!   ┌────────┐ stdout ─▶ stdin ┌────────┐ stdout ─▶ stdin ┌────────┐
//!   │ rank 1 │ ───────────────▶│ rank 2 │ ───────────────▶│ rank N │
//!   └────────┘                 └────────┘                 └───┬────┘
//!        ▲                                                    │
//!        └──────────────────── stdout ─▶ stdin ───────────────┘
//! ```

pub mod builder;
pub mod link;
pub mod partition;
pub mod worker;

pub use builder::{add_new_node, make_trivial_ring, NodeOutcome, RingBuilder, WorkerState};
pub use link::{bind_as_input, bind_as_output, create_link, ReadEnd, WriteEnd};
pub use partition::{assigned_indices, owner_of};
pub use worker::RingWorker;

use std::fmt;

/// 1-indexed position of a process in spawn order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rank(usize);

impl Rank {
    /// The process that builds the trivial ring and starts the round
    pub const ORIGIN: Rank = Rank(1);

    /// Create a rank; zero is not a rank
    pub fn new(rank: usize) -> Option<Self> {
        (rank > 0).then_some(Rank(rank))
    }

    pub fn get(self) -> usize {
        self.0
    }

    /// Rank of the child this process would spawn
    pub fn next(self) -> Rank {
        Rank(self.0 + 1)
    }

    pub fn is_origin(self) -> bool {
        self == Rank::ORIGIN
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Everything a process knows about where it sits in the ring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RingPosition {
    pub rank: Rank,
    pub ring_size: usize,
}

impl RingPosition {
    pub fn new(rank: Rank, ring_size: usize) -> Self {
        Self { rank, ring_size }
    }
}
