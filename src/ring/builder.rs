//! Incremental ring construction
//!
//! The ring starts as one process whose standard output is piped straight
//! into its own standard input. Each growth step forks and splices the new
//! process in behind its parent:
//!
//! ```text
//! before:   P ──────────────────────────▶ (P's old successor)
//!
//! after:    P ── new link ──▶ C ────────▶ (P's old successor)
//! ```
//!
//! The parent rebinds its output to the new link; the child rebinds its
//! input to it and keeps the output it inherited. A process that has spawned
//! a child is done growing. Only the newest child carries on, so the last
//! process created still holds the output of the trivial ring and feeds
//! rank 1, which closes the cycle.
//!
//! Every failure here is fatal: siblings already exist with committed
//! bindings and there is no way to undo a partial ring.

use crate::error::{LinkError, LinkResult};
use crate::ring::link::{bind_as_input, bind_as_output, close_link, create_link};
use crate::ring::{Rank, RingPosition};
use nix::unistd::{fork, getpid, ForkResult, Pid};
use tracing::{debug, info};

/// Result of one growth step, as seen by each side of the fork
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeOutcome {
    /// This process spawned `child` and is now wired to feed it
    Spawned { child: Pid },

    /// This process is the new child and continues with the next rank
    Continuation,
}

/// Lifecycle of one process during construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    /// Not part of a ring yet
    Unranked,

    /// Ranked and still expected to spawn the next process
    Growing(Rank),

    /// Ranked and finished with construction
    Stable(Rank),
}

impl WorkerState {
    /// Rank, once one has been assigned
    pub fn rank(self) -> Option<Rank> {
        match self {
            WorkerState::Unranked => None,
            WorkerState::Growing(rank) | WorkerState::Stable(rank) => Some(rank),
        }
    }

    pub fn is_stable(self) -> bool {
        matches!(self, WorkerState::Stable(_))
    }
}

/// Turn the calling process into a one-node ring
///
/// One link is created and bound to both standard input and standard output,
/// then its raw ends are closed.
pub fn make_trivial_ring() -> LinkResult<()> {
    let (read_end, write_end) = create_link()?;
    bind_as_input(&read_end)?;
    bind_as_output(&write_end)?;
    close_link(read_end, write_end)
}

/// Grow the ring by one process
///
/// `child_rank` is only used to label a spawn failure.
pub fn add_new_node(child_rank: Rank) -> LinkResult<NodeOutcome> {
    let (read_end, write_end) = create_link()?;

    // SAFETY: the ring is built before any thread is started, so the child
    // is a complete copy of a single-threaded process.
    let outcome = match unsafe { fork() } {
        Ok(ForkResult::Parent { child }) => {
            bind_as_output(&write_end)?;
            NodeOutcome::Spawned { child }
        }
        Ok(ForkResult::Child) => {
            bind_as_input(&read_end)?;
            NodeOutcome::Continuation
        }
        Err(e) => {
            return Err(LinkError::SpawnFailed {
                rank: child_rank.get(),
                reason: e.to_string(),
            })
        }
    };

    close_link(read_end, write_end)?;
    Ok(outcome)
}

/// Drives construction of a ring of a fixed size
#[derive(Debug, Clone)]
pub struct RingBuilder {
    ring_size: usize,
    state: WorkerState,
}

impl RingBuilder {
    pub fn new(ring_size: usize) -> Self {
        Self {
            ring_size,
            state: WorkerState::Unranked,
        }
    }

    pub fn state(&self) -> WorkerState {
        self.state
    }

    /// Build the ring and return this process's position in it
    ///
    /// Called once, by the original process. It returns once in every
    /// process of the finished ring, each with its own rank.
    pub fn build(mut self) -> LinkResult<RingPosition> {
        make_trivial_ring()?;
        let mut rank = Rank::ORIGIN;
        self.state = WorkerState::Growing(rank);
        debug!(pid = %getpid(), "Trivial ring formed");

        while let WorkerState::Growing(current) = self.state {
            rank = current;
            self.state = self.grow(current)?;
        }

        if rank.get() == self.ring_size {
            info!(ring_size = self.ring_size, "Ring closed");
        }
        debug!(rank = %rank, pid = %getpid(), "Joined ring");

        Ok(RingPosition::new(rank, self.ring_size))
    }

    /// One step of the state machine for a growing process
    fn grow(&self, rank: Rank) -> LinkResult<WorkerState> {
        if rank.get() >= self.ring_size {
            return Ok(WorkerState::Stable(rank));
        }

        match add_new_node(rank.next())? {
            NodeOutcome::Spawned { child } => {
                debug!(rank = %rank, child = %child, "Spawned successor");
                Ok(WorkerState::Stable(rank))
            }
            NodeOutcome::Continuation => Ok(WorkerState::Growing(rank.next())),
        }
    }
}
