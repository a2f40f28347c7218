//! Per-rank work once the ring is closed
//!
//! Each process:
//! - Counts the files its rank is assigned
//! - Takes part in one aggregation round over its standard streams
//! - Hands the round's outcome back to `main`

use crate::config::RingConfig;
use crate::content::FileSet;
use crate::error::Result;
use crate::protocol::{circulate, RoundOutcome};
use crate::ring::RingPosition;
use std::io;
use tracing::{debug, info, info_span};

/// One process's role in the finished ring
pub struct RingWorker<'a> {
    /// Where this process sits in the ring
    position: RingPosition,

    /// Configuration shared by every rank
    config: &'a RingConfig,
}

impl<'a> RingWorker<'a> {
    pub fn new(position: RingPosition, config: &'a RingConfig) -> Self {
        Self { position, config }
    }

    /// Count this rank's files and run its step of the round
    ///
    /// The origin gets back `Global` or `Partial`; every other rank gets
    /// `Forwarded`.
    pub fn run(&self, files: &FileSet) -> Result<RoundOutcome> {
        let span = info_span!("rank", rank = %self.position.rank);
        let _guard = span.enter();

        let assigned = files.assigned(self.position).count();
        debug!(
            pid = std::process::id(),
            files = assigned,
            ring_size = self.position.ring_size,
            "Counting assigned files"
        );
        let local = files.local_histogram(self.position, self.config.count_mode)?;
        debug!(total = local.total, "Local histogram ready");

        let stdin = io::stdin();
        let stdout = io::stdout();
        let outcome = circulate(
            self.position,
            &local,
            &mut stdin.lock(),
            &mut stdout.lock(),
            self.config.message_policy,
        )?;

        if let RoundOutcome::Global(ref global) = outcome {
            info!(total = global.total, ring_size = self.position.ring_size, "Aggregation round complete");
        }
        Ok(outcome)
    }
}
