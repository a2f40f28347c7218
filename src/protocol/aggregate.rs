//! Token-passing aggregation round
//!
//! One partial message circulates exactly once around the ring:
//!
//! ```text
//! origin ──send──▶ 2 ──▶ 3 ──▶ ... ──▶ N ──send──▶ origin
//!          local    +local +local       +local      (global)
//! ```
//!
//! The origin sends first and receives last. Every other rank receives,
//! folds in its own local histogram, and forwards. Because no relay ever
//! sends before it has received, there is exactly one token in flight and
//! the round cannot deadlock.

use crate::config::MessagePolicy;
use crate::error::Result;
use crate::protocol::histogram::Histogram;
use crate::protocol::message;
use crate::ring::RingPosition;
use std::io::{BufRead, Write};
use tracing::{debug, warn};

/// What a rank holds once its step of the round is done
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundOutcome {
    /// The origin received the fully merged histogram
    Global(Histogram),

    /// The origin's input closed before a whole record arrived, so some
    /// upstream rank never forwarded its share
    Partial(Histogram),

    /// A relay forwarded its merged partial sum to its successor
    Forwarded(Histogram),
}

impl RoundOutcome {
    /// The histogram the origin ended up with, complete or not
    pub fn into_global(self) -> Option<Histogram> {
        match self {
            RoundOutcome::Global(h) | RoundOutcome::Partial(h) => Some(h),
            RoundOutcome::Forwarded(_) => None,
        }
    }

    pub fn is_partial(&self) -> bool {
        matches!(self, RoundOutcome::Partial(_))
    }
}

/// Start the round: the origin sends its local histogram downstream
pub fn begin_round<W: Write>(output: &mut W, local: &Histogram) -> Result<()> {
    debug!(total = local.total, "Origin starting aggregation round");
    message::send(output, local)
}

/// Finish the round: the origin receives the message that went all the way round
///
/// Every other rank has already merged itself in, so the received value is
/// taken as the global histogram without merging the origin's local again.
/// A record cut short means the round never completed; it is returned as
/// `Partial` rather than passed off as the global result.
pub fn finish_round<R: BufRead>(input: &mut R, policy: MessagePolicy) -> Result<RoundOutcome> {
    let received = message::receive_record(input, policy)?;
    if !received.complete {
        warn!(
            total = received.histogram.total,
            "Round did not complete, an upstream rank stopped before forwarding"
        );
        return Ok(RoundOutcome::Partial(received.histogram));
    }
    debug!(total = received.histogram.total, "Origin received global histogram");
    Ok(RoundOutcome::Global(received.histogram))
}

/// One relay hop: receive, merge the local histogram, forward
///
/// An incomplete record is still merged and forwarded, but without its
/// terminator, so the origin learns that the round lost a contribution.
pub fn relay<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    local: &Histogram,
    policy: MessagePolicy,
) -> Result<Histogram> {
    let received = message::receive_record(input, policy)?;
    let mut partial = received.histogram;
    partial.merge(local);
    message::send_record(output, &partial, received.complete)?;
    debug!(
        total = partial.total,
        complete = received.complete,
        "Relay forwarded merged histogram"
    );
    Ok(partial)
}

/// Run this rank's full step of the round on the given channel ends
pub fn circulate<R: BufRead, W: Write>(
    position: RingPosition,
    local: &Histogram,
    input: &mut R,
    output: &mut W,
    policy: MessagePolicy,
) -> Result<RoundOutcome> {
    if position.rank.is_origin() {
        begin_round(output, local)?;
        finish_round(input, policy)
    } else {
        relay(input, output, local, policy).map(RoundOutcome::Forwarded)
    }
}
