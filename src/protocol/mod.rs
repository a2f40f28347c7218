//! Histogram type, wire format and the aggregation round

pub mod aggregate;
pub mod histogram;
pub mod message;

pub use aggregate::{begin_round, circulate, finish_round, relay, RoundOutcome};
pub use histogram::{classify, Histogram, LETTERS};
pub use message::{decode, encode, receive_record, Received};
