//! Partial message wire format
//!
//! A partial message is a single text record:
//!
//! ```text
//! <total> <a> <b> ... <z>\0
//! ```
//!
//! Twenty-seven decimal integers separated by single spaces and terminated
//! by one NUL byte. There is no newline and no length prefix; the NUL is the
//! only record boundary.
//!
//! Decoding follows one of two policies. The lenient policy reads tokens
//! left to right and treats anything missing or unparsable as zero, so an
//! empty read decodes as an all-zero histogram. The strict policy rejects
//! anything short of a full, terminated record.

use crate::config::MessagePolicy;
use crate::error::{MessageError, MessageResult, Result};
use crate::protocol::histogram::{Histogram, LETTERS};
use std::io::{BufRead, Write};
use tracing::{trace, warn};

/// Record terminator
pub const TERMINATOR: u8 = 0;

/// Field separator
pub const SEPARATOR: u8 = b' ';

/// Fields in a full record: total plus one per letter
pub const FIELDS: usize = LETTERS + 1;

/// Serialize a histogram into a terminated record
pub fn encode(histogram: &Histogram) -> Vec<u8> {
    let mut record = histogram.total.to_string().into_bytes();
    for count in &histogram.buckets {
        record.push(SEPARATOR);
        record.extend_from_slice(count.to_string().as_bytes());
    }
    record.push(TERMINATOR);
    record
}

/// Decode a record under the given policy
///
/// `bytes` may or may not include the terminator; anything after the first
/// NUL is ignored.
pub fn decode(bytes: &[u8], policy: MessagePolicy) -> MessageResult<Histogram> {
    match policy {
        MessagePolicy::Lenient => Ok(decode_lenient(bytes)),
        MessagePolicy::Strict => decode_strict(bytes),
    }
}

/// Decode a record, zero-filling missing or unparsable fields
pub fn decode_lenient(bytes: &[u8]) -> Histogram {
    let mut values = [0u64; FIELDS];
    for (slot, token) in values.iter_mut().zip(tokens(bytes)) {
        *slot = leading_count(token);
    }
    from_fields(&values)
}

/// Decode a record, rejecting anything but exactly 27 counts
pub fn decode_strict(bytes: &[u8]) -> MessageResult<Histogram> {
    let tokens: Vec<&[u8]> = tokens(bytes).collect();
    if tokens.is_empty() {
        return Err(MessageError::Empty);
    }
    if tokens.len() != FIELDS {
        return Err(MessageError::Malformed {
            expected: FIELDS,
            found: tokens.len(),
        });
    }

    let mut values = [0u64; FIELDS];
    for (index, (slot, token)) in values.iter_mut().zip(&tokens).enumerate() {
        *slot = std::str::from_utf8(token)
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .ok_or_else(|| MessageError::InvalidField {
                index,
                token: String::from_utf8_lossy(token).into_owned(),
            })?;
    }
    Ok(from_fields(&values))
}

/// Write one record to a channel and flush it
pub fn send<W: Write>(writer: &mut W, histogram: &Histogram) -> Result<()> {
    send_record(writer, histogram, true)
}

/// Write one record, leaving off the terminator when `complete` is false
///
/// An unterminated record still carries every field, but tells the next
/// receiver that the round lost a contribution upstream.
pub fn send_record<W: Write>(writer: &mut W, histogram: &Histogram, complete: bool) -> Result<()> {
    let mut record = encode(histogram);
    if !complete {
        record.pop();
    }
    writer.write_all(&record)?;
    writer.flush()?;
    trace!(bytes = record.len(), total = histogram.total, complete, "Sent partial message");
    Ok(())
}

/// A decoded record and whether it arrived whole
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Received {
    pub histogram: Histogram,

    /// False when the channel closed before the terminator; only possible
    /// under the lenient policy
    pub complete: bool,
}

/// Block until one record arrives on a channel, then decode it
///
/// Reads up to and including the terminator. Under the strict policy a
/// record cut short by end-of-stream is rejected even if its fields parse.
pub fn receive<R: BufRead>(reader: &mut R, policy: MessagePolicy) -> Result<Histogram> {
    receive_record(reader, policy).map(|received| received.histogram)
}

/// Like [`receive`], but also reports whether the record was complete
pub fn receive_record<R: BufRead>(reader: &mut R, policy: MessagePolicy) -> Result<Received> {
    let mut record = Vec::new();
    let read = reader.read_until(TERMINATOR, &mut record)?;
    let terminated = record.last() == Some(&TERMINATOR);
    trace!(bytes = read, terminated, "Received partial message");

    match policy {
        MessagePolicy::Lenient => {
            if read == 0 {
                warn!("Channel closed before a partial message arrived, treating it as empty");
            } else if !terminated {
                warn!(bytes = read, "Partial message not terminated, zero-filling missing fields");
            }
            Ok(Received {
                histogram: decode_lenient(&record),
                complete: terminated,
            })
        }
        MessagePolicy::Strict => {
            let histogram = decode_strict(&record)?;
            if !terminated {
                return Err(MessageError::Malformed {
                    expected: FIELDS,
                    found: tokens(&record).count(),
                }
                .into());
            }
            Ok(Received {
                histogram,
                complete: true,
            })
        }
    }
}

/// Split the body of a record (before the terminator) into non-empty tokens
fn tokens(bytes: &[u8]) -> impl Iterator<Item = &[u8]> {
    let body = match bytes.iter().position(|&b| b == TERMINATOR) {
        Some(end) => &bytes[..end],
        None => bytes,
    };
    body.split(|&b| b == SEPARATOR).filter(|t| !t.is_empty())
}

/// Value of the leading decimal digits of a token
///
/// Zero if there are none or if they do not fit in a `u64`.
fn leading_count(token: &[u8]) -> u64 {
    token
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .try_fold(0u64, |acc, &d| acc.checked_mul(10)?.checked_add(u64::from(d - b'0')))
        .unwrap_or(0)
}

fn from_fields(values: &[u64; FIELDS]) -> Histogram {
    let mut buckets = [0u64; LETTERS];
    buckets.copy_from_slice(&values[1..]);
    Histogram::from_parts(values[0], buckets)
}
