//! char-ring - Letter Frequencies from a Ring of Processes
//!
//! Counts how often each letter a-z appears across the files of a directory
//! by splitting the work between N processes connected in a ring by pipes.
//! There is no shared memory and no coordinator: each process only knows
//! its own rank and its two standard streams.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Rank 1 (original process)                    │
//! │  - Lists the directory into a FileSet                           │
//! │  - Forms the trivial ring (stdout piped into own stdin)         │
//! │  - Forks rank 2 and splices it in behind itself                 │
//! └─────────────────────────────┬───────────────────────────────────┘
//!                               │ fork + pipe + dup2, N-1 times
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Ring of N processes                         │
//! │  ┌─────────┐    ┌─────────┐    ┌─────────┐        ┌─────────┐   │
//! │  │ Rank 1  │───▶│ Rank 2  │───▶│ Rank 3  │─ ... ─▶│ Rank N  │   │
//! │  │ files   │    │ files   │    │ files   │        │ files   │   │
//! │  │ 0,N,..  │    │ 1,N+1,..│    │ 2,N+2,..│        │ N-1,..  │   │
//! │  └────▲────┘    └─────────┘    └─────────┘        └────┬────┘   │
//! │       └────────────────────────────────────────────────┘        │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//!            One partial message travels once round the ring,
//!            each relay adding its local counts; rank 1 prints
//!            the global histogram to stderr.
//! ```
//!
//! # Example
//!
//! ```bash
//! # Four processes over a directory of text files
//! char-ring 4 text_files
//!
//! # Only letters contribute to the total, reject truncated messages
//! char-ring 4 text_files --count-mode letters --strict-messages
//! ```

pub mod config;
pub mod content;
pub mod error;
pub mod protocol;
pub mod report;
pub mod ring;

pub use config::{CliArgs, CountMode, MessagePolicy, RingConfig};
pub use content::FileSet;
pub use error::{LinkError, MessageError, Result, RingError};
pub use protocol::Histogram;
pub use ring::{Rank, RingBuilder, RingPosition, RingWorker};
