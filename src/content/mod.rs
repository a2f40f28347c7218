//! File-side collaborators of the ring
//!
//! This module provides:
//! - Directory listing into an ordered `FileSet`
//! - Per-file letter counting

pub mod counter;
pub mod listing;

pub use counter::{count_file, count_reader};
pub use listing::FileSet;
