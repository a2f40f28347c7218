//! Error types for char-ring
//!
//! This module defines the error hierarchy for:
//! - Channel link and ring construction failures
//! - Partial message decoding
//! - Configuration and CLI errors
//! - File access by the per-file counter
//!
//! Ring construction errors are never recovered: once sibling processes
//! exist with committed channel bindings a half-built ring cannot be rolled
//! back, so callers propagate them straight to `main`.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for the char-ring application
#[derive(Error, Debug)]
pub enum RingError {
    /// Channel link or ring construction errors
    #[error("Ring construction error: {0}")]
    Link(#[from] LinkError),

    /// Partial message errors
    #[error("Message error: {0}")]
    Message(#[from] MessageError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A file or directory could not be opened or read
    #[error("Failed to access '{path}': {source}")]
    FileAccessFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// I/O errors on the ring channels
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Channel link and ring construction errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LinkError {
    /// The host could not allocate a new pipe
    #[error("Failed to create channel link: {reason}")]
    ResourceExhausted { reason: String },

    /// Process duplication failed
    #[error("Failed to spawn worker for rank {rank}: {reason}")]
    SpawnFailed { rank: usize, reason: String },

    /// Rebinding standard input or output failed
    #[error("Failed to bind channel end as {stream}: {reason}")]
    BindFailure {
        stream: StdStream,
        reason: String,
    },

    /// Closing a leftover channel end failed
    #[error("Failed to close channel end: {reason}")]
    DescriptorCloseFailed { reason: String },
}

impl LinkError {
    /// Short name of the construction step that failed
    pub fn step(&self) -> &'static str {
        match self {
            LinkError::ResourceExhausted { .. } => "create link",
            LinkError::SpawnFailed { .. } => "spawn worker",
            LinkError::BindFailure { .. } => "bind channel",
            LinkError::DescriptorCloseFailed { .. } => "close descriptor",
        }
    }
}

/// Which standard stream a channel end was being bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StdStream {
    Input,
    Output,
}

impl std::fmt::Display for StdStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StdStream::Input => write!(f, "standard input"),
            StdStream::Output => write!(f, "standard output"),
        }
    }
}

/// Partial message decoding errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MessageError {
    /// Nothing was received before the channel closed
    #[error("Empty message: channel closed before any byte was received")]
    Empty,

    /// Fewer fields than a full record carries
    #[error("Malformed message: expected {expected} fields, found {found}")]
    Malformed { expected: usize, found: usize },

    /// A field that is not a non-negative decimal integer
    #[error("Malformed message: field {index} is not a count: '{token}'")]
    InvalidField { index: usize, token: String },
}

/// Configuration and CLI errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Invalid ring size
    #[error("Invalid ring size {size}: must be between 1 and {max}")]
    InvalidRingSize { size: usize, max: usize },

    /// Directory missing or not a directory
    #[error("Invalid directory '{path}': {reason}")]
    InvalidDirectory { path: PathBuf, reason: String },

    /// Invalid histogram bar length
    #[error("Invalid bar length {length}: must be at least 1")]
    InvalidBarLength { length: usize },
}

/// Result type alias for RingError
pub type Result<T> = std::result::Result<T, RingError>;

/// Result type alias for LinkError
pub type LinkResult<T> = std::result::Result<T, LinkError>;

/// Result type alias for MessageError
pub type MessageResult<T> = std::result::Result<T, MessageError>;
