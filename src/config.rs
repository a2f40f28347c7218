//! Configuration types for char-ring
//!
//! This module defines:
//! - CLI argument parsing using clap derive macros
//! - Runtime configuration with validation
//! - The counting and message-decoding policies

use crate::error::ConfigError;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Maximum reasonable ring size (each rank is a separate process)
pub const MAX_RING_SIZE: usize = 256;

/// Default width of the longest histogram bar
pub const DEFAULT_BAR_LENGTH: usize = 70;

/// Character-frequency histogram computed by a ring of processes
#[derive(Parser, Debug, Clone)]
#[command(
    name = "char-ring",
    version,
    about = "Count letter frequencies across a directory using a ring of processes",
    long_about = "Builds a ring of RING_SIZE processes connected by pipes, splits the files of DIR\n\
                  between them round-robin, and circulates partial counts once around the ring.\n\n\
                  The final histogram is printed to standard error by the first process.",
    after_help = "EXAMPLES:\n    \
        char-ring 4 text_files\n    \
        char-ring 1 notes --count-mode letters\n    \
        char-ring 8 corpus --strict-messages -v"
)]
pub struct CliArgs {
    /// Number of processes in the ring
    #[arg(value_name = "RING_SIZE")]
    pub ring_size: usize,

    /// Directory whose files are counted
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    /// Which bytes contribute to the total count
    #[arg(long, value_enum, default_value_t = CountMode::AllBytes)]
    pub count_mode: CountMode,

    /// Reject empty or truncated partial messages instead of zero-filling them
    #[arg(long)]
    pub strict_messages: bool,

    /// Width of the longest histogram bar
    #[arg(long, default_value_t = DEFAULT_BAR_LENGTH, value_name = "NUM")]
    pub bar_length: usize,

    /// Quiet mode - suppress the header
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Verbose output (per-rank debug logging)
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

/// How the per-file counter accumulates the total count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum CountMode {
    /// Every byte read counts toward the total; only letters are bucketed
    #[default]
    AllBytes,
    /// Only bytes that land in a letter bucket count toward the total
    Letters,
}

/// How a receiver treats empty or incomplete partial messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessagePolicy {
    /// Missing or unparsable fields decode as zero
    #[default]
    Lenient,
    /// Anything short of a full record is an error
    Strict,
}

/// Validated runtime configuration
#[derive(Debug, Clone)]
pub struct RingConfig {
    /// Number of processes in the ring
    pub ring_size: usize,

    /// Directory whose files are counted
    pub dir: PathBuf,

    /// Total-count semantics
    pub count_mode: CountMode,

    /// Partial message decoding policy
    pub message_policy: MessagePolicy,

    /// Width of the longest histogram bar
    pub bar_length: usize,

    /// Show header before the results
    pub show_header: bool,
}

impl RingConfig {
    /// Create and validate configuration from CLI arguments
    pub fn from_args(args: CliArgs) -> Result<Self, ConfigError> {
        if args.ring_size == 0 || args.ring_size > MAX_RING_SIZE {
            return Err(ConfigError::InvalidRingSize {
                size: args.ring_size,
                max: MAX_RING_SIZE,
            });
        }

        if args.bar_length == 0 {
            return Err(ConfigError::InvalidBarLength {
                length: args.bar_length,
            });
        }

        if !args.dir.exists() {
            return Err(ConfigError::InvalidDirectory {
                path: args.dir.clone(),
                reason: "does not exist".to_string(),
            });
        }
        if !args.dir.is_dir() {
            return Err(ConfigError::InvalidDirectory {
                path: args.dir.clone(),
                reason: "not a directory".to_string(),
            });
        }

        let message_policy = if args.strict_messages {
            MessagePolicy::Strict
        } else {
            MessagePolicy::Lenient
        };

        Ok(Self {
            ring_size: args.ring_size,
            dir: args.dir,
            count_mode: args.count_mode,
            message_policy,
            bar_length: args.bar_length,
            show_header: !args.quiet,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn args(ring_size: usize, dir: PathBuf) -> CliArgs {
        CliArgs {
            ring_size,
            dir,
            count_mode: CountMode::AllBytes,
            strict_messages: false,
            bar_length: DEFAULT_BAR_LENGTH,
            quiet: false,
            verbose: false,
        }
    }

    #[test]
    fn test_parse_positionals() {
        let args = CliArgs::try_parse_from(["char-ring", "4", "text_files"]).unwrap();
        assert_eq!(args.ring_size, 4);
        assert_eq!(args.dir, PathBuf::from("text_files"));
        assert_eq!(args.count_mode, CountMode::AllBytes);
        assert!(!args.strict_messages);
    }

    #[test]
    fn test_parse_flags() {
        let args = CliArgs::try_parse_from([
            "char-ring",
            "2",
            "dir",
            "--count-mode",
            "letters",
            "--strict-messages",
            "-q",
        ])
        .unwrap();
        assert_eq!(args.count_mode, CountMode::Letters);
        assert!(args.strict_messages);
        assert!(args.quiet);
    }

    #[test]
    fn test_parse_rejects_non_numeric_ring_size() {
        assert!(CliArgs::try_parse_from(["char-ring", "four", "dir"]).is_err());
        assert!(CliArgs::try_parse_from(["char-ring", "-1", "dir"]).is_err());
        assert!(CliArgs::try_parse_from(["char-ring", "4"]).is_err());
    }

    #[test]
    fn test_ring_size_bounds() {
        let dir = tempdir().unwrap();

        let err = RingConfig::from_args(args(0, dir.path().to_path_buf())).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRingSize { size: 0, .. }));

        let err =
            RingConfig::from_args(args(MAX_RING_SIZE + 1, dir.path().to_path_buf())).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRingSize { .. }));

        let config = RingConfig::from_args(args(MAX_RING_SIZE, dir.path().to_path_buf())).unwrap();
        assert_eq!(config.ring_size, MAX_RING_SIZE);
    }

    #[test]
    fn test_directory_validation() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing");
        let err = RingConfig::from_args(args(1, missing)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDirectory { .. }));

        let file = dir.path().join("file.txt");
        std::fs::write(&file, "abc").unwrap();
        let err = RingConfig::from_args(args(1, file)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDirectory { .. }));
    }

    #[test]
    fn test_strict_flag_maps_to_policy() {
        let dir = tempdir().unwrap();
        let mut cli = args(2, dir.path().to_path_buf());
        cli.strict_messages = true;
        cli.quiet = true;
        let config = RingConfig::from_args(cli).unwrap();
        assert_eq!(config.message_policy, MessagePolicy::Strict);
        assert!(!config.show_header);
    }
}
