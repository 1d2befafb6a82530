//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Default path of the pending-queue file, relative to the working directory.
pub const DEFAULT_TO_SUBMIT_FILE: &str = "urls_to_submit.txt";

/// Default path of the submitted-history file.
pub const DEFAULT_SUBMITTED_FILE: &str = "urls_submitted.txt";

/// Queue URLs for the Wayback Machine and deduplicate Pocket bookmarks.
#[derive(Parser, Debug)]
#[command(name = "wayback-utils")]
#[command(author, version)]
pub struct Args {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Submit queued URLs to the Wayback Machine if not already archived
    Submit {
        /// Seconds to pause after each URL (0-300); the default keeps
        /// check+save pairs under the service rate limit
        #[arg(long, default_value_t = 6, value_parser = clap::value_parser!(u64).range(0..=300))]
        delay_secs: u64,

        /// Path of the pending-queue file
        #[arg(long, default_value = DEFAULT_TO_SUBMIT_FILE)]
        to_submit: PathBuf,

        /// Path of the submitted-history file
        #[arg(long, default_value = DEFAULT_SUBMITTED_FILE)]
        submitted: PathBuf,
    },

    /// Deduplicate Pocket articles and merge survivors into the pending queue
    Dedup {
        /// Path of the pending-queue file
        #[arg(long, default_value = DEFAULT_TO_SUBMIT_FILE)]
        to_submit: PathBuf,
    },
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_submit_default_args_parses_successfully() {
        let args = Args::try_parse_from(["wayback-utils", "submit"]).unwrap();
        assert_eq!(args.verbose, 0);
        assert!(!args.quiet);
        match args.command {
            Command::Submit {
                delay_secs,
                to_submit,
                submitted,
            } => {
                assert_eq!(delay_secs, 6);
                assert_eq!(to_submit, PathBuf::from(DEFAULT_TO_SUBMIT_FILE));
                assert_eq!(submitted, PathBuf::from(DEFAULT_SUBMITTED_FILE));
            }
            Command::Dedup { .. } => panic!("expected submit command"),
        }
    }

    #[test]
    fn test_cli_dedup_parses_with_custom_queue_path() {
        let args =
            Args::try_parse_from(["wayback-utils", "dedup", "--to-submit", "/tmp/q.txt"]).unwrap();
        match args.command {
            Command::Dedup { to_submit } => {
                assert_eq!(to_submit, PathBuf::from("/tmp/q.txt"));
            }
            Command::Submit { .. } => panic!("expected dedup command"),
        }
    }

    #[test]
    fn test_cli_verbose_flag_counts_after_subcommand() {
        let args = Args::try_parse_from(["wayback-utils", "submit", "-vv"]).unwrap();
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_cli_quiet_flag_sets_quiet() {
        let args = Args::try_parse_from(["wayback-utils", "-q", "submit"]).unwrap();
        assert!(args.quiet);
    }

    #[test]
    fn test_cli_delay_zero_accepted() {
        let args =
            Args::try_parse_from(["wayback-utils", "submit", "--delay-secs", "0"]).unwrap();
        match args.command {
            Command::Submit { delay_secs, .. } => assert_eq!(delay_secs, 0),
            Command::Dedup { .. } => panic!("expected submit command"),
        }
    }

    #[test]
    fn test_cli_delay_over_max_rejected() {
        let result = Args::try_parse_from(["wayback-utils", "submit", "--delay-secs", "301"]);
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().kind(),
            clap::error::ErrorKind::ValueValidation
        );
    }

    #[test]
    fn test_cli_missing_subcommand_rejected() {
        let result = Args::try_parse_from(["wayback-utils"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_version_flag_shows_version() {
        let result = Args::try_parse_from(["wayback-utils", "--version"]);
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().kind(),
            clap::error::ErrorKind::DisplayVersion
        );
    }
}
