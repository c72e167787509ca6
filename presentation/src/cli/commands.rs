//! CLI command definitions

use clap::{Parser, Subcommand};
use quorum_domain::OutputFormat;
use std::path::PathBuf;

/// CLI arguments for quorum-ballot
#[derive(Parser, Debug)]
#[command(name = "quorum-ballot")]
#[command(author, version, about = "Board voting outcomes and result notifications")]
#[command(long_about = r#"
Quorum Ballot closes votes on board resolutions and minutes, computes the
outcome statistics and emails the result to every eligible member.

Voting on a decision completes when:
1. Every eligible member has voted
2. The voting deadline has passed
3. An administrator completes it manually

Configuration files are loaded from (in priority order):
1. QUORUM_BALLOT_* environment variables
2. --config <path>              Explicit config file
3. ./quorum-ballot.toml         Project-level config
4. ~/.config/quorum-ballot/config.toml   Global config

Example:
  quorum-ballot stats res-2024-07
  quorum-ballot check res-2024-07
  quorum-ballot watch --interval 30
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output format (text or json); overrides `[output] format`
    #[arg(short, long, global = true, value_name = "FORMAT")]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress delivery progress
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,
}

/// Subcommands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Show the current vote statistics of a decision without changing it
    Stats {
        /// Decision id
        id: String,
    },

    /// Check whether voting is over and finalize the decision if so
    Check {
        /// Decision id
        id: String,
    },

    /// Close voting now and finalize with the votes cast so far
    Complete {
        /// Decision id
        id: String,
    },

    /// Finalize every decision whose voting deadline has passed
    Sweep,

    /// Sweep expired deadlines periodically until interrupted
    Watch {
        /// Seconds between sweeps (defaults to `[scheduler] interval_secs`)
        #[arg(long, value_name = "SECS")]
        interval: Option<u64>,
    },

    /// Show configuration file locations and the effective configuration
    ShowConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_check() {
        let cli = Cli::try_parse_from(["quorum-ballot", "check", "res-1"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Check {
                id: "res-1".to_string()
            }
        );
        assert!(cli.output.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["quorum-ballot", "stats", "res-1", "-o", "json", "-vv", "-q"])
                .unwrap();
        assert_eq!(cli.output, Some(OutputFormat::Json));
        assert_eq!(cli.verbose, 2);
        assert!(cli.quiet);
    }

    #[test]
    fn test_watch_interval() {
        let cli = Cli::try_parse_from(["quorum-ballot", "watch", "--interval", "30"]).unwrap();
        assert_eq!(cli.command, Command::Watch { interval: Some(30) });
    }

    #[test]
    fn test_unknown_output_format_rejected() {
        assert!(Cli::try_parse_from(["quorum-ballot", "sweep", "-o", "yaml"]).is_err());
    }
}
