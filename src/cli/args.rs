//! CLI argument definitions using clap
//!
//! Commands:
//! - sheetdesk serve [--config <path>] [--dev]
//! - sheetdesk check-config [--config <path>]
//! - sheetdesk mint-token --sub <uuid> [--config <path>]

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use uuid::Uuid;

/// Default configuration file location
pub const DEFAULT_CONFIG_PATH: &str = "./sheetdesk.json";

/// sheetdesk - session-gated search and statistics over tracker sheets
#[derive(Parser, Debug)]
#[command(name = "sheetdesk")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Only log errors
    #[arg(long, short, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log debug detail
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log line format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Run with built-in defaults when no config file is given
        #[arg(long)]
        dev: bool,
    },

    /// Load and validate a configuration file, then print a summary
    CheckConfig {
        /// Path to configuration file
        #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,
    },

    /// Issue a development access token signed with the configured secret
    MintToken {
        /// Path to configuration file
        #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,

        /// User id to put in the token subject
        #[arg(long)]
        sub: Uuid,

        /// Email claim
        #[arg(long)]
        email: Option<String>,

        /// Token lifetime, overriding the configured one
        #[arg(long)]
        ttl_minutes: Option<i64>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_serve_dev() {
        let cli = Cli::try_parse_from(["sheetdesk", "serve", "--dev", "-v"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Command::Serve { config: None, dev: true }));
    }

    #[test]
    fn test_parse_mint_token() {
        let id = Uuid::new_v4();
        let cli = Cli::try_parse_from([
            "sheetdesk",
            "mint-token",
            "--sub",
            &id.to_string(),
            "--ttl-minutes",
            "5",
        ])
        .unwrap();

        match cli.command {
            Command::MintToken { sub, ttl_minutes, config, .. } => {
                assert_eq!(sub, id);
                assert_eq!(ttl_minutes, Some(5));
                assert_eq!(config, PathBuf::from(DEFAULT_CONFIG_PATH));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_quiet_and_verbose_conflict() {
        assert!(Cli::try_parse_from(["sheetdesk", "-q", "-v", "serve"]).is_err());
    }
}
