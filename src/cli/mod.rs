//! CLI module for sheetdesk
//!
//! Provides command-line interface for:
//! - serve: build the backend and run the HTTP server
//! - check-config: validate a configuration file
//! - mint-token: issue a development access token

mod args;
mod commands;
mod config;
mod errors;

pub use args::{Cli, Command, LogFormat, DEFAULT_CONFIG_PATH};
pub use commands::{build_state, check_config, issue_dev_token, run_command, serve, ConfigSummary};
pub use config::{AuthConfig, BackendConfig, Config};
pub use errors::{CliError, CliErrorCode, CliResult};

use crate::observability::{init_tracing, Verbosity};

/// Parse arguments, install logging and run the chosen command
pub async fn run() -> CliResult<()> {
    let cli = Cli::parse_args();

    init_tracing(
        Verbosity::from_flags(cli.quiet, cli.verbose),
        cli.log_format == LogFormat::Json,
    )
    .map_err(|e| CliError::logging_error(e.to_string()))?;

    run_command(cli.command).await
}
