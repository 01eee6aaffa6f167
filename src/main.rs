//! sheetdesk CLI entry point
//!
//! All logic is delegated to the CLI module; this only reports fatal
//! errors and sets the exit status.

use sheetdesk::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
